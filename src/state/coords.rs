use std::hash::{Hash, Hasher};

use chrono::NaiveDate;

/// Canonical `(row, col)` key of a grid cell. Orders row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub row: usize,
    pub col: usize,
}

impl CellKey {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A resolved cell: grid position plus the staff/date it stands for in the
/// current layout. Equality only looks at the position.
#[derive(Clone, Debug)]
pub struct GridCellCoords {
    pub staff_id: String,
    pub date_str: String,
    pub row_index: usize,
    pub col_index: usize,
}

impl GridCellCoords {
    pub fn key(&self) -> CellKey {
        CellKey::new(self.row_index, self.col_index)
    }
}

impl PartialEq for GridCellCoords {
    fn eq(&self, other: &Self) -> bool {
        self.row_index == other.row_index && self.col_index == other.col_index
    }
}

impl Eq for GridCellCoords {}

impl Hash for GridCellCoords {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row_index.hash(state);
        self.col_index.hash(state);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaffRow {
    pub staff_id: String,
    pub name: String,
}

impl StaffRow {
    pub fn new(staff_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            staff_id: staff_id.into(),
            name: name.into(),
        }
    }
}

pub type DateFormatter = fn(&NaiveDate) -> String;

pub fn iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Closed, normalized rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRect {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl SelectionRect {
    pub fn from_corners(a: CellKey, b: CellKey) -> Self {
        Self {
            top: a.row.min(b.row),
            left: a.col.min(b.col),
            bottom: a.row.max(b.row),
            right: a.col.max(b.col),
        }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.top..=self.bottom).contains(&row) && (self.left..=self.right).contains(&col)
    }

    pub fn cell_count(&self) -> usize {
        (self.bottom - self.top + 1) * (self.right - self.left + 1)
    }

    pub fn cells(&self) -> impl Iterator<Item = CellKey> + '_ {
        (self.top..=self.bottom)
            .flat_map(move |row| (self.left..=self.right).map(move |col| CellKey::new(row, col)))
    }
}

/// Ordered staff rows and date columns the grid is currently showing.
#[derive(Clone, Debug)]
pub struct GridLayout {
    staff: Vec<StaffRow>,
    dates: Vec<NaiveDate>,
    format_date: DateFormatter,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl PartialEq for GridLayout {
    fn eq(&self, other: &Self) -> bool {
        self.staff == other.staff
            && self.dates == other.dates
            && self.format_date as usize == other.format_date as usize
    }
}

impl GridLayout {
    pub fn new(staff: Vec<StaffRow>, dates: Vec<NaiveDate>) -> Self {
        Self::with_formatter(staff, dates, iso_date)
    }

    pub fn with_formatter(
        staff: Vec<StaffRow>,
        dates: Vec<NaiveDate>,
        format_date: DateFormatter,
    ) -> Self {
        Self {
            staff,
            dates,
            format_date,
        }
    }

    pub fn staff(&self) -> &[StaffRow] {
        &self.staff
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn total_rows(&self) -> usize {
        self.staff.len()
    }

    pub fn total_cols(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staff.is_empty() || self.dates.is_empty()
    }

    pub fn contains(&self, key: CellKey) -> bool {
        key.row < self.total_rows() && key.col < self.total_cols()
    }

    pub fn resolve(&self, row: usize, col: usize) -> Option<GridCellCoords> {
        let staff = self.staff.get(row)?;
        let date = self.dates.get(col)?;
        Some(GridCellCoords {
            staff_id: staff.staff_id.clone(),
            date_str: (self.format_date)(date),
            row_index: row,
            col_index: col,
        })
    }

    pub fn resolve_key(&self, key: CellKey) -> Option<GridCellCoords> {
        self.resolve(key.row, key.col)
    }

    /// Pulls a signed position back inside the grid. `None` on an empty grid.
    pub fn clamp(&self, row: isize, col: isize) -> Option<CellKey> {
        if self.is_empty() {
            return None;
        }
        let max_row = (self.total_rows() - 1) as isize;
        let max_col = (self.total_cols() - 1) as isize;
        Some(CellKey::new(
            row.clamp(0, max_row) as usize,
            col.clamp(0, max_col) as usize,
        ))
    }

    /// Cells of the rectangle spanned by `a` and `b` that lie inside the grid.
    pub fn cells_in_rect(&self, a: CellKey, b: CellKey) -> Vec<CellKey> {
        if self.is_empty() {
            return Vec::new();
        }
        let rect = SelectionRect::from_corners(a, b);
        if rect.top >= self.total_rows() || rect.left >= self.total_cols() {
            return Vec::new();
        }
        SelectionRect {
            bottom: rect.bottom.min(self.total_rows() - 1),
            right: rect.right.min(self.total_cols() - 1),
            ..rect
        }
        .cells()
        .collect()
    }

    pub fn all_cells(&self) -> Vec<CellKey> {
        if self.is_empty() {
            return Vec::new();
        }
        self.cells_in_rect(
            CellKey::new(0, 0),
            CellKey::new(self.total_rows() - 1, self.total_cols() - 1),
        )
    }
}
