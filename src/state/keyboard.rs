use std::collections::BTreeSet;

use log::debug;

use crate::state::coords::{CellKey, GridCellCoords, GridLayout};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Escape,
    Char(char),
    Other,
}

impl GridKey {
    fn step(&self) -> Option<(isize, isize)> {
        match self {
            Self::ArrowUp => Some((-1, 0)),
            Self::ArrowDown => Some((1, 0)),
            Self::ArrowLeft => Some((0, -1)),
            Self::ArrowRight => Some((0, 1)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: GridKey,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyInput {
    pub fn plain(key: GridKey) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
            meta: false,
        }
    }

    pub fn shifted(key: GridKey) -> Self {
        Self {
            shift: true,
            ..Self::plain(key)
        }
    }

    pub fn command(key: GridKey) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    fn is_select_all(&self) -> bool {
        (self.ctrl || self.meta) && matches!(self.key, GridKey::Char('a' | 'A'))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    pub prevent_default: bool,
    pub selection_changed: bool,
}

impl KeyOutcome {
    fn handled(selection_changed: bool) -> Self {
        Self {
            prevent_default: true,
            selection_changed,
        }
    }
}

/// Focus, anchor and a set of selected cells driven by key presses.
///
/// Every mutating key reports through [`KeyOutcome::selection_changed`];
/// [`KeyboardSelection::set_keyboard_selection`] is the silent import path
/// and reports nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardSelection {
    enabled: bool,
    focused: Option<CellKey>,
    anchor: Option<CellKey>,
    selected: BTreeSet<CellKey>,
}

impl Default for KeyboardSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardSelection {
    pub fn new() -> Self {
        Self {
            enabled: true,
            focused: None,
            anchor: None,
            selected: BTreeSet::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn focused_cell(&self) -> Option<CellKey> {
        self.focused
    }

    pub fn anchor(&self) -> Option<CellKey> {
        self.anchor
    }

    pub fn selected_len(&self) -> usize {
        self.selected.len()
    }

    pub fn selected_keys(&self) -> impl Iterator<Item = &CellKey> {
        self.selected.iter()
    }

    pub fn handle_key_down(&mut self, input: &KeyInput, layout: &GridLayout) -> KeyOutcome {
        if !self.enabled {
            return KeyOutcome::default();
        }

        if let Some((d_row, d_col)) = input.key.step() {
            return self.move_focus(d_row, d_col, input.shift, layout);
        }

        if input.is_select_all() {
            let all: BTreeSet<CellKey> = layout.all_cells().into_iter().collect();
            let changed = all != self.selected;
            self.selected = all;
            self.anchor = None;
            debug!("select all: {} cells", self.selected.len());
            return KeyOutcome::handled(changed);
        }

        match input.key {
            GridKey::Space | GridKey::Enter => {
                let Some(focused) = self.focused.filter(|key| layout.contains(*key)) else {
                    return KeyOutcome::default();
                };
                if !self.selected.remove(&focused) {
                    self.selected.insert(focused);
                }
                self.anchor = Some(focused);
                KeyOutcome::handled(true)
            }
            GridKey::Escape => {
                let changed = !self.selected.is_empty();
                self.selected.clear();
                self.anchor = None;
                KeyOutcome::handled(changed)
            }
            _ => KeyOutcome::default(),
        }
    }

    fn move_focus(
        &mut self,
        d_row: isize,
        d_col: isize,
        extend: bool,
        layout: &GridLayout,
    ) -> KeyOutcome {
        let next = match self.focused {
            Some(current) => layout.clamp(current.row as isize + d_row, current.col as isize + d_col),
            None => layout.clamp(0, 0),
        };
        let Some(next) = next else {
            return KeyOutcome::handled(false);
        };

        if !extend {
            self.focused = Some(next);
            self.anchor = None;
            return KeyOutcome::handled(false);
        }

        let anchor = *self.anchor.get_or_insert(self.focused.unwrap_or(next));
        self.focused = Some(next);
        let rect: BTreeSet<CellKey> = layout.cells_in_rect(anchor, next).into_iter().collect();
        let changed = rect != self.selected;
        self.selected = rect;
        KeyOutcome::handled(changed)
    }

    pub fn is_cell_focused(&self, row: usize, col: usize) -> bool {
        self.focused == Some(CellKey::new(row, col))
    }

    pub fn is_cell_keyboard_selected(&self, row: usize, col: usize) -> bool {
        self.selected.contains(&CellKey::new(row, col))
    }

    /// Moves focus to `(row, col)`. Cells outside `layout` are ignored.
    pub fn focus_cell(&mut self, row: usize, col: usize, layout: &GridLayout) -> bool {
        let key = CellKey::new(row, col);
        if !layout.contains(key) {
            return false;
        }
        self.focused = Some(key);
        true
    }

    /// Replaces the set with an externally produced selection. Silent: the
    /// caller already knows what changed.
    pub fn set_keyboard_selection(&mut self, coords: &[GridCellCoords]) {
        self.selected = coords.iter().map(GridCellCoords::key).collect();
        self.anchor = coords.first().map(GridCellCoords::key);
    }

    /// Resolves the set against `layout`, dropping keys that no longer exist.
    pub fn selected_coords(&self, layout: &GridLayout) -> Vec<GridCellCoords> {
        self.selected
            .iter()
            .filter_map(|key| layout.resolve_key(*key))
            .collect()
    }

    /// Drops keys, focus and anchor that fell outside a shrunken grid.
    /// Returns whether the selection set changed.
    pub fn retain_in_bounds(&mut self, layout: &GridLayout) -> bool {
        let before = self.selected.len();
        self.selected.retain(|key| layout.contains(*key));
        self.focused = self.focused.filter(|key| layout.contains(*key));
        self.anchor = self.anchor.filter(|key| layout.contains(*key));
        before != self.selected.len()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }
}
