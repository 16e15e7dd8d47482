use log::debug;

use crate::state::coords::{CellKey, GridCellCoords, SelectionRect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "touch" => Self::Touch,
            "pen" => Self::Pen,
            _ => Self::Mouse,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerInput {
    pub button: PointerButton,
    pub kind: PointerKind,
}

impl PointerInput {
    pub fn primary(kind: PointerKind) -> Self {
        Self {
            button: PointerButton::Primary,
            kind,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerOutcome {
    /// Suppress the platform's text selection / native drag.
    pub prevent_default: bool,
    pub selection_changed: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionBox {
    pub start: Option<GridCellCoords>,
    pub end: Option<GridCellCoords>,
    pub is_selecting: bool,
}

impl SelectionBox {
    pub fn rect(&self) -> Option<SelectionRect> {
        match (self.start.as_ref(), self.end.as_ref()) {
            (Some(start), Some(end)) => Some(SelectionRect::from_corners(start.key(), end.key())),
            _ => None,
        }
    }
}

/// Press-drag-release rectangle selection. No pointer capture is taken, so
/// `pointerenter` keeps firing on sibling cells while dragging.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerSelection {
    enabled: bool,
    selection: SelectionBox,
}

impl Default for PointerSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerSelection {
    pub fn new() -> Self {
        Self {
            enabled: true,
            selection: SelectionBox::default(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn selection_box(&self) -> &SelectionBox {
        &self.selection
    }

    pub fn is_selecting(&self) -> bool {
        self.selection.is_selecting
    }

    pub fn selection_rect(&self) -> Option<SelectionRect> {
        self.selection.rect()
    }

    pub fn on_pointer_down(&mut self, cell: GridCellCoords, input: PointerInput) -> PointerOutcome {
        if !self.enabled || input.button != PointerButton::Primary {
            return PointerOutcome::default();
        }
        if self.selection.is_selecting {
            // One drag session at a time; a second touch waits for release.
            return PointerOutcome::default();
        }

        debug!(
            "drag start at row {} col {}",
            cell.row_index, cell.col_index
        );
        self.selection = SelectionBox {
            start: Some(cell.clone()),
            end: Some(cell),
            is_selecting: true,
        };
        PointerOutcome {
            prevent_default: input.kind == PointerKind::Mouse,
            selection_changed: true,
        }
    }

    pub fn on_pointer_enter(&mut self, cell: GridCellCoords) -> PointerOutcome {
        if !self.selection.is_selecting {
            return PointerOutcome::default();
        }
        if self.selection.end.as_ref() == Some(&cell) {
            return PointerOutcome::default();
        }

        self.selection.end = Some(cell);
        PointerOutcome {
            prevent_default: false,
            selection_changed: true,
        }
    }

    /// Release entry point for the window-level pointer-up listener.
    pub fn on_pointer_up(&mut self) -> bool {
        if !self.selection.is_selecting {
            return false;
        }
        self.selection.is_selecting = false;
        if let Some(rect) = self.selection.rect() {
            debug!("drag finished covering {} cells", rect.cell_count());
        }
        true
    }

    pub fn is_cell_selected(&self, col_index: usize, row_index: usize) -> bool {
        self.selection
            .rect()
            .map(|rect| rect.contains(row_index, col_index))
            .unwrap_or(false)
    }

    pub fn selected_keys(&self) -> Vec<CellKey> {
        self.selection
            .rect()
            .map(|rect| rect.cells().collect())
            .unwrap_or_default()
    }

    pub fn clear_selection(&mut self) {
        self.selection = SelectionBox::default();
    }
}
