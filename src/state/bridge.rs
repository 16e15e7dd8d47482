//! Pointer and keyboard selection composed behind one event entry point.
//!
//! Data only flows one way: a pointer change is copied into the keyboard
//! tracker through its silent import, then announced once. Keyboard changes
//! are announced but never written back into the pointer box.

use std::collections::HashSet;

use log::debug;

use crate::state::coords::{CellKey, GridCellCoords, GridLayout};
use crate::state::keyboard::{KeyInput, KeyboardSelection};
use crate::state::pointer::{PointerInput, PointerSelection};

pub type SelectionListener = Box<dyn FnMut(&[GridCellCoords])>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridEvent {
    PointerDown {
        row: usize,
        col: usize,
        input: PointerInput,
    },
    PointerEnter {
        row: usize,
        col: usize,
    },
    PointerRelease,
    Key(KeyInput),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    pub prevent_default: bool,
    pub selection_changed: bool,
}

#[derive(Default)]
pub struct GridSelection {
    pointer: PointerSelection,
    keyboard: KeyboardSelection,
    listener: Option<SelectionListener>,
}

impl std::fmt::Debug for GridSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridSelection")
            .field("pointer", &self.pointer)
            .field("keyboard", &self.keyboard)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl GridSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listener(listener: impl FnMut(&[GridCellCoords]) + 'static) -> Self {
        Self {
            listener: Some(Box::new(listener)),
            ..Self::default()
        }
    }

    pub fn set_listener(&mut self, listener: impl FnMut(&[GridCellCoords]) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn pointer(&self) -> &PointerSelection {
        &self.pointer
    }

    pub fn keyboard(&self) -> &KeyboardSelection {
        &self.keyboard
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.pointer.set_enabled(enabled);
        self.keyboard.set_enabled(enabled);
    }

    pub fn dispatch(&mut self, event: GridEvent, layout: &GridLayout) -> EventResponse {
        match event {
            GridEvent::PointerDown { row, col, input } => {
                let Some(cell) = layout.resolve(row, col) else {
                    return EventResponse::default();
                };
                let outcome = self.pointer.on_pointer_down(cell, input);
                if outcome.selection_changed {
                    self.keyboard.focus_cell(row, col, layout);
                    self.import_pointer_selection(layout);
                    self.notify(layout);
                }
                EventResponse {
                    prevent_default: outcome.prevent_default,
                    selection_changed: outcome.selection_changed,
                }
            }
            GridEvent::PointerEnter { row, col } => {
                let Some(cell) = layout.resolve(row, col) else {
                    return EventResponse::default();
                };
                let outcome = self.pointer.on_pointer_enter(cell);
                if outcome.selection_changed {
                    self.import_pointer_selection(layout);
                    self.notify(layout);
                }
                EventResponse {
                    prevent_default: false,
                    selection_changed: outcome.selection_changed,
                }
            }
            GridEvent::PointerRelease => {
                if !self.pointer.on_pointer_up() {
                    return EventResponse::default();
                }
                self.import_pointer_selection(layout);
                self.notify(layout);
                EventResponse {
                    prevent_default: false,
                    selection_changed: true,
                }
            }
            GridEvent::Key(input) => {
                let outcome = self.keyboard.handle_key_down(&input, layout);
                if outcome.selection_changed {
                    debug!("keyboard selection now {} cells", self.keyboard.selected_len());
                    self.notify(layout);
                }
                EventResponse {
                    prevent_default: outcome.prevent_default,
                    selection_changed: outcome.selection_changed,
                }
            }
        }
    }

    fn import_pointer_selection(&mut self, layout: &GridLayout) {
        let coords: Vec<GridCellCoords> = self
            .pointer
            .selected_keys()
            .into_iter()
            .filter_map(|key| layout.resolve_key(key))
            .collect();
        self.keyboard.set_keyboard_selection(&coords);
    }

    fn notify(&mut self, layout: &GridLayout) {
        if self.listener.is_none() {
            return;
        }
        let coords = self.selected_coords(layout);
        if let Some(listener) = self.listener.as_mut() {
            listener(&coords);
        }
    }

    /// The hand-off to batch assignment: resolvable cells only, one per
    /// `(staff_id, date_str)` pair, row-major.
    pub fn selected_coords(&self, layout: &GridLayout) -> Vec<GridCellCoords> {
        let mut seen = HashSet::new();
        self.keyboard
            .selected_coords(layout)
            .into_iter()
            .filter(|coords| seen.insert((coords.staff_id.clone(), coords.date_str.clone())))
            .collect()
    }

    pub fn selected_len(&self) -> usize {
        self.keyboard.selected_len()
    }

    pub fn is_cell_highlighted(&self, row: usize, col: usize) -> bool {
        self.keyboard.is_cell_keyboard_selected(row, col)
            || (self.pointer.is_selecting() && self.pointer.is_cell_selected(col, row))
    }

    pub fn is_cell_focused(&self, row: usize, col: usize) -> bool {
        self.keyboard.is_cell_focused(row, col)
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer.is_selecting()
    }

    /// Explicit reset from the surrounding view, e.g. after a batch was saved
    /// or a new roster was opened. Focus survives only if `layout` still has it.
    pub fn clear_all(&mut self, layout: &GridLayout) {
        self.pointer.clear_selection();
        self.keyboard.clear();
        self.keyboard.retain_in_bounds(layout);
        self.notify(layout);
    }

    /// Re-validates state after the staff list or visible dates changed.
    pub fn sync_layout(&mut self, layout: &GridLayout) {
        let pointer_stale = self
            .pointer
            .selection_rect()
            .map(|rect| !layout.contains(CellKey::new(rect.bottom, rect.right)))
            .unwrap_or(false);
        if pointer_stale {
            self.pointer.clear_selection();
        }
        if self.keyboard.retain_in_bounds(layout) || pointer_stale {
            self.notify(layout);
        }
    }
}
