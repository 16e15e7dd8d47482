use chrono::NaiveDate;
use proptest::prelude::*;

use shiftgrid::state::bridge::{GridEvent, GridSelection};
use shiftgrid::state::coords::{GridLayout, StaffRow};
use shiftgrid::state::keyboard::{GridKey, KeyInput, KeyboardSelection};
use shiftgrid::state::pointer::{PointerInput, PointerKind};

fn layout(rows: usize, cols: usize) -> GridLayout {
    let staff = (0..rows)
        .map(|n| StaffRow::new(format!("s{n}"), format!("Staff {n}")))
        .collect();
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let dates = (0..cols)
        .map(|offset| start + chrono::Duration::days(offset as i64))
        .collect();
    GridLayout::new(staff, dates)
}

fn arrow() -> impl Strategy<Value = GridKey> {
    prop_oneof![
        Just(GridKey::ArrowUp),
        Just(GridKey::ArrowDown),
        Just(GridKey::ArrowLeft),
        Just(GridKey::ArrowRight),
    ]
}

proptest! {
    /// Resolution succeeds exactly inside the grid and echoes the indices.
    #[test]
    fn prop_resolve_matches_bounds(rows in 0..8usize, cols in 0..8usize, row in 0..12usize, col in 0..12usize) {
        let layout = layout(rows, cols);
        match layout.resolve(row, col) {
            Some(coords) => {
                prop_assert!(row < rows && col < cols);
                prop_assert_eq!(coords.row_index, row);
                prop_assert_eq!(coords.col_index, col);
            }
            None => prop_assert!(row >= rows || col >= cols),
        }
    }

    /// A drag selects the closed rectangle between its corners, whichever way it goes.
    #[test]
    fn prop_drag_selects_exact_rectangle(
        r1 in 0..6usize, c1 in 0..7usize, r2 in 0..6usize, c2 in 0..7usize,
    ) {
        let layout = layout(6, 7);
        let mut selection = GridSelection::new();
        selection.dispatch(
            GridEvent::PointerDown { row: r1, col: c1, input: PointerInput::primary(PointerKind::Mouse) },
            &layout,
        );
        selection.dispatch(GridEvent::PointerEnter { row: r2, col: c2 }, &layout);
        selection.dispatch(GridEvent::PointerRelease, &layout);

        for row in 0..6 {
            for col in 0..7 {
                let inside = (r1.min(r2)..=r1.max(r2)).contains(&row)
                    && (c1.min(c2)..=c1.max(c2)).contains(&col);
                prop_assert_eq!(selection.pointer().is_cell_selected(col, row), inside);
                prop_assert_eq!(selection.keyboard().is_cell_keyboard_selected(row, col), inside);
            }
        }
        let expected = (r1.abs_diff(r2) + 1) * (c1.abs_diff(c2) + 1);
        prop_assert_eq!(selection.selected_coords(&layout).len(), expected);
    }

    /// Focus never leaves the grid and the selection stays a rectangle holding the anchor.
    #[test]
    fn prop_keyboard_stays_in_bounds(keys in proptest::collection::vec((arrow(), any::<bool>()), 1..40)) {
        let layout = layout(4, 5);
        let mut keyboard = KeyboardSelection::new();
        for (key, shift) in keys {
            let input = if shift { KeyInput::shifted(key) } else { KeyInput::plain(key) };
            let outcome = keyboard.handle_key_down(&input, &layout);
            prop_assert!(outcome.prevent_default);

            let focused = keyboard.focused_cell().unwrap();
            prop_assert!(layout.contains(focused));
            if let Some(anchor) = keyboard.anchor() {
                prop_assert!(keyboard.is_cell_keyboard_selected(anchor.row, anchor.col));
                prop_assert!(keyboard.is_cell_keyboard_selected(focused.row, focused.col));
                let expected = (anchor.row.abs_diff(focused.row) + 1) * (anchor.col.abs_diff(focused.col) + 1);
                prop_assert_eq!(keyboard.selected_len(), expected);
            }
        }
    }
}
