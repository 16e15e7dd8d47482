use dioxus::prelude::*;

use crate::io::assignment_io::JsonFileSink;
use crate::state::assignment::{self, AssignmentStatus};
use crate::state::bridge::GridSelection;
use crate::state::coords::GridCellCoords;
use crate::state::roster::Roster;
use crate::ui::actions;

#[component]
pub fn Toolbar(
    roster: Signal<Roster>,
    selection: Signal<GridSelection>,
    selected_coords: Signal<Vec<GridCellCoords>>,
    selected_shift: Signal<Option<String>>,
    status: Signal<AssignmentStatus>,
    sink: JsonFileSink,
    error_message: Signal<Option<String>>,
    notice: Signal<Option<String>>,
    notice_seconds: u64,
) -> Element {
    let snapshot = roster.read().clone();
    let coords = selected_coords.read().clone();
    let shift_value = selected_shift.read().clone().unwrap_or_default();
    let current_status = *status.read();
    let can_assign = !coords.is_empty() && !shift_value.is_empty();
    let preview = assignment::group_by_staff(&coords, &shift_value, current_status).unwrap_or_default();

    rsx! {
        div { class: "toolbar",
            // Roster group
            div { class: "toolbar-group",
                button {
                    class: "toolbar-btn",
                    id: "btn-open-roster",
                    onclick: move |_| {
                        spawn(async move {
                            actions::open_roster(roster, selection, selected_shift, error_message).await;
                        });
                    },
                    "\u{1F4C2} Open roster"
                }
            }
            div { class: "toolbar-separator" }

            // Assignment group
            div { class: "toolbar-group",
                select {
                    class: "toolbar-select",
                    id: "select-shift",
                    value: "{shift_value}",
                    onchange: move |evt| {
                        let value = evt.value();
                        selected_shift.set(if value.is_empty() { None } else { Some(value) });
                    },
                    option { value: "", "Choose shift" }
                    for shift in &snapshot.shifts {
                        option { value: "{shift.id}", "{shift.label()}" }
                    }
                }
                select {
                    class: "toolbar-select toolbar-select-sm",
                    id: "select-status",
                    value: "{current_status.code()}",
                    onchange: move |evt| {
                        if let Some(next) = AssignmentStatus::from_code(&evt.value()) {
                            status.set(next);
                        }
                    },
                    for option_status in AssignmentStatus::all().iter().copied() {
                        option { value: "{option_status.code()}", "{option_status.code()}" }
                    }
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-assign",
                    disabled: !can_assign,
                    onclick: move |_| {
                        actions::assign_selection(
                            roster,
                            selection,
                            selected_shift,
                            status,
                            sink.clone(),
                            error_message,
                            notice,
                            notice_seconds,
                        );
                    },
                    "\u{2714} Assign shift"
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-clear-selection",
                    disabled: coords.is_empty(),
                    onclick: move |_| {
                        let layout = roster.read().layout();
                        selection.with_mut(|state| state.clear_all(&layout));
                    },
                    "\u{2715} Clear"
                }
            }

            // Info area (right-aligned)
            div { class: "toolbar-info",
                span { class: "toolbar-label", id: "label-selection",
                    "{coords.len()} cells, {preview.len()} staff"
                }
                for group in &preview {
                    span { class: "selection-group",
                        "{snapshot.staff_name(&group.staff_id).unwrap_or(&group.staff_id)}: {group.work_dates.len()}"
                    }
                }
                if let Some(message) = notice.read().as_ref() {
                    span { class: "notice", id: "notice", "{message}" }
                }
                if let Some(err) = error_message.read().as_ref() {
                    span { class: "error-message", "{err}" }
                }
            }
        }
    }
}
