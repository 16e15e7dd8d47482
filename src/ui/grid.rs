use std::cell::RefCell;
use std::rc::Rc;

use dioxus::html::input_data::MouseButton;
use dioxus::prelude::{Key, Modifiers, *};

use crate::state::bridge::{EventResponse, GridEvent, GridSelection};
use crate::state::keyboard::{GridKey, KeyInput};
use crate::state::pointer::{PointerButton, PointerInput, PointerKind};
use crate::state::release::{PointerReleaseHub, ReleaseSubscription};
use crate::state::roster::Roster;

#[component]
pub fn ScheduleGrid(
    roster: Signal<Roster>,
    selection: Signal<GridSelection>,
    release_hub: PointerReleaseHub,
    header_date_format: String,
) -> Element {
    let subscription = use_hook(|| {
        let guard = release_hub.subscribe(move || {
            route(selection, roster, GridEvent::PointerRelease);
        });
        Rc::new(RefCell::new(Some(guard)))
    });
    use_drop({
        let subscription: Rc<RefCell<Option<ReleaseSubscription>>> = subscription.clone();
        move || {
            subscription.borrow_mut().take();
        }
    });

    let snapshot = roster.read().clone();
    let dates = snapshot.dates();

    if snapshot.staff.is_empty() || dates.is_empty() {
        return rsx! {
            p { class: "empty-message", id: "empty-message", "No staff loaded. Click \"Open roster\" to load a roster file." }
        };
    }

    let state = selection.read();
    let dragging = state.is_dragging();

    rsx! {
        div {
            class: if dragging { "grid-container dragging" } else { "grid-container" },
            id: "grid-container",
            tabindex: "0",
            role: "grid",
            aria_multiselectable: "true",
            onkeydown: move |evt: KeyboardEvent| {
                let response = route(selection, roster, GridEvent::Key(key_input(&evt)));
                if response.prevent_default {
                    evt.prevent_default();
                }
            },
            table {
                thead {
                    tr {
                        th { class: "staff-header", "Staff" }
                        for date in &dates {
                            th { class: "date-header", "{date.format(&header_date_format)}" }
                        }
                    }
                }
                tbody {
                    for (row, staff) in snapshot.staff.iter().enumerate() {
                        tr { id: "row-{staff.id}", role: "row",
                            th { class: "staff-name", role: "rowheader", "{staff.name}" }
                            for col in 0..dates.len() {
                                td {
                                    class: cell_class(state.is_cell_highlighted(row, col), state.is_cell_focused(row, col)),
                                    id: "cell-{row}-{col}",
                                    role: "gridcell",
                                    aria_selected: "{state.is_cell_highlighted(row, col)}",
                                    onpointerdown: move |evt: PointerEvent| {
                                        let input = pointer_input(&evt);
                                        let response = route(selection, roster, GridEvent::PointerDown { row, col, input });
                                        if response.prevent_default {
                                            evt.prevent_default();
                                        }
                                    },
                                    onpointerenter: move |_| {
                                        route(selection, roster, GridEvent::PointerEnter { row, col });
                                    },
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The one handler every cell and the window forward to.
fn route(mut selection: Signal<GridSelection>, roster: Signal<Roster>, event: GridEvent) -> EventResponse {
    let layout = roster.read().layout();
    selection.with_mut(|state| state.dispatch(event, &layout))
}

fn pointer_input(evt: &PointerEvent) -> PointerInput {
    let button = match evt.trigger_button() {
        Some(MouseButton::Primary) => PointerButton::Primary,
        Some(MouseButton::Secondary) => PointerButton::Secondary,
        Some(MouseButton::Auxiliary) => PointerButton::Auxiliary,
        _ => PointerButton::Other,
    };
    PointerInput {
        button,
        kind: PointerKind::from_name(&evt.pointer_type()),
    }
}

fn key_input(evt: &KeyboardEvent) -> KeyInput {
    let modifiers = evt.modifiers();
    let key = match evt.key() {
        Key::ArrowUp => GridKey::ArrowUp,
        Key::ArrowDown => GridKey::ArrowDown,
        Key::ArrowLeft => GridKey::ArrowLeft,
        Key::ArrowRight => GridKey::ArrowRight,
        Key::Enter => GridKey::Enter,
        Key::Escape => GridKey::Escape,
        Key::Character(text) if text == " " => GridKey::Space,
        Key::Character(text) => text.chars().next().map(GridKey::Char).unwrap_or(GridKey::Other),
        _ => GridKey::Other,
    };
    KeyInput {
        key,
        shift: modifiers.contains(Modifiers::SHIFT),
        ctrl: modifiers.contains(Modifiers::CONTROL),
        meta: modifiers.contains(Modifiers::META),
    }
}

fn cell_class(selected: bool, focused: bool) -> String {
    let mut class = String::from("cell");
    if selected {
        class.push_str(" selected-cell");
    }
    if focused {
        class.push_str(" focused-cell");
    }
    class
}
