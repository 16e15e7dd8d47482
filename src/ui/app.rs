use chrono::{Datelike, Duration, Local};
use dioxus::prelude::*;
use log::{info, warn};

use crate::config::AppConfig;
use crate::io::assignment_io::JsonFileSink;
use crate::io::roster_io;
use crate::state::bridge::GridSelection;
use crate::state::coords::GridCellCoords;
use crate::state::release::PointerReleaseHub;
use crate::state::roster::Roster;
use crate::ui::grid::ScheduleGrid;
use crate::ui::toolbar::Toolbar;

const STYLES: Asset = asset!("/assets/styles.css");

#[component]
pub fn App() -> Element {
    let config = use_hook(|| match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            warn!("{err}, using defaults");
            AppConfig::default()
        }
    });
    let roster = use_signal(current_week_demo);
    let error_message = use_signal::<Option<String>>(|| None);
    let notice = use_signal::<Option<String>>(|| None);
    let selected_coords = use_signal(Vec::<GridCellCoords>::new);
    let selected_shift =
        use_signal(|| roster.peek().shifts.first().map(|shift| shift.id.clone()));
    let status = use_signal(|| config.default_status);
    let selection = use_signal(|| {
        let mut selected_coords = selected_coords;
        GridSelection::with_listener(move |coords| selected_coords.set(coords.to_vec()))
    });
    let release_hub = use_hook(PointerReleaseHub::new);
    let sink = use_hook(|| {
        let sink = JsonFileSink::new(config.resolved_output_path());
        info!("assignments are written to {}", sink.path().display());
        sink
    });

    use_effect({
        let mut roster = roster;
        let mut selected_shift = selected_shift;
        let mut error_message = error_message;
        let mut selection = selection;
        let roster_path = config.roster_path.clone();
        move || {
            let Some(path) = roster_path.as_ref() else {
                return;
            };
            match roster_io::load_roster(path) {
                Ok(loaded) => {
                    let layout = loaded.layout();
                    selected_shift.set(loaded.shifts.first().map(|shift| shift.id.clone()));
                    roster.set(loaded);
                    selection.with_mut(|state| state.sync_layout(&layout));
                    error_message.set(None);
                }
                Err(err) => {
                    warn!("failed to open roster {}: {err}", path.display());
                    error_message.set(Some(err.to_string()));
                }
            }
        }
    });

    rsx! {
        document::Stylesheet { href: STYLES }
        div {
            class: "app",
            // Releases anywhere in the window end a drag, not just over the grid.
            onpointerup: {
                let release_hub = release_hub.clone();
                move |_| {
                    release_hub.dispatch();
                }
            },
            Toolbar {
                roster,
                selection,
                selected_coords,
                selected_shift,
                status,
                sink,
                error_message,
                notice,
                notice_seconds: config.notice_seconds,
            }
            ScheduleGrid {
                roster,
                selection,
                release_hub: release_hub.clone(),
                header_date_format: config.header_date_format.clone(),
            }
        }
    }
}

fn current_week_demo() -> Roster {
    let today = Local::now().date_naive();
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    Roster::demo(monday)
}
