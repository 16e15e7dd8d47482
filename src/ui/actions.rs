use std::time::Duration;

use dioxus::prelude::*;
use log::warn;

use crate::io::assignment_io::JsonFileSink;
use crate::io::roster_io;
use crate::state::assignment::{self, AssignmentError, AssignmentStatus};
use crate::state::bridge::GridSelection;
use crate::state::roster::Roster;

pub async fn open_roster(
    mut roster: Signal<Roster>,
    mut selection: Signal<GridSelection>,
    mut selected_shift: Signal<Option<String>>,
    mut error_message: Signal<Option<String>>,
) {
    let task = rfd::AsyncFileDialog::new()
        .add_filter("Roster", &["json"])
        .pick_file()
        .await;

    if let Some(handle) = task {
        let path = handle.path().to_path_buf();
        match roster_io::load_roster(&path) {
            Ok(next) => {
                let layout = next.layout();
                selected_shift.set(next.shifts.first().map(|shift| shift.id.clone()));
                roster.set(next);
                selection.with_mut(|state| state.clear_all(&layout));
                error_message.set(None);
            }
            Err(err) => {
                warn!("failed to open roster {}: {err}", path.display());
                error_message.set(Some(err.to_string()));
            }
        }
    }
}

/// Turns the confirmed selection into one saved batch per staff member.
#[allow(clippy::too_many_arguments)]
pub fn assign_selection(
    roster: Signal<Roster>,
    mut selection: Signal<GridSelection>,
    selected_shift: Signal<Option<String>>,
    status: Signal<AssignmentStatus>,
    mut sink: JsonFileSink,
    mut error_message: Signal<Option<String>>,
    notice: Signal<Option<String>>,
    notice_seconds: u64,
) -> bool {
    let layout = roster.read().layout();
    let coords = selection.read().selected_coords(&layout);
    let shift_id = selected_shift.read().clone().unwrap_or_default();

    match assignment::submit_batch(&mut sink, &coords, &shift_id, *status.read()) {
        Ok(report) => {
            let shift_name = roster
                .read()
                .shift(&shift_id)
                .map(|shift| shift.name.clone())
                .unwrap_or(shift_id);
            show_notice(
                notice,
                format!(
                    "Assigned {shift_name} to {} staff on {} dates",
                    report.staff_count, report.date_count
                ),
                notice_seconds,
            );
            selection.with_mut(|state| state.clear_all(&layout));
            error_message.set(None);
            true
        }
        Err(err @ AssignmentError::Sink { .. }) => {
            show_notice(notice, err.to_string(), notice_seconds);
            false
        }
        Err(err) => {
            error_message.set(Some(err.to_string()));
            false
        }
    }
}

fn show_notice(mut notice: Signal<Option<String>>, message: String, seconds: u64) {
    notice.set(Some(message.clone()));
    spawn(async move {
        tokio::time::sleep(Duration::from_secs(seconds)).await;
        if notice.read().as_deref() == Some(message.as_str()) {
            notice.set(None);
        }
    });
}
