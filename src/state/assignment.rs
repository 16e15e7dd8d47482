use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::coords::GridCellCoords;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Cancelled,
}

impl AssignmentStatus {
    pub fn all() -> &'static [Self] {
        &[Self::Scheduled, Self::Confirmed, Self::Cancelled]
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|status| status.code() == code)
    }
}

/// One persistence call: every selected date for one staff member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchAssignment {
    pub staff_id: String,
    pub shift_id: String,
    pub work_dates: Vec<String>,
    pub status: AssignmentStatus,
}

#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("select at least one cell before assigning a shift")]
    EmptySelection,
    #[error("choose a shift to assign")]
    MissingShift,
    #[error("saving shifts for staff {staff_id} failed: {reason}")]
    Sink { staff_id: String, reason: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchReport {
    pub staff_count: usize,
    pub date_count: usize,
}

/// Receives one call per staff member of a confirmed batch.
pub trait AssignmentSink {
    fn assign(&mut self, payload: &BatchAssignment) -> Result<(), String>;
}

/// Groups a selection by staff, keeping the order in which staff and dates
/// first appear. Dates repeated for one staff member are kept once.
pub fn group_by_staff(
    coords: &[GridCellCoords],
    shift_id: &str,
    status: AssignmentStatus,
) -> Result<Vec<BatchAssignment>, AssignmentError> {
    if coords.is_empty() {
        return Err(AssignmentError::EmptySelection);
    }
    let shift_id = shift_id.trim();
    if shift_id.is_empty() {
        return Err(AssignmentError::MissingShift);
    }

    let mut groups: Vec<BatchAssignment> = Vec::new();
    for cell in coords {
        let index = match groups.iter().position(|group| group.staff_id == cell.staff_id) {
            Some(index) => index,
            None => {
                groups.push(BatchAssignment {
                    staff_id: cell.staff_id.clone(),
                    shift_id: shift_id.to_string(),
                    work_dates: Vec::new(),
                    status,
                });
                groups.len() - 1
            }
        };
        let dates = &mut groups[index].work_dates;
        if !dates.contains(&cell.date_str) {
            dates.push(cell.date_str.clone());
        }
    }

    groups.retain(|group| !group.work_dates.is_empty());
    Ok(groups)
}

/// Sends each staff group to `sink`. Stops at the first failure; nothing is
/// retried.
pub fn submit_batch(
    sink: &mut dyn AssignmentSink,
    coords: &[GridCellCoords],
    shift_id: &str,
    status: AssignmentStatus,
) -> Result<BatchReport, AssignmentError> {
    let groups = group_by_staff(coords, shift_id, status)?;
    let mut date_count = 0;
    for group in &groups {
        if let Err(reason) = sink.assign(group) {
            warn!("assigning {} failed: {reason}", group.staff_id);
            return Err(AssignmentError::Sink {
                staff_id: group.staff_id.clone(),
                reason,
            });
        }
        date_count += group.work_dates.len();
    }

    info!(
        "assigned shift {} to {} staff over {} dates",
        shift_id.trim(),
        groups.len(),
        date_count
    );
    Ok(BatchReport {
        staff_count: groups.len(),
        date_count,
    })
}
