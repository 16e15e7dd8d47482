use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::state::roster::Roster;

#[derive(Debug, Error)]
pub enum RosterIoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("roster parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("roster has no staff")]
    EmptyStaff,
    #[error("roster must show between 1 and {max} days, got {days}")]
    InvalidDays { days: u32, max: u32 },
    #[error("staff id {0} appears more than once")]
    DuplicateStaff(String),
}

pub const MAX_DAYS: u32 = 62;

pub fn load_roster(path: &Path) -> Result<Roster, RosterIoError> {
    let content = fs::read_to_string(path)?;
    let roster = parse_roster(&content)?;
    info!(
        "loaded roster {} with {} staff over {} days",
        path.display(),
        roster.staff.len(),
        roster.days
    );
    Ok(roster)
}

pub fn parse_roster(content: &str) -> Result<Roster, RosterIoError> {
    let roster: Roster = serde_json::from_str(content)?;

    if roster.staff.is_empty() {
        return Err(RosterIoError::EmptyStaff);
    }
    if roster.days == 0 || roster.days > MAX_DAYS {
        return Err(RosterIoError::InvalidDays {
            days: roster.days,
            max: MAX_DAYS,
        });
    }

    let mut seen = BTreeSet::new();
    for staff in &roster.staff {
        if !seen.insert(staff.id.as_str()) {
            return Err(RosterIoError::DuplicateStaff(staff.id.clone()));
        }
    }

    Ok(roster)
}
