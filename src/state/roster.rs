use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::state::coords::{GridLayout, StaffRow};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: String,
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Shift {
    pub fn label(&self) -> String {
        format!(
            "{} ({}-{})",
            self.name,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Staff rows, assignable shifts and the window of dates shown as columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub staff: Vec<Staff>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
    pub start_date: NaiveDate,
    pub days: u32,
}

impl Roster {
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.days)
            .map(|offset| self.start_date + Duration::days(i64::from(offset)))
            .collect()
    }

    pub fn layout(&self) -> GridLayout {
        let staff = self
            .staff
            .iter()
            .map(|staff| StaffRow::new(staff.id.clone(), staff.name.clone()))
            .collect();
        GridLayout::new(staff, self.dates())
    }

    pub fn shift(&self, id: &str) -> Option<&Shift> {
        self.shifts.iter().find(|shift| shift.id == id)
    }

    pub fn staff_name(&self, id: &str) -> Option<&str> {
        self.staff
            .iter()
            .find(|staff| staff.id == id)
            .map(|staff| staff.name.as_str())
    }

    /// Sample week shown when no roster file is configured.
    pub fn demo(start_date: NaiveDate) -> Self {
        let staff = [
            ("s1", "Alice Martin"),
            ("s2", "Bruno Costa"),
            ("s3", "Chen Wei"),
            ("s4", "Dana Okafor"),
            ("s5", "Elif Kaya"),
        ]
        .into_iter()
        .map(|(id, name)| Staff {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();

        let shifts = [
            ("morning", "Morning", (7, 0), (15, 0)),
            ("evening", "Evening", (15, 0), (23, 0)),
            ("night", "Night", (23, 0), (7, 0)),
        ]
        .into_iter()
        .filter_map(|(id, name, (sh, sm), (eh, em))| {
            Some(Shift {
                id: id.to_string(),
                name: name.to_string(),
                start: NaiveTime::from_hms_opt(sh, sm, 0)?,
                end: NaiveTime::from_hms_opt(eh, em, 0)?,
            })
        })
        .collect();

        Self {
            staff,
            shifts,
            start_date,
            days: 7,
        }
    }
}
