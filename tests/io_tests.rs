use chrono::NaiveDate;

use shiftgrid::io::assignment_io::{self, JsonFileSink};
use shiftgrid::io::roster_io::{self, RosterIoError};
use shiftgrid::state::assignment::{AssignmentSink, AssignmentStatus, BatchAssignment};

fn fixture(name: &str) -> std::path::PathBuf {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.join("tests").join("data").join(name)
}

fn payload(staff_id: &str) -> BatchAssignment {
    BatchAssignment {
        staff_id: staff_id.to_string(),
        shift_id: "morning".to_string(),
        work_dates: vec!["2025-01-06".to_string()],
        status: AssignmentStatus::Scheduled,
    }
}

#[test]
fn test_load_roster_fixture() {
    let roster = roster_io::load_roster(&fixture("roster.json")).unwrap();
    assert_eq!(roster.staff.len(), 3);
    assert_eq!(roster.shifts.len(), 2);
    assert_eq!(roster.start_date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());

    let layout = roster.layout();
    assert_eq!(layout.total_rows(), 3);
    assert_eq!(layout.total_cols(), 5);
    assert_eq!(layout.resolve(2, 4).unwrap().date_str, "2025-01-10");
    assert_eq!(roster.shift("night").map(|s| s.name.as_str()), Some("Night"));
}

#[test]
fn test_load_roster_duplicate_staff() {
    let err = roster_io::load_roster(&fixture("duplicate_staff.json")).unwrap_err();
    assert!(matches!(err, RosterIoError::DuplicateStaff(id) if id == "s1"));
}

#[test]
fn test_parse_roster_without_staff() {
    let err = roster_io::parse_roster(r#"{"staff":[],"start_date":"2025-01-06","days":7}"#)
        .unwrap_err();
    assert!(matches!(err, RosterIoError::EmptyStaff));
}

#[test]
fn test_parse_roster_rejects_zero_days() {
    let err = roster_io::parse_roster(
        r#"{"staff":[{"id":"s1","name":"A"}],"start_date":"2025-01-06","days":0}"#,
    )
    .unwrap_err();
    assert!(matches!(err, RosterIoError::InvalidDays { days: 0, .. }));
}

#[test]
fn test_parse_roster_invalid_json() {
    let err = roster_io::parse_roster("not json at all").unwrap_err();
    assert!(matches!(err, RosterIoError::Parse(_)));
}

#[test]
fn test_load_roster_file_not_found() {
    let err = roster_io::load_roster(std::path::Path::new("/nonexistent/roster.json")).unwrap_err();
    assert!(matches!(err, RosterIoError::Io(_)));
}

#[test]
fn test_load_assignments_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let saved = assignment_io::load_assignments(&dir.path().join("none.json")).unwrap();
    assert!(saved.is_empty());
}

#[test]
fn test_json_file_sink_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assignments.json");
    let mut sink = JsonFileSink::new(&path);

    sink.assign(&payload("s1")).unwrap();
    sink.assign(&payload("s2")).unwrap();

    let saved = assignment_io::load_assignments(&path).unwrap();
    assert_eq!(saved, vec![payload("s1"), payload("s2")]);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"status\": \"scheduled\""));
}

#[test]
fn test_json_file_sink_reports_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assignments.json");
    std::fs::write(&path, "{ broken").unwrap();

    let mut sink = JsonFileSink::new(&path);
    let err = sink.assign(&payload("s1")).unwrap_err();
    assert!(err.contains("parse error"));
}
