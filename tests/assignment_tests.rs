use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use shiftgrid::state::assignment::{
    self, AssignmentError, AssignmentSink, AssignmentStatus, BatchAssignment,
};
use shiftgrid::state::coords::GridCellCoords;

fn coords(staff_id: &str, date_str: &str, row: usize, col: usize) -> GridCellCoords {
    GridCellCoords {
        staff_id: staff_id.to_string(),
        date_str: date_str.to_string(),
        row_index: row,
        col_index: col,
    }
}

#[derive(Default)]
struct RecordingSink {
    calls: Vec<BatchAssignment>,
    fail_on: Option<String>,
}

impl AssignmentSink for RecordingSink {
    fn assign(&mut self, payload: &BatchAssignment) -> Result<(), String> {
        if self.fail_on.as_deref() == Some(payload.staff_id.as_str()) {
            return Err("backend unavailable".to_string());
        }
        self.calls.push(payload.clone());
        Ok(())
    }
}

#[test]
fn test_group_by_staff_keeps_first_appearance_order() {
    let selection = vec![
        coords("s2", "2025-01-07", 1, 1),
        coords("s1", "2025-01-06", 0, 0),
        coords("s2", "2025-01-06", 1, 0),
        coords("s1", "2025-01-08", 0, 2),
    ];

    let groups =
        assignment::group_by_staff(&selection, "morning", AssignmentStatus::Confirmed).unwrap();
    assert_eq!(
        groups,
        vec![
            BatchAssignment {
                staff_id: "s2".to_string(),
                shift_id: "morning".to_string(),
                work_dates: vec!["2025-01-07".to_string(), "2025-01-06".to_string()],
                status: AssignmentStatus::Confirmed,
            },
            BatchAssignment {
                staff_id: "s1".to_string(),
                shift_id: "morning".to_string(),
                work_dates: vec!["2025-01-06".to_string(), "2025-01-08".to_string()],
                status: AssignmentStatus::Confirmed,
            },
        ]
    );
}

#[test]
fn test_group_by_staff_deduplicates_dates() {
    let selection = vec![
        coords("s1", "2025-01-06", 0, 0),
        coords("s1", "2025-01-06", 3, 0),
    ];
    let groups =
        assignment::group_by_staff(&selection, "night", AssignmentStatus::Scheduled).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].work_dates, vec!["2025-01-06".to_string()]);
}

#[test]
fn test_empty_selection_blocks_submission() {
    let mut sink = RecordingSink::default();
    let err = assignment::submit_batch(&mut sink, &[], "morning", AssignmentStatus::Scheduled)
        .unwrap_err();
    assert!(matches!(err, AssignmentError::EmptySelection));
    assert!(sink.calls.is_empty());
}

#[test]
fn test_blank_shift_blocks_submission() {
    let mut sink = RecordingSink::default();
    let selection = vec![coords("s1", "2025-01-06", 0, 0)];
    let err = assignment::submit_batch(&mut sink, &selection, "  ", AssignmentStatus::Scheduled)
        .unwrap_err();
    assert!(matches!(err, AssignmentError::MissingShift));
}

#[test]
fn test_submit_issues_one_call_per_staff() {
    let mut sink = RecordingSink::default();
    let selection = vec![
        coords("s1", "2025-01-06", 0, 0),
        coords("s1", "2025-01-07", 0, 1),
        coords("s2", "2025-01-06", 1, 0),
    ];
    let report =
        assignment::submit_batch(&mut sink, &selection, "morning", AssignmentStatus::Scheduled)
            .unwrap();

    assert_eq!(report.staff_count, 2);
    assert_eq!(report.date_count, 3);
    assert_eq!(sink.calls.len(), 2);
}

#[test]
fn test_sink_failure_stops_batch() {
    let mut sink = RecordingSink {
        fail_on: Some("s2".to_string()),
        ..RecordingSink::default()
    };
    let selection = vec![
        coords("s1", "2025-01-06", 0, 0),
        coords("s2", "2025-01-06", 1, 0),
        coords("s3", "2025-01-06", 2, 0),
    ];
    let err =
        assignment::submit_batch(&mut sink, &selection, "morning", AssignmentStatus::Scheduled)
            .unwrap_err();

    match err {
        AssignmentError::Sink { staff_id, reason } => {
            assert_eq!(staff_id, "s2");
            assert_eq!(reason, "backend unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(sink.calls.len(), 1);
}

#[test]
fn test_status_serializes_lowercase() {
    let payload = BatchAssignment {
        staff_id: "s1".to_string(),
        shift_id: "morning".to_string(),
        work_dates: vec![NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .format("%Y-%m-%d")
            .to_string()],
        status: AssignmentStatus::Cancelled,
    };
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["status"], "cancelled");
    assert_eq!(json["work_dates"][0], "2025-01-06");
}

#[test]
fn test_status_code_roundtrip() {
    for status in AssignmentStatus::all() {
        assert_eq!(AssignmentStatus::from_code(status.code()), Some(*status));
    }
    assert_eq!(AssignmentStatus::from_code("pending"), None);
}
