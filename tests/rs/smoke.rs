//! Integration smoke tests for `vertex_records`

use vertex_records::core::{RecordReconciler, SourceSnapshot, TranscriptAssembler};
use vertex_records::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn empty_snapshot_yields_empty_transcript() {
    let snapshot = SourceSnapshot::from_json_str("{}").expect("empty object is a valid snapshot");
    let records = RecordReconciler::reconcile_sources(&snapshot);
    assert!(records.is_empty());

    let view = TranscriptAssembler::assemble(&records);
    assert!(view.semesters.is_empty());
    assert!(view.cumulative.gpa.abs() < f64::EPSILON);
}
