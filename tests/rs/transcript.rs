//! End-to-end tests: raw payloads to transcript, GPA and credit progress.

use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use vertex_records::core::models::{Semester, SemesterRef};
use vertex_records::core::{
    AcademicStanding, CreditProgressTracker, GpaCalculator, RecordReconciler, Scope, SourceSnapshot,
    TranscriptAssembler,
};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples/snapshots/student-2024.json")
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn single_course_end_to_end() {
    let enrollments = vec![json!({"course_id": 1, "credits": 3, "semester_id": 10})];
    let grades = vec![json!({"course_id": 1, "grade": "A-", "credits": 3})];
    let semesters = vec![Semester::new(
        Some(10),
        "Fall 2024".to_string(),
        String::new(),
        "2024/2025".to_string(),
    )];

    let records = RecordReconciler::reconcile(&enrollments, &grades, &semesters);
    let view = TranscriptAssembler::assemble(&records);

    assert_eq!(view.semesters.len(), 1);
    let group = &view.semesters[0];
    assert_eq!(group.semester.label(), "Fall 2024");
    assert!(close(group.gpa, 3.70));
    assert_eq!(group.earned_credits, 3);
    assert!(close(view.cumulative.gpa, 3.70));
}

#[test]
fn empty_transcript_has_zero_gpa() {
    let view = TranscriptAssembler::assemble(&[]);
    assert!(view.semesters.is_empty());
    assert!(close(view.cumulative.gpa, 0.0));
    assert_eq!(view.cumulative.total_credits, 0);
}

#[test]
fn sample_snapshot_transcript() {
    let snapshot = SourceSnapshot::load(&sample_path()).expect("sample snapshot loads");
    let records = RecordReconciler::reconcile_sources(&snapshot);
    assert_eq!(records.len(), 7);

    let view = TranscriptAssembler::assemble(&records);
    let labels: Vec<&str> = view.semesters.iter().map(|g| g.semester.label()).collect();
    assert_eq!(labels, ["Summer 2019", "Fall 2023", "Spring 2024", "Fall 2024"]);

    let transfer = &view.semesters[0];
    assert!(!transfer.semester.is_resolved());
    assert_eq!(transfer.gpa_credits, 0);
    assert_eq!(transfer.total_credits, 2);

    let fall_2023 = &view.semesters[1];
    assert!(close(fall_2023.gpa, 3.60));
    assert_eq!(fall_2023.earned_credits, 7);

    let spring_2024 = &view.semesters[2];
    assert!(close(spring_2024.gpa, 2.85));
    let cs102 = spring_2024
        .courses
        .iter()
        .find(|c| c.course_id == Some(104))
        .expect("CS102 in Spring 2024");
    assert_eq!(cs102.course_code, "CS102");
    assert_eq!(cs102.grade.as_deref(), Some("A-"));
    assert_eq!(cs102.total, Some(91));

    let fall_2024 = &view.semesters[3];
    assert_eq!(fall_2024.total_credits, 7);
    assert_eq!(fall_2024.earned_credits, 0);
    assert!(close(fall_2024.gpa, 0.0));

    assert!(close(view.cumulative.gpa, 3.25));
    assert_eq!(view.cumulative.total_credits, 13);
    assert_eq!(AcademicStanding::from_gpa(view.cumulative.gpa), AcademicStanding::GoodStanding);

    let history = view.gpa_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].0, "Fall 2023");
}

#[test]
fn sample_snapshot_current_semester_gpa_and_progress() {
    let snapshot = SourceSnapshot::load(&sample_path()).expect("sample snapshot loads");
    let records = RecordReconciler::reconcile_sources(&snapshot);

    let current = snapshot.current_semester().expect("current semester flagged");
    assert_eq!(current.name_en, "Fall 2024");
    let current_scope = Scope::Semester(SemesterRef::Resolved(current));
    let current_gpa = GpaCalculator::compute(&records, &current_scope);
    assert_eq!(current_gpa.total_credits, 0);

    let progress =
        CreditProgressTracker::new(120).compute_from_records(&snapshot.profile(), &records);
    assert_eq!(progress.total_required, 132);
    assert_eq!(progress.completed, 13);
    assert_eq!(progress.current, 3);
    assert_eq!(progress.remaining, 116);
    assert_eq!(progress.percentage, 10);
}

#[test]
fn snapshot_loads_from_disk() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("partial.json");
    fs::write(
        &path,
        r#"{"enrollments": null, "grades": [{"course_id": 7, "grade": "B", "credits": 3, "semester_name": "Fall 2022"}]}"#,
    )
    .expect("Failed to write snapshot");

    let snapshot = SourceSnapshot::load(&path).expect("partial snapshot loads");
    let view = TranscriptAssembler::assemble(&RecordReconciler::reconcile_sources(&snapshot));
    assert_eq!(view.semesters.len(), 1);
    assert_eq!(view.semesters[0].semester.label(), "Fall 2022");
    assert!(close(view.cumulative.gpa, 3.0));

    assert!(SourceSnapshot::load(&temp_dir.path().join("missing.json")).is_err());
}
