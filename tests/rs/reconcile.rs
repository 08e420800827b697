//! Integration tests for record reconciliation.

use serde_json::{json, Value};
use vertex_records::core::models::{CourseStatus, Semester};
use vertex_records::core::{RecordReconciler, SourceSnapshot, TranscriptAssembler};

fn calendar() -> Vec<Semester> {
    vec![
        Semester::new(
            Some(10),
            "Fall 2024".to_string(),
            "خريف 2024".to_string(),
            "2024/2025".to_string(),
        ),
        Semester::new(
            Some(11),
            "Spring 2025".to_string(),
            "ربيع 2025".to_string(),
            "2024/2025".to_string(),
        ),
    ]
}

fn enrollments() -> Vec<Value> {
    vec![
        json!({"course_id": 1, "code": "CS101", "credits": 3, "status": "ENROLLED", "semester_id": 10}),
        json!({"course_id": 2, "code": "MATH101", "credits": 4, "semester_record": {"id": 10}}),
        json!({"course_id": 3, "code": "PHYS101", "credits": 4, "semester_name": "ربيع 2025"}),
        json!({"course_id": 4, "code": "ART100", "credits": 2, "semester_id": 77}),
        json!({"course_id": 5, "code": "CS201", "credits": 3, "semester_id": 11}),
    ]
}

fn grades() -> Vec<Value> {
    vec![
        json!({"course_id": 1, "grade": "A-", "total": 91, "semester_id": 10}),
        json!({"course": {"code": "math101"}, "letter_grade": "B", "semester": "Fall 2024"}),
        json!({"course_id": 3, "grade": "C+", "credits": "bad"}),
        json!({"course_id": 9, "code": "HIST100", "grade": "P", "credits": 2, "semester_name": "Summer 2019"}),
    ]
}

#[test]
fn reconcile_is_idempotent() {
    let first = RecordReconciler::reconcile(&enrollments(), &grades(), &calendar());
    let second = RecordReconciler::reconcile(&enrollments(), &grades(), &calendar());
    assert_eq!(first, second);
}

#[test]
fn reconcile_is_permutation_invariant() {
    let baseline = RecordReconciler::reconcile(&enrollments(), &grades(), &calendar());

    let mut reversed_enrollments = enrollments();
    reversed_enrollments.reverse();
    let mut rotated_grades = grades();
    rotated_grades.rotate_left(2);
    let mut reversed_calendar = calendar();
    reversed_calendar.reverse();

    let permuted =
        RecordReconciler::reconcile(&reversed_enrollments, &rotated_grades, &reversed_calendar);
    assert_eq!(baseline, permuted);
}

#[test]
fn reconcile_accepts_empty_inputs() {
    assert!(RecordReconciler::reconcile(&[], &[], &[]).is_empty());

    let only_grades = RecordReconciler::reconcile(&[], &grades(), &[]);
    assert_eq!(only_grades.len(), grades().len());
    assert!(only_grades.iter().all(|r| !r.semester.is_resolved()));

    let no_calendar = RecordReconciler::reconcile(&enrollments(), &[], &[]);
    assert_eq!(no_calendar.len(), enrollments().len());
}

#[test]
fn grade_source_wins_and_enrollment_fills_gaps() {
    let records = RecordReconciler::reconcile(&enrollments(), &grades(), &calendar());

    let cs101 = records
        .iter()
        .find(|r| r.course_code == "CS101")
        .expect("CS101 present");
    assert_eq!(cs101.grade.as_deref(), Some("A-"));
    assert_eq!(cs101.total, Some(91));
    assert_eq!(cs101.credits, 3);
    assert_eq!(cs101.status, CourseStatus::Completed);

    let math = records
        .iter()
        .find(|r| r.course_id == Some(2))
        .expect("MATH101 present");
    assert_eq!(math.grade.as_deref(), Some("B"));
    assert_eq!(math.credits, 4);
    assert_eq!(math.semester.label(), "Fall 2024");

    // malformed grade-source credits never clobber enrollment credits
    let phys = records
        .iter()
        .find(|r| r.course_code == "PHYS101")
        .expect("PHYS101 present");
    assert_eq!(phys.credits, 4);
    assert_eq!(phys.grade.as_deref(), Some("C+"));
    assert_eq!(phys.semester.label(), "Spring 2025");

    let cs201 = records
        .iter()
        .find(|r| r.course_code == "CS201")
        .expect("CS201 present");
    assert_eq!(cs201.status, CourseStatus::InProgress);
    assert!(cs201.grade.is_none());
}

#[test]
fn unresolved_semesters_are_kept() {
    let records = RecordReconciler::reconcile(&enrollments(), &grades(), &calendar());
    assert_eq!(records.len(), 6);

    let art = records
        .iter()
        .find(|r| r.course_code == "ART100")
        .expect("ART100 kept");
    assert!(!art.semester.is_resolved());
    assert_eq!(art.semester.label(), "");

    let hist = records
        .iter()
        .find(|r| r.course_code == "HIST100")
        .expect("HIST100 kept");
    assert_eq!(hist.semester.label(), "Summer 2019");
}

#[test]
fn output_is_chronological() {
    let records = RecordReconciler::reconcile(&enrollments(), &grades(), &calendar());
    let keys: Vec<_> = records.iter().map(|r| r.semester.sort_key()).collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn lms_tier_sits_between_enrollment_and_registrar() {
    let snapshot = SourceSnapshot::from_json_str(
        r#"{
            "semesters": [{"id": 10, "name_en": "Fall 2024", "academic_year": "2024/2025"}],
            "enrollments": [{"course_id": 1, "code": "CS101", "credits": 3, "semester_id": 10}],
            "lms_grades": [
                {"course_code": "CS101", "semester_id": 10, "percentage": 86, "completion_status": "completed", "course_name_en": "Intro to CS"},
                {"course_code": "CS230", "semester_id": 10, "percentage": 72, "completion_status": "completed", "credits": 3}
            ],
            "grades": [{"course_id": 1, "grade": "A", "semester_id": 10}]
        }"#,
    )
    .expect("valid snapshot");

    let records = RecordReconciler::reconcile_sources(&snapshot);
    assert_eq!(records.len(), 2);

    let cs101 = &records[0];
    assert_eq!(cs101.course_code, "CS101");
    assert_eq!(cs101.grade.as_deref(), Some("A"));
    assert_eq!(cs101.total, Some(86));
    assert_eq!(cs101.course_title_en, "Intro to CS");

    let cs230 = &records[1];
    assert_eq!(cs230.grade.as_deref(), Some("C"));
    assert_eq!(cs230.status, CourseStatus::Completed);
}

#[test]
fn missing_calendar_merges_nested_and_bare_semester_ids() {
    let enrollments = vec![json!({
        "course_id": 1,
        "credits": 3,
        "semester_record": {"id": 10, "name_en": "Fall 2024"}
    })];
    let grades = vec![json!({"course_id": 1, "grade": "A", "semester_id": 10})];

    let records = RecordReconciler::reconcile(&enrollments, &grades, &[]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].semester.label(), "Fall 2024");
    assert_eq!(records[0].credits, 3);
    assert_eq!(records[0].grade.as_deref(), Some("A"));

    let view = TranscriptAssembler::assemble(&records);
    assert!((view.cumulative.gpa - 4.0).abs() < 1e-9);
    assert_eq!(view.cumulative.total_credits, 3);
}

#[test]
fn colliding_calendar_ids_are_permutation_invariant() {
    let colliding = vec![
        Semester::new(Some(10), "Fall 2024".to_string(), String::new(), "2024/2025".to_string()),
        Semester::new(Some(10), "Fall 2025".to_string(), String::new(), "2025/2026".to_string()),
        Semester::new(Some(11), "Spring 2025".to_string(), String::new(), "2024/2025".to_string()),
    ];
    let mut reversed = colliding.clone();
    reversed.reverse();

    let forward = RecordReconciler::reconcile(&enrollments(), &grades(), &colliding);
    let backward = RecordReconciler::reconcile(&enrollments(), &grades(), &reversed);
    assert_eq!(forward, backward);

    let cs101 = forward
        .iter()
        .find(|r| r.course_code == "CS101")
        .expect("CS101 present");
    assert_eq!(cs101.semester.label(), "Fall 2025");
}
