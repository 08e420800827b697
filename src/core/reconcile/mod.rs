//! Record reconciliation
//!
//! Turns the raw enrollment, LMS and registrar grade payloads into one
//! canonical [`CourseRecord`] per course per semester. The output depends
//! only on the content of the inputs, never on their order.

pub mod fields;
pub mod resolve;

use std::cmp::Ordering;

use serde_json::Value;

use crate::core::models::{CourseRecord, CourseStatus, Semester, SemesterRef};
use crate::core::semester_key::compare_labels;
use crate::core::snapshot::SourceSnapshot;
pub use fields::{Count, ExtractedItem};
pub use resolve::{extend_calendar, pick_order, semester_from_value, SemesterResolver};

/// Payload source, in ascending precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    /// Registration records: course, credits, semester, status
    Enrollment,
    /// Learning-management system gradebook
    Lms,
    /// Registrar final grades
    Registrar,
}

/// One raw item after extraction and semester resolution
#[derive(Debug, Clone)]
struct Candidate {
    source: SourceKind,
    semester: SemesterRef,
    semester_identity: String,
    fields: ExtractedItem,
    raw: String,
}

impl Candidate {
    fn new(source: SourceKind, item: &Value, resolver: &SemesterResolver<'_>) -> Self {
        let semester = resolver.resolve(item);
        Self {
            source,
            semester_identity: semester.identity_key(),
            semester,
            fields: ExtractedItem::from_value(item, source == SourceKind::Lms),
            raw: serde_json::to_string(item).unwrap_or_default(),
        }
    }

    /// Canonical processing order
    fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.source
            .cmp(&other.source)
            .then_with(|| self.fields.code_key().cmp(&other.fields.code_key()))
            .then_with(|| self.fields.course_id.cmp(&other.fields.course_id))
            .then_with(|| self.semester_identity.cmp(&other.semester_identity))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

/// A course-in-semester being assembled from several candidates
#[derive(Debug)]
struct Draft {
    course_id: Option<u64>,
    code_key: Option<String>,
    semester: SemesterRef,
    semester_identity: String,
    members: Vec<usize>,
}

impl Draft {
    fn new(candidate: &Candidate, index: usize) -> Self {
        Self {
            course_id: candidate.fields.course_id,
            code_key: candidate.fields.code_key(),
            semester: candidate.semester.clone(),
            semester_identity: candidate.semester_identity.clone(),
            members: vec![index],
        }
    }

    /// Same course: equal id, or equal case-insensitive code
    fn same_course(&self, fields: &ExtractedItem) -> bool {
        let same_id = matches!(
            (self.course_id, fields.course_id),
            (Some(a), Some(b)) if a == b
        );
        let same_code = matches!(
            (&self.code_key, fields.code_key()),
            (Some(a), Some(b)) if *a == b
        );
        same_id || same_code
    }

    fn join(&mut self, candidate: &Candidate, index: usize) {
        if self.semester.label().is_empty() && !candidate.semester.label().is_empty() {
            self.semester = candidate.semester.clone();
        }
        if self.course_id.is_none() {
            self.course_id = candidate.fields.course_id;
        }
        if self.code_key.is_none() {
            self.code_key = candidate.fields.code_key();
        }
        self.members.push(index);
    }

    fn into_record(self, candidates: &[Candidate]) -> CourseRecord {
        let mut members: Vec<&Candidate> = self.members.iter().map(|&i| &candidates[i]).collect();
        members.sort_by(|a, b| a.canonical_cmp(b));

        let mut record = CourseRecord {
            semester: self.semester,
            ..CourseRecord::default()
        };
        let mut credits = None;
        let mut statuses = Vec::new();

        for member in members {
            let fields = &member.fields;
            if let Some(id) = fields.course_id {
                record.course_id = Some(id);
            }
            if let Some(code) = &fields.course_code {
                if record.course_code.is_empty() {
                    record.course_code.clone_from(code);
                }
            }
            if let Some(title) = &fields.title_en {
                record.course_title_en.clone_from(title);
            }
            if let Some(title) = &fields.title_ar {
                record.course_title_ar.clone_from(title);
            }
            fields.credits.merge_into(&mut credits);
            if fields.grade.is_some() || fields.points.is_some() {
                record.grade.clone_from(&fields.grade);
                record.points = fields.points;
            }
            fields.coursework.merge_into(&mut record.coursework);
            fields.midterm.merge_into(&mut record.midterm);
            fields.final_exam.merge_into(&mut record.final_exam);
            fields.total.merge_into(&mut record.total);
            if let Some(status) = &fields.status {
                statuses.push(status.as_str());
            }
        }

        record.credits = credits.unwrap_or(0);
        record.status = CourseStatus::derive(record.grade.as_deref(), statuses);
        record
    }
}

/// Merges raw source payloads into canonical course records
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordReconciler;

impl RecordReconciler {
    /// Reconcile enrollments and registrar grades against a semester calendar.
    ///
    /// # Arguments
    /// * `enrollments` - Raw enrollment items
    /// * `grades` - Raw registrar grade items
    /// * `semesters` - Semester calendar
    ///
    /// # Returns
    /// Canonical records sorted by semester, then course. Any input may be
    /// empty; items that are not JSON objects are skipped.
    #[must_use]
    pub fn reconcile(
        enrollments: &[Value],
        grades: &[Value],
        semesters: &[Semester],
    ) -> Vec<CourseRecord> {
        Self::reconcile_tiers(
            &[(SourceKind::Enrollment, enrollments), (SourceKind::Registrar, grades)],
            semesters,
        )
    }

    /// Reconcile every source in a snapshot, LMS grades included
    #[must_use]
    pub fn reconcile_sources(snapshot: &SourceSnapshot) -> Vec<CourseRecord> {
        let calendar = snapshot.calendar();
        Self::reconcile_tiers(
            &[
                (SourceKind::Enrollment, snapshot.enrollments.as_slice()),
                (SourceKind::Lms, snapshot.lms_grades.as_slice()),
                (SourceKind::Registrar, snapshot.grades.as_slice()),
            ],
            &calendar,
        )
    }

    /// Calendar the snapshot's items resolve against: the fetched calendar
    /// plus named semesters that only appear nested inside items
    #[must_use]
    pub fn effective_calendar(snapshot: &SourceSnapshot) -> Vec<Semester> {
        let items = snapshot
            .enrollments
            .iter()
            .chain(&snapshot.lms_grades)
            .chain(&snapshot.grades);
        extend_calendar(&snapshot.calendar(), items)
    }

    fn reconcile_tiers(
        tiers: &[(SourceKind, &[Value])],
        semesters: &[Semester],
    ) -> Vec<CourseRecord> {
        let calendar = extend_calendar(semesters, tiers.iter().flat_map(|&(_, items)| items));
        if calendar.len() > semesters.len() {
            crate::debug!(
                "Calendar extended with {} nested semester(s)",
                calendar.len() - semesters.len()
            );
        }
        let resolver = SemesterResolver::new(&calendar);
        let mut candidates = Vec::new();
        for &(source, items) in tiers {
            for item in items {
                if item.is_object() {
                    candidates.push(Candidate::new(source, item, &resolver));
                } else {
                    crate::debug!("Skipping non-object {source:?} item: {item}");
                }
            }
        }
        candidates.sort_by(Candidate::canonical_cmp);

        let drafts = Self::assign(&candidates);
        let mut records: Vec<CourseRecord> = drafts
            .into_iter()
            .map(|d| d.into_record(&candidates))
            .collect();
        records.sort_by(compare_records);

        let unresolved = records.iter().filter(|r| !r.semester.is_resolved()).count();
        crate::debug!(
            "Reconciled {} source items into {} records ({} with unresolved semester)",
            candidates.len(),
            records.len(),
            unresolved
        );
        records
    }

    /// Group candidates into drafts.
    ///
    /// Items with semester information go first and join a draft for the same
    /// course and semester. Items with none join the latest-ordered draft of
    /// the same course, or share an unknown-semester draft when there is none.
    fn assign(candidates: &[Candidate]) -> Vec<Draft> {
        let mut drafts: Vec<Draft> = Vec::new();
        let (placed, floating): (Vec<usize>, Vec<usize>) =
            (0..candidates.len()).partition(|&i| !candidates[i].semester.is_unknown());

        for index in placed {
            let candidate = &candidates[index];
            match drafts.iter_mut().find(|d| {
                d.semester_identity == candidate.semester_identity
                    && d.same_course(&candidate.fields)
            }) {
                Some(draft) => draft.join(candidate, index),
                None => drafts.push(Draft::new(candidate, index)),
            }
        }

        for index in floating {
            let candidate = &candidates[index];
            let target = drafts
                .iter_mut()
                .filter(|d| d.same_course(&candidate.fields))
                .max_by(|a, b| {
                    let known = |d: &Draft| !d.semester.is_unknown();
                    known(a)
                        .cmp(&known(b))
                        .then_with(|| a.semester.sort_key().cmp(&b.semester.sort_key()))
                        .then_with(|| b.semester_identity.cmp(&a.semester_identity))
                });
            match target {
                Some(draft) => draft.join(candidate, index),
                None => drafts.push(Draft::new(candidate, index)),
            }
        }
        drafts
    }
}

/// Output order: semester label key, raw label, identity, then course
fn compare_records(a: &CourseRecord, b: &CourseRecord) -> Ordering {
    compare_labels(a.semester.label(), b.semester.label())
        .then_with(|| a.semester.identity_key().cmp(&b.semester.identity_key()))
        .then_with(|| a.course_code.cmp(&b.course_code))
        .then_with(|| a.course_id.cmp(&b.course_id))
        .then_with(|| a.course_title_en.cmp(&b.course_title_en))
}
