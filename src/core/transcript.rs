//! Transcript assembly: records grouped by semester in chronological order

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::gpa::{GpaCalculator, GpaResult, Scope};
use crate::core::models::{CourseRecord, SemesterRef};
use crate::core::semester_key::compare_labels;

/// All records of one semester with their totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterGroup {
    /// Semester shared by every course in the group
    pub semester: SemesterRef,
    /// Courses, ordered by code
    pub courses: Vec<CourseRecord>,
    /// Credits of courses with a passing grade
    pub earned_credits: u32,
    /// Credits of every course in the group
    pub total_credits: u32,
    /// Semester GPA
    pub gpa: f64,
    /// Credits that entered the semester GPA
    pub gpa_credits: u32,
}

/// Ordered transcript with cumulative GPA
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptView {
    /// Semester groups, oldest first
    pub semesters: Vec<SemesterGroup>,
    /// GPA over every record
    pub cumulative: GpaResult,
}

impl TranscriptView {
    /// `(label, gpa)` for each semester that has GPA-bearing credits
    #[must_use]
    pub fn gpa_history(&self) -> Vec<(String, f64)> {
        self.semesters
            .iter()
            .filter(|g| g.gpa_credits > 0)
            .map(|g| (g.semester.label().to_string(), g.gpa))
            .collect()
    }

    /// Group for a semester reference, if present
    #[must_use]
    pub fn group_for(&self, semester: &SemesterRef) -> Option<&SemesterGroup> {
        self.semesters.iter().find(|g| g.semester.same_semester(semester))
    }

    /// Total earned credits across all semesters
    #[must_use]
    pub fn earned_credits(&self) -> u32 {
        self.semesters
            .iter()
            .fold(0_u32, |acc, g| acc.saturating_add(g.earned_credits))
    }
}

/// Builds a [`TranscriptView`] from canonical records
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptAssembler;

impl TranscriptAssembler {
    /// Group records by semester identity and compute per-group totals.
    ///
    /// Groups are ordered by the key of the semester name, then raw label,
    /// then identity.
    /// Records of unresolved semesters group by their unmatched id, else by
    /// raw label.
    #[must_use]
    pub fn assemble(records: &[CourseRecord]) -> TranscriptView {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut buckets: Vec<(SemesterRef, Vec<CourseRecord>)> = Vec::new();

        for record in records {
            let key = record.semester.identity_key();
            let slot = *index.entry(key).or_insert_with(|| {
                buckets.push((record.semester.clone(), Vec::new()));
                buckets.len() - 1
            });
            let bucket = &mut buckets[slot];
            if bucket.0.label().is_empty() && !record.semester.label().is_empty() {
                bucket.0 = record.semester.clone();
            }
            bucket.1.push(record.clone());
        }

        buckets.sort_by(|(a, _), (b, _)| {
            compare_labels(a.label(), b.label())
                .then_with(|| a.identity_key().cmp(&b.identity_key()))
        });

        let semesters = buckets
            .into_iter()
            .map(|(semester, courses)| Self::group(semester, courses))
            .collect();

        TranscriptView {
            semesters,
            cumulative: GpaCalculator::compute(records, &Scope::Cumulative),
        }
    }

    fn group(semester: SemesterRef, mut courses: Vec<CourseRecord>) -> SemesterGroup {
        courses.sort_by(|a, b| {
            a.course_code
                .cmp(&b.course_code)
                .then_with(|| a.course_id.cmp(&b.course_id))
                .then_with(|| a.course_title_en.cmp(&b.course_title_en))
        });

        let sum = |passing_only: bool| {
            courses
                .iter()
                .filter(|c| !passing_only || c.is_passing())
                .fold(0_u32, |acc, c| acc.saturating_add(c.credits))
        };
        let earned_credits = sum(true);
        let total_credits = sum(false);
        let gpa = GpaCalculator::compute(&courses, &Scope::Semester(semester.clone()));

        SemesterGroup {
            semester,
            courses,
            earned_credits,
            total_credits,
            gpa: gpa.gpa,
            gpa_credits: gpa.total_credits,
        }
    }
}
