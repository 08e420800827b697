//! Canonical course record

use serde::{Deserialize, Serialize};

use super::semester::SemesterRef;
use crate::core::grade_scale::GradeScale;
use crate::shared::Lang;

/// Where a course stands for the student
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    /// Registered, no final grade yet
    #[default]
    InProgress,
    /// Final grade recorded
    Completed,
    /// Dropped or withdrawn
    Dropped,
}

impl CourseStatus {
    /// Classify a raw status string from any source
    ///
    /// Returns `None` for statuses that say nothing about the course outcome
    /// (e.g. grade workflow states such as `APPROVED` or `PENDING`).
    #[must_use]
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "DROPPED" | "WITHDRAWN" | "CANCELLED" | "CANCELED" => Some(Self::Dropped),
            "COMPLETED" | "PASSED" | "FAILED" => Some(Self::Completed),
            "ENROLLED" | "REGISTERED" | "ACTIVE" | "IN_PROGRESS" => Some(Self::InProgress),
            _ => None,
        }
    }

    /// Derive the status from the final grade and every raw status seen.
    ///
    /// Dropped beats everything, a final grade beats an in-progress status.
    /// `I` (incomplete) and `CC` (continuing) are not final.
    #[must_use]
    pub fn derive<'a>(
        grade: Option<&str>,
        raw_statuses: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let parsed: Vec<Self> = raw_statuses.into_iter().filter_map(Self::from_raw).collect();
        if parsed.contains(&Self::Dropped) || matches!(grade, Some("W" | "AW")) {
            return Self::Dropped;
        }
        let has_final_grade = grade.is_some_and(|g| !matches!(g, "I" | "CC"));
        if has_final_grade || parsed.contains(&Self::Completed) {
            Self::Completed
        } else {
            Self::InProgress
        }
    }
}

/// One course taken in one semester, reconciled across all sources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Registrar course id, when any source carried one
    pub course_id: Option<u64>,

    /// Course code (e.g., "CS101"); empty when no source named it
    pub course_code: String,

    /// English title
    pub course_title_en: String,

    /// Arabic title
    pub course_title_ar: String,

    /// Credit hours
    pub credits: u32,

    /// Semester the course was taken in
    pub semester: SemesterRef,

    /// Canonical uppercase letter grade
    pub grade: Option<String>,

    /// Grade points reported by the source, overriding the scale lookup
    pub points: Option<f64>,

    /// Coursework score
    pub coursework: Option<u32>,

    /// Midterm score
    pub midterm: Option<u32>,

    /// Final exam score
    #[serde(rename = "final")]
    pub final_exam: Option<u32>,

    /// Total score
    pub total: Option<u32>,

    /// Outcome status
    pub status: CourseStatus,
}

impl CourseRecord {
    /// Create an ungraded, in-progress record
    ///
    /// # Arguments
    /// * `course_code` - Course code
    /// * `credits` - Credit hours
    /// * `semester` - Semester reference
    #[must_use]
    pub fn new(course_code: impl Into<String>, credits: u32, semester: SemesterRef) -> Self {
        Self {
            course_code: course_code.into(),
            credits,
            semester,
            ..Self::default()
        }
    }

    /// Attach a letter grade (normalized) and mark the record completed
    #[must_use]
    pub fn with_grade(mut self, grade: &str) -> Self {
        self.grade = GradeScale::normalize(grade);
        self.status = CourseStatus::derive(self.grade.as_deref(), []);
        self
    }

    /// Grade points used in GPA sums: reported points, else the scale value
    #[must_use]
    pub fn effective_points(&self) -> f64 {
        self.points
            .unwrap_or_else(|| self.grade.as_deref().map_or(0.0, GradeScale::points_for))
    }

    /// Whether the record enters GPA sums.
    ///
    /// A letter grade must not be excluded; a record without a letter counts
    /// only when the source reported points for it.
    #[must_use]
    pub fn counts_toward_gpa(&self) -> bool {
        match self.grade.as_deref() {
            Some(grade) => !GradeScale::is_excluded(grade),
            None => self.points.is_some(),
        }
    }

    /// Whether the record earns its credits
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.grade.as_deref().is_some_and(GradeScale::is_passing)
    }

    /// Title in a language, falling back to the other language, then the code
    #[must_use]
    pub fn title(&self, lang: Lang) -> &str {
        let preferred = lang.pick(&self.course_title_en, &self.course_title_ar);
        [
            preferred,
            self.course_title_en.as_str(),
            self.course_title_ar.as_str(),
            self.course_code.as_str(),
        ]
        .into_iter()
        .find(|t| !t.trim().is_empty())
        .unwrap_or("")
    }
}
