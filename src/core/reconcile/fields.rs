//! Field extraction for raw enrollment, grade and LMS payloads.
//!
//! Every canonical field has exactly one lookup chain, tried in order. A path
//! with a dot descends into a nested object (`course.code` is the `code` key
//! of the `course` object). JSON `null` counts as absent, so the chain moves
//! on to the next candidate.
//!
//! | field      | chain                                                                  |
//! |------------|------------------------------------------------------------------------|
//! | course id  | `course.id`, `course_id`, `courseId`                                   |
//! | code       | `course.code`, `course.shortname`, `course_code`, `code`, `courseCode`, `shortname` |
//! | title (en) | `course.name_en`, `course.title_en`, `course.fullname`, `course.name`, `course_name_en`, `course_title_en`, `title_en`, `courseNameEn`, `course_name`, `title` |
//! | title (ar) | `course.name_ar`, `course.title_ar`, `course_name_ar`, `course_title_ar`, `title_ar`, `courseNameAr` |
//! | credits    | `course.credits`, `course.credit_hours`, `credits`, `credit_hours`, `creditHours` |
//! | grade      | `grade`, `letter_grade`, `letterGrade`                                 |
//! | points     | `points`, `grade_points`, `gradePoints`                                |
//! | coursework | `coursework`, `assignments_score`, `courseWork`, `assignmentsScore`    |
//! | midterm    | `midterm`, `midterm_score`, `midtermScore`                             |
//! | final      | `final`, `final_score`, `finalScore`                                   |
//! | total      | `total`, `total_score`, `totalScore`, `percentage`                     |
//! | status     | `status`, `completion_status`, `enrollment_status`, `completionStatus` |

use serde_json::Value;

use crate::core::grade_scale::GradeScale;
use crate::core::models::CourseStatus;

/// Chain for the course id
pub const COURSE_ID: &[&str] = &["course.id", "course_id", "courseId"];
/// Chain for the course code
pub const COURSE_CODE: &[&str] = &[
    "course.code",
    "course.shortname",
    "course_code",
    "code",
    "courseCode",
    "shortname",
];
/// Chain for the English title
pub const TITLE_EN: &[&str] = &[
    "course.name_en",
    "course.title_en",
    "course.fullname",
    "course.name",
    "course_name_en",
    "course_title_en",
    "title_en",
    "courseNameEn",
    "course_name",
    "title",
];
/// Chain for the Arabic title
pub const TITLE_AR: &[&str] = &[
    "course.name_ar",
    "course.title_ar",
    "course_name_ar",
    "course_title_ar",
    "title_ar",
    "courseNameAr",
];
/// Chain for the credit hours
pub const CREDITS: &[&str] = &[
    "course.credits",
    "course.credit_hours",
    "credits",
    "credit_hours",
    "creditHours",
];
/// Chain for the letter grade
pub const GRADE: &[&str] = &["grade", "letter_grade", "letterGrade"];
/// Chain for the grade points
pub const POINTS: &[&str] = &["points", "grade_points", "gradePoints"];
/// Chain for the coursework score
pub const COURSEWORK: &[&str] = &[
    "coursework",
    "assignments_score",
    "courseWork",
    "assignmentsScore",
];
/// Chain for the midterm score
pub const MIDTERM: &[&str] = &["midterm", "midterm_score", "midtermScore"];
/// Chain for the final exam score
pub const FINAL: &[&str] = &["final", "final_score", "finalScore"];
/// Chain for the total score
pub const TOTAL: &[&str] = &["total", "total_score", "totalScore", "percentage"];
/// Chain for the raw status
pub const STATUS: &[&str] = &[
    "status",
    "completion_status",
    "enrollment_status",
    "completionStatus",
];

/// Highest valid exam or coursework score
const MAX_SCORE: u32 = 100;

/// Highest valid grade-point value
const MAX_POINTS: f64 = 4.0;

/// Resolve a dotted path; `null` is treated as absent
#[must_use]
pub fn lookup<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(item, |current, key| current.get(key))
        .filter(|v| !v.is_null())
}

/// First non-null value along a chain
#[must_use]
pub fn first<'a>(item: &'a Value, chain: &[&str]) -> Option<&'a Value> {
    chain.iter().find_map(|path| lookup(item, path))
}

/// First non-blank string along a chain, trimmed
#[must_use]
pub fn first_text(item: &Value, chain: &[&str]) -> Option<String> {
    chain.iter().find_map(|path| {
        lookup(item, path)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// An identifier: a non-negative integer or a numeric string
#[must_use]
pub fn as_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// First identifier along a chain
#[must_use]
pub fn first_id(item: &Value, chain: &[&str]) -> Option<u64> {
    chain.iter().find_map(|path| lookup(item, path).and_then(as_id))
}

/// A number, or a string holding one
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|f: &f64| f.is_finite())
}

/// A count-like field read from a source item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Count {
    /// No source value
    #[default]
    Missing,
    /// Present but unusable (not a number, negative, out of range)
    Malformed,
    /// Valid value
    Value(u32),
}

impl Count {
    /// Read the first present value along a chain, optionally capped
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn read(item: &Value, chain: &[&str], max: Option<u32>) -> Self {
        let Some(raw) = first(item, chain) else {
            return Self::Missing;
        };
        match as_number(raw) {
            Some(n) if n >= 0.0 && n.round() <= f64::from(max.unwrap_or(u32::MAX)) => {
                Self::Value(n.round() as u32)
            }
            _ => Self::Malformed,
        }
    }

    /// Overlay onto an accumulated slot.
    ///
    /// A valid value always wins. A malformed value only fills an empty slot,
    /// with `0`.
    pub fn merge_into(self, slot: &mut Option<u32>) {
        match self {
            Self::Value(n) => *slot = Some(n),
            Self::Malformed => {
                slot.get_or_insert(0);
            }
            Self::Missing => {}
        }
    }
}

/// Canonical fields pulled out of one raw payload item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedItem {
    /// Course id
    pub course_id: Option<u64>,
    /// Course code as written by the source
    pub course_code: Option<String>,
    /// English title
    pub title_en: Option<String>,
    /// Arabic title
    pub title_ar: Option<String>,
    /// Credit hours
    pub credits: Count,
    /// Normalized letter grade
    pub grade: Option<String>,
    /// Grade points within `[0, 4]`
    pub points: Option<f64>,
    /// Coursework score
    pub coursework: Count,
    /// Midterm score
    pub midterm: Count,
    /// Final exam score
    pub final_exam: Count,
    /// Total score
    pub total: Count,
    /// Raw status string
    pub status: Option<String>,
}

impl ExtractedItem {
    /// Extract every canonical field from an item.
    ///
    /// With `grade_from_percentage`, a missing letter grade is derived from
    /// the item's `percentage` unless its status says the course is still
    /// running.
    #[must_use]
    pub fn from_value(item: &Value, grade_from_percentage: bool) -> Self {
        let status = first_text(item, STATUS);
        let running = status
            .as_deref()
            .and_then(CourseStatus::from_raw)
            .is_some_and(|s| s == CourseStatus::InProgress);
        let mut grade = first_text(item, GRADE).and_then(|g| GradeScale::normalize(&g));
        if grade.is_none() && grade_from_percentage && !running {
            grade = lookup(item, "percentage")
                .and_then(as_number)
                .filter(|p| (0.0..=f64::from(MAX_SCORE)).contains(p))
                .map(|p| GradeScale::from_percentage(p).to_string());
        }

        Self {
            course_id: first_id(item, COURSE_ID),
            course_code: first_text(item, COURSE_CODE),
            title_en: first_text(item, TITLE_EN),
            title_ar: first_text(item, TITLE_AR),
            credits: Count::read(item, CREDITS, None),
            grade,
            points: first(item, POINTS)
                .and_then(as_number)
                .filter(|p| (0.0..=MAX_POINTS).contains(p)),
            coursework: Count::read(item, COURSEWORK, Some(MAX_SCORE)),
            midterm: Count::read(item, MIDTERM, Some(MAX_SCORE)),
            final_exam: Count::read(item, FINAL, Some(MAX_SCORE)),
            total: Count::read(item, TOTAL, Some(MAX_SCORE)),
            status,
        }
    }

    /// Lowercased course code used for matching, if non-empty
    #[must_use]
    pub fn code_key(&self) -> Option<String> {
        self.course_code.as_ref().map(|c| c.to_lowercase())
    }
}
