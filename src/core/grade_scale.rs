//! Letter-grade scale: grade points, GPA exclusions and pass/fail classification

use crate::shared::Lang;

/// One row of the grading scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeEntry {
    /// Canonical uppercase letter (e.g. "B+")
    pub letter: &'static str,
    /// Grade points; `None` for grades that never enter a GPA
    pub points: Option<f64>,
    /// Lowest percentage mapped to this letter, for point-bearing grades
    pub min_percent: Option<f64>,
    /// English description
    pub label_en: &'static str,
    /// Arabic description
    pub label_ar: &'static str,
}

const fn graded(
    letter: &'static str,
    points: f64,
    min_percent: f64,
    label_en: &'static str,
    label_ar: &'static str,
) -> GradeEntry {
    GradeEntry {
        letter,
        points: Some(points),
        min_percent: Some(min_percent),
        label_en,
        label_ar,
    }
}

const fn excluded(
    letter: &'static str,
    label_en: &'static str,
    label_ar: &'static str,
) -> GradeEntry {
    GradeEntry {
        letter,
        points: None,
        min_percent: None,
        label_en,
        label_ar,
    }
}

/// The university's bachelor grading scale, highest grade first.
///
/// `FA` (fail by absence) carries zero points but is never produced from a
/// percentage, hence its `min_percent` of 0 sits after `F`.
pub const SCALE: [GradeEntry; 18] = [
    graded("A", 4.0, 95.0, "Excellent", "ممتاز"),
    graded("A-", 3.7, 90.0, "Excellent", "ممتاز"),
    graded("B+", 3.3, 85.0, "Very Good (High)", "جيد جدًا مرتفع"),
    graded("B", 3.0, 80.0, "Very Good", "جيد جدًا"),
    graded("C+", 2.3, 75.0, "Good (High)", "جيد مرتفع"),
    graded("C", 2.0, 70.0, "Good", "جيد"),
    graded("D+", 1.3, 65.0, "Acceptable (High)", "مقبول مرتفع"),
    graded("D", 1.0, 60.0, "Acceptable", "مقبول"),
    graded("F", 0.0, 0.0, "Fail", "راسب"),
    graded("FA", 0.0, 0.0, "Fail (Absence)", "راسب بسبب الغياب"),
    excluded("I", "Incomplete", "غير مكتمل"),
    excluded("P", "Pass", "ناجح فقط"),
    excluded("NP", "No Pass", "راسب فقط"),
    excluded("CC", "Continuing", "مستمر"),
    excluded("CX", "Challenge Exam Pass", "نجاح عبر اختبار تحدي"),
    excluded("S", "Satisfactory", "مرض"),
    excluded("AW", "Administrative Withdrawal", "منسحب إداريًا"),
    excluded("W", "Withdrawn", "منسحب"),
];

/// Grades that record an outcome but never contribute credits or points to a GPA
pub const EXCLUDED_GRADES: [&str; 8] = ["I", "P", "NP", "CC", "CX", "S", "AW", "W"];

/// Point-bearing grades that earn no credit
pub const FAILING_GRADES: [&str; 2] = ["F", "FA"];

/// Stateless accessor over [`SCALE`]
#[derive(Debug, Clone, Copy, Default)]
pub struct GradeScale;

impl GradeScale {
    /// Look up the scale row for an exact canonical letter
    #[must_use]
    pub fn entry(grade: &str) -> Option<&'static GradeEntry> {
        SCALE.iter().find(|e| e.letter == grade)
    }

    /// Grade points for a letter; unknown, empty and excluded grades give `0.0`
    #[must_use]
    pub fn points_for(grade: &str) -> f64 {
        Self::entry(grade).and_then(|e| e.points).unwrap_or(0.0)
    }

    /// Whether the grade is in the GPA exclusion set (exact, case-sensitive)
    #[must_use]
    pub fn is_excluded(grade: &str) -> bool {
        EXCLUDED_GRADES.contains(&grade)
    }

    /// Whether the grade is a point-bearing fail (`F`, `FA`)
    #[must_use]
    pub fn is_failing(grade: &str) -> bool {
        FAILING_GRADES.contains(&grade)
    }

    /// Whether the grade earns credit: neither failing nor excluded
    #[must_use]
    pub fn is_passing(grade: &str) -> bool {
        !Self::is_failing(grade) && !Self::is_excluded(grade)
    }

    /// Letter grade for a percentage score. Non-finite input maps to `F`.
    #[must_use]
    pub fn from_percentage(percent: f64) -> &'static str {
        if !percent.is_finite() {
            return "F";
        }
        SCALE
            .iter()
            .find(|e| e.min_percent.is_some_and(|min| percent >= min))
            .map_or("F", |e| e.letter)
    }

    /// Bilingual description of a grade, if the letter is on the scale
    #[must_use]
    pub fn label(grade: &str, lang: Lang) -> Option<&'static str> {
        Self::entry(grade).map(|e| lang.pick(e.label_en, e.label_ar))
    }

    /// Canonical form of a raw grade label: trimmed and uppercased, `None` when blank
    #[must_use]
    pub fn normalize(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_uppercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_for_core_grades() {
        let expected = [
            ("A", 4.0),
            ("A-", 3.7),
            ("B+", 3.3),
            ("B", 3.0),
            ("C+", 2.3),
            ("C", 2.0),
            ("D+", 1.3),
            ("D", 1.0),
            ("F", 0.0),
            ("FA", 0.0),
        ];
        for (grade, points) in expected {
            assert!(
                (GradeScale::points_for(grade) - points).abs() < f64::EPSILON,
                "{grade} should be worth {points}"
            );
        }
    }

    #[test]
    fn test_points_for_is_stable_across_calls() {
        let first = GradeScale::points_for("B+");
        for _ in 0..100 {
            assert!((GradeScale::points_for("B+") - first).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_unknown_grades_are_worth_nothing() {
        assert!(GradeScale::points_for("").abs() < f64::EPSILON);
        assert!(GradeScale::points_for("Z").abs() < f64::EPSILON);
        assert!(GradeScale::points_for("a").abs() < f64::EPSILON);
        assert!(GradeScale::points_for("W").abs() < f64::EPSILON);
    }

    #[test]
    fn test_exclusion_set_is_exhaustive() {
        for grade in EXCLUDED_GRADES {
            assert!(GradeScale::is_excluded(grade), "{grade} must be excluded");
        }
        for entry in &SCALE {
            assert_eq!(
                GradeScale::is_excluded(entry.letter),
                entry.points.is_none(),
                "{} exclusion mismatch",
                entry.letter
            );
        }
        assert!(!GradeScale::is_excluded("A"));
        assert!(!GradeScale::is_excluded("w"));
        assert!(!GradeScale::is_excluded(""));
    }

    #[test]
    fn test_passing_and_failing() {
        assert!(GradeScale::is_passing("D"));
        assert!(!GradeScale::is_passing("F"));
        assert!(!GradeScale::is_passing("FA"));
        assert!(!GradeScale::is_passing("P"));
        assert!(GradeScale::is_failing("FA"));
        assert!(!GradeScale::is_failing("NP"));
    }

    #[test]
    fn test_from_percentage_boundaries() {
        assert_eq!(GradeScale::from_percentage(100.0), "A");
        assert_eq!(GradeScale::from_percentage(95.0), "A");
        assert_eq!(GradeScale::from_percentage(94.99), "A-");
        assert_eq!(GradeScale::from_percentage(85.0), "B+");
        assert_eq!(GradeScale::from_percentage(60.0), "D");
        assert_eq!(GradeScale::from_percentage(59.99), "F");
        assert_eq!(GradeScale::from_percentage(-3.0), "F");
        assert_eq!(GradeScale::from_percentage(f64::NAN), "F");
    }

    #[test]
    fn test_labels() {
        assert_eq!(GradeScale::label("W", Lang::En), Some("Withdrawn"));
        assert_eq!(GradeScale::label("W", Lang::Ar), Some("منسحب"));
        assert_eq!(GradeScale::label("Q", Lang::En), None);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(GradeScale::normalize(" b+ "), Some("B+".to_string()));
        assert_eq!(GradeScale::normalize("   "), None);
    }
}
