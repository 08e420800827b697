//! Weighted GPA over canonical course records

use serde::{Deserialize, Serialize};

use crate::core::models::{CourseRecord, SemesterRef};

/// Which records a GPA is computed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every record
    Cumulative,
    /// Records of one semester, matched by semester identity
    Semester(SemesterRef),
}

impl Scope {
    fn includes(&self, record: &CourseRecord) -> bool {
        match self {
            Self::Cumulative => true,
            Self::Semester(semester) => record.semester.same_semester(semester),
        }
    }
}

/// GPA with the sums it was derived from
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GpaResult {
    /// Rounded to two decimals
    pub gpa: f64,
    /// Credits of GPA-bearing records
    pub total_credits: u32,
    /// Sum of points × credits, unrounded
    pub total_points: f64,
}

/// Stateless GPA computation
#[derive(Debug, Clone, Copy, Default)]
pub struct GpaCalculator;

impl GpaCalculator {
    /// Compute the weighted GPA of the records in `scope`.
    ///
    /// Records with an excluded grade, or with neither a grade nor reported
    /// points, are left out. Zero GPA-bearing credits gives a GPA of exactly
    /// `0.0`.
    ///
    /// # Arguments
    /// * `records` - Canonical records
    /// * `scope` - Cumulative or a single semester
    #[must_use]
    pub fn compute(records: &[CourseRecord], scope: &Scope) -> GpaResult {
        let (total_credits, total_points) = records
            .iter()
            .filter(|r| scope.includes(r) && r.counts_toward_gpa())
            .fold((0_u32, 0.0_f64), |(credits, points), r| {
                (
                    credits.saturating_add(r.credits),
                    r.effective_points().mul_add(f64::from(r.credits), points),
                )
            });

        let gpa = if total_credits == 0 {
            0.0
        } else {
            round2(total_points / f64::from(total_credits))
        };

        GpaResult {
            gpa,
            total_credits,
            total_points,
        }
    }
}

/// Half-up rounding to two decimals.
///
/// The epsilon lifts ratios such as 3.345 that land a hair under the
/// midpoint in binary floating point. Inputs are never negative.
#[must_use]
pub fn round2(value: f64) -> f64 {
    value.mul_add(100.0, 1e-9).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Semester;

    fn fall() -> SemesterRef {
        SemesterRef::Resolved(Semester::new(
            Some(1),
            "Fall 2024".to_string(),
            String::new(),
            "2024/2025".to_string(),
        ))
    }

    fn spring() -> SemesterRef {
        SemesterRef::Resolved(Semester::new(
            Some(2),
            "Spring 2025".to_string(),
            String::new(),
            "2024/2025".to_string(),
        ))
    }

    #[test]
    fn test_weighted_gpa() {
        let records = vec![
            CourseRecord::new("CS101", 4, fall()).with_grade("A"),
            CourseRecord::new("CS102", 3, fall()).with_grade("B+"),
        ];
        let result = GpaCalculator::compute(&records, &Scope::Cumulative);
        assert!((result.gpa - 3.70).abs() < f64::EPSILON);
        assert_eq!(result.total_credits, 7);
        assert!((result.total_points - 25.9).abs() < 1e-9);
    }

    #[test]
    fn test_zero_credits_gives_zero() {
        assert!(GpaCalculator::compute(&[], &Scope::Cumulative).gpa.abs() < f64::EPSILON);

        let records = vec![
            CourseRecord::new("SEM001", 0, fall()).with_grade("A"),
            CourseRecord::new("ENG100", 3, fall()).with_grade("W"),
        ];
        let result = GpaCalculator::compute(&records, &Scope::Cumulative);
        assert_eq!(result.total_credits, 0);
        assert!(result.gpa.abs() < f64::EPSILON);
    }

    #[test]
    fn test_excluded_and_ungraded_are_skipped() {
        let records = vec![
            CourseRecord::new("CS101", 3, fall()).with_grade("B"),
            CourseRecord::new("CS200", 3, fall()).with_grade("P"),
            CourseRecord::new("CS300", 3, fall()),
        ];
        let result = GpaCalculator::compute(&records, &Scope::Cumulative);
        assert_eq!(result.total_credits, 3);
        assert!((result.gpa - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failing_grades_count() {
        let records = vec![
            CourseRecord::new("CS101", 3, fall()).with_grade("A"),
            CourseRecord::new("CS102", 3, fall()).with_grade("F"),
        ];
        let result = GpaCalculator::compute(&records, &Scope::Cumulative);
        assert_eq!(result.total_credits, 6);
        assert!((result.gpa - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_semester_scope() {
        let records = vec![
            CourseRecord::new("CS101", 3, fall()).with_grade("A"),
            CourseRecord::new("CS201", 3, spring()).with_grade("C"),
        ];
        let fall_gpa = GpaCalculator::compute(&records, &Scope::Semester(fall()));
        let spring_gpa = GpaCalculator::compute(&records, &Scope::Semester(spring()));
        assert!((fall_gpa.gpa - 4.0).abs() < f64::EPSILON);
        assert!((spring_gpa.gpa - 2.0).abs() < f64::EPSILON);
        assert_eq!(
            GpaCalculator::compute(&records, &Scope::Semester(SemesterRef::unknown()))
                .total_credits,
            0
        );
    }

    #[test]
    fn test_round2_half_up() {
        assert!((round2(3.345) - 3.35).abs() < 1e-12);
        assert!((round2(3.344_9) - 3.34).abs() < 1e-12);
        assert!((round2(2.0 / 3.0) - 0.67).abs() < 1e-12);
        assert!(round2(0.0).abs() < f64::EPSILON);
    }
}
