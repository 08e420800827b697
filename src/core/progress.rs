//! Degree credit progress

use serde::{Deserialize, Serialize};

use crate::core::models::{CourseRecord, CourseStatus, StudentAcademicProfile};

/// Credits a bachelor programme requires when the profile does not say
pub const DEFAULT_REQUIRED_CREDITS: u32 = 132;

/// Credit-completion figures for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditProgress {
    /// Credits earned so far
    pub completed: u32,
    /// Credits in the running semester
    pub current: u32,
    /// Credits still to register for, never negative
    pub remaining: u32,
    /// Credits the programme requires
    pub total_required: u32,
    /// Completed share of the requirement, `0..=100`
    pub percentage: u32,
}

/// Computes [`CreditProgress`] from a profile and enrollment figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditProgressTracker {
    default_required: u32,
}

impl Default for CreditProgressTracker {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_CREDITS)
    }
}

impl CreditProgressTracker {
    /// Create a tracker
    ///
    /// # Arguments
    /// * `default_required` - Requirement used when the profile has none
    #[must_use]
    pub const fn new(default_required: u32) -> Self {
        Self { default_required }
    }

    /// Compute progress from the profile and the credits currently enrolled.
    ///
    /// Missing completed credits count as `0`.
    #[must_use]
    pub fn compute(
        &self,
        profile: &StudentAcademicProfile,
        current_enrollment_credits: u32,
    ) -> CreditProgress {
        let completed = profile.completed_credits.unwrap_or(0);
        let total_required = profile.total_required_credits.unwrap_or(self.default_required);
        Self::build(completed, current_enrollment_credits, total_required)
    }

    /// Compute progress with current credits taken from in-progress records.
    ///
    /// When the profile lacks completed credits, they are summed from
    /// completed records with a passing grade.
    #[must_use]
    pub fn compute_from_records(
        &self,
        profile: &StudentAcademicProfile,
        records: &[CourseRecord],
    ) -> CreditProgress {
        let current = credit_sum(records.iter().filter(|r| r.status == CourseStatus::InProgress));
        let completed = profile.completed_credits.unwrap_or_else(|| {
            credit_sum(
                records
                    .iter()
                    .filter(|r| r.status == CourseStatus::Completed && r.is_passing()),
            )
        });
        let total_required = profile.total_required_credits.unwrap_or(self.default_required);
        Self::build(completed, current, total_required)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn build(completed: u32, current: u32, total_required: u32) -> CreditProgress {
        let remaining = total_required.saturating_sub(completed).saturating_sub(current);
        let percentage = if total_required == 0 {
            0
        } else {
            let ratio = f64::from(completed) * 100.0 / f64::from(total_required);
            ratio.round().clamp(0.0, 100.0) as u32
        };

        CreditProgress {
            completed,
            current,
            remaining,
            total_required,
            percentage,
        }
    }
}

fn credit_sum<'a>(records: impl Iterator<Item = &'a CourseRecord>) -> u32 {
    records.fold(0_u32, |acc, r| acc.saturating_add(r.credits))
}
