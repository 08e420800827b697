//! Student academic profile as reported by the records system

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Credit figures from the student profile. Every field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentAcademicProfile {
    /// Credits already earned
    #[serde(default)]
    pub completed_credits: Option<u32>,

    /// Credits registered this semester
    #[serde(default)]
    pub registered_credits: Option<u32>,

    /// Credits the programme requires
    #[serde(default)]
    pub total_required_credits: Option<u32>,
}

const COMPLETED: &[&str] = &["completed_credits", "credits_earned", "completedCredits"];
const REGISTERED: &[&str] = &["registered_credits", "current_credits", "registeredCredits"];
const REQUIRED: &[&str] = &[
    "total_required_credits",
    "total_credits_required",
    "totalRequiredCredits",
    "program.total_credits",
];

impl StudentAcademicProfile {
    /// Read a profile payload leniently.
    ///
    /// Non-object payloads give an empty profile; a present but unusable
    /// number (negative, fractional, text) is treated as missing.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            completed_credits: first_count(value, COMPLETED),
            registered_credits: first_count(value, REGISTERED),
            total_required_credits: first_count(value, REQUIRED),
        }
    }
}

fn first_count(value: &Value, paths: &[&str]) -> Option<u32> {
    paths.iter().find_map(|path| {
        path.split('.')
            .try_fold(value, |current, key| current.get(key))
            .and_then(as_count)
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
