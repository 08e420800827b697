//! Source snapshots: the raw payloads fetched for one student

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::core::models::{Semester, StudentAcademicProfile};
use crate::core::reconcile::semester_from_value;

/// Raw payloads of every source, as fetched.
///
/// Every key is optional; `null` and a missing key both mean an empty
/// source, which is what a failed fetch produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceSnapshot {
    /// Enrollment items from the records system
    #[serde(default, deserialize_with = "null_as_empty")]
    pub enrollments: Vec<Value>,

    /// Final grade items from the registrar
    #[serde(default, deserialize_with = "null_as_empty")]
    pub grades: Vec<Value>,

    /// Gradebook items from the learning-management system
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lms_grades: Vec<Value>,

    /// Semester calendar entries
    #[serde(default, deserialize_with = "null_as_empty")]
    pub semesters: Vec<Value>,

    /// Student profile payload
    #[serde(default)]
    pub profile: Option<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SourceSnapshot {
    /// Parse a snapshot from a JSON string
    ///
    /// # Errors
    /// Returns an error if the text is not valid JSON or a section has the
    /// wrong shape (e.g. `enrollments` is not an array).
    pub fn from_json_str(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Semester calendar; entries that are not semester objects are skipped
    #[must_use]
    pub fn calendar(&self) -> Vec<Semester> {
        self.semesters.iter().filter_map(semester_from_value).collect()
    }

    /// The calendar's current semester, if one is flagged
    #[must_use]
    pub fn current_semester(&self) -> Option<Semester> {
        self.calendar().into_iter().find(|s| s.is_current)
    }

    /// Student profile; empty when the payload is missing
    #[must_use]
    pub fn profile(&self) -> StudentAcademicProfile {
        self.profile
            .as_ref()
            .map(StudentAcademicProfile::from_value)
            .unwrap_or_default()
    }
}
