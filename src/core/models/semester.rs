//! Semester model

use serde::{Deserialize, Serialize};

use crate::core::semester_key::SemesterKey;
use crate::shared::Lang;

/// A semester from the admin-configured calendar
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Semester {
    /// Calendar id, when the source provided one
    #[serde(default)]
    pub id: Option<u64>,

    /// English name (e.g., "Fall 2024")
    #[serde(default)]
    pub name_en: String,

    /// Arabic name (e.g., "خريف 2024")
    #[serde(default)]
    pub name_ar: String,

    /// Academic year (e.g., "2024/2025")
    #[serde(default)]
    pub academic_year: String,

    /// Whether the calendar marks this as the running semester
    #[serde(default)]
    pub is_current: bool,
}

impl Semester {
    /// Create a semester
    ///
    /// # Arguments
    /// * `id` - Calendar id, if known
    /// * `name_en` - English name
    /// * `name_ar` - Arabic name
    /// * `academic_year` - Academic year label
    #[must_use]
    pub const fn new(
        id: Option<u64>,
        name_en: String,
        name_ar: String,
        academic_year: String,
    ) -> Self {
        Self {
            id,
            name_en,
            name_ar,
            academic_year,
            is_current: false,
        }
    }

    /// Mark the semester as the current one
    #[must_use]
    pub fn current(mut self) -> Self {
        self.is_current = true;
        self
    }

    /// Primary name: English when present, otherwise Arabic
    #[must_use]
    pub fn name(&self) -> &str {
        if self.name_en.trim().is_empty() {
            &self.name_ar
        } else {
            &self.name_en
        }
    }

    /// Name in the requested language, falling back to the other one
    #[must_use]
    pub fn display_name(&self, lang: Lang) -> &str {
        let preferred = lang.pick(&self.name_en, &self.name_ar);
        if preferred.trim().is_empty() {
            self.name()
        } else {
            preferred
        }
    }

    /// Case-insensitive match of a free-text label against either name,
    /// alone or followed by the academic year.
    #[must_use]
    pub fn matches_label(&self, label: &str) -> bool {
        let wanted = normalize_name(label);
        if wanted.is_empty() {
            return false;
        }
        let year = normalize_name(&self.academic_year);
        [&self.name_en, &self.name_ar].into_iter().any(|name| {
            let name = normalize_name(name);
            let with_year = || !year.is_empty() && format!("{name} {year}") == wanted;
            !name.is_empty() && (name == wanted || with_year())
        })
    }

    /// Identity used to decide whether two records share this semester
    #[must_use]
    pub fn identity_key(&self) -> String {
        self.id.map_or_else(
            || {
                format!(
                    "name:{}|{}",
                    normalize_name(self.name()),
                    normalize_name(&self.academic_year)
                )
            },
            |id| format!("id:{id}"),
        )
    }

    /// Chronological sort key, taken from the name alone
    #[must_use]
    pub fn sort_key(&self) -> SemesterKey {
        SemesterKey::parse(self.name())
    }
}

/// The semester a course record belongs to: a calendar semester, or the
/// sentinel bucket for references nothing in the calendar matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SemesterRef {
    /// Matched a calendar entry or carried a complete nested semester object
    Resolved(Semester),
    /// No match; keeps whatever the source said for display
    Unresolved {
        /// Raw semester label from the source, if any
        label: Option<String>,
        /// Semester id from the source that matched no calendar entry
        reference_id: Option<u64>,
    },
}

impl Default for SemesterRef {
    fn default() -> Self {
        Self::unknown()
    }
}

impl SemesterRef {
    /// Unresolved reference carrying no information at all
    #[must_use]
    pub const fn unknown() -> Self {
        Self::Unresolved {
            label: None,
            reference_id: None,
        }
    }

    /// Whether this points at a calendar semester
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Whether the source gave no semester information whatsoever
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(
            self,
            Self::Unresolved {
                label: None,
                reference_id: None
            }
        )
    }

    /// The resolved semester, if any
    #[must_use]
    pub const fn semester(&self) -> Option<&Semester> {
        match self {
            Self::Resolved(semester) => Some(semester),
            Self::Unresolved { .. } => None,
        }
    }

    /// Raw display label; empty when the source gave none
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Resolved(semester) => semester.name(),
            Self::Unresolved { label, .. } => label.as_deref().unwrap_or(""),
        }
    }

    /// Display label in a language, with `fallback` for an unlabelled bucket
    #[must_use]
    pub fn display_label<'a>(&'a self, lang: Lang, fallback: &'a str) -> &'a str {
        match self {
            Self::Resolved(semester) => semester.display_name(lang),
            Self::Unresolved {
                label: Some(label), ..
            } if !label.trim().is_empty() => label.as_str(),
            Self::Unresolved { .. } => fallback,
        }
    }

    /// Grouping identity: semester identity; for unresolved references the
    /// unmatched id when there is one, else the normalized raw label.
    ///
    /// An unmatched id keys like a calendar id, so references to the same
    /// semester id group together whatever labels they carry.
    #[must_use]
    pub fn identity_key(&self) -> String {
        match self {
            Self::Resolved(semester) => semester.identity_key(),
            Self::Unresolved {
                reference_id: Some(id),
                ..
            } => format!("id:{id}"),
            Self::Unresolved {
                label,
                reference_id: None,
            } => format!(
                "unresolved:{}",
                label.as_deref().map(normalize_name).unwrap_or_default()
            ),
        }
    }

    /// Whether two references denote the same semester
    #[must_use]
    pub fn same_semester(&self, other: &Self) -> bool {
        self.identity_key() == other.identity_key()
    }

    /// Chronological sort key
    #[must_use]
    pub fn sort_key(&self) -> SemesterKey {
        match self {
            Self::Resolved(semester) => semester.sort_key(),
            Self::Unresolved { label, .. } => SemesterKey::parse(label.as_deref().unwrap_or("")),
        }
    }
}

/// Trim, lowercase and collapse internal whitespace
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fall_2024() -> Semester {
        Semester::new(
            Some(10),
            "Fall 2024".to_string(),
            "خريف 2024".to_string(),
            "2024/2025".to_string(),
        )
    }

    #[test]
    fn test_semester_creation() {
        let semester = fall_2024();
        assert_eq!(semester.id, Some(10));
        assert!(!semester.is_current);
        assert!(semester.current().is_current);
    }

    #[test]
    fn test_matches_label_in_either_language() {
        let semester = fall_2024();
        assert!(semester.matches_label("fall 2024"));
        assert!(semester.matches_label("  FALL   2024 "));
        assert!(semester.matches_label("خريف 2024"));
        assert!(semester.matches_label("Fall 2024 2024/2025"));
        assert!(!semester.matches_label("Spring 2024"));
        assert!(!semester.matches_label(""));
    }

    #[test]
    fn test_identity_prefers_id() {
        let semester = fall_2024();
        assert_eq!(semester.identity_key(), "id:10");

        let mut nameless_id = semester;
        nameless_id.id = None;
        assert_eq!(nameless_id.identity_key(), "name:fall 2024|2024/2025");
    }

    #[test]
    fn test_display_name_falls_back() {
        let arabic_only =
            Semester::new(None, String::new(), "ربيع 2025".to_string(), String::new());
        assert_eq!(arabic_only.display_name(Lang::En), "ربيع 2025");
        assert_eq!(fall_2024().display_name(Lang::Ar), "خريف 2024");
    }

    #[test]
    fn test_unresolved_identity_and_labels() {
        let unknown = SemesterRef::unknown();
        assert!(unknown.is_unknown());
        assert_eq!(unknown.label(), "");
        assert_eq!(unknown.display_label(Lang::En, "Unknown Semester"), "Unknown Semester");

        let labelled = SemesterRef::Unresolved {
            label: Some("Spring 2019".to_string()),
            reference_id: None,
        };
        let same = SemesterRef::Unresolved {
            label: Some("spring 2019".to_string()),
            reference_id: None,
        };
        assert!(labelled.same_semester(&same));
        assert!(!labelled.same_semester(&unknown));
        assert_eq!(labelled.sort_key().year, 2019);
    }

    #[test]
    fn test_unmatched_id_groups_across_labels() {
        let named = SemesterRef::Unresolved {
            label: Some("Fall 2024".to_string()),
            reference_id: Some(10),
        };
        let bare = SemesterRef::Unresolved {
            label: None,
            reference_id: Some(10),
        };
        assert!(named.same_semester(&bare));
        assert!(!bare.is_unknown());
        assert!(!named.same_semester(&SemesterRef::Unresolved {
            label: Some("Fall 2024".to_string()),
            reference_id: None,
        }));
    }

    #[test]
    fn test_sort_key_ignores_academic_year() {
        let undated = Semester::new(
            Some(1),
            "Fall".to_string(),
            String::new(),
            "2024/2025".to_string(),
        );
        let dated = Semester::new(Some(2), "Spring 2020".to_string(), String::new(), String::new());
        assert_eq!(undated.sort_key().year, 0);
        assert!(undated.sort_key() < dated.sort_key());
    }

    #[test]
    fn test_resolved_ref() {
        let resolved = SemesterRef::Resolved(fall_2024());
        assert!(resolved.is_resolved());
        assert_eq!(resolved.label(), "Fall 2024");
        assert_eq!(resolved.semester().and_then(|s| s.id), Some(10));
    }
}
