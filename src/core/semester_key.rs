//! Sort keys for free-form semester labels
//!
//! Labels arrive as "Fall 2024", "ربيع 2025", "2023/2024 Summer" and the like.
//! The key is `year + term offset` with fall=0.3, summer=0.2 and spring (or
//! anything unrecognised) =0.1. Keys order semesters; they are never shown and
//! never used to decide whether two records share a semester.

use std::cmp::Ordering;

/// Academic term within a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// Spring, and the fallback for labels with no term keyword
    Spring,
    /// Summer
    Summer,
    /// Fall
    Fall,
}

impl Term {
    /// Fractional offset added to the year
    #[must_use]
    pub const fn offset(self) -> f64 {
        match self {
            Self::Spring => 0.1,
            Self::Summer => 0.2,
            Self::Fall => 0.3,
        }
    }

    /// Detect the term keyword in English or Arabic. Fall wins over summer.
    #[must_use]
    pub fn detect(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("fall") || label.contains("خريف") {
            Self::Fall
        } else if lower.contains("summer") || label.contains("صيف") {
            Self::Summer
        } else {
            Self::Spring
        }
    }
}

/// Parsed ordering key of a semester label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemesterKey {
    /// Year taken from the label, `0` when none was found
    pub year: u32,
    /// Detected term
    pub term: Term,
}

impl SemesterKey {
    /// Parse a label. Never fails: a label without digits gets year 0.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        Self {
            year: first_year(label).unwrap_or(0),
            term: Term::detect(label),
        }
    }

    /// Numeric value `year + offset`
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.year) + self.term.offset()
    }
}

impl PartialOrd for SemesterKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemesterKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then_with(|| self.term.cmp(&other.term))
    }
}

/// Sort key of a free-form label: `year + term offset`
#[must_use]
pub fn order_key(label: &str) -> f64 {
    SemesterKey::parse(label).value()
}

/// Order two labels by key, breaking ties on the raw label
#[must_use]
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    SemesterKey::parse(a)
        .cmp(&SemesterKey::parse(b))
        .then_with(|| a.cmp(b))
}

/// First maximal ASCII digit run of length >= 2, truncated to four digits
fn first_year(label: &str) -> Option<u32> {
    label
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| run.len() >= 2)
        .find_map(|run| run[..run.len().min(4)].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chronological_order() {
        assert!(order_key("Fall 2023") < order_key("Spring 2024"));
        assert!(order_key("Spring 2024") < order_key("Summer 2024"));
        assert!(order_key("Summer 2024") < order_key("Fall 2024"));
    }

    #[test]
    fn test_arabic_terms() {
        assert_eq!(SemesterKey::parse("خريف 2024").term, Term::Fall);
        assert_eq!(SemesterKey::parse("صيف 2024").term, Term::Summer);
        assert_eq!(SemesterKey::parse("ربيع 2024").term, Term::Spring);
        assert!(order_key("ربيع 2024") < order_key("خريف 2024"));
    }

    #[test]
    fn test_undated_labels_sort_first() {
        let undated = order_key("Spring");
        assert!((undated - 0.1).abs() < 1e-9);
        assert!(undated < order_key("Spring 1999"));
        assert!((order_key("") - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_year_extraction() {
        assert_eq!(SemesterKey::parse("Fall 2024/2025").year, 2024);
        assert_eq!(SemesterKey::parse("Term 1 of 24").year, 24);
        assert_eq!(SemesterKey::parse("Fall 202512").year, 2025);
        assert_eq!(SemesterKey::parse("Semester 3").year, 0);
    }

    #[test]
    fn test_compare_labels_ties_on_raw_label() {
        assert_eq!(compare_labels("Fall 2024", "fall 2024"), "Fall 2024".cmp("fall 2024"));
        assert_eq!(compare_labels("Spring 2024", "Fall 2023"), Ordering::Greater);
    }
}
