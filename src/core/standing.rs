//! Academic standing bands derived from cumulative GPA

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::Lang;

/// Standing band, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcademicStanding {
    /// GPA 3.70 and above
    DeansList,
    /// GPA 3.00 and above
    GoodStanding,
    /// GPA 2.00 and above
    Satisfactory,
    /// GPA 1.00 and above
    Probation,
    /// Below 1.00
    Suspension,
}

impl AcademicStanding {
    /// Band for a (rounded) GPA
    #[must_use]
    pub fn from_gpa(gpa: f64) -> Self {
        if gpa >= 3.7 {
            Self::DeansList
        } else if gpa >= 3.0 {
            Self::GoodStanding
        } else if gpa >= 2.0 {
            Self::Satisfactory
        } else if gpa >= 1.0 {
            Self::Probation
        } else {
            Self::Suspension
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self, lang: Lang) -> &'static str {
        match self {
            Self::DeansList => lang.pick("Dean's List", "قائمة العميد"),
            Self::GoodStanding => lang.pick("Good Standing", "وضع جيد"),
            Self::Satisfactory => lang.pick("Satisfactory", "مرضي"),
            Self::Probation => lang.pick("Academic Probation", "إنذار أكاديمي"),
            Self::Suspension => lang.pick("Academic Suspension", "فصل أكاديمي"),
        }
    }
}

impl fmt::Display for AcademicStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Lang::En))
    }
}
