//! Display language for bilingual labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the portal renders labels in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// English
    #[default]
    En,
    /// Arabic
    Ar,
}

impl Lang {
    /// Pick the label matching this language
    #[must_use]
    pub const fn pick<'a>(self, en: &'a str, ar: &'a str) -> &'a str {
        match self {
            Self::En => en,
            Self::Ar => ar,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::En => "en",
            Self::Ar => "ar",
        })
    }
}
