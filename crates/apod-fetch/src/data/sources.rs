use std::fmt;

use serde::{Deserialize, Serialize};

/// The leg of the fallback that produced (or is producing) a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLabel {
    /// The rate-limited, date-scopable API (or the default document for unscoped requests).
    Primary,

    /// The static, unscoped fallback document.
    Mirror,
}

impl fmt::Display for SourceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLabel::Primary => write!(f, "primary"),
            SourceLabel::Mirror => write!(f, "mirror"),
        }
    }
}

/// A raw decoded payload and the leg it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub payload: serde_json::Value,
    pub source: SourceLabel,
}

impl Resolution {
    pub fn from_mirror(&self) -> bool {
        self.source == SourceLabel::Mirror
    }
}
