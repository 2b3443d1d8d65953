//! Successful conversion results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a successful conversion should not be fully trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Caveat {
    /// Table identity was guessed from a packed legacy compound name whose
    /// field boundaries are ambiguous.
    HeuristicTableName { compound: String },
}

impl fmt::Display for Caveat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeuristicTableName { compound } => write!(
                f,
                "table identity reconstructed from legacy compound name '{compound}'"
            ),
        }
    }
}

/// A converted destination URL, optionally carrying a low-confidence caveat.
///
/// Together with a failed `Result`, this is the three-way outcome of a
/// conversion: exact, low confidence, or failure. Escalating low-confidence
/// conversions is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caveat: Option<Caveat>,
}

impl Conversion {
    pub fn exact(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caveat: None,
        }
    }

    pub fn low_confidence(url: impl Into<String>, caveat: Caveat) -> Self {
        Self {
            url: url.into(),
            caveat: Some(caveat),
        }
    }

    pub fn is_exact(&self) -> bool {
        self.caveat.is_none()
    }
}
