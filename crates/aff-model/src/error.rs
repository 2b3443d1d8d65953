//! Classified conversion failures.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Remediation class of a failed conversion.
///
/// - `Input`: the link is malformed or internally inconsistent; fixing the
///   input is the only remedy.
/// - `UnsupportedData`: the link is understood but the destination portal
///   will never carry the resource.
/// - `NotImplemented`: a rule is known to be needed but not written yet.
/// - `Contract`: the encoder was handed a parameter outside its allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Input,
    UnsupportedData,
    NotImplemented,
    Contract,
}

impl ErrorKind {
    /// Returns true when retrying after a future release could succeed.
    #[must_use]
    pub const fn is_soft(self) -> bool {
        matches!(self, Self::NotImplemented)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::UnsupportedData => "unsupported_data",
            Self::NotImplemented => "not_implemented",
            Self::Contract => "contract",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while translating one legacy link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    // === Input errors ===
    /// The input has no `//` scheme separator.
    #[error("not a URL: {input:?} has no scheme separator")]
    NotAUrl { input: String },

    /// The link does not come from a tool with stable, self-describing links.
    #[error("not a stable deep link: {reason}")]
    NotStableDeepLink { reason: String },

    /// A field the link shape requires is absent or empty.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// A field is present but cannot be decoded.
    #[error("malformed {field} '{value}': {reason}")]
    MalformedField {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// No resolver produced a destination survey for the dataset.
    #[error("{program}/{dataset} could not be resolved to a destination survey")]
    Unresolvable { program: String, dataset: String },

    /// A population-group code is absent from the topic table.
    #[error("unknown population group code '{code}'")]
    UnknownTopicCode { code: String },

    /// A state code is absent from the state table.
    #[error("unknown state code '{code}'")]
    UnknownState { code: String },

    // === Unsupported data ===
    /// The destination portal does not carry this resource.
    #[error("unsupported data: {reason}")]
    Unsupported { reason: String },

    // === Not implemented ===
    /// A transformation rule exists in principle but has not been written.
    #[error("no transformation rule: {reason}")]
    NotImplemented { reason: String },

    // === Contract ===
    /// The encoder received a parameter outside the destination allow-list.
    #[error("parameter '{key}' is not a recognized destination parameter")]
    DisallowedParameter { key: String },
}

impl TransformError {
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            reason: reason.into(),
        }
    }

    pub fn not_implemented(reason: impl Into<String>) -> Self {
        Self::NotImplemented {
            reason: reason.into(),
        }
    }

    pub fn not_stable(reason: impl Into<String>) -> Self {
        Self::NotStableDeepLink {
            reason: reason.into(),
        }
    }

    pub fn malformed(field: &'static str, value: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedField {
            field,
            value: value.into(),
            reason,
        }
    }

    /// Classifies this error into its remediation class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAUrl { .. }
            | Self::NotStableDeepLink { .. }
            | Self::MissingField { .. }
            | Self::MalformedField { .. }
            | Self::Unresolvable { .. }
            | Self::UnknownTopicCode { .. }
            | Self::UnknownState { .. } => ErrorKind::Input,
            Self::Unsupported { .. } => ErrorKind::UnsupportedData,
            Self::NotImplemented { .. } => ErrorKind::NotImplemented,
            Self::DisallowedParameter { .. } => ErrorKind::Contract,
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, TransformError>;
