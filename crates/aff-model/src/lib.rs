//! Core types for translating retired-portal deep links.
//!
//! - [`link`]: decoded legacy links (tool, route, positional or query payload)
//! - [`dataset`]: legacy dataset keys and resolved destination surveys
//! - [`conversion`]: successful outcomes and low-confidence caveats
//! - [`error`]: the classified failure taxonomy

pub mod conversion;
pub mod dataset;
pub mod error;
pub mod link;

pub use conversion::{Caveat, Conversion};
pub use dataset::{DatasetKey, SurveyMapping};
pub use error::{ErrorKind, Result, TransformError};
pub use link::{LegacyLink, LinkPayload, PositionalFields, QueryParams, Route, TableServlet, Tool};
