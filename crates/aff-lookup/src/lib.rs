//! Lookup store for the deep-link translator.
//!
//! Two read-only tables back the special-case handlers: population-group
//! codes to labels, and state codes to names. They are loaded once from a
//! persisted JSON document (embedded by default) and shared by every
//! conversion.
//!
//! # Document format
//!
//! ```text
//! {
//!     "states": { "01": "Alabama", ... },
//!     "topics": { "001": "001 - Total population", ... }
//! }
//! ```
//!
//! The [`derive`] module rebuilds both sections from upstream artifacts that
//! were retrieved elsewhere.

pub mod derive;
mod embedded;
mod error;
mod tables;

pub use derive::{collect_facet_codes, states_from_reference, topic_key, topics_from_facets};
pub use error::{LookupError, Result};
pub use tables::LookupTables;
