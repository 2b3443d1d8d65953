//! Translation of retired-portal deep links into destination-portal links.
//!
//! A conversion runs in three stages:
//!
//! 1. [`decode`] splits a legacy URL into its tool, target and payload and
//!    selects a route.
//! 2. A special-case handler reads the payload, resolving datasets through
//!    the [`resolve`] engine and codes through the lookup tables.
//! 3. [`encode`] builds the destination URL from the handler's endpoint and
//!    allow-listed parameters.
//!
//! [`Transformer`] ties the stages together:
//!
//! ```no_run
//! use aff_lookup::LookupTables;
//! use aff_transform::Transformer;
//!
//! let tables = LookupTables::embedded()?;
//! let conversion = Transformer::new(&tables)
//!     .convert("https://factfinder.census.gov/bkmk/table/1.0/en/DEC/10_SF1/H10")?;
//! assert_eq!(
//!     conversion.url,
//!     "https://data.census.gov/cedsci/table?tid=DECENNIALSF12010.H10&y=2010"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod convert;
pub mod decode;
pub mod encode;
pub mod fields;
pub mod handlers;
pub mod resolve;

pub use convert::Transformer;
pub use decode::decode;
pub use encode::{ALLOWED_PARAMS, BASE_URL, Endpoint, NewLink, encode};
pub use resolve::{
    ProgramResolver, ResolverRegistry, SupportStatus, default_registry, resolve,
};
