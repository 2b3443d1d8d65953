//! Lookup document embedded at compile time.
//!
//! Holds every state and territory code plus the most common population
//! group codes. A full topic table can be rebuilt with `build-data` and
//! passed with `--data`.

/// Default `transform_data.json`.
pub const TRANSFORM_DATA: &str = include_str!("../data/transform_data.json");

/// Name reported in errors for the embedded document.
pub const TRANSFORM_DATA_NAME: &str = "embedded transform_data.json";
