//! CLI library components for the deep-link converter.

pub mod batch;
pub mod logging;
