//! Core foundation layer.
//!
//! Bottom layer of the crate with no internal dependencies.
//!
//! # Contents
//!
//! - [`types`]: Core data types (points)
//! - [`math`]: Likelihood shaping functions

pub mod math;
pub mod types;
