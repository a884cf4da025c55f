//! DuraField - Obstacle distance fields for occupancy grid localization
//!
//! Precomputes, for every cell of a static occupancy grid, the distance to
//! the nearest occupied cell, and answers distance and likelihood queries
//! for continuous world coordinates. Used to score predicted laser endpoints
//! in particle-filter localization.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← Infrastructure
//! │            (map_loader, export)                     │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    field/                           │  ← Core algorithms
//! │     (DistanceField builder, LikelihoodField)        │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   mapping/                          │  ← Map input
//! │          (OccupancyGrid, GridGeometry)              │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                (types, math)                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The field is built once per map (blocking) and is immutable afterwards,
//! so queries can run concurrently without locking.

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;

pub mod error;

// ============================================================================
// Layer 2: Map input (depends on core)
// ============================================================================
pub mod mapping;

// ============================================================================
// Layer 3: Distance field (depends on core, mapping)
// ============================================================================
pub mod field;

// ============================================================================
// Layer 4: I/O infrastructure (depends on all layers)
// ============================================================================
pub mod io;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

pub use crate::core::math::{half_normal_log_pdf, half_normal_pdf};
pub use crate::core::types::Point2D;
pub use error::{FieldError, Result};
pub use field::{BatchError, DistanceField, FieldConfig, FieldMethod, FieldStats, LikelihoodField};
pub use io::{load_map, save_distance_image};
pub use mapping::{CellState, GridGeometry, OccupancyGrid};
