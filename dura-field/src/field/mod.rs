//! Distance field module.
//!
//! Builds a dense nearest-obstacle distance field from an occupancy grid
//! and scores world-coordinate points against it.
//!
//! # Components
//!
//! - [`DistanceField`]: Per-cell distance to the nearest occupied cell
//! - [`LikelihoodField`]: Point queries and batch likelihood scoring
//! - [`FieldConfig`]: Obstacle threshold, scoring parameters, build method
//!
//! # Example
//!
//! ```
//! use dura_field::field::{FieldConfig, LikelihoodField};
//! use dura_field::mapping::OccupancyGrid;
//! use dura_field::core::types::Point2D;
//!
//! let cells = vec![0, 0, 0, 0, 100, 0, 0, 0, 0];
//! let grid = OccupancyGrid::new(3, 3, 1.0, Point2D::new(0.0, 0.0), cells)?;
//! let field = LikelihoodField::from_grid(&grid, FieldConfig::default())?;
//!
//! assert_eq!(field.closest_obstacle_distance(1.0, 1.0), 0.0);
//! assert!(field.closest_obstacle_distance(-5.0, -5.0).is_nan());
//!
//! let score = field.batch_likelihood(&[1.0, 0.5], &[1.0, 1.5])?;
//! assert!(score > 0.0);
//! # Ok::<(), dura_field::FieldError>(())
//! ```

mod config;
mod distance_field;
mod likelihood;

pub use config::{FieldConfig, FieldMethod};
pub use distance_field::{DistanceField, FieldStats};
pub use likelihood::{BatchError, LikelihoodField};
