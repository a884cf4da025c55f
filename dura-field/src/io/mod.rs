//! I/O infrastructure layer.
//!
//! # Contents
//!
//! - [`map_loader`]: ROS map_server YAML + image maps to [`OccupancyGrid`](crate::mapping::OccupancyGrid)
//! - [`export`]: Distance field rendering for inspection

pub mod export;
pub mod map_loader;

pub use export::{distance_image, save_distance_image};
pub use map_loader::{MapMetadata, MapMode, grid_from_image, load_map, read_metadata};
