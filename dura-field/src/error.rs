//! Error types for DuraField

use thiserror::Error;

/// DuraField error type
#[derive(Error, Debug)]
pub enum FieldError {
    /// The grid has no occupied cells, so no distance can be defined.
    #[error("Occupancy grid has no occupied cells")]
    EmptyObstacleSet,

    /// Batch query slices differ in length.
    #[error("Invalid input: x and y slices differ in length ({xs} vs {ys})")]
    InvalidInput {
        /// Number of x coordinates
        xs: usize,
        /// Number of y coordinates
        ys: usize,
    },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Map format error: {0}")]
    MapFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<basic_toml::Error> for FieldError {
    fn from(e: basic_toml::Error) -> Self {
        FieldError::Config(e.to_string())
    }
}

impl From<serde_yaml::Error> for FieldError {
    fn from(e: serde_yaml::Error) -> Self {
        FieldError::MapFormat(e.to_string())
    }
}

impl From<image::ImageError> for FieldError {
    fn from(e: image::ImageError) -> Self {
        FieldError::MapFormat(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FieldError>;
