//! Distance field configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};

/// Nearest-obstacle search method used when building the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldMethod {
    /// Bulk-loaded R*-tree over occupied cells. O(n log m).
    #[default]
    #[serde(rename = "rtree")]
    RTree,

    /// Exhaustive scan of every occupied cell per grid cell. O(n·m).
    ///
    /// Only sensible for small maps; kept as a reference.
    #[serde(rename = "brute_force")]
    BruteForce,
}

/// Configuration for building and querying a distance field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Cells with a value strictly greater than this are obstacles.
    ///
    /// Typical: 0 (any non-zero occupancy). ROS unknown (-1) is never occupied
    /// for thresholds >= -1.
    pub occupied_threshold: i8,

    /// Distance charged for each batch point that falls outside the grid.
    ///
    /// Stands in for the sensor's max range. Typical: 4.0
    pub max_distance_out_of_bounds: f32,

    /// Scale (sigma) of the half-normal applied to the batch error sum.
    ///
    /// Typical: 100.0
    pub likelihood_scale: f32,

    /// Nearest-obstacle search method.
    pub method: FieldMethod,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            occupied_threshold: 0,
            max_distance_out_of_bounds: 4.0,
            likelihood_scale: 100.0,
            method: FieldMethod::RTree,
        }
    }
}

impl FieldConfig {
    /// Default scoring with the brute-force builder.
    pub fn reference() -> Self {
        Self {
            method: FieldMethod::BruteForce,
            ..Default::default()
        }
    }

    /// Parse from TOML. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: FieldConfig = basic_toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("Loaded field config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(basic_toml::to_string(self)?)
    }

    /// Check that scoring parameters are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.likelihood_scale.is_finite() || self.likelihood_scale <= 0.0 {
            return Err(FieldError::InvalidConfig(format!(
                "likelihood_scale must be positive and finite, got {}",
                self.likelihood_scale
            )));
        }
        if !self.max_distance_out_of_bounds.is_finite() || self.max_distance_out_of_bounds < 0.0 {
            return Err(FieldError::InvalidConfig(format!(
                "max_distance_out_of_bounds must be non-negative and finite, got {}",
                self.max_distance_out_of_bounds
            )));
        }
        Ok(())
    }
}
