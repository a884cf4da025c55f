//! Distance queries and batch likelihood scoring.
//!
//! Wraps a built [`DistanceField`] for world-coordinate lookups. The batch
//! path sums per-point obstacle distances, charges a fixed penalty for each
//! point outside the map, and shapes the total with a half-normal density:
//!
//! ```text
//! total      = Σ field(xᵢ, yᵢ)  (in-bounds)  +  k · max_distance_out_of_bounds
//! likelihood = half_normal_pdf(total, likelihood_scale)
//! ```
//!
//! Out-of-bounds points contribute only through the penalty term.

use super::config::FieldConfig;
use super::distance_field::DistanceField;
use crate::core::math::{half_normal_log_pdf, half_normal_pdf};
use crate::core::types::Point2D;
use crate::error::{FieldError, Result};
use crate::mapping::{GridGeometry, OccupancyGrid};

/// Aggregated distance error over a batch of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchError {
    /// Sum of in-bounds distances plus the out-of-bounds penalty.
    pub total: f32,
    /// Points that landed inside the grid.
    pub in_bounds: usize,
    /// Points outside the grid (by either coordinate).
    pub out_of_bounds: usize,
}

impl BatchError {
    /// Half-normal density of the total error.
    #[inline]
    pub fn likelihood(&self, scale: f32) -> f32 {
        half_normal_pdf(self.total, scale)
    }

    /// Log of [`Self::likelihood`], finite for large errors.
    #[inline]
    pub fn log_likelihood(&self, scale: f32) -> f32 {
        half_normal_log_pdf(self.total, scale)
    }

    /// Number of points scored.
    pub fn len(&self) -> usize {
        self.in_bounds + self.out_of_bounds
    }

    /// True if no points were scored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only distance query service over a built field.
///
/// Immutable after construction; queries take `&self` and can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct LikelihoodField {
    field: DistanceField,
    config: FieldConfig,
}

impl LikelihoodField {
    /// Wrap an already-built field.
    pub fn new(field: DistanceField, config: FieldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { field, config })
    }

    /// Build the field for `grid` and wrap it.
    pub fn from_grid(grid: &OccupancyGrid, config: FieldConfig) -> Result<Self> {
        config.validate()?;
        let field = DistanceField::build(grid, &config)?;
        Ok(Self { field, config })
    }

    /// The underlying distance field.
    pub fn field(&self) -> &DistanceField {
        &self.field
    }

    /// The configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Grid geometry.
    pub fn geometry(&self) -> GridGeometry {
        self.field.geometry()
    }

    /// Distance from world point `(x, y)` to the nearest obstacle.
    ///
    /// Returns NaN when the point lies outside the grid; callers must check.
    #[inline]
    pub fn closest_obstacle_distance(&self, x: f32, y: f32) -> f32 {
        match self.field.geometry().world_to_index(x, y) {
            Some(idx) => self.field.distance_at_index(idx),
            None => f32::NAN,
        }
    }

    /// Aggregate distance error over parallel coordinate slices.
    ///
    /// Fails with [`FieldError::InvalidInput`] if the slices differ in length.
    pub fn batch_error(&self, xs: &[f32], ys: &[f32]) -> Result<BatchError> {
        if xs.len() != ys.len() {
            return Err(FieldError::InvalidInput {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        Ok(self.accumulate(xs.iter().copied().zip(ys.iter().copied())))
    }

    /// Half-normal likelihood of the batch error over parallel slices.
    ///
    /// Fails with [`FieldError::InvalidInput`] if the slices differ in length.
    pub fn batch_likelihood(&self, xs: &[f32], ys: &[f32]) -> Result<f32> {
        Ok(self
            .batch_error(xs, ys)?
            .likelihood(self.config.likelihood_scale))
    }

    /// Half-normal likelihood of the batch error over points.
    pub fn points_likelihood(&self, points: &[Point2D]) -> f32 {
        self.accumulate(points.iter().map(|p| (p.x, p.y)))
            .likelihood(self.config.likelihood_scale)
    }

    fn accumulate(&self, points: impl Iterator<Item = (f32, f32)>) -> BatchError {
        let geometry = self.field.geometry();
        let mut sum = 0.0f64;
        let mut in_bounds = 0;
        let mut out_of_bounds = 0;

        for (x, y) in points {
            match geometry.world_to_index(x, y) {
                Some(idx) => {
                    sum += f64::from(self.field.distance_at_index(idx));
                    in_bounds += 1;
                }
                None => out_of_bounds += 1,
            }
        }

        let penalty = out_of_bounds as f64 * f64::from(self.config.max_distance_out_of_bounds);
        BatchError {
            total: (sum + penalty) as f32,
            in_bounds,
            out_of_bounds,
        }
    }
}
