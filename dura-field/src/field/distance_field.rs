//! Distance field construction.
//!
//! For every cell, the Euclidean distance from its center to the center of
//! the nearest occupied cell, in world units. Built once per map.
//!
//! Distances are found in integer cell coordinates (squared distances are
//! exact), then scaled by the grid resolution.

use std::time::Instant;

use rstar::RTree;

use super::config::{FieldConfig, FieldMethod};
use crate::core::types::Point2D;
use crate::error::{FieldError, Result};
use crate::mapping::{GridGeometry, OccupancyGrid};

/// Cell coordinates as R-tree points. `i64` keeps squared distances exact.
type CellPoint = [i64; 2];

/// Summary statistics for a built field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    /// Number of obstacle cells the field was built from.
    pub occupied_cells: usize,
    /// Total number of cells.
    pub total_cells: usize,
    /// Largest distance in the field (world units).
    pub max_distance: f32,
    /// Mean distance over all cells (world units).
    pub mean_distance: f32,
}

/// Dense, immutable distance-to-nearest-obstacle field.
///
/// Keeps the grid geometry for coordinate translation but not the
/// occupancy data it was built from.
#[derive(Debug, Clone)]
pub struct DistanceField {
    geometry: GridGeometry,

    /// Distance per cell, row-major (index = x + y * width).
    distances: Vec<f32>,

    occupied_cells: usize,
}

impl DistanceField {
    /// Build the field for `grid`.
    ///
    /// Blocking; cost is dominated by the nearest-neighbour search. Fails
    /// with [`FieldError::EmptyObstacleSet`] if no cell is above
    /// `config.occupied_threshold`.
    pub fn build(grid: &OccupancyGrid, config: &FieldConfig) -> Result<Self> {
        let start = Instant::now();
        let geometry = grid.geometry();

        let obstacles: Vec<CellPoint> = grid
            .occupied_cells(config.occupied_threshold)
            .into_iter()
            .map(|(cx, cy)| [cx as i64, cy as i64])
            .collect();

        if obstacles.is_empty() {
            return Err(FieldError::EmptyObstacleSet);
        }
        let occupied_cells = obstacles.len();

        let squared = match config.method {
            FieldMethod::RTree => nearest_squared_rtree(&geometry, obstacles),
            FieldMethod::BruteForce => nearest_squared_brute_force(&geometry, &obstacles),
        };

        let resolution = f64::from(geometry.resolution);
        let distances = squared
            .into_iter()
            .map(|d2| ((d2 as f64).sqrt() * resolution) as f32)
            .collect();

        log::info!(
            "Built distance field {}x{} @ {} from {} obstacle cells ({:?}) in {:.1} ms",
            geometry.width,
            geometry.height,
            geometry.resolution,
            occupied_cells,
            config.method,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Self {
            geometry,
            distances,
            occupied_cells,
        })
    }

    /// Grid geometry the field was built for.
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.geometry.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.geometry.height
    }

    /// World units per cell.
    pub fn resolution(&self) -> f32 {
        self.geometry.resolution
    }

    /// World coordinates of cell (0, 0).
    pub fn origin(&self) -> Point2D {
        self.geometry.origin
    }

    /// All distances, row-major.
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    /// Distance at a cell, `None` out of bounds.
    #[inline]
    pub fn distance_at_cell(&self, cx: usize, cy: usize) -> Option<f32> {
        if cx < self.geometry.width && cy < self.geometry.height {
            Some(self.distances[self.geometry.index(cx, cy)])
        } else {
            None
        }
    }

    /// Distance at a flat index. Caller guarantees `idx < width * height`.
    #[inline]
    pub(crate) fn distance_at_index(&self, idx: usize) -> f32 {
        self.distances[idx]
    }

    /// Summary statistics.
    pub fn stats(&self) -> FieldStats {
        let max_distance = self.distances.iter().copied().fold(0.0f32, f32::max);
        let sum: f64 = self.distances.iter().map(|&d| f64::from(d)).sum();
        FieldStats {
            occupied_cells: self.occupied_cells,
            total_cells: self.distances.len(),
            max_distance,
            mean_distance: (sum / self.distances.len() as f64) as f32,
        }
    }
}

/// Squared cell distance to the nearest obstacle, via R*-tree.
fn nearest_squared_rtree(geometry: &GridGeometry, obstacles: Vec<CellPoint>) -> Vec<i64> {
    let tree = RTree::bulk_load(obstacles);
    let mut squared = Vec::with_capacity(geometry.len());

    for cy in 0..geometry.height as i64 {
        for cx in 0..geometry.width as i64 {
            let query = [cx, cy];
            let d2 = tree
                .nearest_neighbor(&query)
                .map_or(i64::MAX, |nearest| squared_distance(nearest, &query));
            squared.push(d2);
        }
    }
    squared
}

/// Squared cell distance to the nearest obstacle, exhaustive.
fn nearest_squared_brute_force(geometry: &GridGeometry, obstacles: &[CellPoint]) -> Vec<i64> {
    let mut squared = Vec::with_capacity(geometry.len());

    for cy in 0..geometry.height as i64 {
        for cx in 0..geometry.width as i64 {
            let query = [cx, cy];
            let d2 = obstacles
                .iter()
                .map(|o| squared_distance(o, &query))
                .min()
                .unwrap_or(i64::MAX);
            squared.push(d2);
        }
    }
    squared
}

#[inline]
fn squared_distance(a: &CellPoint, b: &CellPoint) -> i64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}
