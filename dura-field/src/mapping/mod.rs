//! Mapping module.
//!
//! Static occupancy grid input and the geometry shared with the distance field.
//!
//! # Components
//!
//! - [`OccupancyGrid`]: ROS-style occupancy grid (`-1` unknown, `0..=100` occupancy)
//! - [`GridGeometry`]: Dimensions, resolution and origin for world/cell transforms

mod occupancy_grid;

pub use occupancy_grid::{CellState, OccupancyGrid};

use crate::core::types::Point2D;

/// Geometric metadata of a grid.
///
/// Shared by [`OccupancyGrid`] and the distance field built from it, so
/// the field can translate coordinates without holding the occupancy data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// World units per cell edge.
    pub resolution: f32,
    /// World coordinates of the corner of cell (0, 0).
    pub origin: Point2D,
}

impl GridGeometry {
    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True if the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major flat index: `cx + cy * width`.
    #[inline]
    pub fn index(&self, cx: usize, cy: usize) -> usize {
        cy * self.width + cx
    }

    /// Convert world coordinates to cell indices.
    ///
    /// Uses `floor`, so coordinates just below the origin map to -1 and
    /// are rejected instead of collapsing onto row/column 0. The upper bound
    /// is exclusive. Non-finite coordinates are out of bounds.
    #[inline]
    pub fn world_to_cell(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let cx = ((x - self.origin.x) / self.resolution).floor();
        let cy = ((y - self.origin.y) / self.resolution).floor();

        if cx >= 0.0 && cy >= 0.0 {
            let cx = cx as usize;
            let cy = cy as usize;
            if cx < self.width && cy < self.height {
                return Some((cx, cy));
            }
        }
        None
    }

    /// Convert world coordinates straight to a flat index.
    #[inline]
    pub fn world_to_index(&self, x: f32, y: f32) -> Option<usize> {
        self.world_to_cell(x, y).map(|(cx, cy)| self.index(cx, cy))
    }

    /// Convert cell indices to world coordinates (center of cell).
    #[inline]
    pub fn cell_to_world(&self, cx: usize, cy: usize) -> Point2D {
        Point2D::new(
            self.origin.x + (cx as f32 + 0.5) * self.resolution,
            self.origin.y + (cy as f32 + 0.5) * self.resolution,
        )
    }

    /// World-space size of the grid (width, height).
    pub fn extent(&self) -> (f32, f32) {
        (
            self.width as f32 * self.resolution,
            self.height as f32 * self.resolution,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> GridGeometry {
        GridGeometry {
            width: 4,
            height: 3,
            resolution: 0.5,
            origin: Point2D::new(-1.0, 2.0),
        }
    }

    #[test]
    fn test_world_to_cell_inside() {
        let g = geometry();
        assert_eq!(g.world_to_cell(-1.0, 2.0), Some((0, 0)));
        assert_eq!(g.world_to_cell(-0.26, 2.74), Some((1, 1)));
        assert_eq!(g.world_to_cell(0.99, 3.49), Some((3, 2)));
    }

    #[test]
    fn test_world_to_cell_upper_bound_exclusive() {
        let g = geometry();
        // x = origin + width * resolution is one past the last column
        assert_eq!(g.world_to_cell(1.0, 2.0), None);
        assert_eq!(g.world_to_cell(-1.0, 3.5), None);
    }

    #[test]
    fn test_world_to_cell_floor_below_origin() {
        let g = geometry();
        // Truncation would map this onto column 0
        assert_eq!(g.world_to_cell(-1.1, 2.0), None);
        assert_eq!(g.world_to_cell(-1.0, 1.9), None);
    }

    #[test]
    fn test_world_to_cell_non_finite() {
        let g = geometry();
        assert_eq!(g.world_to_cell(f32::NAN, 2.0), None);
        assert_eq!(g.world_to_cell(0.0, f32::INFINITY), None);
        assert_eq!(g.world_to_cell(f32::NEG_INFINITY, 2.0), None);
    }

    #[test]
    fn test_cell_to_world_round_trip() {
        let g = geometry();
        for cy in 0..g.height {
            for cx in 0..g.width {
                let p = g.cell_to_world(cx, cy);
                assert_eq!(g.world_to_cell(p.x, p.y), Some((cx, cy)));
            }
        }
    }

    #[test]
    fn test_index_row_major() {
        let g = geometry();
        assert_eq!(g.index(0, 0), 0);
        assert_eq!(g.index(3, 0), 3);
        assert_eq!(g.index(0, 1), 4);
        assert_eq!(g.index(3, 2), 11);
        assert_eq!(g.len(), 12);
        assert_eq!(g.extent(), (2.0, 1.5));
    }
}
