//! Static occupancy grid in the ROS `nav_msgs/OccupancyGrid` convention.
//!
//! ```text
//! -1        unknown
//! 0         free
//! 1..=100   occupancy probability (percent)
//! ```
//!
//! Cells are stored row-major with row 0 at the origin (bottom of the map).

use super::GridGeometry;
use crate::core::types::Point2D;
use crate::error::{FieldError, Result};

/// Cell classification against an occupancy threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Unknown (never observed)
    Unknown,
    /// Free space, or occupancy at or below the threshold
    Free,
    /// Occupancy above the threshold
    Occupied,
}

/// Immutable 2D occupancy grid.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    geometry: GridGeometry,

    /// Occupancy values.
    ///
    /// Row-major storage: index = x + y * width
    cells: Vec<i8>,
}

impl OccupancyGrid {
    /// Create a grid, validating its metadata against the cell data.
    ///
    /// Fails with [`FieldError::InvalidGrid`] for zero dimensions, a
    /// non-positive or non-finite resolution, a non-finite origin, or a
    /// cell count that differs from `width * height`.
    pub fn new(
        width: usize,
        height: usize,
        resolution: f32,
        origin: Point2D,
        cells: Vec<i8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidGrid(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(FieldError::InvalidGrid(format!(
                "resolution must be positive and finite, got {}",
                resolution
            )));
        }
        if !origin.is_finite() {
            return Err(FieldError::InvalidGrid(format!(
                "origin must be finite, got ({}, {})",
                origin.x, origin.y
            )));
        }
        let expected = width.checked_mul(height).ok_or_else(|| {
            FieldError::InvalidGrid(format!("dimensions {}x{} overflow", width, height))
        })?;
        if cells.len() != expected {
            return Err(FieldError::InvalidGrid(format!(
                "expected {} cells for {}x{}, got {}",
                expected,
                width,
                height,
                cells.len()
            )));
        }

        Ok(Self {
            geometry: GridGeometry {
                width,
                height,
                resolution,
                origin,
            },
            cells,
        })
    }

    /// Create a grid where every cell has the same value.
    pub fn filled(
        width: usize,
        height: usize,
        resolution: f32,
        origin: Point2D,
        value: i8,
    ) -> Result<Self> {
        let len = width.checked_mul(height).ok_or_else(|| {
            FieldError::InvalidGrid(format!("dimensions {}x{} overflow", width, height))
        })?;
        Self::new(width, height, resolution, origin, vec![value; len])
    }

    /// Geometric metadata.
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

    /// Grid dimensions.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.geometry.width, self.geometry.height)
    }

    /// World units per cell.
    pub fn resolution(&self) -> f32 {
        self.geometry.resolution
    }

    /// World coordinates of cell (0, 0).
    pub fn origin(&self) -> Point2D {
        self.geometry.origin
    }

    /// Raw occupancy values, row-major.
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    /// Occupancy value at a cell, `None` out of bounds.
    #[inline]
    pub fn get(&self, cx: usize, cy: usize) -> Option<i8> {
        if cx < self.geometry.width && cy < self.geometry.height {
            Some(self.cells[self.geometry.index(cx, cy)])
        } else {
            None
        }
    }

    /// Classify a cell. Out-of-bounds cells are unknown.
    pub fn get_state(&self, cx: usize, cy: usize, occupied_threshold: i8) -> CellState {
        match self.get(cx, cy) {
            Some(v) if v > occupied_threshold => CellState::Occupied,
            Some(v) if v >= 0 => CellState::Free,
            _ => CellState::Unknown,
        }
    }

    /// Cell coordinates of every occupied cell, row by row.
    pub fn occupied_cells(&self, occupied_threshold: i8) -> Vec<(usize, usize)> {
        let width = self.geometry.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > occupied_threshold)
            .map(|(idx, _)| (idx % width, idx / width))
            .collect()
    }

    /// Number of occupied cells.
    pub fn count_occupied(&self, occupied_threshold: i8) -> usize {
        self.cells.iter().filter(|&&v| v > occupied_threshold).count()
    }

    /// Number of unknown (negative) cells.
    pub fn count_unknown(&self) -> usize {
        self.cells.iter().filter(|&&v| v < 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_grid() {
        let grid = OccupancyGrid::new(3, 2, 0.05, Point2D::new(-1.0, -1.0), vec![0; 6]).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.resolution(), 0.05);
        assert_eq!(grid.origin(), Point2D::new(-1.0, -1.0));
        assert_eq!(grid.geometry().len(), 6);
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = OccupancyGrid::new(3, 3, 1.0, Point2D::default(), vec![0; 8]).unwrap_err();
        assert!(matches!(err, FieldError::InvalidGrid(_)));
    }

    #[test]
    fn test_new_rejects_bad_resolution() {
        for res in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            let err = OccupancyGrid::new(2, 2, res, Point2D::default(), vec![0; 4]).unwrap_err();
            assert!(matches!(err, FieldError::InvalidGrid(_)), "resolution {}", res);
        }
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(OccupancyGrid::new(0, 4, 1.0, Point2D::default(), vec![]).is_err());
        assert!(OccupancyGrid::new(4, 0, 1.0, Point2D::default(), vec![]).is_err());
    }

    #[test]
    fn test_new_rejects_non_finite_origin() {
        let err =
            OccupancyGrid::new(1, 1, 1.0, Point2D::new(f32::NAN, 0.0), vec![100]).unwrap_err();
        assert!(matches!(err, FieldError::InvalidGrid(_)));
    }

    #[test]
    fn test_filled_rejects_overflow() {
        let err = OccupancyGrid::filled(usize::MAX, 2, 1.0, Point2D::default(), 0).unwrap_err();
        assert!(matches!(err, FieldError::InvalidGrid(_)));
    }

    #[test]
    fn test_cell_states() {
        // Row 0: unknown, free, occupied
        let grid = OccupancyGrid::new(3, 1, 1.0, Point2D::default(), vec![-1, 0, 100]).unwrap();
        assert_eq!(grid.get_state(0, 0, 0), CellState::Unknown);
        assert_eq!(grid.get_state(1, 0, 0), CellState::Free);
        assert_eq!(grid.get_state(2, 0, 0), CellState::Occupied);
        assert_eq!(grid.get_state(3, 0, 0), CellState::Unknown);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let grid = OccupancyGrid::new(3, 1, 1.0, Point2D::default(), vec![49, 50, 51]).unwrap();
        assert_eq!(grid.count_occupied(50), 1);
        assert_eq!(grid.get_state(1, 0, 50), CellState::Free);
        assert_eq!(grid.count_occupied(0), 3);
    }

    #[test]
    fn test_occupied_cells_coordinates() {
        #[rustfmt::skip]
        let cells = vec![
            0,   0, 100,
            100, 0, 0,
        ];
        let grid = OccupancyGrid::new(3, 2, 1.0, Point2D::default(), cells).unwrap();
        assert_eq!(grid.occupied_cells(0), vec![(2, 0), (0, 1)]);
        assert_eq!(grid.count_unknown(), 0);
    }
}
