//! End-to-end distance field tests.
//!
//! Builds fields from in-memory grids and checks the query layer against
//! closed-form distances.

use approx::assert_relative_eq;
use dura_field::{
    DistanceField, FieldConfig, FieldError, LikelihoodField, OccupancyGrid, Point2D,
    half_normal_pdf,
};
use std::f32::consts::SQRT_2;

fn grid(
    width: usize,
    height: usize,
    resolution: f32,
    origin: Point2D,
    occupied: &[(usize, usize)],
) -> OccupancyGrid {
    let mut cells = vec![0i8; width * height];
    for &(cx, cy) in occupied {
        cells[cx + cy * width] = 100;
    }
    OccupancyGrid::new(width, height, resolution, origin, cells).unwrap()
}

/// Rectangular room with a wall segment inside, 5cm cells.
fn office_grid() -> OccupancyGrid {
    let (width, height) = (120, 80);
    let mut occupied = Vec::new();
    for cx in 0..width {
        occupied.push((cx, 0));
        occupied.push((cx, height - 1));
    }
    for cy in 0..height {
        occupied.push((0, cy));
        occupied.push((width - 1, cy));
    }
    for cy in 20..60 {
        occupied.push((70, cy));
    }
    grid(width, height, 0.05, Point2D::new(-3.0, -2.0), &occupied)
}

#[test]
fn test_three_by_three_scenario() {
    let grid = grid(3, 3, 1.0, Point2D::new(0.0, 0.0), &[(1, 1)]);
    let field = LikelihoodField::from_grid(&grid, FieldConfig::default()).unwrap();

    let expected = [SQRT_2, 1.0, SQRT_2, 1.0, 0.0, 1.0, SQRT_2, 1.0, SQRT_2];
    for (got, want) in field.field().distances().iter().zip(expected) {
        assert_relative_eq!(*got, want, epsilon = 1e-6);
    }

    assert_eq!(field.closest_obstacle_distance(1.0, 1.0), 0.0);
    assert!(field.closest_obstacle_distance(-5.0, -5.0).is_nan());
}

#[test]
fn test_query_with_offset_origin() {
    let grid = office_grid();
    let field = LikelihoodField::from_grid(&grid, FieldConfig::default()).unwrap();

    // Center of cell (10, 40): 10 cells from the left wall
    let p = grid.geometry().cell_to_world(10, 40);
    assert_relative_eq!(field.closest_obstacle_distance(p.x, p.y), 0.5, epsilon = 1e-5);

    // Center of cell (0, 0) maps to distances[0]
    let p0 = grid.geometry().cell_to_world(0, 0);
    assert_eq!(
        field.closest_obstacle_distance(p0.x, p0.y),
        field.field().distances()[0]
    );
}

#[test]
fn test_out_of_bounds_in_every_direction() {
    let grid = office_grid();
    let field = LikelihoodField::from_grid(&grid, FieldConfig::default()).unwrap();
    let origin = grid.origin();
    let (w, h) = grid.geometry().extent();
    let (mx, my) = (origin.x + w / 2.0, origin.y + h / 2.0);

    assert!(field.closest_obstacle_distance(origin.x - 0.01, my).is_nan());
    assert!(field.closest_obstacle_distance(mx, origin.y - 0.01).is_nan());
    assert!(field.closest_obstacle_distance(origin.x + w + 0.01, my).is_nan());
    assert!(field.closest_obstacle_distance(mx, origin.y + h + 0.01).is_nan());
    assert!(field.closest_obstacle_distance(mx, my).is_finite());
}

#[test]
fn test_field_invariants_on_office() {
    let grid = office_grid();
    let field = DistanceField::build(&grid, &FieldConfig::default()).unwrap();

    assert_eq!(field.distances().len(), grid.geometry().len());
    assert!(field.distances().iter().all(|d| d.is_finite() && *d >= 0.0));
    for (cx, cy) in grid.occupied_cells(0) {
        assert_eq!(field.distance_at_cell(cx, cy), Some(0.0));
    }

    let reference = DistanceField::build(&grid, &FieldConfig::reference()).unwrap();
    assert_eq!(field.distances(), reference.distances());
}

#[test]
fn test_scan_endpoints_on_walls_score_peak() {
    let grid = office_grid();
    let field = LikelihoodField::from_grid(&grid, FieldConfig::default()).unwrap();

    // Endpoints at the centers of wall cells
    let walls: Vec<Point2D> = (5..60)
        .step_by(5)
        .map(|cy| grid.geometry().cell_to_world(70, cy))
        .collect();
    let (xs, ys): (Vec<f32>, Vec<f32>) = walls.iter().map(|p| (p.x, p.y)).unzip();

    let likelihood = field.batch_likelihood(&xs, &ys).unwrap();
    let peak = half_normal_pdf(0.0, 100.0);
    // Endpoints below the segment are off the wall
    assert!(likelihood <= peak);

    let on_wall: Vec<Point2D> = (20..60)
        .map(|cy| grid.geometry().cell_to_world(70, cy))
        .collect();
    assert_relative_eq!(field.points_likelihood(&on_wall), peak);
}

#[test]
fn test_shifted_pose_scores_lower() {
    let grid = office_grid();
    let field = LikelihoodField::from_grid(&grid, FieldConfig::default()).unwrap();
    let geometry = grid.geometry();

    let truth: Vec<Point2D> = (20..60).map(|cy| geometry.cell_to_world(70, cy)).collect();
    let shifted: Vec<Point2D> = truth
        .iter()
        .map(|p| Point2D::new(p.x + 0.4, p.y))
        .collect();

    assert!(field.points_likelihood(&truth) > field.points_likelihood(&shifted));
}

#[test]
fn test_batch_out_of_bounds_penalized() {
    let grid = office_grid();
    let field = LikelihoodField::from_grid(&grid, FieldConfig::default()).unwrap();
    let p = grid.geometry().cell_to_world(0, 0);

    let error = field.batch_error(&[p.x, 100.0, -100.0], &[p.y, 0.0, 0.0]).unwrap();
    assert_eq!(error.in_bounds, 1);
    assert_eq!(error.out_of_bounds, 2);
    assert_relative_eq!(error.total, 8.0);
}

#[test]
fn test_batch_length_mismatch() {
    let grid = office_grid();
    let field = LikelihoodField::from_grid(&grid, FieldConfig::default()).unwrap();
    let err = field.batch_likelihood(&[0.0; 3], &[0.0; 4]).unwrap_err();
    assert!(matches!(err, FieldError::InvalidInput { xs: 3, ys: 4 }));
}

#[test]
fn test_all_occupied_grid() {
    let cells = vec![100i8; 12];
    let grid = OccupancyGrid::new(4, 3, 0.1, Point2D::default(), cells).unwrap();
    let field = DistanceField::build(&grid, &FieldConfig::default()).unwrap();
    assert!(field.distances().iter().all(|&d| d == 0.0));
}

#[test]
fn test_empty_map_fails() {
    let grid = OccupancyGrid::filled(10, 10, 0.05, Point2D::default(), -1).unwrap();
    let err = LikelihoodField::from_grid(&grid, FieldConfig::default()).unwrap_err();
    assert!(matches!(err, FieldError::EmptyObstacleSet));
}
