//! Score candidate robot poses against a synthetic room.
//!
//! Simulates a 360-beam scan from the true pose by ray-marching the grid,
//! then scores the same ranges projected from nearby candidate poses, the
//! way a particle filter weights its particles.
//!
//! Run with: `cargo run --example pose_scoring`

use dura_field::{FieldConfig, LikelihoodField, OccupancyGrid, Point2D};
use std::f32::consts::TAU;

const RESOLUTION: f32 = 0.05;
const MAX_RANGE: f32 = 4.0;

/// 8m x 6m room with a box in one corner.
fn create_room() -> OccupancyGrid {
    let (width, height) = (160, 120);
    let mut cells = vec![0i8; width * height];
    for cx in 0..width {
        cells[cx] = 100;
        cells[cx + (height - 1) * width] = 100;
    }
    for cy in 0..height {
        cells[cy * width] = 100;
        cells[width - 1 + cy * width] = 100;
    }
    for cy in 80..100 {
        for cx in 110..140 {
            cells[cx + cy * width] = 100;
        }
    }
    OccupancyGrid::new(width, height, RESOLUTION, Point2D::new(-4.0, -3.0), cells)
        .expect("valid room grid")
}

/// March along each beam until it enters an occupied cell.
fn simulate_scan(grid: &OccupancyGrid, x: f32, y: f32, theta: f32) -> Vec<(f32, f32)> {
    let geometry = grid.geometry();
    (0..360)
        .map(|i| {
            let angle = theta + i as f32 / 360.0 * TAU;
            let mut range = 0.0;
            while range < MAX_RANGE {
                let px = x + range * angle.cos();
                let py = y + range * angle.sin();
                match geometry.world_to_cell(px, py) {
                    Some((cx, cy)) if grid.get(cx, cy).is_some_and(|v| v > 0) => break,
                    None => break,
                    _ => range += RESOLUTION / 2.0,
                }
            }
            (i as f32 / 360.0 * TAU, range)
        })
        .collect()
}

/// Project beam ranges from a pose into world endpoints.
fn endpoints(scan: &[(f32, f32)], x: f32, y: f32, theta: f32) -> (Vec<f32>, Vec<f32>) {
    scan.iter()
        .map(|&(bearing, range)| {
            let angle = theta + bearing;
            (x + range * angle.cos(), y + range * angle.sin())
        })
        .unzip()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let grid = create_room();
    let field = LikelihoodField::from_grid(&grid, FieldConfig::default()).expect("room has walls");

    let truth = (0.5, -0.5, 0.3);
    let scan = simulate_scan(&grid, truth.0, truth.1, truth.2);

    let candidates = [
        ("truth", truth),
        ("+10cm x", (truth.0 + 0.1, truth.1, truth.2)),
        ("+30cm y", (truth.0, truth.1 + 0.3, truth.2)),
        ("+0.2 rad", (truth.0, truth.1, truth.2 + 0.2)),
        ("far away", (-3.0, 2.0, 1.5)),
    ];

    println!("{:<10} {:>12} {:>8} {:>14}", "pose", "error", "oob", "likelihood");
    for (name, (x, y, theta)) in candidates {
        let (xs, ys) = endpoints(&scan, x, y, theta);
        let error = field.batch_error(&xs, &ys).expect("equal lengths");
        let likelihood = field.batch_likelihood(&xs, &ys).expect("equal lengths");
        println!(
            "{:<10} {:>12.3} {:>8} {:>14.6e}",
            name, error.total, error.out_of_bounds, likelihood
        );
    }
}
