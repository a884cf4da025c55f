//! Map loader for the ROS map_server format (YAML + PGM).
//!
//! ## File Format
//!
//! ```yaml
//! image: office.pgm
//! resolution: 0.05
//! origin: [-10.0, -10.0, 0.0]
//! occupied_thresh: 0.65
//! free_thresh: 0.196
//! negate: 0
//! ```
//!
//! Pixel occupancy is `p = (255 - pixel) / 255` (`pixel / 255` when
//! negated), so dark pixels are obstacles. Image row 0 is the top of the
//! map; grid row 0 is the origin row, so rows are flipped on load.

use std::fs;
use std::path::Path;

use image::GrayImage;
use serde::Deserialize;

use crate::core::types::Point2D;
use crate::error::{FieldError, Result};
use crate::mapping::OccupancyGrid;

const DEFAULT_OCCUPIED_THRESH: f32 = 0.65;
const DEFAULT_FREE_THRESH: f32 = 0.196;

/// Occupancy value written for obstacle pixels.
const OCCUPIED: i8 = 100;
const FREE: i8 = 0;
const UNKNOWN: i8 = -1;

/// How pixel values become occupancy values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapMode {
    /// Occupied (100), free (0) or unknown (-1).
    #[default]
    Trinary,
    /// Like trinary, but values between the thresholds are scaled to 0..99.
    Scale,
    /// Pixel value used as-is; values above 100 are unknown.
    Raw,
}

/// Map metadata from the YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct MapMetadata {
    /// Image filename (relative to the YAML file).
    pub image: String,

    /// Map resolution in meters per pixel.
    pub resolution: f32,

    /// Origin of map [x, y, yaw] - world coordinates of bottom-left pixel.
    ///
    /// Yaw is not supported and is ignored.
    pub origin: [f32; 3],

    /// Occupancy probability above which a pixel is occupied.
    #[serde(default = "default_occupied_thresh")]
    pub occupied_thresh: f32,

    /// Occupancy probability below which a pixel is free.
    #[serde(default = "default_free_thresh")]
    pub free_thresh: f32,

    /// Non-zero inverts the pixel interpretation (white = occupied).
    #[serde(default)]
    pub negate: i32,

    #[serde(default)]
    pub mode: MapMode,
}

fn default_occupied_thresh() -> f32 {
    DEFAULT_OCCUPIED_THRESH
}

fn default_free_thresh() -> f32 {
    DEFAULT_FREE_THRESH
}

impl MapMetadata {
    fn validate(&self) -> Result<()> {
        if !(self.occupied_thresh > 0.0 && self.occupied_thresh <= 1.0) {
            return Err(FieldError::MapFormat(format!(
                "occupied_thresh must be in (0, 1], got {}",
                self.occupied_thresh
            )));
        }
        if !(self.free_thresh >= 0.0 && self.free_thresh < self.occupied_thresh) {
            return Err(FieldError::MapFormat(format!(
                "free_thresh must be in [0, occupied_thresh), got {}",
                self.free_thresh
            )));
        }
        Ok(())
    }

    /// Occupancy value for one pixel.
    fn occupancy(&self, pixel: u8) -> i8 {
        if self.mode == MapMode::Raw {
            return if pixel <= 100 { pixel as i8 } else { UNKNOWN };
        }

        let p = if self.negate != 0 {
            f32::from(pixel) / 255.0
        } else {
            f32::from(255 - pixel) / 255.0
        };

        if p > self.occupied_thresh {
            OCCUPIED
        } else if p < self.free_thresh {
            FREE
        } else if self.mode == MapMode::Scale {
            let ratio = (p - self.free_thresh) / (self.occupied_thresh - self.free_thresh);
            (99.0 * ratio).round() as i8
        } else {
            UNKNOWN
        }
    }
}

/// Read and validate the YAML metadata.
pub fn read_metadata<P: AsRef<Path>>(yaml_path: P) -> Result<MapMetadata> {
    let contents = fs::read_to_string(yaml_path.as_ref())?;
    let metadata: MapMetadata = serde_yaml::from_str(&contents)?;
    metadata.validate()?;
    Ok(metadata)
}

/// Convert a grayscale map image into an occupancy grid.
pub fn grid_from_image(img: &GrayImage, metadata: &MapMetadata) -> Result<OccupancyGrid> {
    metadata.validate()?;

    let (width, height) = (img.width() as usize, img.height() as usize);
    let mut cells = vec![UNKNOWN; width * height];

    // Image row 0 is the top of the map
    for (px, py, pixel) in img.enumerate_pixels() {
        let cx = px as usize;
        let cy = height - 1 - py as usize;
        cells[cy * width + cx] = metadata.occupancy(pixel.0[0]);
    }

    let [ox, oy, yaw] = metadata.origin;
    if yaw != 0.0 {
        log::warn!("Map origin yaw {:.3} rad is ignored", yaw);
    }

    OccupancyGrid::new(width, height, metadata.resolution, Point2D::new(ox, oy), cells)
}

/// Load a map from ROS-standard YAML + image files.
pub fn load_map<P: AsRef<Path>>(yaml_path: P) -> Result<OccupancyGrid> {
    let yaml_path = yaml_path.as_ref();
    let metadata = read_metadata(yaml_path)?;

    let yaml_dir = yaml_path.parent().unwrap_or(Path::new("."));
    let image_path = yaml_dir.join(&metadata.image);
    let img = image::open(&image_path)
        .map_err(|e| {
            FieldError::MapFormat(format!(
                "Failed to load map image {}: {}",
                image_path.display(),
                e
            ))
        })?
        .into_luma8();

    let grid = grid_from_image(&img, &metadata)?;

    let unknown = grid.count_unknown();
    log::info!(
        "Loaded map {} ({}x{} @ {}m, {} occupied, {} unknown)",
        yaml_path.display(),
        grid.width(),
        grid.height(),
        grid.resolution(),
        grid.count_occupied(0),
        unknown
    );
    if unknown * 2 > grid.geometry().len() {
        log::warn!("More than half of the map is unknown");
    }

    Ok(grid)
}
