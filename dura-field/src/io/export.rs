//! Distance field rendering.
//!
//! Writes the field as an 8-bit grayscale image: obstacles black, the
//! farthest cell white. Rows are flipped so the image reads like the map.

use std::path::Path;

use image::GrayImage;

use crate::error::{FieldError, Result};
use crate::field::DistanceField;

/// Render the field to a grayscale image.
pub fn distance_image(field: &DistanceField) -> Result<GrayImage> {
    let (width, height) = (field.width(), field.height());
    let max = field.stats().max_distance;
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };

    let mut pixels = Vec::with_capacity(width * height);
    for cy in (0..height).rev() {
        for cx in 0..width {
            let d = field.distance_at_cell(cx, cy).unwrap_or(max);
            pixels.push((d * scale).round().clamp(0.0, 255.0) as u8);
        }
    }

    let w = u32::try_from(width)
        .map_err(|_| FieldError::InvalidGrid(format!("width {} too large for image", width)))?;
    let h = u32::try_from(height)
        .map_err(|_| FieldError::InvalidGrid(format!("height {} too large for image", height)))?;
    GrayImage::from_raw(w, h, pixels)
        .ok_or_else(|| FieldError::InvalidGrid("pixel buffer size mismatch".to_string()))
}

/// Save the rendered field. Format follows the file extension (`.png`, `.pgm`).
pub fn save_distance_image<P: AsRef<Path>>(field: &DistanceField, path: P) -> Result<()> {
    let path = path.as_ref();
    distance_image(field)?.save(path)?;
    log::info!("Saved distance image to {}", path.display());
    Ok(())
}
