//! Likelihood shaping functions.
//!
//! Converts an aggregated distance error into a likelihood-like score.

use std::f32::consts::FRAC_2_PI;

/// Probability density of a half-normal distribution.
///
/// The half-normal is the non-negative half of a zero-mean normal with
/// standard deviation `scale`:
///
/// ```text
/// pdf(x) = sqrt(2/π) / scale * exp(-x² / (2·scale²))    for x >= 0
/// pdf(x) = 0                                            for x <  0
/// ```
///
/// Smaller `x` (a closer fit) gives a higher density. NaN propagates.
///
/// # Example
/// ```
/// use dura_field::core::math::half_normal_pdf;
///
/// let peak = half_normal_pdf(0.0, 100.0);
/// assert!((peak - 0.007_978_846).abs() < 1e-8);
/// assert!(half_normal_pdf(50.0, 100.0) < peak);
/// assert_eq!(half_normal_pdf(-1.0, 100.0), 0.0);
/// ```
#[inline]
pub fn half_normal_pdf(x: f32, scale: f32) -> f32 {
    if x < 0.0 {
        return 0.0;
    }
    let z = x / scale;
    FRAC_2_PI.sqrt() / scale * (-0.5 * z * z).exp()
}

/// Natural log of [`half_normal_pdf`].
///
/// Stays finite for large `x`, where the density underflows to 0.
#[inline]
pub fn half_normal_log_pdf(x: f32, scale: f32) -> f32 {
    if x < 0.0 {
        return f32::NEG_INFINITY;
    }
    let z = x / scale;
    0.5 * FRAC_2_PI.ln() - scale.ln() - 0.5 * z * z
}
