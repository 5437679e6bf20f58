//! Intensity statistics
//!
//! Single linear pass over a grayscale buffer accumulating sum, running min,
//! and running max.

use crate::error::AnalysisError;
use crate::grayscale::GrayscaleImage;
use crate::models::{ColorType, IntensityStats};

/// Compute min, max, and mean intensity for a grayscale image.
///
/// Min and max start from the 255/0 sentinels, so a uniform buffer of value V
/// yields min = max = V. A zero-pixel buffer is a hard `EmptyBuffer` error;
/// callers that prefer the sentinel values can match on it.
pub fn compute_stats(image: &GrayscaleImage) -> Result<IntensityStats, AnalysisError> {
    let pixels = image.pixels();
    if pixels.is_empty() {
        return Err(AnalysisError::EmptyBuffer);
    }

    let mut min: u8 = 255;
    let mut max: u8 = 0;
    let mut sum: u64 = 0;

    for &value in pixels {
        sum += value as u64;
        if value < min {
            min = value;
        }
        if value > max {
            max = value;
        }
    }

    Ok(IntensityStats {
        width: image.width(),
        height: image.height(),
        color_type: ColorType::Grayscale,
        mean: sum as f64 / pixels.len() as f64,
        min,
        max,
    })
}
