//! Image color analysis
//!
//! Classifies a decoded image's channel layout and detects whether a
//! multi-channel image is effectively monochrome (a grayscale image saved
//! in an RGB or RGBA container).

use crate::error::AnalysisError;
use crate::loader::ImageData;
use crate::models::{ColorClassification, ColorType, ImageAnalysis};

/// Per-channel tolerance when comparing R, G, B for equality.
/// Absorbs off-by-one compression artifacts in grayscale images saved as RGB.
const MONOCHROME_TOLERANCE: i16 = 1;

/// Classify an image's color composition.
///
/// Single-channel images are monochrome by definition and skip the pixel
/// scan. Channel counts outside {1, 3, 4} fail with `UnsupportedChannels`.
pub fn classify(image: &ImageData) -> Result<ColorClassification, AnalysisError> {
    validate_geometry(image)?;

    let color_type = ColorType::from_channels(image.channels);
    if color_type == ColorType::Unknown {
        return Err(AnalysisError::UnsupportedChannels {
            channels: image.channels,
        });
    }

    let is_monochrome = image.channels == 1 || is_monochrome_scan(image);

    Ok(ColorClassification {
        color_type,
        is_monochrome,
        has_transparency: image.channels == 4,
    })
}

/// Analyze an image: classification plus mirrored dimensions, for display.
pub fn analyze(image: &ImageData) -> Result<ImageAnalysis, AnalysisError> {
    let classification = classify(image)?;
    Ok(ImageAnalysis {
        width: image.width,
        height: image.height,
        color_type: classification.color_type,
        is_monochrome: classification.is_monochrome,
        has_transparency: classification.has_transparency,
    })
}

/// Reject malformed geometry before any pixel access.
pub(crate) fn validate_geometry(image: &ImageData) -> Result<(), AnalysisError> {
    if image.width == 0 || image.height == 0 {
        return Err(AnalysisError::InvalidSource(format!(
            "image has zero dimensions ({}x{})",
            image.width, image.height
        )));
    }

    let min_stride = image.width as usize * image.channels as usize;
    if image.row_stride < min_stride {
        return Err(AnalysisError::InvalidSource(format!(
            "row stride {} is smaller than {} bytes of pixel data per row",
            image.row_stride, min_stride
        )));
    }

    let required = (image.height as usize - 1) * image.row_stride + min_stride;
    if image.data.len() < required {
        return Err(AnalysisError::InvalidSource(format!(
            "buffer holds {} bytes, geometry requires at least {}",
            image.data.len(),
            required
        )));
    }

    Ok(())
}

/// Scan a 3- or 4-channel image for color content.
///
/// Visits pixels in row-major order using the declared row stride, so padded
/// rows are handled correctly. Stops at the first pixel whose channels
/// diverge beyond the tolerance; any fourth channel is ignored.
fn is_monochrome_scan(image: &ImageData) -> bool {
    let channels = image.channels as usize;
    for y in 0..image.height {
        for pixel in image.row(y).chunks_exact(channels) {
            let r = pixel[0] as i16;
            let g = pixel[1] as i16;
            let b = pixel[2] as i16;
            if (r - g).abs() > MONOCHROME_TOLERANCE
                || (g - b).abs() > MONOCHROME_TOLERANCE
                || (r - b).abs() > MONOCHROME_TOLERANCE
            {
                return false;
            }
        }
    }
    true
}
