//! Grayscale conversion
//!
//! Reduces 3- and 4-channel images to a single luminance channel and copies
//! single-channel images through untouched.

use crate::analysis;
use crate::error::AnalysisError;
use crate::loader::ImageData;
use crate::models::ColorClassification;

/// Luminance weights. They sum to exactly 1.0, so a gray input (R = G = B)
/// maps to itself.
const LUMA_R: f64 = 0.2125;
const LUMA_G: f64 = 0.7154;
const LUMA_B: f64 = 0.0721;

/// Owned single-channel luminance buffer.
///
/// The pixel buffer is always exactly `width * height` bytes and never
/// aliases the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    source_filename: Option<String>,
}

impl GrayscaleImage {
    /// Build from a prepopulated buffer; length must equal `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, AnalysisError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(AnalysisError::InvalidSource(format!(
                "grayscale buffer holds {} bytes, expected {}",
                pixels.len(),
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
            source_filename: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intensity bytes, row-major, one byte per pixel
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Total bytes held by the buffer
    pub fn data_size(&self) -> usize {
        self.pixels.len()
    }

    /// Path of the image this buffer was derived from, if recorded
    pub fn source_filename(&self) -> Option<&str> {
        self.source_filename.as_deref()
    }

    /// Intensity at (x, y), or `None` when the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Overwrite the intensity at (x, y). Returns false when the coordinates
    /// are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: u8) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[y as usize * self.width as usize + x as usize] = value;
        true
    }
}

/// Convert an image to a grayscale buffer.
///
/// Single-channel sources are copied byte for byte. For 3- and 4-channel
/// sources each pixel becomes `Y = 0.2125*R + 0.7154*G + 0.0721*B`, rounded
/// half-up; the alpha channel, if present, is ignored. Channel counts outside
/// {1, 3, 4} reject the whole operation before any pixel is converted.
pub fn to_grayscale(image: &ImageData) -> Result<GrayscaleImage, AnalysisError> {
    analysis::validate_geometry(image)?;
    let channels = image.channels as usize;
    if !matches!(channels, 1 | 3 | 4) {
        return Err(AnalysisError::UnsupportedChannels {
            channels: image.channels,
        });
    }

    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(image.pixel_count())
        .map_err(|_| AnalysisError::AllocationFailed)?;

    for y in 0..image.height {
        let row = image.row(y);
        if channels == 1 {
            pixels.extend_from_slice(row);
        } else {
            for pixel in row.chunks_exact(channels) {
                let gray = LUMA_R * pixel[0] as f64
                    + LUMA_G * pixel[1] as f64
                    + LUMA_B * pixel[2] as f64;
                // Round half-up: floor(gray + 0.5), matching the reference
                // conversion bit for bit
                pixels.push((gray + 0.5) as u8);
            }
        }
    }

    Ok(GrayscaleImage {
        width: image.width,
        height: image.height,
        pixels,
        source_filename: image.filename.clone(),
    })
}

/// Produce the grayscale version of an image along with its classification.
///
/// Already-grayscale and color sources both go through the same conversion;
/// the classification only drives the caller's messaging, never the numeric
/// result.
pub fn get_grayscale(
    image: &ImageData,
) -> Result<(GrayscaleImage, ColorClassification), AnalysisError> {
    let classification = analysis::classify(image)?;
    let grayscale = to_grayscale(image)?;
    Ok((grayscale, classification))
}
