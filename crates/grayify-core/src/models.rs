//! Data models for Grayify
//!
//! Core data structures for color classification, intensity statistics,
//! and export options.

use serde::{Deserialize, Serialize};

/// Channel-based color type of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    /// Single-channel intensity data
    Grayscale,

    /// Three interleaved channels, no alpha
    Rgb,

    /// Four interleaved channels, last one is alpha
    Rgba,

    /// Any other channel layout; rejected by classification
    Unknown,
}

impl ColorType {
    /// Map a raw channel count onto a color type.
    pub fn from_channels(channels: u8) -> Self {
        match channels {
            1 => Self::Grayscale,
            3 => Self::Rgb,
            4 => Self::Rgba,
            _ => Self::Unknown,
        }
    }

    /// Get the color type name as a string
    pub fn as_str(&self) -> &str {
        match self {
            Self::Grayscale => "Grayscale (1 channel)",
            Self::Rgb => "RGB (3 channels)",
            Self::Rgba => "RGBA (4 channels)",
            Self::Unknown => "Unknown",
        }
    }
}

/// Result of classifying an image's color composition.
///
/// Produced per `analysis::classify` call; plain value with no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorClassification {
    /// Channel-based color type
    pub color_type: ColorType,

    /// True when every pixel's R, G, B are equal within tolerance 1,
    /// or the image has a single channel
    pub is_monochrome: bool,

    /// True iff the image carries an alpha channel
    pub has_transparency: bool,
}

/// Full analysis report for a decoded image, for display
#[derive(Debug, Clone, Copy)]
pub struct ImageAnalysis {
    pub width: u32,
    pub height: u32,
    pub color_type: ColorType,
    pub is_monochrome: bool,
    pub has_transparency: bool,
}

/// Intensity statistics over a grayscale buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityStats {
    /// Width of the measured buffer
    pub width: u32,

    /// Height of the measured buffer
    pub height: u32,

    /// Always `Grayscale` once computed
    pub color_type: ColorType,

    /// Mean intensity (floating-point division, not integer)
    pub mean: f64,

    /// Lowest intensity seen; starts from the 255 sentinel
    pub min: u8,

    /// Highest intensity seen; starts from the 0 sentinel
    pub max: u8,
}

impl IntensityStats {
    /// Intensity spread (max - min)
    pub fn contrast(&self) -> u8 {
        self.max.saturating_sub(self.min)
    }
}

/// Pixel layout for exported PNG files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Single-channel 8-bit grayscale
    Gray8,

    /// Gray value expanded to R = G = B
    Rgb8,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Rgb8
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gray8" | "gray" | "grayscale" => Ok(Self::Gray8),
            "rgb8" | "rgb" => Ok(Self::Rgb8),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_type_from_channels() {
        assert_eq!(ColorType::from_channels(1), ColorType::Grayscale);
        assert_eq!(ColorType::from_channels(3), ColorType::Rgb);
        assert_eq!(ColorType::from_channels(4), ColorType::Rgba);
        assert_eq!(ColorType::from_channels(2), ColorType::Unknown);
        assert_eq!(ColorType::from_channels(5), ColorType::Unknown);
        assert_eq!(ColorType::from_channels(0), ColorType::Unknown);
    }

    #[test]
    fn test_color_type_strings_name_channel_count() {
        assert_eq!(ColorType::Grayscale.as_str(), "Grayscale (1 channel)");
        assert_eq!(ColorType::Rgb.as_str(), "RGB (3 channels)");
        assert_eq!(ColorType::Rgba.as_str(), "RGBA (4 channels)");
        assert_eq!(ColorType::Unknown.as_str(), "Unknown");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("gray8".parse::<OutputFormat>(), Ok(OutputFormat::Gray8));
        assert_eq!("RGB".parse::<OutputFormat>(), Ok(OutputFormat::Rgb8));
        assert!("tiff16".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_contrast_spread() {
        let stats = IntensityStats {
            width: 2,
            height: 1,
            color_type: ColorType::Grayscale,
            mean: 130.0,
            min: 10,
            max: 250,
        };
        assert_eq!(stats.contrast(), 240);
    }
}
