//! Image loading
//!
//! Decodes raster images into raw 8-bit pixel buffers while preserving the
//! source channel layout. Decoding itself is delegated to the `image` crate;
//! this module only shapes the result for the analysis pipeline.

use std::path::Path;

use crate::error::{AnalysisError, LoadError};

/// File extensions accepted by the loader, lowercase
const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff"];

/// Decoded image data
///
/// Pixel bytes are row-major and interleaved. `row_stride` is honored by all
/// scans, so buffers with padded rows stay correct.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Number of interleaved channels (1 = gray, 3 = RGB, 4 = RGBA).
    /// Other counts are representable but rejected by classification.
    pub channels: u8,

    /// Bytes per row; may exceed `width * channels` when rows are padded
    pub row_stride: usize,

    /// Row-major interleaved pixel bytes
    pub data: Vec<u8>,

    /// Originating file path, for output naming and diagnostics
    pub filename: Option<String>,
}

impl ImageData {
    /// Build an image from a tightly packed buffer (no row padding).
    pub fn from_packed(
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<u8>,
    ) -> Result<Self, AnalysisError> {
        let row_stride = width as usize * channels as usize;
        Self::from_raw(width, height, channels, row_stride, data)
    }

    /// Build an image with an explicit row stride.
    ///
    /// The buffer must cover every row up to `width * channels` bytes; padding
    /// after the last row's pixel data is not required.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        row_stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, AnalysisError> {
        let min_stride = width as usize * channels as usize;
        if row_stride < min_stride {
            return Err(AnalysisError::InvalidSource(format!(
                "row stride {} is smaller than {} bytes of pixel data per row",
                row_stride, min_stride
            )));
        }
        if height > 0 {
            let required = (height as usize - 1) * row_stride + min_stride;
            if data.len() < required {
                return Err(AnalysisError::InvalidSource(format!(
                    "buffer holds {} bytes, geometry requires at least {}",
                    data.len(),
                    required
                )));
            }
        }
        Ok(Self {
            width,
            height,
            channels,
            row_stride,
            data,
            filename: None,
        })
    }

    /// Attach the originating file path.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Total pixel count
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row `y` as a byte slice covering exactly the pixel data, padding excluded
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.row_stride;
        &self.data[start..start + self.width as usize * self.channels as usize]
    }
}

/// Explicit decoder handle owned by the caller.
///
/// The loader carries no hidden process-wide state: create one, use it for
/// any number of loads, and drop it when done.
#[derive(Debug, Clone)]
pub struct Loader {
    extensions: &'static [&'static str],
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    pub fn new() -> Self {
        Self {
            extensions: SUPPORTED_EXTENSIONS,
        }
    }

    /// Whether a file extension (without dot, any case) is accepted.
    pub fn supports_extension(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.extensions.contains(&extension.as_str())
    }

    /// Human-readable list of accepted formats.
    pub fn supported_formats(&self) -> String {
        format!(
            "Supported formats: {}",
            self.extensions
                .iter()
                .map(|e| e.to_uppercase())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }

    /// Load an image from a file.
    ///
    /// The native channel count is preserved where the source is already
    /// 8-bit; higher bit depths are normalized to 8-bit RGB or RGBA.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<ImageData, LoadError> {
        let path = path.as_ref();

        if !file_exists(path) {
            return Err(LoadError::FileNotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if !self.supports_extension(&extension) {
            return Err(LoadError::UnsupportedExtension(extension));
        }

        let decoded = image::open(path)?;
        let (width, height) = (decoded.width(), decoded.height());

        let (channels, data) = match decoded {
            image::DynamicImage::ImageLuma8(buf) => (1u8, buf.into_raw()),
            // Kept at 2 channels so classification reports it as unsupported,
            // matching the contract for layouts outside {1, 3, 4}
            image::DynamicImage::ImageLumaA8(buf) => (2u8, buf.into_raw()),
            image::DynamicImage::ImageRgb8(buf) => (3u8, buf.into_raw()),
            image::DynamicImage::ImageRgba8(buf) => (4u8, buf.into_raw()),
            other => {
                if other.color().has_alpha() {
                    (4u8, other.to_rgba8().into_raw())
                } else {
                    (3u8, other.to_rgb8().into_raw())
                }
            }
        };

        Ok(ImageData {
            width,
            height,
            channels,
            row_stride: width as usize * channels as usize,
            data,
            filename: Some(path.display().to_string()),
        })
    }
}

/// Check if a file exists and is readable.
pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    std::fs::File::open(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_packed_accepts_exact_buffer() {
        let image = ImageData::from_packed(2, 2, 3, vec![0; 12]).unwrap();
        assert_eq!(image.row_stride, 6);
        assert_eq!(image.pixel_count(), 4);
    }

    #[test]
    fn test_from_packed_rejects_short_buffer() {
        let result = ImageData::from_packed(2, 2, 3, vec![0; 11]);
        assert!(matches!(result, Err(AnalysisError::InvalidSource(_))));
    }

    #[test]
    fn test_from_raw_rejects_stride_below_row_width() {
        let result = ImageData::from_raw(4, 1, 3, 10, vec![0; 12]);
        assert!(matches!(result, Err(AnalysisError::InvalidSource(_))));
    }

    #[test]
    fn test_from_raw_allows_unpadded_last_row() {
        // 2 rows, stride 8, but the buffer stops after the last row's pixels
        let image = ImageData::from_raw(2, 2, 3, 8, vec![0; 8 + 6]).unwrap();
        assert_eq!(image.row(1).len(), 6);
    }

    #[test]
    fn test_row_skips_padding() {
        // Stride 8 with 2 padding bytes per row marked 0xEE
        let data = vec![
            1, 2, 3, 4, 5, 6, 0xEE, 0xEE, //
            7, 8, 9, 10, 11, 12, 0xEE, 0xEE,
        ];
        let image = ImageData::from_raw(2, 2, 3, 8, data).unwrap();
        assert_eq!(image.row(0), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(image.row(1), &[7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_supports_extension_is_case_insensitive() {
        let loader = Loader::new();
        assert!(loader.supports_extension("PNG"));
        assert!(loader.supports_extension("jpeg"));
        assert!(loader.supports_extension("TiF"));
        assert!(!loader.supports_extension("webp"));
        assert!(!loader.supports_extension(""));
    }

    #[test]
    fn test_supported_formats_lists_everything() {
        let formats = Loader::new().supported_formats();
        assert_eq!(
            formats,
            "Supported formats: PNG, JPG, JPEG, BMP, GIF, TIF, TIFF"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let loader = Loader::new();
        let result = loader.load("definitely/not/here.png");
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn test_load_rejects_unsupported_extension() {
        let path = std::env::temp_dir().join(format!("grayify_loader_{}.txt", std::process::id()));
        std::fs::write(&path, b"not an image").unwrap();

        let loader = Loader::new();
        let result = loader.load(&path);
        std::fs::remove_file(&path).ok();

        match result {
            Err(LoadError::UnsupportedExtension(ext)) => assert_eq!(ext, "txt"),
            other => panic!("Expected UnsupportedExtension, got {:?}", other),
        }
    }

    #[test]
    fn test_load_roundtrip_preserves_rgb_bytes() {
        let path = std::env::temp_dir().join(format!("grayify_loader_{}.png", std::process::id()));
        let pixels: Vec<u8> = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30];
        write_rgb_png(&path, 2, 2, &pixels);

        let loader = Loader::new();
        let image = loader.load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(image.width, 2);
        assert_eq!(image.height, 2);
        assert_eq!(image.channels, 3);
        assert_eq!(image.row_stride, 6);
        assert_eq!(image.data, pixels);
        assert!(image.filename.is_some());
    }

    fn write_rgb_png(path: &Path, width: u32, height: u32, pixels: &[u8]) {
        let file = std::fs::File::create(path).unwrap();
        let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(pixels).unwrap();
    }
}
