//! Grayscale image export
//!
//! Writes grayscale buffers to PNG, either as single-channel data or expanded
//! to R = G = B, and derives the conventional output path for a source image.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::grayscale::GrayscaleImage;
use crate::models::OutputFormat;

/// Suffix appended to the source file stem
const OUTPUT_SUFFIX: &str = "_gray";

/// Output files are always PNG regardless of the source container
const OUTPUT_EXTENSION: &str = "png";

/// Export a grayscale image to a PNG file.
///
/// `Rgb8` expands every gray byte to three identical channels, matching the
/// historical output of this tool; `Gray8` writes the buffer as-is.
pub fn export_png<P: AsRef<Path>>(
    image: &GrayscaleImage,
    path: P,
    format: OutputFormat,
) -> Result<(), ExportError> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_depth(png::BitDepth::Eight);

    match format {
        OutputFormat::Gray8 => {
            encoder.set_color(png::ColorType::Grayscale);
            let mut png_writer = encoder.write_header()?;
            png_writer.write_image_data(image.pixels())?;
        }
        OutputFormat::Rgb8 => {
            encoder.set_color(png::ColorType::Rgb);
            let mut rgb = Vec::with_capacity(image.data_size() * 3);
            for &value in image.pixels() {
                rgb.extend_from_slice(&[value, value, value]);
            }
            let mut png_writer = encoder.write_header()?;
            png_writer.write_image_data(&rgb)?;
        }
    }

    Ok(())
}

/// Derive the output path for a grayscale image.
///
/// Strips directory components and the extension from the original path and
/// produces `<output_dir>/<stem>_gray.png`. Paths without a usable file stem
/// are rejected instead of silently truncated.
pub fn grayscale_output_path<P: AsRef<Path>>(
    original: P,
    output_dir: &Path,
) -> Result<PathBuf, ExportError> {
    let original = original.as_ref();
    let stem = original
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ExportError::InvalidOutputName(original.to_path_buf()))?;

    Ok(output_dir.join(format!("{}{}.{}", stem, OUTPUT_SUFFIX, OUTPUT_EXTENSION)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Output Path Tests
    // ========================================================================

    #[test]
    fn test_output_path_strips_directory_and_extension() {
        let path =
            grayscale_output_path("images/flowers.jpg", Path::new("grayscale_images")).unwrap();
        assert_eq!(path, PathBuf::from("grayscale_images/flowers_gray.png"));
    }

    #[test]
    fn test_output_path_without_extension() {
        let path = grayscale_output_path("scans/bear", Path::new("out")).unwrap();
        assert_eq!(path, PathBuf::from("out/bear_gray.png"));
    }

    #[test]
    fn test_output_path_bare_filename() {
        let path = grayscale_output_path("test.png", Path::new("out")).unwrap();
        assert_eq!(path, PathBuf::from("out/test_gray.png"));
    }

    #[test]
    fn test_output_path_rejects_empty_name() {
        let result = grayscale_output_path("", Path::new("out"));
        assert!(matches!(result, Err(ExportError::InvalidOutputName(_))));
    }

    // ========================================================================
    // PNG Export Tests
    // ========================================================================

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("grayify_export_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_export_gray8_roundtrip() {
        let gray = GrayscaleImage::from_pixels(2, 2, vec![0, 85, 170, 255]).unwrap();
        let path = temp_path("gray8.png");

        export_png(&gray, &path, OutputFormat::Gray8).unwrap();
        let reloaded = image::open(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let luma = reloaded.to_luma8();
        assert_eq!(luma.width(), 2);
        assert_eq!(luma.height(), 2);
        assert_eq!(luma.into_raw(), vec![0, 85, 170, 255]);
    }

    #[test]
    fn test_export_rgb8_expands_channels() {
        let gray = GrayscaleImage::from_pixels(2, 1, vec![7, 200]).unwrap();
        let path = temp_path("rgb8.png");

        export_png(&gray, &path, OutputFormat::Rgb8).unwrap();
        let reloaded = image::open(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let rgb = reloaded.to_rgb8();
        assert_eq!(rgb.width(), 2);
        assert_eq!(rgb.into_raw(), vec![7, 7, 7, 200, 200, 200]);
    }
}
