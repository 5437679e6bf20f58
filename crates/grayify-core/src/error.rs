//! Error types for the grayify pipeline
//!
//! One enum per pipeline stage so callers can match on failure kinds instead
//! of parsing message strings. All errors are terminal for the operation that
//! produced them; no partial results are returned.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the in-memory analysis and conversion stages
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// Channel count outside {1, 3, 4}
    #[error("unsupported channel count: {channels} (expected 1, 3, or 4)")]
    UnsupportedChannels { channels: u8 },

    /// Absent source, zero dimensions, or geometry inconsistent with the buffer
    #[error("invalid source image: {0}")]
    InvalidSource(String),

    /// The output buffer could not be allocated
    #[error("failed to allocate grayscale buffer")]
    AllocationFailed,

    /// Statistics requested over a zero-pixel buffer
    #[error("grayscale buffer contains no pixels")]
    EmptyBuffer,
}

/// Errors from decoding input images
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found or not accessible: {0}")]
    FileNotFound(PathBuf),

    #[error("unsupported image format: {0:?}")]
    UnsupportedExtension(String),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from encoding and writing grayscale output
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot derive an output name from {0:?}")]
    InvalidOutputName(PathBuf),

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Compatibility with the CLI's string-error command signatures.
impl From<AnalysisError> for String {
    fn from(error: AnalysisError) -> Self {
        error.to_string()
    }
}

impl From<LoadError> for String {
    fn from(error: LoadError) -> Self {
        error.to_string()
    }
}

impl From<ExportError> for String {
    fn from(error: ExportError) -> Self {
        error.to_string()
    }
}
