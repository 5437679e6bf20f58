//! Grayify Core Library
//!
//! Core functionality for raster image color analysis and grayscale conversion.

pub mod analysis;
pub mod config;
pub mod error;
pub mod exporters;
pub mod grayscale;
pub mod loader;
pub mod models;
pub mod stats;

// Re-export commonly used types
pub use error::{AnalysisError, ExportError, LoadError};
pub use grayscale::GrayscaleImage;
pub use loader::{ImageData, Loader};
pub use models::{ColorClassification, ColorType, ImageAnalysis, IntensityStats, OutputFormat};
