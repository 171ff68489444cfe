//! # Image Preparation Library
//!
//! Prepares images for the web: trims transparent padding, rasterizes SVG,
//! resamples to a requested size and re-encodes as PNG, JPEG or WebP.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//! - `codec`: Decoding raster/vector inputs and encoding PNG, JPEG and WebP
//! - `core`: Transparent-bounds cropping and SVG rasterization
//! - `processing`: By-value processing pipeline (crop, resample)
//! - `config`: Configuration management and validation
//! - `processor`: Orchestration of the optimize and scale operations
//!
//! Resampling itself lives in the `imgprep-scale` workspace crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use imgprep::{OptimizeOptions, optimize_image};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = OptimizeOptions {
//!     input: "logo.svg".into(),
//!     output: "logo.webp".into(),
//!     quality: 80.0,
//!     svg_scale: 2.0,
//! };
//!
//! let report = optimize_image(&options)?;
//! println!("{}x{}, {} bytes", report.width, report.height, report.bytes);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tracing::info;

pub mod codec;
pub mod config;
pub mod core;
pub mod error;
pub mod processing;
pub mod processor;

/// Re-export error types for convenience
pub use error::{PrepError, PrepResult, Stage};

/// Re-export commonly used types from the resampling crate
pub use imgprep_scale::presets::{ResampleAlgorithm, ScaleSpec, Size};

pub use codec::{InputKind, OutputFormat};
pub use processor::{Processor, Report};

use crate::core::vector::clamp_supersample;

/// Options for the optimize operation: crop transparent padding, write WebP.
///
/// # Examples
///
/// ```rust
/// use imgprep::OptimizeOptions;
///
/// let options = OptimizeOptions {
///     input: "icon.png".into(),
///     output: "icon.webp".into(),
///     quality: 75.0,
///     svg_scale: 2.0,
/// };
/// assert_eq!(options.quality, 75.0);
/// ```
#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// Raster or SVG input file.
    pub input: PathBuf,

    /// Output file. Written as lossy WebP regardless of its extension.
    pub output: PathBuf,

    /// WebP quality, 0-100.
    pub quality: f32,

    /// Supersample factor for SVG input, clamped to `[1, 4]`.
    pub svg_scale: f32,
}

/// Options for the scale operation.
#[derive(Debug, Clone)]
pub struct ScaleOptions {
    pub input: PathBuf,

    /// Output file; its extension (.png, .jpg, .jpeg, .webp) selects the encoder.
    pub output: PathBuf,

    /// How the target size is derived from the input size.
    pub spec: ScaleSpec,

    /// Resampling filter.
    pub algorithm: ResampleAlgorithm,

    /// Encoder quality, 0-100. Ignored for PNG.
    pub quality: f32,

    /// Supersample factor for SVG input, clamped to `[1, 4]`.
    pub svg_scale: f32,
}

/// Crop transparent padding from an image and save it as WebP.
///
/// # Errors
///
/// Returns an error if the input cannot be read or decoded, the SVG cannot
/// be rendered, or the output cannot be encoded or written.
///
/// # Performance Characteristics
///
/// **Time complexity**: O(W×H) for the bounds scan, plus the cost of
/// rendering `svg_scale²` times as many pixels for vector input.
pub fn optimize_image(options: &OptimizeOptions) -> PrepResult<Report> {
    info!(
        input = %options.input.display(),
        output = %options.output.display(),
        quality = options.quality,
        "optimizing image"
    );
    Processor::new(clamp_supersample(options.svg_scale)).optimize(options)
}

/// Resample an image and save it in the format its output extension names.
///
/// # Errors
///
/// Returns an error if the output extension is not supported (checked before
/// the input is read), the input cannot be read or decoded, resampling fails,
/// or the output cannot be encoded or written.
pub fn scale_image(options: &ScaleOptions) -> PrepResult<Report> {
    info!(
        input = %options.input.display(),
        output = %options.output.display(),
        algorithm = %options.algorithm,
        "scaling image"
    );
    Processor::new(clamp_supersample(options.svg_scale)).scale(options)
}
