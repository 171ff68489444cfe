//! # Configuration Module
//!
//! Caller-facing configuration for the two operations. It is the common
//! interface between the command line and the library: loose values go in,
//! validated [`OptimizeOptions`] / [`ScaleOptions`] come out.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Range | Default | Description |
//! |-----------|------|-------|---------|-------------|
//! | `quality` | `f32` | 0-100 | 80 (optimize), 90 (scale) | Encoder quality |
//! | `svg_scale` | `f32` | clamped to 1-4 | 2 | Supersample factor for SVG input |
//! | `factor` | `Option<f64>` | > 0 | none | Uniform scale factor |
//! | `width` / `height` | `Option<u32>` | > 0 | none | Target dimensions |
//! | `algorithm` | `String` | nearest, bilinear, bicubic, lanczos | lanczos | Resampling filter |
//!
//! All validation happens here, before any file is opened.
//!
//! ## Examples
//!
//! ```rust
//! use imgprep::config::config::ScaleConfig;
//!
//! let config = ScaleConfig {
//!     input: "logo.png".into(),
//!     output: "logo@2x.png".into(),
//!     factor: Some(2.0),
//!     ..ScaleConfig::default()
//! };
//! assert!(config.to_scale_options().is_ok());
//!
//! let conflicting = ScaleConfig { width: Some(100), ..config };
//! assert!(conflicting.to_scale_options().is_err());
//! ```

use std::path::PathBuf;

use imgprep_scale::presets::{ResampleAlgorithm, ScaleSpec};

pub use crate::codec::format::with_webp_extension;
use crate::codec::OutputFormat;
use crate::core::vector::{DEFAULT_SUPERSAMPLE, clamp_supersample};
use crate::error::{PrepError, PrepResult};
use crate::{OptimizeOptions, ScaleOptions};

pub const DEFAULT_OPTIMIZE_QUALITY: f32 = 80.0;
pub const DEFAULT_SCALE_QUALITY: f32 = 90.0;

/// Clamp an SVG supersample factor to `[1, 4]`; NaN becomes 1.
pub fn clamp_svg_scale(scale: f32) -> f32 {
    clamp_supersample(scale)
}

fn validate_quality(quality: f32) -> PrepResult<()> {
    if !(0.0..=100.0).contains(&quality) {
        return Err(PrepError::invalid_parameters(
            "quality",
            format!("must be between 0 and 100 (got {})", quality),
        ));
    }
    Ok(())
}

/// Configuration for the optimize operation.
#[derive(Debug, Clone)]
pub struct OptimizeConfig {
    /// Input image (raster or SVG).
    pub input: PathBuf,

    /// Output path. Always written as WebP; callers rewrite the extension
    /// with [`crate::codec::format::with_webp_extension`] first.
    pub output: PathBuf,

    /// WebP quality (0-100).
    pub quality: f32,

    /// SVG supersample factor. Out-of-range values are clamped, not rejected.
    pub svg_scale: f32,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            quality: DEFAULT_OPTIMIZE_QUALITY,
            svg_scale: DEFAULT_SUPERSAMPLE,
        }
    }
}

impl OptimizeConfig {
    pub fn validate(&self) -> PrepResult<()> {
        validate_quality(self.quality)
    }

    /// Validate and convert to library options.
    pub fn to_optimize_options(&self) -> PrepResult<OptimizeOptions> {
        self.validate()?;
        Ok(OptimizeOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            quality: self.quality,
            svg_scale: clamp_svg_scale(self.svg_scale),
        })
    }
}

/// Configuration for the scale operation.
#[derive(Debug, Clone)]
pub struct ScaleConfig {
    pub input: PathBuf,

    /// Output path; its extension picks the encoder (.png, .jpg, .jpeg, .webp).
    pub output: PathBuf,

    /// Uniform scale factor. Mutually exclusive with `width`/`height`.
    pub factor: Option<f64>,

    /// Target width; height follows the aspect ratio unless also given.
    pub width: Option<u32>,

    /// Target height; width follows the aspect ratio unless also given.
    pub height: Option<u32>,

    /// Resampling algorithm name.
    pub algorithm: String,

    /// Output quality (0-100). JPEG truncates it to an integer; PNG ignores it.
    pub quality: f32,

    pub svg_scale: f32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            factor: None,
            width: None,
            height: None,
            algorithm: ResampleAlgorithm::default().to_string(),
            quality: DEFAULT_SCALE_QUALITY,
            svg_scale: DEFAULT_SUPERSAMPLE,
        }
    }
}

impl ScaleConfig {
    /// Build the scale spec from the mutually exclusive sizing fields.
    pub fn scale_spec(&self) -> PrepResult<ScaleSpec> {
        Ok(ScaleSpec::from_options(self.factor, self.width, self.height)?)
    }

    pub fn algorithm(&self) -> PrepResult<ResampleAlgorithm> {
        Ok(self.algorithm.parse::<ResampleAlgorithm>()?)
    }

    pub fn validate(&self) -> PrepResult<()> {
        self.to_scale_options().map(|_| ())
    }

    /// Validate and convert to library options.
    ///
    /// Checks the sizing options first, then the algorithm, quality and
    /// output extension.
    pub fn to_scale_options(&self) -> PrepResult<ScaleOptions> {
        let spec = self.scale_spec()?;
        let algorithm = self.algorithm()?;
        validate_quality(self.quality)?;
        OutputFormat::from_path(&self.output)?;
        Ok(ScaleOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            spec,
            algorithm,
            quality: self.quality,
            svg_scale: clamp_svg_scale(self.svg_scale),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgprep_scale::presets::Size;

    fn scale_config() -> ScaleConfig {
        ScaleConfig {
            input: "in.png".into(),
            output: "out.png".into(),
            factor: Some(0.5),
            ..ScaleConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = OptimizeConfig::default();
        assert_eq!(config.quality, 80.0);
        assert_eq!(config.svg_scale, 2.0);

        let config = ScaleConfig::default();
        assert_eq!(config.quality, 90.0);
        assert_eq!(config.algorithm, "lanczos");
        assert_eq!(config.svg_scale, 2.0);
    }

    #[test]
    fn test_optimize_validation() {
        let mut config = OptimizeConfig::default();
        assert!(config.validate().is_ok());

        config.quality = 101.0;
        assert!(config.validate().is_err());
        config.quality = f32::NAN;
        assert!(config.validate().is_err());
        config.quality = 0.0;
        assert!(config.validate().is_ok());

        // Clamped, never rejected
        config.svg_scale = 10.0;
        assert!(config.validate().is_ok());
        assert_eq!(config.to_optimize_options().unwrap().svg_scale, 4.0);
    }

    #[test]
    fn test_scale_options() {
        let options = scale_config().to_scale_options().unwrap();
        assert_eq!(options.spec, ScaleSpec::Factor(0.5));
        assert_eq!(options.algorithm, ResampleAlgorithm::Lanczos);

        let options = ScaleConfig {
            factor: None,
            width: Some(30),
            height: Some(40),
            ..scale_config()
        }
        .to_scale_options()
        .unwrap();
        assert_eq!(options.spec, ScaleSpec::Exact(Size::new(30, 40)));
    }

    #[test]
    fn test_svg_scale_helpers() {
        assert_eq!(clamp_svg_scale(0.5), 1.0);
        assert_eq!(clamp_svg_scale(3.0), 3.0);
        assert_eq!(clamp_svg_scale(9.0), 4.0);
        assert_eq!(
            with_webp_extension(std::path::Path::new("out/logo.png")),
            PathBuf::from("out/logo.webp")
        );
    }

    #[test]
    fn test_scale_validation_errors() {
        let err = ScaleConfig {
            width: Some(100),
            ..scale_config()
        }
        .to_scale_options()
        .unwrap_err();
        assert_eq!(err.category(), "invalid_parameters");

        let err = ScaleConfig {
            factor: None,
            ..scale_config()
        }
        .to_scale_options()
        .unwrap_err();
        assert_eq!(err.category(), "invalid_parameters");

        let err = ScaleConfig {
            algorithm: "spline".into(),
            ..scale_config()
        }
        .to_scale_options()
        .unwrap_err();
        assert_eq!(err.category(), "unsupported_algorithm");

        let err = ScaleConfig {
            output: "out.tiff".into(),
            ..scale_config()
        }
        .to_scale_options()
        .unwrap_err();
        assert_eq!(err.category(), "unsupported_format");
    }
}
