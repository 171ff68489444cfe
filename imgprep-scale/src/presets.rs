// SPDX-License-Identifier: MIT
//! # Scale Specifications and Plan Computation
//!
//! This module turns a caller's sizing request into concrete output dimensions.
//!
//! ## Design
//!
//! A request is modelled as a [`ScaleSpec`] sum type. Exactly one sizing mode is
//! active per operation, so the "nothing set" and "factor plus width" states
//! cannot be built once a spec exists. Loose caller input (three optional
//! values coming from flags) is funnelled through [`ScaleSpec::from_options`],
//! which is the only place those combinations are rejected.
//!
//! ## Arithmetic
//!
//! - `Factor(f)`: `round(w * f) x round(h * f)`
//! - `Exact(size)`: used as-is, aspect ratio not preserved
//! - `Width(w)`: height derived as `round(w * h0 / w0)`
//! - `Height(h)`: width derived as `round(h * w0 / h0)`
//!
//! Every axis is clamped to at least 1px so the resampler never receives an
//! empty destination.

use std::fmt;
use std::str::FromStr;

/// Represents a 2D size with width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// How the output dimensions of a scale operation are chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleSpec {
    /// Multiply both axes by a positive factor.
    Factor(f64),
    /// Force exact output dimensions.
    Exact(Size),
    /// Fix the width, derive the height from the source aspect ratio.
    Width(u32),
    /// Fix the height, derive the width from the source aspect ratio.
    Height(u32),
}

/// Reasons loose sizing options cannot form a [`ScaleSpec`].
#[derive(Clone, Debug, PartialEq)]
pub enum SpecError {
    /// None of factor, width or height was supplied.
    Missing,
    /// A factor was combined with an explicit width and/or height.
    Conflicting,
    /// A factor, width or height was zero, negative or not finite.
    NonPositive { field: &'static str, value: String },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::Missing => {
                write!(f, "must specify either --factor, --width, --height, or both --width and --height")
            }
            SpecError::Conflicting => {
                write!(f, "cannot use --factor together with --width or --height")
            }
            SpecError::NonPositive { field, value } => {
                write!(f, "{} must be a positive number (got {})", field, value)
            }
        }
    }
}

impl std::error::Error for SpecError {}

impl ScaleSpec {
    /// Build a spec from the three optional sizing values a caller may pass.
    ///
    /// Exactly one of `factor`, `width`, `height` or `width + height` must be set.
    pub fn from_options(
        factor: Option<f64>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Self, SpecError> {
        match (factor, width, height) {
            (None, None, None) => Err(SpecError::Missing),
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(SpecError::Conflicting),
            (Some(f), None, None) => {
                if f.is_finite() && f > 0.0 {
                    Ok(ScaleSpec::Factor(f))
                } else {
                    Err(SpecError::NonPositive {
                        field: "factor",
                        value: f.to_string(),
                    })
                }
            }
            (None, Some(w), Some(h)) => Ok(ScaleSpec::Exact(Size {
                w: positive("width", w)?,
                h: positive("height", h)?,
            })),
            (None, Some(w), None) => Ok(ScaleSpec::Width(positive("width", w)?)),
            (None, None, Some(h)) => Ok(ScaleSpec::Height(positive("height", h)?)),
        }
    }

    /// Compute output dimensions for an input of size `input`.
    pub fn target_size(self, input: Size) -> Size {
        let (w0, h0) = (input.w as f64, input.h as f64);
        let (w, h) = match self {
            ScaleSpec::Factor(f) => ((w0 * f).round(), (h0 * f).round()),
            ScaleSpec::Exact(size) => (size.w as f64, size.h as f64),
            ScaleSpec::Width(w) => {
                let w = w as f64;
                (w, (w * h0 / w0.max(1.0)).round())
            }
            ScaleSpec::Height(h) => {
                let h = h as f64;
                ((h * w0 / h0.max(1.0)).round(), h)
            }
        };
        Size {
            w: clamp_axis(w),
            h: clamp_axis(h),
        }
    }
}

fn positive(field: &'static str, value: u32) -> Result<u32, SpecError> {
    if value == 0 {
        Err(SpecError::NonPositive {
            field,
            value: value.to_string(),
        })
    } else {
        Ok(value)
    }
}

fn clamp_axis(v: f64) -> u32 {
    v.clamp(1.0, u32::MAX as f64) as u32
}

/// Named reconstruction filters available for resampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResampleAlgorithm {
    /// Point sampling; fastest, keeps pixel art crisp.
    Nearest,
    /// Linear interpolation over a 2x2 neighbourhood.
    Bilinear,
    /// Catmull-Rom cubic interpolation.
    Bicubic,
    /// Lanczos3 windowed sinc; best for downsampling.
    #[default]
    Lanczos,
}

impl ResampleAlgorithm {
    pub const NAMES: &'static str = "nearest, bilinear, bicubic, lanczos";

    pub fn as_str(self) -> &'static str {
        match self {
            ResampleAlgorithm::Nearest => "nearest",
            ResampleAlgorithm::Bilinear => "bilinear",
            ResampleAlgorithm::Bicubic => "bicubic",
            ResampleAlgorithm::Lanczos => "lanczos",
        }
    }
}

impl fmt::Display for ResampleAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an algorithm name is not one of [`ResampleAlgorithm::NAMES`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported resampling algorithm: {} (use: {})",
            self.0,
            ResampleAlgorithm::NAMES
        )
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for ResampleAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(ResampleAlgorithm::Nearest),
            "bilinear" | "linear" => Ok(ResampleAlgorithm::Bilinear),
            "bicubic" | "cubic" => Ok(ResampleAlgorithm::Bicubic),
            "lanczos" => Ok(ResampleAlgorithm::Lanczos),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Complete scaling plan computed from input parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePlan {
    /// Original input dimensions
    pub input: Size,
    /// Sizing request used for planning
    pub spec: ScaleSpec,
    /// Final computed output dimensions
    pub out: Size,
    /// Reconstruction filter
    pub algorithm: ResampleAlgorithm,
}

/// Compute a scaling plan for `input` under `spec`.
pub fn build_plan(input: Size, spec: ScaleSpec, algorithm: ResampleAlgorithm) -> ScalePlan {
    ScalePlan {
        input,
        spec,
        out: spec.target_size(input),
        algorithm,
    }
}
