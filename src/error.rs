//! # Error Handling
//!
//! Errors raised anywhere in the image pipeline, each tagged with the stage
//! that produced it.
//!
//! ## Architecture
//!
//! - **Error Types**: one variant per failure kind (decode, unsupported format,
//!   unsupported algorithm, invalid parameters, I/O, encode, render, scale)
//! - **Error Context**: pipeline [`Stage`], free-text context and key/value metadata
//! - **Error Chaining**: the underlying cause is kept and exposed through `source()`
//!
//! The tool is single-shot, so nothing here classifies errors for retry: every
//! error is surfaced to the caller immediately.
//!
//! ## Usage
//!
//! ```rust
//! use imgprep::error::{PrepError, Stage};
//!
//! let error = PrepError::unsupported_format(".gif")
//!     .with_context("choosing encoder for out/banner.gif");
//!
//! assert_eq!(error.category(), "unsupported_format");
//! assert_eq!(error.stage(), Stage::Encode);
//! ```

use std::{collections::HashMap, error::Error as StdError, fmt, path::Path};

use imgprep_scale::cpu::ScaleError;
use imgprep_scale::presets::{SpecError, UnknownAlgorithm};

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Caller input checks performed before any I/O
    Validate,
    /// Reading and decoding the input file
    Decode,
    /// Rendering a vector document to pixels
    Rasterize,
    /// Transparent-bounds detection and cropping
    Crop,
    /// Resampling to target dimensions
    Resample,
    /// Encoding and writing the output file
    Encode,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Validate => "validate",
            Stage::Decode => "decode",
            Stage::Rasterize => "rasterize",
            Stage::Crop => "crop",
            Stage::Resample => "resample",
            Stage::Encode => "encode",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata about where an error occurred
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Stage that produced the error
    pub stage: Stage,
    /// Additional context about the error
    pub context: Option<String>,
    /// Additional metadata as key-value pairs
    pub metadata: HashMap<String, String>,
}

impl ErrorContext {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            context: None,
            metadata: HashMap::new(),
        }
    }
}

/// Base error type for imgprep
#[derive(Debug)]
pub enum PrepError {
    /// Input bytes are not a valid raster image
    Decode {
        path: Option<String>,
        source: image::ImageError,
        context: ErrorContext,
    },
    /// Input bytes are not a valid vector document
    Parse {
        reason: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
        context: ErrorContext,
    },
    /// Output extension not in the supported set
    UnsupportedFormat {
        extension: String,
        context: ErrorContext,
    },
    /// Resampling algorithm name not recognised
    UnsupportedAlgorithm {
        name: String,
        context: ErrorContext,
    },
    /// Conflicting, absent or out-of-range parameters
    InvalidParameters {
        field: String,
        reason: String,
        context: ErrorContext,
    },
    /// File open/create/read/write failures
    Io {
        operation: String,
        path: Option<String>,
        source: std::io::Error,
        context: ErrorContext,
    },
    /// Encoder failures
    Encode {
        format: String,
        reason: String,
        source: Option<image::ImageError>,
        context: ErrorContext,
    },
    /// Rasterization backend failures (canvas allocation etc.)
    Render {
        reason: String,
        context: ErrorContext,
    },
    /// Resampler failures
    Scale {
        source: ScaleError,
        context: ErrorContext,
    },
}

impl PrepError {
    /// Create a raster decode error
    pub fn decode(path: Option<&Path>, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.map(|p| p.display().to_string()),
            source,
            context: ErrorContext::new(Stage::Decode),
        }
    }

    /// Create a vector document parse error
    pub fn parse(
        reason: impl Into<String>,
        source: Option<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::Parse {
            reason: reason.into(),
            source,
            context: ErrorContext::new(Stage::Decode),
        }
    }

    /// Create an unsupported output format error
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
            context: ErrorContext::new(Stage::Encode),
        }
    }

    /// Create an unsupported algorithm error
    pub fn unsupported_algorithm(name: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm {
            name: name.into(),
            context: ErrorContext::new(Stage::Validate),
        }
    }

    /// Create an invalid parameters error
    pub fn invalid_parameters(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            field: field.into(),
            reason: reason.into(),
            context: ErrorContext::new(Stage::Validate),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, path: Option<&Path>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.map(|p| p.display().to_string()),
            source,
            context: ErrorContext::new(Stage::Decode),
        }
    }

    /// Create an encoder error
    pub fn encode(
        format: impl Into<String>,
        reason: impl Into<String>,
        source: Option<image::ImageError>,
    ) -> Self {
        Self::Encode {
            format: format.into(),
            reason: reason.into(),
            source,
            context: ErrorContext::new(Stage::Encode),
        }
    }

    /// Create a rasterization error
    pub fn render(reason: impl Into<String>) -> Self {
        Self::Render {
            reason: reason.into(),
            context: ErrorContext::new(Stage::Rasterize),
        }
    }

    /// Override the stage the error is attributed to
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.context_mut().stage = stage;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_mut().context = Some(context.into());
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context_mut().metadata.insert(key.into(), value.into());
        self
    }

    /// Stage that produced the error
    pub fn stage(&self) -> Stage {
        self.context().stage
    }

    /// Get the error context
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Decode { context, .. } => context,
            Self::Parse { context, .. } => context,
            Self::UnsupportedFormat { context, .. } => context,
            Self::UnsupportedAlgorithm { context, .. } => context,
            Self::InvalidParameters { context, .. } => context,
            Self::Io { context, .. } => context,
            Self::Encode { context, .. } => context,
            Self::Render { context, .. } => context,
            Self::Scale { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Decode { context, .. } => context,
            Self::Parse { context, .. } => context,
            Self::UnsupportedFormat { context, .. } => context,
            Self::UnsupportedAlgorithm { context, .. } => context,
            Self::InvalidParameters { context, .. } => context,
            Self::Io { context, .. } => context,
            Self::Encode { context, .. } => context,
            Self::Render { context, .. } => context,
            Self::Scale { context, .. } => context,
        }
    }

    /// Get the error category as a string
    pub fn category(&self) -> &'static str {
        match self {
            Self::Decode { .. } | Self::Parse { .. } => "decode",
            Self::UnsupportedFormat { .. } => "unsupported_format",
            Self::UnsupportedAlgorithm { .. } => "unsupported_algorithm",
            Self::InvalidParameters { .. } => "invalid_parameters",
            Self::Io { .. } => "io",
            Self::Encode { .. } => "encode",
            Self::Render { .. } => "render",
            Self::Scale { .. } => "scale",
        }
    }
}

impl fmt::Display for PrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.stage())?;
        match self {
            PrepError::Decode { path, source, .. } => match path {
                Some(path) => write!(f, "failed to decode image '{}': {}", path, source),
                None => write!(f, "failed to decode image: {}", source),
            },
            PrepError::Parse { reason, .. } => {
                write!(f, "failed to parse SVG: {}", reason)
            }
            PrepError::UnsupportedFormat { extension, .. } => {
                write!(
                    f,
                    "unsupported output format: {} (use: .png, .jpg, .jpeg, .webp)",
                    extension
                )
            }
            PrepError::UnsupportedAlgorithm { name, .. } => {
                write!(
                    f,
                    "unsupported resampling algorithm: {} (use: nearest, bilinear, bicubic, lanczos)",
                    name
                )
            }
            PrepError::InvalidParameters { field, reason, .. } => {
                write!(f, "invalid parameter '{}': {}", field, reason)
            }
            PrepError::Io {
                operation,
                path,
                source,
                ..
            } => {
                if let Some(path) = path {
                    write!(f, "failed to {} '{}': {}", operation, path, source)
                } else {
                    write!(f, "failed to {}: {}", operation, source)
                }
            }
            PrepError::Encode { format, reason, .. } => {
                write!(f, "failed to encode {}: {}", format, reason)
            }
            PrepError::Render { reason, .. } => {
                write!(f, "failed to render SVG: {}", reason)
            }
            PrepError::Scale { source, .. } => {
                write!(f, "failed to resample image: {}", source)
            }
        }?;
        if let Some(context) = &self.context().context {
            write!(f, " ({})", context)?;
        }
        Ok(())
    }
}

impl StdError for PrepError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::Parse {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            Self::Io { source, .. } => Some(source),
            Self::Encode {
                source: Some(source),
                ..
            } => Some(source),
            Self::Scale { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias using our custom error type
pub type PrepResult<T> = Result<T, PrepError>;

/// Error conversion implementations.
/// I/O and image errors are built explicitly so they carry the path and operation.
impl From<ScaleError> for PrepError {
    fn from(error: ScaleError) -> Self {
        Self::Scale {
            source: error,
            context: ErrorContext::new(Stage::Resample),
        }
    }
}

impl From<SpecError> for PrepError {
    fn from(error: SpecError) -> Self {
        let field = match &error {
            SpecError::NonPositive { field, .. } => *field,
            SpecError::Missing | SpecError::Conflicting => "scale",
        };
        Self::invalid_parameters(field, error.to_string())
    }
}

impl From<UnknownAlgorithm> for PrepError {
    fn from(error: UnknownAlgorithm) -> Self {
        Self::unsupported_algorithm(error.0)
    }
}
