//! Extension-based format dispatch.

use std::path::{Path, PathBuf};

use crate::error::{PrepError, PrepResult};

/// How an input file is turned into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Raster,
    Vector,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Self {
        match extension(path).as_deref() {
            Some("svg") | Some("svgz") => InputKind::Vector,
            _ => InputKind::Raster,
        }
    }
}

/// Supported encodings for output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    WebP,
}

impl OutputFormat {
    /// Choose the encoder from the output path's extension.
    pub fn from_path(path: &Path) -> PrepResult<Self> {
        match extension(path).as_deref() {
            Some("png") => Ok(OutputFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(OutputFormat::Jpeg),
            Some("webp") => Ok(OutputFormat::WebP),
            Some(other) => Err(PrepError::unsupported_format(format!(".{}", other))),
            None => Err(PrepError::unsupported_format("(none)")
                .with_context(format!("output path '{}' has no extension", path.display()))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::WebP => "WebP",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::WebP => "webp",
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Replace (or add) the extension of `path` so it ends in `.webp`.
///
/// Returns the path unchanged when it already carries a `.webp` extension.
pub fn with_webp_extension(path: &Path) -> PathBuf {
    match extension(path).as_deref() {
        Some("webp") => path.to_path_buf(),
        _ => path.with_extension(OutputFormat::WebP.extension()),
    }
}
