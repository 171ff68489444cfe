//! Input decoding: raster files via `image`, vector files via `usvg`.

use std::fs;
use std::path::Path;

use image::{DynamicImage, ImageReader, RgbaImage};
use tracing::{debug, info};

use crate::core::vector::VectorDocument;
use crate::error::{PrepError, PrepResult, Stage};

/// Decode a raster file (PNG, JPEG, WebP, GIF, BMP) at its native depth.
///
/// The format is sniffed from the file contents, falling back to the extension.
pub fn load_raster(path: &Path) -> PrepResult<DynamicImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| PrepError::io("open input file", Some(path), e))?
        .with_guessed_format()
        .map_err(|e| PrepError::io("read input file", Some(path), e))?;

    debug!(path = %path.display(), format = ?reader.format(), "decoding raster input");
    let image = reader
        .decode()
        .map_err(|e| PrepError::decode(Some(path), e))?;
    debug!(color = ?image.color(), "decoded");
    Ok(image)
}

/// Decode an in-memory raster image into an RGBA8 buffer.
pub fn decode_raster_bytes(data: &[u8]) -> PrepResult<RgbaImage> {
    let image = image::load_from_memory(data).map_err(|e| PrepError::decode(None, e))?;
    Ok(image.into_rgba8())
}

/// Read and parse an SVG file.
pub fn read_vector(path: &Path) -> PrepResult<VectorDocument> {
    let data = fs::read(path).map_err(|e| PrepError::io("open SVG file", Some(path), e))?;
    info!("Loading SVG: {} bytes", data.len());
    VectorDocument::parse(&data).map_err(|e| {
        e.with_stage(Stage::Decode)
            .with_context(format!("parsing {}", path.display()))
    })
}
