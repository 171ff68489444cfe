//! Output encoding and file writing.

use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::Path;

use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage, RgbaImage};
use tracing::{debug, info};

use super::format::OutputFormat;
use crate::error::{PrepError, PrepResult, Stage};

/// JPEG quality used when the requested value rounds below 1.
pub const JPEG_FALLBACK_QUALITY: u8 = 90;

/// Map a `[0, 100]` quality to the integer JPEG scale.
///
/// The value is truncated; anything below 1 falls back to 90 and anything
/// above 100 is clamped.
pub fn jpeg_quality(quality: f32) -> u8 {
    let q = quality as i32;
    if q < 1 {
        JPEG_FALLBACK_QUALITY
    } else {
        q.min(100) as u8
    }
}

/// Lossy WebP quality, clamped to `[0, 100]`.
pub fn webp_quality(quality: f32) -> f32 {
    if quality.is_nan() {
        return 0.0;
    }
    quality.clamp(0.0, 100.0)
}

/// Encode `image` in `format` and return the encoded bytes.
pub fn encode(image: &RgbaImage, format: OutputFormat, quality: f32) -> PrepResult<Vec<u8>> {
    let (w, h) = image.dimensions();
    let mut buf = Cursor::new(Vec::new());
    match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut buf)
                .write_image(image.as_raw(), w, h, ExtendedColorType::Rgba8)
                .map_err(|e| PrepError::encode("PNG", e.to_string(), Some(e)))?;
        }
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel; colour is kept, coverage is dropped.
            let rgb: RgbImage = image.convert();
            JpegEncoder::new_with_quality(&mut buf, jpeg_quality(quality))
                .write_image(rgb.as_raw(), w, h, ExtendedColorType::Rgb8)
                .map_err(|e| PrepError::encode("JPEG", e.to_string(), Some(e)))?;
        }
        OutputFormat::WebP => {
            let memory = webp::Encoder::from_rgba(image.as_raw(), w, h)
                .encode_simple(false, webp_quality(quality))
                .map_err(|e| PrepError::encode("WebP", format!("{:?}", e), None))?;
            return Ok(memory.to_vec());
        }
    }
    Ok(buf.into_inner())
}

/// Encode `image` and write it to `path`, creating parent directories as needed.
///
/// Returns the number of bytes written.
pub fn save(image: &RgbaImage, path: &Path, format: OutputFormat, quality: f32) -> PrepResult<u64> {
    let bytes = encode(image, format, quality)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| {
            PrepError::io("create output directory", Some(dir), e).with_stage(Stage::Encode)
        })?;
    }

    let mut file = File::create(path)
        .map_err(|e| PrepError::io("create output file", Some(path), e).with_stage(Stage::Encode))?;
    file.write_all(&bytes)
        .map_err(|e| PrepError::io("write output file", Some(path), e).with_stage(Stage::Encode))?;

    let size = bytes.len() as u64;
    debug!(path = %path.display(), format = format.name(), size, "wrote output");
    info!("Output file size: {:.2} KB", size as f64 / 1024.0);
    Ok(size)
}
