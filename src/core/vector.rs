//! # Vector Rasterization
//!
//! SVG documents are parsed with `usvg`, rendered by `resvg` onto a
//! supersampled canvas, then point-sampled back down to their intrinsic size.
//!
//! ## Sizing
//!
//! The intrinsic size is the width/height of the root `viewBox`. Documents
//! without one (or with a zero-sized one) are treated as 512x512.
//!
//! ## Supersampling
//!
//! The working canvas is `intrinsic * scale` with `scale` clamped to `[1, 4]`.
//! Output pixel `(x, y)` copies working pixel `(floor(x * scale), floor(y * scale))`;
//! anything that would sample outside the canvas stays transparent. This is a
//! plain point sample, not an area filter.

use std::borrow::Cow;

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use tracing::{debug, info};

use crate::error::{PrepError, PrepResult};

/// Intrinsic edge length used when a document declares no viewBox.
pub const DEFAULT_INTRINSIC_SIDE: f32 = 512.0;
pub const MIN_SUPERSAMPLE: f32 = 1.0;
pub const MAX_SUPERSAMPLE: f32 = 4.0;
pub const DEFAULT_SUPERSAMPLE: f32 = 2.0;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Clamp a requested supersample factor to `[1, 4]`. NaN maps to 1.
pub fn clamp_supersample(scale: f32) -> f32 {
    if scale.is_nan() {
        return MIN_SUPERSAMPLE;
    }
    scale.clamp(MIN_SUPERSAMPLE, MAX_SUPERSAMPLE)
}

/// Parsed SVG plus its intrinsic size.
pub struct VectorDocument {
    tree: usvg::Tree,
    width: f32,
    height: f32,
}

impl std::fmt::Debug for VectorDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorDocument")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl VectorDocument {
    /// Parse SVG (or gzip-compressed SVGZ) bytes.
    pub fn parse(data: &[u8]) -> PrepResult<Self> {
        let data = if data.starts_with(&GZIP_MAGIC) {
            let text = usvg::decompress_svgz(data)
                .map_err(|e| PrepError::parse(e.to_string(), Some(Box::new(e))))?;
            debug!(compressed = data.len(), expanded = text.len(), "decompressed SVGZ");
            Cow::Owned(text)
        } else {
            Cow::Borrowed(data)
        };

        let options = usvg::Options::default();
        let tree = usvg::Tree::from_data(&data, &options)
            .map_err(|e| PrepError::parse(e.to_string(), Some(Box::new(e))))?;

        let (width, height) = match declared_view_box(&data) {
            Some((w, h)) if w > 0.0 && h > 0.0 => (w, h),
            _ => (DEFAULT_INTRINSIC_SIDE, DEFAULT_INTRINSIC_SIDE),
        };

        Ok(Self {
            tree,
            width,
            height,
        })
    }

    /// Width and height in abstract document units.
    pub fn intrinsic_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

/// Width/height of the root element's `viewBox`, if present and well-formed.
fn declared_view_box(data: &[u8]) -> Option<(f32, f32)> {
    let text = std::str::from_utf8(data).ok()?;
    let doc = roxmltree::Document::parse(text).ok()?;
    let raw = doc.root_element().attribute("viewBox")?;
    let nums: Vec<f32> = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match nums.as_slice() {
        [_, _, w, h] => Some((*w, *h)),
        _ => None,
    }
}

/// Render `doc` at `scale`x supersampling and return it at intrinsic resolution.
pub fn rasterize(doc: VectorDocument, scale: f32) -> PrepResult<RgbaImage> {
    let scale = clamp_supersample(scale);
    let (width, height) = doc.intrinsic_size();
    let target_w = width * scale;
    let target_h = height * scale;
    let render_w = target_w as u32;
    let render_h = target_h as u32;

    info!(
        "Rendering SVG at {:.0}x{:.0} ({:.1}x scale for quality)",
        width, height, scale
    );

    let mut pixmap = Pixmap::new(render_w, render_h).ok_or_else(|| {
        PrepError::render("could not allocate working canvas")
            .with_metadata("width", render_w.to_string())
            .with_metadata("height", render_h.to_string())
    })?;

    let size = doc.tree.size();
    let transform = Transform::from_scale(target_w / size.width(), target_h / size.height());
    resvg::render(&doc.tree, transform, &mut pixmap.as_mut());

    let working = pixmap_to_rgba(&pixmap);
    if scale == 1.0 {
        return Ok(working);
    }

    let out_w = width as u32;
    let out_h = height as u32;
    let mut out = RgbaImage::new(out_w, out_h);
    for y in 0..out_h {
        for x in 0..out_w {
            let src_x = (x as f32 * scale) as u32;
            let src_y = (y as f32 * scale) as u32;
            if src_x < render_w && src_y < render_h {
                out.put_pixel(x, y, *working.get_pixel(src_x, src_y));
            }
        }
    }

    debug!(
        working = %format!("{}x{}", render_w, render_h),
        output = %format!("{}x{}", out_w, out_h),
        "point-sampled supersampled canvas"
    );
    Ok(out)
}

/// tiny-skia stores premultiplied RGBA; the rest of the pipeline uses straight alpha.
fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}
