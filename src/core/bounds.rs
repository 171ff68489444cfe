//! Transparent-bounds detection and cropping.
//!
//! A pixel counts as content when its alpha is non-zero or any colour channel
//! is non-zero, so fully transparent pixels that still carry colour stop the
//! crop.

use image::{DynamicImage, ImageBuffer, Primitive, Rgba, RgbaImage};
use tracing::debug;

/// Inclusive bounding rectangle of content pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Bounds {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

#[inline]
pub fn is_content<T: Primitive>(px: &Rgba<T>) -> bool {
    px.0.iter().any(|c| *c > T::DEFAULT_MIN_VALUE)
}

/// Smallest rectangle enclosing every content pixel, or `None` if there is none.
pub fn content_bounds<T: Primitive>(image: &ImageBuffer<Rgba<T>, Vec<T>>) -> Option<Bounds>
where
    Rgba<T>: image::Pixel<Subpixel = T>,
{
    let mut bounds: Option<Bounds> = None;
    for (x, y, px) in image.enumerate_pixels() {
        if !is_content(px) {
            continue;
        }
        match bounds.as_mut() {
            Some(b) => b.include(x, y),
            None => {
                bounds = Some(Bounds {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                })
            }
        }
    }
    bounds
}

/// Content bounds scanned at the decoded channel depth.
///
/// 16-bit and float images are widened to RGBA of the same depth, so a faint
/// alpha that would round to zero in 8 bits still counts.
pub fn native_content_bounds(image: &DynamicImage) -> Option<Bounds> {
    let color = image.color();
    match image {
        DynamicImage::ImageRgba8(buf) => content_bounds(buf),
        DynamicImage::ImageRgba16(buf) => content_bounds(buf),
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            content_bounds(&image.to_rgba32f())
        }
        _ if color.bytes_per_pixel() > color.channel_count() => content_bounds(&image.to_rgba16()),
        _ => content_bounds(&image.to_rgba8()),
    }
}

/// Trim blank padding from every edge of `image`, keeping its pixel format.
///
/// Pixels inside the content rectangle are copied verbatim, blank or not.
/// An image without any content yields a 1x1 fully transparent RGBA8 image.
pub fn crop_transparent(image: DynamicImage) -> DynamicImage {
    let Some(bounds) = native_content_bounds(&image) else {
        debug!(
            width = image.width(),
            height = image.height(),
            "no content found, emitting 1x1 placeholder"
        );
        return DynamicImage::ImageRgba8(RgbaImage::new(1, 1));
    };

    if bounds.width() == image.width() && bounds.height() == image.height() {
        return image;
    }

    debug!(?bounds, color = ?image.color(), "cropping to content");
    image.crop_imm(bounds.min_x, bounds.min_y, bounds.width(), bounds.height())
}
