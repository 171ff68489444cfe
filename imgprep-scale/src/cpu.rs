// SPDX-License-Identifier: MIT
// CPU resampler built on fast_image_resize (SIMD-accelerated).
// RGBA8 in → RGBA8 out, direct write into caller-provided dst buffer.

use fast_image_resize as fir;
use fir::images::{TypedImage, TypedImageRef};
use fir::pixels::U8x4;
use fir::{FilterType, ResizeAlg, ResizeOptions, Resizer};

use crate::presets::{ResampleAlgorithm, ScalePlan, Size};

/// Largest output the resampler will allocate (1 GiB of RGBA8).
pub const MAX_OUTPUT_PIXELS: u64 = 1 << 28;

#[derive(Debug)]
pub enum ScaleError {
    BufferTooSmall,
    TooLarge { w: u32, h: u32 },
    SourceMismatch { expected: usize, actual: usize },
    Fir(fir::ResizeError),
    ImageBuf(fir::ImageBufferError),
}

impl From<fir::ResizeError> for ScaleError { fn from(e: fir::ResizeError) -> Self { Self::Fir(e) } }
impl From<fir::ImageBufferError> for ScaleError { fn from(e: fir::ImageBufferError) -> Self { Self::ImageBuf(e) } }

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::BufferTooSmall => write!(f, "Output buffer too small"),
            ScaleError::TooLarge { w, h } => write!(
                f,
                "Target size {}x{} exceeds the {} pixel limit",
                w, h, MAX_OUTPUT_PIXELS
            ),
            ScaleError::SourceMismatch { expected, actual } => {
                write!(f, "Source buffer has {} bytes, expected {}", actual, expected)
            }
            ScaleError::Fir(e) => write!(f, "Fast image resize error: {}", e),
            ScaleError::ImageBuf(e) => write!(f, "Image buffer error: {}", e),
        }
    }
}

impl std::error::Error for ScaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaleError::Fir(e) => Some(e),
            ScaleError::ImageBuf(e) => Some(e),
            _ => None,
        }
    }
}

impl ResampleAlgorithm {
    /// fast_image_resize filter backing this algorithm.
    pub fn resize_alg(self) -> ResizeAlg {
        match self {
            ResampleAlgorithm::Nearest => ResizeAlg::Nearest,
            ResampleAlgorithm::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResampleAlgorithm::Bicubic => ResizeAlg::Convolution(FilterType::CatmullRom),
            ResampleAlgorithm::Lanczos => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

/// Byte length of a tightly packed RGBA8 buffer of `size`, if it is within
/// [`MAX_OUTPUT_PIXELS`] and addressable.
pub fn rgba_len(size: Size) -> Result<usize, ScaleError> {
    let too_large = || ScaleError::TooLarge { w: size.w, h: size.h };
    let pixels = (size.w as u64) * (size.h as u64);
    if pixels > MAX_OUTPUT_PIXELS {
        return Err(too_large());
    }
    usize::try_from(pixels)
        .ok()
        .and_then(|p| p.checked_mul(4))
        .ok_or_else(too_large)
}

/// Main resampling entry point.
/// `src_rgba` must be tightly packed `plan.input.w * plan.input.h * 4` bytes (straight alpha).
/// `dst` must hold at least `plan.out.w * plan.out.h * 4` bytes.
pub fn scale_rgba_cpu(
    resizer: &mut Resizer,
    src_rgba: &[u8],
    plan: &ScalePlan,
    dst: &mut [u8],
) -> Result<(), ScaleError> {
    let src_len = (plan.input.w as usize)
        .checked_mul(plan.input.h as usize)
        .and_then(|p| p.checked_mul(4))
        .ok_or(ScaleError::SourceMismatch {
            expected: usize::MAX,
            actual: src_rgba.len(),
        })?;
    if src_rgba.len() != src_len {
        return Err(ScaleError::SourceMismatch {
            expected: src_len,
            actual: src_rgba.len(),
        });
    }
    let dst_len = rgba_len(plan.out)?;
    if dst.len() < dst_len {
        return Err(ScaleError::BufferTooSmall);
    }

    let src_view = TypedImageRef::<U8x4>::from_buffer(plan.input.w, plan.input.h, src_rgba)?;
    let mut dst_image = TypedImage::<U8x4>::from_buffer(plan.out.w, plan.out.h, &mut dst[..dst_len])?;

    // Alpha is premultiplied for the convolution and divided back afterwards,
    // which keeps transparent edges from bleeding dark fringes.
    let opts = ResizeOptions::new()
        .resize_alg(plan.algorithm.resize_alg())
        .use_alpha(true);

    resizer.resize_typed::<U8x4>(&src_view, &mut dst_image, &opts)?;
    Ok(())
}

/// Allocating convenience wrapper around [`scale_rgba_cpu`].
pub fn scale_rgba_to_vec(
    resizer: &mut Resizer,
    src_rgba: &[u8],
    plan: &ScalePlan,
) -> Result<Vec<u8>, ScaleError> {
    let mut out = vec![0u8; rgba_len(plan.out)?];
    scale_rgba_cpu(resizer, src_rgba, plan, &mut out)?;
    Ok(out)
}
