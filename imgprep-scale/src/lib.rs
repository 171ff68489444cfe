// SPDX-License-Identifier: MIT
//! # imgprep-scale: Target-Size Planning and Resampling
//!
//! This crate owns the scaling half of the imgprep pipeline: deciding how big
//! the output should be, then resampling an RGBA8 buffer to that size.
//!
//! ## Key Components
//!
//! - [`presets`]: the [`presets::ScaleSpec`] sum type, target-size arithmetic and
//!   the named [`presets::ResampleAlgorithm`] filters
//! - [`cpu`]: CPU resampler built on `fast_image_resize`
//!
//! ## Usage Example
//!
//! ```rust
//! use imgprep_scale::cpu::scale_rgba_to_vec;
//! use imgprep_scale::presets::{build_plan, ResampleAlgorithm, ScaleSpec, Size};
//!
//! let input = Size::new(200, 100);
//! let plan = build_plan(input, ScaleSpec::Width(100), ResampleAlgorithm::Lanczos);
//! assert_eq!(plan.out, Size::new(100, 50));
//!
//! let src = vec![255u8; (input.w * input.h * 4) as usize];
//! let mut resizer = fast_image_resize::Resizer::new();
//! let out = scale_rgba_to_vec(&mut resizer, &src, &plan)?;
//! assert_eq!(out.len(), 100 * 50 * 4);
//! # Ok::<(), imgprep_scale::cpu::ScaleError>(())
//! ```

pub mod cpu;
pub mod presets;
