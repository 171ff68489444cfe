//! # Core Module
//!
//! Pixel-level algorithms: transparent-bounds cropping and vector rasterization.

pub mod bounds;
pub mod vector;

pub use bounds::{Bounds, content_bounds, crop_transparent, native_content_bounds};
pub use vector::{VectorDocument, clamp_supersample, rasterize};
