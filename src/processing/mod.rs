//! # Processing Module
//!
//! This module contains the image transformation pipeline.

pub mod processing;

// Re-export commonly used types for convenience
pub use processing::{CropProcessor, ImageProcessor, ProcessingPipeline, ScalingProcessor};
