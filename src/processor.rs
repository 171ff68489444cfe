//! # Orchestrator
//!
//! Composes the codec gateway, rasterizer and processing pipeline into the
//! two user-facing operations:
//!
//! - **optimize**: decode or rasterize → crop → WebP
//! - **scale**: decode or rasterize → resample → format chosen by output extension
//!
//! Data only flows downstream; each stage hands its buffer to the next.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::info;

use crate::codec::{InputKind, OutputFormat, decode, encode};
use crate::core::vector::{DEFAULT_SUPERSAMPLE, rasterize};
use crate::error::{PrepResult, Stage};
use crate::processing::{CropProcessor, ProcessingPipeline, ScalingProcessor};
use crate::{OptimizeOptions, ScaleOptions};

/// Outcome of a completed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Path the encoded image was written to
    pub output: PathBuf,
    /// Dimensions of the loaded (or rasterized) input
    pub source_width: u32,
    pub source_height: u32,
    pub width: u32,
    pub height: u32,
    /// Size of the encoded file in bytes
    pub bytes: u64,
}

/// Loads inputs and runs operations.
#[derive(Debug, Clone, Copy)]
pub struct Processor {
    /// Supersample factor used when rasterizing vector inputs (clamped to `[1, 4]`).
    pub svg_scale: f32,
}

impl Default for Processor {
    fn default() -> Self {
        Self {
            svg_scale: DEFAULT_SUPERSAMPLE,
        }
    }
}

impl Processor {
    pub fn new(svg_scale: f32) -> Self {
        Self { svg_scale }
    }

    /// Decode a raster file at its native depth, or rasterize an SVG to RGBA8.
    pub fn load_image(&self, path: &Path) -> PrepResult<DynamicImage> {
        match InputKind::from_path(path) {
            InputKind::Vector => {
                let doc = decode::read_vector(path)?;
                let image = rasterize(doc, self.svg_scale)
                    .map_err(|e| e.with_stage(Stage::Rasterize))?;
                info!("SVG successfully converted to raster image");
                Ok(DynamicImage::ImageRgba8(image))
            }
            InputKind::Raster => decode::load_raster(path),
        }
    }

    /// Crop transparent padding and encode as lossy WebP.
    pub fn optimize(&self, options: &OptimizeOptions) -> PrepResult<Report> {
        let image = self.load_image(&options.input)?;
        let source = (image.width(), image.height());
        let mut pipeline = ProcessingPipeline::new().with(CropProcessor);
        let cropped = pipeline.run(image)?;
        self.write(source, cropped, &options.output, OutputFormat::WebP, options.quality)
    }

    /// Resample to the requested size and encode in the format the output
    /// extension names.
    pub fn scale(&self, options: &ScaleOptions) -> PrepResult<Report> {
        let format = OutputFormat::from_path(&options.output)?;
        let image = self.load_image(&options.input)?;
        let source = (image.width(), image.height());
        let mut pipeline = ProcessingPipeline::new()
            .with(ScalingProcessor::new(options.spec, options.algorithm));
        let scaled = pipeline.run(image)?;
        self.write(source, scaled, &options.output, format, options.quality)
    }

    fn write(
        &self,
        (source_width, source_height): (u32, u32),
        image: DynamicImage,
        output: &Path,
        format: OutputFormat,
        quality: f32,
    ) -> PrepResult<Report> {
        let image = image.into_rgba8();
        let bytes = encode::save(&image, output, format, quality)?;
        Ok(Report {
            output: output.to_path_buf(),
            source_width,
            source_height,
            width: image.width(),
            height: image.height(),
            bytes,
        })
    }
}
