//! # Image Processing Pipeline
//!
//! Composable, by-value image transformations.
//!
//! ## Architecture
//!
//! 1. **ImageProcessor Trait**: one transformation step (crop, resample)
//! 2. **ProcessingPipeline**: ordered chain of processors
//!
//! ## Ownership
//!
//! Each processor takes its input buffer by value and returns a fresh one, so
//! exactly one stage owns a buffer at any time and no stage can observe
//! another's scratch memory. Errors are tagged with the stage of the processor
//! that raised them.
//!
//! Images travel as [`DynamicImage`] at their decoded depth. Cropping inspects
//! native-precision pixels; resampling works on RGBA8.

use fast_image_resize::Resizer;
use image::{DynamicImage, RgbaImage};
use imgprep_scale::cpu::scale_rgba_to_vec;
use imgprep_scale::presets::{ResampleAlgorithm, ScaleSpec, Size, build_plan};
use tracing::{debug, info};

use crate::core::bounds::crop_transparent;
use crate::error::{PrepError, PrepResult, Stage};

/// A single transformation step.
/// Implement this trait to add new stages to a [`ProcessingPipeline`].
pub trait ImageProcessor {
    /// Pipeline stage this processor reports errors under.
    fn stage(&self) -> Stage;

    /// Transform `image`, consuming it.
    fn process(&mut self, image: DynamicImage) -> PrepResult<DynamicImage>;
}

/// Composable processing pipeline.
/// Chains processors together for sequential image processing.
#[derive(Default)]
pub struct ProcessingPipeline {
    pub processors: Vec<Box<dyn ImageProcessor>>,
}

impl ProcessingPipeline {
    /// Create a new processing pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a processor to the end of the chain.
    pub fn with(mut self, processor: impl ImageProcessor + 'static) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Run `image` through every processor in order.
    pub fn run(&mut self, image: DynamicImage) -> PrepResult<DynamicImage> {
        let mut current = image;
        for processor in &mut self.processors {
            let stage = processor.stage();
            current = processor.process(current).map_err(|e| e.with_stage(stage))?;
        }
        Ok(current)
    }

    /// Get the number of processors in the pipeline.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

/// Trims blank padding from every edge.
#[derive(Debug, Default, Clone, Copy)]
pub struct CropProcessor;

impl ImageProcessor for CropProcessor {
    fn stage(&self) -> Stage {
        Stage::Crop
    }

    fn process(&mut self, image: DynamicImage) -> PrepResult<DynamicImage> {
        let before = (image.width(), image.height());
        let cropped = crop_transparent(image);
        debug!(
            before = ?before,
            after = ?(cropped.width(), cropped.height()),
            "cropped transparent area"
        );
        Ok(cropped)
    }
}

/// Resamples to the dimensions derived from a [`ScaleSpec`].
pub struct ScalingProcessor {
    pub spec: ScaleSpec,
    pub algorithm: ResampleAlgorithm,
    pub resizer: Resizer,
}

impl ScalingProcessor {
    pub fn new(spec: ScaleSpec, algorithm: ResampleAlgorithm) -> Self {
        Self {
            spec,
            algorithm,
            resizer: Resizer::new(),
        }
    }
}

impl ImageProcessor for ScalingProcessor {
    fn stage(&self) -> Stage {
        Stage::Resample
    }

    fn process(&mut self, image: DynamicImage) -> PrepResult<DynamicImage> {
        let input = Size::new(image.width(), image.height());
        let plan = build_plan(input, self.spec, self.algorithm);

        info!(
            from = %plan.input,
            to = %plan.out,
            algorithm = %plan.algorithm,
            "resampling"
        );

        let rgba = image.into_rgba8();
        let pixels = scale_rgba_to_vec(&mut self.resizer, rgba.as_raw(), &plan)?;
        RgbaImage::from_raw(plan.out.w, plan.out.h, pixels)
            .map(DynamicImage::ImageRgba8)
            .ok_or_else(|| {
                PrepError::invalid_parameters("scale", "resampled buffer does not match target size")
                    .with_stage(Stage::Resample)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    struct Failing;

    impl ImageProcessor for Failing {
        fn stage(&self) -> Stage {
            Stage::Crop
        }

        fn process(&mut self, _image: DynamicImage) -> PrepResult<DynamicImage> {
            Err(PrepError::render("boom"))
        }
    }

    fn padded() -> DynamicImage {
        let mut img = RgbaImage::new(100, 100);
        for y in 30..70 {
            for x in 30..70 {
                img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn crop_then_scale() {
        let mut pipeline = ProcessingPipeline::new()
            .with(CropProcessor)
            .with(ScalingProcessor::new(ScaleSpec::Factor(0.5), ResampleAlgorithm::Nearest));
        assert_eq!(pipeline.len(), 2);

        let out = pipeline.run(padded()).unwrap().into_rgba8();
        assert_eq!(out.dimensions(), (20, 20));
        assert!(out.pixels().all(|px| *px == Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn empty_pipeline_passes_through() {
        let mut pipeline = ProcessingPipeline::new();
        assert!(pipeline.is_empty());
        let out = pipeline.run(padded()).unwrap();
        assert_eq!((out.width(), out.height()), (100, 100));
    }

    #[test]
    fn errors_carry_processor_stage() {
        let mut pipeline = ProcessingPipeline::new().with(Failing);
        let err = pipeline.run(padded()).unwrap_err();
        assert_eq!(err.stage(), Stage::Crop);
    }

    #[test]
    fn oversized_scale_fails_in_resample_stage() {
        let mut pipeline = ProcessingPipeline::new()
            .with(ScalingProcessor::new(ScaleSpec::Factor(1e9), ResampleAlgorithm::Lanczos));
        let err = pipeline.run(padded()).unwrap_err();
        assert_eq!(err.stage(), Stage::Resample);
        assert_eq!(err.category(), "scale");
    }
}
