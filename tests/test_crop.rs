//! Integration tests for the optimize operation: cropping and WebP output

mod common;

use common::assertions::{assert_image_size, open_rgba};
use common::fixtures::{missing, temp_dir, write_png};
use common::test_images::{block_on_canvas, padded_block};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba, RgbaImage};
use imgprep::core::{content_bounds, crop_transparent};
use imgprep::{OptimizeOptions, Processor, optimize_image};

fn optimize_options(input: std::path::PathBuf, output: std::path::PathBuf) -> OptimizeOptions {
    OptimizeOptions {
        input,
        output,
        quality: 80.0,
        svg_scale: 2.0,
    }
}

#[test]
fn optimize_crops_padding_to_block() {
    let dir = temp_dir();
    let input = write_png(&dir, "padded.png", &padded_block());
    let output = dir.path().join("padded.webp");

    let report = optimize_image(&optimize_options(input, output.clone())).unwrap();

    assert_eq!((report.width, report.height), (40, 40));
    assert!(report.bytes > 0);
    assert_eq!(report.bytes, std::fs::metadata(&output).unwrap().len());
    assert_image_size(&output, 40, 40);

    let data = std::fs::read(&output).unwrap();
    assert_eq!(&data[0..4], b"RIFF");
    assert_eq!(&data[8..12], b"WEBP");
}

#[test]
fn optimize_output_keeps_block_colour() {
    let dir = temp_dir();
    let input = write_png(&dir, "padded.png", &padded_block());
    let output = dir.path().join("out.webp");
    optimize_image(&optimize_options(input, output.clone())).unwrap();

    // Lossy, so only roughly red in the middle
    let img = open_rgba(&output);
    let px = img.get_pixel(20, 20).0;
    assert!(px[0] > 200 && px[1] < 60 && px[2] < 60, "got {:?}", px);
}

#[test]
fn crop_is_idempotent() {
    let once = crop_transparent(DynamicImage::ImageRgba8(block_on_canvas(64, 48, 5, 9, 20, 11)));
    assert_eq!((once.width(), once.height()), (20, 11));
    let twice = crop_transparent(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn crop_bounds_contain_every_content_pixel() {
    let img = block_on_canvas(50, 50, 12, 3, 7, 30);
    let bounds = content_bounds(&img).unwrap();
    for (x, y, px) in img.enumerate_pixels() {
        if px.0 != [0, 0, 0, 0] {
            assert!(x >= bounds.min_x && x <= bounds.max_x);
            assert!(y >= bounds.min_y && y <= bounds.max_y);
        }
    }
    assert_eq!((bounds.width(), bounds.height()), (7, 30));
}

#[test]
fn fully_transparent_input_becomes_single_pixel() {
    let dir = temp_dir();
    let input = write_png(&dir, "blank.png", &RgbaImage::new(32, 16));
    let output = dir.path().join("blank.webp");

    let report = optimize_image(&optimize_options(input, output.clone())).unwrap();

    assert_eq!((report.width, report.height), (1, 1));
    assert_image_size(&output, 1, 1);
}

#[test]
fn optimize_creates_missing_output_directory() {
    let dir = temp_dir();
    let input = write_png(&dir, "padded.png", &padded_block());
    let output = dir.path().join("nested").join("deeper").join("out.webp");

    optimize_image(&optimize_options(input, output.clone())).unwrap();
    assert!(output.exists());
}

#[test]
fn missing_input_is_reported_without_output() {
    let dir = temp_dir();
    let output = dir.path().join("never.webp");
    let err = optimize_image(&optimize_options(missing(&dir, "nope.png"), output.clone()))
        .unwrap_err();

    assert_eq!(err.category(), "io");
    assert!(!output.exists());
}

#[test]
fn undecodable_input_is_a_decode_error() {
    let dir = temp_dir();
    let input = dir.path().join("garbage.png");
    std::fs::write(&input, b"this is not an image").unwrap();

    let err = optimize_image(&optimize_options(input, dir.path().join("out.webp"))).unwrap_err();
    assert_eq!(err.category(), "decode");
}

#[test]
fn sixteen_bit_faint_alpha_survives_load_and_crop() {
    let dir = temp_dir();
    let mut img = ImageBuffer::<Rgba<u16>, Vec<u16>>::new(20, 20);
    img.put_pixel(5, 7, Rgba([0, 0, 0, 100]));
    img.put_pixel(12, 15, Rgba([0, 0, 0, 100]));
    let input = dir.path().join("faint16.png");
    img.save_with_format(&input, ImageFormat::Png).unwrap();

    let loaded = Processor::default().load_image(&input).unwrap();
    let cropped = crop_transparent(loaded);
    assert_eq!((cropped.width(), cropped.height()), (8, 9));

    let report = optimize_image(&optimize_options(input, dir.path().join("faint.webp"))).unwrap();
    assert_eq!((report.width, report.height), (8, 9));
    assert_eq!((report.source_width, report.source_height), (20, 20));
}
