//! Integration tests for SVG input: intrinsic sizing, supersample clamping and
//! the optimize/scale paths

mod common;

use common::assertions::{assert_image_size, open_rgba};
use common::fixtures::{temp_dir, write_svg};
use common::test_images::{LOGO_SVG, NO_VIEWBOX_SVG};
use imgprep::config::clamp_svg_scale;
use imgprep::{
    OptimizeOptions, Processor, ResampleAlgorithm, ScaleOptions, ScaleSpec,
    optimize_image, scale_image,
};

#[test]
fn supersample_factor_is_clamped() {
    assert_eq!(clamp_svg_scale(0.0), 1.0);
    assert_eq!(clamp_svg_scale(1.0), 1.0);
    assert_eq!(clamp_svg_scale(2.0), 2.0);
    assert_eq!(clamp_svg_scale(4.0), 4.0);
    assert_eq!(clamp_svg_scale(100.0), 4.0);
}

#[test]
fn svg_loads_at_intrinsic_size_for_any_supersample() {
    let dir = temp_dir();
    let input = write_svg(&dir, "logo.svg", LOGO_SVG);

    for svg_scale in [-1.0, 1.0, 2.0, 3.0, 16.0] {
        let img = Processor::new(svg_scale).load_image(&input).unwrap();
        assert_eq!((img.width(), img.height()), (64, 48), "svg_scale {svg_scale}");
    }
}

#[test]
fn svg_without_view_box_renders_at_default_size() {
    let dir = temp_dir();
    let input = write_svg(&dir, "dot.svg", NO_VIEWBOX_SVG);

    let img = Processor::default().load_image(&input).unwrap();
    assert_eq!((img.width(), img.height()), (512, 512));
}

#[test]
fn svg_extension_is_case_insensitive() {
    let dir = temp_dir();
    let input = write_svg(&dir, "LOGO.SVG", LOGO_SVG);

    let img = Processor::default().load_image(&input).unwrap();
    assert_eq!((img.width(), img.height()), (64, 48));
}

#[test]
fn optimize_svg_crops_to_shape() {
    let dir = temp_dir();
    let input = write_svg(&dir, "logo.svg", LOGO_SVG);
    let output = dir.path().join("logo.webp");

    let report = optimize_image(&OptimizeOptions {
        input,
        output: output.clone(),
        quality: 90.0,
        svg_scale: 2.0,
    })
    .unwrap();

    // The 32x24 rectangle, give or take an anti-aliased edge
    assert!((32..=34).contains(&report.width), "width {}", report.width);
    assert!((24..=26).contains(&report.height), "height {}", report.height);
    assert_image_size(&output, report.width, report.height);
}

#[test]
fn scale_svg_to_png() {
    let dir = temp_dir();
    let input = write_svg(&dir, "logo.svg", LOGO_SVG);
    let output = dir.path().join("logo.png");

    scale_image(&ScaleOptions {
        input,
        output: output.clone(),
        spec: ScaleSpec::Factor(0.5),
        algorithm: ResampleAlgorithm::Lanczos,
        quality: 90.0,
        svg_scale: 4.0,
    })
    .unwrap();

    let img = open_rgba(&output);
    assert_eq!(img.dimensions(), (32, 24));
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
    let [r, g, b, a] = img.get_pixel(16, 12).0;
    assert!(r >= 254 && g <= 1 && b <= 1 && a >= 254, "got {:?}", [r, g, b, a]);
}

#[test]
fn malformed_svg_is_a_decode_error() {
    let dir = temp_dir();
    let input = write_svg(&dir, "broken.svg", "<svg><rect");

    let err = Processor::default().load_image(&input).unwrap_err();
    assert_eq!(err.category(), "decode");
}
