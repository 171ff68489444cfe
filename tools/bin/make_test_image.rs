use anyhow::{Context, Result};
use clap::{Arg, Command};
use image::{ImageFormat, Rgba, RgbaImage};

const SIDE: u32 = 100;
const BLOCK_START: u32 = 30;
const BLOCK_END: u32 = 70;

/// 100x100 fully transparent canvas with an opaque red block at (30,30)-(69,69).
fn padded_fixture() -> RgbaImage {
    RgbaImage::from_fn(SIDE, SIDE, |x, y| {
        let inside = (BLOCK_START..BLOCK_END).contains(&x) && (BLOCK_START..BLOCK_END).contains(&y);
        if inside {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

fn main() -> Result<()> {
    let matches = Command::new("make_test_image")
        .about("Writes a PNG with transparent padding around a red square, for trying out `imgprep optimize`")
        .arg(
            Arg::new("output")
                .help("Where to write the PNG")
                .default_value("test-image.png")
                .value_name("PATH"),
        )
        .get_matches();

    let output = matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or("test-image.png");

    padded_fixture()
        .save_with_format(output, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", output))?;

    println!("Created {} with transparent padding", output);
    Ok(())
}
