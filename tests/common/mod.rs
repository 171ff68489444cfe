//! Common test utilities and helpers for the imgprep integration tests
//!
//! Fixtures are written into a fresh temporary directory per test so the
//! tests can run in parallel.

#![allow(dead_code)]

/// In-memory test images
pub mod test_images {
    use image::{Rgba, RgbaImage};

    pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    /// 100x100 transparent canvas with an opaque red block at (30,30)-(69,69)
    pub fn padded_block() -> RgbaImage {
        block_on_canvas(100, 100, 30, 30, 40, 40)
    }

    /// Transparent `w`x`h` canvas with an opaque red `bw`x`bh` block at (`x`,`y`)
    pub fn block_on_canvas(w: u32, h: u32, x: u32, y: u32, bw: u32, bh: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |px, py| {
            if (x..x + bw).contains(&px) && (y..y + bh).contains(&py) {
                RED
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    /// Opaque horizontal/vertical gradient, handy for resampling checks
    pub fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            Rgba([
                (x * 255 / w.max(1)) as u8,
                (y * 255 / h.max(1)) as u8,
                128,
                255,
            ])
        })
    }

    pub const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="48" viewBox="0 0 64 48">
  <rect x="16" y="12" width="32" height="24" fill="#ff0000"/>
</svg>"##;

    pub const NO_VIEWBOX_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20">
  <circle cx="10" cy="10" r="8" fill="#0000ff"/>
</svg>"##;
}

/// On-disk fixtures
pub mod fixtures {
    use std::fs;
    use std::path::PathBuf;

    use image::{ImageFormat, RgbaImage};
    use tempfile::TempDir;

    pub fn temp_dir() -> TempDir {
        tempfile::tempdir().expect("failed to create temp dir")
    }

    /// Write `image` as PNG into `dir` and return its path
    pub fn write_png(dir: &TempDir, name: &str, image: &RgbaImage) -> PathBuf {
        let path = dir.path().join(name);
        image
            .save_with_format(&path, ImageFormat::Png)
            .expect("failed to write PNG fixture");
        path
    }

    pub fn write_svg(dir: &TempDir, name: &str, svg: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, svg).expect("failed to write SVG fixture");
        path
    }

    /// Path inside `dir` that does not exist
    pub fn missing(dir: &TempDir, name: &str) -> PathBuf {
        dir.path().join(name)
    }
}

pub mod assertions {
    use std::path::Path;

    use image::RgbaImage;

    /// Decode `path` from its content and return it as RGBA8
    pub fn open_rgba(path: &Path) -> RgbaImage {
        image::ImageReader::open(path)
            .expect("output missing")
            .with_guessed_format()
            .expect("unreadable output")
            .decode()
            .expect("output does not decode")
            .into_rgba8()
    }

    pub fn assert_image_size(path: &Path, width: u32, height: u32) {
        let img = open_rgba(path);
        assert_eq!(
            img.dimensions(),
            (width, height),
            "unexpected size for {}",
            path.display()
        );
    }
}
