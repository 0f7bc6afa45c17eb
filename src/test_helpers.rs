//! Shared test utilities: synthetic image fixtures.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let input = tmp.path().join("input.png");
//! create_test_png(&input, 10, 10);
//! ```

use image::{ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Gradient pixels so filters have something to act on.
fn gradient(x: u32, y: u32) -> [u8; 3] {
    [(x * 16 % 256) as u8, (y * 16 % 256) as u8, 128]
}

/// Create a small valid RGBA PNG file with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let [r, g, b] = gradient(x, y);
        Rgba([r, g, b, 255])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb(gradient(x, y)));
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}
