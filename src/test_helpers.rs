//! Shared test utilities for the imgsqueeze test suite.
//!
//! Synthesizes small in-memory images so codec, pipeline and session tests
//! never need fixture files.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let bytes = jpeg_bytes(800, 600);
//! let mut session = Session::new(RustBackend::new(), &CompressorConfig::default());
//! session.load_file(bytes, "image/jpeg").unwrap();
//! ```

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};

/// A deterministic pattern with enough detail that lossy encoders show a
/// size difference across quality levels.
fn pattern(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
    })
}

/// Encode a synthetic RGB image as JPEG (quality 90).
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = pattern(width, height);
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, 90)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// Encode a synthetic RGB image as PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = pattern(width, height);
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// Encode a synthetic RGBA image (half-transparent) as PNG.
pub fn rgba_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 200, 128])
    });
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
        .unwrap();
    buf
}
