//! Pure Rust image codec, except for lossy WebP.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, WebP, …) | `image::load_from_memory` |
//! | Render | `image::DynamicImage::resize_exact` with the configured filter, under an allocation budget |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (quality 1–100) |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (quality ignored) |
//! | Encode → WebP | `webp::Encoder` (libwebp, lossy, quality 0–100) |

use super::backend::{BackendError, Dimensions, ImageCodec};
use super::params::{EncodeParams, OutputFormat, ResampleFilter};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

/// Bytes a single render may allocate, matching the `image` crate's default
/// decoder limit.
pub const DEFAULT_MAX_ALLOC: u64 = 512 * 1024 * 1024;

/// `resize_exact` scales vertically first into an RGBA f32 buffer of
/// `source_width × height`.
const SCRATCH_BYTES_PER_PIXEL: u64 = 16;

/// Codec backed by the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug, Clone, Copy)]
pub struct RustBackend {
    filter: ResampleFilter,
    max_alloc: u64,
}

impl Default for RustBackend {
    fn default() -> Self {
        Self {
            filter: ResampleFilter::default(),
            max_alloc: DEFAULT_MAX_ALLOC,
        }
    }
}

impl RustBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: ResampleFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Override the per-render allocation budget.
    pub fn with_max_alloc(mut self, bytes: u64) -> Self {
        self.max_alloc = bytes;
        self
    }

    pub fn filter(&self) -> ResampleFilter {
        self.filter
    }

    pub fn max_alloc(&self) -> u64 {
        self.max_alloc
    }

    /// Reject a render whose output or scratch buffer would exceed the budget.
    fn check_render_budget(
        &self,
        surface: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<(), BackendError> {
        let bytes_per_pixel = surface.color().bytes_per_pixel() as u64;
        let output = (width as u64 * height as u64).checked_mul(bytes_per_pixel);
        let scratch =
            (surface.width() as u64 * height as u64).checked_mul(SCRATCH_BYTES_PER_PIXEL);

        match (output, scratch) {
            (Some(output), Some(scratch)) if output.max(scratch) <= self.max_alloc => Ok(()),
            _ => Err(BackendError::Render(format!(
                "{}x{} exceeds the {} byte allocation limit",
                width, height, self.max_alloc
            ))),
        }
    }
}

fn filter_type(filter: ResampleFilter) -> FilterType {
    match filter {
        ResampleFilter::Nearest => FilterType::Nearest,
        ResampleFilter::Triangle => FilterType::Triangle,
        ResampleFilter::CatmullRom => FilterType::CatmullRom,
        ResampleFilter::Gaussian => FilterType::Gaussian,
        ResampleFilter::Lanczos3 => FilterType::Lanczos3,
    }
}

/// Encode as baseline JPEG. JPEG has no alpha channel, so the surface is
/// flattened to RGB first.
fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, BackendError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| BackendError::Encode(format!("JPEG encode failed: {}", e)))?;
    Ok(buf)
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::Encode(format!("PNG encode failed: {}", e)))?;
    Ok(buf)
}

/// Encode as lossy WebP through libwebp.
fn encode_webp(img: &DynamicImage, quality: f32) -> Result<Vec<u8>, BackendError> {
    let rgba = img.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
    let memory = encoder
        .encode_simple(false, quality)
        .map_err(|e| BackendError::Encode(format!("WebP encode failed: {:?}", e)))?;
    Ok(memory.to_vec())
}

impl ImageCodec for RustBackend {
    type Surface = DynamicImage;

    fn identify(&self, bytes: &[u8]) -> Result<Dimensions, BackendError> {
        let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| BackendError::Decode(format!("Failed to read dimensions: {}", e)))?;
        Ok(Dimensions { width, height })
    }

    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, BackendError> {
        image::load_from_memory(bytes)
            .map_err(|e| BackendError::Decode(format!("Failed to decode image: {}", e)))
    }

    fn render(
        &self,
        surface: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<DynamicImage, BackendError> {
        self.check_render_budget(surface, width, height)?;
        Ok(surface.resize_exact(width, height, filter_type(self.filter)))
    }

    fn surface_dimensions(&self, surface: &DynamicImage) -> Dimensions {
        Dimensions {
            width: surface.width(),
            height: surface.height(),
        }
    }

    fn encode(
        &self,
        surface: &DynamicImage,
        params: &EncodeParams,
    ) -> Result<Vec<u8>, BackendError> {
        match params.format {
            OutputFormat::Jpeg => encode_jpeg(surface, params.quality.as_jpeg_quality()),
            OutputFormat::Png => encode_png(surface),
            OutputFormat::WebP => encode_webp(surface, params.quality.as_webp_quality()),
        }
    }
}
