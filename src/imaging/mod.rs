//! Image codec layer.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Decode** | `image::load_from_memory` |
//! | **Render** | `resize_exact` with a configurable filter |
//! | **Encode** | JPEG/PNG via `image`, lossy WebP via `webp` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for box math (unit testable)
//! - **Parameters**: Quality, output format, resampling filter
//! - **Backend**: [`ImageCodec`] trait + [`RustBackend`]

pub mod backend;
pub mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageCodec};
pub use params::{EncodeParams, OutputFormat, Quality, QualityOutOfRange, ResampleFilter};
pub use rust_backend::RustBackend;
