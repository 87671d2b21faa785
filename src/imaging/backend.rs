//! Image codec trait and shared types.
//!
//! The [`ImageCodec`] trait defines the operations the encode pipeline needs
//! from a codec: identify, decode, render and encode. Decode and encode are
//! the two expensive steps; the pipeline calls each exactly once per
//! compression.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate with libwebp for lossy WebP.

use super::params::EncodeParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Render failed: {0}")]
    Render(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Pixel size reported by a codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image codecs.
///
/// `Surface` is the codec's decoded, drawable representation. The pipeline
/// never inspects it beyond [`surface_dimensions`](ImageCodec::surface_dimensions).
pub trait ImageCodec {
    type Surface;

    /// Read intrinsic pixel dimensions, decoding as little as possible.
    fn identify(&self, bytes: &[u8]) -> Result<Dimensions, BackendError>;

    /// Fully decode the bytes into a drawable surface.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Surface, BackendError>;

    /// Draw `surface` scaled to exactly `width`×`height` onto a new surface.
    ///
    /// Fails instead of allocating when the new surface would not fit the
    /// codec's memory budget.
    fn render(
        &self,
        surface: &Self::Surface,
        width: u32,
        height: u32,
    ) -> Result<Self::Surface, BackendError>;

    /// Pixel size of a surface.
    fn surface_dimensions(&self, surface: &Self::Surface) -> Dimensions;

    /// Serialize a surface in the requested format.
    fn encode(&self, surface: &Self::Surface, params: &EncodeParams)
    -> Result<Vec<u8>, BackendError>;
}
