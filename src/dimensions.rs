//! Dimension model: the natural size and aspect ratio of a loaded image.
//!
//! The aspect ratio is computed once, when the image is loaded, and is the
//! only ratio used for locked-aspect edits until the next load.

use crate::imaging::{BackendError, Dimensions, ImageCodec};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DimensionError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),
}

impl From<BackendError> for DimensionError {
    fn from(err: BackendError) -> Self {
        DimensionError::InvalidImage(err.to_string())
    }
}

/// Natural pixel size of a source image plus its width/height ratio.
///
/// Fields are private: the only way to build one is through [`new`](Self::new),
/// which rejects zero-sized images.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageDimensions {
    natural_width: u32,
    natural_height: u32,
    aspect_ratio: f64,
}

impl ImageDimensions {
    pub fn new(natural_width: u32, natural_height: u32) -> Result<Self, DimensionError> {
        if natural_width == 0 || natural_height == 0 {
            return Err(DimensionError::InvalidImage(format!(
                "image reports a zero dimension ({natural_width}x{natural_height})"
            )));
        }
        Ok(Self {
            natural_width,
            natural_height,
            aspect_ratio: natural_width as f64 / natural_height as f64,
        })
    }

    pub fn natural_width(&self) -> u32 {
        self.natural_width
    }

    pub fn natural_height(&self) -> u32 {
        self.natural_height
    }

    /// Width divided by height, unrounded.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }
}

impl TryFrom<Dimensions> for ImageDimensions {
    type Error = DimensionError;

    fn try_from(dims: Dimensions) -> Result<Self, Self::Error> {
        Self::new(dims.width, dims.height)
    }
}

/// Probe `bytes` for their intrinsic pixel size.
///
/// Fails with [`DimensionError::InvalidImage`] when the codec cannot read the
/// image or it reports a zero dimension.
pub fn load_dimensions(
    codec: &impl ImageCodec,
    bytes: &[u8],
) -> Result<ImageDimensions, DimensionError> {
    let dims = codec.identify(bytes)?;
    ImageDimensions::try_from(dims)
}
