//! Shared types used across the resolver, pipeline and session.
//!
//! These types are handed to the presentation layer inside
//! [`SessionView`](crate::view::SessionView) and must serialize cleanly.

use crate::dimensions::ImageDimensions;
use crate::imaging::{OutputFormat, Quality};
use serde::{Deserialize, Serialize};

/// User-controlled compression settings.
///
/// While `aspect_locked` is true, `target_width / target_height` tracks the
/// loaded image's aspect ratio; the resolver maintains this by recomputing
/// the paired field on every edit. Before the first image is loaded the
/// target box is `0x0`; loading an image resets it to the natural size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompressionOptions {
    pub quality: Quality,
    pub output_format: OutputFormat,
    pub target_width: u32,
    pub target_height: u32,
    pub aspect_locked: bool,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            output_format: OutputFormat::default(),
            target_width: 0,
            target_height: 0,
            aspect_locked: true,
        }
    }
}

impl CompressionOptions {
    /// Reset the target box to the image's natural size and re-lock the ratio.
    ///
    /// Quality and output format are kept: they are user preferences, not
    /// properties of the image.
    pub fn reset_for(&mut self, dims: &ImageDimensions) {
        self.target_width = dims.natural_width();
        self.target_height = dims.natural_height();
        self.aspect_locked = true;
    }

    pub fn target(&self) -> (u32, u32) {
        (self.target_width, self.target_height)
    }
}

/// Which edge of the target box an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionField {
    Width,
    Height,
}

/// The final integer box the image is rendered and encoded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputBox {
    pub width: u32,
    pub height: u32,
}
