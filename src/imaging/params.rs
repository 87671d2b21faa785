//! Parameter types for image operations.
//!
//! These types describe *what* to produce, not *how*. They are the interface
//! between the encode pipeline (which decides the output box and format) and
//! the [`backend`](super::backend) (which does the pixel work). Keeping them
//! separate lets tests drive the pipeline with a recording mock codec.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (0.1–1.0, default 0.8). Clamped on construction.
//! - [`OutputFormat`] — JPEG, PNG or WebP, with MIME and extension mapping.
//! - [`ResampleFilter`] — Scaling filter used when rendering into the output box.
//! - [`EncodeParams`] — Format + quality handed to the encoder.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Quality setting for lossy image encoding, as a fraction in `[0.1, 1.0]`.
///
/// [`Quality::new`] clamps; deserializing rejects out-of-range values so a
/// typo like `quality = 80` in a config file is reported, not silently
/// pinned to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Quality(f32);

#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("quality must be between 0.1 and 1.0, got {0}")]
pub struct QualityOutOfRange(pub f32);

impl TryFrom<f32> for Quality {
    type Error = QualityOutOfRange;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(QualityOutOfRange(value))
        }
    }
}

impl From<Quality> for f32 {
    fn from(quality: Quality) -> f32 {
        quality.0
    }
}

impl Quality {
    pub const MIN: f32 = 0.1;
    pub const MAX: f32 = 1.0;
    /// Granularity of the quality slider.
    pub const STEP: f32 = 0.01;

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Quality as a whole percentage, e.g. `0.8` → `80`.
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    /// Quality on the 1–100 integer scale used by the JPEG encoder.
    pub fn as_jpeg_quality(self) -> u8 {
        self.percent().clamp(1, 100) as u8
    }

    /// Quality on the 0–100 float scale used by libwebp.
    pub fn as_webp_quality(self) -> f32 {
        self.0 * 100.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(0.8)
    }
}

/// Output encodings the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Jpeg, OutputFormat::Png, OutputFormat::WebP];

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }

    /// File extension, taken from the MIME subtype (`image/jpeg` → `jpeg`).
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    /// Parse a MIME identifier. Matching is case-insensitive and ignores
    /// parameters (`image/jpeg; q=1`).
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        Self::ALL
            .into_iter()
            .find(|f| f.mime_type().eq_ignore_ascii_case(essence))
    }

    /// Whether the encoder honors [`Quality`]. PNG is lossless and ignores it.
    pub fn is_lossy(self) -> bool {
        !matches!(self, OutputFormat::Png)
    }

    /// Short display name, as shown in a format picker.
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::WebP => "WEBP",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resampling filter used when scaling the decoded image into the output box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

/// Parameters for a single encode call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeParams {
    pub format: OutputFormat,
    pub quality: Quality,
}
