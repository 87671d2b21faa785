//! Serializable snapshot of a [`Session`] for the presentation layer.
//!
//! The view carries raw values alongside the preformatted labels from
//! [`output`](crate::output), so a UI can render it without doing any
//! arithmetic of its own:
//!
//! ```json
//! {
//!   "status": "ready",
//!   "original_size": 2527068,
//!   "compressed_size": 626760,
//!   "labels": {
//!     "original_size": "2.41 MB",
//!     "compressed_size": "612.07 KB",
//!     "reduction": "75.2% reduction",
//!     "quality": "Quality (80%)",
//!     "download_filename": "compressed.jpeg",
//!     "lock_toggle": "Unlock Ratio"
//!   },
//!   ...
//! }
//! ```

use crate::dimensions::ImageDimensions;
use crate::imaging::{ImageCodec, Quality};
use crate::output::{
    download_filename, format_reduction, format_size, lock_toggle_label, quality_label,
};
use crate::resolve::resolve_output_box;
use crate::session::{Session, SessionStatus};
use crate::types::{CompressionOptions, OutputBox};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub status: SessionStatus,
    pub dimensions: Option<ImageDimensions>,
    pub options: CompressionOptions,
    /// Box the next compress would render at.
    pub output_box: Option<OutputBox>,
    pub original_size: Option<u64>,
    pub compressed_size: Option<u64>,
    pub error_message: Option<String>,
    pub last_message: Option<String>,
    pub labels: ViewLabels,
    pub bounds: UiBounds,
    pub source: Option<AssetRef>,
    pub output: Option<OutputRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewLabels {
    pub original_size: Option<String>,
    pub compressed_size: Option<String>,
    pub reduction: Option<String>,
    pub quality: String,
    pub download_filename: Option<String>,
    pub lock_toggle: &'static str,
}

/// Input ranges the UI should offer. Advisory: the session accepts values
/// outside them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UiBounds {
    pub min_dimension: u32,
    pub max_dimension: u32,
    pub quality_min: f32,
    pub quality_max: f32,
    pub quality_step: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRef {
    pub url: String,
    pub digest: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRef {
    pub url: String,
    pub digest: String,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

impl SessionView {
    pub fn capture<C: ImageCodec>(session: &Session<C>) -> Self {
        let options = *session.options();
        let dimensions = session.dimensions().copied();
        let source = session.source();
        let output = session.output();

        let original_size = source.map(|s| s.byte_size());
        let compressed_size = output.map(|o| o.byte_size());
        let reduction = match (original_size, compressed_size) {
            (Some(orig), Some(comp)) => format_reduction(orig, comp),
            _ => None,
        };
        let bounds = session.bounds();

        Self {
            status: session.status(),
            dimensions,
            options,
            output_box: dimensions.map(|d| resolve_output_box(&options, &d)),
            original_size,
            compressed_size,
            error_message: session.error_message().map(str::to_string),
            last_message: session.last_message().map(str::to_string),
            labels: ViewLabels {
                original_size: original_size.map(format_size),
                compressed_size: compressed_size.map(format_size),
                reduction,
                quality: quality_label(options.quality),
                download_filename: output.map(|o| download_filename(o.format())),
                lock_toggle: lock_toggle_label(options.aspect_locked),
            },
            bounds: UiBounds {
                min_dimension: bounds.min_dimension,
                max_dimension: bounds.max_dimension,
                quality_min: Quality::MIN,
                quality_max: Quality::MAX,
                quality_step: Quality::STEP,
            },
            source: source.map(|s| AssetRef {
                url: s.handle().url(),
                digest: s.digest().to_string(),
                mime_type: s.mime_type().to_string(),
            }),
            output: output.map(|o| {
                let (width, height) = o.dimensions();
                OutputRef {
                    url: o.handle().url(),
                    digest: o.digest().to_string(),
                    mime_type: o.format().mime_type().to_string(),
                    width,
                    height,
                }
            }),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
