//! Encode pipeline: decode → resolve box → render → encode.
//!
//! One invocation walks the phases in order:
//!
//! ```text
//! Decoding ──► Rendering ──► Encoding ──► CompressedImage
//!    │             │             │
//!    │             │             └── CompressError::Encode
//!    │             └── CompressError::Render (box over the codec's budget)
//!    └── CompressError::Decode
//! ```
//!
//! Decoding and encoding are the two expensive codec calls; rendering only
//! scales the decoded surface into the [resolved output box](crate::resolve::resolve_output_box).
//! The pipeline holds no state: publishing the result and releasing the
//! previous output is the [`Session`](crate::session::Session)'s job.

use crate::dimensions::ImageDimensions;
use crate::events::{Phase, SessionEvent, emit};
use crate::imaging::{BackendError, EncodeParams, ImageCodec, OutputFormat};
use crate::resolve::resolve_output_box;
use crate::types::CompressionOptions;
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("Could not decode source image: {0}")]
    Decode(#[source] BackendError),
    #[error("Could not render output image: {0}")]
    Render(#[source] BackendError),
    #[error("Could not encode output image: {0}")]
    Encode(String),
}

/// Bytes produced by one successful pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
}

fn enter(phase: Phase, events: Option<&Sender<SessionEvent>>) {
    debug!(?phase, "compress phase");
    emit(events, SessionEvent::Phase { phase });
}

/// Run the pipeline once over `source`.
///
/// Quality is passed to the encoder for every format; PNG ignores it.
/// An encoder that reports success but returns no bytes is treated as an
/// encode failure.
pub fn compress<C: ImageCodec>(
    codec: &C,
    source: &[u8],
    dims: &ImageDimensions,
    options: &CompressionOptions,
    events: Option<&Sender<SessionEvent>>,
) -> Result<CompressedImage, CompressError> {
    enter(Phase::Decoding, events);
    let decoded = codec.decode(source).map_err(CompressError::Decode)?;

    enter(Phase::Rendering, events);
    let output_box = resolve_output_box(options, dims);
    let rendered = codec
        .render(&decoded, output_box.width, output_box.height)
        .map_err(CompressError::Render)?;
    let rendered_dims = codec.surface_dimensions(&rendered);

    enter(Phase::Encoding, events);
    let params = EncodeParams {
        format: options.output_format,
        quality: options.quality,
    };
    let bytes = codec.encode(&rendered, &params).map_err(|e| match e {
        BackendError::Encode(msg) => CompressError::Encode(msg),
        other => CompressError::Encode(other.to_string()),
    })?;
    if bytes.is_empty() {
        return Err(CompressError::Encode("encoder returned no data".into()));
    }

    Ok(CompressedImage {
        bytes,
        format: params.format,
        width: rendered_dims.width,
        height: rendered_dims.height,
    })
}
