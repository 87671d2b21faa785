//! Session state: one user's loaded image, options, and current output.
//!
//! A [`Session`] is the only stateful piece of the crate. It owns:
//!
//! - the loaded source image ([`SourceAsset`] plus its [`ImageDimensions`]),
//! - the user's [`CompressionOptions`],
//! - at most one current [`EncodedAsset`],
//! - the last error and the last user-facing message.
//!
//! ## Status
//!
//! Status is derived from what the session holds rather than stored:
//!
//! ```text
//! Idle ──load──► Previewing ──compress──► Ready
//!   │               │  ▲                    │
//!   │               │  └────────load────────┘
//!   └──failure──────┴──────► Error ◄────────┘ (until the next success)
//! ```
//!
//! The transient states (loading, decoding, rendering, encoding) are not
//! observable between calls since every operation runs to completion; they
//! are reported through [`SessionEvent`]s instead.
//!
//! ## Single flight
//!
//! Every mutating method takes `&mut self`, so overlapping `compress`/`load`
//! calls on one session cannot be expressed. Sharing a session across threads
//! means wrapping it in a `Mutex`, which serializes them.

use crate::assets::{AssetKind, EncodedAsset, HandleRegistry, SourceAsset};
use crate::compress::{self, CompressError};
use crate::config::{BoundsConfig, CompressorConfig};
use crate::dimensions::{DimensionError, ImageDimensions, load_dimensions};
use crate::events::{SessionEvent, emit};
use crate::imaging::{ImageCodec, OutputFormat, Quality, RustBackend};
use crate::resolve::{on_dimension_edit, on_dimension_input};
use crate::types::{CompressionOptions, DimensionField};
use crate::view::SessionView;
use serde::Serialize;
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{info, warn};

pub const MSG_UPLOADED: &str = "Image uploaded successfully!";
pub const MSG_COMPRESSED: &str = "Image compressed successfully!";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Unsupported file type: {mime}")]
    UnsupportedFileType { mime: String },
    #[error(transparent)]
    InvalidImage(#[from] DimensionError),
    #[error("No source image loaded")]
    NoSourceAsset,
    #[error(transparent)]
    Compress(#[from] CompressError),
}

impl SessionError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::UnsupportedFileType { .. } | SessionError::InvalidImage(_) => {
                "Please select a valid image file"
            }
            SessionError::NoSourceAsset => "No image uploaded.",
            SessionError::Compress(_) => "Failed to compress image. Please try again.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Nothing loaded.
    Idle,
    /// A source is loaded and can be previewed; no output yet.
    Previewing,
    /// An encoded output is current.
    Ready,
    /// The last load or compress failed.
    Error,
}

#[derive(Debug)]
struct LoadedImage {
    source: SourceAsset,
    dims: ImageDimensions,
}

pub struct Session<C: ImageCodec = RustBackend> {
    codec: C,
    registry: HandleRegistry,
    loaded: Option<LoadedImage>,
    output: Option<EncodedAsset>,
    options: CompressionOptions,
    lock_on_load: bool,
    bounds: BoundsConfig,
    error: Option<String>,
    message: Option<String>,
    events: Option<Sender<SessionEvent>>,
}

impl Session<RustBackend> {
    /// Session over the production codec, using the configured resampling filter.
    pub fn from_config(config: &CompressorConfig) -> Self {
        Self::new(RustBackend::with_filter(config.rendering.filter), config)
    }
}

impl<C: ImageCodec> Session<C> {
    pub fn new(codec: C, config: &CompressorConfig) -> Self {
        let defaults = &config.defaults;
        Self {
            codec,
            registry: HandleRegistry::new(),
            loaded: None,
            output: None,
            options: CompressionOptions {
                quality: defaults.quality,
                output_format: defaults.output_format,
                aspect_locked: defaults.aspect_locked,
                ..CompressionOptions::default()
            },
            lock_on_load: defaults.aspect_locked,
            bounds: config.bounds,
            error: None,
            message: None,
            events: None,
        }
    }

    /// Report progress on `events` from now on.
    pub fn with_events(mut self, events: Sender<SessionEvent>) -> Self {
        self.events = Some(events);
        self
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load a new source image.
    ///
    /// Non-`image/` MIME types are rejected without touching the current
    /// image. Bytes that do not identify as an image release the current
    /// image (the user replaced it) and leave the session in `Error`.
    pub fn load_file(
        &mut self,
        bytes: impl Into<Vec<u8>>,
        mime_type: &str,
    ) -> Result<&ImageDimensions, SessionError> {
        if !is_image_mime(mime_type) {
            return Err(self.fail(SessionError::UnsupportedFileType {
                mime: mime_type.to_string(),
            }));
        }

        let bytes = bytes.into();
        emit(
            self.events.as_ref(),
            SessionEvent::Loading {
                mime_type: mime_type.to_string(),
                byte_size: bytes.len() as u64,
            },
        );

        // The new file supersedes whatever was loaded, valid or not.
        self.release_current();

        let dims = match load_dimensions(&self.codec, &bytes) {
            Ok(dims) => dims,
            Err(e) => return Err(self.fail(e.into())),
        };

        self.options.reset_for(&dims);
        self.options.aspect_locked = self.lock_on_load;
        self.error = None;
        self.message = Some(MSG_UPLOADED.to_string());

        let source = SourceAsset::new(self.registry.issue(AssetKind::Source), bytes, mime_type);
        info!(
            width = dims.natural_width(),
            height = dims.natural_height(),
            bytes = source.byte_size(),
            mime = mime_type,
            "image loaded"
        );
        emit(
            self.events.as_ref(),
            SessionEvent::Loaded {
                width: dims.natural_width(),
                height: dims.natural_height(),
            },
        );

        let loaded = self.loaded.insert(LoadedImage { source, dims });
        Ok(&loaded.dims)
    }

    // =========================================================================
    // Compressing
    // =========================================================================

    /// Encode the loaded image with the current options.
    ///
    /// On success the previous output is released before the new one becomes
    /// current. On failure nothing is published and the previous output (if
    /// any) and the source are kept so the user can retry.
    pub fn compress(&mut self) -> Result<&EncodedAsset, SessionError> {
        let loaded = match self.loaded.as_ref() {
            Some(loaded) => loaded,
            None => return Err(self.fail(SessionError::NoSourceAsset)),
        };

        let result = compress::compress(
            &self.codec,
            loaded.source.bytes(),
            &loaded.dims,
            &self.options,
            self.events.as_ref(),
        );
        let original_size = loaded.source.byte_size();

        let image = match result {
            Ok(image) => image,
            Err(e) => return Err(self.fail(e.into())),
        };

        if let Some(previous) = self.output.take() {
            previous.release();
        }
        let encoded = EncodedAsset::new(
            self.registry.issue(AssetKind::Encoded),
            image.bytes,
            image.format,
            image.width,
            image.height,
        );

        info!(
            format = %encoded.format(),
            width = image.width,
            height = image.height,
            original = original_size,
            compressed = encoded.byte_size(),
            "image compressed"
        );
        emit(
            self.events.as_ref(),
            SessionEvent::Compressed {
                byte_size: encoded.byte_size(),
                width: image.width,
                height: image.height,
            },
        );

        self.error = None;
        self.message = Some(MSG_COMPRESSED.to_string());
        let current: &EncodedAsset = self.output.insert(encoded);
        Ok(current)
    }

    // =========================================================================
    // Option edits
    // =========================================================================

    /// Apply raw text typed into a dimension field. Anything that is not a
    /// positive integer is ignored.
    pub fn edit_dimension(&mut self, field: DimensionField, raw: &str) {
        self.options = on_dimension_input(field, raw, &self.options, self.dimensions());
    }

    pub fn set_dimension(&mut self, field: DimensionField, value: u32) {
        self.options = on_dimension_edit(field, value, &self.options, self.dimensions());
    }

    /// Flip the aspect lock. The target box is left as it is.
    pub fn toggle_aspect_lock(&mut self) {
        self.options.aspect_locked = !self.options.aspect_locked;
    }

    /// Set quality from a slider fraction; clamped to [0.1, 1.0].
    pub fn set_quality(&mut self, value: f32) {
        self.options.quality = Quality::new(value);
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.options.output_format = format;
    }

    /// Set the output format from a MIME string. Unknown types are ignored;
    /// returns whether the MIME type was recognized.
    pub fn set_output_format_mime(&mut self, mime_type: &str) -> bool {
        match OutputFormat::from_mime(mime_type) {
            Some(format) => {
                self.options.output_format = format;
                true
            }
            None => false,
        }
    }

    /// Dismiss the last message.
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn status(&self) -> SessionStatus {
        if self.error.is_some() {
            SessionStatus::Error
        } else if self.output.is_some() {
            SessionStatus::Ready
        } else if self.loaded.is_some() {
            SessionStatus::Previewing
        } else {
            SessionStatus::Idle
        }
    }

    pub fn options(&self) -> &CompressionOptions {
        &self.options
    }

    pub fn dimensions(&self) -> Option<&ImageDimensions> {
        self.loaded.as_ref().map(|l| &l.dims)
    }

    pub fn source(&self) -> Option<&SourceAsset> {
        self.loaded.as_ref().map(|l| &l.source)
    }

    pub fn output(&self) -> Option<&EncodedAsset> {
        self.output.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn bounds(&self) -> BoundsConfig {
        self.bounds
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Handle registry shared with every asset this session issues.
    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    pub fn live_encoded(&self) -> usize {
        self.registry.live_encoded()
    }

    pub fn live_sources(&self) -> usize {
        self.registry.live_sources()
    }

    /// Snapshot for the presentation layer.
    pub fn view(&self) -> SessionView {
        SessionView::capture(self)
    }

    fn release_current(&mut self) {
        if let Some(previous) = self.output.take() {
            previous.release();
        }
        if let Some(previous) = self.loaded.take() {
            previous.source.release();
        }
    }

    fn fail(&mut self, err: SessionError) -> SessionError {
        let message = err.user_message().to_string();
        warn!(error = %err, "{}", message);
        emit(
            self.events.as_ref(),
            SessionEvent::Failed {
                message: message.clone(),
            },
        );
        self.error = Some(message.clone());
        self.message = Some(message);
        err
    }
}

fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}
