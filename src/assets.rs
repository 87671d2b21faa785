//! Owned asset handles for source and encoded bytes.
//!
//! Each asset carries an [`AssetHandle`] issued by a [`HandleRegistry`]. A
//! handle is the presentation layer's reference to the bytes (its
//! [`url`](AssetHandle::url) is what a preview or download link points at).
//! Handles are neither `Clone` nor `Copy`, so each is released exactly once:
//! explicitly through [`AssetHandle::release`] when superseded, or on drop.
//! The registry counts live handles so the "at most one current output per
//! session" rule can be checked.

use crate::imaging::OutputFormat;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Source,
    Encoded,
}

impl AssetKind {
    fn as_str(self) -> &'static str {
        match self {
            AssetKind::Source => "source",
            AssetKind::Encoded => "encoded",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    next_id: AtomicU64,
    live_sources: AtomicUsize,
    live_encoded: AtomicUsize,
}

impl RegistryState {
    fn counter(&self, kind: AssetKind) -> &AtomicUsize {
        match kind {
            AssetKind::Source => &self.live_sources,
            AssetKind::Encoded => &self.live_encoded,
        }
    }
}

/// Issues handles and tracks how many are live.
#[derive(Debug, Clone, Default)]
pub struct HandleRegistry {
    state: Arc<RegistryState>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, kind: AssetKind) -> AssetHandle {
        let id = self.state.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.state.counter(kind).fetch_add(1, Ordering::AcqRel);
        debug!(id, %kind, "asset handle issued");
        AssetHandle {
            id,
            kind,
            registry: Arc::clone(&self.state),
        }
    }

    pub fn live_sources(&self) -> usize {
        self.state.live_sources.load(Ordering::Acquire)
    }

    pub fn live_encoded(&self) -> usize {
        self.state.live_encoded.load(Ordering::Acquire)
    }
}

/// A uniquely owned reference to asset bytes.
#[derive(Debug)]
pub struct AssetHandle {
    id: u64,
    kind: AssetKind,
    registry: Arc<RegistryState>,
}

impl AssetHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Locator the presentation layer can bind to, e.g. `asset:encoded/7`.
    pub fn url(&self) -> String {
        format!("asset:{}/{}", self.kind, self.id)
    }

    /// Release the handle now. Equivalent to dropping it; spelled out at the
    /// points where an asset is superseded.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for AssetHandle {
    fn drop(&mut self) {
        self.registry.counter(self.kind).fetch_sub(1, Ordering::AcqRel);
        debug!(id = self.id, kind = %self.kind, "asset handle released");
    }
}

/// SHA-256 of `bytes`, returned as a hex string.
pub fn content_digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// The original file as selected by the user.
#[derive(Debug)]
pub struct SourceAsset {
    handle: AssetHandle,
    bytes: Vec<u8>,
    mime_type: String,
    digest: String,
}

impl SourceAsset {
    pub fn new(handle: AssetHandle, bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        let digest = content_digest(&bytes);
        Self {
            handle,
            bytes,
            mime_type: mime_type.into(),
            digest,
        }
    }

    pub fn handle(&self) -> &AssetHandle {
        &self.handle
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Release the handle and drop the bytes.
    pub fn release(self) {
        self.handle.release();
    }
}

/// A compressed output produced by the encode pipeline.
#[derive(Debug)]
pub struct EncodedAsset {
    handle: AssetHandle,
    bytes: Vec<u8>,
    format: OutputFormat,
    width: u32,
    height: u32,
    digest: String,
}

impl EncodedAsset {
    pub fn new(
        handle: AssetHandle,
        bytes: Vec<u8>,
        format: OutputFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let digest = content_digest(&bytes);
        Self {
            handle,
            bytes,
            format,
            width,
            height,
            digest,
        }
    }

    pub fn handle(&self) -> &AssetHandle {
        &self.handle
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Rendered pixel size.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn release(self) {
        self.handle.release();
    }
}
