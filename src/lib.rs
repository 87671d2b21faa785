//! # imgsqueeze
//!
//! The core of an interactive image compressor: take one image, let the user
//! pick an output size, format and quality, and produce a smaller file.
//! Everything a UI needs to drive that loop lives here; the UI itself does not.
//!
//! # Architecture: Load → Edit → Compress
//!
//! ```text
//! bytes + MIME ──► Session::load_file ──► ImageDimensions (natural size, ratio)
//!                        │
//!   user edits ──► Session::edit_dimension / set_quality / set_output_format
//!                        │            (resolver keeps the ratio while locked)
//!                        ▼
//!                 Session::compress ──► decode → render → encode ──► EncodedAsset
//!                        │
//!                        ▼
//!                  SessionView (sizes, reduction, labels) ──► presentation layer
//! ```
//!
//! The arithmetic (ratio tracking, fit-inside, size formatting) is pure and
//! lives apart from the codec, so almost all behavior is testable without
//! encoding a single pixel.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | The stateful aggregate: loaded image, options, current output, status |
//! | [`dimensions`] | Natural size and aspect ratio of a loaded image |
//! | [`resolve`] | Aspect-lock constraint resolver and output-box calculation |
//! | [`compress`] | The decode → render → encode pipeline |
//! | [`assets`] | Uniquely owned handles for source and encoded bytes |
//! | [`output`] | Human-readable sizes, reduction percentage, UI labels |
//! | [`view`] | Serializable snapshot handed to the presentation layer |
//! | [`events`] | Progress events for callers that want a phase indicator |
//! | [`config`] | `imgsqueeze.toml` loading, validation and merging |
//! | [`types`] | Shared option and box types |
//! | [`imaging`] | Codec trait, the `image`/`webp` backend, pixel math |
//!
//! # Design Decisions
//!
//! ## Fit Inside, Never Stretch
//!
//! With the ratio locked, the output is the largest box with the image's
//! ratio that fits inside the requested width and height. Neither requested
//! edge is ever exceeded, and the image is never distorted. Unlocking the
//! ratio renders at exactly the requested box.
//!
//! ## Synchronous Pipeline, Borrow-Checked Single Flight
//!
//! Decode and encode are two explicit codec calls in a plain function. There
//! is no runtime: a [`Session`](session::Session) takes `&mut self` for every
//! operation, so a second compress cannot start while one is running.
//!
//! ## Owned Handles
//!
//! Each asset owns an [`AssetHandle`](assets::AssetHandle) that is released
//! exactly once. A session never holds more than one current output.

pub mod assets;
pub mod compress;
pub mod config;
pub mod dimensions;
pub mod events;
pub mod imaging;
pub mod output;
pub mod resolve;
pub mod session;
pub mod types;
pub mod view;

pub use config::CompressorConfig;
pub use session::{Session, SessionError, SessionStatus};

#[cfg(test)]
pub(crate) mod test_helpers;
