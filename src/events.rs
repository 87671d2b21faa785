//! Progress events emitted while loading and compressing.
//!
//! Operations run synchronously; a presentation layer that wants to show
//! "Processing..." or a phase indicator subscribes with an `mpsc` channel
//! (see [`Session::with_events`](crate::session::Session::with_events)) and
//! drains it from another thread.

use serde::Serialize;
use std::sync::mpsc::Sender;

/// Steps of one compress invocation, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Decoding,
    Rendering,
    Encoding,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Loading { mime_type: String, byte_size: u64 },
    Loaded { width: u32, height: u32 },
    Phase { phase: Phase },
    Compressed { byte_size: u64, width: u32, height: u32 },
    Failed { message: String },
}

/// Send `event` if anyone is listening. A hung-up receiver is not an error:
/// the operation itself does not depend on being observed.
pub(crate) fn emit(events: Option<&Sender<SessionEvent>>, event: SessionEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}
