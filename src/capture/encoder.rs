//! Encoder event source
//!
//! The platform encoder is modeled as a lazy, finite, non-restartable
//! sequence of byte-chunk events terminated by exactly one stop event. The
//! session controller consumes the sequence through the receiver; nothing
//! here re-implements encoding.

use tokio::sync::mpsc;

/// Container the encoder produces. Fixed for the whole crate.
pub const CONTAINER_MIME: &str = "video/webm";

/// File extension matching [`CONTAINER_MIME`]
pub const CONTAINER_EXT: &str = "webm";

/// One event emitted by the platform encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderEvent {
    /// A chunk of encoded data became available. May be empty; empty chunks
    /// are dropped by the consumer.
    Data(Vec<u8>),
    /// Encoding finished. Always the last event; every `Data` event was
    /// delivered before it.
    Stopped,
}

/// Handle for asking the platform encoder to finalize.
///
/// Stop is asynchronous: the platform flushes remaining `Data` events and
/// then emits `Stopped` on the event channel.
pub trait EncoderControl: Send + Sync {
    /// Request that encoding stop. Idempotent.
    fn request_stop(&self);
}

/// A started encoder: its event sequence plus the stop handle
pub struct Encoder {
    /// Event sequence, consumed exactly once by the session controller
    pub events: mpsc::UnboundedReceiver<EncoderEvent>,

    /// Stop handle
    pub control: Box<dyn EncoderControl>,
}

impl std::fmt::Debug for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoder").finish_non_exhaustive()
    }
}
