//! Capture trait definitions
//!
//! Platform-agnostic traits for capture sources. The crate never talks to a
//! real screen or microphone itself; an embedding application supplies a
//! [`CapturePlatform`] and this crate drives it through the session
//! lifecycle. Tests supply scripted fakes.

use async_trait::async_trait;

use super::encoder::Encoder;
use crate::utils::error::AppResult;

/// Kind of media carried by a single track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// Screen/display video
    Video,
    /// Any audio the platform attaches to the display capture
    SystemAudio,
    /// Microphone input
    Microphone,
}

/// One live capture track backed by a platform device.
///
/// `halt` releases the underlying device and is idempotent; after the first
/// call the track produces no further samples.
pub trait MediaTrack: Send + Sync {
    /// Kind of media this track carries
    fn kind(&self) -> TrackKind;

    /// Hard-stop the track, releasing the capture device behind it
    fn halt(&self);
}

/// A live stream: an ordered bag of tracks produced by one acquisition call.
pub struct MediaStream {
    tracks: Vec<Box<dyn MediaTrack>>,
}

impl MediaStream {
    /// Wrap a set of platform tracks as one stream
    pub fn new(tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self { tracks }
    }

    /// Union of the tracks of two streams, first stream's tracks first.
    ///
    /// This is how the display capture and the microphone capture become the
    /// single combined stream handed to the encoder.
    pub fn merged(first: MediaStream, second: MediaStream) -> Self {
        let mut tracks = first.tracks;
        tracks.extend(second.tracks);
        Self { tracks }
    }

    /// Number of tracks in the stream
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Halt every track, releasing all capture devices.
    ///
    /// For a completed session this runs exactly once, after the upload
    /// attempt (never before it).
    pub fn halt_all(&self) {
        for track in &self.tracks {
            track.halt();
        }
    }
}

impl std::fmt::Debug for MediaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStream")
            .field("tracks", &self.tracks.len())
            .finish()
    }
}

/// The platform capture capability: stream acquisition plus encoding.
///
/// Acquisition may prompt the user for permission; a denial surfaces as
/// `AppError::PermissionDenied` and no session starts.
#[async_trait]
pub trait CapturePlatform: Send + Sync + 'static {
    /// Acquire a display capture stream (video plus whatever system audio
    /// the platform provides)
    async fn acquire_display(&self) -> AppResult<MediaStream>;

    /// Acquire a microphone audio stream
    async fn acquire_microphone(&self) -> AppResult<MediaStream>;

    /// Bind an encoder to the combined stream and start it.
    ///
    /// The returned encoder's event sequence must deliver chunks in arrival
    /// order and deliver all of them before the terminating stop event.
    fn start_encoder(&self, stream: &MediaStream) -> AppResult<Encoder>;
}
