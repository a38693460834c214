//! Test utilities
//!
//! Scripted stand-ins for the platform capture capability, shared by the
//! in-crate unit tests and the integration tests. The scripted encoder
//! honors the platform contract: chunks are delivered in order and all of
//! them arrive before the terminating stop event.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc};

use crate::capture::encoder::{Encoder, EncoderControl, EncoderEvent};
use crate::capture::traits::{CapturePlatform, MediaStream, MediaTrack, TrackKind};
use crate::recorder::controller::SessionEvent;
use crate::utils::error::{AppError, AppResult};

/// Track whose halt calls are counted (once per track, halt is idempotent)
pub struct CountingTrack {
    kind: TrackKind,
    halted: AtomicBool,
    halts: Arc<AtomicUsize>,
}

impl CountingTrack {
    pub fn new(kind: TrackKind, halts: Arc<AtomicUsize>) -> Self {
        Self {
            kind,
            halted: AtomicBool::new(false),
            halts,
        }
    }
}

impl MediaTrack for CountingTrack {
    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn halt(&self) {
        if !self.halted.swap(true, Ordering::SeqCst) {
            self.halts.fetch_add(1, Ordering::SeqCst);
        }
    }
}

struct ScriptedEncoderControl {
    tx: mpsc::UnboundedSender<EncoderEvent>,
    chunks: Mutex<Option<Vec<Vec<u8>>>>,
    stop_requests: Arc<AtomicUsize>,
}

impl EncoderControl for ScriptedEncoderControl {
    fn request_stop(&self) {
        self.stop_requests.fetch_add(1, Ordering::SeqCst);
        // flush the scripted chunks, then terminate; once only
        if let Some(chunks) = self.chunks.lock().take() {
            for chunk in chunks {
                let _ = self.tx.send(EncoderEvent::Data(chunk));
            }
            let _ = self.tx.send(EncoderEvent::Stopped);
        }
    }
}

/// A capture platform that plays back a script.
///
/// The display stream carries a video track and a system-audio track, the
/// microphone stream one audio track. Each encoder start replays the same
/// chunk script on stop.
pub struct ScriptedPlatform {
    chunks: Vec<Vec<u8>>,
    deny_display: bool,
    deny_microphone: bool,
    halts: Arc<AtomicUsize>,
    stop_requests: Arc<AtomicUsize>,
}

impl ScriptedPlatform {
    pub fn new(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            chunks,
            deny_display: false,
            deny_microphone: false,
            halts: Arc::new(AtomicUsize::new(0)),
            stop_requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make display acquisition fail with a permission error
    pub fn with_display_denied(mut self) -> Self {
        self.deny_display = true;
        self
    }

    /// Make microphone acquisition fail with a permission error
    pub fn with_microphone_denied(mut self) -> Self {
        self.deny_microphone = true;
        self
    }

    /// Counter of tracks halted so far
    pub fn halt_counter(&self) -> Arc<AtomicUsize> {
        self.halts.clone()
    }

    /// Counter of encoder stop requests so far
    pub fn stop_counter(&self) -> Arc<AtomicUsize> {
        self.stop_requests.clone()
    }
}

#[async_trait]
impl CapturePlatform for ScriptedPlatform {
    async fn acquire_display(&self) -> AppResult<MediaStream> {
        if self.deny_display {
            return Err(AppError::PermissionDenied(
                "screen capture not allowed".into(),
            ));
        }
        Ok(MediaStream::new(vec![
            Box::new(CountingTrack::new(TrackKind::Video, self.halts.clone())),
            Box::new(CountingTrack::new(
                TrackKind::SystemAudio,
                self.halts.clone(),
            )),
        ]))
    }

    async fn acquire_microphone(&self) -> AppResult<MediaStream> {
        if self.deny_microphone {
            return Err(AppError::PermissionDenied("microphone not allowed".into()));
        }
        Ok(MediaStream::new(vec![Box::new(CountingTrack::new(
            TrackKind::Microphone,
            self.halts.clone(),
        ))]))
    }

    fn start_encoder(&self, _stream: &MediaStream) -> AppResult<Encoder> {
        let (tx, events) = mpsc::unbounded_channel();
        Ok(Encoder {
            events,
            control: Box::new(ScriptedEncoderControl {
                tx,
                chunks: Mutex::new(Some(self.chunks.clone())),
                stop_requests: self.stop_requests.clone(),
            }),
        })
    }
}

/// Outcome carried by [`SessionEvent::Finished`]
#[derive(Debug, Clone, Copy)]
pub struct FinishedEvent {
    pub uploaded: bool,
}

/// Wait for the session's finalize to complete, skipping intermediate
/// events. Panics after five seconds, which only happens when finalization
/// never ran.
pub async fn wait_for_finished(rx: &mut broadcast::Receiver<SessionEvent>) -> FinishedEvent {
    let deadline = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match rx.recv().await {
                Ok(SessionEvent::Finished { uploaded }) => return FinishedEvent { uploaded },
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => {
                    panic!("session event channel closed before Finished")
                }
            }
        }
    });
    deadline.await.expect("session never finalized")
}
