//! Recording session controller
//!
//! Owns the lifecycle of a single capture: acquire the display and
//! microphone streams, merge them, start the platform encoder, run the
//! 1-second elapsed counter with the hard cap, stop on request or cap
//! expiry, then package the result and hand it to the upload client.
//!
//! The encoder is consumed as an event sequence on a drained task; the
//! controller itself never blocks. At most one session is active at a time;
//! `start()` fails fast instead of leaking a second capture.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::state::{RecorderState, SessionConfig};
use crate::capture::encoder::{EncoderControl, EncoderEvent, CONTAINER_EXT};
use crate::capture::traits::{CapturePlatform, MediaStream};
use crate::library::asset::RecordingFile;
use crate::library::client::LibraryClient;
use crate::utils::error::{AppError, AppResult};

/// Events emitted over the lifetime of a session
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Capture started
    Started,
    /// Elapsed counter ticked; carries the displayed value in seconds
    Progress(u32),
    /// Stop was requested; finalization is still in flight
    Stopped,
    /// Finalization finished: chunks assembled, upload attempted, devices
    /// released
    Finished { uploaded: bool },
}

/// Handles that exist only while a session is active
struct ActiveSession {
    control: Box<dyn EncoderControl>,
    ticker: Option<JoinHandle<()>>,
}

/// State shared between the controller, the ticker task, and the drain task
struct Shared {
    state: RwLock<RecorderState>,
    elapsed_secs: Mutex<u32>,
    active: Mutex<Option<ActiveSession>>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl Shared {
    /// Advance the elapsed counter by one second.
    ///
    /// The cap check uses the pre-increment value (`elapsed + 1 >= cap`) and
    /// requests the stop before the counter is advanced; the published value
    /// still reflects the increment, so the display reaches exactly the cap
    /// and never passes it.
    fn tick(&self, max_duration_secs: u32) -> Option<u32> {
        if *self.state.read() != RecorderState::Active {
            return None;
        }

        let mut elapsed = self.elapsed_secs.lock();
        if *elapsed + 1 >= max_duration_secs {
            self.stop();
        }
        *elapsed += 1;
        let _ = self.event_tx.send(SessionEvent::Progress(*elapsed));
        Some(*elapsed)
    }

    /// Cancel the ticker, mark the session idle, and ask the encoder to
    /// finalize. No-op when already idle.
    fn stop(&self) {
        let mut active = self.active.lock();
        {
            let mut state = self.state.write();
            if *state == RecorderState::Idle {
                return;
            }
            *state = RecorderState::Idle;
        }

        if let Some(session) = active.take() {
            if let Some(ticker) = session.ticker {
                ticker.abort();
            }
            session.control.request_stop();
        }
        let _ = self.event_tx.send(SessionEvent::Stopped);
    }
}

/// Drives one capture session at a time against a [`CapturePlatform`]
pub struct SessionController<P: CapturePlatform> {
    platform: P,
    library: Arc<LibraryClient>,
    config: SessionConfig,
    shared: Arc<Shared>,
}

impl<P: CapturePlatform> SessionController<P> {
    pub fn new(platform: P, library: Arc<LibraryClient>, config: SessionConfig) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            platform,
            library,
            config,
            shared: Arc::new(Shared {
                state: RwLock::new(RecorderState::Idle),
                elapsed_secs: Mutex::new(0),
                active: Mutex::new(None),
                event_tx,
            }),
        }
    }

    /// Current session state
    pub fn state(&self) -> RecorderState {
        *self.shared.state.read()
    }

    /// Current elapsed counter, in seconds
    pub fn elapsed_secs(&self) -> u32 {
        *self.shared.elapsed_secs.lock()
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.event_tx.subscribe()
    }

    /// Start a capture session.
    ///
    /// Acquires the display and microphone streams, merges them, starts the
    /// encoder, and begins ticking. Fails with [`AppError::SessionActive`]
    /// when a session is already running; on acquisition failure every
    /// already-acquired track is released and the state stays idle.
    pub async fn start(&self) -> AppResult<()> {
        {
            let mut state = self.shared.state.write();
            if *state != RecorderState::Idle {
                return Err(AppError::SessionActive);
            }
            *state = RecorderState::Active;
        }

        match self.acquire_and_spawn().await {
            Ok(()) => Ok(()),
            Err(err) => {
                *self.shared.state.write() = RecorderState::Idle;
                tracing::error!(code = err.code(), error = %err, "failed to start recording");
                Err(err)
            }
        }
    }

    async fn acquire_and_spawn(&self) -> AppResult<()> {
        let display = self.platform.acquire_display().await?;
        let microphone = match self.platform.acquire_microphone().await {
            Ok(stream) => stream,
            Err(err) => {
                display.halt_all();
                return Err(err);
            }
        };

        let combined = MediaStream::merged(display, microphone);
        let encoder = match self.platform.start_encoder(&combined) {
            Ok(encoder) => encoder,
            Err(err) => {
                combined.halt_all();
                return Err(err);
            }
        };

        let session_id = Uuid::new_v4();
        let started_at_ms = Utc::now().timestamp_millis();
        *self.shared.elapsed_secs.lock() = 0;

        tracing::info!(
            session = %session_id,
            tracks = combined.track_count(),
            "recording started"
        );

        tokio::spawn(drain_encoder(
            self.shared.clone(),
            self.library.clone(),
            encoder.events,
            combined,
            started_at_ms,
            session_id,
        ));

        let ticker = {
            let shared = self.shared.clone();
            let interval = self.config.tick_interval;
            let max_duration_secs = self.config.max_duration_secs;
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(interval);
                // interval fires immediately; the first tick belongs one
                // period in
                interval.tick().await;
                loop {
                    interval.tick().await;
                    if shared.tick(max_duration_secs).is_none() {
                        break;
                    }
                }
            })
        };

        *self.shared.active.lock() = Some(ActiveSession {
            control: encoder.control,
            ticker: Some(ticker),
        });
        let _ = self.shared.event_tx.send(SessionEvent::Started);
        Ok(())
    }

    /// Advance the elapsed counter by one second, as the ticker task does.
    ///
    /// Exposed so callers (and tests) can drive time explicitly. Returns the
    /// displayed value, or `None` when no session is active.
    pub fn tick(&self) -> Option<u32> {
        self.shared.tick(self.config.max_duration_secs)
    }

    /// Stop the active session.
    ///
    /// No-op when idle: no state change, no encoder or network call. The
    /// encoder finalizes asynchronously; subscribe for
    /// [`SessionEvent::Finished`] to observe upload and device release.
    pub fn stop(&self) {
        self.shared.stop();
    }
}

impl<P: CapturePlatform> std::fmt::Debug for SessionController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Consume the encoder's event sequence: append chunks in arrival order
/// (dropping empty ones), and on the terminating stop event assemble the
/// capture, attempt the upload, then reset the counter and release every
/// track. Track release happens only after the upload attempt, which keeps
/// the upload-attempted-exactly-once-per-session property.
async fn drain_encoder(
    shared: Arc<Shared>,
    library: Arc<LibraryClient>,
    mut events: mpsc::UnboundedReceiver<EncoderEvent>,
    stream: MediaStream,
    started_at_ms: i64,
    session_id: Uuid,
) {
    let mut chunks: Vec<Vec<u8>> = Vec::new();
    while let Some(event) = events.recv().await {
        match event {
            EncoderEvent::Data(chunk) => {
                if !chunk.is_empty() {
                    chunks.push(chunk);
                }
            }
            EncoderEvent::Stopped => break,
        }
    }

    let total: usize = chunks.iter().map(Vec::len).sum();
    let mut bytes = Vec::with_capacity(total);
    for chunk in &chunks {
        bytes.extend_from_slice(chunk);
    }
    let file = RecordingFile::new(format!("recording-{started_at_ms}.{CONTAINER_EXT}"), bytes);

    tracing::info!(
        session = %session_id,
        filename = %file.filename,
        size = total,
        "finalizing capture"
    );

    let uploaded = match library.submit(file).await {
        Ok(()) => true,
        Err(err) => {
            tracing::error!(session = %session_id, code = err.code(), error = %err, "upload failed");
            false
        }
    };

    *shared.elapsed_secs.lock() = 0;
    stream.halt_all();
    tracing::info!(session = %session_id, uploaded, "capture devices released");
    let _ = shared.event_tx.send(SessionEvent::Finished { uploaded });
}
