//! Screenreel - capture-session lifecycle and upload client.
//!
//! This crate drives a single screen+microphone capture session against a
//! platform-supplied capture capability, enforces the 180-second hard cap,
//! and hands finished captures to a self-hosted recording store over HTTP.
//! The store's library (list, playback/download URLs, delete) is mirrored in
//! an in-memory list that only ever reflects the last successful server
//! response.

pub mod capture;
pub mod config;
pub mod context;
pub mod library;
pub mod recorder;
pub mod test_utils;
pub mod utils;

pub use capture::traits::CapturePlatform;
pub use config::ClientConfig;
pub use context::AppContext;
pub use library::{LibraryClient, RecordingAsset, RecordingFile};
pub use recorder::{RecorderState, SessionConfig, SessionController, SessionEvent};
pub use utils::error::{AppError, AppResult};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for an embedding application.
///
/// Respects `RUST_LOG`; defaults to debug for this crate.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "screenreel=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("screenreel v{}", env!("CARGO_PKG_VERSION"));
}
