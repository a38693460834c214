//! Application context
//!
//! One explicit object owned for the process lifetime, holding the
//! configuration and the shared library client. Components receive it (or
//! its pieces) by reference; there are no ambient globals.

use std::sync::Arc;

use crate::capture::traits::CapturePlatform;
use crate::config::ClientConfig;
use crate::library::asset::RecordingAsset;
use crate::library::client::LibraryClient;
use crate::recorder::controller::SessionController;
use crate::recorder::state::SessionConfig;
use crate::utils::error::AppResult;

/// Process-lifetime context shared by the controller and the library views
#[derive(Debug)]
pub struct AppContext {
    pub config: ClientConfig,
    pub library: Arc<LibraryClient>,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Self {
        let library = Arc::new(LibraryClient::new(&config));
        Self { config, library }
    }

    /// Initial library load, called once at process start. A failure leaves
    /// the (empty) list in place; the caller logs and continues.
    pub async fn load_library(&self) -> AppResult<Vec<RecordingAsset>> {
        self.library.list().await
    }

    /// Build a session controller bound to this context's library
    pub fn session_controller<P: CapturePlatform>(
        &self,
        platform: P,
        config: SessionConfig,
    ) -> SessionController<P> {
        SessionController::new(platform, self.library.clone(), config)
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(ClientConfig::from_env())
    }
}
