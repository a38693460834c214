//! Upload client for the recording store
//!
//! Thin request/response layer over the store's three endpoints: list all
//! recordings, submit a finished capture, delete by id. The in-memory
//! [`LibraryStore`] is reconciled with every successful response. Failures
//! are returned to the caller; the store keeps its previous contents.
//!
//! There are no retries and no request timeouts beyond the transport's own
//! defaults. A failed upload is gone once the caller has logged it.

use reqwest::multipart;
use serde::Deserialize;

use super::asset::{RecordingAsset, RecordingFile};
use super::store::LibraryStore;
use crate::capture::encoder::CONTAINER_MIME;
use crate::config::ClientConfig;
use crate::utils::error::{AppError, AppResult};

/// Multipart field name the store expects for the upload body
const UPLOAD_FIELD: &str = "video";

/// Structured error body the store returns on rejection
#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    error: String,
}

/// Client for the recording store plus the library it mirrors
pub struct LibraryClient {
    http: reqwest::Client,
    base_url: String,
    store: LibraryStore,
}

impl LibraryClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            store: LibraryStore::new(),
        }
    }

    /// The in-memory library this client reconciles
    pub fn store(&self) -> &LibraryStore {
        &self.store
    }

    fn recordings_url(&self) -> String {
        format!("{}/api/recordings", self.base_url)
    }

    /// URL a stored recording is played back from and downloaded at
    pub fn media_url(&self, asset: &RecordingAsset) -> String {
        format!("{}/{}", self.base_url, asset.filepath.trim_start_matches('/'))
    }

    /// Fetch the full recording list and replace the store with it.
    ///
    /// On any failure the store is left untouched.
    pub async fn list(&self) -> AppResult<Vec<RecordingAsset>> {
        let response = self.http.get(self.recordings_url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Remote {
                status: status.as_u16(),
                message: Self::remote_message(response).await,
            });
        }

        let assets: Vec<RecordingAsset> = response.json().await?;
        tracing::debug!(count = assets.len(), "library list refreshed");
        self.store.replace_all(assets.clone());
        Ok(assets)
    }

    /// Upload a finished capture as a single-field multipart body.
    ///
    /// A 2xx answer triggers exactly one full list refresh; a refresh
    /// failure is logged but does not turn the submit into a failure. A
    /// non-2xx answer is reported with the JSON `error` field from the body
    /// when present. No retry in either case.
    pub async fn submit(&self, file: RecordingFile) -> AppResult<()> {
        let filename = file.filename.clone();
        let size = file.len();
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(CONTAINER_MIME)?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(self.recordings_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Remote {
                status: status.as_u16(),
                message: Self::remote_message(response).await,
            });
        }

        tracing::info!(%filename, size, "upload accepted");
        if let Err(err) = self.list().await {
            tracing::warn!(code = err.code(), error = %err, "post-upload list refresh failed");
        }
        Ok(())
    }

    /// Delete a recording by id.
    ///
    /// On success the matching entry is removed from the store locally, with
    /// no re-list. On failure the store is unchanged.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let url = format!("{}/{}", self.recordings_url(), id);
        let response = self.http.delete(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Remote {
                status: status.as_u16(),
                message: Self::remote_message(response).await,
            });
        }

        self.store.remove_by_id(id);
        tracing::info!(%id, "recording deleted");
        Ok(())
    }

    /// Best-effort extraction of the `{error}` body from a rejection
    async fn remote_message(response: reqwest::Response) -> String {
        match response.json::<RemoteErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => "unspecified error".to_string(),
        }
    }
}

impl std::fmt::Debug for LibraryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
