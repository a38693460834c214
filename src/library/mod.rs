//! Upload client and library store
//!
//! Everything the client knows about stored recordings lives here: the asset
//! model, the in-memory library list, and the HTTP client that keeps that
//! list reconciled with the server.

pub mod asset;
pub mod client;
pub mod store;

pub use asset::{RecordingAsset, RecordingFile};
pub use client::LibraryClient;
pub use store::LibraryStore;
