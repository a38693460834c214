//! In-memory library store
//!
//! The client-side view of the server's recording library. It is a cache in
//! the weakest sense: it only ever reflects the last successful
//! list/create/delete response and is fully replaced on reload, never
//! incrementally patched except for local removal after a confirmed delete.

use parking_lot::RwLock;

use super::asset::RecordingAsset;

/// Shared, fully-reloadable list of known recordings
#[derive(Debug, Default)]
pub struct LibraryStore {
    assets: RwLock<Vec<RecordingAsset>>,
}

impl LibraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a fresh server response
    pub fn replace_all(&self, assets: Vec<RecordingAsset>) {
        *self.assets.write() = assets;
    }

    /// Remove the entry whose id matches, if any. Returns whether an entry
    /// was removed.
    pub fn remove_by_id(&self, id: &str) -> bool {
        let mut assets = self.assets.write();
        let before = assets.len();
        assets.retain(|asset| asset.id != id);
        assets.len() != before
    }

    /// Clone of the current list, in server order
    pub fn snapshot(&self) -> Vec<RecordingAsset> {
        self.assets.read().clone()
    }

    pub fn len(&self) -> usize {
        self.assets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: &str) -> RecordingAsset {
        RecordingAsset {
            id: id.to_string(),
            filename: format!("recording-{id}.webm"),
            filepath: format!("uploads/recording-{id}.webm"),
        }
    }

    #[test]
    fn test_replace_all_overwrites() {
        let store = LibraryStore::new();
        store.replace_all(vec![asset("a"), asset("b")]);
        store.replace_all(vec![asset("c")]);
        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "c");
    }

    #[test]
    fn test_remove_by_id_removes_exactly_one() {
        let store = LibraryStore::new();
        store.replace_all(vec![asset("abc"), asset("xyz")]);

        assert!(store.remove_by_id("abc"));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "xyz");
    }

    #[test]
    fn test_remove_by_id_missing_is_noop() {
        let store = LibraryStore::new();
        store.replace_all(vec![asset("abc")]);
        let before = store.snapshot();

        assert!(!store.remove_by_id("nope"));
        assert_eq!(store.snapshot(), before);
    }
}
