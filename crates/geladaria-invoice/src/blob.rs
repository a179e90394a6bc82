//! In-memory binary artifacts
//!
//! A [`Blob`] registered in a [`BlobStore`] is reachable by its URL until
//! the [`BlobHandle`] returned at registration is dropped.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

/// Bytes plus their MIME type
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    data: Vec<u8>,
    mime: String,
}

impl Blob {
    pub fn new(data: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            data,
            mime: mime.into(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Shared registry of live blobs
#[derive(Debug, Clone, Default)]
pub struct BlobStore {
    blobs: Arc<Mutex<HashMap<String, Arc<Blob>>>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a blob; it stays reachable while the handle lives
    pub fn register(&self, blob: Blob) -> BlobHandle {
        let url = format!("blob:geladaria/{}", Uuid::new_v4());
        let blob = Arc::new(blob);
        self.blobs.lock().insert(url.clone(), Arc::clone(&blob));
        debug!(%url, bytes = blob.len(), "blob registered");

        BlobHandle {
            url,
            blob,
            store: self.clone(),
        }
    }

    /// Look up a live blob
    pub fn get(&self, url: &str) -> Option<Arc<Blob>> {
        self.blobs.lock().get(url).cloned()
    }

    /// Number of blobs not yet revoked
    pub fn live_count(&self) -> usize {
        self.blobs.lock().len()
    }

    fn revoke(&self, url: &str) -> bool {
        self.blobs.lock().remove(url).is_some()
    }
}

/// Registration of one blob; dropping it revokes the URL
#[derive(Debug)]
pub struct BlobHandle {
    url: String,
    blob: Arc<Blob>,
    store: BlobStore,
}

impl BlobHandle {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn blob(&self) -> &Blob {
        &self.blob
    }
}

impl Drop for BlobHandle {
    fn drop(&mut self) {
        if self.store.revoke(&self.url) {
            debug!(url = %self.url, "blob revoked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_revokes_on_drop() {
        let store = BlobStore::new();
        let handle = store.register(Blob::new(b"%PDF-1.7".to_vec(), "application/pdf"));
        let url = handle.url().to_string();

        assert!(url.starts_with("blob:geladaria/"));
        assert_eq!(store.live_count(), 1);
        assert_eq!(store.get(&url).unwrap().mime(), "application/pdf");

        drop(handle);
        assert_eq!(store.live_count(), 0);
        assert!(store.get(&url).is_none());
    }

    #[test]
    fn test_urls_are_unique() {
        let store = BlobStore::new();
        let a = store.register(Blob::new(vec![1], "a/b"));
        let b = store.register(Blob::new(vec![1], "a/b"));
        assert_ne!(a.url(), b.url());
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let store = BlobStore::new();
        let other = store.clone();
        let _handle = store.register(Blob::new(Vec::new(), "text/plain"));
        assert_eq!(other.live_count(), 1);
    }

    #[test]
    fn test_concurrent_registration() {
        let store = BlobStore::new();
        let threads: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let handle = store.register(Blob::new(vec![i], "x/y"));
                    assert!(store.get(handle.url()).is_some());
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(store.live_count(), 0);
    }
}
