//! Shared document store.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use arc_swap::ArcSwap;
use bytes::Bytes;

use crate::observability::metrics;

/// The last successfully fetched upstream document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedDocument {
    /// Raw response body, never parsed.
    pub body: Bytes,
    /// When the body was stored. `None` until the first successful fetch.
    pub fetched_at: Option<SystemTime>,
}

impl CachedDocument {
    /// Wrap a freshly fetched body, stamped with the current time.
    pub fn fetched(body: Bytes) -> Self {
        Self {
            body,
            fetched_at: Some(SystemTime::now()),
        }
    }
}

/// A thread-safe holder for the current [`CachedDocument`].
///
/// Readers take a lock-free snapshot; the poller publishes a whole new
/// document at once, so a reader sees either the old or the new body.
#[derive(Clone, Default)]
pub struct DocumentStore {
    inner: Arc<ArcSwap<CachedDocument>>,
}

impl DocumentStore {
    /// Create a store holding the empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot.
    pub fn get(&self) -> Arc<CachedDocument> {
        self.inner.load_full()
    }

    /// Current body bytes.
    pub fn body(&self) -> Bytes {
        self.inner.load().body.clone()
    }

    /// Replace the stored document with `body`.
    pub fn set(&self, body: Bytes) {
        let len = body.len();
        self.inner.store(Arc::new(CachedDocument::fetched(body)));
        metrics::record_document_stored(len);
    }

    /// True until the first successful fetch (or if upstream sent nothing).
    pub fn is_empty(&self) -> bool {
        self.inner.load().body.is_empty()
    }

    /// Time since the last successful fetch.
    pub fn age(&self) -> Option<Duration> {
        self.inner
            .load()
            .fetched_at
            .and_then(|at| SystemTime::now().duration_since(at).ok())
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let doc = self.inner.load();
        f.debug_struct("DocumentStore")
            .field("len", &doc.body.len())
            .field("fetched_at", &doc.fetched_at)
            .finish()
    }
}
