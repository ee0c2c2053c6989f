//! In-memory document cache.
//!
//! # Data Flow
//! ```text
//! poller (one writer)
//!     → DocumentStore::set (atomic swap of Arc<CachedDocument>)
//!
//! request handlers (many readers)
//!     → DocumentStore::get / body (lock-free load)
//! ```
//!
//! # Design Decisions
//! - Documents are immutable; updates replace the whole snapshot
//! - No history, no persistence: the process starts empty

pub mod store;

pub use store::{CachedDocument, DocumentStore};
