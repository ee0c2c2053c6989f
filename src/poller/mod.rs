//! Upstream polling subsystem.
//!
//! # Data Flow
//! ```text
//! Poller::run (task.rs)
//!     → UpstreamClient::fetch (fetcher.rs, bounded timeout)
//!     → on success: DocumentStore::set
//!     → on failure: log + metric, previous document kept
//!     → sleep(interval) or shutdown
//! ```
//!
//! # Design Decisions
//! - One client reused across cycles; the deadline covers the whole fetch
//! - Any completed response is cached, non-2xx ones with a WARN, unless
//!   `reject_error_status` turns them into failures
//! - Fixed interval measured from the end of a fetch, no jitter or backoff

pub mod fetcher;
pub mod task;

pub use fetcher::{FetchError, UpstreamClient};
pub use task::Poller;
