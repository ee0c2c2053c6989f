//! Bike-share inventory cache library.
//!
//! ```text
//!  upstream ◀── poller ──▶ DocumentStore ◀── http server ◀── clients
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod poller;

pub use cache::{CachedDocument, DocumentStore};
pub use config::schema::CacheConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use poller::Poller;
