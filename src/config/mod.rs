//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CacheConfig (validated, immutable)
//!     → CLI flags applied on top in main.rs
//!     → copied into the poller and the HTTP server at startup
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the service runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::CacheConfig;
pub use schema::ListenerConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::ResponseOptions;
pub use schema::UpstreamConfig;
