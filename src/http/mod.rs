//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → DocumentStore snapshot
//!     → response.rs (CORS, optional gzip)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
