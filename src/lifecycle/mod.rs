//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init logging/metrics → Spawn poller → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Trigger broadcast → Server drains, poller exits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
