//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! poller + http server produce:
//!     → logging.rs (structured log events, pretty or JSON)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
