//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http middleware + store mutations
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms, gauges)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
