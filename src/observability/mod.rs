//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registry and dispatcher produce:
//!     → logging.rs (structured log events, one span per dispatch)
//!     → metrics.rs (outcome and mapping-load counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Every dispatch carries a UUID correlation id in its span
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
