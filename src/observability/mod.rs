//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, one span per dispatch)
//!     → metrics.rs (counters per source, outcome, intent)
//!
//! Consumers:
//!     → Log output (stdout, pretty or JSON)
//!     → Whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Dispatch ID flows through every log line of a dispatch
//! - Metrics are cheap and no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
