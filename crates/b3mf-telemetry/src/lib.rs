//! Structured logging for the B3 magic-formula bot.
//!
//! Every gate decision, filter decision and per-ticker order outcome is
//! observable through tracing log lines with structured fields.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
