//! B3 magic-formula buy bot.
//!
//! Orchestrates the full run: fetch and normalize the fundamentals
//! listing, rank candidates, pass the market-hours and credential gates,
//! obtain consent, then submit one buy order per candidate over a single
//! broker session.

pub mod app;
pub mod config;
pub mod consent;
pub mod error;

pub use app::{Application, RunOutcome};
pub use config::AppConfig;
pub use consent::{ConsentGate, StdinConsent};
pub use error::{AppError, AppResult};
