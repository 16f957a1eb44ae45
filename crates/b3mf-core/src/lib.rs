//! Core domain types for the B3 magic-formula bot.
//!
//! This crate provides fundamental types used throughout the system:
//! - `Price`, `Volume`: precision-safe numeric types
//! - `MetricRow`, `RankedTable`, `CandidateList`: ranking domain
//! - `OrderRequest`, `OrderOutcome`: execution domain
//! - `Credentials`: broker login material

pub mod credentials;
pub mod decimal;
pub mod metrics;
pub mod order;

pub use credentials::Credentials;
pub use decimal::{Price, Volume};
pub use metrics::{CandidateList, MetricRow, RankedRow, RankedTable};
pub use order::{
    FillPolicy, OrderOutcome, OrderRequest, OrderSide, TimeInForce, RETCODE_DONE, STRATEGY_COMMENT,
    STRATEGY_TAG,
};
