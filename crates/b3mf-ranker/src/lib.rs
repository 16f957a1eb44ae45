//! Candidate ranking for the B3 magic-formula bot.
//!
//! Filters the normalized fundamentals table and scores survivors with a
//! two-factor rank sum of EV/EBIT (value) and ROIC (quality).

pub mod config;
pub mod ranker;

pub use config::RankerConfig;
pub use ranker::Ranker;
