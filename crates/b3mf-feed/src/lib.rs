//! Fundamentals data feed for the B3 magic-formula bot.
//!
//! Pulls the raw fundamentals listing (an HTML table with pt-BR numeric
//! formatting), extracts it into a `RawTable`, and normalizes the targeted
//! columns into clean `MetricRow`s.

pub mod error;
pub mod normalize;
pub mod parser;
pub mod raw;
pub mod source;

pub use error::{FeedError, FeedResult};
pub use normalize::{normalize, DropReason, COL_EV_EBIT, COL_LIQUIDITY, COL_PRICE, COL_ROIC};
pub use raw::{RawRow, RawTable};
pub use source::{BoxFuture, FundamentusSource, TableSource};
