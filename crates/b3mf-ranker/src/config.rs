//! Ranker configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankerConfig {
    /// Minimum two-month liquidity for a ticker to be actionable.
    /// Rows at or below the floor are excluded.
    #[serde(default = "default_liquidity_floor")]
    pub liquidity_floor: Decimal,
    /// Number of top-scored tickers to emit.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_liquidity_floor() -> Decimal {
    Decimal::from(1_000_000)
}

fn default_top_n() -> usize {
    10
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            liquidity_floor: default_liquidity_floor(),
            top_n: default_top_n(),
        }
    }
}
