//! Fundamentals and ranking domain types.
//!
//! A `MetricRow` is one ticker's normalized fundamentals. The ranker turns
//! a collection of rows into a `RankedTable` (rows plus derived rank
//! columns) and finally a `CandidateList` of tickers to buy.

use crate::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalized fundamentals for a single ticker.
///
/// All fields are finite decimals; rows that fail normalization are
/// dropped upstream, never zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRow {
    /// Ticker symbol (e.g., "PETR4"). Unique within a table.
    pub ticker: String,
    /// Current quote price.
    pub price: Price,
    /// Enterprise value / EBIT multiple. Lower is cheaper.
    pub ev_ebit: Decimal,
    /// Return on invested capital, in percent. Higher is better.
    pub roic: Decimal,
    /// Two-month traded volume (liquidity).
    pub liquidity: Decimal,
}

/// One row of the ranked table: the metrics plus derived rank columns.
///
/// Ranks are decimals because tied underlying values receive the average
/// of the rank positions they span (so halves are possible).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRow {
    pub metrics: MetricRow,
    /// Rank by EV/EBIT ascending: 1 = smallest positive multiple.
    pub rank_ev_ebit: Decimal,
    /// Rank by ROIC descending: 1 = largest return.
    pub rank_roic: Decimal,
    /// Combined score: `rank_ev_ebit + rank_roic`. Ascending = best first.
    pub score: Decimal,
}

/// Filtered, scored and score-ordered table of survivors.
///
/// Iteration order is the selection order: ascending score, ties broken
/// by original table position (stable sort).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankedTable {
    rows: Vec<RankedRow>,
}

impl RankedTable {
    pub fn new(rows: Vec<RankedRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[RankedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ticker symbols in selection order.
    pub fn tickers(&self) -> CandidateList {
        CandidateList::new(self.rows.iter().map(|r| r.metrics.ticker.clone()).collect())
    }
}

/// Ordered list of tickers selected for order submission.
///
/// Produced once per run by the ranker and immutable afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateList(Vec<String>);

impl CandidateList {
    pub fn new(tickers: Vec<String>) -> Self {
        Self(tickers)
    }

    pub fn tickers(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for CandidateList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}
