//! Two-factor rank-sum scoring.
//!
//! Survivors of the liquidity/positivity filter are ranked by EV/EBIT
//! ascending (cheap first) and ROIC descending (efficient first); the
//! combined score is the sum of the two ranks. Tied underlying values
//! receive the average of the rank positions they span, matching
//! conventional rank-sum scoring.

use crate::config::RankerConfig;
use b3mf_core::{MetricRow, RankedRow, RankedTable};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Candidate ranking engine. Pure: no I/O, no side effects beyond logging.
pub struct Ranker {
    config: RankerConfig,
}

impl Ranker {
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    /// Rank the normalized table and keep the `top_n` best rows.
    ///
    /// Fewer survivors than `top_n` yields all survivors; zero survivors
    /// yields an empty table. Both are valid terminal states, not errors.
    /// Ties in combined score keep the input row order (stable sort).
    pub fn rank(&self, rows: &[MetricRow]) -> RankedTable {
        let survivors: Vec<MetricRow> = rows
            .iter()
            .filter(|row| self.passes_filter(row))
            .cloned()
            .collect();

        if survivors.is_empty() {
            warn!("No candidates survived the liquidity/positivity filter");
            return RankedTable::default();
        }

        let ev_ebit: Vec<Decimal> = survivors.iter().map(|r| r.ev_ebit).collect();
        let roic: Vec<Decimal> = survivors.iter().map(|r| r.roic).collect();
        let rank_ev_ebit = average_ranks(&ev_ebit, true);
        let rank_roic = average_ranks(&roic, false);

        let mut ranked: Vec<RankedRow> = survivors
            .into_iter()
            .enumerate()
            .map(|(i, metrics)| RankedRow {
                metrics,
                rank_ev_ebit: rank_ev_ebit[i],
                rank_roic: rank_roic[i],
                score: rank_ev_ebit[i] + rank_roic[i],
            })
            .collect();

        // Stable: equal scores keep original table order.
        ranked.sort_by(|a, b| a.score.cmp(&b.score));
        ranked.truncate(self.config.top_n);

        info!(
            candidates = ranked.len(),
            top_n = self.config.top_n,
            "Ranked fundamentals table"
        );
        RankedTable::new(ranked)
    }

    fn passes_filter(&self, row: &MetricRow) -> bool {
        if row.liquidity <= self.config.liquidity_floor {
            debug!(ticker = %row.ticker, liquidity = %row.liquidity, "Filtered out: liquidity at or below floor");
            return false;
        }
        if row.ev_ebit <= Decimal::ZERO {
            debug!(ticker = %row.ticker, ev_ebit = %row.ev_ebit, "Filtered out: non-positive EV/EBIT");
            return false;
        }
        if row.roic <= Decimal::ZERO {
            debug!(ticker = %row.ticker, roic = %row.roic, "Filtered out: non-positive ROIC");
            return false;
        }
        true
    }
}

/// Rank positions (1 = first) with average-rank tie handling.
///
/// `ascending = true` ranks the smallest value first. Equal values share
/// the average of the positions they occupy, so ranks can be halves.
fn average_ranks(values: &[Decimal], ascending: bool) -> Vec<Decimal> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        if ascending {
            values[a].cmp(&values[b])
        } else {
            values[b].cmp(&values[a])
        }
    });

    let mut ranks = vec![Decimal::ZERO; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // Positions i..=j are 0-based; the shared rank is the average of
        // the 1-based positions: ((i + 1) + (j + 1)) / 2.
        let shared = Decimal::from(i + j + 2) / Decimal::TWO;
        for &k in &order[i..=j] {
            ranks[k] = shared;
        }
        i = j + 1;
    }
    ranks
}
