//! Normalization of the raw table into `MetricRow`s.
//!
//! Targeted columns are exactly quote price, EV/EBIT, ROIC and two-month
//! liquidity. A row with any unparseable targeted cell is dropped with a
//! logged reason; it is never zero-filled. Row order is preserved.

use crate::error::{FeedError, FeedResult};
use crate::parser::parse_ptbr_number;
use crate::raw::{RawRow, RawTable};
use b3mf_core::{MetricRow, Price};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// Quote price column as named by the listing.
pub const COL_PRICE: &str = "Cotação";
/// EV/EBIT multiple column.
pub const COL_EV_EBIT: &str = "EV/EBIT";
/// Return on invested capital column.
pub const COL_ROIC: &str = "ROIC";
/// Two-month liquidity column.
pub const COL_LIQUIDITY: &str = "Liq.2meses";

const TARGET_COLUMNS: [&str; 4] = [COL_PRICE, COL_EV_EBIT, COL_ROIC, COL_LIQUIDITY];

/// Why a raw row was discarded during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The targeted cell was absent from the row.
    MissingCell { column: &'static str },
    /// The targeted cell did not parse as a pt-BR number.
    Unparseable { column: &'static str, value: String },
    /// The ticker already appeared earlier in the table.
    DuplicateTicker,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCell { column } => write!(f, "missing cell in column {column}"),
            Self::Unparseable { column, value } => {
                write!(f, "unparseable value {value:?} in column {column}")
            }
            Self::DuplicateTicker => write!(f, "duplicate ticker"),
        }
    }
}

/// Normalize the raw table into metric rows, in table order.
///
/// # Errors
/// `DataUnavailable` when the table is empty or any targeted column is
/// missing entirely. Per-row parse failures are not errors; the row is
/// dropped and logged.
pub fn normalize(raw: &RawTable) -> FeedResult<Vec<MetricRow>> {
    if raw.is_empty() {
        return Err(FeedError::DataUnavailable("raw table is empty".to_string()));
    }
    for column in TARGET_COLUMNS {
        if !raw.has_column(column) {
            return Err(FeedError::DataUnavailable(format!(
                "raw table is missing column {column}"
            )));
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut rows = Vec::with_capacity(raw.len());

    for row in raw.rows() {
        if !seen.insert(row.ticker.as_str()) {
            drop_row(row, DropReason::DuplicateTicker);
            continue;
        }
        match normalize_row(row) {
            Ok(metric) => rows.push(metric),
            Err(reason) => drop_row(row, reason),
        }
    }

    debug!(
        total = raw.len(),
        kept = rows.len(),
        dropped = raw.len() - rows.len(),
        "Normalized fundamentals table"
    );
    Ok(rows)
}

fn normalize_row(row: &RawRow) -> Result<MetricRow, DropReason> {
    Ok(MetricRow {
        ticker: row.ticker.clone(),
        price: Price::new(target_cell(row, COL_PRICE)?),
        ev_ebit: target_cell(row, COL_EV_EBIT)?,
        roic: target_cell(row, COL_ROIC)?,
        liquidity: target_cell(row, COL_LIQUIDITY)?,
    })
}

fn target_cell(row: &RawRow, column: &'static str) -> Result<Decimal, DropReason> {
    let cell = row
        .cell(column)
        .ok_or(DropReason::MissingCell { column })?;
    parse_ptbr_number(cell).ok_or_else(|| DropReason::Unparseable {
        column,
        value: cell.to_string(),
    })
}

fn drop_row(row: &RawRow, reason: DropReason) {
    warn!(ticker = %row.ticker, reason = %reason, "Dropping fundamentals row");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn raw_row(ticker: &str, price: &str, ev_ebit: &str, roic: &str, liq: &str) -> RawRow {
        let cells: HashMap<String, String> = [
            (COL_PRICE.to_string(), price.to_string()),
            (COL_EV_EBIT.to_string(), ev_ebit.to_string()),
            (COL_ROIC.to_string(), roic.to_string()),
            (COL_LIQUIDITY.to_string(), liq.to_string()),
        ]
        .into();
        RawRow {
            ticker: ticker.to_string(),
            cells,
        }
    }

    fn columns() -> Vec<String> {
        TARGET_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_normalize_parses_all_fields() {
        let raw = RawTable::new(
            columns(),
            vec![raw_row("PETR4", "38,10", "3,21", "21,45%", "1.500.000.000")],
        );
        let rows = normalize(&raw).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticker, "PETR4");
        assert_eq!(rows[0].price, Price::new(dec!(38.10)));
        assert_eq!(rows[0].ev_ebit, dec!(3.21));
        assert_eq!(rows[0].roic, dec!(21.45));
        assert_eq!(rows[0].liquidity, dec!(1500000000));
    }

    #[test]
    fn test_unparseable_cell_drops_row_only() {
        let raw = RawTable::new(
            columns(),
            vec![
                raw_row("AAAA4", "10,00", "n/a", "5,00%", "2.000.000"),
                raw_row("BBBB3", "20,00", "4,00", "8,00%", "3.000.000"),
            ],
        );
        let rows = normalize(&raw).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticker, "BBBB3");
    }

    #[test]
    fn test_duplicate_ticker_keeps_first() {
        let raw = RawTable::new(
            columns(),
            vec![
                raw_row("AAAA4", "10,00", "3,00", "5,00%", "2.000.000"),
                raw_row("AAAA4", "99,00", "9,00", "9,00%", "9.000.000"),
            ],
        );
        let rows = normalize(&raw).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price, Price::new(dec!(10.00)));
    }

    #[test]
    fn test_row_order_is_preserved() {
        let raw = RawTable::new(
            columns(),
            vec![
                raw_row("CCCC3", "1,00", "1,00", "1,00%", "2.000.000"),
                raw_row("AAAA4", "1,00", "1,00", "1,00%", "2.000.000"),
                raw_row("BBBB3", "1,00", "1,00", "1,00%", "2.000.000"),
            ],
        );
        let rows = normalize(&raw).unwrap();
        let tickers: Vec<_> = rows.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, ["CCCC3", "AAAA4", "BBBB3"]);
    }

    #[test]
    fn test_empty_table_is_unavailable() {
        let raw = RawTable::new(columns(), Vec::new());
        assert!(matches!(
            normalize(&raw),
            Err(FeedError::DataUnavailable(_))
        ));
    }

    #[test]
    fn test_missing_column_is_unavailable() {
        let raw = RawTable::new(
            vec![COL_PRICE.to_string(), COL_EV_EBIT.to_string()],
            vec![raw_row("AAAA4", "1,00", "1,00", "1,00%", "2.000.000")],
        );
        assert!(matches!(
            normalize(&raw),
            Err(FeedError::DataUnavailable(_))
        ));
    }
}
