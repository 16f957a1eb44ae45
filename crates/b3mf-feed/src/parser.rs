//! Raw table extraction and pt-BR numeric parsing.
//!
//! The fundamentals listing arrives as one HTML table. The page fetch and
//! render is an opaque collaborator; this module only walks the table
//! markup (`<tr>`/`<th>`/`<td>`) and strips cell markup. Numeric cells use
//! pt-BR formatting: `.` as thousands separator, `,` as decimal separator,
//! optional trailing `%`.

use crate::error::{FeedError, FeedResult};
use crate::raw::{RawRow, RawTable};
use rust_decimal::Decimal;
use tracing::warn;

/// Parse a pt-BR formatted numeric cell.
///
/// Strips `%`, strips `.` thousands separators, converts the decimal comma
/// to a decimal point, then parses. Returns `None` for anything that still
/// fails to parse (the caller drops the row, never defaults it).
pub fn parse_ptbr_number(cell: &str) -> Option<Decimal> {
    let cleaned: String = cell
        .trim()
        .chars()
        .filter(|c| *c != '%' && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Extract the first `<table>` of an HTML document into a `RawTable`.
///
/// The header row names the columns; its first cell is the ticker column.
/// Data rows with a different cell count than the header are skipped.
///
/// # Errors
/// `DataUnavailable` when there is no table, no header, or no data rows.
pub fn extract_table(html: &str) -> FeedResult<RawTable> {
    let table = section(html, "table")
        .ok_or_else(|| FeedError::DataUnavailable("no <table> found in page".to_string()))?;

    let mut header: Vec<String> = Vec::new();
    let mut rows: Vec<RawRow> = Vec::new();

    for tr in sections(table, "tr") {
        let th_cells = sections(tr, "th");
        if !th_cells.is_empty() && header.is_empty() {
            header = th_cells.iter().map(|c| cell_text(c)).collect();
            continue;
        }

        let td_cells = sections(tr, "td");
        if td_cells.is_empty() {
            continue;
        }
        if header.is_empty() {
            // Table without a <th> header: first row names the columns.
            header = td_cells.iter().map(|c| cell_text(c)).collect();
            continue;
        }
        if td_cells.len() != header.len() {
            warn!(
                expected = header.len(),
                got = td_cells.len(),
                "Skipping table row with unexpected cell count"
            );
            continue;
        }

        let ticker = cell_text(td_cells[0]);
        if ticker.is_empty() {
            warn!("Skipping table row with empty ticker cell");
            continue;
        }
        let cells = header
            .iter()
            .skip(1)
            .cloned()
            .zip(td_cells.iter().skip(1).map(|c| cell_text(c)))
            .collect();
        rows.push(RawRow { ticker, cells });
    }

    if header.is_empty() {
        return Err(FeedError::DataUnavailable(
            "table has no header row".to_string(),
        ));
    }
    if rows.is_empty() {
        return Err(FeedError::DataUnavailable(
            "table has no data rows".to_string(),
        ));
    }

    Ok(RawTable::new(header.into_iter().skip(1).collect(), rows))
}

/// Inner HTML of the first `<tag ...>...</tag>` section, if present.
fn section<'a>(html: &'a str, tag: &str) -> Option<&'a str> {
    sections_impl(html, tag).into_iter().next()
}

/// Inner HTML of every `<tag ...>...</tag>` section, in document order.
fn sections<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    sections_impl(html, tag)
}

fn sections_impl<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag}");
    let close = format!("</{tag}");
    let mut out = Vec::new();
    let mut pos = 0;

    while let Some(rel) = html[pos..].find(&open) {
        let start = pos + rel;
        let name_end = start + open.len();

        // Reject prefix matches like <thead> when looking for <th>.
        match html[name_end..].chars().next() {
            Some(c) if c == '>' || c.is_whitespace() || c == '/' => {}
            _ => {
                pos = name_end;
                continue;
            }
        }

        let Some(gt) = html[name_end..].find('>') else {
            break;
        };
        let body_start = name_end + gt + 1;
        let Some(end_rel) = html[body_start..].find(&close) else {
            break;
        };
        out.push(&html[body_start..body_start + end_rel]);

        pos = body_start + end_rel + close.len();
    }
    out
}

/// Strip markup and decode the handful of entities the listing uses.
fn cell_text(cell: &str) -> String {
    let mut out = String::with_capacity(cell.len());
    let mut in_tag = false;
    for c in cell.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ptbr_plain_decimal() {
        assert_eq!(parse_ptbr_number("38,10"), Some(dec!(38.10)));
        assert_eq!(parse_ptbr_number("-5,32"), Some(dec!(-5.32)));
    }

    #[test]
    fn test_ptbr_thousands_separator() {
        assert_eq!(parse_ptbr_number("1.234.567"), Some(dec!(1234567)));
        assert_eq!(parse_ptbr_number("2.000.000,50"), Some(dec!(2000000.50)));
    }

    #[test]
    fn test_ptbr_percent() {
        assert_eq!(parse_ptbr_number("21,45%"), Some(dec!(21.45)));
        assert_eq!(parse_ptbr_number("0,00%"), Some(dec!(0)));
    }

    #[test]
    fn test_ptbr_garbage_is_none() {
        assert_eq!(parse_ptbr_number(""), None);
        assert_eq!(parse_ptbr_number("n/a"), None);
        assert_eq!(parse_ptbr_number("-"), None);
    }

    const PAGE: &str = r#"
        <html><body><div><table class="resultado">
        <thead><tr><th>Papel</th><th>Cotação</th><th>EV/EBIT</th></tr></thead>
        <tbody>
        <tr><td><a href="det.php?papel=PETR4">PETR4</a></td><td>38,10</td><td>3,21</td></tr>
        <tr><td>VALE3</td><td>61,50</td><td>4,87</td></tr>
        </tbody>
        </table></div></body></html>
    "#;

    #[test]
    fn test_extract_table() {
        let table = extract_table(PAGE).unwrap();
        assert_eq!(table.columns(), ["Cotação", "EV/EBIT"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].ticker, "PETR4");
        assert_eq!(table.rows()[0].cell("Cotação"), Some("38,10"));
        assert_eq!(table.rows()[1].ticker, "VALE3");
        assert_eq!(table.rows()[1].cell("EV/EBIT"), Some("4,87"));
    }

    #[test]
    fn test_extract_no_table_is_unavailable() {
        let err = extract_table("<html><body>maintenance</body></html>").unwrap_err();
        assert!(matches!(err, FeedError::DataUnavailable(_)));
    }

    #[test]
    fn test_extract_header_only_is_unavailable() {
        let html = "<table><tr><th>Papel</th><th>Cotação</th></tr></table>";
        let err = extract_table(html).unwrap_err();
        assert!(matches!(err, FeedError::DataUnavailable(_)));
    }

    #[test]
    fn test_row_with_wrong_cell_count_is_skipped() {
        let html = r#"<table>
            <tr><th>Papel</th><th>Cotação</th></tr>
            <tr><td>PETR4</td></tr>
            <tr><td>VALE3</td><td>61,50</td></tr>
        </table>"#;
        let table = extract_table(html).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].ticker, "VALE3");
    }
}
