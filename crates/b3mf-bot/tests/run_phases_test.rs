//! Phase-ordering integration tests for `Application::run`.
//!
//! Collaborators are scripted: an in-memory table source and a recording
//! consent gate. Every terminal state must be a clean `RunOutcome`, and
//! later phases must not be touched once an earlier gate stops the run.

use b3mf_bot::{AppConfig, Application, ConsentGate, RunOutcome};
use b3mf_core::Credentials;
use b3mf_feed::{
    BoxFuture, FeedError, FeedResult, RawRow, RawTable, TableSource, COL_EV_EBIT, COL_LIQUIDITY,
    COL_PRICE, COL_ROIC,
};
use b3mf_ranker::Ranker;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory table source: either a fixed table or a fixed failure.
struct StaticSource {
    table: Option<RawTable>,
}

impl StaticSource {
    fn table(table: RawTable) -> Self {
        Self { table: Some(table) }
    }

    fn unavailable() -> Self {
        Self { table: None }
    }
}

impl TableSource for StaticSource {
    fn fetch(&self) -> BoxFuture<'_, FeedResult<RawTable>> {
        let result = match &self.table {
            Some(table) => Ok(table.clone()),
            None => Err(FeedError::DataUnavailable("scripted outage".to_string())),
        };
        Box::pin(async move { result })
    }
}

/// Consent gate that records how often it was consulted.
struct RecordingConsent {
    answer: bool,
    calls: AtomicUsize,
}

impl RecordingConsent {
    fn agreeing() -> Self {
        Self {
            answer: true,
            calls: AtomicUsize::new(0),
        }
    }

    fn declining() -> Self {
        Self {
            answer: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn consulted(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ConsentGate for RecordingConsent {
    fn confirm(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

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
    [COL_PRICE, COL_EV_EBIT, COL_ROIC, COL_LIQUIDITY]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn valid_table() -> RawTable {
    RawTable::new(
        columns(),
        vec![
            raw_row("AAAA3", "10,00", "5,00", "20,00%", "2.000.000"),
            raw_row("BBBB3", "20,00", "3,00", "10,00%", "2.000.000"),
            raw_row("CCCC3", "30,00", "10,00", "1,00%", "500.000"),
        ],
    )
}

/// Window that contains no time at all (open after close).
fn always_closed() -> b3mf_risk::MarketHours {
    b3mf_risk::MarketHours {
        open: "23:59:59".to_string(),
        close: "00:00:00".to_string(),
    }
}

/// Window spanning the whole day.
fn always_open() -> b3mf_risk::MarketHours {
    b3mf_risk::MarketHours {
        open: "00:00:00".to_string(),
        close: "23:59:59".to_string(),
    }
}

#[tokio::test]
async fn data_unavailable_stops_before_everything_else() {
    let app = Application::new(AppConfig::default());
    let consent = RecordingConsent::agreeing();

    let outcome = app
        .run(&StaticSource::unavailable(), &consent)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::DataUnavailable);
    assert_eq!(consent.consulted(), 0);
}

#[tokio::test]
async fn zero_survivors_is_a_clean_no_candidates_run() {
    let table = RawTable::new(
        columns(),
        vec![raw_row("ILLQ3", "10,00", "5,00", "20,00%", "100")],
    );
    let app = Application::new(AppConfig::default());
    let consent = RecordingConsent::agreeing();

    let outcome = app.run(&StaticSource::table(table), &consent).await.unwrap();

    assert_eq!(outcome, RunOutcome::NoCandidates);
    assert_eq!(consent.consulted(), 0);
}

#[tokio::test]
async fn closed_market_skips_connection_and_consent() {
    let mut config = AppConfig::default();
    config.market_hours = always_closed();
    config.credentials = Credentials::new("1", "2", "http://127.0.0.1:9");
    let app = Application::new(config);
    let consent = RecordingConsent::agreeing();

    let outcome = app
        .run(&StaticSource::table(valid_table()), &consent)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::MarketClosed);
    assert_eq!(consent.consulted(), 0, "consent comes after the gates");
}

#[tokio::test]
async fn incomplete_credentials_stop_before_consent() {
    let mut config = AppConfig::default();
    config.market_hours = always_open();
    config.credentials = Credentials::new("12345", "", "http://127.0.0.1:9");
    let app = Application::new(config);
    let consent = RecordingConsent::agreeing();

    let outcome = app
        .run(&StaticSource::table(valid_table()), &consent)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::CredentialsIncomplete);
    assert_eq!(consent.consulted(), 0);
}

#[tokio::test]
async fn declined_consent_stops_before_connection() {
    let mut config = AppConfig::default();
    config.market_hours = always_open();
    config.credentials = Credentials::new("12345", "hunter2", "http://127.0.0.1:9");
    let app = Application::new(config);
    let consent = RecordingConsent::declining();

    let outcome = app
        .run(&StaticSource::table(valid_table()), &consent)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::ConsentDeclined);
    assert_eq!(consent.consulted(), 1);
}

#[tokio::test]
async fn unreachable_broker_is_a_clean_connection_failure() {
    let mut config = AppConfig::default();
    config.market_hours = always_open();
    // Discard port: connection is refused immediately.
    config.credentials = Credentials::new("12345", "hunter2", "http://127.0.0.1:9");
    let app = Application::new(config);
    let consent = RecordingConsent::agreeing();

    let outcome = app
        .run(&StaticSource::table(valid_table()), &consent)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::ConnectionFailed);
    assert_eq!(consent.consulted(), 1);
}

#[tokio::test]
async fn ranking_pipeline_selects_tied_candidates_in_table_order() {
    // AAAA3: rank_ev_ebit=2, rank_roic=1, score 3.
    // BBBB3: rank_ev_ebit=1, rank_roic=2, score 3.
    // CCCC3: filtered out for low liquidity.
    // Equal scores keep table order.
    let rows = b3mf_feed::normalize(&valid_table()).unwrap();
    let table = Ranker::new(b3mf_ranker::RankerConfig::default()).rank(&rows);

    assert_eq!(table.tickers().tickers(), ["AAAA3", "BBBB3"]);
}
