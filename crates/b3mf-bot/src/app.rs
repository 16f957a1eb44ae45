//! Main application orchestration.
//!
//! Phase order: fetch → normalize → rank → market-hours gate →
//! credential gate → consent → connect → execute → close. Every phase
//! stop is a clean `RunOutcome` with a log trail; no error crosses from
//! the order phase back into already-computed ranking results.

use crate::config::AppConfig;
use crate::consent::ConsentGate;
use crate::error::AppResult;
use b3mf_core::{CandidateList, Volume};
use b3mf_executor::{
    BrokerSession, ExecutorError, OrderExecutor, RestBrokerSession, TickerOutcome,
};
use b3mf_feed::{normalize, TableSource};
use b3mf_ranker::Ranker;
use b3mf_risk::validate_credentials;
use chrono::Local;
use std::fmt;
use tracing::{error, info, warn};

/// How a run terminated.
///
/// Everything here is a valid, clean termination; `Application::run` only
/// returns `Err` for unexpected teardown failures.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Order phase ran; one recorded outcome per candidate.
    Completed(Vec<TickerOutcome>),
    /// Raw table missing, empty or unusable; aborted before ranking.
    DataUnavailable,
    /// Ranking produced zero survivors.
    NoCandidates,
    /// Market-hours gate failed; no connection attempted.
    MarketClosed,
    /// Credential gate failed; no connection attempted.
    CredentialsIncomplete,
    /// User declined; no connection attempted.
    ConsentDeclined,
    /// Broker session could not be opened.
    ConnectionFailed,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed(outcomes) => write!(f, "completed ({} orders)", outcomes.len()),
            Self::DataUnavailable => write!(f, "data unavailable"),
            Self::NoCandidates => write!(f, "no candidates"),
            Self::MarketClosed => write!(f, "market closed"),
            Self::CredentialsIncomplete => write!(f, "credentials incomplete"),
            Self::ConsentDeclined => write!(f, "consent declined"),
            Self::ConnectionFailed => write!(f, "connection failed"),
        }
    }
}

/// Main application.
pub struct Application {
    config: AppConfig,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run one complete cycle.
    ///
    /// Collaborators are injected: the table source (opaque fetch/render
    /// step) and the consent gate.
    pub async fn run(
        &self,
        source: &dyn TableSource,
        consent: &dyn ConsentGate,
    ) -> AppResult<RunOutcome> {
        let Some(candidates) = self.select_candidates(source).await? else {
            return Ok(RunOutcome::DataUnavailable);
        };
        if candidates.is_empty() {
            warn!("No tickers selected");
            return Ok(RunOutcome::NoCandidates);
        }
        info!(tickers = %candidates, "Selected tickers");

        // Both gates must pass before any connection is opened.
        let now = Local::now().time();
        info!(%now, "Checking market hours");
        if !self.config.market_hours.contains(now) {
            warn!(
                open = %self.config.market_hours.open,
                close = %self.config.market_hours.close,
                "Market is closed; broker connection will not be attempted"
            );
            return Ok(RunOutcome::MarketClosed);
        }
        info!("Market is open; checking broker credentials");
        if !validate_credentials(&self.config.credentials) {
            error!("Broker credentials not provided or incomplete");
            return Ok(RunOutcome::CredentialsIncomplete);
        }

        if !consent.confirm() {
            info!("Order submission aborted by the user");
            return Ok(RunOutcome::ConsentDeclined);
        }

        let session = match RestBrokerSession::connect(&self.config.credentials).await {
            Ok(session) => session,
            Err(e) => {
                error!(error = %e, "Could not open broker session");
                return Ok(RunOutcome::ConnectionFailed);
            }
        };

        // The executor loop is infallible, so the session is released on
        // every path; only a teardown failure propagates.
        let outcomes = self.execute_orders(&session, &candidates).await;
        session
            .close()
            .await
            .map_err(|e| ExecutorError::Teardown(e.to_string()))?;

        Ok(RunOutcome::Completed(outcomes))
    }

    /// Fetch, normalize and rank. `None` means the data phase failed.
    async fn select_candidates(
        &self,
        source: &dyn TableSource,
    ) -> AppResult<Option<CandidateList>> {
        let raw = match source.fetch().await {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "Fundamentals listing unavailable; aborting run");
                return Ok(None);
            }
        };

        let rows = match normalize(&raw) {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "Fundamentals table unusable; aborting run");
                return Ok(None);
            }
        };

        let ranker = Ranker::new(self.config.ranker.clone());
        Ok(Some(ranker.rank(&rows).tickers()))
    }

    async fn execute_orders<S: BrokerSession>(
        &self,
        session: &S,
        candidates: &CandidateList,
    ) -> Vec<TickerOutcome> {
        let executor = OrderExecutor::new(Volume::new(self.config.volume));
        let outcomes = executor.execute(session, candidates).await;

        let filled = outcomes.iter().filter(|o| o.outcome.is_filled()).count();
        let rejected = outcomes
            .iter()
            .filter(|o| matches!(o.outcome, b3mf_core::OrderOutcome::Rejected(_)))
            .count();
        let invalid = outcomes
            .iter()
            .filter(|o| o.outcome == b3mf_core::OrderOutcome::InvalidQuote)
            .count();
        let failed = outcomes.len() - filled - rejected - invalid;
        info!(
            total = outcomes.len(),
            filled, rejected, invalid, failed, "Run summary"
        );
        outcomes
    }
}
