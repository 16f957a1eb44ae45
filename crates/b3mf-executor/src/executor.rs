//! Per-ticker buy-order execution.
//!
//! Each candidate gets exactly one attempt, in candidate order, and the
//! failure of one ticker never aborts the rest. The loop itself is
//! infallible: every path classifies into an `OrderOutcome`, so teardown
//! after the loop can never be skipped.

use crate::broker::{BrokerError, BrokerSession};
use b3mf_core::{CandidateList, OrderOutcome, OrderRequest, Volume, RETCODE_DONE};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// One ticker's recorded outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerOutcome {
    pub ticker: String,
    pub outcome: OrderOutcome,
}

/// Serialized buy-order execution over one broker session.
pub struct OrderExecutor {
    volume: Volume,
}

impl OrderExecutor {
    pub fn new(volume: Volume) -> Self {
        Self { volume }
    }

    /// Submit one buy order per candidate, strictly sequentially.
    ///
    /// Preconditions enforced by the caller: market gate passed,
    /// credentials validated, consent affirmed, session established.
    pub async fn execute<S: BrokerSession>(
        &self,
        session: &S,
        candidates: &CandidateList,
    ) -> Vec<TickerOutcome> {
        info!(count = candidates.len(), "Submitting buy orders");

        let mut outcomes = Vec::with_capacity(candidates.len());
        for ticker in candidates {
            let outcome = self.execute_one(session, ticker).await;
            outcomes.push(TickerOutcome {
                ticker: ticker.clone(),
                outcome,
            });
        }
        outcomes
    }

    /// One attempt for one ticker: select, quote, build, submit, classify.
    /// No retries at any step.
    async fn execute_one<S: BrokerSession>(&self, session: &S, ticker: &str) -> OrderOutcome {
        if let Err(BrokerError::Transport(detail)) = session.select(ticker).await {
            error!(ticker, detail = %detail, "Symbol selection failed");
            return OrderOutcome::ConnectionError(detail);
        }

        let quote = match session.quote(ticker).await {
            Ok(Some(quote)) => quote,
            Ok(None) => {
                warn!(ticker, "Quote unavailable");
                return OrderOutcome::InvalidQuote;
            }
            Err(BrokerError::Transport(detail)) => {
                error!(ticker, detail = %detail, "Quote fetch failed");
                return OrderOutcome::ConnectionError(detail);
            }
        };
        if !quote.ask.is_positive() {
            warn!(ticker, ask = %quote.ask, "Non-positive ask price");
            return OrderOutcome::InvalidQuote;
        }

        let request = OrderRequest::buy(ticker, self.volume, quote.ask);
        match session.submit(&request).await {
            Ok(Some(reply)) if reply.retcode == RETCODE_DONE => {
                info!(
                    ticker,
                    price = %request.price,
                    volume = %request.volume,
                    "Buy order filled"
                );
                OrderOutcome::Filled {
                    price: request.price,
                    volume: request.volume,
                }
            }
            Ok(Some(reply)) => {
                error!(ticker, retcode = reply.retcode, "Buy order rejected");
                OrderOutcome::Rejected(reply.retcode)
            }
            Ok(None) => {
                let detail = session.last_error();
                error!(ticker, detail = %detail, "Null reply from broker");
                OrderOutcome::ConnectionError(detail)
            }
            Err(BrokerError::Transport(detail)) => {
                error!(ticker, detail = %detail, "Order submission failed");
                OrderOutcome::ConnectionError(detail)
            }
        }
    }
}
