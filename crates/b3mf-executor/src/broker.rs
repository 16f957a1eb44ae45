//! Broker session trait.
//!
//! An explicit handle over an already-established broker connection,
//! passed into the executor and closed exactly once at the end of the
//! run. Every operation returns a tagged result; nothing here panics on
//! broker misbehavior.

use b3mf_core::{OrderRequest, Price};
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use thiserror::Error;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Transport-level broker failure.
#[derive(Debug, Clone, Error)]
pub enum BrokerError {
    #[error("broker transport error: {0}")]
    Transport(String),
}

pub type BrokerResult<T> = Result<T, BrokerError>;

/// Live quote for a selected symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub bid: Price,
    pub ask: Price,
}

/// Broker reply to an order submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReply {
    /// Broker return code; `RETCODE_DONE` means filled.
    pub retcode: u32,
}

/// A session-style handle to the trading service.
///
/// `quote` and `submit` distinguish three levels: `Err` is a transport
/// failure, `Ok(None)` is the broker's null response (queryable through
/// `last_error`), and `Ok(Some(..))` is an actual answer.
pub trait BrokerSession: Send + Sync {
    /// Request symbol selection/subscription before quoting it.
    fn select(&self, ticker: &str) -> BoxFuture<'_, BrokerResult<()>>;

    /// Fetch the current quote for a selected symbol.
    fn quote(&self, ticker: &str) -> BoxFuture<'_, BrokerResult<Option<Quote>>>;

    /// Submit an order synchronously and return the broker's reply.
    fn submit(&self, request: &OrderRequest) -> BoxFuture<'_, BrokerResult<Option<OrderReply>>>;

    /// Last known service-level error, for classifying null responses.
    fn last_error(&self) -> String;

    /// Release the connection. Must be called exactly once per session.
    fn close(&self) -> BoxFuture<'_, BrokerResult<()>>;
}
