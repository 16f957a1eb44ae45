//! Order-related types and outcome classification.
//!
//! Provides order side, time-in-force and fill-policy enums, the order
//! request sent to the broker, and the per-ticker outcome recorded by the
//! executor.

use crate::{Price, Volume};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broker return code for a fully processed order ("done").
pub const RETCODE_DONE: u32 = 10009;

/// Strategy tag attached to every order for broker-side attribution.
pub const STRATEGY_TAG: u32 = 1;

/// Comment string attached to every order.
pub const STRATEGY_COMMENT: &str = "b3mf";

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Time-in-force for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good-til-cancelled (the policy used for every order this bot sends).
    #[default]
    #[serde(rename = "Gtc")]
    GoodTilCancelled,
    /// Immediate-or-cancel.
    #[serde(rename = "Ioc")]
    ImmediateOrCancel,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoodTilCancelled => write!(f, "Gtc"),
            Self::ImmediateOrCancel => write!(f, "Ioc"),
        }
    }
}

/// Fill policy for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Accept partial fills; the unfilled remainder is cancelled/returned.
    #[default]
    ReturnRemainder,
    /// Require the full volume or nothing.
    FillOrKill,
}

impl fmt::Display for FillPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReturnRemainder => write!(f, "return_remainder"),
            Self::FillOrKill => write!(f, "fill_or_kill"),
        }
    }
}

/// A single order request submitted to the broker session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Ticker symbol.
    pub ticker: String,
    pub side: OrderSide,
    /// Fixed per-order quantity.
    pub volume: Volume,
    /// Reference price, fetched live immediately before submission.
    pub price: Price,
    pub time_in_force: TimeInForce,
    pub fill_policy: FillPolicy,
    /// Strategy tag for broker-side attribution.
    pub tag: u32,
    pub comment: String,
}

impl OrderRequest {
    /// Build a market-style buy at the given reference price with the
    /// bot's fixed order semantics (GTC, partial fills accepted).
    pub fn buy(ticker: impl Into<String>, volume: Volume, price: Price) -> Self {
        Self {
            ticker: ticker.into(),
            side: OrderSide::Buy,
            volume,
            price,
            time_in_force: TimeInForce::GoodTilCancelled,
            fill_policy: FillPolicy::ReturnRemainder,
            tag: STRATEGY_TAG,
            comment: STRATEGY_COMMENT.to_string(),
        }
    }
}

/// Final classification of one ticker's submission attempt.
///
/// Never persisted; only reported. Once `Filled` is recorded it is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderOutcome {
    /// Broker returned the done code.
    Filled { price: Price, volume: Volume },
    /// Broker returned a non-done code.
    Rejected(u32),
    /// Transport-level failure anywhere in the per-ticker protocol.
    ConnectionError(String),
    /// Quote was unavailable or had a non-positive ask.
    InvalidQuote,
}

impl OrderOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, Self::Filled { .. })
    }
}

impl fmt::Display for OrderOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filled { price, volume } => write!(f, "filled @ {price} x {volume}"),
            Self::Rejected(code) => write!(f, "rejected (retcode {code})"),
            Self::ConnectionError(detail) => write!(f, "connection error: {detail}"),
            Self::InvalidQuote => write!(f, "invalid quote"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_buy_request_defaults() {
        let req = OrderRequest::buy("PETR4", Volume::new(dec!(500)), Price::new(dec!(38.10)));
        assert_eq!(req.side, OrderSide::Buy);
        assert_eq!(req.time_in_force, TimeInForce::GoodTilCancelled);
        assert_eq!(req.fill_policy, FillPolicy::ReturnRemainder);
        assert_eq!(req.tag, STRATEGY_TAG);
        assert_eq!(req.comment, STRATEGY_COMMENT);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(OrderOutcome::Rejected(10013).to_string(), "rejected (retcode 10013)");
        assert_eq!(OrderOutcome::InvalidQuote.to_string(), "invalid quote");
        assert!(OrderOutcome::Filled {
            price: Price::new(dec!(10)),
            volume: Volume::new(dec!(500)),
        }
        .is_filled());
    }
}
