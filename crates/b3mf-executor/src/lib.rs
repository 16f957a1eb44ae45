//! Order execution for the B3 magic-formula bot.
//!
//! Provides the `BrokerSession` abstraction (an explicit handle, never
//! ambient process state), a REST bridge implementation, and the
//! `OrderExecutor` that walks the candidate list submitting one gated buy
//! order per ticker with deterministic outcome classification.

pub mod broker;
pub mod error;
pub mod executor;
pub mod rest_broker;

pub use broker::{BoxFuture, BrokerError, BrokerResult, BrokerSession, OrderReply, Quote};
pub use error::{ExecutorError, ExecutorResult};
pub use executor::{OrderExecutor, TickerOutcome};
pub use rest_broker::RestBrokerSession;
