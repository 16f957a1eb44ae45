//! Pre-connection gates for the B3 magic-formula bot.
//!
//! Both gates must pass before any broker connection is opened:
//! - `MarketHours`: advisory local-time session window
//! - credential completeness validation

pub mod credentials;
pub mod session;

pub use credentials::validate_credentials;
pub use session::MarketHours;
