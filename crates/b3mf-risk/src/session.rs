//! Market session window.
//!
//! A pure predicate over the exchange's local wall-clock time. The caller
//! supplies "now"; no timezone conversion happens here. The gate is
//! advisory: it avoids opening a broker connection outside expected hours
//! and does not replace the exchange's own session enforcement.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Trading session window, inclusive on both bounds.
///
/// Times are configured as `"HH:MM:SS"` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketHours {
    /// Session open time.
    #[serde(default = "default_open")]
    pub open: String,
    /// Session close time.
    #[serde(default = "default_close")]
    pub close: String,
}

fn default_open() -> String {
    "10:00:00".to_string()
}

fn default_close() -> String {
    "18:00:00".to_string()
}

impl Default for MarketHours {
    fn default() -> Self {
        Self {
            open: default_open(),
            close: default_close(),
        }
    }
}

impl MarketHours {
    /// Parse the open time.
    pub fn open_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.open, "%H:%M:%S").ok()
    }

    /// Parse the close time.
    pub fn close_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.close, "%H:%M:%S").ok()
    }

    /// Check whether the market is open at the given local time.
    ///
    /// Inclusive on both bounds: exactly `open` and exactly `close` count
    /// as open. An unparseable window fails closed.
    pub fn contains(&self, now: NaiveTime) -> bool {
        let (Some(open), Some(close)) = (self.open_time(), self.close_time()) else {
            debug!(open = %self.open, close = %self.close, "Unparseable market hours; treating as closed");
            return false;
        };
        open <= now && now <= close
    }
}
