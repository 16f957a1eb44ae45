//! Feed error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// The raw table is empty, missing, or structurally unusable.
    /// Fatal: no orders can be derived from no data.
    #[error("Fundamentals data unavailable: {0}")]
    DataUnavailable(String),

    /// HTTP transport failure while fetching the listing.
    #[error("HTTP error: {0}")]
    Http(String),
}

pub type FeedResult<T> = Result<T, FeedError>;
