//! Table source abstraction and the HTTP implementation.
//!
//! The fetch/render step is an external collaborator: it either produces a
//! raw table or fails after a bounded wait. `TableSource` keeps the rest of
//! the pipeline independent of where the table comes from.

use crate::error::{FeedError, FeedResult};
use crate::parser::extract_table;
use crate::raw::RawTable;
use reqwest::Client;
use std::pin::Pin;
use std::time::Duration;
use tracing::info;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Bounded wait for the listing page before declaring the data unavailable.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Provider of the raw fundamentals table.
pub trait TableSource: Send + Sync {
    /// Fetch the raw table, or fail with `DataUnavailable`/`Http`.
    fn fetch(&self) -> BoxFuture<'_, FeedResult<RawTable>>;
}

/// HTTP source for the Fundamentus results listing.
pub struct FundamentusSource {
    client: Client,
    url: String,
}

impl FundamentusSource {
    /// Create a source for the given listing URL.
    pub fn new(url: impl Into<String>) -> FeedResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| FeedError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn fetch_inner(&self) -> FeedResult<RawTable> {
        info!(url = %self.url, "Fetching fundamentals listing");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                FeedError::DataUnavailable(format!("listing fetch timed out: {e}"))
            } else {
                FeedError::Http(format!("listing fetch failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Http(format!("listing returned HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Http(format!("failed to read listing body: {e}")))?;

        extract_table(&body)
    }
}

impl TableSource for FundamentusSource {
    fn fetch(&self) -> BoxFuture<'_, FeedResult<RawTable>> {
        Box::pin(self.fetch_inner())
    }
}
