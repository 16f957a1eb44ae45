//! REST bridge broker session.
//!
//! Talks JSON to a broker-terminal bridge whose base URL is the `server`
//! credential: `connect`, `select`, `quote`, `order` and `shutdown`
//! endpoints. Transport failures and bridge-reported errors are recorded
//! so `last_error` can explain a null response.

use crate::broker::{BoxFuture, BrokerError, BrokerResult, BrokerSession, OrderReply, Quote};
use crate::error::{ExecutorError, ExecutorResult};
use b3mf_core::{Credentials, OrderRequest, Price};
use parking_lot::Mutex;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Timeout for every bridge request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct ConnectRequest<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SymbolRequest {
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct AckResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    bid: Option<Decimal>,
    #[serde(default)]
    ask: Option<Decimal>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    #[serde(default)]
    retcode: Option<u32>,
    #[serde(default)]
    error: Option<String>,
}

/// Broker session over a REST bridge.
pub struct RestBrokerSession {
    client: Client,
    base_url: String,
    last_error: Mutex<String>,
}

impl RestBrokerSession {
    /// Open a session: build the client and authenticate with the bridge.
    ///
    /// # Errors
    /// `ConnectionFailed` when the client cannot be built, the bridge is
    /// unreachable, or it refuses the credentials.
    pub async fn connect(credentials: &Credentials) -> ExecutorResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ExecutorError::ConnectionFailed(format!("HTTP client: {e}")))?;

        let session = Self {
            client,
            base_url: credentials.server.trim_end_matches('/').to_string(),
            last_error: Mutex::new(String::new()),
        };

        info!(server = %session.base_url, "Connecting to broker bridge");
        let ack: AckResponse = session
            .post(
                "connect",
                &ConnectRequest {
                    login: &credentials.login,
                    password: &credentials.password,
                },
            )
            .await
            .map_err(|e| ExecutorError::ConnectionFailed(e.to_string()))?;

        if !ack.ok {
            let detail = ack.error.unwrap_or_else(|| "credentials refused".to_string());
            return Err(ExecutorError::ConnectionFailed(detail));
        }

        info!("Broker session established");
        Ok(session)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> BrokerResult<T> {
        let url = format!("{}/{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.record(format!("POST {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.record(format!("POST {path} returned HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| self.record(format!("POST {path} body: {e}")))
    }

    /// Record a service-level error and turn it into a transport error.
    fn record(&self, detail: String) -> BrokerError {
        *self.last_error.lock() = detail.clone();
        BrokerError::Transport(detail)
    }

    /// Remember a bridge-reported error without failing the call.
    fn note(&self, detail: Option<String>) {
        if let Some(detail) = detail {
            debug!(detail = %detail, "Bridge reported error");
            *self.last_error.lock() = detail;
        }
    }
}

impl BrokerSession for RestBrokerSession {
    fn select(&self, ticker: &str) -> BoxFuture<'_, BrokerResult<()>> {
        let request = SymbolRequest {
            symbol: ticker.to_string(),
        };
        Box::pin(async move {
            let ack: AckResponse = self.post("select", &request).await?;
            if !ack.ok {
                self.note(ack.error.clone());
                return Err(BrokerError::Transport(
                    ack.error.unwrap_or_else(|| "symbol selection refused".to_string()),
                ));
            }
            Ok(())
        })
    }

    fn quote(&self, ticker: &str) -> BoxFuture<'_, BrokerResult<Option<Quote>>> {
        let request = SymbolRequest {
            symbol: ticker.to_string(),
        };
        Box::pin(async move {
            let response: QuoteResponse = self.post("quote", &request).await?;
            self.note(response.error);
            match (response.bid, response.ask) {
                (Some(bid), Some(ask)) => Ok(Some(Quote {
                    bid: Price::new(bid),
                    ask: Price::new(ask),
                })),
                _ => Ok(None),
            }
        })
    }

    fn submit(&self, request: &OrderRequest) -> BoxFuture<'_, BrokerResult<Option<OrderReply>>> {
        let request = request.clone();
        Box::pin(async move {
            let response: OrderResponse = self.post("order", &request).await?;
            self.note(response.error);
            Ok(response.retcode.map(|retcode| OrderReply { retcode }))
        })
    }

    fn last_error(&self) -> String {
        self.last_error.lock().clone()
    }

    fn close(&self) -> BoxFuture<'_, BrokerResult<()>> {
        Box::pin(async move {
            let result: BrokerResult<AckResponse> =
                self.post("shutdown", &serde_json::json!({})).await;
            match result {
                Ok(_) => {
                    info!("Broker session closed");
                    Ok(())
                }
                Err(e) => {
                    warn!(error = %e, "Broker session close failed");
                    Err(e)
                }
            }
        })
    }
}
