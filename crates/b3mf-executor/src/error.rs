//! Executor error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutorError {
    /// Opening the broker session failed. Fatal to the order phase only.
    #[error("Broker connection failed: {0}")]
    ConnectionFailed(String),

    /// Closing the broker session failed.
    #[error("Broker teardown failed: {0}")]
    Teardown(String),
}

pub type ExecutorResult<T> = Result<T, ExecutorError>;
