//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed error: {0}")]
    Feed(#[from] b3mf_feed::FeedError),

    #[error("Executor error: {0}")]
    Executor(#[from] b3mf_executor::ExecutorError),
}

pub type AppResult<T> = Result<T, AppError>;
