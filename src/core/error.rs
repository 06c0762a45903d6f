//! Error types for scheduler operations.

use thiserror::Error;

/// Errors produced by scheduler components.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A fired callback failed and no exception handler was installed.
    #[error("ticked callback failed: {0}")]
    Callback(anyhow::Error),
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Application-facing result using anyhow for higher-level contexts.
///
/// Callbacks return this so implementors can bubble up whatever error type
/// their work produces without the queue caring about its shape.
pub type AppResult<T> = Result<T, anyhow::Error>;
