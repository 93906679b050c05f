//! Error types for hooks and the loop driver.

use thiserror::Error;

/// Failures raised by hooks, the loop driver and config loading.
#[derive(Debug, Error)]
pub enum HookError {
    /// The loop context lacks something a hook needs to run at all.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A hook asked for a value in `before_step` that the driver did not fetch.
    #[error("requested value was not fetched: {0}")]
    MissingFetch(&'static str),

    /// Writing hook output or reading a config file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for hook operations.
pub type HookResult<T> = Result<T, HookError>;
