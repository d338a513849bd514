//! Crate-wide error type.
//!
//! Two failure classes matter to callers: **transport** (the model call
//! itself failed) and **decode** (the reply did not match the expected
//! shape). Cache-layer failures are never surfaced as errors; the cache is
//! an optimization, not a correctness dependency.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BetscopeError>;

/// All errors betscope can surface to a caller.
#[derive(Debug, Error)]
pub enum BetscopeError {
    /// Startup configuration problem, e.g. a missing API key.
    #[error("configuration error: {0}")]
    Config(String),

    /// The external model call failed (network error or non-2xx status).
    #[error("model request failed: {message}")]
    Transport {
        /// HTTP status when the server answered, `None` on network errors.
        status: Option<u16>,
        message: String,
    },

    /// The model replied, but the reply did not match the expected shape.
    #[error("could not decode model reply: {0}")]
    Decode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BetscopeError {
    /// Transport failure without an HTTP status (connection-level errors).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Transport failure carrying the HTTP status the server returned.
    pub fn transport_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: format!("HTTP {status}: {}", message.into()),
        }
    }
}
