//! Toolkit base error type.
//!
//! Sub-crates define their own error enums and either convert them into
//! `CoreError` or wrap `CoreError` as one variant.  Prefer whichever keeps
//! error sites clean.

use thiserror::Error;

/// The top-level error type for `ga-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `ga-core`.
pub type CoreResult<T> = Result<T, CoreError>;
