//! Codetweak Error Types
//!
//! Centralized error handling for assistant operations.

use thiserror::Error;

/// Central error type for codetweak
#[derive(Error, Debug)]
pub enum TweakError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("No completion generated")]
    EmptyCompletion,

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for codetweak operations
pub type TweakResult<T> = Result<T, TweakError>;
