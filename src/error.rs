//! Error types for the archflow backend

use thiserror::Error;

/// Backend error types
#[derive(Error, Debug)]
pub enum ArchError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, ArchError>;
