//! Error types for supamem.

use thiserror::Error;

/// Main error type for supamem operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed configuration. The message is shown to the user verbatim.
    #[error("{0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport or status error from the OpenAI API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Postgres error.
    #[error("Postgres error: {0}")]
    Postgres(#[from] postgres::Error),

    /// TLS connector setup error.
    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Embedding provider returned an unusable response.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// LLM provider returned an unusable response.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Input text is empty or whitespace only.
    #[error("Input cannot be empty")]
    EmptyInput,

    /// Input text exceeds the maximum allowed length.
    #[error("Input too long: {actual_length} bytes (max {max_length})")]
    InputTooLong {
        max_length: usize,
        actual_length: usize,
    },

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Search limit out of range.
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    /// Vector length does not match the collection dimension.
    #[error("Mismatched dimensions: expected {expected} dimensions, got {actual} dimensions")]
    MismatchedDimensions { expected: usize, actual: usize },
}

impl Error {
    /// True for errors raised while loading or validating configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}
