//! Error types for podgen.

use thiserror::Error;

/// Library-level error type for podgen operations.
#[derive(Error, Debug)]
pub enum PodgenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input not found: {0}")]
    InputNotFound(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("Chunk exceeds token limit: {count} > {limit}")]
    TokenLimit { count: u32, limit: u32 },

    #[error("PCM payload of {0} bytes does not fit in a WAV container")]
    WavOverflow(u64),

    #[error("Invalid script: {0}")]
    InvalidScript(String),

    #[error("Dialogue generation failed: {0}")]
    Dialogue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Result type alias for podgen operations.
pub type Result<T> = std::result::Result<T, PodgenError>;
