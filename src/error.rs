// src/error.rs
use thiserror::Error;

/// Construction-time failures. Scoring and aggregation never return these;
/// malformed per-record data degrades to defaults instead.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid lexicon entry `{token}`: {reason}")]
    InvalidLexicon { token: String, reason: String },

    #[error("Invalid modifier `{token}` with factor {factor}")]
    InvalidModifier { token: String, factor: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for engine construction.
pub type Result<T> = std::result::Result<T, EngineError>;
