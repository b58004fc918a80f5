//! Error types for Rosterqa.

use thiserror::Error;

/// Library-level error type for Rosterqa operations.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Vector index error: {0}")]
    VectorIndex(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Coarse classification of a [`RosterError`], used when deciding how a
/// failure surfaces to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed configuration. Fatal for the affected operation.
    Configuration,
    /// The caller or a backend broke a data contract (bad payload, wrong dimension).
    ContractViolation,
    /// An external service was unreachable or returned an error.
    Backend,
    /// Local failures that fit nowhere else.
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::ContractViolation => "contract_violation",
            ErrorKind::Backend => "backend",
            ErrorKind::Internal => "internal",
        }
    }
}

impl RosterError {
    /// Map this error onto the error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::Config(_) | RosterError::TomlParse(_) => ErrorKind::Configuration,
            RosterError::InvalidInput(_) | RosterError::DimensionMismatch { .. } => {
                ErrorKind::ContractViolation
            }
            RosterError::Embedding(_)
            | RosterError::VectorIndex(_)
            | RosterError::Generation(_)
            | RosterError::Http(_) => ErrorKind::Backend,
            RosterError::Io(_) | RosterError::Json(_) => ErrorKind::Internal,
        }
    }
}

/// Result type alias for Rosterqa operations.
pub type Result<T> = std::result::Result<T, RosterError>;
