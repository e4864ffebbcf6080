//! Unified error types for the service.

use thiserror::Error;

/// Unified error type for the service.
///
/// Handlers surface these to callers as HTTP 500 with the display text as
/// the body, so the messages double as the wire-level error contract.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error (environment variables).
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration file parsing error.
    #[error("configuration file error: {0}")]
    ConfigFile(#[from] serde_yaml::Error),

    /// Backing-store operation failure (scan, query, metadata).
    #[error("store error: {0}")]
    Store(String),

    /// A stored item could not be decoded into a record.
    #[error("decode error: {0}")]
    Decode(String),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// Wrap a backing-store failure, preserving its display text.
    pub fn store(err: impl std::fmt::Display) -> Self {
        Self::Store(err.to_string())
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
