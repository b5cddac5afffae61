// src/error.rs

//! Unified error handling for the content client.

use std::fmt;

use thiserror::Error;

/// Result type alias for content operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Endpoint answered with a non-success status
    #[error("{endpoint} answered with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Response body did not match any known envelope
    #[error("Unexpected response from {endpoint}: {message}")]
    Envelope { endpoint: String, message: String },

    /// Record lookup by id failed
    #[error("No record with id '{id}' in {endpoint}")]
    NotFound { endpoint: String, id: String },

    /// Endpoint key is not one of the known endpoints
    #[error("Unknown endpoint '{0}'")]
    UnknownEndpoint(String),

    /// Locale tag is not one of the supported locales
    #[error("Unknown locale '{0}'")]
    UnknownLocale(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an envelope error for an endpoint.
    pub fn envelope(endpoint: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Envelope {
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }

    /// Create a not-found error for a record id.
    pub fn not_found(endpoint: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            endpoint: endpoint.into(),
            id: id.into(),
        }
    }
}
