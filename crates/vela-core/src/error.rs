//! Error types for the Vela core library.

use thiserror::Error;

/// Core error type for Vela API calls and output rendering.
#[derive(Error, Debug)]
pub enum VelaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid server address: {0}")]
    InvalidAddress(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VelaError {
    /// Returns the HTTP status for errors reported by the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            VelaError::Api { status, .. } => Some(*status),
            VelaError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for Vela operations.
pub type Result<T> = std::result::Result<T, VelaError>;
