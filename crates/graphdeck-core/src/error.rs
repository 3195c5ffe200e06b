//! Error types for graphdeck.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Message suitable for a transient user-facing notification.
    ///
    /// API errors carry the backend's `detail` text; everything else
    /// falls back to a generic body so internals don't leak into toasts.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api { message, .. } => message.clone(),
            Error::NotFound(what) => format!("{} not found", what),
            Error::Http(_) => "Failed to reach the backend".to_string(),
            _ => "Something went wrong".to_string(),
        }
    }

    /// True for errors produced from a non-2xx backend response.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api { .. })
    }
}
