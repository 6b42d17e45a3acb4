//! Error types for content fetching
//!
//! Only the transport layer produces errors. Resolution of entries, links and
//! fields never fails: missing pieces are simply omitted from the view model.

use thiserror::Error;

/// Result type alias for content-source operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the CMS
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or incomplete configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Network error (connection, TLS, DNS)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The CMS answered with a non-success status
    #[error("Query failed with status {status}: {message}")]
    QueryError { status: u16, message: String },

    /// The response body was not the expected JSON shape
    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    /// Operation timed out
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Human-readable text for the fetch-failure state shown to visitors.
    pub fn user_message(&self) -> String {
        match self {
            Error::ConfigError(_) => "The site is not configured to reach its content service.".to_string(),
            Error::NetworkError(_) | Error::Timeout(_) => {
                "The content service could not be reached. Please try again.".to_string()
            }
            Error::QueryError { status, .. } if *status == 401 || *status == 403 => {
                "Access to the content service was denied.".to_string()
            }
            Error::QueryError { message, .. } => format!("The content service rejected the request: {}", message),
            Error::DecodeError(_) => "The content service returned an unreadable response.".to_string(),
            Error::Other(msg) => msg.clone(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::DecodeError(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::DecodeError(err.to_string())
        } else {
            Error::NetworkError(err.to_string())
        }
    }
}
