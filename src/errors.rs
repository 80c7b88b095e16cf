/*!
 * Error types for the selectrans application.
 *
 * This module contains custom error types for the selection source and the
 * lookup providers, using the thiserror crate for ergonomic error
 * definitions. The binary reports them through `anyhow`.
 */

use thiserror::Error;

/// Errors that can occur when talking to a lookup provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error returned by the service itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },

    /// Error when parsing a response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

impl ProviderError {
    /// Whether another attempt at the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::ConnectionError(_) | Self::RequestFailed(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500 || *status_code == 429,
            Self::ParseError(_) => false,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if let Some(status) = error.status() {
            Self::ApiError {
                status_code: status.as_u16(),
                message: error.to_string(),
            }
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while reading or clearing the text selection
#[derive(Error, Debug)]
pub enum SelectionError {
    /// The selection command could not be found on this system
    #[error("Selection command not found: {0}")]
    CommandNotFound(String),

    /// The selection command ran but exited unsuccessfully
    #[error("Selection command exited with {status}: {stderr}")]
    CommandFailed {
        /// Exit status as reported by the OS
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// The configured command line is unusable
    #[error("Invalid selection command: {0}")]
    InvalidCommand(String),

    /// Any other I/O failure while spawning or reading the command
    #[error("Selection I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Both the dictionary and the fallback translation failed
    #[error("Dictionary lookup failed ({dictionary}); fallback translation failed ({fallback})")]
    FallbackFailed {
        /// Error from the dictionary provider
        dictionary: ProviderError,
        /// Error from the machine translation provider
        fallback: ProviderError,
    },
}
