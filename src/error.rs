//! Error types for profile-scan
//!
//! Two layers of errors live here:
//! - [`Error`] covers infrastructure failures (configuration, HTTP client construction,
//!   API server I/O). These are the only failures surfaced to callers as `Err`.
//! - [`FetchError`], [`ParseError`] and [`ResolveError`] describe why a single identifier
//!   could not be resolved. They never escape a batch; the resolver folds them into a
//!   [`ProfileOutcome::Failure`](crate::types::ProfileOutcome) value.

use crate::types::FailureKind;
use thiserror::Error;

/// Result type alias for profile-scan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for profile-scan
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "fetch.base_url")
        key: Option<String>,
    },

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

impl Error {
    /// Build a configuration error for a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Failure while retrieving a profile page
///
/// The `detail` strings carry the underlying transport message unchanged so that
/// diagnostics survive into the batch report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request exceeded the configured timeout
    #[error("{detail}")]
    Timeout {
        /// Transport message
        detail: String,
    },

    /// DNS resolution or TCP/TLS connection failed
    #[error("{detail}")]
    Connect {
        /// Transport message
        detail: String,
    },

    /// The server answered with a non-2xx status
    #[error("{status} for url ({url})")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Any other transport failure, including reading the response body
    #[error("{detail}")]
    Transport {
        /// Transport message
        detail: String,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        let detail = e.to_string();
        if e.is_timeout() {
            FetchError::Timeout { detail }
        } else if e.is_connect() {
            FetchError::Connect { detail }
        } else if let Some(status) = e.status() {
            FetchError::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            FetchError::Transport { detail }
        }
    }
}

/// Failure while extracting repositories from a fetched document
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The repository listing container is not present in the document
    #[error("repository listing container not found")]
    ListingNotFound,

    /// The document could not be processed as expected
    #[error("{0}")]
    Structure(String),
}

/// Why a single identifier could not be resolved
///
/// The `Display` output is the human-readable message recorded in the batch report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Identifier was empty, whitespace or the literal "none"
    #[error("No identifier provided")]
    MissingIdentifier,

    /// Identifier contains characters outside `[A-Za-z0-9-]`
    #[error("Invalid identifier format")]
    InvalidFormat,

    /// Profile page could not be fetched
    #[error("Network error: {0}")]
    Network(#[from] FetchError),

    /// Page fetched but the repository listing is absent
    #[error("No repositories found")]
    NotFound,

    /// Unexpected failure while extracting repositories
    #[error("Scraping error: {0}")]
    Scraping(String),
}

impl ResolveError {
    /// Classify this error into the per-row failure taxonomy
    pub fn kind(&self) -> FailureKind {
        match self {
            ResolveError::MissingIdentifier | ResolveError::InvalidFormat => {
                FailureKind::InvalidIdentifier
            }
            ResolveError::Network(_) => FailureKind::NetworkError,
            ResolveError::NotFound => FailureKind::NotFound,
            ResolveError::Scraping(_) => FailureKind::ScrapingError,
        }
    }
}

impl From<ParseError> for ResolveError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::ListingNotFound => ResolveError::NotFound,
            ParseError::Structure(detail) => ResolveError::Scraping(detail),
        }
    }
}
