// Rust guideline compliant 2026-02-06

//! Error types for the Jira client.

use thiserror::Error;

/// Result type alias for Jira operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures while talking to Jira.
///
/// Converted into the core taxonomy with `From` so the graph fetcher only
/// ever sees `jbsync_core::Error`.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be sent or its body could not be read.
    #[error("Request for {key} failed: {source}")]
    Transport {
        /// Key, query or endpoint being requested.
        key: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// Jira answered with a non-success status.
    #[error("Jira API returned status {status} for {key}: {body}")]
    Status {
        /// Key, query or endpoint being requested.
        key: String,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body is not the expected JSON.
    #[error("Failed to parse response for {key}: {source}")]
    Malformed {
        /// Key, query or endpoint being requested.
        key: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The URL could not be parsed or does not name an issue.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}

impl From<Error> for jbsync_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Transport { key, source } => jbsync_core::Error::SourceUnavailable {
                key,
                message: source.to_string(),
            },
            Error::Status { key, status, body } => match status {
                401 | 403 => jbsync_core::Error::SourceUnauthorized {
                    key,
                    message: format!("status {}", status),
                },
                404 => jbsync_core::Error::SourceNotFound(key),
                _ => jbsync_core::Error::SourceUnavailable {
                    key,
                    message: format!("status {}: {}", status, body),
                },
            },
            Error::Malformed { key, source } => jbsync_core::Error::MalformedSourceResponse {
                key,
                message: source.to_string(),
            },
            Error::InvalidUrl(msg) => jbsync_core::Error::InvalidConfig(msg),
            Error::Client(source) => jbsync_core::Error::InvalidConfig(source.to_string()),
        }
    }
}
