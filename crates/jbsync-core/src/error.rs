// Rust guideline compliant 2026-02-06

//! Error types for the jira-beads-sync core library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for fetch, conversion and rendering operations.
///
/// Every variant is fatal to the run that produced it. Variants raised while
/// talking to the issue source carry the key or query being processed.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or transport failure while talking to the issue source.
    #[error("Source unavailable ({key}): {message}")]
    SourceUnavailable {
        /// Key or query being processed.
        key: String,
        /// Transport failure description.
        message: String,
    },

    /// The issue source rejected the configured credentials.
    #[error("Source rejected credentials ({key}): {message}")]
    SourceUnauthorized {
        /// Key or query being processed.
        key: String,
        /// Response description.
        message: String,
    },

    /// The requested key does not exist in the issue source.
    #[error("Source record not found: {0}")]
    SourceNotFound(String),

    /// The issue source returned a payload that could not be parsed.
    #[error("Malformed source response ({key}): {message}")]
    MalformedSourceResponse {
        /// Key or query being processed.
        key: String,
        /// Parse failure description.
        message: String,
    },

    /// A parsed record is missing a required field.
    #[error("Validation failed for {key}: {reason}")]
    ValidationFailure {
        /// Key of the offending record, or its position when the key is absent.
        key: String,
        /// Which requirement was violated.
        reason: String,
    },

    /// An input or a query produced zero records.
    #[error("Empty result set: {0}")]
    EmptyResultSet(String),

    /// Conversion was invoked without any records.
    #[error("Nothing to convert: input contains no records")]
    NilInput,

    /// Two distinct source keys fold to the same target id.
    #[error("Id collision: {first} and {second} both map to {id}")]
    IdCollision {
        /// The folded target id.
        id: String,
        /// Source key registered first.
        first: String,
        /// Source key that collided with it.
        second: String,
    },

    /// A search returned fewer keys than it matched and truncation is fatal.
    #[error("Search for {query} returned {returned} of {total} matches")]
    TruncatedSearch {
        /// The search query.
        query: String,
        /// Number of keys actually returned.
        returned: usize,
        /// Total number of matches reported by the source.
        total: usize,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A repository annotation already exists on the target issue.
    #[error("Repository {repository} is already associated with issue {id}")]
    AnnotationConflict {
        /// Target issue id.
        id: String,
        /// Repository that was already present.
        repository: String,
    },

    /// A rendered target entity was not found.
    #[error("Target entity not found: {id} in {}", path.display())]
    NotFound {
        /// Target entity id.
        id: String,
        /// Where the entity was looked up.
        path: PathBuf,
    },

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Returns the source key or query attached to the error, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::SourceUnavailable { key, .. }
            | Error::SourceUnauthorized { key, .. }
            | Error::MalformedSourceResponse { key, .. }
            | Error::ValidationFailure { key, .. } => Some(key),
            Error::SourceNotFound(key) => Some(key),
            Error::TruncatedSearch { query, .. } => Some(query),
            Error::IdCollision { second, .. } => Some(second),
            _ => None,
        }
    }

    /// Returns true for errors reported by the issue source itself.
    #[must_use]
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            Error::SourceUnavailable { .. }
                | Error::SourceUnauthorized { .. }
                | Error::SourceNotFound(_)
                | Error::MalformedSourceResponse { .. }
        )
    }
}
