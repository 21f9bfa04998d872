//! Error types for airgraph-core.

use thiserror::Error;

/// Result type alias for store and query operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors produced by the entity store and the query layers above it.
///
/// Every variant is deterministic given the current store contents and the
/// operation's arguments; retrying without changing either reproduces the
/// same failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A lookup by numeric ID or IATA code matched nothing.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Entity kind that was looked up ("airline", "airport", "route").
        entity: &'static str,
        /// The ID or code that failed to resolve.
        key: String,
    },

    /// An insert collided with an existing numeric ID.
    #[error("{entity} ID already exists: {id}")]
    DuplicateKey {
        /// Entity kind being inserted.
        entity: &'static str,
        /// The colliding ID.
        id: i64,
    },

    /// A route insert named an airline or airport that does not exist.
    #[error("invalid {entity} reference: {id}")]
    InvalidReference {
        /// Which reference was dangling ("airline", "source airport",
        /// "destination airport").
        entity: &'static str,
        /// The dangling ID.
        id: i64,
    },

    /// A semantically malformed query, e.g. identical source and
    /// destination in a one-hop search.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Description of what was malformed.
        message: String,
    },
}

impl StoreError {
    /// Shorthand for a `NotFound` with a displayable key.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Shorthand for an `InvalidRequest` with a message.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        StoreError::InvalidRequest {
            message: message.into(),
        }
    }
}
