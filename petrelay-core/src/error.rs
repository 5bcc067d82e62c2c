//! Error types surfaced by the findings store.

use thiserror::Error;

/// Caller supplied a malformed or incomplete submission.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// `jobId` was absent or an empty string.
    #[error("Missing required field: jobId")]
    MissingJobId,

    /// `placeId` was absent or an empty string.
    #[error("Missing required field: placeId")]
    MissingPlaceId,

    /// `pets` was absent.
    #[error("Missing required field: pets (must be an array)")]
    MissingPets,

    /// `pets` was present but held no entries.
    #[error("pets must contain at least one pet")]
    EmptyPets,
}

/// Errors returned by [`crate::FindingsStore`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The submission was rejected before any state changed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Message suitable for returning to the caller as-is.
    pub fn client_message(&self) -> String {
        match self {
            StoreError::Validation(err) => err.to_string(),
        }
    }
}

/// Shorthand for results produced by the store.
pub type Result<T> = std::result::Result<T, StoreError>;
