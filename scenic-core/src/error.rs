//! Error types for scene graph construction and painting.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur constructing or painting scene graph values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A point or dimension was constructed from a degenerate coordinate list.
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// A color component was outside its valid range or a hex string was malformed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A custom paintable failed while painting itself.
    #[error("Paint failed: {0}")]
    Paint(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
