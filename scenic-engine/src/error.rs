//! Error types for engine binding and painting.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur binding or running an engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The surface handle cannot be painted on (degenerate layout box).
    #[error("Invalid surface target: {0}")]
    InvalidTarget(String),

    /// A scene graph operation failed during painting.
    #[error(transparent)]
    Core(#[from] scenic_core::CoreError),
}
