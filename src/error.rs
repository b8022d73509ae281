//! Crate-wide error type.
//!
//! Geometric degeneracies (zero-length edges, coincident circle centres,
//! parallel segments) are never reported here; they are handled by fallback
//! values inside the collision code. Only scene-composition mistakes and
//! configuration/scene loading failures surface as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollisionError {
    /// A caller passed an entity, shape or parameter that cannot be used.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The INI configuration could not be read, parsed or written.
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CollisionError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CollisionError::InvalidArgument(msg.into())
    }
}
