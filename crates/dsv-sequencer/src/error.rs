//! Error types for the sequencer crate

use thiserror::Error;

use crate::phase::StructureFamily;

/// Preconditions that do not hold for an operation.
///
/// Raised by [`crate::Animated::check`] so the caller can show a blocking
/// notice instead of starting an animation. The structures themselves never
/// return these; they answer with `None` or `false`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperationError {
    #[error("The {0} is empty")]
    EmptyStructure(StructureFamily),

    #[error("Key '{0}' not found")]
    KeyNotFound(String),

    #[error("Value {0} not found")]
    ValueNotFound(i64),

    #[error("Vertex '{0}' not found")]
    VertexNotFound(String),

    #[error("Vertex '{0}' already exists")]
    DuplicateVertex(String),

    #[error("Edge {from} -> {to} not found")]
    EdgeNotFound { from: String, to: String },
}

/// Errors raised while loading sequencer configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid playback speed: {0}")]
    InvalidSpeed(f64),
}
