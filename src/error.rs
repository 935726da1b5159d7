//! Error types for spectrum generation, the transform boundary and projection.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, OceanError>;

/// Failures reported by the inverse-transform engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("field is {actual}x{actual}, engine expects {expected}x{expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("batch of {actual} fields exceeds the limit of {limit}")]
    BatchTooLarge { limit: usize, actual: usize },
    #[error("transform size {0} is not a power of two")]
    NotPowerOfTwo(usize),
}

/// Errors surfaced by the ocean core and its boundary calls.
#[derive(Debug, Error)]
pub enum OceanError {
    #[error("invalid {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("no transform engine attached, frame skipped")]
    MissingTransformEngine,
    #[error("no camera available, projection skipped")]
    MissingCamera,
    #[error("screen grid needs {vertices} vertices, limit is {limit}")]
    GridTooDense { vertices: usize, limit: usize },
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl OceanError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
