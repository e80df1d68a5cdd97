use crate::backend::contract::BackendError;

/// Convenience result type used across maskpaint.
pub type MaskpaintResult<T> = Result<T, MaskpaintError>;

/// Top-level error taxonomy used by editor APIs.
///
/// Out-of-range brush geometry is never an error; it is clipped silently. "Nothing to export"
/// is modeled as `Option::None` at the export surface, not as a variant here.
#[derive(thiserror::Error, Debug)]
pub enum MaskpaintError {
    /// Invalid user-provided values (brush settings, configuration, display geometry).
    #[error("validation error: {0}")]
    Validation(String),

    /// An image could not be resolved or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A mask or preview could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// An operation was requested before its inputs exist (no image loaded, nothing painted).
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Failure reported by the inpainting backend collaborator.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MaskpaintError {
    /// Build a [`MaskpaintError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MaskpaintError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`MaskpaintError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`MaskpaintError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`MaskpaintError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` when the backend reported a missing credential.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::Backend(e) if e.is_missing_credential())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
