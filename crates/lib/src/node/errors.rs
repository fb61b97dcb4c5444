//! Error types for node operations.
//!
//! A refused guarded write is not an error: `put` reports it with `Ok(false)`.
//! The variants below cover malformed input, values that cannot enter the
//! tree, and guard declarations that cannot be installed.

use thiserror::Error;

use super::path::PathError;

/// Structured error types for node operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NodeError {
    /// The path is empty or contains an empty segment
    #[error(transparent)]
    Path(#[from] PathError),

    /// A value offered to `put` fails the serializability check
    #[error("{type_name} is not apt for serialization")]
    NotSerializable { type_name: String },

    /// A non-serializable element was found while normalizing a value
    #[error("Normalization failed: {type_name} is not a serializable type")]
    NormalizationFailed { type_name: String },

    /// A value does not have the type a conversion or guard requires
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A guard could not be installed because an enclosing guard refused it
    #[error("Guard at '{path}' was refused by an enclosing guard")]
    ProtectionRefused { path: String },
}

impl NodeError {
    /// Check if this error reports a malformed path
    pub fn is_path_error(&self) -> bool {
        matches!(self, NodeError::Path(_))
    }

    /// Check if this error reports a value that cannot be stored
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            NodeError::NotSerializable { .. } | NodeError::NormalizationFailed { .. }
        )
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, NodeError::TypeMismatch { .. })
    }

    /// Get the path if this is a path-related error
    pub fn path(&self) -> Option<&str> {
        match self {
            NodeError::Path(PathError::EmptySegment { path, .. })
            | NodeError::ProtectionRefused { path } => Some(path),
            _ => None,
        }
    }
}

impl From<NodeError> for crate::Error {
    fn from(err: NodeError) -> Self {
        crate::Error::Node(err)
    }
}
