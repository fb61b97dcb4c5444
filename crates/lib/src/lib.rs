//!
//! Datanode: a mutable tree of values addressed by dotted paths.
//! This library provides an in-memory model for structured configuration or document data.
//!
//! ## Core Concepts
//!
//! * **Nodes (`node::Node`)**: Mappings from local keys to values. Writing a nested path creates the intermediate nodes it needs.
//! * **Values (`node::Value`)**: A closed set of leaves, lists, child nodes and guarded slots, plus input-only forms (maps, fragments, opaque objects).
//! * **Guarded slots (`node::Slot`)**: Values pinned to a type and nullability, declared through `node::NodeBuilder`. A write a guard refuses returns `false` and changes nothing.
//! * **Normalization (`node::normalize`)**: Every value entering a node is validated and converted to its stored form.
//! * **Simplification (`node::simplify`)**: Reduces a tree to plain maps, lists and leaves for external serializers.

pub mod constants;
pub mod node;

/// Re-export the core types for easier access.
pub use node::{Kind, Node, NodeBuilder, Slot, Value};

/// Result type used throughout the datanode library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the datanode library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured node errors from the node module
    #[error(transparent)]
    Node(node::NodeError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Node(_) => "node",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error reports a malformed path.
    pub fn is_path_error(&self) -> bool {
        match self {
            Error::Node(node_err) => node_err.is_path_error(),
            _ => false,
        }
    }

    /// Check if this error reports a value that cannot be serialized.
    pub fn is_serialization_error(&self) -> bool {
        match self {
            Error::Node(node_err) => node_err.is_serialization_error(),
            Error::Serialize(_) => true,
        }
    }
}
