//! Path parsing for hierarchical node access.
//!
//! A path is a string split on `.`: every segment but the last names a child
//! node to descend into, and the last segment names the key inside the node
//! that was reached.
//!
//! Paths are validated strictly. An empty path, or a path with an empty
//! segment (leading, trailing or doubled dot), is malformed and is rejected
//! before any node is read or written.
//!
//! # Usage
//!
//! ```rust
//! use datanode::node::Path;
//!
//! let path = Path::parse("user.profile.name")?;
//! assert_eq!(path.parents(), &["user", "profile"]);
//! assert_eq!(path.key(), "name");
//!
//! assert!(Path::parse("user..name").is_err());
//! # Ok::<(), datanode::node::PathError>(())
//! ```

use std::fmt;

use thiserror::Error;

use crate::constants::PATH_SEPARATOR;

/// Error type for malformed paths.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path has no segments at all.
    #[error("Malformed path: empty path")]
    Empty,

    /// One of the segments is empty.
    #[error("Malformed path '{path}': empty segment at position {position}")]
    EmptySegment { path: String, position: usize },
}

/// A validated, borrowed path.
///
/// The segments borrow from the input string, so parsing does not allocate
/// beyond the segment list itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<'a> {
    raw: &'a str,
    parents: Vec<&'a str>,
    key: &'a str,
}

impl<'a> Path<'a> {
    /// Parses and validates a dotted path.
    ///
    /// # Errors
    /// Returns [`PathError::Empty`] for `""` and [`PathError::EmptySegment`]
    /// for paths such as `".a"`, `"a."` or `"a..b"`.
    pub fn parse(raw: &'a str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        let mut parents: Vec<&'a str> = raw.split(PATH_SEPARATOR).collect();
        if let Some(position) = parents.iter().position(|segment| segment.is_empty()) {
            return Err(PathError::EmptySegment {
                path: raw.to_string(),
                position,
            });
        }

        let key = parents.pop().ok_or(PathError::Empty)?;
        Ok(Self { raw, parents, key })
    }

    /// Returns the path as it was given.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Segments naming the nodes to descend through, outermost first.
    pub fn parents(&self) -> &[&'a str] {
        &self.parents
    }

    /// The terminal key, looked up in the node the parents lead to.
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Returns `true` if the path descends into at least one child node.
    pub fn is_nested(&self) -> bool {
        !self.parents.is_empty()
    }

    /// Iterates over every segment, terminal key included.
    pub fn segments(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.parents.iter().copied().chain(std::iter::once(self.key))
    }

    /// Number of segments, terminal key included.
    pub fn depth(&self) -> usize {
        self.parents.len() + 1
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}
