//! Hierarchical data nodes addressed by dotted paths.
//!
//! A [`Node`] maps local keys to [`Value`]s. Values are leaves (null, bool,
//! numbers, text), lists, child nodes, or guarded [`Slot`]s wrapping any of
//! these. Paths such as `user.profile.name` descend through child nodes.
//!
//! # Usage
//!
//! ```
//! use datanode::{Kind, Node, Value};
//!
//! let mut node = Node::new();
//! node.put("user.name", "Ana")?;
//! node.put("user.age", 30)?;
//!
//! assert_eq!(node.get_as::<&str>("user.name")?, Some("Ana"));
//! assert!(node.has("user.age")?);
//!
//! // Writing a nested path creates the intermediate nodes
//! assert!(node.get("user")?.is_some_and(|user| user.as_node().is_some()));
//!
//! // Guarded paths refuse values of the wrong kind
//! let mut guarded = Node::builder().protect("port", Kind::Int, 8080, false).build()?;
//! assert!(!guarded.put("port", "eighty")?);
//! assert_eq!(guarded.get("port")?, Some(&Value::Int(8080)));
//! # Ok::<(), datanode::node::NodeError>(())
//! ```
//!
//! # Concurrency
//!
//! Nodes provide no internal locking. Every operation runs to completion on
//! the calling thread; callers sharing a node across threads must serialize
//! mutation themselves.

use std::{collections::HashMap, fmt, sync::Arc};

use serde::{Serialize, Serializer};
use tracing::{debug, trace};

// Submodules
pub mod builder;
pub mod errors;
pub mod normalize;
pub mod path;
pub mod simplify;
pub mod slot;
pub mod value;

pub use builder::NodeBuilder;
pub use errors::NodeError;
pub use normalize::{is_serializable, normalize};
pub use path::{Path, PathError};
pub use slot::{Kind, Slot};
pub use value::{Fragmented, Opaque, Value};

/// Observer notified after a node stores a value under one of its own keys.
///
/// Fires once per successful store performed directly by the node holding the
/// hook: terminal writes and the creation of intermediate nodes. `previous` is
/// the value the key held before (the slot's former value for guarded keys).
pub trait StoreHook: Send + Sync {
    fn on_store(&self, key: &str, previous: Option<&Value>, value: &Value);
}

impl<F> StoreHook for F
where
    F: Fn(&str, Option<&Value>, &Value) + Send + Sync,
{
    fn on_store(&self, key: &str, previous: Option<&Value>, value: &Value) {
        self(key, previous, value)
    }
}

/// A mutable tree vertex mapping local keys to values.
///
/// Cloning a node copies every entry. The clone shares no mutable state with
/// the source; a store hook, if any, is shared.
#[derive(Clone, Default)]
pub struct Node {
    children: HashMap<String, Value>,
    hook: Option<Arc<dyn StoreHook>>,
}

impl Node {
    /// Creates an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts declaring a node with guarded paths.
    pub fn builder() -> NodeBuilder {
        NodeBuilder::default()
    }

    /// Builds a node from an import-time map.
    ///
    /// Keys are treated as paths, so `"a.b"` creates a child node `a`.
    pub fn from_map(map: HashMap<String, Value>) -> Result<Self, NodeError> {
        let mut node = Node::new();
        for (path, value) in map {
            node.put(&path, value)?;
        }
        Ok(node)
    }

    /// Builds a node from a JSON object.
    pub fn from_json_value(json: serde_json::Value) -> Result<Self, NodeError> {
        match Value::from(json) {
            Value::Map(map) => Self::from_map(map),
            other => Err(NodeError::TypeMismatch {
                expected: "map".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }

    /// Converts the simplified tree into a JSON value.
    pub fn to_json_value(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Number of local entries.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if `key` is a local entry. Does not descend.
    pub fn contains_key(&self, key: &str) -> bool {
        self.children.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// Iterates over local entries as stored, slots included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.children.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Gets the value at `path`, looking through guarded slots.
    ///
    /// Returns `Ok(None)` when the path does not resolve, either because a key
    /// is missing or because a segment names something other than a node. A
    /// key holding null yields `Some(&Value::Null)`.
    pub fn get(&self, path: &str) -> Result<Option<&Value>, NodeError> {
        let path = Path::parse(path)?;
        Ok(self.resolve(&path).map(Value::unslotted))
    }

    /// Gets the value at `path` converted to `T`.
    ///
    /// Returns `Ok(None)` when the path does not resolve or the value has
    /// another type.
    pub fn get_as<'a, T>(&'a self, path: &str) -> Result<Option<T>, NodeError>
    where
        T: TryFrom<&'a Value>,
    {
        Ok(self.get(path)?.and_then(|value| T::try_from(value).ok()))
    }

    /// Returns `true` if `path` resolves. A guarded slot holding null counts
    /// as present.
    pub fn has(&self, path: &str) -> Result<bool, NodeError> {
        let path = Path::parse(path)?;
        Ok(self.resolve(&path).is_some())
    }

    /// Returns `true` if the local entry `key` holds an instance of `kind`.
    ///
    /// `key` is not treated as a path.
    pub fn identify(&self, key: &str, kind: Kind) -> bool {
        self.children
            .get(key)
            .is_some_and(|value| kind.admits(value.unslotted()))
    }

    /// Gets the raw value at `path`, returning slots themselves.
    pub fn lookup(&self, path: &str) -> Result<Option<&Value>, NodeError> {
        let path = Path::parse(path)?;
        Ok(self.resolve(&path))
    }

    /// Walks the parents of `path` and returns the raw terminal entry.
    fn resolve(&self, path: &Path<'_>) -> Option<&Value> {
        let mut current = self;
        for segment in path.parents() {
            match current.children.get(*segment).map(Value::unslotted) {
                Some(Value::Node(child)) => current = child,
                _ => return None,
            }
        }
        current.children.get(path.key())
    }

    /// Stores `value` at `path`, creating intermediate nodes as needed.
    ///
    /// Returns `Ok(false)` without touching the tree when a guarded slot on
    /// the way refuses the write: either the terminal slot refuses the value,
    /// or a slot standing where an intermediate node must be created refuses
    /// a node.
    ///
    /// # Errors
    /// - [`NodeError::Path`] if the path is empty or has an empty segment
    /// - [`NodeError::NotSerializable`] if the value, or anything inside it,
    ///   cannot be stored
    /// - [`NodeError::TypeMismatch`] if the value is, or contains, a slot
    ///   holding a value its own guard refuses
    pub fn put(&mut self, path: &str, value: impl Into<Value>) -> Result<bool, NodeError> {
        let path = Path::parse(path)?;
        let value = match value.into() {
            Value::Fragment(fragment) => fragment.defragment(),
            other => other,
        };

        if !is_serializable(&value) {
            return Err(NodeError::NotSerializable {
                type_name: value.unslotted().type_name().to_string(),
            });
        }

        if let Some(Value::Slot(slot)) = self.resolve(&path)
            && !slot.offer(value.unslotted())
        {
            debug!(path = %path, kind = %slot.kind(), "Guarded slot refused value");
            return Ok(false);
        }

        if !self.can_descend(&path) {
            debug!(path = %path, "Guarded slot refused intermediate node");
            return Ok(false);
        }

        let value = normalize(value)?;

        let mut current = self;
        for segment in path.parents() {
            current = match current.child_mut(segment) {
                Some(child) => child,
                None => return Ok(false),
            };
        }

        Ok(current.store(path.key(), value))
    }

    /// Checks, without mutating, that every intermediate node `path` needs
    /// can be created.
    fn can_descend(&self, path: &Path<'_>) -> bool {
        let mut current = self;
        for segment in path.parents() {
            let Some(value) = current.children.get(*segment) else {
                return true;
            };
            match (value, value.unslotted()) {
                (_, Value::Node(child)) => current = child,
                // Everything below a freshly created node is fresh too
                (Value::Slot(slot), _) => return slot.offer(&Value::Node(Node::new())),
                _ => return true,
            }
        }
        true
    }

    /// Returns the child node under `key`, replacing whatever non-node value
    /// stands there with a fresh node.
    fn child_mut(&mut self, key: &str) -> Option<&mut Node> {
        let exists = matches!(
            self.children.get(key).map(Value::unslotted),
            Some(Value::Node(_))
        );

        if !exists {
            trace!(key, "Creating intermediate node");
            if !self.store(key, Value::Node(Node::new())) {
                return None;
            }
        }

        match self.children.get_mut(key).map(Value::unslotted_mut) {
            Some(Value::Node(child)) => Some(child),
            _ => None,
        }
    }

    /// Stores an already normalized value under a local key.
    fn store(&mut self, key: &str, value: Value) -> bool {
        let previous = if let Some(Value::Slot(slot)) = self.children.get_mut(key) {
            let value = value.into_unslotted();
            if !slot.offer(&value) {
                return false;
            }
            Some(slot.set(value))
        } else {
            self.children.insert(key.to_string(), value)
        };

        if let Some(hook) = &self.hook
            && let Some(current) = self.children.get(key)
        {
            hook.on_store(key, previous.as_ref(), current.unslotted());
        }

        true
    }

    /// Appends `values` to the list at `path`.
    ///
    /// When nothing (or null) is stored at `path`, a new list is started if
    /// `create_if_absent` is set. Returns `Ok(false)` if the path holds a
    /// non-list value, or if the write back is refused by a guard.
    pub fn add_to_list<I>(
        &mut self,
        path: &str,
        create_if_absent: bool,
        values: I,
    ) -> Result<bool, NodeError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let Some(mut list) = self.list_at(path, create_if_absent)? else {
            return Ok(false);
        };
        list.extend(values.into_iter().map(Into::into));
        self.put(path, list)
    }

    /// Removes every element equal to one of `values` from the list at `path`.
    ///
    /// Absence is handled as in [`add_to_list`](Self::add_to_list).
    pub fn remove_from_list<I>(
        &mut self,
        path: &str,
        create_if_absent: bool,
        values: I,
    ) -> Result<bool, NodeError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let Some(mut list) = self.list_at(path, create_if_absent)? else {
            return Ok(false);
        };
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        list.retain(|item| !values.contains(item));
        self.put(path, list)
    }

    /// Copy of the list at `path`, a new list if allowed, or `None`.
    fn list_at(
        &self,
        path: &str,
        create_if_absent: bool,
    ) -> Result<Option<Vec<Value>>, NodeError> {
        Ok(match self.get(path)? {
            Some(Value::List(items)) => Some(items.clone()),
            None | Some(Value::Null) if create_if_absent => Some(Vec::new()),
            _ => None,
        })
    }

    /// Puts every local entry of `donor` into this node.
    ///
    /// Best effort: entries refused by a guard are skipped and logged.
    pub fn consume(&mut self, donor: Node) {
        for (key, value) in donor.children {
            match self.put(&key, value) {
                Ok(true) => {}
                Ok(false) => debug!(key = %key, "Skipped entry refused by guard"),
                Err(err) => debug!(key = %key, error = %err, "Skipped entry"),
            }
        }
    }

    /// Blanks every local entry, returning the keys that were cleared with
    /// the value each held.
    ///
    /// Keys stay present with a null value. Slots that are not nullable keep
    /// their value and are left out of the result.
    pub fn clear(&mut self) -> HashMap<String, Value> {
        let mut cleared = HashMap::new();

        for (key, value) in self.children.iter_mut() {
            let previous = match value {
                Value::Slot(slot) => {
                    if !slot.offer(&Value::Null) {
                        debug!(key = %key, kind = %slot.kind(), "Left non-nullable slot untouched");
                        continue;
                    }
                    slot.set(Value::Null)
                }
                other => std::mem::replace(other, Value::Null),
            };
            cleared.insert(key.clone(), previous);
        }

        cleared
    }

    /// Reduces the tree to plain maps, lists and leaves.
    pub fn simplify(&self) -> HashMap<String, Value> {
        self.children
            .iter()
            .map(|(key, value)| (key.clone(), simplify::simplify(value)))
            .collect()
    }

    /// Returns this node without its store hook.
    pub(crate) fn detached(self) -> Self {
        Self {
            children: self.children,
            hook: None,
        }
    }

    pub(crate) fn set_hook(&mut self, hook: Option<Arc<dyn StoreHook>>) {
        self.hook = hook;
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.children == other.children
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("children", &self.children)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Serializes the simplified form of the tree as a map.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.children)
    }
}
