//! Value types for data nodes.
//!
//! [`Value`] is the closed set of things a [`Node`] deals in. Most variants can
//! be stored; three only ever appear on the way in:
//!
//! - [`Value::Map`] is an import-time map, turned into a fresh child node when
//!   stored.
//! - [`Value::Fragment`] is a composite domain object that collapses itself
//!   into a plain value before `put` does anything else.
//! - [`Value::Opaque`] is a foreign host object. It is never serializable and
//!   `put` rejects it.
//!
//! # Direct Comparisons
//!
//! ```
//! # use datanode::Value;
//! let text = Value::from("hello");
//! let number = Value::from(42);
//!
//! assert!(text == "hello");
//! assert!(number == 42);
//! assert!(!(text == 42));
//! ```

use std::{any::Any, collections::HashMap, fmt, sync::Arc};

use serde::{
    Serialize, Serializer,
    ser::Error as _,
};

use super::{Kind, Node, Slot, errors::NodeError};

/// A composite value that knows how to collapse itself into a plain form.
///
/// `put` calls [`defragment`](Fragmented::defragment) on a top-level
/// [`Value::Fragment`] before validating and storing the result. Fragments
/// nested inside lists or maps are not collapsed and are rejected.
pub trait Fragmented: fmt::Debug + Send + Sync {
    /// Returns the plain value to store in place of this object.
    fn defragment(&self) -> Value;
}

/// A foreign object carried through a [`Value`] without being serializable.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            inner: Arc::new(value),
        }
    }

    /// Rust type name of the wrapped object.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.type_name)
    }
}

/// Values that can be handed to and read from a [`Node`].
#[derive(Debug, Clone)]
pub enum Value {
    // Leaf values
    /// Null/empty value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text string value
    Text(String),

    // Branch values
    /// Ordered sequence of values
    List(Vec<Value>),
    /// Child node
    Node(Node),
    /// Guarded slot wrapping another value
    Slot(Slot),

    // Input-only values
    /// Import-time map, stored as a child node
    Map(HashMap<String, Value>),
    /// Composite object collapsed before storage
    Fragment(Arc<dyn Fragmented>),
    /// Foreign object, never serializable
    Opaque(Opaque),
}

impl Value {
    /// Wraps a [`Fragmented`] object.
    pub fn fragment(fragment: impl Fragmented + 'static) -> Self {
        Value::Fragment(Arc::new(fragment))
    }

    /// Wraps a foreign object.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(Opaque::new(value))
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is a leaf value
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Text(_)
        )
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Node(_) => "node",
            Value::Slot(_) => "slot",
            Value::Map(_) => "map",
            Value::Fragment(_) => "fragment",
            Value::Opaque(opaque) => opaque.type_name(),
        }
    }

    /// Most specific [`Kind`] this value is an instance of, looking through slots.
    pub fn kind(&self) -> Option<Kind> {
        match self.unslotted() {
            Value::Bool(_) => Some(Kind::Bool),
            Value::Int(_) => Some(Kind::Int),
            Value::Float(_) => Some(Kind::Float),
            Value::Text(_) => Some(Kind::Text),
            Value::List(_) => Some(Kind::List),
            Value::Node(_) | Value::Map(_) => Some(Kind::Node),
            _ => None,
        }
    }

    /// Returns the wrapped value of a slot, or `self` for every other variant.
    pub fn unslotted(&self) -> &Value {
        match self {
            Value::Slot(slot) => slot.value(),
            other => other,
        }
    }

    pub(crate) fn unslotted_mut(&mut self) -> &mut Value {
        match self {
            Value::Slot(slot) => slot.value_mut(),
            other => other,
        }
    }

    /// Owned counterpart of [`unslotted`](Self::unslotted).
    pub fn into_unslotted(self) -> Value {
        match self {
            Value::Slot(slot) => slot.into_value(),
            other => other,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float; integers are widened
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // Bitwise, so NaN equals itself and list removal can find it
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a == b,
            (Value::Slot(a), Value::Slot(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // Foreign objects compare by identity
            (Value::Fragment(a), Value::Fragment(b)) => Arc::ptr_eq(a, b),
            (Value::Opaque(a), Value::Opaque(b)) => Arc::ptr_eq(&a.inner, &b.inner),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Node(node) => write!(f, "{node}"),
            Value::Slot(slot) => write!(f, "{}", slot.value()),
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                write!(f, "}}")
            }
            Value::Fragment(fragment) => write!(f, "{fragment:?}"),
            Value::Opaque(opaque) => write!(f, "{opaque:?}"),
        }
    }
}

/// Serializes the simplified form: slots are transparent and nodes become maps.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
            Value::List(items) => serializer.collect_seq(items),
            Value::Node(node) => node.serialize(serializer),
            Value::Slot(slot) => slot.value().serialize(serializer),
            Value::Map(map) => serializer.collect_map(map),
            Value::Fragment(_) | Value::Opaque(_) => Err(S::Error::custom(format!(
                "{} is not apt for serialization",
                self.type_name()
            ))),
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        // Values past i64::MAX keep their magnitude as a float
        i64::try_from(value).map_or(Value::Float(value as f64), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::from(value as u64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Node> for Value {
    fn from(value: Node) -> Self {
        Value::Node(value)
    }
}

impl From<Slot> for Value {
    fn from(value: Slot) -> Self {
        Value::Slot(value)
    }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self {
        Value::Opaque(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<HashMap<String, V>> for Value {
    fn from(value: HashMap<String, V>) -> Self {
        Value::Map(value.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// JSON objects arrive as import-time maps.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

fn mismatch(expected: &str, value: &Value) -> NodeError {
    NodeError::TypeMismatch {
        expected: expected.to_string(),
        actual: value.type_name().to_string(),
    }
}

// TryFrom implementations used by `Node::get_as`
impl TryFrom<&Value> for String {
    type Error = NodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| mismatch("text", value))
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = NodeError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_text().ok_or_else(|| mismatch("text", value))
    }
}

impl TryFrom<&Value> for i64 {
    type Error = NodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_int().ok_or_else(|| mismatch("int", value))
    }
}

impl TryFrom<&Value> for f64 {
    type Error = NodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_float().ok_or_else(|| mismatch("number", value))
    }
}

impl TryFrom<&Value> for bool {
    type Error = NodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_bool().ok_or_else(|| mismatch("bool", value))
    }
}

impl<'a> TryFrom<&'a Value> for &'a Node {
    type Error = NodeError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_node().ok_or_else(|| mismatch("node", value))
    }
}

impl<'a> TryFrom<&'a Value> for &'a [Value] {
    type Error = NodeError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_list().ok_or_else(|| mismatch("list", value))
    }
}

// PartialEq implementations for comparing Value with primitives
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        self.as_int() == Some(i64::from(*other))
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Float(n) if n.to_bits() == other.to_bits())
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}
