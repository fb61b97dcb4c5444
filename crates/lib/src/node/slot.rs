//! Guarded slots.
//!
//! A [`Slot`] wraps a stored value and pins the type it may hold and whether it
//! may be null. The guard is fixed for the slot's lifetime; only the wrapped
//! value changes. Slots are installed through [`NodeBuilder::protect`].
//!
//! [`NodeBuilder::protect`]: super::NodeBuilder::protect

use std::fmt;

use super::{errors::NodeError, value::Value};

/// Type tag checked by guarded slots and [`Node::identify`](super::Node::identify).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Any non-null value
    Any,
    /// Boolean
    Bool,
    /// Integer
    Int,
    /// Floating point number
    Float,
    /// Integer or floating point number
    Number,
    /// Text string
    Text,
    /// List of values
    List,
    /// Child node, or a map that becomes one when stored
    Node,
}

impl Kind {
    /// Returns `true` if `value` is an instance of this kind.
    ///
    /// `Null` is never an instance of any kind; nullability is decided by the
    /// slot, not the kind.
    pub fn admits(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => false,
            (Kind::Any, _) => true,
            (Kind::Bool, Value::Bool(_))
            | (Kind::Int, Value::Int(_))
            | (Kind::Float, Value::Float(_))
            | (Kind::Number, Value::Int(_) | Value::Float(_))
            | (Kind::Text, Value::Text(_))
            | (Kind::List, Value::List(_))
            | (Kind::Node, Value::Node(_) | Value::Map(_)) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Any => "any",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Number => "number",
            Kind::Text => "text",
            Kind::List => "list",
            Kind::Node => "node",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value carrying a required kind and a nullability flag.
///
/// Invariant: the wrapped value is `Null` only if the slot is nullable, and
/// otherwise an instance of the slot's kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    kind: Kind,
    nullable: bool,
    value: Box<Value>,
}

impl Slot {
    /// Creates a slot holding `value`.
    ///
    /// A slot is never nested: when `value` is itself a slot, its current
    /// value is taken.
    ///
    /// # Errors
    /// Returns [`NodeError::TypeMismatch`] if the slot would refuse `value`.
    pub fn new(kind: Kind, nullable: bool, value: impl Into<Value>) -> Result<Self, NodeError> {
        let value = value.into().into_unslotted();
        let slot = Self {
            kind,
            nullable,
            value: Box::new(Value::Null),
        };
        slot.check(&value)?;
        Ok(slot.duplicate(value))
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The currently wrapped value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        *self.value
    }

    /// Returns `true` if the slot would accept `candidate`. Does not mutate.
    pub fn offer(&self, candidate: &Value) -> bool {
        match candidate {
            Value::Null => self.nullable,
            other => self.kind.admits(other),
        }
    }

    /// Like [`offer`](Self::offer), but reports a refusal as an error.
    pub(crate) fn check(&self, candidate: &Value) -> Result<(), NodeError> {
        if self.offer(candidate) {
            return Ok(());
        }
        let nullability = if self.nullable { "nullable" } else { "non-null" };
        Err(NodeError::TypeMismatch {
            expected: format!("{nullability} {}", self.kind),
            actual: candidate.type_name().to_string(),
        })
    }

    /// Creates a slot with the same guard holding `value`.
    ///
    /// The new value is not checked; callers pass values the original slot
    /// already accepted in another form.
    pub(crate) fn duplicate(&self, value: Value) -> Slot {
        Slot {
            kind: self.kind,
            nullable: self.nullable,
            value: Box::new(value),
        }
    }

    /// Replaces the wrapped value, returning the previous one.
    ///
    /// Callers must have checked [`offer`](Self::offer) first.
    pub(crate) fn set(&mut self, value: Value) -> Value {
        std::mem::replace(&mut *self.value, value)
    }

    pub(crate) fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }
}
