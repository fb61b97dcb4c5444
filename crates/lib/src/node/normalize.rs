//! Serializability check and normalization of incoming values.
//!
//! Every value passes through [`normalize`] before it is committed to a node.
//! Ownership already guarantees the tree never aliases the caller's data; what
//! normalization adds is the conversion of input-only forms into stored ones
//! and a fail-fast re-check of list elements.

use super::{Node, Value, errors::NodeError};

/// Returns `true` if `value` may enter a node.
///
/// Null, primitives, strings and nodes are serializable. Lists, import-time
/// maps and slots are serializable when everything they contain is. Fragments
/// and opaque objects never are. Stops at the first violation.
pub fn is_serializable(value: &Value) -> bool {
    match value {
        Value::Null
        | Value::Bool(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::Text(_)
        | Value::Node(_) => true,
        Value::List(items) => items.iter().all(is_serializable),
        Value::Map(map) => map.values().all(is_serializable),
        Value::Slot(slot) => is_serializable(slot.value()),
        Value::Fragment(_) | Value::Opaque(_) => false,
    }
}

/// Converts a value into its stored form.
///
/// - lists are rebuilt element by element, each element re-checked
/// - import-time maps become fresh child nodes
/// - nodes are detached from any store hook
/// - slots keep their guard around a normalized inner value, which the guard
///   must still accept
///
/// # Errors
/// Returns [`NodeError::NormalizationFailed`] on the first element that is
/// not serializable, [`NodeError::TypeMismatch`] for a slot holding a value
/// its own guard refuses, and propagates path errors from map keys.
pub fn normalize(value: Value) -> Result<Value, NodeError> {
    match value {
        Value::List(items) => items
            .into_iter()
            .map(|item| {
                if !is_serializable(&item) {
                    return Err(NodeError::NormalizationFailed {
                        type_name: item.type_name().to_string(),
                    });
                }
                normalize(item)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        Value::Map(map) => Node::from_map(map).map(Value::Node),
        Value::Node(node) => Ok(Value::Node(node.detached())),
        Value::Slot(slot) => {
            let guard = slot.duplicate(Value::Null);
            let inner = normalize(slot.into_value())?;
            guard.check(&inner)?;
            Ok(Value::Slot(guard.duplicate(inner)))
        }
        Value::Fragment(_) | Value::Opaque(_) => Err(NodeError::NormalizationFailed {
            type_name: value.type_name().to_string(),
        }),
        leaf => Ok(leaf),
    }
}
