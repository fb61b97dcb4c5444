//! Reduction of a tree to plain data.
//!
//! The simplified form contains only null, primitives, strings, lists and
//! maps: nodes become [`Value::Map`] and slots are replaced by their value.
//! This is the form external serializers consume.

use super::Value;

/// Returns the plain form of `value`.
pub fn simplify(value: &Value) -> Value {
    match value {
        Value::List(items) => Value::List(items.iter().map(simplify).collect()),
        Value::Node(node) => Value::Map(node.simplify()),
        Value::Slot(slot) => simplify(slot.value()),
        Value::Map(map) => Value::Map(
            map.iter()
                .map(|(key, item)| (key.clone(), simplify(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Returns `true` if `value` contains no node or slot at any depth.
pub fn is_plain(value: &Value) -> bool {
    match value {
        Value::Node(_) | Value::Slot(_) | Value::Fragment(_) | Value::Opaque(_) => false,
        Value::List(items) => items.iter().all(is_plain),
        Value::Map(map) => map.values().all(is_plain),
        _ => true,
    }
}
