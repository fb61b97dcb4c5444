//! Node construction through the builder, and store hooks.

use std::sync::{Arc, Mutex};

use datanode::{Kind, Node, Value, node::NodeError};

type StoreLog = Arc<Mutex<Vec<(String, Option<Value>, Value)>>>;

fn recording_builder() -> (datanode::NodeBuilder, StoreLog) {
    let log: StoreLog = Arc::default();
    let sink = Arc::clone(&log);
    let builder = Node::builder().on_store(
        move |key: &str, previous: Option<&Value>, value: &Value| {
            sink.lock()
                .unwrap()
                .push((key.to_string(), previous.cloned(), value.clone()));
        },
    );
    (builder, log)
}

#[test]
fn test_build_installs_guards() {
    let node = Node::builder()
        .protect("server.port", Kind::Int, 8080, false)
        .protect("server.name", Kind::Text, None::<String>, true)
        .build()
        .unwrap();

    assert_eq!(node.get_as::<i64>("server.port").unwrap(), Some(8080));
    assert_eq!(node.get("server.name").unwrap(), Some(&Value::Null));
    assert!(node.identify("server", Kind::Node));
}

#[test]
fn test_build_rejects_mismatched_initial_value() {
    let err = Node::builder()
        .protect("port", Kind::Int, "eighty", false)
        .build()
        .unwrap_err();

    assert!(err.is_type_error());
    assert!(matches!(
        err,
        NodeError::TypeMismatch { ref expected, .. } if expected.contains("int")
    ));
}

#[test]
fn test_build_rejects_null_for_strict_guard() {
    let err = Node::builder()
        .protect("name", Kind::Text, Value::Null, false)
        .build()
        .unwrap_err();
    assert!(err.is_type_error());
}

#[test]
fn test_build_rejects_guard_below_leaf_guard() {
    let err = Node::builder()
        .protect("limit", Kind::Int, 1, false)
        .protect("limit.max", Kind::Int, 2, false)
        .build()
        .unwrap_err();

    assert!(matches!(err, NodeError::ProtectionRefused { .. }));
    assert_eq!(err.path(), Some("limit.max"));
}

#[test]
fn test_build_rejects_malformed_guard_path() {
    let err = Node::builder()
        .protect("a..b", Kind::Int, 1, false)
        .build()
        .unwrap_err();
    assert!(err.is_path_error());
}

#[test]
fn test_repeated_guard_keeps_first_declaration() {
    let node = Node::builder()
        .protect("ratio", Kind::Int, 1, false)
        .protect("ratio", Kind::Number, 2, true)
        .build()
        .unwrap();

    assert_eq!(node.get("ratio").unwrap(), Some(&Value::Int(2)));
    match node.lookup("ratio").unwrap() {
        Some(Value::Slot(slot)) => {
            assert_eq!(slot.kind(), Kind::Int);
            assert!(!slot.is_nullable());
        }
        other => panic!("expected slot, got {other:?}"),
    }

    let err = Node::builder()
        .protect("ratio", Kind::Int, 1, false)
        .protect("ratio", Kind::Any, "two", false)
        .build()
        .unwrap_err();
    assert!(matches!(err, NodeError::ProtectionRefused { .. }));
}

#[test]
fn test_hook_not_fired_during_build() {
    let (builder, log) = recording_builder();
    let _node = builder.protect("count", Kind::Int, 1, false).build().unwrap();

    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_hook_fires_once_per_store() {
    let (builder, log) = recording_builder();
    let mut node = builder.protect("count", Kind::Int, 1, false).build().unwrap();

    assert!(node.put("count", 2).unwrap());
    assert!(node.put("label", "first").unwrap());
    assert!(node.put("label", "second").unwrap());

    let log = log.lock().unwrap();
    assert_eq!(
        *log,
        vec![
            ("count".to_string(), Some(Value::Int(1)), Value::Int(2)),
            ("label".to_string(), None, Value::from("first")),
            (
                "label".to_string(),
                Some(Value::from("first")),
                Value::from("second")
            ),
        ]
    );
}

#[test]
fn test_hook_not_fired_for_refused_write() {
    let (builder, log) = recording_builder();
    let mut node = builder.protect("count", Kind::Int, 1, false).build().unwrap();

    assert!(!node.put("count", "many").unwrap());
    assert!(node.put(".bad", 1).is_err());

    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_hook_sees_only_own_keys() {
    let (builder, log) = recording_builder();
    let mut node = builder.build().unwrap();

    assert!(node.put("a.b.c", 1).unwrap());
    assert!(node.put("a.b.d", 2).unwrap());

    // Only the intermediate node created directly under the root is reported
    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    let (key, previous, value) = &log[0];
    assert_eq!(key, "a");
    assert!(previous.is_none());
    assert!(value.as_node().is_some());
}

#[test]
fn test_clear_does_not_fire_hook() {
    let (builder, log) = recording_builder();
    let mut node = builder.build().unwrap();
    node.put("x", 1).unwrap();
    log.lock().unwrap().clear();

    node.clear();
    assert!(log.lock().unwrap().is_empty());
}
