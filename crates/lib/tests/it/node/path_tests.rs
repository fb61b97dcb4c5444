//! Path resolution, auto-vivification and malformed paths.

use datanode::{Kind, Node, Value, node::NodeError};

use crate::helpers::*;

// ===== READ / WRITE =====

#[test]
fn test_put_then_get_nested() {
    let mut node = Node::new();

    assert!(node.put("node1.value", "First value").unwrap());
    assert!(node.put("node1.node2.value", "Second value").unwrap());

    assert_paths(
        &node,
        &[
            ("node1.value", Value::from("First value")),
            ("node1.node2.value", Value::from("Second value")),
        ],
    );
}

#[test]
fn test_profile_example() {
    let node = setup_profile_node();

    assert_eq!(node.get_as::<&str>("user.name").unwrap(), Some("Ana"));
    assert_eq!(node.get_as::<i64>("user.age").unwrap(), Some(30));
    assert!(node.has("user.age").unwrap());
    assert!(!node.has("user.email").unwrap());
}

#[test]
fn test_auto_vivification_creates_intermediate_nodes() {
    let mut node = Node::new();
    assert!(node.put("a.b.c", 1).unwrap());

    let a = node.get_as::<&Node>("a").unwrap().expect("a should be a node");
    assert_eq!(a.len(), 1);
    let b = node.get_as::<&Node>("a.b").unwrap().expect("a.b should be a node");
    assert_eq!(b.len(), 1);
    assert_eq!(node.get("a.b.c").unwrap(), Some(&Value::Int(1)));
}

#[test]
fn test_put_through_leaf_replaces_it_with_node() {
    let mut node = Node::new();
    node.put("a", "leaf").unwrap();

    assert!(node.put("a.b", 2).unwrap());
    assert!(node.identify("a", Kind::Node));
    assert_eq!(node.get("a.b").unwrap(), Some(&Value::Int(2)));
}

#[test]
fn test_get_through_non_node_is_absent() {
    let mut node = Node::new();
    node.put("a", 5).unwrap();

    assert_eq!(node.get("a.b").unwrap(), None);
    assert!(!node.has("a.b").unwrap());
    assert_eq!(node.get("missing.deeper").unwrap(), None);
}

#[test]
fn test_null_is_present_but_distinct_from_absent() {
    let mut node = Node::new();
    node.put("nothing", Value::Null).unwrap();

    assert!(node.has("nothing").unwrap());
    assert_eq!(node.get("nothing").unwrap(), Some(&Value::Null));
    assert_eq!(node.get("other").unwrap(), None);
}

#[test]
fn test_overwrite_replaces_value() {
    let mut node = Node::new();
    node.put("key", "original").unwrap();
    node.put("key", "modified").unwrap();

    assert_eq!(node.get_as::<String>("key").unwrap(), Some("modified".to_string()));
    assert_eq!(node.len(), 1);
}

#[test]
fn test_get_as_type_mismatch_is_none() {
    let node = setup_profile_node();

    assert_eq!(node.get_as::<i64>("user.name").unwrap(), None);
    assert_eq!(node.get_as::<bool>("user.age").unwrap(), None);
    assert_eq!(node.get_as::<f64>("user.age").unwrap(), Some(30.0));
    assert_eq!(
        node.get_as::<&[Value]>("user.tags").unwrap(),
        Some(&[Value::from("admin"), Value::from("ops")][..])
    );
}

#[test]
fn test_identify_is_local_only() {
    let node = setup_profile_node();

    assert!(node.identify("user", Kind::Node));
    assert!(!node.identify("user", Kind::Text));
    assert!(!node.identify("user.name", Kind::Text));
    assert!(!node.identify("missing", Kind::Any));
}

// ===== MALFORMED PATHS =====

#[test]
fn test_malformed_paths_rejected_by_put() {
    let mut node = Node::new();

    for path in ["", ".value", "node.", "a..b", "."] {
        let err = node.put(path, Value::Null).unwrap_err();
        assert!(err.is_path_error(), "path {path:?} gave {err:?}");
    }

    // Rejected regardless of the value, even a non-serializable one
    let err = node.put(".x", Value::opaque(42u8)).unwrap_err();
    assert!(err.is_path_error());
    assert!(node.is_empty());
}

#[test]
fn test_malformed_paths_rejected_by_reads() {
    let node = setup_profile_node();

    for path in [".value", "node.", "user..name"] {
        assert!(matches!(node.get(path), Err(NodeError::Path(_))));
        assert!(matches!(node.has(path), Err(NodeError::Path(_))));
        assert!(matches!(node.lookup(path), Err(NodeError::Path(_))));
    }
}

#[test]
fn test_malformed_path_error_reports_path() {
    let mut node = Node::new();
    let err = node.put("a..b", 1).unwrap_err();

    assert_eq!(err.path(), Some("a..b"));
    assert!(err.to_string().contains("empty segment"));
}

// ===== RAW LOOKUP =====

#[test]
fn test_lookup_returns_slot_and_get_unwraps_it() {
    let node = setup_guarded_node();

    match node.lookup("protected-int").unwrap() {
        Some(Value::Slot(slot)) => {
            assert_eq!(slot.kind(), Kind::Int);
            assert!(!slot.is_nullable());
        }
        other => panic!("expected slot, got {other:?}"),
    }
    assert_eq!(node.get("protected-int").unwrap(), Some(&Value::Int(1)));
}

#[test]
fn test_get_descends_through_slot_holding_node() {
    let inner = Node::builder()
        .protect("port", Kind::Int, 80, false)
        .build()
        .unwrap();
    let node = Node::builder()
        .protect("server", Kind::Node, inner, false)
        .build()
        .unwrap();

    assert_eq!(node.get("server.port").unwrap(), Some(&Value::Int(80)));
    assert!(node.has("server.port").unwrap());
}
