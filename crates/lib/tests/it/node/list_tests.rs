//! List splice helpers.

use datanode::{Kind, Node, Value};

#[test]
fn test_add_to_existing_list() {
    let mut node = Node::new();
    node.put("tags", vec!["a"]).unwrap();

    assert!(node.add_to_list("tags", false, ["b", "c"]).unwrap());
    assert_eq!(
        node.get("tags").unwrap(),
        Some(&Value::from(vec!["a", "b", "c"]))
    );
}

#[test]
fn test_add_to_absent_list() {
    let mut node = Node::new();

    assert!(!node.add_to_list("tags", false, ["a"]).unwrap());
    assert!(!node.has("tags").unwrap());

    assert!(node.add_to_list("nested.tags", true, ["a"]).unwrap());
    assert_eq!(
        node.get("nested.tags").unwrap(),
        Some(&Value::from(vec!["a"]))
    );
}

#[test]
fn test_null_counts_as_absent() {
    let mut node = Node::new();
    node.put("tags", Value::Null).unwrap();

    assert!(!node.add_to_list("tags", false, [1]).unwrap());
    assert!(node.add_to_list("tags", true, [1]).unwrap());
    assert_eq!(node.get("tags").unwrap(), Some(&Value::from(vec![1])));
}

#[test]
fn test_non_list_value_is_refused() {
    let mut node = Node::new();
    node.put("tags", "not a list").unwrap();

    assert!(!node.add_to_list("tags", true, ["a"]).unwrap());
    assert!(!node.remove_from_list("tags", true, ["a"]).unwrap());
    assert_eq!(node.get_as::<&str>("tags").unwrap(), Some("not a list"));
}

#[test]
fn test_remove_from_list() {
    let mut node = Node::new();
    node.put("numbers", vec![1, 2, 3, 2, 1]).unwrap();

    assert!(node.remove_from_list("numbers", false, [2, 5]).unwrap());
    assert_eq!(
        node.get("numbers").unwrap(),
        Some(&Value::from(vec![1, 3, 1]))
    );
}

#[test]
fn test_remove_nan_from_list() {
    let mut node = Node::new();
    node.put("floats", vec![f64::NAN, 1.0]).unwrap();

    assert!(node.remove_from_list("floats", false, [f64::NAN]).unwrap());
    assert_eq!(node.get("floats").unwrap(), Some(&Value::from(vec![1.0])));
}

#[test]
fn test_remove_from_absent_list_creates_empty() {
    let mut node = Node::new();

    assert!(node.remove_from_list("numbers", true, [1]).unwrap());
    assert_eq!(
        node.get("numbers").unwrap(),
        Some(&Value::List(Vec::new()))
    );
}

#[test]
fn test_list_write_back_goes_through_guard() {
    let mut node = Node::builder()
        .protect("tags", Kind::List, Vec::<Value>::new(), false)
        .build()
        .unwrap();

    assert!(node.add_to_list("tags", false, ["a"]).unwrap());
    assert_eq!(node.get("tags").unwrap(), Some(&Value::from(vec!["a"])));
    assert!(matches!(node.lookup("tags").unwrap(), Some(Value::Slot(_))));
}

#[test]
fn test_add_rejects_non_serializable_elements() {
    let mut node = Node::new();
    node.put("items", Vec::<Value>::new()).unwrap();

    let err = node
        .add_to_list("items", false, [Value::opaque(std::sync::Mutex::new(0))])
        .unwrap_err();
    assert!(err.is_serialization_error());
    assert_eq!(node.get("items").unwrap(), Some(&Value::List(Vec::new())));
}
