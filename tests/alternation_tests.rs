// this_file: tests/alternation_tests.rs

use std::any::Any;
use trickle_json::{array, boolean, either, element, int32, string};

#[test]
fn test_mixed_type_array_via_as_any() {
    let item = either(string().as_any(), int32().as_any());
    let reader = array(item);

    let values = reader.read(br#"["foo", 123, "bar"]"#).unwrap();
    assert_eq!(values.len(), 3);
    assert_eq!(
        values[0].downcast_ref::<String>().map(String::as_str),
        Some("foo")
    );
    assert_eq!(values[1].downcast_ref::<i32>(), Some(&123));
    assert_eq!(
        values[2].downcast_ref::<String>().map(String::as_str),
        Some("bar")
    );
}

#[derive(Debug, Clone, PartialEq)]
enum Scalar {
    Text(String),
    Count(i32),
    Flag(bool),
}

#[test]
fn test_mixed_type_array_via_enum_mapping() {
    // Mapping each branch into a purpose-built enum is the tidier shape.
    let item = string()
        .map(Scalar::Text)
        .or(int32().map(Scalar::Count))
        .or(boolean().map(Scalar::Flag));
    let reader = array(item);

    assert_eq!(
        reader.read(br#"["foo", 123, true]"#).unwrap(),
        vec![
            Scalar::Text("foo".to_owned()),
            Scalar::Count(123),
            Scalar::Flag(true),
        ]
    );
}

#[test]
fn test_alternation_rolls_back_composite_values() {
    // The first branch consumes object tokens before failing; the second
    // must still see the whole object.
    let first = trickle_json::object(
        (trickle_json::property("missing", int32()),),
        |n| n,
    );
    let second = trickle_json::object(
        (trickle_json::property("present", int32()),),
        |n| n,
    );
    let reader = either(first, second);
    assert_eq!(reader.read(br#"{"present": 8}"#).unwrap(), 8);
}

#[test]
fn test_alternation_against_element_capture() {
    // A typed branch with a DOM fallback.
    let reader = either(
        int32().map(serde_json::Value::from),
        element(),
    );
    assert_eq!(reader.read(b"7").unwrap(), serde_json::json!(7));
    assert_eq!(
        reader.read(br#"{"x": 1}"#).unwrap(),
        serde_json::json!({"x": 1})
    );
}

#[test]
fn test_nested_alternation_is_left_biased() {
    let reader = int32()
        .map(|n| n)
        .or(int32().map(|n| n + 100))
        .or(int32().map(|n| n + 200));
    assert_eq!(reader.read(b"1").unwrap(), 1);
}

#[test]
fn test_buffered_alternation_on_complete_input() {
    let reader = either(
        array(int32()).map(|items| items.len()),
        trickle_json::object((), || 0usize),
    )
    .buffer();
    assert_eq!(reader.read(b"[1, 2, 3]").unwrap(), 3);
    assert_eq!(reader.read(b"{}").unwrap(), 0);
}

#[test]
fn test_as_any_preserves_type_identity() {
    let reader = boolean().as_any();
    let value: Box<dyn Any + Send + Sync> = reader.read(b"true").unwrap();
    assert!(value.downcast_ref::<bool>().copied().unwrap_or(false));
}
