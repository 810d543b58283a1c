// this_file: tests/object_tests.rs

use trickle_json::{
    array, boolean, int32, object, object_as_map, property, string, uint32,
};

#[test]
fn test_defaulted_member() {
    let reader = object(
        (
            property("num", int32()).with_default(0),
            property("str", string()),
        ),
        |num, text| (num, text),
    );

    assert_eq!(reader.read(br#"{"str":"x"}"#).unwrap(), (0, "x".to_owned()));
    assert_eq!(
        reader.read(br#"{"num": 7, "str":"x"}"#).unwrap(),
        (7, "x".to_owned())
    );
}

#[test]
fn test_missing_required_member() {
    let reader = object(
        (
            property("num", int32()).with_default(0),
            property("str", string()),
        ),
        |num, text| (num, text),
    );

    let err = reader.read(br#"{"num":42}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid JSON object. See token \"EndObject\" at offset 9."
    );
}

#[test]
fn test_duplicate_keys_last_occurrence_wins() {
    let reader = object(
        (property("num", int32()), property("str", string())),
        |num, text| (num, text),
    );
    assert_eq!(
        reader
            .read(br#"{"str":"A","num":-1,"str":"B","num":2}"#)
            .unwrap(),
        (2, "B".to_owned())
    );
}

#[test]
fn test_unknown_members_are_skipped() {
    let reader = object(
        (property("id", uint32()), property("name", string())),
        |id, name| (id, name),
    );
    let json = br#"{
        "extra": {"deep": [1, 2, {"x": null}]},
        "id": 12,
        "tags": ["a", "b"],
        "name": "widget",
        "active": true
    }"#;
    assert_eq!(reader.read(json).unwrap(), (12, "widget".to_owned()));
}

#[test]
fn test_unknown_members_do_not_change_result() {
    let bare = object((property("n", int32()),), |n| n);
    assert_eq!(bare.read(br#"{"n": 1}"#).unwrap(), 1);
    assert_eq!(bare.read(br#"{"pad": "x", "n": 1, "more": []}"#).unwrap(), 1);
}

#[test]
fn test_wrong_token_for_object() {
    let reader = object((property("n", int32()),), |n| n);
    let err = reader.read(b"[1]").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid JSON value where a JSON object was expected. \
         See token \"StartArray\" at offset 0."
    );
}

#[test]
fn test_empty_property_set_accepts_any_object() {
    let reader = object((), || 99);
    assert_eq!(reader.read(br#"{}"#).unwrap(), 99);
    assert_eq!(reader.read(br#"{"a": {"b": [false]}}"#).unwrap(), 99);
}

#[test]
fn test_wide_object() {
    let reader = object(
        (
            property("a", int32()),
            property("b", int32()),
            property("c", int32()),
            property("d", int32()),
            property("e", int32()).with_default(-1),
        ),
        |a, b, c, d, e| a + b + c + d + e,
    );
    assert_eq!(
        reader.read(br#"{"d": 4, "c": 3, "b": 2, "a": 1}"#).unwrap(),
        9
    );
}

#[test]
fn test_nested_object_members() {
    let point = object(
        (property("x", int32()), property("y", int32())),
        |x, y| (x, y),
    );
    let reader = object(
        (
            property("name", string()),
            property("origin", point),
            property("visible", boolean()).with_default(true),
        ),
        |name, origin, visible| (name, origin, visible),
    );
    assert_eq!(
        reader
            .read(br#"{"origin": {"y": 2, "x": 1}, "name": "p"}"#)
            .unwrap(),
        ("p".to_owned(), (1, 2), true)
    );
}

#[test]
fn test_object_as_map_folds_pairs() {
    let reader = object_as_map(array(int32()), |pairs| {
        pairs
            .into_iter()
            .map(|(name, items)| (name, items.len()))
            .collect::<Vec<_>>()
    });
    assert_eq!(
        reader.read(br#"{"a": [1, 2], "b": [], "c": [3]}"#).unwrap(),
        vec![("a".to_owned(), 2), ("b".to_owned(), 0), ("c".to_owned(), 1)]
    );
}
