// this_file: tests/basic_tests.rs

use trickle_json::{
    array, boolean, double, element, int32, string, tuple2, JsonTokenizer, ResumableCursor,
    ReadResult, TokenKind, TokenizerOptions,
};

#[test]
fn test_read_int32() {
    assert_eq!(int32().read(b"42").unwrap(), 42);

    let err = int32().read(br#""42""#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid JSON value; expecting a JSON number compatible with Int32. \
         See token \"String\" at offset 0."
    );
}

#[test]
fn test_read_tuple() {
    let reader = tuple2(string(), int32());
    assert_eq!(
        reader.read(br#"["foobar", 42]"#).unwrap(),
        ("foobar".to_owned(), 42)
    );

    let err = reader.read(br#"["foobar", 42, null]"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid JSON value; JSON array has too many values. \
         See token \"Null\" at offset 15."
    );
}

#[derive(Debug, PartialEq)]
struct Kv {
    key: String,
    value: i32,
}

#[test]
fn test_array_of_mapped_pairs() {
    let pair = tuple2(string(), int32()).map(|(key, value)| Kv { key, value });
    let reader = array(pair);
    assert_eq!(
        reader
            .read(br#"[["foo",123],["bar",456],["baz",789]]"#)
            .unwrap(),
        vec![
            Kv { key: "foo".to_owned(), value: 123 },
            Kv { key: "bar".to_owned(), value: 456 },
            Kv { key: "baz".to_owned(), value: 789 },
        ]
    );
}

#[test]
fn test_whitespace_tolerated_everywhere() {
    let reader = tuple2(string(), int32());
    assert_eq!(
        reader.read(b"  [ \"a\" ,\n\t 1 ]  ").unwrap(),
        ("a".to_owned(), 1)
    );
}

#[test]
fn test_element_round_trips_canonical_json() {
    let json = b"{\"b\": [1, 2.5, null], \"a\": {\"nested\": true}, \"s\": \"\xc3\xa9\"}";
    let dom = element().read(json).unwrap();
    let reparsed: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&dom).unwrap()).unwrap();
    let expected: serde_json::Value = serde_json::from_slice(json).unwrap();
    assert_eq!(reparsed, expected);
}

#[test]
fn test_successful_read_stops_on_last_token() {
    // A reader leaves the cursor on the last token of its value; the next
    // advance must surface the sentinel that follows.
    let tokenizer = JsonTokenizer::new(b"[1, 2] null", TokenizerOptions::default());
    let mut cursor = ResumableCursor::new(tokenizer);

    let reader = array(int32());
    assert_eq!(reader.try_read(&mut cursor), ReadResult::Value(vec![1, 2]));
    assert_eq!(cursor.token_kind(), TokenKind::EndArray);

    assert!(cursor.read().unwrap());
    assert_eq!(cursor.token_kind(), TokenKind::Null);
}

#[test]
fn test_scalar_read_stops_on_its_token() {
    let tokenizer = JsonTokenizer::new(b"true 42", TokenizerOptions::default());
    let mut cursor = ResumableCursor::new(tokenizer);

    assert_eq!(boolean().try_read(&mut cursor), ReadResult::Value(true));
    assert!(cursor.read().unwrap());
    assert_eq!(cursor.get_i32().unwrap(), 42);
}

#[test]
fn test_map_is_natural() {
    let base = double();
    let mapped = double().map(|x| x * 3.0);
    let json = b"1.5";
    assert_eq!(mapped.read(json).unwrap(), base.read(json).unwrap() * 3.0);
}

#[test]
fn test_deeply_nested_arrays() {
    let reader = array(array(array(int32())));
    assert_eq!(
        reader.read(b"[[[1], []], [[2, 3]]]").unwrap(),
        vec![vec![vec![1], vec![]], vec![vec![2, 3]]]
    );
}
