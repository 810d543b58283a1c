// this_file: tests/error_handling.rs

//! The canonical error strings are part of the public contract; these tests
//! pin them bit-exact, together with the single token/offset annotation the
//! throwing entry point applies.

use trickle_json::{
    array, boolean, date_time, date_time_offset, either, guid, int32, null, string, tuple2,
    Error,
};

fn message_of(err: Error) -> String {
    err.to_string()
}

#[test]
fn test_string_expected() {
    assert_eq!(
        message_of(string().read(b"1").unwrap_err()),
        "Invalid JSON value where a JSON string was expected. \
         See token \"Number\" at offset 0."
    );
}

#[test]
fn test_number_compatibility_messages() {
    for (json, expected) in [
        (
            &br#""x""#[..],
            "Invalid JSON value; expecting a JSON number compatible with Int32.",
        ),
        (
            &b"2147483648"[..],
            "Invalid JSON value; expecting a JSON number compatible with Int32.",
        ),
        (
            &b"-4.2"[..],
            "Invalid JSON value; expecting a JSON number compatible with Int32.",
        ),
    ] {
        let err = int32().read(json).unwrap_err();
        assert!(message_of(err).starts_with(expected));
    }
}

#[test]
fn test_null_expected() {
    assert_eq!(
        message_of(null(0).read(b"1").unwrap_err()),
        "Invalid JSON value where a JSON null was expected. \
         See token \"Number\" at offset 0."
    );
}

#[test]
fn test_boolean_expected() {
    assert_eq!(
        message_of(boolean().read(b"\"true\"").unwrap_err()),
        "Invalid JSON value where a JSON Boolean was expected. \
         See token \"String\" at offset 0."
    );
}

#[test]
fn test_date_time_expected() {
    assert_eq!(
        message_of(date_time().read(b"\"tomorrow\"").unwrap_err()),
        "JSON value cannot be interpreted as a date and time in ISO 8601-1 \
         extended format. See token \"String\" at offset 0."
    );
    assert!(message_of(date_time().read(b"17").unwrap_err()).starts_with(
        "JSON value cannot be interpreted as a date and time in ISO 8601-1 extended format."
    ));
}

#[test]
fn test_date_time_offset_expected() {
    assert_eq!(
        message_of(date_time_offset().read(b"\"2022-01-01\"").unwrap_err()),
        "JSON value cannot be interpreted as a date and time offset in ISO 8601-1 \
         extended format. See token \"String\" at offset 0."
    );
}

#[test]
fn test_guid_expected() {
    assert_eq!(
        message_of(guid().read(b"\"not-a-guid\"").unwrap_err()),
        "Invalid JSON value where a Guid was expected in the 'D' format \
         (hyphen-separated). See token \"String\" at offset 0."
    );
}

#[test]
fn test_array_expected() {
    assert_eq!(
        message_of(array(int32()).read(b"{}").unwrap_err()),
        "Invalid JSON value where a JSON array was expected. \
         See token \"StartObject\" at offset 0."
    );
}

#[test]
fn test_tuple_arity_messages() {
    assert!(message_of(
        tuple2(int32(), int32()).read(b"[1]").unwrap_err()
    )
    .starts_with("Invalid JSON value; JSON array has too few values."));
    assert!(message_of(
        tuple2(int32(), int32()).read(b"[1, 2, 3]").unwrap_err()
    )
    .starts_with("Invalid JSON value; JSON array has too many values."));
}

#[test]
fn test_alternation_exhausted_message() {
    assert_eq!(
        message_of(
            either(boolean().map(|_| 0), int32())
                .read(b"\"neither\"")
                .unwrap_err()
        ),
        "Invalid JSON value. See token \"String\" at offset 0."
    );
}

#[test]
fn test_validate_default_message() {
    assert_eq!(
        message_of(int32().validate(|n| *n > 0).read(b"0").unwrap_err()),
        "Invalid JSON value. See token \"Number\" at offset 0."
    );
}

#[test]
fn test_syntax_errors_carry_positions() {
    let err = array(int32()).read(b"[1, 2,]").unwrap_err();
    assert_eq!(
        message_of(err),
        "Unexpected character ']' at position 6. See token \"Number\" at offset 4."
    );
}

#[test]
fn test_truncated_document_reports_position() {
    let err = array(int32()).read(b"[1, 2").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected end of input at position 5. See token \"Number\" at offset 4."
    );
}

#[test]
fn test_empty_document_is_eof() {
    let err = int32().read(b"   ").unwrap_err();
    assert!(matches!(err, Error::UnexpectedEndOfInput(3)));
    assert_eq!(err.to_string(), "Unexpected end of JSON input at offset 3.");
}

#[test]
fn test_offset_accessor() {
    let err = int32().read(br#"[false, "x"]"#).unwrap_err();
    assert_eq!(err.offset(), Some(0));
}
