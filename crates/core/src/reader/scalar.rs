// this_file: crates/core/src/reader/scalar.rs

//! Scalar primitive readers.
//!
//! Each reader peeks the current token and either emits a value or fails
//! with its canonical message. None of them holds loop state, so an
//! incomplete outcome is always restartable from the initial token.

use crate::error::types::msg;
use crate::reader::{ReadResult, Reader};
use crate::tokenizer::TokenKind;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use uuid::Uuid;

/// Reads a JSON string, decoding escapes per the JSON rules.
pub fn string() -> Reader<String> {
    Reader::from_fn(|cursor| match cursor.get_string() {
        Ok(value) => ReadResult::Value(value),
        Err(e) => ReadResult::Error(e),
    })
}

/// Reads a JSON Boolean.
pub fn boolean() -> Reader<bool> {
    Reader::from_fn(|cursor| match cursor.get_bool() {
        Ok(value) => ReadResult::Value(value),
        Err(e) => ReadResult::Error(e),
    })
}

/// Reads a JSON null, yielding the supplied sentinel value.
pub fn null<T: Clone + Send + Sync + 'static>(value: T) -> Reader<T> {
    Reader::from_fn(move |cursor| match cursor.token_kind() {
        TokenKind::Null => ReadResult::Value(value.clone()),
        _ => ReadResult::fail(msg::NULL_EXPECTED),
    })
}

/// Reads a date and time in ISO 8601-1 extended format.
pub fn date_time() -> Reader<NaiveDateTime> {
    Reader::from_fn(|cursor| match cursor.get_date_time() {
        Ok(value) => ReadResult::Value(value),
        Err(e) => ReadResult::Error(e),
    })
}

/// Reads a date and time in a caller-supplied chrono format.
pub fn date_time_with(format: &'static str) -> Reader<NaiveDateTime> {
    Reader::from_fn(move |cursor| match cursor.get_date_time_with(format) {
        Ok(value) => ReadResult::Value(value),
        Err(e) => ReadResult::Error(e),
    })
}

/// Reads a date and time with offset in ISO 8601-1 extended format.
pub fn date_time_offset() -> Reader<DateTime<FixedOffset>> {
    Reader::from_fn(|cursor| match cursor.get_date_time_offset() {
        Ok(value) => ReadResult::Value(value),
        Err(e) => ReadResult::Error(e),
    })
}

/// Reads a GUID in the hyphen-separated 'D' format.
pub fn guid() -> Reader<Uuid> {
    Reader::from_fn(|cursor| match cursor.get_guid() {
        Ok(value) => ReadResult::Value(value),
        Err(e) => ReadResult::Error(e),
    })
}

/// Captures an entire JSON subtree, of any shape, as a DOM value.
///
/// Reports `Incomplete` until the subtree's end token is inside the window;
/// no frame is needed because the retry re-scans from the subtree start.
pub fn element() -> Reader<serde_json::Value> {
    Reader::from_fn(|cursor| match cursor.parse_value() {
        Ok(Some(value)) => ReadResult::Value(value),
        Ok(None) => ReadResult::Incomplete,
        Err(e) => ReadResult::Error(e),
    })
}

/// A reader that always fails with the given message. Useful as a sentinel
/// branch in recursive grammars.
pub fn error<T: 'static>(message: &'static str) -> Reader<T> {
    Reader::from_pure_fn(move |_| ReadResult::fail(message))
}
