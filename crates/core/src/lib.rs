// this_file: crates/core/src/lib.rs
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! Core decoding logic for trickle_json: composable, resumable JSON reader
//! combinators over a restartable forward-only tokenizer, with drivers for
//! chunked byte streams.

/// The resumable cursor: tokenizer plus resumption-frame stack.
pub mod cursor;

/// Error types and result type alias.
pub mod error;

/// Reader combinators and structure state machines.
pub mod reader;

/// Stream-chunk buffering and streaming decode drivers.
pub mod streaming;

/// Resumable forward-only UTF-8 JSON tokenizer.
pub mod tokenizer;

pub use cursor::{Frame, ResumableCursor};
pub use error::{Error, ReadError, Result, Span};
pub use reader::{
    array, array_with, boolean, byte, date_time, date_time_offset, date_time_with, double,
    either, either_with, element, error, guid, int16, int32, int64, null, object, object_as_map,
    property, recursive, single, string, tuple2, tuple3, uint16, uint32, uint64,
    ArrayReadResult, ArrayReadStateMachine, ObjectProps, ObjectReadResult,
    ObjectReadStateMachine, Property, ReadResult, Reader, ReaderRef,
};
pub use streaming::{enumerate_array, read_from, ArrayItems, CancelFlag, StreamChunkReader};
pub use tokenizer::{JsonTokenizer, TokenKind, TokenizerOptions, TokenizerState};

#[cfg(feature = "async")]
pub use streaming::{enumerate_array_async, read_from_async, AsyncArrayItems};
