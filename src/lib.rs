// this_file: src/lib.rs
// Main trickle_json library that re-exports core functionality

//! # trickle_json
//!
//! Composable, resumable JSON reader combinators for chunked byte streams.
//!
//! A [`Reader`] decodes one JSON value shape into a typed value and can
//! suspend mid-read when its input arrives in chunks: invoking it again on a
//! grown window resumes exactly where it left off. Combinators compose
//! readers for arrays, typed objects, tuples, alternation and recursion
//! without giving up resumability.
//!
//! ## Quick Start
//!
//! ```rust
//! use trickle_json::{int32, object, property, string};
//!
//! let reader = object(
//!     (property("name", string()), property("age", int32())),
//!     |name, age| (name, age),
//! );
//! let (name, age) = reader.read(br#"{"name": "Ada", "age": 36}"#).unwrap();
//! assert_eq!((name.as_str(), age), ("Ada", 36));
//! ```
//!
//! ## Streaming
//!
//! ```rust
//! use trickle_json::{enumerate_array, int32};
//!
//! let stream = std::io::Cursor::new(b"[1, 2, 3]".to_vec());
//! let items: Result<Vec<i32>, _> = enumerate_array(stream, int32(), 8).collect();
//! assert_eq!(items.unwrap(), vec![1, 2, 3]);
//! ```

// Re-export the reader combinators
pub use trickle_json_core::{
    array, array_with, boolean, byte, date_time, date_time_offset, date_time_with, double,
    either, either_with, element, error, guid, int16, int32, int64, null, object, object_as_map,
    property, recursive, single, string, tuple2, tuple3, uint16, uint32, uint64, ObjectProps,
    Property, ReadResult, Reader, ReaderRef,
};

// Re-export the cursor and state machines for custom readers
pub use trickle_json_core::{
    ArrayReadResult, ArrayReadStateMachine, Frame, ObjectReadResult, ObjectReadStateMachine,
    ResumableCursor,
};

// Re-export streaming functionality
pub use trickle_json_core::{
    enumerate_array, read_from, ArrayItems, CancelFlag, StreamChunkReader,
};

// Re-export tokenizer types
pub use trickle_json_core::{JsonTokenizer, TokenKind, TokenizerOptions, TokenizerState};

// Re-export error types
pub use trickle_json_core::{Error, ReadError, Result, Span};

#[cfg(feature = "async")]
pub use trickle_json_core::{enumerate_array_async, read_from_async, AsyncArrayItems};
