// this_file: crates/core/src/reader/mod.rs

//! Reader combinators: composable, resumable JSON decoders.
//!
//! A [`Reader<T>`] decodes one JSON value shape into a `T`. Every invocation
//! produces a [`ReadResult`]: a value, a canonical error, or `Incomplete`
//! ("give me more bytes and call me again with the same cursor"). Readers are
//! immutable after construction, cheap to clone, and freely shareable across
//! threads; the cursor is exclusive to one decode at a time.

/// Array and fixed-arity tuple combinators.
pub mod array;
/// Projection, alternation, buffering and recursion combinators.
pub mod combinator;
/// Numeric primitive readers.
pub mod number;
/// Object combinators and property descriptors.
pub mod object;
/// Scalar primitive readers.
pub mod scalar;
/// Structure read state machines.
pub mod state;

pub use array::{array, array_with, tuple2, tuple3};
pub use combinator::{either, either_with, recursive, ReaderRef};
pub use number::{byte, double, int16, int32, int64, single, uint16, uint32, uint64};
pub use object::{object, object_as_map, property, ObjectProps, Property};
pub use scalar::{
    boolean, date_time, date_time_offset, date_time_with, element, error, guid, null, string,
};
pub use state::{
    ArrayReadResult, ArrayReadStateMachine, ObjectReadResult, ObjectReadStateMachine,
};

use crate::cursor::ResumableCursor;
use crate::error::{Error, ReadError, Result};
use crate::tokenizer::{JsonTokenizer, TokenKind, TokenizerOptions};
use std::sync::Arc;

/// Unwraps a value outcome, propagating errors and incompleteness.
///
/// Only valid in combinators that hold no loop state of their own: a
/// propagated `Incomplete` must not require a frame push at this level.
macro_rules! ready {
    ($expr:expr) => {
        match $expr {
            $crate::reader::ReadResult::Value(value) => value,
            $crate::reader::ReadResult::Error(e) => {
                return $crate::reader::ReadResult::Error(e)
            }
            $crate::reader::ReadResult::Incomplete => {
                return $crate::reader::ReadResult::Incomplete
            }
        }
    };
}
pub(crate) use ready;

/// Tri-state outcome of one reader invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadResult<T> {
    /// The value was decoded; the cursor sits on its last token.
    Value(T),
    /// The input was rejected with a canonical message.
    Error(ReadError),
    /// More input is required; re-invoke with the same cursor once the
    /// window has grown.
    Incomplete,
}

impl<T> ReadResult<T> {
    /// Shorthand for an error outcome.
    pub fn fail(message: impl Into<ReadError>) -> Self {
        ReadResult::Error(message.into())
    }

    /// Maps a value outcome, passing errors and incompleteness through.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadResult<U> {
        match self {
            ReadResult::Value(value) => ReadResult::Value(f(value)),
            ReadResult::Error(e) => ReadResult::Error(e),
            ReadResult::Incomplete => ReadResult::Incomplete,
        }
    }

    /// Whether this is a value outcome.
    pub fn is_value(&self) -> bool {
        matches!(self, ReadResult::Value(_))
    }

    /// Whether this is the incomplete outcome.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ReadResult::Incomplete)
    }

    /// The decoded value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            ReadResult::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The error, if any.
    pub fn error(self) -> Option<ReadError> {
        match self {
            ReadResult::Error(e) => Some(e),
            _ => None,
        }
    }
}

type ReadFn<T> = dyn Fn(&mut ResumableCursor<'_>) -> ReadResult<T> + Send + Sync;

/// A composable JSON decoder for values of type `T`.
///
/// Internally an `Arc`'d closure plus a purity flag, so clones share the
/// same decoder and composition nests without boxing pyramids.
pub struct Reader<T> {
    f: Arc<ReadFn<T>>,
    pure: bool,
}

impl<T> Clone for Reader<T> {
    fn clone(&self) -> Self {
        Reader {
            f: Arc::clone(&self.f),
            pure: self.pure,
        }
    }
}

impl<T> std::fmt::Debug for Reader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader").field("pure", &self.pure).finish()
    }
}

impl<T: 'static> Reader<T> {
    /// Creates a reader that expects the cursor to be advanced onto its
    /// first token before its body runs (the common case for scalars).
    pub fn from_fn(
        f: impl Fn(&mut ResumableCursor<'_>) -> ReadResult<T> + Send + Sync + 'static,
    ) -> Self {
        Reader {
            f: Arc::new(f),
            pure: false,
        }
    }

    /// Creates a pure reader: no pre-advance is applied, so the body sees
    /// the cursor exactly as the caller left it. Structural combinators are
    /// pure because they want to observe the `{` or `[` themselves.
    pub fn from_pure_fn(
        f: impl Fn(&mut ResumableCursor<'_>) -> ReadResult<T> + Send + Sync + 'static,
    ) -> Self {
        Reader {
            f: Arc::new(f),
            pure: true,
        }
    }

    /// Whether this reader skips the entry pre-advance.
    pub fn is_pure(&self) -> bool {
        self.pure
    }

    /// Invokes the decoder against a cursor.
    ///
    /// Non-pure readers advance onto their first token when no token has
    /// been read yet; a failed advance is an incomplete outcome that can be
    /// retried from the initial token without a frame.
    pub fn try_read(&self, cursor: &mut ResumableCursor<'_>) -> ReadResult<T> {
        if !self.pure && !cursor.is_resuming() && cursor.token_kind() == TokenKind::None {
            match cursor.read() {
                Ok(true) => {}
                Ok(false) => return ReadResult::Incomplete,
                Err(e) => return ReadResult::Error(e),
            }
        }
        (self.f)(cursor)
    }

    /// Decodes a complete in-memory JSON document, raising on failure.
    ///
    /// The canonical message is annotated exactly once with the current
    /// token kind and byte offset.
    pub fn read(&self, json: impl AsRef<[u8]>) -> Result<T> {
        self.read_with_options(json, TokenizerOptions::default())
    }

    /// Like [`read`](Self::read) with explicit tokenizer options.
    pub fn read_with_options(
        &self,
        json: impl AsRef<[u8]>,
        options: TokenizerOptions,
    ) -> Result<T> {
        let json = json.as_ref();
        let tokenizer = JsonTokenizer::new(json, options);
        let mut cursor = ResumableCursor::new(tokenizer);
        let depth = cursor.frame_depth();
        match self.try_read(&mut cursor) {
            ReadResult::Value(value) => Ok(value),
            ReadResult::Error(e) => {
                debug_assert_eq!(cursor.frame_depth(), depth);
                Err(Error::Decode {
                    message: e,
                    token: cursor.token_kind(),
                    offset: cursor.token_start_index(),
                })
            }
            ReadResult::Incomplete => Err(Error::UnexpectedEndOfInput(json.len() as u64)),
        }
    }

    /// Decodes a complete in-memory JSON document, returning the tri-state
    /// outcome instead of raising.
    pub fn try_read_slice(&self, json: impl AsRef<[u8]>) -> ReadResult<T> {
        let tokenizer = JsonTokenizer::new(json.as_ref(), TokenizerOptions::default());
        let mut cursor = ResumableCursor::new(tokenizer);
        self.try_read(&mut cursor)
    }
}
