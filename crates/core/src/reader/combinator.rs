// this_file: crates/core/src/reader/combinator.rs

//! Projection, alternation, buffering and recursion combinators.

use crate::error::types::msg;
use crate::reader::{ready, ReadResult, Reader};
use crate::tokenizer::TokenKind;
use rustc_hash::FxHashMap;
use std::any::Any;
use std::sync::{Arc, OnceLock};

/// Marker frame pushed while a buffered value waits for its end token.
#[derive(Debug, Default)]
struct BufferFrame;

impl<T: 'static> Reader<T> {
    /// Transforms the decoded value.
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> Reader<U> {
        Reader::from_pure_fn(move |cursor| self.try_read(cursor).map(&f))
    }

    /// Transforms the decoded value with a fallible projection, allowing the
    /// read to be failed based on the value.
    pub fn try_map<U: 'static>(
        self,
        f: impl Fn(T) -> ReadResult<U> + Send + Sync + 'static,
    ) -> Reader<U> {
        Reader::from_pure_fn(move |cursor| {
            let value = ready!(self.try_read(cursor));
            f(value)
        })
    }

    /// Rejects decoded values that fail the predicate, with the default
    /// message.
    pub fn validate(self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Reader<T> {
        self.validate_with(msg::VALUE_INVALID, predicate)
    }

    /// Rejects decoded values that fail the predicate, with a custom
    /// message.
    pub fn validate_with(
        self,
        message: &'static str,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Reader<T> {
        self.try_map(move |value| {
            if predicate(&value) {
                ReadResult::Value(value)
            } else {
                ReadResult::fail(message)
            }
        })
    }

    /// Tries this reader and falls back to `other` when it fails.
    pub fn or(self, other: Reader<T>) -> Reader<T> {
        either(self, other)
    }

    /// Like [`or`](Self::or) with a custom exhaustion message.
    pub fn or_with(self, other: Reader<T>, message: &'static str) -> Reader<T> {
        either_with(self, other, message)
    }

    /// Accepts a JSON null as `None` in place of the decoded value.
    pub fn or_null(self) -> Reader<Option<T>>
    where
        T: Send + Sync,
    {
        let null_branch = Reader::from_fn(|cursor| match cursor.token_kind() {
            TokenKind::Null => ReadResult::Value(None),
            _ => ReadResult::fail(msg::NULL_EXPECTED),
        });
        either(null_branch, self.map(Some))
    }

    /// Accepts a JSON null as the supplied sentinel in place of the decoded
    /// value.
    pub fn or_null_value(self, null_value: T) -> Reader<T>
    where
        T: Clone + Send + Sync,
    {
        either(crate::reader::null(null_value), self)
    }

    /// Upcasts the decoded value for use in mixed-shape alternations.
    ///
    /// Mapping into a purpose-built enum usually reads better; this exists
    /// for truly open-ended element shapes.
    pub fn as_any(self) -> Reader<Box<dyn Any + Send + Sync>>
    where
        T: Send + Sync,
    {
        self.map(|value| Box::new(value) as Box<dyn Any + Send + Sync>)
    }

    /// Maps the decoded value into an enum member, failing the read when the
    /// mapping rejects it. Pairs with integer-discriminated enums.
    pub fn as_enum_with<E: 'static>(
        self,
        to_member: impl Fn(T) -> Option<E> + Send + Sync + 'static,
    ) -> Reader<E> {
        self.try_map(move |value| match to_member(value) {
            Some(member) => ReadResult::Value(member),
            None => ReadResult::fail(invalid_member::<E>()),
        })
    }

    /// Materialises the current value before delegating, enabling
    /// alternation over streaming input.
    ///
    /// Scalars delegate directly. For objects and arrays the read suspends
    /// until the matching end token is inside the window; the inner reader
    /// then runs with the whole subtree buffered and never suspends.
    pub fn buffer(self) -> Reader<T> {
        Reader::from_fn(move |cursor| {
            let _ = cursor.resume_or_default::<BufferFrame>();
            match cursor.token_kind() {
                TokenKind::StartObject | TokenKind::StartArray => {
                    match cursor.value_in_window() {
                        Ok(true) => self.try_read(cursor),
                        Ok(false) => cursor.suspend(BufferFrame),
                        Err(e) => ReadResult::Error(e),
                    }
                }
                _ => self.try_read(cursor),
            }
        })
    }

    /// Applies a reader-to-reader (or reader-consuming) function, keeping
    /// builder chains readable.
    pub fn pipe<U>(self, f: impl FnOnce(Reader<T>) -> U) -> U {
        f(self)
    }
}

impl Reader<String> {
    /// Maps a decoded string onto an enum member by name (case-sensitive).
    pub fn as_enum<E: Clone + Send + Sync + 'static>(
        self,
        members: impl IntoIterator<Item = (&'static str, E)>,
    ) -> Reader<E> {
        let table: FxHashMap<&'static str, E> = members.into_iter().collect();
        self.try_map(move |name| match table.get(name.as_str()) {
            Some(member) => ReadResult::Value(member.clone()),
            None => ReadResult::fail(invalid_member::<E>()),
        })
    }

    /// Maps a decoded string onto an enum member by name, ignoring ASCII
    /// case.
    pub fn as_enum_ignore_case<E: Clone + Send + Sync + 'static>(
        self,
        members: impl IntoIterator<Item = (&'static str, E)>,
    ) -> Reader<E> {
        let table: FxHashMap<String, E> = members
            .into_iter()
            .map(|(name, member)| (name.to_ascii_lowercase(), member))
            .collect();
        self.try_map(move |name| match table.get(&name.to_ascii_lowercase()) {
            Some(member) => ReadResult::Value(member.clone()),
            None => ReadResult::fail(invalid_member::<E>()),
        })
    }
}

fn invalid_member<E>() -> String {
    let full = std::any::type_name::<E>();
    let name = full.rsplit("::").next().unwrap_or(full);
    format!("Invalid member for {name}.")
}

/// Tries `first`; if it fails, rolls the cursor back and tries `second`.
///
/// Alternation is left-biased and backtracks by checkpointing the cursor,
/// which is only sound while the value is fully buffered. A branch that
/// suspends mid-read is a programming error: wrap the alternation with
/// [`Reader::buffer`] for streaming input.
pub fn either<T: 'static>(first: Reader<T>, second: Reader<T>) -> Reader<T> {
    either_impl(first, second, None)
}

/// Like [`either`] with a custom message when both branches fail.
pub fn either_with<T: 'static>(
    first: Reader<T>,
    second: Reader<T>,
    message: &'static str,
) -> Reader<T> {
    either_impl(first, second, Some(message))
}

fn either_impl<T: 'static>(
    first: Reader<T>,
    second: Reader<T>,
    message: Option<&'static str>,
) -> Reader<T> {
    Reader::from_fn(move |cursor| {
        let checkpoint = cursor.checkpoint();
        let depth = cursor.frame_depth();
        match first.try_read(cursor) {
            ReadResult::Value(value) => ReadResult::Value(value),
            ReadResult::Incomplete => panic!("{}", msg::PARTIAL_UNSUPPORTED),
            ReadResult::Error(_) => {
                debug_assert_eq!(cursor.frame_depth(), depth);
                cursor.restore(checkpoint.clone());
                match second.try_read(cursor) {
                    ReadResult::Value(value) => ReadResult::Value(value),
                    ReadResult::Incomplete => panic!("{}", msg::PARTIAL_UNSUPPORTED),
                    ReadResult::Error(_) => {
                        cursor.restore(checkpoint);
                        ReadResult::fail(message.unwrap_or(msg::VALUE_INVALID))
                    }
                }
            }
        }
    })
}

/// A deferred reader cell for wiring self-referential grammars.
///
/// Take forwarding readers with [`reader`](ReaderRef::reader) first, then
/// [`set`](ReaderRef::set) the real definition once. Using a forwarding
/// reader before the cell is set panics.
pub struct ReaderRef<T> {
    cell: Arc<OnceLock<Reader<T>>>,
}

impl<T> Clone for ReaderRef<T> {
    fn clone(&self) -> Self {
        ReaderRef {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: 'static> ReaderRef<T> {
    /// Creates an unset deferred cell.
    pub fn new() -> Self {
        ReaderRef {
            cell: Arc::new(OnceLock::new()),
        }
    }

    /// A reader forwarding to whatever the cell is later set to.
    pub fn reader(&self) -> Reader<T> {
        let cell = Arc::clone(&self.cell);
        Reader::from_pure_fn(move |cursor| match cell.get() {
            Some(reader) => reader.try_read(cursor),
            None => panic!("deferred reader used before it was set"),
        })
    }

    /// Fills the cell. Setting it twice panics.
    pub fn set(&self, reader: Reader<T>) {
        if self.cell.set(reader).is_err() {
            panic!("deferred reader set twice");
        }
    }
}

impl<T: 'static> Default for ReaderRef<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a self-referential reader: `define` receives a forwarding reader
/// for the value being defined and returns the real definition.
pub fn recursive<T: 'static>(define: impl FnOnce(&Reader<T>) -> Reader<T>) -> Reader<T> {
    let slot = ReaderRef::new();
    let forward = slot.reader();
    let inner = define(&forward);
    slot.set(inner);
    forward
}
