// this_file: crates/core/src/reader/array.rs

//! Array and fixed-arity tuple combinators.

use crate::error::types::msg;
use crate::reader::state::{ArrayReadResult, ArrayReadStateMachine};
use crate::reader::{ReadResult, Reader};

/// Reads a JSON array whose items are each decoded by `item`.
pub fn array<T: Send + 'static>(item: Reader<T>) -> Reader<Vec<T>> {
    array_with(item, |items| items)
}

/// Reads a JSON array and folds the decoded items with `fold`.
///
/// The loop state (state machine plus accumulator) lives in a resumption
/// frame, so the read suspends and resumes cleanly at any chunk boundary.
/// The item reader's own frames stack above this combinator's frame.
pub fn array_with<T, R>(
    item: Reader<T>,
    fold: impl Fn(Vec<T>) -> R + Send + Sync + 'static,
) -> Reader<R>
where
    T: Send + 'static,
    R: 'static,
{
    Reader::from_pure_fn(move |cursor| {
        let (mut sm, mut items) =
            cursor.resume_or_default::<(ArrayReadStateMachine, Vec<T>)>();
        loop {
            match sm.read(cursor) {
                ArrayReadResult::Error(e) => return ReadResult::Error(e),
                ArrayReadResult::Incomplete => return cursor.suspend((sm, items)),
                ArrayReadResult::Done => return ReadResult::Value(fold(items)),
                ArrayReadResult::Item => match item.try_read(cursor) {
                    ReadResult::Value(value) => {
                        items.push(value);
                        sm.on_item_read();
                    }
                    ReadResult::Error(e) => return ReadResult::Error(e),
                    ReadResult::Incomplete => return cursor.suspend((sm, items)),
                },
            }
        }
    })
}

macro_rules! tuple_reader {
    ($(#[$doc:meta])* $name:ident, $($T:ident, $reader:ident, $idx:tt);+) => {
        $(#[$doc])*
        pub fn $name<$($T),+>($($reader: Reader<$T>),+) -> Reader<($($T,)+)>
        where
            $($T: Send + 'static),+
        {
            Reader::from_pure_fn(move |cursor| {
                let (mut sm, mut slots) = cursor
                    .resume_or_default::<(ArrayReadStateMachine, ($(Option<$T>,)+))>();
                loop {
                    match sm.read(cursor) {
                        ArrayReadResult::Error(e) => return ReadResult::Error(e),
                        ArrayReadResult::Incomplete => return cursor.suspend((sm, slots)),
                        ArrayReadResult::Done => {
                            #[allow(non_snake_case)]
                            return match ($(slots.$idx.take(),)+) {
                                ($(Some($T),)+) => ReadResult::Value(($($T,)+)),
                                _ => ReadResult::fail(msg::ARRAY_TOO_FEW),
                            };
                        }
                        ArrayReadResult::Item => match sm.current_length() {
                            $(
                                $idx => match $reader.try_read(cursor) {
                                    ReadResult::Value(value) => {
                                        slots.$idx = Some(value);
                                        sm.on_item_read();
                                    }
                                    ReadResult::Error(e) => return ReadResult::Error(e),
                                    ReadResult::Incomplete => {
                                        return cursor.suspend((sm, slots))
                                    }
                                },
                            )+
                            _ => return ReadResult::fail(msg::ARRAY_TOO_MANY),
                        },
                    }
                }
            })
        }
    };
}

tuple_reader! {
    /// Reads a JSON array of exactly two elements, one reader per element.
    tuple2, T1, first, 0; T2, second, 1
}

tuple_reader! {
    /// Reads a JSON array of exactly three elements, one reader per element.
    tuple3, T1, first, 0; T2, second, 1; T3, third, 2
}
