// this_file: crates/core/src/reader/object.rs

//! Object combinators and property descriptors.
//!
//! The typed form decodes an object with up to sixteen known, typed members
//! into a projection; unknown members are skipped, repeated names keep the
//! last occurrence, and missing members fall back to their declared default
//! or fail the read. The general form hands every member to one value
//! reader and folds the `(name, value)` pairs.

use crate::error::types::msg;
use crate::reader::state::{ObjectReadResult, ObjectReadStateMachine};
use crate::reader::{ReadResult, Reader};
use crate::tokenizer::TokenKind;
use std::borrow::Cow;

/// Descriptor of one typed object member: a name, the reader for its value,
/// and an optional default used when the member is absent.
#[derive(Debug, Clone)]
pub struct Property<T> {
    name: Cow<'static, str>,
    reader: Reader<T>,
    default: Option<T>,
}

/// Creates a member descriptor with no default.
pub fn property<T>(name: impl Into<Cow<'static, str>>, reader: Reader<T>) -> Property<T> {
    Property {
        name: name.into(),
        reader,
        default: None,
    }
}

impl<T> Property<T> {
    /// Declares a fallback value used when the member is absent.
    pub fn with_default(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// The member name this descriptor matches.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn name_matches(&self, cursor: &crate::cursor::ResumableCursor<'_>) -> bool {
        cursor.value_text_equals(self.name.as_bytes())
    }
}

/// What the object combinator was doing when it suspended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Pending {
    /// Between members.
    #[default]
    None,
    /// Reading the value of the matched member at this slot index.
    Value(usize),
    /// Skipping an unknown member.
    Skip,
}

/// A tuple of [`Property`] descriptors convertible into an object reader.
///
/// Implemented for tuples of one through sixteen properties, plus the empty
/// tuple (which accepts any object and projects a constant).
pub trait ObjectProps<F, R> {
    /// Builds the object reader from these properties and a projector.
    fn into_reader(self, project: F) -> Reader<R>;
}

/// Reads a JSON object with typed members.
///
/// `props` is a tuple of [`property`] descriptors; `project` combines the
/// decoded member values, in declaration order, into the result.
pub fn object<P, F, R>(props: P, project: F) -> Reader<R>
where
    P: ObjectProps<F, R>,
{
    props.into_reader(project)
}

impl<F, R> ObjectProps<F, R> for ()
where
    F: Fn() -> R + Send + Sync + 'static,
    R: 'static,
{
    fn into_reader(self, project: F) -> Reader<R> {
        Reader::from_pure_fn(move |cursor| {
            let (mut sm, mut pending) =
                cursor.resume_or_default::<(ObjectReadStateMachine, Pending)>();
            loop {
                match sm.read(cursor) {
                    ObjectReadResult::Error(e) => return ReadResult::Error(e),
                    ObjectReadResult::Incomplete => return cursor.suspend((sm, pending)),
                    ObjectReadResult::Done => return ReadResult::Value(project()),
                    ObjectReadResult::PropertyName => {
                        pending = Pending::Skip;
                        match cursor.try_skip() {
                            Ok(true) => {
                                pending = Pending::None;
                                sm.on_property_name_read();
                                sm.on_property_value_read();
                            }
                            Ok(false) => return cursor.suspend((sm, pending)),
                            Err(e) => return ReadResult::Error(e),
                        }
                    }
                    ObjectReadResult::PropertyValue => {
                        unreachable!("no members are ever matched")
                    }
                }
            }
        })
    }
}

macro_rules! impl_object_props {
    ($($T:ident, $value:ident, $idx:tt);+) => {
        impl<R, F, $($T),+> ObjectProps<F, R> for ($(Property<$T>,)+)
        where
            F: Fn($($T),+) -> R + Send + Sync + 'static,
            R: 'static,
            $($T: Clone + Send + Sync + 'static,)+
        {
            fn into_reader(self, project: F) -> Reader<R> {
                let props = self;
                Reader::from_pure_fn(move |cursor| {
                    // Tuples above twelve slots have no Default, so the
                    // fresh state is spelled out.
                    let (mut sm, mut pending, mut slots) = cursor.resume_or_else(|| {
                        (
                            ObjectReadStateMachine::default(),
                            Pending::default(),
                            ($(Option::<$T>::None,)+),
                        )
                    });
                    loop {
                        match sm.read(cursor) {
                            ObjectReadResult::Error(e) => return ReadResult::Error(e),
                            ObjectReadResult::Incomplete => {
                                return cursor.suspend((sm, pending, slots))
                            }
                            ObjectReadResult::Done => {
                                $(
                                    if slots.$idx.is_none() {
                                        if let Some(default) = &props.$idx.default {
                                            slots.$idx = Some(default.clone());
                                        }
                                    }
                                )+
                                #[allow(non_snake_case)]
                                return match ($(slots.$idx.take(),)+) {
                                    ($(Some($value),)+) => {
                                        ReadResult::Value(project($($value),+))
                                    }
                                    _ => ReadResult::fail(msg::OBJECT_INVALID),
                                };
                            }
                            ObjectReadResult::PropertyName => {
                                if pending == Pending::None {
                                    $(
                                        if pending == Pending::None
                                            && props.$idx.name_matches(cursor)
                                        {
                                            pending = Pending::Value($idx);
                                            sm.on_property_name_read();
                                        }
                                    )+
                                    if pending == Pending::None {
                                        pending = Pending::Skip;
                                    }
                                }
                                if pending == Pending::Skip {
                                    match cursor.try_skip() {
                                        Ok(true) => {
                                            pending = Pending::None;
                                            sm.on_property_name_read();
                                            sm.on_property_value_read();
                                        }
                                        Ok(false) => {
                                            return cursor.suspend((sm, pending, slots))
                                        }
                                        Err(e) => return ReadResult::Error(e),
                                    }
                                }
                            }
                            ObjectReadResult::PropertyValue => {
                                // A fresh step still sits on the member name;
                                // after a resume it may already be past it.
                                if cursor.token_kind() == TokenKind::PropertyName {
                                    match cursor.read() {
                                        Ok(true) => {}
                                        Ok(false) => {
                                            return cursor.suspend((sm, pending, slots))
                                        }
                                        Err(e) => return ReadResult::Error(e),
                                    }
                                }
                                let index = match pending {
                                    Pending::Value(index) => index,
                                    _ => unreachable!("value step without a matched member"),
                                };
                                match index {
                                    $(
                                        $idx => match props.$idx.reader.try_read(cursor) {
                                            ReadResult::Value(value) => {
                                                // A repeated name keeps the
                                                // last decoded value.
                                                slots.$idx = Some(value);
                                            }
                                            ReadResult::Error(e) => {
                                                return ReadResult::Error(e)
                                            }
                                            ReadResult::Incomplete => {
                                                return cursor.suspend((sm, pending, slots))
                                            }
                                        },
                                    )+
                                    _ => unreachable!("member index out of range"),
                                }
                                pending = Pending::None;
                                sm.on_property_value_read();
                            }
                        }
                    }
                })
            }
        }
    };
}

impl_object_props!(T1, v1, 0);
impl_object_props!(T1, v1, 0; T2, v2, 1);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2; T4, v4, 3);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2; T4, v4, 3; T5, v5, 4);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2; T4, v4, 3; T5, v5, 4; T6, v6, 5);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2; T4, v4, 3; T5, v5, 4; T6, v6, 5; T7, v7, 6);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2; T4, v4, 3; T5, v5, 4; T6, v6, 5; T7, v7, 6; T8, v8, 7);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2; T4, v4, 3; T5, v5, 4; T6, v6, 5; T7, v7, 6; T8, v8, 7; T9, v9, 8);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2; T4, v4, 3; T5, v5, 4; T6, v6, 5; T7, v7, 6; T8, v8, 7; T9, v9, 8; T10, v10, 9);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2; T4, v4, 3; T5, v5, 4; T6, v6, 5; T7, v7, 6; T8, v8, 7; T9, v9, 8; T10, v10, 9; T11, v11, 10);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2; T4, v4, 3; T5, v5, 4; T6, v6, 5; T7, v7, 6; T8, v8, 7; T9, v9, 8; T10, v10, 9; T11, v11, 10; T12, v12, 11);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2; T4, v4, 3; T5, v5, 4; T6, v6, 5; T7, v7, 6; T8, v8, 7; T9, v9, 8; T10, v10, 9; T11, v11, 10; T12, v12, 11; T13, v13, 12);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2; T4, v4, 3; T5, v5, 4; T6, v6, 5; T7, v7, 6; T8, v8, 7; T9, v9, 8; T10, v10, 9; T11, v11, 10; T12, v12, 11; T13, v13, 12; T14, v14, 13);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2; T4, v4, 3; T5, v5, 4; T6, v6, 5; T7, v7, 6; T8, v8, 7; T9, v9, 8; T10, v10, 9; T11, v11, 10; T12, v12, 11; T13, v13, 12; T14, v14, 13; T15, v15, 14);
impl_object_props!(T1, v1, 0; T2, v2, 1; T3, v3, 2; T4, v4, 3; T5, v5, 4; T6, v6, 5; T7, v7, 6; T8, v8, 7; T9, v9, 8; T10, v10, 9; T11, v11, 10; T12, v12, 11; T13, v13, 12; T14, v14, 13; T15, v15, 14; T16, v16, 15);

/// Reads a JSON object member by member, decoding every value with
/// `value_reader` and folding the `(name, value)` pairs in source order.
pub fn object_as_map<T, R>(
    value_reader: Reader<T>,
    fold: impl Fn(Vec<(String, T)>) -> R + Send + Sync + 'static,
) -> Reader<R>
where
    T: Send + 'static,
    R: 'static,
{
    Reader::from_pure_fn(move |cursor| {
        let (mut sm, mut pending_name, mut pairs) = cursor.resume_or_default::<(
            ObjectReadStateMachine,
            Option<String>,
            Vec<(String, T)>,
        )>();
        loop {
            match sm.read(cursor) {
                ObjectReadResult::Error(e) => return ReadResult::Error(e),
                ObjectReadResult::Incomplete => {
                    return cursor.suspend((sm, pending_name, pairs))
                }
                ObjectReadResult::Done => return ReadResult::Value(fold(pairs)),
                ObjectReadResult::PropertyName => {
                    match cursor.get_string() {
                        Ok(name) => pending_name = Some(name),
                        Err(e) => return ReadResult::Error(e),
                    }
                    sm.on_property_name_read();
                }
                ObjectReadResult::PropertyValue => {
                    if cursor.token_kind() == TokenKind::PropertyName {
                        match cursor.read() {
                            Ok(true) => {}
                            Ok(false) => return cursor.suspend((sm, pending_name, pairs)),
                            Err(e) => return ReadResult::Error(e),
                        }
                    }
                    match value_reader.try_read(cursor) {
                        ReadResult::Value(value) => {
                            let name = match pending_name.take() {
                                Some(name) => name,
                                None => unreachable!("value step without a member name"),
                            };
                            pairs.push((name, value));
                            sm.on_property_value_read();
                        }
                        ReadResult::Error(e) => return ReadResult::Error(e),
                        ReadResult::Incomplete => {
                            return cursor.suspend((sm, pending_name, pairs))
                        }
                    }
                }
            }
        }
    })
}
