// this_file: crates/core/src/reader/state.rs

//! Structure read state machines.
//!
//! These small deterministic automata drive the cursor across the structural
//! tokens of arrays and objects and report typed events. They hold no user
//! values, which keeps them trivially storable inside resumption frames and
//! lets the array combinator, the tuple combinator and the streaming driver
//! share one implementation.

use crate::cursor::ResumableCursor;
use crate::error::types::msg;
use crate::error::ReadError;
use crate::tokenizer::TokenKind;

/// Event reported by one step of an array read.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayReadResult {
    /// The input is not an array, or the tokenizer rejected the input.
    Error(ReadError),
    /// The window ran out; retry this step after a refill.
    Incomplete,
    /// An item's first token is under the cursor; read it, then call
    /// [`ArrayReadStateMachine::on_item_read`].
    Item,
    /// The end of the array was consumed.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ArrayState {
    #[default]
    Initial,
    ItemOrEnd,
    PendingItemRead,
    Done,
    Error,
}

/// Drives an array read one structural step at a time.
#[derive(Debug, Clone, Default)]
pub struct ArrayReadStateMachine {
    state: ArrayState,
    current_length: usize,
}

impl ArrayReadStateMachine {
    /// Number of items whose reads have completed.
    pub fn current_length(&self) -> usize {
        self.current_length
    }

    /// Whether the end of the array has been consumed.
    pub fn is_done(&self) -> bool {
        self.state == ArrayState::Done
    }

    /// Advances the machine. `Item` is reported idempotently until the
    /// caller acknowledges the item with [`on_item_read`](Self::on_item_read).
    pub fn read(&mut self, cursor: &mut ResumableCursor<'_>) -> ArrayReadResult {
        loop {
            match self.state {
                ArrayState::Initial => {
                    if cursor.token_kind() == TokenKind::None {
                        match cursor.read() {
                            Ok(true) => {}
                            Ok(false) => return ArrayReadResult::Incomplete,
                            Err(e) => {
                                self.state = ArrayState::Error;
                                return ArrayReadResult::Error(e);
                            }
                        }
                    }
                    if cursor.token_kind() != TokenKind::StartArray {
                        self.state = ArrayState::Error;
                        return ArrayReadResult::Error(ReadError::from(msg::ARRAY_EXPECTED));
                    }
                    self.state = ArrayState::ItemOrEnd;
                }
                ArrayState::ItemOrEnd => {
                    match cursor.read() {
                        Ok(true) => {}
                        Ok(false) => return ArrayReadResult::Incomplete,
                        Err(e) => {
                            self.state = ArrayState::Error;
                            return ArrayReadResult::Error(e);
                        }
                    }
                    if cursor.token_kind() == TokenKind::EndArray {
                        self.state = ArrayState::Done;
                        return ArrayReadResult::Done;
                    }
                    self.state = ArrayState::PendingItemRead;
                    return ArrayReadResult::Item;
                }
                ArrayState::PendingItemRead => return ArrayReadResult::Item,
                ArrayState::Done | ArrayState::Error => {
                    panic!("array state machine read past a terminal state")
                }
            }
        }
    }

    /// Acknowledges that the pending item was decoded.
    pub fn on_item_read(&mut self) {
        assert_eq!(
            self.state,
            ArrayState::PendingItemRead,
            "no pending item to acknowledge"
        );
        self.current_length += 1;
        self.state = ArrayState::ItemOrEnd;
    }
}

/// Event reported by one step of an object read.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectReadResult {
    /// The input is not an object, or the tokenizer rejected the input.
    Error(ReadError),
    /// The window ran out; retry this step after a refill.
    Incomplete,
    /// A member name is under the cursor. Match it (then call
    /// [`ObjectReadStateMachine::on_property_name_read`]) or skip the member.
    PropertyName,
    /// A matched member's value is pending; read it, then call
    /// [`ObjectReadStateMachine::on_property_value_read`].
    PropertyValue,
    /// The end of the object was consumed.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ObjectState {
    #[default]
    Initial,
    PropertyNameOrEnd,
    PendingPropertyNameRead,
    PendingPropertyValueRead,
    Done,
    Error,
}

/// Drives an object read one structural step at a time.
#[derive(Debug, Clone, Default)]
pub struct ObjectReadStateMachine {
    state: ObjectState,
}

impl ObjectReadStateMachine {
    /// Whether the end of the object has been consumed.
    pub fn is_done(&self) -> bool {
        self.state == ObjectState::Done
    }

    /// Advances the machine. `PropertyName` and `PropertyValue` are reported
    /// idempotently until acknowledged.
    pub fn read(&mut self, cursor: &mut ResumableCursor<'_>) -> ObjectReadResult {
        loop {
            match self.state {
                ObjectState::Initial => {
                    if cursor.token_kind() == TokenKind::None {
                        match cursor.read() {
                            Ok(true) => {}
                            Ok(false) => return ObjectReadResult::Incomplete,
                            Err(e) => {
                                self.state = ObjectState::Error;
                                return ObjectReadResult::Error(e);
                            }
                        }
                    }
                    if cursor.token_kind() != TokenKind::StartObject {
                        self.state = ObjectState::Error;
                        return ObjectReadResult::Error(ReadError::from(msg::OBJECT_EXPECTED));
                    }
                    self.state = ObjectState::PropertyNameOrEnd;
                }
                ObjectState::PropertyNameOrEnd => {
                    match cursor.read() {
                        Ok(true) => {}
                        Ok(false) => return ObjectReadResult::Incomplete,
                        Err(e) => {
                            self.state = ObjectState::Error;
                            return ObjectReadResult::Error(e);
                        }
                    }
                    if cursor.token_kind() == TokenKind::EndObject {
                        self.state = ObjectState::Done;
                        return ObjectReadResult::Done;
                    }
                    self.state = ObjectState::PendingPropertyNameRead;
                    return ObjectReadResult::PropertyName;
                }
                ObjectState::PendingPropertyNameRead => return ObjectReadResult::PropertyName,
                ObjectState::PendingPropertyValueRead => return ObjectReadResult::PropertyValue,
                ObjectState::Done | ObjectState::Error => {
                    panic!("object state machine read past a terminal state")
                }
            }
        }
    }

    /// Acknowledges that the pending member name was matched.
    pub fn on_property_name_read(&mut self) {
        assert_eq!(
            self.state,
            ObjectState::PendingPropertyNameRead,
            "no pending member name to acknowledge"
        );
        self.state = ObjectState::PendingPropertyValueRead;
    }

    /// Acknowledges that the pending member value was decoded (or skipped).
    pub fn on_property_value_read(&mut self) {
        assert_eq!(
            self.state,
            ObjectState::PendingPropertyValueRead,
            "no pending member value to acknowledge"
        );
        self.state = ObjectState::PropertyNameOrEnd;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::ResumableCursor;
    use crate::tokenizer::{JsonTokenizer, TokenizerOptions, TokenizerState};

    fn cursor(input: &[u8]) -> ResumableCursor<'_> {
        ResumableCursor::new(JsonTokenizer::new(input, TokenizerOptions::default()))
    }

    #[test]
    fn test_array_machine_walk() {
        let mut cursor = cursor(b"[1, 2]");
        let mut sm = ArrayReadStateMachine::default();

        assert_eq!(sm.read(&mut cursor), ArrayReadResult::Item);
        assert_eq!(cursor.get_i32().unwrap(), 1);
        // Idempotent until acknowledged.
        assert_eq!(sm.read(&mut cursor), ArrayReadResult::Item);
        sm.on_item_read();
        assert_eq!(sm.current_length(), 1);

        assert_eq!(sm.read(&mut cursor), ArrayReadResult::Item);
        assert_eq!(cursor.get_i32().unwrap(), 2);
        sm.on_item_read();

        assert_eq!(sm.read(&mut cursor), ArrayReadResult::Done);
        assert!(sm.is_done());
        assert_eq!(sm.current_length(), 2);
    }

    #[test]
    fn test_array_machine_rejects_non_array() {
        let mut cursor = cursor(b"{}");
        let mut sm = ArrayReadStateMachine::default();
        assert_eq!(
            sm.read(&mut cursor),
            ArrayReadResult::Error(ReadError::from(msg::ARRAY_EXPECTED))
        );
    }

    #[test]
    fn test_array_machine_incomplete_then_resume() {
        let mut sm = ArrayReadStateMachine::default();
        let state = {
            let tokenizer = JsonTokenizer::resume(b"[1,", false, TokenizerState::default());
            let mut cursor = ResumableCursor::new(tokenizer);
            assert_eq!(sm.read(&mut cursor), ArrayReadResult::Item);
            assert_eq!(cursor.get_i32().unwrap(), 1);
            sm.on_item_read();
            // The comma cannot be committed yet.
            assert_eq!(sm.read(&mut cursor), ArrayReadResult::Incomplete);
            cursor.tokenizer_state()
        };

        let tokenizer = JsonTokenizer::resume(b", 2]", true, state);
        let mut cursor = ResumableCursor::new(tokenizer);
        assert_eq!(sm.read(&mut cursor), ArrayReadResult::Item);
        assert_eq!(cursor.get_i32().unwrap(), 2);
        sm.on_item_read();
        assert_eq!(sm.read(&mut cursor), ArrayReadResult::Done);
    }

    #[test]
    fn test_object_machine_walk() {
        let mut cursor = cursor(br#"{"a": 1}"#);
        let mut sm = ObjectReadStateMachine::default();

        assert_eq!(sm.read(&mut cursor), ObjectReadResult::PropertyName);
        assert!(cursor.value_text_equals(b"a"));
        sm.on_property_name_read();

        assert_eq!(sm.read(&mut cursor), ObjectReadResult::PropertyValue);
        assert!(cursor.read().unwrap());
        assert_eq!(cursor.get_i32().unwrap(), 1);
        sm.on_property_value_read();

        assert_eq!(sm.read(&mut cursor), ObjectReadResult::Done);
        assert!(sm.is_done());
    }

    #[test]
    fn test_object_machine_rejects_non_object() {
        let mut cursor = cursor(b"[]");
        let mut sm = ObjectReadStateMachine::default();
        assert_eq!(
            sm.read(&mut cursor),
            ObjectReadResult::Error(ReadError::from(msg::OBJECT_EXPECTED))
        );
    }

    #[test]
    #[should_panic(expected = "terminal state")]
    fn test_array_machine_read_after_done_panics() {
        let mut cursor = cursor(b"[]");
        let mut sm = ArrayReadStateMachine::default();
        assert_eq!(sm.read(&mut cursor), ArrayReadResult::Done);
        let _ = sm.read(&mut cursor);
    }
}
