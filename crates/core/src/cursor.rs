// this_file: crates/core/src/cursor.rs

//! The resumable cursor: a tokenizer plus a stack of resumption frames.
//!
//! Readers that cannot finish on the current window push a frame describing
//! their loop state and return `Incomplete`. When the driver re-invokes the
//! same reader on a larger window, each combinator pops its own frame on
//! entry (outermost first) and picks up where it left off. The stack depth
//! returns to its pre-call value on both success and error; only an
//! incomplete read leaves frames behind.

use crate::error::{ReadError, Span};
use crate::reader::ReadResult;
use crate::tokenizer::{JsonTokenizer, TokenKind, TokenizerState};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use std::any::Any;
use uuid::Uuid;

/// A resumption frame. The payload is decoder-specific; a well-behaved
/// decoder pops frames of the same shape it pushed.
pub type Frame = Box<dyn Any + Send>;

/// Cursor over a JSON token stream for one logical decode operation.
pub struct ResumableCursor<'a> {
    tokenizer: JsonTokenizer<'a>,
    frames: Vec<Frame>,
}

impl<'a> ResumableCursor<'a> {
    /// Creates a cursor with an empty frame stack.
    pub fn new(tokenizer: JsonTokenizer<'a>) -> Self {
        Self::with_frames(tokenizer, Vec::new())
    }

    /// Creates a cursor resuming with frames saved from a prior window.
    pub fn with_frames(tokenizer: JsonTokenizer<'a>, frames: Vec<Frame>) -> Self {
        ResumableCursor { tokenizer, frames }
    }

    /// Whether a suspended decode is being resumed (frames are pending).
    pub fn is_resuming(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Pushes `frame` and returns the canonical incomplete outcome. This is
    /// the only way a stateful reader reports that it needs more input.
    pub fn suspend<T, F: Any + Send>(&mut self, frame: F) -> ReadResult<T> {
        self.frames.push(Box::new(frame));
        ReadResult::Incomplete
    }

    /// Pops the top frame as `F` when resuming, or yields a fresh default.
    ///
    /// Panics if the top frame has a different shape than `F`; pushing and
    /// popping mismatched frames is a combinator bug, not an input error.
    pub fn resume_or_default<F: Any + Default>(&mut self) -> F {
        self.resume_or_else(F::default)
    }

    /// Like [`resume_or_default`](Self::resume_or_default) with an explicit
    /// initial state, for frame shapes that have no `Default`.
    pub fn resume_or_else<F: Any, G: FnOnce() -> F>(&mut self, fresh: G) -> F {
        match self.frames.pop() {
            None => fresh(),
            Some(frame) => match frame.downcast::<F>() {
                Ok(frame) => *frame,
                Err(_) => panic!("resumption frame shape mismatch"),
            },
        }
    }

    /// Current frame-stack depth. Combinators conserve it on success and
    /// error outcomes.
    pub fn frame_depth(&self) -> usize {
        self.frames.len()
    }

    /// Hands the frame stack back to a driver across a refill.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Snapshot of the tokenizer for restarting on a larger window.
    pub fn tokenizer_state(&self) -> TokenizerState {
        self.tokenizer.current_state()
    }

    /// Copy of the tokenizer for checkpoint/restore within this window.
    pub(crate) fn checkpoint(&self) -> JsonTokenizer<'a> {
        self.tokenizer.clone()
    }

    /// Rolls the tokenizer back to a checkpoint taken on this window.
    pub(crate) fn restore(&mut self, checkpoint: JsonTokenizer<'a>) {
        self.tokenizer = checkpoint;
    }

    // Forwarded tokenizer operations.

    /// Advances to the next token; `Ok(false)` means the window ran out.
    pub fn read(&mut self) -> Result<bool, ReadError> {
        self.tokenizer.read()
    }

    /// Advances and reports the new token's kind, or `None` when the window
    /// ran out before a complete token.
    pub fn try_read_token(&mut self) -> Result<Option<TokenKind>, ReadError> {
        Ok(if self.tokenizer.read()? {
            Some(self.tokenizer.token_kind())
        } else {
            None
        })
    }

    /// Skips the current composite value; `Ok(false)` leaves the cursor
    /// unchanged so the skip can be retried on a larger window.
    pub fn try_skip(&mut self) -> Result<bool, ReadError> {
        self.tokenizer.try_skip()
    }

    /// Like [`try_skip`](Self::try_skip) but errors on an exhausted window.
    pub fn skip(&mut self) -> Result<(), ReadError> {
        self.tokenizer.skip()
    }

    /// Whether the current value's end token lies inside the window.
    pub fn value_in_window(&self) -> Result<bool, ReadError> {
        self.tokenizer.value_in_window()
    }

    /// The kind of the current token.
    pub fn token_kind(&self) -> TokenKind {
        self.tokenizer.token_kind()
    }

    /// The current token's span within the window.
    pub fn token_span(&self) -> Span {
        self.tokenizer.token_span()
    }

    /// Absolute byte offset of the current token.
    pub fn token_start_index(&self) -> u64 {
        self.tokenizer.token_start_index()
    }

    /// Bytes of the window consumed by completed tokens.
    pub fn bytes_consumed(&self) -> usize {
        self.tokenizer.bytes_consumed()
    }

    /// Whether the window is the stream's final block.
    pub fn is_final_block(&self) -> bool {
        self.tokenizer.is_final_block()
    }

    /// Container nesting depth at the current token.
    pub fn current_depth(&self) -> usize {
        self.tokenizer.current_depth()
    }

    /// Decodes the current string token.
    pub fn get_string(&self) -> Result<String, ReadError> {
        self.tokenizer.get_string()
    }

    /// Raw-name equality against UTF-8 bytes without allocation.
    pub fn value_text_equals(&self, utf8: &[u8]) -> bool {
        self.tokenizer.value_text_equals(utf8)
    }

    /// Decodes the current boolean token.
    pub fn get_bool(&self) -> Result<bool, ReadError> {
        self.tokenizer.get_bool()
    }

    /// Decodes an ISO 8601-1 extended date-time.
    pub fn get_date_time(&self) -> Result<NaiveDateTime, ReadError> {
        self.tokenizer.get_date_time()
    }

    /// Decodes a date-time with a caller-supplied format.
    pub fn get_date_time_with(&self, format: &str) -> Result<NaiveDateTime, ReadError> {
        self.tokenizer.get_date_time_with(format)
    }

    /// Decodes an ISO 8601-1 extended date-time with offset.
    pub fn get_date_time_offset(&self) -> Result<DateTime<FixedOffset>, ReadError> {
        self.tokenizer.get_date_time_offset()
    }

    /// Decodes a GUID in the 'D' format.
    pub fn get_guid(&self) -> Result<Uuid, ReadError> {
        self.tokenizer.get_guid()
    }

    /// Captures the current subtree as a DOM value, or `None` when the
    /// subtree's end is not yet buffered.
    pub fn parse_value(&mut self) -> Result<Option<serde_json::Value>, ReadError> {
        self.tokenizer.parse_value()
    }

    /// Decodes the current number token as `u8`.
    pub fn get_u8(&self) -> Result<u8, ReadError> {
        self.tokenizer.get_u8()
    }

    /// Decodes the current number token as `i16`.
    pub fn get_i16(&self) -> Result<i16, ReadError> {
        self.tokenizer.get_i16()
    }

    /// Decodes the current number token as `i32`.
    pub fn get_i32(&self) -> Result<i32, ReadError> {
        self.tokenizer.get_i32()
    }

    /// Decodes the current number token as `i64`.
    pub fn get_i64(&self) -> Result<i64, ReadError> {
        self.tokenizer.get_i64()
    }

    /// Decodes the current number token as `u16`.
    pub fn get_u16(&self) -> Result<u16, ReadError> {
        self.tokenizer.get_u16()
    }

    /// Decodes the current number token as `u32`.
    pub fn get_u32(&self) -> Result<u32, ReadError> {
        self.tokenizer.get_u32()
    }

    /// Decodes the current number token as `u64`.
    pub fn get_u64(&self) -> Result<u64, ReadError> {
        self.tokenizer.get_u64()
    }

    /// Decodes the current number token as `f32`.
    pub fn get_f32(&self) -> Result<f32, ReadError> {
        self.tokenizer.get_f32()
    }

    /// Decodes the current number token as `f64`.
    pub fn get_f64(&self) -> Result<f64, ReadError> {
        self.tokenizer.get_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TokenizerOptions;

    #[test]
    fn test_suspend_and_resume_frames() {
        let tokenizer = JsonTokenizer::new(b"1", TokenizerOptions::default());
        let mut cursor = ResumableCursor::new(tokenizer);
        assert!(!cursor.is_resuming());

        let result: ReadResult<i32> = cursor.suspend((3usize, vec![1, 2]));
        assert!(matches!(result, ReadResult::Incomplete));
        assert!(cursor.is_resuming());

        let (count, items) = cursor.resume_or_default::<(usize, Vec<i32>)>();
        assert_eq!(count, 3);
        assert_eq!(items, vec![1, 2]);
        assert!(!cursor.is_resuming());
    }

    #[test]
    fn test_resume_or_default_fresh() {
        let tokenizer = JsonTokenizer::new(b"1", TokenizerOptions::default());
        let mut cursor = ResumableCursor::new(tokenizer);
        let (count, items) = cursor.resume_or_default::<(usize, Vec<i32>)>();
        assert_eq!(count, 0);
        assert!(items.is_empty());
    }

    #[test]
    fn test_frames_pop_outermost_first() {
        let tokenizer = JsonTokenizer::new(b"1", TokenizerOptions::default());
        let mut cursor = ResumableCursor::new(tokenizer);
        // Inner reader suspends first, then its enclosing combinator.
        let _: ReadResult<()> = cursor.suspend(7u8);
        let _: ReadResult<()> = cursor.suspend("outer");
        assert_eq!(cursor.resume_or_default::<&'static str>(), "outer");
        assert_eq!(cursor.resume_or_default::<u8>(), 7);
    }

    #[test]
    #[should_panic(expected = "resumption frame shape mismatch")]
    fn test_frame_shape_mismatch_panics() {
        let tokenizer = JsonTokenizer::new(b"1", TokenizerOptions::default());
        let mut cursor = ResumableCursor::new(tokenizer);
        let _: ReadResult<()> = cursor.suspend(7u8);
        let _ = cursor.resume_or_default::<u16>();
    }
}
