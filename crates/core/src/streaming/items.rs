// this_file: crates/core/src/streaming/items.rs

//! Drivers that run readers against a chunked byte source.

use crate::cursor::{Frame, ResumableCursor};
use crate::error::{Error, Result};
use crate::reader::{ArrayReadResult, ArrayReadStateMachine, ReadResult, Reader};
use crate::streaming::{CancelFlag, StreamChunkReader};
use crate::tokenizer::{JsonTokenizer, TokenizerState};
use std::io::Read;
use std::mem;

/// Drives `reader` to completion over a byte stream, growing the window on
/// every incomplete outcome.
pub fn read_from<R: Read, T: 'static>(
    stream: R,
    reader: &Reader<T>,
    initial_buffer_size: usize,
) -> Result<T> {
    let mut chunks = StreamChunkReader::new(stream, initial_buffer_size);
    let mut state = TokenizerState::default();
    let mut frames: Vec<Frame> = Vec::new();
    loop {
        let tokenizer =
            JsonTokenizer::resume(chunks.remaining_chunk(), chunks.is_eof(), state.clone());
        let mut cursor = ResumableCursor::with_frames(tokenizer, mem::take(&mut frames));
        match reader.try_read(&mut cursor) {
            ReadResult::Value(value) => return Ok(value),
            ReadResult::Error(e) => {
                return Err(Error::Decode {
                    message: e,
                    token: cursor.token_kind(),
                    offset: cursor.token_start_index(),
                })
            }
            ReadResult::Incomplete => {
                let consumed = cursor.bytes_consumed();
                state = cursor.tokenizer_state();
                frames = cursor.into_frames();
                chunks.consume(consumed);
                if chunks.is_eof() {
                    return Err(Error::UnexpectedEndOfInput(
                        chunks.total_consumed() + chunks.remaining_chunk().len() as u64,
                    ));
                }
                chunks.fill()?;
            }
        }
    }
}

/// Lazily decodes the elements of a top-level JSON array from a byte
/// stream, one `item` read at a time.
pub fn enumerate_array<R, T: 'static>(
    stream: R,
    item: Reader<T>,
    initial_buffer_size: usize,
) -> ArrayItems<R, T> {
    ArrayItems {
        chunks: StreamChunkReader::new(stream, initial_buffer_size),
        item,
        sm: ArrayReadStateMachine::default(),
        state: TokenizerState::default(),
        frames: Vec::new(),
        cancel: None,
        done: false,
    }
}

/// One decode step against the current window.
enum Step<T> {
    Emit(T),
    Refill,
    Finish,
    Fail(Error),
}

/// Iterator over the decoded elements of a top-level JSON array.
///
/// Tokenizer state and the resumption-frame stack survive refills, so an
/// element may span any number of chunk boundaries. After an error the
/// iterator is fused.
pub struct ArrayItems<R, T> {
    chunks: StreamChunkReader<R>,
    item: Reader<T>,
    sm: ArrayReadStateMachine,
    state: TokenizerState,
    frames: Vec<Frame>,
    cancel: Option<CancelFlag>,
    done: bool,
}

impl<R, T> ArrayItems<R, T> {
    /// Attaches a cooperative cancellation flag, checked at refill
    /// boundaries and between items.
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Number of items decoded so far.
    pub fn items_decoded(&self) -> usize {
        self.sm.current_length()
    }

    /// Total bytes consumed from the stream so far.
    pub fn total_consumed(&self) -> u64 {
        self.chunks.total_consumed()
    }

    /// Runs one step against the current window and commits the cursor
    /// back into the carried state.
    fn step(&mut self) -> Step<T>
    where
        T: 'static,
    {
        let tokenizer = JsonTokenizer::resume(
            self.chunks.remaining_chunk(),
            self.chunks.is_eof(),
            self.state.clone(),
        );
        let mut cursor = ResumableCursor::with_frames(tokenizer, mem::take(&mut self.frames));

        let step = match self.sm.read(&mut cursor) {
            ArrayReadResult::Item => match self.item.try_read(&mut cursor) {
                ReadResult::Value(value) => {
                    self.sm.on_item_read();
                    Step::Emit(value)
                }
                ReadResult::Incomplete => Step::Refill,
                ReadResult::Error(e) => Step::Fail(Error::Decode {
                    message: e,
                    token: cursor.token_kind(),
                    offset: cursor.token_start_index(),
                }),
            },
            ArrayReadResult::Done => Step::Finish,
            ArrayReadResult::Incomplete => Step::Refill,
            ArrayReadResult::Error(e) => Step::Fail(Error::Decode {
                message: e,
                token: cursor.token_kind(),
                offset: cursor.token_start_index(),
            }),
        };

        let consumed = cursor.bytes_consumed();
        self.state = cursor.tokenizer_state();
        self.frames = cursor.into_frames();
        self.chunks.consume(consumed);
        step
    }

    fn eof_error(&self) -> Error {
        Error::UnexpectedEndOfInput(
            self.chunks.total_consumed() + self.chunks.remaining_chunk().len() as u64,
        )
    }

    fn check_cancelled(&mut self) -> bool {
        match &self.cancel {
            Some(flag) if flag.is_cancelled() => {
                self.done = true;
                true
            }
            _ => false,
        }
    }
}

impl<R: Read, T: 'static> Iterator for ArrayItems<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.check_cancelled() {
            return Some(Err(Error::Cancelled));
        }
        loop {
            match self.step() {
                Step::Emit(value) => return Some(Ok(value)),
                Step::Finish => {
                    self.done = true;
                    return None;
                }
                Step::Fail(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
                Step::Refill => {
                    if self.check_cancelled() {
                        return Some(Err(Error::Cancelled));
                    }
                    if self.chunks.is_eof() {
                        self.done = true;
                        return Some(Err(self.eof_error()));
                    }
                    if let Err(e) = self.chunks.fill() {
                        self.done = true;
                        return Some(Err(e.into()));
                    }
                }
            }
        }
    }
}

/// Async variant of [`read_from`] over a `tokio` byte stream.
#[cfg(feature = "async")]
pub async fn read_from_async<R, T>(
    stream: R,
    reader: &Reader<T>,
    initial_buffer_size: usize,
) -> Result<T>
where
    R: tokio::io::AsyncRead + Unpin,
    T: 'static,
{
    let mut chunks = StreamChunkReader::new(stream, initial_buffer_size);
    let mut state = TokenizerState::default();
    let mut frames: Vec<Frame> = Vec::new();
    loop {
        let tokenizer =
            JsonTokenizer::resume(chunks.remaining_chunk(), chunks.is_eof(), state.clone());
        let mut cursor = ResumableCursor::with_frames(tokenizer, mem::take(&mut frames));
        match reader.try_read(&mut cursor) {
            ReadResult::Value(value) => return Ok(value),
            ReadResult::Error(e) => {
                return Err(Error::Decode {
                    message: e,
                    token: cursor.token_kind(),
                    offset: cursor.token_start_index(),
                })
            }
            ReadResult::Incomplete => {
                let consumed = cursor.bytes_consumed();
                state = cursor.tokenizer_state();
                frames = cursor.into_frames();
                chunks.consume(consumed);
                if chunks.is_eof() {
                    return Err(Error::UnexpectedEndOfInput(
                        chunks.total_consumed() + chunks.remaining_chunk().len() as u64,
                    ));
                }
                chunks.fill_async().await?;
            }
        }
    }
}

/// Async variant of [`enumerate_array`]; pull items with
/// [`next_item`](AsyncArrayItems::next_item).
#[cfg(feature = "async")]
pub fn enumerate_array_async<R, T>(
    stream: R,
    item: Reader<T>,
    initial_buffer_size: usize,
) -> AsyncArrayItems<R, T>
where
    R: tokio::io::AsyncRead + Unpin,
    T: 'static,
{
    AsyncArrayItems {
        inner: enumerate_array(stream, item, initial_buffer_size),
    }
}

/// Async pull-based counterpart of [`ArrayItems`].
#[cfg(feature = "async")]
pub struct AsyncArrayItems<R, T> {
    inner: ArrayItems<R, T>,
}

#[cfg(feature = "async")]
impl<R, T> AsyncArrayItems<R, T>
where
    R: tokio::io::AsyncRead + Unpin,
    T: 'static,
{
    /// Attaches a cooperative cancellation flag.
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.inner.cancel = Some(cancel);
        self
    }

    /// Decodes and returns the next array element, refilling from the
    /// stream as needed. `None` marks the end of the array.
    pub async fn next_item(&mut self) -> Option<Result<T>> {
        if self.inner.done {
            return None;
        }
        if self.inner.check_cancelled() {
            return Some(Err(Error::Cancelled));
        }
        loop {
            match self.inner.step() {
                Step::Emit(value) => return Some(Ok(value)),
                Step::Finish => {
                    self.inner.done = true;
                    return None;
                }
                Step::Fail(err) => {
                    self.inner.done = true;
                    return Some(Err(err));
                }
                Step::Refill => {
                    if self.inner.check_cancelled() {
                        return Some(Err(Error::Cancelled));
                    }
                    if self.inner.chunks.is_eof() {
                        self.inner.done = true;
                        return Some(Err(self.inner.eof_error()));
                    }
                    if let Err(e) = self.inner.chunks.fill_async().await {
                        self.inner.done = true;
                        return Some(Err(e.into()));
                    }
                }
            }
        }
    }
}
