// this_file: crates/core/src/streaming/chunk.rs

//! Growable refill buffer over a chunked byte source.

use std::io::Read;

/// Buffers a chunked byte source so the tokenizer always sees a contiguous
/// window starting at the last consumed boundary.
///
/// After every [`fill`](Self::fill), the remaining chunk begins at offset 0
/// of the buffer and no byte in it has ever been consumed by the tokenizer.
/// When the unconsumed tail occupies the whole buffer, the buffer doubles,
/// so a value larger than the initial capacity still becomes contiguous
/// after O(log n) refills.
#[derive(Debug)]
pub struct StreamChunkReader<R> {
    inner: R,
    buffer: Vec<u8>,
    memory_len: usize,
    consumed_len: usize,
    total_consumed: u64,
    eof: bool,
}

const DEFAULT_BUFFER_SIZE: usize = 1024;

impl<R> StreamChunkReader<R> {
    /// Creates a reader with the given initial buffer capacity (0 selects
    /// the default of 1024 bytes).
    pub fn new(inner: R, initial_buffer_size: usize) -> Self {
        let capacity = if initial_buffer_size == 0 {
            DEFAULT_BUFFER_SIZE
        } else {
            initial_buffer_size
        };
        StreamChunkReader {
            inner,
            buffer: vec![0; capacity],
            memory_len: 0,
            consumed_len: 0,
            total_consumed: 0,
            eof: false,
        }
    }

    /// The tail of the window the tokenizer has not yet consumed.
    pub fn remaining_chunk(&self) -> &[u8] {
        &self.buffer[self.consumed_len..self.memory_len]
    }

    /// Marks `n` bytes of the remaining chunk as consumed.
    pub fn consume(&mut self, n: usize) {
        assert!(
            self.consumed_len + n <= self.memory_len,
            "consumed past the end of the window"
        );
        self.consumed_len += n;
        self.total_consumed += n as u64;
    }

    /// Total bytes ever consumed from this stream.
    pub fn total_consumed(&self) -> u64 {
        self.total_consumed
    }

    /// Whether the underlying stream has reported end of input.
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Moves the unconsumed tail to the front and grows the buffer when the
    /// tail already fills it. Returns the tail length.
    fn compact(&mut self) -> usize {
        let tail_len = self.memory_len - self.consumed_len;
        self.buffer.copy_within(self.consumed_len..self.memory_len, 0);
        self.consumed_len = 0;
        self.memory_len = tail_len;
        if tail_len == self.buffer.len() {
            self.buffer.resize(tail_len * 2, 0);
        }
        tail_len
    }
}

impl<R: Read> StreamChunkReader<R> {
    /// Compacts the tail, then fills the rest of the buffer with a single
    /// read from the stream. Returns the number of bytes read; zero marks
    /// end of input.
    pub fn fill(&mut self) -> std::io::Result<usize> {
        let tail_len = self.compact();
        let n = self.inner.read(&mut self.buffer[tail_len..])?;
        self.memory_len = tail_len + n;
        if n == 0 {
            self.eof = true;
        }
        Ok(n)
    }
}

#[cfg(feature = "async")]
impl<R: tokio::io::AsyncRead + Unpin> StreamChunkReader<R> {
    /// Async variant of [`fill`](Self::fill).
    pub async fn fill_async(&mut self) -> std::io::Result<usize> {
        use tokio::io::AsyncReadExt;

        let tail_len = self.compact();
        let n = self.inner.read(&mut self.buffer[tail_len..]).await?;
        self.memory_len = tail_len + n;
        if n == 0 {
            self.eof = true;
        }
        Ok(n)
    }
}
