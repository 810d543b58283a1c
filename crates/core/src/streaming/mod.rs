// this_file: crates/core/src/streaming/mod.rs

//! Streaming drivers for decoding JSON from chunked byte sources.
//!
//! A [`StreamChunkReader`] presents the tokenizer with a contiguous window
//! that grows as needed; [`read_from`] drives any reader to completion by
//! refilling on an incomplete outcome, and [`enumerate_array`] lazily yields
//! the decoded elements of a top-level JSON array one at a time, carrying
//! tokenizer state and resumption frames across refills.

mod chunk;
mod items;

pub use chunk::StreamChunkReader;
pub use items::{enumerate_array, read_from, ArrayItems};

#[cfg(feature = "async")]
pub use items::{enumerate_array_async, read_from_async, AsyncArrayItems};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal for the stream drivers.
///
/// Checked at refill boundaries and between emitted items, never inside a
/// single reader invocation; a decode may therefore run for one more
/// synchronous step after cancellation is requested.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Creates a flag in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}
