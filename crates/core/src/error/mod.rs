// this_file: crates/core/src/error/mod.rs

//! Error handling module for the trickle_json decoder.
//!
//! Two layers of errors exist:
//! - [`ReadError`] is the lightweight message carried inside a
//!   `ReadResult::Error` while combinators are composing. Messages are
//!   canonical strings; combinators propagate them unmodified.
//! - [`Error`] is the public error raised by the terminal entry points
//!   (`Reader::read`, the stream drivers). It annotates the canonical message
//!   once with the offending token kind and byte offset.

/// Result type alias for convenience.
pub mod result;
/// Byte spans for token and error locations.
pub mod span;
/// Error type definitions and canonical message strings.
pub mod types;

pub use result::Result;
pub use span::Span;
pub use types::{Error, ReadError};
