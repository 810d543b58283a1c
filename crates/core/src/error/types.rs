// this_file: crates/core/src/error/types.rs

use crate::tokenizer::TokenKind;
use std::borrow::Cow;
use thiserror::Error;

/// The message carried by a failed read while combinators are composing.
///
/// Combinators propagate these unmodified; only the terminal entry points
/// wrap them into an [`Error`] with token and offset context. Most messages
/// are canonical `&'static str` constants, so construction is allocation-free
/// on the common paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ReadError(Cow<'static, str>);

impl ReadError {
    /// Creates a read error from a message.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        ReadError(message.into())
    }

    /// Returns the message text.
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ReadError {
    fn from(message: &'static str) -> Self {
        ReadError(Cow::Borrowed(message))
    }
}

impl From<String> for ReadError {
    fn from(message: String) -> Self {
        ReadError(Cow::Owned(message))
    }
}

/// Errors raised by the terminal decoding entry points.
///
/// Each variant carries the byte offset (where known) so users can locate the
/// offending input. `Decode` wraps a canonical combinator message exactly
/// once with the current token kind and offset.
#[derive(Error, Debug)]
pub enum Error {
    /// A reader rejected the input. The message is one of the canonical
    /// strings produced by the combinators.
    #[error("{message} See token \"{token}\" at offset {offset}.")]
    Decode {
        /// The canonical message from the failed reader.
        message: ReadError,
        /// The token under the cursor when the read failed.
        token: TokenKind,
        /// Absolute byte offset of that token.
        offset: u64,
    },

    /// The input ended before a complete value could be decoded.
    #[error("Unexpected end of JSON input at offset {0}.")]
    UnexpectedEndOfInput(u64),

    /// A streaming decode was cancelled via its cancellation flag.
    #[error("JSON decoding was cancelled.")]
    Cancelled,

    /// The underlying byte stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the canonical reader message, if this is a decode error.
    pub fn read_error(&self) -> Option<&ReadError> {
        match self {
            Error::Decode { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns the byte offset the error points at, if available.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Error::Decode { offset, .. } => Some(*offset),
            Error::UnexpectedEndOfInput(offset) => Some(*offset),
            Error::Cancelled | Error::Io(_) => None,
        }
    }
}

/// Canonical error strings shared by the readers.
///
/// These are preserved bit-exact so error-message tests remain portable
/// across implementations.
pub(crate) mod msg {
    pub const STRING_EXPECTED: &str = "Invalid JSON value where a JSON string was expected.";
    pub const NULL_EXPECTED: &str = "Invalid JSON value where a JSON null was expected.";
    pub const BOOLEAN_EXPECTED: &str = "Invalid JSON value where a JSON Boolean was expected.";
    pub const DATE_TIME_EXPECTED: &str =
        "JSON value cannot be interpreted as a date and time in ISO 8601-1 extended format.";
    pub const DATE_TIME_OFFSET_EXPECTED: &str =
        "JSON value cannot be interpreted as a date and time offset in ISO 8601-1 extended format.";
    pub const GUID_EXPECTED: &str =
        "Invalid JSON value where a Guid was expected in the 'D' format (hyphen-separated).";
    pub const ARRAY_EXPECTED: &str = "Invalid JSON value where a JSON array was expected.";
    pub const ARRAY_TOO_FEW: &str = "Invalid JSON value; JSON array has too few values.";
    pub const ARRAY_TOO_MANY: &str = "Invalid JSON value; JSON array has too many values.";
    pub const OBJECT_EXPECTED: &str = "Invalid JSON value where a JSON object was expected.";
    pub const OBJECT_INVALID: &str = "Invalid JSON object.";
    pub const VALUE_INVALID: &str = "Invalid JSON value.";
    pub const PARTIAL_UNSUPPORTED: &str =
        "Partial JSON reading is not supported. Combine with Buffer.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_annotation() {
        let err = Error::Decode {
            message: ReadError::from(msg::OBJECT_INVALID),
            token: TokenKind::EndObject,
            offset: 9,
        };
        assert_eq!(
            err.to_string(),
            "Invalid JSON object. See token \"EndObject\" at offset 9."
        );
        assert_eq!(err.offset(), Some(9));
    }

    #[test]
    fn test_read_error_display() {
        let err = ReadError::from(msg::VALUE_INVALID);
        assert_eq!(err.to_string(), "Invalid JSON value.");
    }
}
