// this_file: crates/core/src/tokenizer/state.rs

//! Token kinds and the resumable tokenizer state snapshot.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of the token the tokenizer is currently positioned on.
///
/// `None` means no token has been read yet in this window (a fresh tokenizer,
/// or one that has been resumed and not yet advanced).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenKind {
    /// No token has been read yet.
    #[default]
    None,
    /// Opening curly brace '{' of an object.
    StartObject,
    /// Closing curly brace '}' of an object.
    EndObject,
    /// Opening square bracket '[' of an array.
    StartArray,
    /// Closing square bracket ']' of an array.
    EndArray,
    /// An object member name (the colon is consumed silently).
    PropertyName,
    /// A string value.
    String,
    /// A number value.
    Number,
    /// The literal `true`.
    True,
    /// The literal `false`.
    False,
    /// The literal `null`.
    Null,
    /// A comment (only produced internally; comments are skipped).
    Comment,
}

impl TokenKind {
    /// Whether this kind starts a JSON value (scalar or container).
    pub fn starts_value(&self) -> bool {
        matches!(
            self,
            TokenKind::StartObject
                | TokenKind::StartArray
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    /// Whether this kind is a scalar value token.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Number
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::None => "None",
            TokenKind::StartObject => "StartObject",
            TokenKind::EndObject => "EndObject",
            TokenKind::StartArray => "StartArray",
            TokenKind::EndArray => "EndArray",
            TokenKind::PropertyName => "PropertyName",
            TokenKind::String => "String",
            TokenKind::Number => "Number",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::Null => "Null",
            TokenKind::Comment => "Comment",
        };
        f.write_str(name)
    }
}

/// The container the tokenizer is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub(crate) enum Container {
    Object,
    Array,
}

/// What the scanner expects at the current position.
///
/// Structural glue (colons, commas) never surfaces as a token; the phase
/// records which glue or token class is legal next. A failed read commits
/// neither glue nor phase, so resuming on a larger window rescans from the
/// last completed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub(crate) enum Phase {
    /// A value is required (top level, after ':' or after ',' in an array).
    #[default]
    ExpectValue,
    /// A value or ']' (right after '[').
    ExpectValueOrEnd,
    /// A member name or '}' (right after '{').
    ExpectNameOrEnd,
    /// A member name (after ',' in an object; '}' here is a trailing comma).
    ExpectName,
    /// The ':' between a member name and its value.
    ExpectColon,
    /// ',' or the closing token of the current container.
    ExpectCommaOrEnd,
}

/// Configuration options for the tokenizer.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TokenizerOptions {
    /// Whether '//', '#' and '/* */' comments are tolerated (and skipped).
    pub allow_comments: bool,
    /// Maximum container nesting depth.
    pub max_depth: usize,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        TokenizerOptions {
            allow_comments: false,
            max_depth: 128,
        }
    }
}

/// Snapshot of a tokenizer that can be carried across buffer refills.
///
/// [`JsonTokenizer::resume`](super::JsonTokenizer::resume) reconstructs an
/// equivalent tokenizer from a new window that starts at the old consumed
/// boundary. The snapshot keeps the current token *kind* (the token's bytes
/// are gone with the old window), the structural phase and container stack,
/// and the absolute stream offset of the boundary.
#[derive(Debug, Clone, Default)]
pub struct TokenizerState {
    pub(crate) token_kind: TokenKind,
    pub(crate) phase: Phase,
    pub(crate) containers: Vec<Container>,
    pub(crate) offset: u64,
    pub(crate) options: TokenizerOptions,
}

impl TokenizerState {
    /// The kind of the token that was current when the snapshot was taken.
    pub fn token_kind(&self) -> TokenKind {
        self.token_kind
    }

    /// Absolute byte offset of the consumed boundary.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Container nesting depth at the snapshot point.
    pub fn depth(&self) -> usize {
        self.containers.len()
    }
}
