// this_file: crates/core/src/tokenizer/mod.rs

//! Resumable forward-only UTF-8 JSON tokenizer.
//!
//! The tokenizer works over one contiguous byte window at a time. When a
//! window runs out mid-token, [`JsonTokenizer::read`] reports `Ok(false)`
//! without consuming anything; the caller snapshots [`TokenizerState`],
//! obtains a larger window that starts at the old consumed boundary, and
//! continues with [`JsonTokenizer::resume`]. This restart-on-larger-buffer
//! model is what lets the reader combinators suspend and resume across
//! chunk boundaries.

mod scan;
mod state;

pub use state::{TokenizerOptions, TokenizerState};
pub use state::TokenKind;

use crate::error::{types::msg, ReadError, Span};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use uuid::Uuid;

/// A forward-only JSON tokenizer over a single byte window.
///
/// Colons and commas are consumed as structural glue and never surface as
/// tokens; member names surface as [`TokenKind::PropertyName`]. The consumed
/// boundary only ever moves past complete tokens, so the unconsumed tail of
/// the window is exactly what must be retained across a refill.
#[derive(Debug, Clone)]
pub struct JsonTokenizer<'a> {
    data: &'a [u8],
    is_final: bool,
    options: TokenizerOptions,
    consumed: usize,
    token_kind: TokenKind,
    token_start: usize,
    token_end: usize,
    token_has_escapes: bool,
    phase: state::Phase,
    containers: Vec<state::Container>,
    base_offset: u64,
}

impl<'a> JsonTokenizer<'a> {
    /// Creates a tokenizer over a complete document (`is_final` set).
    pub fn new(data: &'a [u8], options: TokenizerOptions) -> Self {
        let state = TokenizerState {
            options,
            ..TokenizerState::default()
        };
        Self::resume(data, true, state)
    }

    /// Reconstructs a tokenizer from a new window and a saved state.
    ///
    /// The window must start at the consumed boundary the state was taken
    /// at. The saved current token keeps its kind but not its bytes; value
    /// getters are only valid for tokens read from the current window.
    pub fn resume(data: &'a [u8], is_final: bool, state: TokenizerState) -> Self {
        JsonTokenizer {
            data,
            is_final,
            options: state.options,
            consumed: 0,
            token_kind: state.token_kind,
            token_start: 0,
            token_end: 0,
            token_has_escapes: false,
            phase: state.phase,
            containers: state.containers,
            base_offset: state.offset,
        }
    }

    /// Snapshots the state needed to continue on a new window.
    pub fn current_state(&self) -> TokenizerState {
        TokenizerState {
            token_kind: self.token_kind,
            phase: self.phase,
            containers: self.containers.clone(),
            offset: self.base_offset + self.consumed as u64,
            options: self.options.clone(),
        }
    }

    /// The kind of the current token.
    pub fn token_kind(&self) -> TokenKind {
        self.token_kind
    }

    /// The current token's span, relative to the current window.
    pub fn token_span(&self) -> Span {
        Span::new(self.token_start, self.token_end)
    }

    /// Absolute byte offset of the current token's first byte.
    pub fn token_start_index(&self) -> u64 {
        self.base_offset + self.token_start as u64
    }

    /// Bytes of the current window consumed by completed tokens.
    pub fn bytes_consumed(&self) -> usize {
        self.consumed
    }

    /// Whether this window is the final block of the stream.
    pub fn is_final_block(&self) -> bool {
        self.is_final
    }

    /// Container nesting depth at the current token.
    pub fn current_depth(&self) -> usize {
        self.containers.len()
    }

    /// Raw bytes of the current token (including quotes for strings).
    fn token_bytes(&self) -> &'a [u8] {
        &self.data[self.token_start..self.token_end]
    }

    /// Raw value bytes of the current string token (between the quotes).
    fn string_value_bytes(&self) -> &'a [u8] {
        let bytes = self.token_bytes();
        &bytes[1..bytes.len() - 1]
    }

    /// Skips the current composite value; from a [`TokenKind::PropertyName`],
    /// skips the member's value.
    ///
    /// All-or-nothing: `Ok(false)` means the end of the value is not inside
    /// the window and the tokenizer was left unchanged, so the caller can
    /// retry after a refill.
    pub fn try_skip(&mut self) -> Result<bool, ReadError> {
        let mut probe = self.clone();
        if probe.token_kind == TokenKind::PropertyName && !probe.read()? {
            return Ok(false);
        }
        if matches!(
            probe.token_kind,
            TokenKind::StartObject | TokenKind::StartArray
        ) {
            let target = probe.containers.len() - 1;
            loop {
                if !probe.read()? {
                    return Ok(false);
                }
                if probe.containers.len() == target
                    && matches!(probe.token_kind, TokenKind::EndObject | TokenKind::EndArray)
                {
                    break;
                }
            }
        }
        *self = probe;
        Ok(true)
    }

    /// Like [`try_skip`](Self::try_skip), but treats an exhausted window as
    /// an error. Intended for final-block use.
    pub fn skip(&mut self) -> Result<(), ReadError> {
        if self.try_skip()? {
            Ok(())
        } else {
            Err(ReadError::from(format!(
                "Unexpected end of input at position {}",
                self.base_offset + self.data.len() as u64
            )))
        }
    }

    /// Checks whether the current value's last token lies inside the window,
    /// without moving the tokenizer.
    pub fn value_in_window(&self) -> Result<bool, ReadError> {
        self.clone().try_skip()
    }

    /// Whether the current token was read from this window. A resumed
    /// tokenizer keeps the previous token's kind but not its bytes.
    fn token_in_window(&self) -> bool {
        self.token_end > self.token_start
    }

    /// Decodes the current string or property-name token.
    pub fn get_string(&self) -> Result<String, ReadError> {
        if !matches!(self.token_kind, TokenKind::String | TokenKind::PropertyName)
            || !self.token_in_window()
        {
            return Err(ReadError::from(msg::STRING_EXPECTED));
        }
        let raw = self.string_value_bytes();
        if !self.token_has_escapes {
            return std::str::from_utf8(raw).map(str::to_owned).map_err(|_| {
                ReadError::from(format!(
                    "Invalid UTF-8 sequence at position {}",
                    self.token_start_index()
                ))
            });
        }
        scan::unescape(raw, self.token_start_index())
    }

    /// Compares the current string or property-name token against raw UTF-8
    /// without allocating in the escape-free case.
    pub fn value_text_equals(&self, utf8: &[u8]) -> bool {
        if !matches!(self.token_kind, TokenKind::String | TokenKind::PropertyName)
            || !self.token_in_window()
        {
            return false;
        }
        let raw = self.string_value_bytes();
        if !self.token_has_escapes {
            return raw == utf8;
        }
        match scan::unescape(raw, self.token_start_index()) {
            Ok(decoded) => decoded.as_bytes() == utf8,
            Err(_) => false,
        }
    }

    /// Decodes the current boolean token.
    pub fn get_bool(&self) -> Result<bool, ReadError> {
        match self.token_kind {
            TokenKind::True => Ok(true),
            TokenKind::False => Ok(false),
            _ => Err(ReadError::from(msg::BOOLEAN_EXPECTED)),
        }
    }

    fn number_text(&self) -> Option<&'a str> {
        if self.token_kind != TokenKind::Number || !self.token_in_window() {
            return None;
        }
        // Number tokens are pure ASCII by construction.
        std::str::from_utf8(self.token_bytes()).ok()
    }

    /// Decodes an ISO 8601-1 extended date-time without offset.
    pub fn get_date_time(&self) -> Result<NaiveDateTime, ReadError> {
        let text = self
            .get_string()
            .map_err(|_| ReadError::from(msg::DATE_TIME_EXPECTED))?;
        NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| DateTime::parse_from_rfc3339(&text).map(|dt| dt.naive_local()))
            .map_err(|_| ReadError::from(msg::DATE_TIME_EXPECTED))
    }

    /// Decodes a date-time in a caller-supplied chrono format string.
    pub fn get_date_time_with(&self, format: &str) -> Result<NaiveDateTime, ReadError> {
        let text = self
            .get_string()
            .map_err(|_| ReadError::from(msg::DATE_TIME_EXPECTED))?;
        NaiveDateTime::parse_from_str(&text, format)
            .map_err(|_| ReadError::from(msg::DATE_TIME_EXPECTED))
    }

    /// Decodes an ISO 8601-1 extended date-time with offset.
    pub fn get_date_time_offset(&self) -> Result<DateTime<FixedOffset>, ReadError> {
        let text = self
            .get_string()
            .map_err(|_| ReadError::from(msg::DATE_TIME_OFFSET_EXPECTED))?;
        DateTime::parse_from_rfc3339(&text)
            .map_err(|_| ReadError::from(msg::DATE_TIME_OFFSET_EXPECTED))
    }

    /// Decodes a GUID in the hyphen-separated 'D' format (8-4-4-4-12).
    pub fn get_guid(&self) -> Result<Uuid, ReadError> {
        let text = self
            .get_string()
            .map_err(|_| ReadError::from(msg::GUID_EXPECTED))?;
        let bytes = text.as_bytes();
        let d_form = bytes.len() == 36
            && bytes[8] == b'-'
            && bytes[13] == b'-'
            && bytes[18] == b'-'
            && bytes[23] == b'-';
        if !d_form {
            return Err(ReadError::from(msg::GUID_EXPECTED));
        }
        Uuid::try_parse(&text).map_err(|_| ReadError::from(msg::GUID_EXPECTED))
    }

    /// Captures the entire current JSON subtree as a DOM value.
    ///
    /// `Ok(None)` means the subtree's end is not inside the window; the
    /// tokenizer is unchanged so the caller can retry after a refill. On
    /// success the tokenizer is positioned on the subtree's last token.
    pub fn parse_value(&mut self) -> Result<Option<serde_json::Value>, ReadError> {
        let mut probe = self.clone();
        let value = match probe.build_value()? {
            Some(value) => value,
            None => return Ok(None),
        };
        *self = probe;
        Ok(Some(value))
    }

    fn scalar_value(&self) -> Result<serde_json::Value, ReadError> {
        match self.token_kind {
            TokenKind::Null => Ok(serde_json::Value::Null),
            TokenKind::True => Ok(serde_json::Value::Bool(true)),
            TokenKind::False => Ok(serde_json::Value::Bool(false)),
            TokenKind::String => Ok(serde_json::Value::String(self.get_string()?)),
            TokenKind::Number => {
                let text = self.number_text().ok_or(msg::VALUE_INVALID)?;
                let number = if let Ok(n) = text.parse::<i64>() {
                    Some(serde_json::Number::from(n))
                } else if let Ok(n) = text.parse::<u64>() {
                    Some(serde_json::Number::from(n))
                } else {
                    text.parse::<f64>().ok().and_then(serde_json::Number::from_f64)
                };
                number.map(serde_json::Value::Number).ok_or_else(|| {
                    ReadError::from(format!(
                        "Invalid number format at position {}",
                        self.token_start_index()
                    ))
                })
            }
            _ => Err(ReadError::from(msg::VALUE_INVALID)),
        }
    }

    /// Builds a DOM value from the current token onward with an explicit
    /// stack, consuming the subtree's tokens.
    fn build_value(&mut self) -> Result<Option<serde_json::Value>, ReadError> {
        use serde_json::Value;

        enum Level {
            Object(serde_json::Map<String, Value>, Option<String>),
            Array(Vec<Value>),
        }

        let mut stack: Vec<Level> = Vec::new();
        match self.token_kind {
            TokenKind::StartObject => stack.push(Level::Object(serde_json::Map::new(), None)),
            TokenKind::StartArray => stack.push(Level::Array(Vec::new())),
            _ => return self.scalar_value().map(Some),
        }

        loop {
            if !self.read()? {
                return Ok(None);
            }
            let completed = match self.token_kind {
                TokenKind::PropertyName => {
                    let name = self.get_string()?;
                    match stack.last_mut() {
                        Some(Level::Object(_, pending)) => *pending = Some(name),
                        _ => return Err(ReadError::from(msg::VALUE_INVALID)),
                    }
                    None
                }
                TokenKind::StartObject => {
                    stack.push(Level::Object(serde_json::Map::new(), None));
                    None
                }
                TokenKind::StartArray => {
                    stack.push(Level::Array(Vec::new()));
                    None
                }
                TokenKind::EndObject => match stack.pop() {
                    Some(Level::Object(map, _)) => Some(Value::Object(map)),
                    _ => return Err(ReadError::from(msg::VALUE_INVALID)),
                },
                TokenKind::EndArray => match stack.pop() {
                    Some(Level::Array(items)) => Some(Value::Array(items)),
                    _ => return Err(ReadError::from(msg::VALUE_INVALID)),
                },
                _ => Some(self.scalar_value()?),
            };

            if let Some(value) = completed {
                match stack.last_mut() {
                    None => return Ok(Some(value)),
                    Some(Level::Object(map, pending)) => {
                        match pending.take() {
                            Some(name) => {
                                // Last occurrence of a repeated name wins.
                                map.insert(name, value);
                            }
                            None => return Err(ReadError::from(msg::VALUE_INVALID)),
                        }
                    }
                    Some(Level::Array(items)) => items.push(value),
                }
            }
        }
    }
}

macro_rules! numeric_getters {
    ($($method:ident => $ty:ty, $name:literal;)+) => {
        impl<'a> JsonTokenizer<'a> {
            $(
                /// Decodes the current number token into the target type,
                /// rejecting values outside its range.
                pub fn $method(&self) -> Result<$ty, ReadError> {
                    const MESSAGE: &str = concat!(
                        "Invalid JSON value; expecting a JSON number compatible with ",
                        $name,
                        "."
                    );
                    self.number_text()
                        .and_then(|text| text.parse::<$ty>().ok())
                        .ok_or(ReadError::from(MESSAGE))
                }
            )+
        }
    };
}

numeric_getters! {
    get_u8 => u8, "Byte";
    get_i16 => i16, "Int16";
    get_i32 => i32, "Int32";
    get_i64 => i64, "Int64";
    get_u16 => u16, "UInt16";
    get_u32 => u32, "UInt32";
    get_u64 => u64, "UInt64";
}

macro_rules! float_getters {
    ($($method:ident => $ty:ty, $name:literal;)+) => {
        impl<'a> JsonTokenizer<'a> {
            $(
                /// Decodes the current number token into the target float
                /// type, rejecting values that overflow to infinity.
                pub fn $method(&self) -> Result<$ty, ReadError> {
                    const MESSAGE: &str = concat!(
                        "Invalid JSON value; expecting a JSON number compatible with ",
                        $name,
                        "."
                    );
                    self.number_text()
                        .and_then(|text| text.parse::<$ty>().ok())
                        .filter(|value| value.is_finite())
                        .ok_or(ReadError::from(MESSAGE))
                }
            )+
        }
    };
}

float_getters! {
    get_f32 => f32, "Single";
    get_f64 => f64, "Double";
}
