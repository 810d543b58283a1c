// this_file: crates/core/src/tokenizer/scan.rs

//! Scanning engine for the resumable tokenizer.
//!
//! All scanning is speculative until a token is complete: nothing in the
//! tokenizer (consumed boundary, phase, container stack) mutates on an
//! exhausted window, so a caller can retry the same read on a larger window
//! that starts at the old consumed boundary.

use super::state::{Container, Phase, TokenKind};
use super::JsonTokenizer;
use crate::error::ReadError;

/// Outcome of scanning one variable-length token.
enum Scan {
    /// Token complete; end position (exclusive) within the window.
    Complete(usize),
    /// Window exhausted before the token ended.
    NeedMore,
}

impl<'a> JsonTokenizer<'a> {
    /// Advances to the next token.
    ///
    /// `Ok(false)` means the window ran out before a complete token was
    /// available; the tokenizer is unchanged and the caller should retry on
    /// a larger window. With `is_final` set, `Ok(false)` only occurs at the
    /// top level after complete values; exhaustion anywhere else is an error.
    pub fn read(&mut self) -> Result<bool, ReadError> {
        let mut pos = self.consumed;
        let mut phase = self.phase;
        loop {
            pos = self.skip_whitespace(pos);

            if self.options.allow_comments
                && pos < self.data.len()
                && (self.data[pos] == b'/' || self.data[pos] == b'#')
            {
                match self.scan_comment(pos)? {
                    Scan::Complete(end) => {
                        pos = end;
                        continue;
                    }
                    Scan::NeedMore => return self.exhausted(pos),
                }
            }

            if pos == self.data.len() {
                return if !self.is_final
                    || (self.containers.is_empty() && phase == Phase::ExpectValue)
                {
                    Ok(false)
                } else {
                    Err(self.end_of_input_error())
                };
            }

            let b = self.data[pos];
            match phase {
                Phase::ExpectColon => {
                    if b == b':' {
                        pos += 1;
                        phase = Phase::ExpectValue;
                    } else {
                        return Err(self.unexpected_char(b, pos));
                    }
                }
                Phase::ExpectCommaOrEnd => match b {
                    b',' => {
                        pos += 1;
                        phase = match self.containers.last() {
                            Some(Container::Object) => Phase::ExpectName,
                            Some(Container::Array) => Phase::ExpectValue,
                            None => return Err(self.unexpected_char(b, pos - 1)),
                        };
                    }
                    b'}' => return self.commit_end(Container::Object, pos),
                    b']' => return self.commit_end(Container::Array, pos),
                    _ => return Err(self.unexpected_char(b, pos)),
                },
                Phase::ExpectName | Phase::ExpectNameOrEnd => match b {
                    b'"' => return self.commit_name(pos),
                    b'}' if phase == Phase::ExpectNameOrEnd => {
                        return self.commit_end(Container::Object, pos)
                    }
                    _ => return Err(self.unexpected_char(b, pos)),
                },
                Phase::ExpectValue | Phase::ExpectValueOrEnd => match b {
                    b']' if phase == Phase::ExpectValueOrEnd => {
                        return self.commit_end(Container::Array, pos)
                    }
                    b'{' => return self.commit_start(Container::Object, pos),
                    b'[' => return self.commit_start(Container::Array, pos),
                    b'"' => return self.commit_string(pos, phase),
                    b't' => return self.commit_literal(pos, phase, b"true", TokenKind::True),
                    b'f' => return self.commit_literal(pos, phase, b"false", TokenKind::False),
                    b'n' => return self.commit_literal(pos, phase, b"null", TokenKind::Null),
                    b'-' | b'0'..=b'9' => return self.commit_number(pos, phase),
                    _ => return Err(self.unexpected_char(b, pos)),
                },
            }
        }
    }

    fn skip_whitespace(&self, mut pos: usize) -> usize {
        while pos < self.data.len() && matches!(self.data[pos], b' ' | b'\t' | b'\r' | b'\n') {
            pos += 1;
        }
        pos
    }

    /// Outcome for a window exhausted mid-token.
    fn exhausted(&self, _pos: usize) -> Result<bool, ReadError> {
        if self.is_final {
            Err(self.end_of_input_error())
        } else {
            Ok(false)
        }
    }

    fn end_of_input_error(&self) -> ReadError {
        ReadError::from(format!(
            "Unexpected end of input at position {}",
            self.base_offset + self.data.len() as u64
        ))
    }

    fn unexpected_char(&self, b: u8, pos: usize) -> ReadError {
        ReadError::from(format!(
            "Unexpected character '{}' at position {}",
            char::from(b),
            self.base_offset + pos as u64
        ))
    }

    /// Commits a completed token and the phase that follows it.
    fn commit(&mut self, kind: TokenKind, start: usize, end: usize, phase: Phase) {
        self.token_kind = kind;
        self.token_start = start;
        self.token_end = end;
        self.consumed = end;
        self.phase = phase;
    }

    /// The phase after a complete value at the current depth.
    fn after_value(&self) -> Phase {
        if self.containers.is_empty() {
            Phase::ExpectValue
        } else {
            Phase::ExpectCommaOrEnd
        }
    }

    fn commit_start(&mut self, container: Container, pos: usize) -> Result<bool, ReadError> {
        if self.containers.len() >= self.options.max_depth {
            return Err(ReadError::from(format!(
                "Depth limit exceeded at position {}",
                self.base_offset + pos as u64
            )));
        }
        self.containers.push(container);
        let (kind, phase) = match container {
            Container::Object => (TokenKind::StartObject, Phase::ExpectNameOrEnd),
            Container::Array => (TokenKind::StartArray, Phase::ExpectValueOrEnd),
        };
        self.commit(kind, pos, pos + 1, phase);
        Ok(true)
    }

    fn commit_end(&mut self, container: Container, pos: usize) -> Result<bool, ReadError> {
        if self.containers.last() != Some(&container) {
            return Err(self.unexpected_char(self.data[pos], pos));
        }
        self.containers.pop();
        let kind = match container {
            Container::Object => TokenKind::EndObject,
            Container::Array => TokenKind::EndArray,
        };
        let phase = self.after_value();
        self.commit(kind, pos, pos + 1, phase);
        Ok(true)
    }

    fn commit_name(&mut self, pos: usize) -> Result<bool, ReadError> {
        match self.scan_string(pos)? {
            Scan::Complete(end) => {
                self.commit(TokenKind::PropertyName, pos, end, Phase::ExpectColon);
                Ok(true)
            }
            Scan::NeedMore => self.exhausted(pos),
        }
    }

    fn commit_string(&mut self, pos: usize, _phase: Phase) -> Result<bool, ReadError> {
        match self.scan_string(pos)? {
            Scan::Complete(end) => {
                let phase = self.after_value();
                self.commit(TokenKind::String, pos, end, phase);
                Ok(true)
            }
            Scan::NeedMore => self.exhausted(pos),
        }
    }

    fn commit_literal(
        &mut self,
        pos: usize,
        _phase: Phase,
        literal: &'static [u8],
        kind: TokenKind,
    ) -> Result<bool, ReadError> {
        let available = &self.data[pos..];
        if available.len() < literal.len() {
            return if literal.starts_with(available) {
                self.exhausted(pos)
            } else {
                Err(self.unexpected_char(self.data[pos], pos))
            };
        }
        if &available[..literal.len()] != literal {
            return Err(self.unexpected_char(self.data[pos], pos));
        }
        let end = pos + literal.len();
        if !self.is_delimited(end) {
            return Err(self.unexpected_char(self.data[end], end));
        }
        let phase = self.after_value();
        self.commit(kind, pos, end, phase);
        Ok(true)
    }

    /// A value token must be followed by whitespace, structural glue, a
    /// closing token, a comment, or the end of the window.
    fn is_delimited(&self, pos: usize) -> bool {
        match self.data.get(pos) {
            None => true,
            Some(b) => {
                matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b',' | b']' | b'}')
                    || (self.options.allow_comments && matches!(b, b'/' | b'#'))
            }
        }
    }

    fn commit_number(&mut self, pos: usize, _phase: Phase) -> Result<bool, ReadError> {
        match self.scan_number(pos)? {
            Scan::Complete(end) => {
                let phase = self.after_value();
                self.commit(TokenKind::Number, pos, end, phase);
                Ok(true)
            }
            Scan::NeedMore => self.exhausted(pos),
        }
    }

    /// Scans a string token starting at the opening quote. Records whether
    /// escapes were seen so value access can take the no-copy path.
    fn scan_string(&mut self, pos: usize) -> Result<Scan, ReadError> {
        let mut i = pos + 1;
        let mut has_escapes = false;
        loop {
            if i >= self.data.len() {
                if self.is_final {
                    return Err(ReadError::from(format!(
                        "Unterminated string starting at position {}",
                        self.base_offset + pos as u64
                    )));
                }
                return Ok(Scan::NeedMore);
            }
            match self.data[i] {
                b'"' => {
                    self.token_has_escapes = has_escapes;
                    return Ok(Scan::Complete(i + 1));
                }
                b'\\' => {
                    has_escapes = true;
                    i += 2;
                }
                b if b < 0x20 => {
                    return Err(ReadError::from(format!(
                        "Invalid control character in string at position {}",
                        self.base_offset + i as u64
                    )));
                }
                _ => i += 1,
            }
        }
    }

    fn scan_number(&mut self, pos: usize) -> Result<Scan, ReadError> {
        let invalid = |at: usize| {
            ReadError::from(format!(
                "Invalid number format at position {}",
                self.base_offset + at as u64
            ))
        };
        let data = self.data;
        let mut i = pos;
        if data.get(i) == Some(&b'-') {
            i += 1;
        }
        // Integer part: '0' alone or a nonzero digit run.
        match data.get(i) {
            None => return self.need_number_end(pos, i, false),
            Some(b'0') => i += 1,
            Some(b'1'..=b'9') => {
                while matches!(data.get(i), Some(b'0'..=b'9')) {
                    i += 1;
                }
            }
            Some(_) => return Err(invalid(pos)),
        }
        if data.get(i) == Some(&b'0') || matches!(data.get(i), Some(b'1'..=b'9')) {
            // Leading zero followed by more digits.
            return Err(invalid(pos));
        }
        if data.get(i) == Some(&b'.') {
            i += 1;
            match data.get(i) {
                None => return self.need_number_end(pos, i, true),
                Some(b'0'..=b'9') => {
                    while matches!(data.get(i), Some(b'0'..=b'9')) {
                        i += 1;
                    }
                }
                Some(_) => return Err(invalid(pos)),
            }
        }
        if matches!(data.get(i), Some(b'e') | Some(b'E')) {
            i += 1;
            if matches!(data.get(i), Some(b'+') | Some(b'-')) {
                i += 1;
            }
            match data.get(i) {
                None => return self.need_number_end(pos, i, true),
                Some(b'0'..=b'9') => {
                    while matches!(data.get(i), Some(b'0'..=b'9')) {
                        i += 1;
                    }
                }
                Some(_) => return Err(invalid(pos)),
            }
        }
        if i >= data.len() && !self.is_final {
            // A number at the window edge may continue in the next chunk.
            return Ok(Scan::NeedMore);
        }
        if !self.is_delimited(i) {
            return Err(invalid(pos));
        }
        Ok(Scan::Complete(i))
    }

    /// The window ended inside a number. On a final block the prefix must be
    /// a complete number on its own; `dangling` marks a trailing '.', 'e' or
    /// sign that still requires digits.
    fn need_number_end(&self, pos: usize, end: usize, dangling: bool) -> Result<Scan, ReadError> {
        if !self.is_final {
            return Ok(Scan::NeedMore);
        }
        if dangling || end == pos || (end == pos + 1 && self.data[pos] == b'-') {
            return Err(ReadError::from(format!(
                "Invalid number format at position {}",
                self.base_offset + pos as u64
            )));
        }
        Ok(Scan::Complete(end))
    }

    fn scan_comment(&mut self, pos: usize) -> Result<Scan, ReadError> {
        if self.data[pos] == b'#' {
            return Ok(self.scan_line_comment(pos + 1));
        }
        match self.data.get(pos + 1) {
            None => {
                if self.is_final {
                    Err(self.unexpected_char(b'/', pos))
                } else {
                    Ok(Scan::NeedMore)
                }
            }
            Some(b'/') => Ok(self.scan_line_comment(pos + 2)),
            Some(b'*') => {
                let mut i = pos + 2;
                while i + 1 < self.data.len() {
                    if self.data[i] == b'*' && self.data[i + 1] == b'/' {
                        return Ok(Scan::Complete(i + 2));
                    }
                    i += 1;
                }
                if self.is_final {
                    Err(ReadError::from(format!(
                        "Unterminated comment at position {}",
                        self.base_offset + pos as u64
                    )))
                } else {
                    Ok(Scan::NeedMore)
                }
            }
            Some(_) => Err(self.unexpected_char(b'/', pos)),
        }
    }

    fn scan_line_comment(&self, mut i: usize) -> Scan {
        while i < self.data.len() {
            if self.data[i] == b'\n' {
                return Scan::Complete(i + 1);
            }
            i += 1;
        }
        if self.is_final {
            Scan::Complete(i)
        } else {
            Scan::NeedMore
        }
    }
}

/// Decodes the escaped content of a string token into UTF-8.
///
/// `raw` is the token's value bytes (between the quotes). Surrogate pairs in
/// `\u` escapes are combined per the JSON string rules.
pub(super) fn unescape(raw: &[u8], position: u64) -> Result<String, ReadError> {
    let invalid_escape =
        || ReadError::from(format!("Invalid string escape sequence at position {position}"));
    let invalid_unicode =
        || ReadError::from(format!("Invalid Unicode escape at position {position}"));

    let mut out: Vec<u8> = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let b = raw[i];
        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }
        i += 1;
        match raw.get(i) {
            Some(b'"') => out.push(b'"'),
            Some(b'\\') => out.push(b'\\'),
            Some(b'/') => out.push(b'/'),
            Some(b'b') => out.push(0x08),
            Some(b'f') => out.push(0x0C),
            Some(b'n') => out.push(b'\n'),
            Some(b'r') => out.push(b'\r'),
            Some(b't') => out.push(b'\t'),
            Some(b'u') => {
                let code = read_hex4(raw, i + 1).ok_or_else(invalid_unicode)?;
                i += 4;
                let ch = match code {
                    0xD800..=0xDBFF => {
                        // High surrogate; a low surrogate escape must follow.
                        if raw.get(i + 1) != Some(&b'\\') || raw.get(i + 2) != Some(&b'u') {
                            return Err(invalid_unicode());
                        }
                        let low = read_hex4(raw, i + 3).ok_or_else(invalid_unicode)?;
                        if !(0xDC00..=0xDFFF).contains(&low) {
                            return Err(invalid_unicode());
                        }
                        i += 6;
                        let combined =
                            0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                        char::from_u32(combined).ok_or_else(invalid_unicode)?
                    }
                    0xDC00..=0xDFFF => return Err(invalid_unicode()),
                    _ => char::from_u32(code).ok_or_else(invalid_unicode)?,
                };
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            _ => return Err(invalid_escape()),
        }
        i += 1;
    }
    String::from_utf8(out)
        .map_err(|_| ReadError::from(format!("Invalid UTF-8 sequence at position {position}")))
}

fn read_hex4(raw: &[u8], at: usize) -> Option<u32> {
    if at + 4 > raw.len() {
        return None;
    }
    let mut code: u32 = 0;
    for &b in &raw[at..at + 4] {
        let digit = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'a'..=b'f' => u32::from(b - b'a' + 10),
            b'A'..=b'F' => u32::from(b - b'A' + 10),
            _ => return None,
        };
        code = code << 4 | digit;
    }
    Some(code)
}
