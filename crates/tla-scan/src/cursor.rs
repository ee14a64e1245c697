//! The host lexer interface and lookahead primitives.
//!
//! The scanner never owns its input. The host parser hands it a [`Cursor`]
//! positioned at the next unconsumed codepoint; the scanner peeks, advances,
//! and marks the end of the token it wants to emit. Codepoints advanced past
//! with the whitespace tag are excluded from the emitted token's span.

use crate::token::{ColumnIndex, TokenType};

/// Whitespace is exactly space, tab, LF, and CR.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// The lookahead cursor provided by the host parser.
pub trait Cursor {
    /// The current codepoint, or `None` at end of input.
    fn peek(&self) -> Option<char>;

    /// Consumes the current codepoint. Whitespace-tagged codepoints are
    /// excluded from the span of the token eventually emitted.
    fn advance(&mut self, is_whitespace: bool);

    /// Records the current position as the end of the token to be emitted.
    /// May be called repeatedly; the last call wins.
    fn mark_end(&mut self);

    /// Column of the lookahead cursor on its line, 0-based.
    fn column(&self) -> ColumnIndex;

    /// Sets the token kind reported to the host for this call.
    fn set_result(&mut self, token: TokenType);
}

/// Consumes codepoints while `condition` holds or until end of input.
/// Returns the number of codepoints consumed.
pub(crate) fn consume_while<C: Cursor>(
    cursor: &mut C,
    as_whitespace: bool,
    condition: impl Fn(char) -> bool,
) -> usize {
    let mut consumed = 0;
    while cursor.peek().is_some_and(|c| condition(c)) {
        cursor.advance(as_whitespace);
        consumed += 1;
    }
    consumed
}

/// Consumes codepoints of `token` as long as they match the input.
///
/// Returns whether the whole token matched. The matched prefix stays
/// consumed either way; the caller is expected to have marked the token end
/// beforehand if the consumed codepoints must not leak into the span.
pub(crate) fn advance_if_matches<C: Cursor>(cursor: &mut C, token: &str) -> bool {
    for expected in token.chars() {
        if cursor.peek() != Some(expected) {
            return false;
        }
        cursor.advance(false);
    }
    true
}

/// An in-memory [`Cursor`] over a source string.
///
/// Stands in for the host lexer in tests, benchmarks, and fuzz targets. It
/// tracks the lookahead position, the marked token end, and the result
/// symbol the way a host would, and adds [`StrCursor::set_position`] so a
/// test harness can play the host's role of rewinding to the end of the
/// last emitted token.
#[derive(Debug, Clone)]
pub struct StrCursor {
    chars: Vec<char>,
    pos: usize,
    column: usize,
    token_end: usize,
    result: Option<TokenType>,
}

impl StrCursor {
    pub fn new(source: &str) -> Self {
        StrCursor {
            chars: source.chars().collect(),
            pos: 0,
            column: 0,
            token_end: 0,
            result: None,
        }
    }

    /// Current lookahead position, in codepoints from the start of input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Position recorded by the last `mark_end` call.
    pub fn token_end(&self) -> usize {
        self.token_end
    }

    /// Result symbol of the last scan, if any.
    pub fn result(&self) -> Option<TokenType> {
        self.result
    }

    pub fn is_eof(&self) -> bool {
        self.pos == self.chars.len()
    }

    /// Clears the result symbol and re-anchors the token end, as the host
    /// does before each scan call.
    pub fn reset_token(&mut self) {
        self.result = None;
        self.token_end = self.pos;
    }

    /// Moves the cursor to `position`, recomputing the column. Hosts do this
    /// to resume scanning from the end of the last token they accepted.
    pub fn set_position(&mut self, position: usize) {
        let position = position.min(self.chars.len());
        self.pos = position;
        let line_start = self.chars[..position]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
        self.column = position - line_start;
    }
}

impl Cursor for StrCursor {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self, _is_whitespace: bool) {
        if let Some(&c) = self.chars.get(self.pos) {
            self.pos += 1;
            if c == '\n' {
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }

    fn mark_end(&mut self) {
        self.token_end = self.pos;
    }

    fn column(&self) -> ColumnIndex {
        self.column.min(ColumnIndex::MAX as usize) as ColumnIndex
    }

    fn set_result(&mut self, token: TokenType) {
        self.result = Some(token);
    }
}
