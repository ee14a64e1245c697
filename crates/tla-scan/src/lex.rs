//! Longest-match recognition of the prefix-overloaded operator set.
//!
//! TLA+ overloads token prefixes past what a grammar-level tokenizer can
//! untangle: `=` begins `==`, `=<`, `=>`, `=|`, and the `====` module
//! terminator; `-` begins `--`, `->`, `-|`, `-+->`, and the `----` section
//! separator; `>` begins `>=`, `>>`, and `>>_`. The machine here walks the
//! prefix tree one codepoint at a time and accepts the longest fully-matched
//! token, re-marking the token end at each accepting state.
//!
//! The same walk doubles as the junction-list engine's classifier. At the
//! states where a token's layout shape is known (a bullet, a right
//! delimiter, a terminator run, or anything else) the engine is consulted
//! with the token's start column; if it emits a layout token the walk stops
//! there, otherwise the machine falls through to its own operator token.

use crate::cursor::{consume_while, is_whitespace, Cursor};
use crate::jlist::{JunctKind, JunctStack};
use crate::token::{ColumnIndex, TokenSet, TokenType};

/// Layout category of a classified keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeywordCategory {
    /// Starts a new top-level unit; unconditionally ends open jlists.
    Unit,
    /// Closes a construct opened before the current jlist.
    RightDelimiter,
}

/// Keywords the scanner classifies for layout decisions. The keywords
/// themselves are grammar tokens; only the layout action is ours.
const KEYWORDS: &[(&str, KeywordCategory)] = &[
    ("ASSUME", KeywordCategory::Unit),
    ("ASSUMPTION", KeywordCategory::Unit),
    ("AXIOM", KeywordCategory::Unit),
    ("CONSTANT", KeywordCategory::Unit),
    ("CONSTANTS", KeywordCategory::Unit),
    ("COROLLARY", KeywordCategory::Unit),
    ("ELSE", KeywordCategory::RightDelimiter),
    ("IN", KeywordCategory::RightDelimiter),
    ("LEMMA", KeywordCategory::Unit),
    ("LOCAL", KeywordCategory::Unit),
    ("PROPOSITION", KeywordCategory::Unit),
    ("THEN", KeywordCategory::RightDelimiter),
    ("THEOREM", KeywordCategory::Unit),
    ("VARIABLE", KeywordCategory::Unit),
    ("VARIABLES", KeywordCategory::Unit),
];

/// Accepts `token` at the current position. Later, longer accepts overwrite
/// earlier ones.
fn accept<C: Cursor>(cursor: &mut C, token: TokenType) -> bool {
    cursor.set_result(token);
    cursor.mark_end();
    true
}

/// Runs the machine at the cursor. Returns whether a token was emitted; on
/// false the consumed lookahead carries no token and the host discards it.
pub(crate) fn lex<C: Cursor>(cursor: &mut C, valid: TokenSet, stack: &mut JunctStack) -> bool {
    consume_while(cursor, true, is_whitespace);
    cursor.mark_end();
    let Some(first) = cursor.peek() else {
        // End of input unconditionally ends every open jlist.
        return stack.on_terminator(cursor, valid);
    };
    let col = cursor.column();

    match first {
        '/' => {
            cursor.advance(false);
            if cursor.peek() == Some('\\') {
                cursor.advance(false);
                stack.on_junct(cursor, valid, JunctKind::Conjunction, col)
            } else {
                stack.on_other(cursor, valid, col)
            }
        }
        '\\' => {
            cursor.advance(false);
            match cursor.peek() {
                Some('/') => {
                    cursor.advance(false);
                    stack.on_junct(cursor, valid, JunctKind::Disjunction, col)
                }
                // A line comment; the grammar owns it.
                Some('*') => false,
                _ => stack.on_other(cursor, valid, col),
            }
        }
        '∧' => {
            cursor.advance(false);
            stack.on_junct(cursor, valid, JunctKind::Conjunction, col)
        }
        '∨' => {
            cursor.advance(false);
            stack.on_junct(cursor, valid, JunctKind::Disjunction, col)
        }
        ')' | ']' | '}' => {
            cursor.advance(false);
            stack.on_right_delimiter(cursor, valid, col)
        }
        // The CASE arrow closes the expression before it, like `->` below,
        // but the grammar owns the token itself.
        '⟶' => {
            cursor.advance(false);
            stack.on_right_delimiter(cursor, valid, col)
        }
        '〉' => {
            cursor.advance(false);
            right_angle_bracket(cursor, valid, stack, col)
        }
        '>' => {
            cursor.advance(false);
            if cursor.peek() == Some('>') {
                cursor.advance(false);
                right_angle_bracket(cursor, valid, stack, col)
            } else {
                accept(cursor, TokenType::GtOp);
                if cursor.peek() == Some('=') {
                    cursor.advance(false);
                    accept(cursor, TokenType::AsciiGeqOp);
                }
                true
            }
        }
        '=' => {
            cursor.advance(false);
            eq(cursor, valid, stack, col)
        }
        '-' => {
            cursor.advance(false);
            dash(cursor, valid, stack, col)
        }
        '(' => {
            cursor.advance(false);
            if cursor.peek() == Some('*') {
                // A block comment opener; the grammar owns it.
                false
            } else {
                stack.on_other(cursor, valid, col)
            }
        }
        'A' | 'C' | 'E' | 'I' | 'L' | 'P' | 'T' | 'V' => {
            match keyword_lookahead(cursor) {
                Some(KeywordCategory::Unit) => stack.on_terminator(cursor, valid),
                Some(KeywordCategory::RightDelimiter) => {
                    stack.on_right_delimiter(cursor, valid, col)
                }
                None => stack.on_other(cursor, valid, col),
            }
        }
        _ => stack.on_other(cursor, valid, col),
    }
}

/// `>>` or `〉` consumed: a tuple close, optionally subscripted.
fn right_angle_bracket<C: Cursor>(
    cursor: &mut C,
    valid: TokenSet,
    stack: &mut JunctStack,
    col: ColumnIndex,
) -> bool {
    if stack.on_right_delimiter(cursor, valid, col) {
        return true;
    }
    accept(cursor, TokenType::RAngleBracket);
    if cursor.peek() == Some('_') {
        cursor.advance(false);
        accept(cursor, TokenType::RAngleBracketSub);
    }
    true
}

/// One `=` consumed.
fn eq<C: Cursor>(cursor: &mut C, valid: TokenSet, stack: &mut JunctStack, col: ColumnIndex) -> bool {
    if stack.on_other(cursor, valid, col) {
        return true;
    }
    match cursor.peek() {
        Some('=') => {
            cursor.advance(false);
            if cursor.peek() != Some('=') {
                return accept(cursor, TokenType::AsciiDefEq);
            }
            cursor.advance(false);
            if cursor.peek() != Some('=') {
                // Exactly three `=` accepts nothing.
                return false;
            }
            cursor.advance(false);
            eq_run(cursor, valid, stack)
        }
        Some('<') => {
            cursor.advance(false);
            accept(cursor, TokenType::AsciiEqltOp)
        }
        Some('>') => {
            cursor.advance(false);
            accept(cursor, TokenType::AsciiImpliesOp)
        }
        Some('|') => {
            cursor.advance(false);
            accept(cursor, TokenType::AsciiLdttOp)
        }
        _ => accept(cursor, TokenType::EqOp),
    }
}

/// Four or more `=` consumed: the module-end run.
fn eq_run<C: Cursor>(cursor: &mut C, valid: TokenSet, stack: &mut JunctStack) -> bool {
    loop {
        if stack.on_terminator(cursor, valid) {
            return true;
        }
        accept(cursor, TokenType::DoubleLine);
        if cursor.peek() == Some('=') {
            cursor.advance(false);
        } else {
            return true;
        }
    }
}

/// One `-` consumed.
fn dash<C: Cursor>(
    cursor: &mut C,
    valid: TokenSet,
    stack: &mut JunctStack,
    col: ColumnIndex,
) -> bool {
    if stack.on_other(cursor, valid, col) {
        return true;
    }
    match cursor.peek() {
        Some('-') => {
            cursor.advance(false);
            if cursor.peek() != Some('-') {
                return accept(cursor, TokenType::MinusMinusOp);
            }
            cursor.advance(false);
            if cursor.peek() != Some('-') {
                // Exactly three `-` accepts nothing.
                return false;
            }
            cursor.advance(false);
            dash_run(cursor, valid, stack)
        }
        Some('>') => {
            cursor.advance(false);
            if stack.on_right_delimiter(cursor, valid, col) {
                return true;
            }
            accept(cursor, TokenType::RArrow)
        }
        Some('|') => {
            cursor.advance(false);
            accept(cursor, TokenType::AsciiLsttOp)
        }
        Some('+') => {
            cursor.advance(false);
            if cursor.peek() != Some('-') {
                return false;
            }
            cursor.advance(false);
            if cursor.peek() != Some('>') {
                return false;
            }
            cursor.advance(false);
            accept(cursor, TokenType::AsciiPlusArrowOp)
        }
        _ => accept(cursor, TokenType::Dash),
    }
}

/// Four or more `-` consumed: the section-separator run.
fn dash_run<C: Cursor>(cursor: &mut C, valid: TokenSet, stack: &mut JunctStack) -> bool {
    loop {
        if stack.on_terminator(cursor, valid) {
            return true;
        }
        accept(cursor, TokenType::SingleLine);
        if cursor.peek() == Some('-') {
            cursor.advance(false);
        } else {
            return true;
        }
    }
}

/// Matches all keyword candidates simultaneously, consuming input while any
/// remains undecided. Returns the category of the longest full match, if any.
/// The consumed codepoints never carry a token, so over-consumption on a
/// failed match is discarded by the host.
fn keyword_lookahead<C: Cursor>(cursor: &mut C) -> Option<KeywordCategory> {
    let mut decided = [false; KEYWORDS.len()];
    let mut best: Option<(usize, KeywordCategory)> = None;
    let mut pos = 0;
    loop {
        let Some(next) = cursor.peek() else {
            break;
        };
        let mut any_undecided = false;
        for (i, (word, category)) in KEYWORDS.iter().enumerate() {
            if decided[i] {
                continue;
            }
            let bytes = word.as_bytes();
            if next.is_ascii() && bytes.get(pos) == Some(&(next as u8)) {
                if pos + 1 == bytes.len() {
                    decided[i] = true;
                    if best.map_or(true, |(len, _)| bytes.len() > len) {
                        best = Some((bytes.len(), *category));
                    }
                } else {
                    any_undecided = true;
                }
            } else {
                decided[i] = true;
            }
        }
        if !any_undecided {
            break;
        }
        cursor.advance(false);
        pos += 1;
    }
    best.map(|(_, category)| category)
}
