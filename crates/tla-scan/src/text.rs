//! Freeform-text scanners: extramodular text and block-comment interiors.
//!
//! Both exist because their end conditions are lookahead patterns the
//! grammar must not consume: extramodular text runs up to (but excluding)
//! the `----[-]*[ ]*MODULE` header of the next module, and block-comment
//! text runs up to (but excluding) the next `(*` or `*)`. Each marks the
//! token end before probing the pattern so a match never leaks into the
//! emitted span.

use crate::cursor::{advance_if_matches, consume_while, is_whitespace, Cursor};
use crate::token::TokenType;

/// Scans the freeform text that can appear outside of modules.
///
/// Leading whitespace is skipped so files beginning or ending with blank
/// lines produce no extraneous token. Returns whether any text was
/// consumed; on false the host falls back to the grammar, which will take
/// the module header itself.
pub(crate) fn scan_extramodular_text<C: Cursor>(cursor: &mut C) -> bool {
    cursor.set_result(TokenType::ExtramodularText);
    consume_while(cursor, true, is_whitespace);

    let mut consumed_any = false;
    while let Some(next) = cursor.peek() {
        if next == '-' {
            cursor.mark_end();
            if advance_if_matches(cursor, "----") {
                consume_while(cursor, false, |c| c == '-');
                consume_while(cursor, false, |c| c == ' ');
                if advance_if_matches(cursor, "MODULE") {
                    return consumed_any;
                }
                // A dash run that is not a module header is ordinary text.
                consumed_any = true;
            } else {
                consumed_any = true;
            }
        } else {
            cursor.advance(false);
            consumed_any = true;
        }
    }

    cursor.mark_end();
    consumed_any
}

/// Scans block-comment interior text, stopping before any `(*` or `*)` so
/// the grammar can track comment nesting.
///
/// Returning true with nothing consumed would loop the host forever, so an
/// immediate delimiter declines instead.
pub(crate) fn scan_block_comment_text<C: Cursor>(cursor: &mut C) -> bool {
    cursor.set_result(TokenType::BlockCommentText);

    let mut consumed_any = false;
    while let Some(next) = cursor.peek() {
        match next {
            '*' => {
                cursor.mark_end();
                if advance_if_matches(cursor, "*)") {
                    return consumed_any;
                }
                consumed_any = true;
            }
            '(' => {
                cursor.mark_end();
                if advance_if_matches(cursor, "(*") {
                    return consumed_any;
                }
                consumed_any = true;
            }
            _ => {
                cursor.advance(false);
                consumed_any = true;
            }
        }
    }

    cursor.mark_end();
    consumed_any
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::StrCursor;

    fn extramodular(input: &str) -> Option<usize> {
        let mut cursor = StrCursor::new(input);
        scan_extramodular_text(&mut cursor).then(|| cursor.token_end())
    }

    fn block_comment(input: &str) -> Option<usize> {
        let mut cursor = StrCursor::new(input);
        scan_block_comment_text(&mut cursor).then(|| cursor.token_end())
    }

    #[test]
    fn extramodular_stops_before_module_header() {
        // Token ends just before the first dash of the header.
        assert_eq!(extramodular("junk\n---- MODULE Foo"), Some(5));
        assert_eq!(extramodular("junk\n------   MODULE Foo"), Some(5));
        assert_eq!(extramodular("junk\n----MODULE Foo"), Some(5));
    }

    #[test]
    fn extramodular_declines_with_no_text() {
        assert_eq!(extramodular("---- MODULE Foo"), None);
        assert_eq!(extramodular("  \n\t---- MODULE Foo"), None);
        assert_eq!(extramodular(""), None);
        assert_eq!(extramodular("   \n  "), None);
    }

    #[test]
    fn extramodular_consumes_to_eof_without_header() {
        assert_eq!(extramodular("stray notes"), Some(11));
        // Dash runs without MODULE after them are plain text.
        assert_eq!(extramodular("a ---- b"), Some(8));
        assert_eq!(extramodular("a --b"), Some(5));
        assert_eq!(extramodular("--"), Some(2));
    }

    #[test]
    fn extramodular_keeps_interior_whitespace() {
        // Only leading whitespace is excluded from the span.
        assert_eq!(extramodular("  note one\nnote two"), Some(19));
    }

    #[test]
    fn block_comment_stops_before_nested_open() {
        assert_eq!(block_comment(" a (* nested"), Some(3));
    }

    #[test]
    fn block_comment_stops_before_close() {
        assert_eq!(block_comment(" a *)"), Some(3));
        assert_eq!(block_comment("ab*)cd"), Some(2));
    }

    #[test]
    fn block_comment_declines_on_immediate_delimiter() {
        assert_eq!(block_comment("*) rest"), None);
        assert_eq!(block_comment("(* rest"), None);
        assert_eq!(block_comment(""), None);
    }

    #[test]
    fn block_comment_passes_lone_stars_and_parens() {
        // `*` and `(` not forming a delimiter are interior text.
        assert_eq!(block_comment("a * b ( c *)"), Some(10));
        assert_eq!(block_comment("**(**"), Some(2));
    }

    #[test]
    fn block_comment_consumes_to_eof() {
        assert_eq!(block_comment("dangling comment"), Some(16));
        assert_eq!(block_comment("dangling *"), Some(10));
    }
}
