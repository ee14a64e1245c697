#![no_main]

use libfuzzer_sys::fuzz_target;
use tla_scan::{Cursor, Scanner, StrCursor, TokenSet, TokenType};

fuzz_target!(|data: &[u8]| {
    // The scanner should not panic on any input, whatever the host asks for.
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let masks = [
        TokenSet::of(&[TokenType::Indent, TokenType::Newline, TokenType::Dedent]),
        TokenSet::EMPTY.with(TokenType::ExtramodularText),
        TokenSet::EMPTY.with(TokenType::BlockCommentText),
        TokenSet::ALL,
        TokenSet::EMPTY,
    ];
    for mask in masks {
        let mut scanner = Scanner::new();
        let mut cursor = StrCursor::new(source);
        loop {
            let entry = cursor.position();
            let depth = scanner.depth();
            cursor.reset_token();
            if scanner.scan(&mut cursor, mask) {
                cursor.set_position(cursor.token_end());
            }
            // Stop once neither the cursor nor the stack makes progress.
            if cursor.position() == entry && scanner.depth() == depth {
                if cursor.peek().is_none() {
                    break;
                }
                cursor.advance(false);
            }
        }
    }
});
