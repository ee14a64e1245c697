//! The scanner instance and its `scan` driver.

use tracing::{trace, warn};

use crate::cursor::Cursor;
use crate::error::StateError;
use crate::jlist::JunctStack;
use crate::lex::lex;
use crate::state;
use crate::text::{scan_block_comment_text, scan_extramodular_text};
use crate::token::{TokenSet, TokenType};

/// A stateful scanner for the context-sensitive parts of TLA+.
///
/// One instance lives per parse session. Its only state is the junction-list
/// stack, which the host may snapshot and restore at any time through
/// [`Scanner::serialize`] and [`Scanner::deserialize`] to parse
/// speculatively or resume incrementally. For a fixed input and valid-token
/// sequence the emitted tokens are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scanner {
    jlists: JunctStack,
}

impl Scanner {
    /// A scanner with no open junction lists.
    pub fn new() -> Self {
        Scanner::default()
    }

    /// Number of currently open junction lists.
    pub fn depth(&self) -> usize {
        self.jlists.depth()
    }

    /// The open junction lists, outermost first.
    pub fn stack(&self) -> &JunctStack {
        &self.jlists
    }

    /// Writes the scanner state into `buffer`, returning the bytes written.
    ///
    /// Buffers of [`MAX_SERIALIZED_SIZE`](crate::MAX_SERIALIZED_SIZE) bytes
    /// always suffice.
    pub fn serialize(&self, buffer: &mut [u8]) -> Result<usize, StateError> {
        state::encode(&self.jlists, buffer)
    }

    /// Restores scanner state from `buffer`. An empty buffer restores the
    /// initial state. Hosts only feed back buffers produced by
    /// [`Scanner::serialize`]; anything else resets to the initial state
    /// rather than trusting a partial read.
    pub fn deserialize(&mut self, buffer: &[u8]) {
        match state::decode(buffer) {
            Some(stack) => self.jlists = stack,
            None => {
                warn!(len = buffer.len(), "malformed scanner state, resetting");
                self.jlists = JunctStack::default();
            }
        }
    }

    /// Produces at most one token at the cursor.
    ///
    /// On true, the cursor's result symbol and marked end delimit the token.
    /// On false the scanner produced nothing and the host falls back to its
    /// grammar rules.
    pub fn scan<C: Cursor>(&mut self, cursor: &mut C, valid: TokenSet) -> bool {
        if valid.is_error_recovery() {
            // The host is recovering; shed one list per call until the
            // grammar can terminate.
            trace!(depth = self.jlists.depth(), "scan: error recovery");
            if self.jlists.is_empty() {
                return false;
            }
            cursor.mark_end();
            return self.jlists.emit_dedent(cursor);
        }

        // The text tokens are only valid in grammar states where nothing
        // else of ours is, so the dispatch order is immaterial.
        if valid.contains(TokenType::ExtramodularText) {
            trace!("scan: extramodular text");
            return scan_extramodular_text(cursor);
        }
        if valid.contains(TokenType::BlockCommentText) {
            trace!("scan: block comment text");
            return scan_block_comment_text(cursor);
        }

        lex(cursor, valid, &mut self.jlists)
    }
}
