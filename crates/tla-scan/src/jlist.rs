//! The junction-list layout engine.
//!
//! A junction list (jlist) is a vertically aligned sequence of conjuncts
//! `/\ …` or disjuncts `\/ …` whose bullets share a column; that column
//! delimits the list. The engine keeps a stack of the lists open at the
//! current position and decides, per token the lexer classifies, whether to
//! emit a synthetic `INDENT`, `NEWLINE`, or `DEDENT` token or to stay out of
//! the way.
//!
//! All three layout tokens are zero-width: the token end is marked before
//! the classified token is consumed, so the host re-lexes the token itself
//! after taking the layout action. In particular a single bullet can trigger
//! several `DEDENT`s across consecutive calls at the same cursor position;
//! termination comes from each `DEDENT` popping one record, not from cursor
//! progress.

use tracing::trace;

use crate::cursor::Cursor;
use crate::token::{ColumnIndex, TokenSet, TokenType};

/// Maximum number of nested junction lists. The serialized depth is a single
/// byte; an `INDENT` that would exceed this is declined.
pub const MAX_DEPTH: usize = u8::MAX as usize;

/// Whether a junction list is a conjunction or a disjunction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum JunctKind {
    /// Started by `/\` or `∧`.
    Conjunction = 0,
    /// Started by `\/` or `∨`.
    Disjunction = 1,
}

/// One open junction list: its kind and the column its bullets align on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JunctList {
    pub kind: JunctKind,
    pub alignment_column: ColumnIndex,
}

/// The nested junction lists at the current lexer position, innermost last.
///
/// Invariant: alignment columns are strictly increasing from bottom to top;
/// a nested list always starts to the right of its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JunctStack {
    lists: Vec<JunctList>,
}

impl JunctStack {
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.lists.len()
    }

    /// The open lists, outermost first.
    pub fn records(&self) -> &[JunctList] {
        &self.lists
    }

    pub(crate) fn from_records(lists: Vec<JunctList>) -> Self {
        JunctStack { lists }
    }

    /// Alignment column of the innermost list, or a negative sentinel when
    /// no list is open.
    pub fn current_column(&self) -> ColumnIndex {
        self.lists.last().map_or(-1, |list| list.alignment_column)
    }

    fn current_kind_is(&self, kind: JunctKind) -> bool {
        self.lists.last().is_some_and(|list| list.kind == kind)
    }

    fn emit_indent<C: Cursor>(
        &mut self,
        cursor: &mut C,
        kind: JunctKind,
        col: ColumnIndex,
    ) -> bool {
        if self.lists.len() >= MAX_DEPTH {
            trace!(col, "indent declined, list nesting limit reached");
            return false;
        }
        trace!(col, ?kind, depth = self.lists.len() + 1, "indent");
        cursor.set_result(TokenType::Indent);
        self.lists.push(JunctList {
            kind,
            alignment_column: col,
        });
        true
    }

    fn emit_newline<C: Cursor>(&self, cursor: &mut C) -> bool {
        trace!(col = self.current_column(), "newline");
        cursor.set_result(TokenType::Newline);
        true
    }

    pub(crate) fn emit_dedent<C: Cursor>(&mut self, cursor: &mut C) -> bool {
        debug_assert!(!self.lists.is_empty());
        cursor.set_result(TokenType::Dedent);
        self.lists.pop();
        trace!(depth = self.lists.len(), "dedent");
        true
    }

    /// Decides the layout action for a junct bullet of `kind` at `col`.
    ///
    /// Against the innermost open list there are five cases:
    /// 1. Bullet right of the list column, `INDENT` expected: a new nested
    ///    list opens here.
    /// 2. Bullet right of the list column, `INDENT` not expected: this is an
    ///    infix junct operator joining two expressions; the grammar only
    ///    looks for `INDENT` at the start of an expression.
    /// 3. Bullet on the list column, same kind: the next item of the list.
    /// 4. Bullet on the list column, other kind: the current list ends; the
    ///    bullet will be reconsidered once the stack shrinks.
    /// 5. Bullet left of the list column: the current list ends.
    pub fn on_junct<C: Cursor>(
        &mut self,
        cursor: &mut C,
        valid: TokenSet,
        kind: JunctKind,
        col: ColumnIndex,
    ) -> bool {
        let current = self.current_column();
        if current < col {
            if valid.contains(TokenType::Indent) {
                self.emit_indent(cursor, kind, col)
            } else {
                false
            }
        } else if current == col {
            if self.current_kind_is(kind) {
                debug_assert!(valid.contains(TokenType::Newline));
                self.emit_newline(cursor)
            } else {
                debug_assert!(valid.contains(TokenType::Dedent));
                self.emit_dedent(cursor)
            }
        } else {
            debug_assert!(valid.contains(TokenType::Dedent));
            self.emit_dedent(cursor)
        }
    }

    /// Decides the layout action for a right delimiter: `)`, `]`, `}`, `>>`,
    /// `〉`, `->`, `⟶`, `THEN`, `ELSE`, `IN`.
    ///
    /// A right delimiter whose matching left delimiter opened before the
    /// current list implies the list must close first. Right delimiters
    /// inside an expression within a list item are never presented here with
    /// `DEDENT` valid, so gating on the mask alone is sound.
    pub fn on_right_delimiter<C: Cursor>(
        &mut self,
        cursor: &mut C,
        valid: TokenSet,
        _col: ColumnIndex,
    ) -> bool {
        !self.is_empty() && valid.contains(TokenType::Dedent) && self.emit_dedent(cursor)
    }

    /// Decides the layout action for a token that unconditionally ends every
    /// enclosing list regardless of column: a new unit definition, a module
    /// or section terminator, or end of input.
    pub fn on_terminator<C: Cursor>(&mut self, cursor: &mut C, valid: TokenSet) -> bool {
        if self.is_empty() {
            return false;
        }
        debug_assert!(valid.contains(TokenType::Dedent));
        self.emit_dedent(cursor)
    }

    /// Decides the layout action for any other token.
    ///
    /// A non-junct token on or left of the list column ends the list, as in
    /// `IF /\ P … THEN R` where `THEN` outdents past the bullets. A token to
    /// the right is part of the current item's expression.
    pub fn on_other<C: Cursor>(
        &mut self,
        cursor: &mut C,
        valid: TokenSet,
        col: ColumnIndex,
    ) -> bool {
        if self.is_empty() || col > self.current_column() {
            return false;
        }
        debug_assert!(valid.contains(TokenType::Dedent));
        self.emit_dedent(cursor)
    }
}
