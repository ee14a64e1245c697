//! tla-scan - stateful scanner for the context-sensitive corners of TLA+
//!
//! A grammar-generated parser handles most of TLA+, but a handful of lexical
//! phenomena cannot be expressed as regular tokens and land here:
//!
//! - **Junction lists**: vertically aligned `/\` and `\/` bullet lists whose
//!   nesting is determined by column alignment. The scanner tracks a stack
//!   of alignment columns and emits synthetic `INDENT` / `NEWLINE` /
//!   `DEDENT` tokens around and between items.
//! - **Prefix-overloaded operators**: `=` vs `==` vs `====`, `-` vs `--` vs
//!   `->` vs `-+->` vs `----`, `>` vs `>=` vs `>>` vs `>>_`, resolved by a
//!   longest-match walk of the shared prefix tree.
//! - **Extramodular text** outside module envelopes and **block-comment
//!   interiors**, both delimited by lookahead the grammar must not consume.
//!
//! The host parser drives everything: each [`Scanner::scan`] call gets a
//! lookahead [`Cursor`] and the set of tokens the grammar would accept at
//! this position ([`TokenSet`]), and either emits one token or declines.
//! State snapshots via [`Scanner::serialize`] / [`Scanner::deserialize`]
//! let the host speculate and reparse incrementally.
//!
//! # Example
//!
//! ```
//! use tla_scan::{Scanner, StrCursor, TokenSet, TokenType};
//!
//! let mut scanner = Scanner::new();
//! let mut cursor = StrCursor::new("/\\ x = 1");
//!
//! // The grammar is at the start of an expression, so INDENT is valid.
//! let valid = TokenSet::EMPTY.with(TokenType::Indent);
//! assert!(scanner.scan(&mut cursor, valid));
//! assert_eq!(cursor.result(), Some(TokenType::Indent));
//! assert_eq!(scanner.depth(), 1);
//! ```

pub mod cursor;
pub mod error;
pub mod jlist;
mod lex;
mod scanner;
mod state;
mod text;
pub mod token;

pub use cursor::{is_whitespace, Cursor, StrCursor};
pub use error::StateError;
pub use jlist::{JunctKind, JunctList, JunctStack, MAX_DEPTH};
pub use scanner::Scanner;
pub use state::MAX_SERIALIZED_SIZE;
pub use token::{ColumnIndex, TokenSet, TokenType};
