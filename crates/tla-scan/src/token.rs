//! Token kinds emitted by the scanner and the host's valid-symbol mask.

/// Column index of the lookahead cursor on its line, 0-based.
///
/// Negative values are the "not in a junction list" sentinel.
pub type ColumnIndex = i16;

/// Tokens this scanner can emit.
///
/// The discriminants match the order in which the host grammar declares its
/// external tokens, so a host-side symbol array indexes directly into this
/// enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenType {
    /// Freeform text between modules.
    ExtramodularText = 0,
    /// Text inside block comments.
    BlockCommentText,
    /// The `>` infix operator.
    GtOp,
    /// The `>=` infix operator.
    AsciiGeqOp,
    /// The `>>` or `〉` delimiter.
    RAngleBracket,
    /// The `>>_` or `〉_` delimiter.
    RAngleBracketSub,
    /// The `=` infix operator.
    EqOp,
    /// The `==` definition-equals token.
    AsciiDefEq,
    /// The `=>` implies operator.
    AsciiImpliesOp,
    /// The `=<` equal-to-or-less-than operator.
    AsciiEqltOp,
    /// The `=|` left-double-turnstile operator.
    AsciiLdttOp,
    /// The `====[=]*` token ending a module.
    DoubleLine,
    /// The `-` infix or prefix operator.
    Dash,
    /// The `--` infix operator.
    MinusMinusOp,
    /// The `-+->` infix operator.
    AsciiPlusArrowOp,
    /// The `-|` infix operator.
    AsciiLsttOp,
    /// The `->` construct.
    RArrow,
    /// The `----[-]*` line separator token.
    SingleLine,
    /// Marks the beginning of a junction list.
    Indent,
    /// Separates items of a junction list.
    Newline,
    /// Marks the end of a junction list.
    Dedent,
}

impl TokenType {
    /// Number of token kinds.
    pub const COUNT: usize = 21;
}

/// The set of tokens the host considers valid at the current position.
///
/// This mask is the only channel by which the grammar informs the scanner of
/// context; the scanner never tries to reconstruct that context itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenSet(u32);

impl TokenSet {
    /// No tokens valid.
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Every token valid.
    pub const ALL: TokenSet = TokenSet((1u32 << TokenType::COUNT) - 1);

    /// Adds a token to the set.
    pub const fn with(self, token: TokenType) -> TokenSet {
        TokenSet(self.0 | (1 << token as u32))
    }

    /// Whether the set contains the given token.
    pub const fn contains(self, token: TokenType) -> bool {
        self.0 & (1 << token as u32) != 0
    }

    /// Builds a set from a slice of tokens.
    pub fn of(tokens: &[TokenType]) -> TokenSet {
        tokens.iter().fold(TokenSet::EMPTY, |set, &t| set.with(t))
    }

    /// Whether the host is in error recovery.
    ///
    /// Hosts signal recovery by marking every scanner token valid at once, a
    /// combination that never occurs during a normal parse.
    pub const fn is_error_recovery(self) -> bool {
        self.0 == TokenSet::ALL.0
    }
}
