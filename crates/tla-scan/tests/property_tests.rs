//! Property-based tests for the scanner invariants.
//!
//! These check the contracts the host parser depends on: state snapshots
//! round-trip exactly, the junction stack stays strictly monotone, layout
//! tokens stay balanced over whole inputs, the operator machine is
//! longest-match, and no accepted token ever leaves the cursor where the
//! previous token ended (zero-width layout emissions excepted, which pay
//! with stack changes instead).

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;
use tla_scan::{
    is_whitespace, Cursor, JunctKind, JunctStack, Scanner, StrCursor, TokenSet, TokenType,
    MAX_SERIALIZED_SIZE,
};

// ============================================================================
// Helpers
// ============================================================================

fn layout() -> TokenSet {
    TokenSet::of(&[TokenType::Indent, TokenType::Newline, TokenType::Dedent])
}

/// Builds the wire image of a stack with the given records.
fn wire_image(records: &[(bool, i16)]) -> Vec<u8> {
    let mut buffer = vec![records.len() as u8];
    for &(disjunction, column) in records {
        buffer.push(disjunction as u8);
        buffer.extend_from_slice(&column.to_le_bytes());
    }
    buffer
}

/// Reachable stacks have strictly increasing non-negative columns; pair a
/// sorted column set with arbitrary kinds.
fn reachable_records() -> impl Strategy<Value = Vec<(bool, i16)>> {
    (btree_set(0i16..4096, 0..32), vec(any::<bool>(), 32)).prop_map(|(columns, kinds)| {
        columns
            .into_iter()
            .zip(kinds)
            .map(|(column, disjunction)| (disjunction, column))
            .collect()
    })
}

/// One step a host could present to the junction engine.
#[derive(Debug, Clone)]
enum Step {
    Junct { disjunction: bool, column: i16 },
    RightDelimiter { column: i16 },
    Terminator,
    Other { column: i16 },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (any::<bool>(), 0i16..64).prop_map(|(disjunction, column)| Step::Junct {
            disjunction,
            column
        }),
        (0i16..64).prop_map(|column| Step::RightDelimiter { column }),
        Just(Step::Terminator),
        (0i16..64).prop_map(|column| Step::Other { column }),
    ]
}

fn kind(disjunction: bool) -> JunctKind {
    if disjunction {
        JunctKind::Disjunction
    } else {
        JunctKind::Conjunction
    }
}

fn columns(stack: &JunctStack) -> Vec<i16> {
    stack.records().iter().map(|r| r.alignment_column).collect()
}

// ============================================================================
// P1: serialization round-trip
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_round_trip_bytes_and_state(records in reachable_records()) {
        let image = wire_image(&records);

        let mut scanner = Scanner::new();
        scanner.deserialize(&image);
        prop_assert_eq!(scanner.depth(), records.len());

        let mut buffer = [0u8; MAX_SERIALIZED_SIZE];
        let written = scanner.serialize(&mut buffer).unwrap();
        prop_assert_eq!(&buffer[..written], &image[..]);

        let mut reloaded = Scanner::new();
        reloaded.deserialize(&buffer[..written]);
        prop_assert_eq!(reloaded, scanner);
    }

    #[test]
    fn prop_malformed_buffers_reset_cleanly(bytes in vec(any::<u8>(), 0..64)) {
        // Total: never panics, and always lands in a serializable state.
        let mut scanner = Scanner::new();
        scanner.deserialize(&bytes);
        let mut buffer = [0u8; MAX_SERIALIZED_SIZE];
        prop_assert!(scanner.serialize(&mut buffer).is_ok());
    }
}

// ============================================================================
// P2: monotone stack
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_stack_columns_strictly_increase(steps in vec(step(), 0..64)) {
        let mut stack = JunctStack::default();
        let mut cursor = StrCursor::new("");
        for s in steps {
            cursor.reset_token();
            match s {
                Step::Junct { disjunction, column } => {
                    stack.on_junct(&mut cursor, layout(), kind(disjunction), column);
                }
                Step::RightDelimiter { column } => {
                    stack.on_right_delimiter(&mut cursor, layout(), column);
                }
                Step::Terminator => {
                    stack.on_terminator(&mut cursor, layout());
                }
                Step::Other { column } => {
                    stack.on_other(&mut cursor, layout(), column);
                }
            }
            let cols = columns(&stack);
            prop_assert!(
                cols.windows(2).all(|w| w[0] < w[1]),
                "columns not strictly increasing: {:?}",
                cols
            );
        }
    }
}

// ============================================================================
// P3: balanced INDENT/DEDENT over whole inputs
// ============================================================================

/// A line of a generated junction-list document.
fn bullet_line() -> impl Strategy<Value = String> {
    (0usize..12, any::<bool>()).prop_map(|(indent, disjunction)| {
        let bullet = if disjunction { "\\/" } else { "/\\" };
        format!("{}{} x", " ".repeat(indent), bullet)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_indents_and_dedents_balance(lines in vec(bullet_line(), 1..24)) {
        let source = lines.join("\n");
        let mut scanner = Scanner::new();
        let mut cursor = StrCursor::new(&source);
        let mut indents = 0usize;
        let mut dedents = 0usize;

        // Generous bound; every iteration either consumes input or pops.
        for _ in 0..source.len() + 600 {
            let entry = cursor.position();
            cursor.reset_token();
            if scanner.scan(&mut cursor, layout()) {
                let token = cursor.result().unwrap();
                cursor.set_position(cursor.token_end());
                match token {
                    TokenType::Indent => indents += 1,
                    TokenType::Dedent => dedents += 1,
                    _ => {}
                }
                if token == TokenType::Indent || token == TokenType::Newline {
                    // The grammar consumes the bullet and its operand.
                    consume_grammar_token(&mut cursor);
                    consume_grammar_token(&mut cursor);
                }
            } else {
                cursor.set_position(entry);
                if !consume_grammar_token(&mut cursor) {
                    break;
                }
            }
        }
        // End of input reached in the recovery branch if anything is left.
        while scanner.depth() > 0 {
            cursor.reset_token();
            prop_assert!(scanner.scan(&mut cursor, TokenSet::ALL));
            dedents += 1;
        }

        prop_assert_eq!(indents, dedents);
        prop_assert_eq!(scanner.depth(), 0);
    }
}

fn consume_grammar_token(cursor: &mut StrCursor) -> bool {
    while cursor.peek().is_some_and(is_whitespace) {
        cursor.advance(true);
    }
    let mut consumed = false;
    while let Some(c) = cursor.peek() {
        if is_whitespace(c) {
            break;
        }
        cursor.advance(false);
        consumed = true;
    }
    consumed
}

// ============================================================================
// P4: longest match against a reference oracle
// ============================================================================

/// Whether `prefix` can still grow into a recognized operator.
fn viable(prefix: &str) -> bool {
    if !prefix.is_empty() && prefix.bytes().all(|b| b == b'=') {
        return true;
    }
    if !prefix.is_empty() && prefix.bytes().all(|b| b == b'-') {
        return true;
    }
    const FINITE: &[&str] = &[
        "=<", "=>", "=|", ">", ">=", ">>", ">>_", "->", "-|", "-+->",
    ];
    FINITE.iter().any(|op| op.starts_with(prefix))
}

/// The token an exact operator string lexes to, if any.
fn accepted(op: &str) -> Option<TokenType> {
    let token = match op {
        "=" => TokenType::EqOp,
        "==" => TokenType::AsciiDefEq,
        "=<" => TokenType::AsciiEqltOp,
        "=>" => TokenType::AsciiImpliesOp,
        "=|" => TokenType::AsciiLdttOp,
        ">" => TokenType::GtOp,
        ">=" => TokenType::AsciiGeqOp,
        ">>" => TokenType::RAngleBracket,
        ">>_" => TokenType::RAngleBracketSub,
        "-" => TokenType::Dash,
        "--" => TokenType::MinusMinusOp,
        "->" => TokenType::RArrow,
        "-|" => TokenType::AsciiLsttOp,
        "-+->" => TokenType::AsciiPlusArrowOp,
        _ if op.len() >= 4 && op.bytes().all(|b| b == b'=') => TokenType::DoubleLine,
        _ if op.len() >= 4 && op.bytes().all(|b| b == b'-') => TokenType::SingleLine,
        _ => return None,
    };
    Some(token)
}

/// Reference result: walk the prefix tree greedily, then accept whatever the
/// stopping point recognizes.
fn oracle(input: &str) -> Option<(TokenType, usize)> {
    let mut end = 0;
    for split in 1..=input.len() {
        if viable(&input[..split]) {
            end = split;
        } else {
            break;
        }
    }
    accepted(&input[..end]).map(|token| (token, end))
}

fn operator_soup() -> impl Strategy<Value = String> {
    vec(prop::sample::select(vec!['=', '-', '>', '<', '|', '+', '_']), 1..10)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2048))]

    #[test]
    fn prop_operator_machine_is_longest_match(input in operator_soup()) {
        let mut scanner = Scanner::new();
        let mut cursor = StrCursor::new(&input);
        let emitted = scanner
            .scan(&mut cursor, TokenSet::EMPTY)
            .then(|| (cursor.result().unwrap(), cursor.token_end()));
        prop_assert_eq!(emitted, oracle(&input), "input {:?}", input);

        // Emitted operator tokens always cover at least one codepoint.
        if let Some((_, end)) = emitted {
            prop_assert!(end > 0);
        }
    }
}

// ============================================================================
// P5: no progress without advance
// ============================================================================

/// Fragments a host could hand the scanner back-to-back: accepting
/// operators, decline-only prefixes, bullets, keywords, and identifiers.
/// The leading bool puts the fragment on its own line.
fn fragment() -> impl Strategy<Value = (bool, &'static str)> {
    let pool = vec![
        "/\\", "\\/", "x", "longer_name", "THEN", "THEOREM", "(", "=", "==", "===", "====",
        "=>", "=<", "-", "--", "---", "----", "->", "-+", "-+->", ">", ">=", ">>", ">>_",
    ];
    (any::<bool>(), prop::sample::select(pool))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_no_progress_without_advance(fragments in vec(fragment(), 1..24)) {
        let mut source = String::new();
        for (own_line, fragment) in &fragments {
            source.push(if *own_line { '\n' } else { ' ' });
            source.push_str(fragment);
        }

        // Every scanner token except the two text modes, so operator
        // accepts, declines, and layout emissions interleave freely. Not the
        // full mask: that is the error-recovery signal.
        let valid = TokenSet::of(&[
            TokenType::Indent,
            TokenType::Newline,
            TokenType::Dedent,
            TokenType::GtOp,
            TokenType::AsciiGeqOp,
            TokenType::RAngleBracket,
            TokenType::RAngleBracketSub,
            TokenType::EqOp,
            TokenType::AsciiDefEq,
            TokenType::AsciiImpliesOp,
            TokenType::AsciiEqltOp,
            TokenType::AsciiLdttOp,
            TokenType::DoubleLine,
            TokenType::Dash,
            TokenType::MinusMinusOp,
            TokenType::AsciiPlusArrowOp,
            TokenType::AsciiLsttOp,
            TokenType::RArrow,
            TokenType::SingleLine,
        ]);

        let mut scanner = Scanner::new();
        let mut cursor = StrCursor::new(&source);
        let mut completed = false;
        for _ in 0..source.len() * 2 + 200 {
            // The host always re-enters at the end of the previous token,
            // scanner-emitted or grammar-consumed.
            let previous_end = cursor.position();
            let depth = scanner.depth();
            cursor.reset_token();
            if scanner.scan(&mut cursor, valid) {
                let token = cursor.result().unwrap();
                let end = cursor.token_end();
                match token {
                    TokenType::Dedent => {
                        // The sanctioned zero-width emission; it pays with a
                        // shallower stack instead of cursor progress.
                        prop_assert!(end >= previous_end);
                        prop_assert_eq!(scanner.depth(), depth - 1);
                    }
                    TokenType::Indent | TokenType::Newline => {
                        // Zero-width at the bullet, which the host consumes
                        // next; the pair always advances the cursor.
                        prop_assert!(end >= previous_end);
                    }
                    _ => {
                        prop_assert!(
                            end > previous_end,
                            "{:?} emitted without advancing past {}",
                            token,
                            previous_end
                        );
                    }
                }
                cursor.set_position(end);
                if token == TokenType::Indent || token == TokenType::Newline {
                    prop_assert!(consume_grammar_token(&mut cursor));
                }
            } else {
                cursor.set_position(previous_end);
                if !consume_grammar_token(&mut cursor) {
                    completed = true;
                    break;
                }
            }
        }
        prop_assert!(completed, "scan loop failed to reach end of input");
    }
}

// ============================================================================
// P6: zero-width DEDENT chains terminate
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_dedent_chains_strictly_shrink_the_stack(records in reachable_records()) {
        let mut scanner = Scanner::new();
        scanner.deserialize(&wire_image(&records));

        let mut cursor = StrCursor::new("THEOREM done");
        let mut pops = 0usize;
        loop {
            let depth_before = scanner.depth();
            // The host re-enters at the same position after each dedent.
            cursor.set_position(0);
            cursor.reset_token();
            if !scanner.scan(&mut cursor, layout()) {
                break;
            }
            prop_assert_eq!(cursor.result(), Some(TokenType::Dedent));
            // The cursor never moves on a pure dedent; only the stack does.
            prop_assert_eq!(cursor.token_end(), 0);
            prop_assert_eq!(scanner.depth(), depth_before - 1);
            pops += 1;
            prop_assert!(pops <= records.len());
        }
        prop_assert_eq!(pops, records.len());
        prop_assert_eq!(scanner.depth(), 0);
    }
}
