//! Lexer tests for DiceScript.
//!
//! Covers: every operator, numbers, formula references (with spaces,
//! unterminated, nested), whitespace handling, unknown characters, spans,
//! and determinism.

use dicescript_lexer::{Lexer, TokenKind};
use dicescript_types::Span;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Lex source text and return just the token kinds (excluding final Eof).
fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source)
        .lex()
        .into_iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.kind)
        .collect()
}

/// Lex and return the first token kind.
fn first(source: &str) -> TokenKind {
    Lexer::new(source).lex().remove(0).kind
}

fn num(n: f64) -> TokenKind {
    TokenKind::Number(n)
}

fn formula(name: &str) -> TokenKind {
    TokenKind::FormulaRef(name.to_string())
}

// ─────────────────────────────────────────────────────────────────────
// Operators
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_single_character_operators() {
    assert_eq!(
        kinds("()dD'.+-*/"),
        vec![
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Die,
            TokenKind::DieCrit,
            TokenKind::Apostrophe,
            TokenKind::Dot,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
        ]
    );
}

#[test]
fn test_die_letter_case_is_significant() {
    assert_eq!(kinds("2d6"), vec![num(2.0), TokenKind::Die, num(6.0)]);
    assert_eq!(kinds("2D6"), vec![num(2.0), TokenKind::DieCrit, num(6.0)]);
}

#[test]
fn test_advantage_and_disadvantage() {
    assert_eq!(
        kinds("2'd20"),
        vec![num(2.0), TokenKind::Apostrophe, TokenKind::Die, num(20.0)]
    );
    assert_eq!(
        kinds(".D20"),
        vec![TokenKind::Dot, TokenKind::DieCrit, num(20.0)]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Numbers
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_numbers() {
    assert_eq!(first("0"), num(0.0));
    assert_eq!(first("007"), num(7.0));
    assert_eq!(first("123456"), num(123456.0));
}

#[test]
fn test_numbers_have_no_fraction_or_sign() {
    assert_eq!(kinds("1.5"), vec![num(1.0), TokenKind::Dot, num(5.0)]);
    assert_eq!(kinds("-3"), vec![TokenKind::Minus, num(3.0)]);
}

#[test]
fn test_huge_number_does_not_fail() {
    let source = "9".repeat(400);
    assert_eq!(first(&source), num(f64::INFINITY));
}

#[test]
fn test_non_ascii_digits_are_unknown() {
    assert_eq!(first("٣"), TokenKind::Unknown('٣'));
}

// ─────────────────────────────────────────────────────────────────────
// Formula references
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_formula_reference() {
    assert_eq!(kinds("[Strength]"), vec![formula("Strength")]);
}

#[test]
fn test_formula_name_keeps_inner_whitespace() {
    assert_eq!(kinds("[ Eagle  Eye ]"), vec![formula(" Eagle  Eye ")]);
}

#[test]
fn test_formula_name_may_hold_operators() {
    assert_eq!(kinds("[d20+1]"), vec![formula("d20+1")]);
}

#[test]
fn test_empty_formula_name() {
    assert_eq!(kinds("[]"), vec![formula("")]);
}

#[test]
fn test_unterminated_formula_reference() {
    assert_eq!(
        kinds("[abc"),
        vec![
            TokenKind::Unknown('['),
            TokenKind::Unknown('a'),
            TokenKind::Unknown('b'),
            TokenKind::Unknown('c'),
        ]
    );
}

#[test]
fn test_stray_close_bracket_is_unknown() {
    assert_eq!(kinds("]"), vec![TokenKind::Unknown(']')]);
}

#[test]
fn test_adjacent_formula_references() {
    assert_eq!(
        kinds("[A]*[B]"),
        vec![formula("A"), TokenKind::Star, formula("B")]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Whitespace and unknown input
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_whitespace_between_tokens_is_skipped() {
    assert_eq!(kinds(" 2 \t d\n6 "), kinds("2d6"));
}

#[test]
fn test_whitespace_splits_numbers() {
    assert_eq!(kinds("1 2"), vec![num(1.0), num(2.0)]);
}

#[test]
fn test_unknown_characters() {
    assert_eq!(
        kinds("2x3"),
        vec![num(2.0), TokenKind::Unknown('x'), num(3.0)]
    );
    assert_eq!(first("é"), TokenKind::Unknown('é'));
}

#[test]
fn test_always_ends_with_single_eof() {
    for source in ["", "2d6", "[", "(((", "  "] {
        let tokens = Lexer::new(source).lex();
        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        assert_eq!(eofs, 1, "source {source:?}");
        assert_eq!(tokens.last().map(|t| &t.kind), Some(&TokenKind::Eof));
    }
}

// ─────────────────────────────────────────────────────────────────────
// Spans
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_spans_cover_multibyte_input() {
    let tokens = Lexer::new("é+[ü]").lex();
    assert_eq!(tokens[0].span, Span::new(0, 2));
    assert_eq!(tokens[1].span, Span::new(2, 3));
    assert_eq!(tokens[2].span, Span::new(3, 7));
    assert_eq!(tokens[3].span, Span::point(7));
}

#[test]
fn test_span_slices_back_to_lexeme() {
    let source = "12 + [Bow]";
    for token in Lexer::new(source).lex() {
        let text = token.span.slice(source).unwrap();
        match token.kind {
            TokenKind::Number(_) => assert_eq!(text, "12"),
            TokenKind::Plus => assert_eq!(text, "+"),
            TokenKind::FormulaRef(_) => assert_eq!(text, "[Bow]"),
            TokenKind::Eof => assert_eq!(text, ""),
            other => panic!("unexpected token {other:?}"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_lexing_is_deterministic() {
    let source = "3'(2D8+[Str]) - .d20 / 4";
    let reference = Lexer::new(source).lex();
    for _ in 0..100 {
        assert_eq!(Lexer::new(source).lex(), reference);
    }
}
