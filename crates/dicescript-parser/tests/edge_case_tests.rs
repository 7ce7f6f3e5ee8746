//! Grammar edge cases and error kinds.
//!
//! Covers:
//! 1. Each syntax error kind and where it is reported
//! 2. Operators handing their symbol back to a lower-precedence caller
//! 3. Parenthesis matching inside bounded ranges
//! 4. Nesting depth limits

use dicescript_parser::parse_source;
use dicescript_types::ast::*;
use dicescript_types::{DiceError, ErrorCategory, ErrorKind, Limits, Span};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn parse(source: &str) -> Result<Program, DiceError> {
    parse_source(source, &Limits::default())
}

/// Parse source and return the error, panicking if it parsed.
fn parse_err(source: &str) -> DiceError {
    match parse(source) {
        Ok(program) => panic!("{source:?} unexpectedly parsed: {program:?}"),
        Err(e) => e,
    }
}

fn kind(source: &str) -> ErrorKind {
    parse_err(source).kind
}

// ─────────────────────────────────────────────────────────────────────
// Unrecognized syntax
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_characters_are_unrecognized() {
    assert_eq!(kind("x"), ErrorKind::UnrecognizedSyntax);
    assert_eq!(kind("2 % 3"), ErrorKind::UnrecognizedSyntax);
    assert_eq!(kind("1.5e3"), ErrorKind::UnrecognizedSyntax);
}

#[test]
fn test_stray_close_paren_is_unrecognized() {
    assert_eq!(kind("1+2)"), ErrorKind::UnrecognizedSyntax);
    assert_eq!(kind(")"), ErrorKind::UnrecognizedSyntax);
}

#[test]
fn test_unterminated_formula_reference_is_unrecognized() {
    assert_eq!(kind("[Str"), ErrorKind::UnrecognizedSyntax);
    assert_eq!(kind("1+]"), ErrorKind::UnrecognizedSyntax);
}

#[test]
fn test_unrecognized_error_points_at_symbol() {
    let err = parse_err("12 + ?");
    assert_eq!(err.span, Some(Span::new(5, 6)));
    assert_eq!(err.category, ErrorCategory::Syntax);
}

// ─────────────────────────────────────────────────────────────────────
// Unexpected end of expression
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_trailing_operator_ends_early() {
    for source in ["1+", "2*", "3d", "'", "2.", "-", "4-"] {
        assert_eq!(
            kind(source),
            ErrorKind::UnexpectedEndOfExpression,
            "source {source:?}"
        );
    }
}

#[test]
fn test_operator_at_end_of_group_ends_early() {
    assert_eq!(kind("(1+)"), ErrorKind::UnexpectedEndOfExpression);
    assert_eq!(kind("(2d)*3"), ErrorKind::UnexpectedEndOfExpression);
}

#[test]
fn test_end_error_points_past_last_token() {
    let err = parse_err("1 +");
    assert_eq!(err.span, Some(Span::point(3)));
}

// ─────────────────────────────────────────────────────────────────────
// Unexpected symbol
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_binary_operator_without_left_operand() {
    assert_eq!(kind("+1"), ErrorKind::UnexpectedSymbol);
    assert_eq!(kind("*2"), ErrorKind::UnexpectedSymbol);
    assert_eq!(kind("/2"), ErrorKind::UnexpectedSymbol);
    assert_eq!(kind("(*2)"), ErrorKind::UnexpectedSymbol);
}

#[test]
fn test_operator_without_right_operand() {
    // The right-hand chain gives the symbol back and returns nothing.
    assert_eq!(kind("1++2"), ErrorKind::UnexpectedSymbol);
    assert_eq!(kind("2*/3"), ErrorKind::UnexpectedSymbol);
    assert_eq!(kind("d+3"), ErrorKind::UnexpectedSymbol);
    assert_eq!(kind("'*2"), ErrorKind::UnexpectedSymbol);
}

#[test]
fn test_repeated_prefix_operators_are_rejected() {
    assert_eq!(kind("--1"), ErrorKind::UnexpectedSymbol);
    assert_eq!(kind("''d20"), ErrorKind::UnexpectedSymbol);
    assert_eq!(kind("d d6"), ErrorKind::UnexpectedSymbol);
}

#[test]
fn test_empty_group() {
    assert_eq!(kind("()"), ErrorKind::UnexpectedSymbol);
    assert_eq!(kind("2*( )"), ErrorKind::UnexpectedSymbol);
}

#[test]
fn test_juxtaposed_operands() {
    assert_eq!(kind("1 2"), ErrorKind::UnexpectedSymbol);
    assert_eq!(kind("2(3)"), ErrorKind::UnexpectedSymbol);
    assert_eq!(kind("[A][B]"), ErrorKind::UnexpectedSymbol);
    assert_eq!(kind("(1)2"), ErrorKind::UnexpectedSymbol);
}

#[test]
fn test_missing_operand_error_names_operator() {
    let err = parse_err("*3");
    assert_eq!(err.span, Some(Span::new(0, 1)));
    assert!(err.message.contains("'*'"), "message: {}", err.message);
}

// ─────────────────────────────────────────────────────────────────────
// Parentheses
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_unclosed_paren() {
    assert_eq!(kind("(1+2"), ErrorKind::MismatchedParentheses);
    assert_eq!(kind("((1)"), ErrorKind::MismatchedParentheses);
    assert_eq!(kind("2*(3"), ErrorKind::MismatchedParentheses);
}

#[test]
fn test_unclosed_paren_points_at_open() {
    let err = parse_err("1 + (2");
    assert_eq!(err.span, Some(Span::new(4, 5)));
}

#[test]
fn test_inner_paren_cannot_borrow_outer_close() {
    // The inner `(` is searched for inside the outer group only.
    assert_eq!(kind("((1)"), ErrorKind::MismatchedParentheses);
    assert_eq!(kind("(1+(2)"), ErrorKind::MismatchedParentheses);
}

#[test]
fn test_balanced_nesting_parses() {
    assert!(parse("((1)+(2*(3)))").is_ok());
    assert!(parse("(1)d(6)").is_ok());
}

// ─────────────────────────────────────────────────────────────────────
// Backtracking
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_group_resets_precedence_context() {
    // Inside the sides group `+` is allowed even though the die's context
    // would hand it back outside.
    let expr = parse("2d(3+1)").unwrap().expr.unwrap();
    let ExprKind::DieRoll { sides, .. } = &expr.kind else {
        panic!("expected a die roll, got {expr:?}");
    };
    assert!(matches!(sides.kind, ExprKind::Group(_)));
}

#[test]
fn test_higher_context_hands_back_operator() {
    // `d6` is parsed as the die's sides; `*2` is handed back to the top.
    let expr = parse("3d6*2").unwrap().expr.unwrap();
    let ExprKind::Binary { left, op, .. } = &expr.kind else {
        panic!("expected binary, got {expr:?}");
    };
    assert_eq!(*op, BinOp::Mul);
    assert!(matches!(left.kind, ExprKind::DieRoll { .. }));
}

// ─────────────────────────────────────────────────────────────────────
// Depth limits
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_deep_parentheses_hit_depth_limit() {
    let source = format!("{}1{}", "(".repeat(300), ")".repeat(300));
    let err = parse_err(&source);
    assert_eq!(err.kind, ErrorKind::NestingTooDeep);
    assert_eq!(err.category, ErrorCategory::Limit);
}

#[test]
fn test_depth_limit_is_configurable() {
    let limits = Limits {
        max_depth: 4,
        ..Limits::default()
    };
    assert!(parse_source("((1))", &limits).is_ok());
    assert_eq!(
        parse_source("((((((1))))))", &limits).unwrap_err().kind,
        ErrorKind::NestingTooDeep
    );
}

#[test]
fn test_long_flat_chain_is_not_deep() {
    let source = vec!["1"; 2000].join("+");
    assert!(parse(&source).is_ok());
}
