//! Expression parsing by precedence context.
//!
//! Precedence (lowest → highest):
//! 1. `+`, `-`
//! 2. `*`, `/`
//! 3. `'` (advantage), `.` (disadvantage)
//! 4. `d`, `D`
//! 5. unary `-`
//!
//! There is no binding-power table. `parse_chain` carries the operand
//! built so far and the precedence of the operator that asked for it. An
//! operator whose precedence is at or below that context leaves its token
//! in place and hands the operand back; the caller that owns the lower
//! context picks the token up from the same cursor position.

use dicescript_lexer::token::{Token, TokenKind};
use dicescript_types::ast::*;
use dicescript_types::{DiceError, ErrorKind, Span};

use crate::parser::Parser;

type ParseResult<T> = Result<T, DiceError>;

impl Parser {
    // ══════════════════════════════════════════════════════════════════════════
    // Chain
    // ══════════════════════════════════════════════════════════════════════════

    /// Parse from the cursor, extending `operand`, until the range ends or an
    /// operator yields to `context`.
    ///
    /// Returns the accumulated operand, which is `None` only if no token was
    /// consumed.
    pub(crate) fn parse_chain(
        &mut self,
        operand: Option<Expr>,
        context: Option<Precedence>,
    ) -> ParseResult<Option<Expr>> {
        let at = self.current().map(|t| t.span).unwrap_or_else(|| self.end_span());
        self.enter(at)?;
        let result = self.parse_chain_inner(operand, context);
        self.leave();
        result
    }

    fn parse_chain_inner(
        &mut self,
        mut operand: Option<Expr>,
        context: Option<Precedence>,
    ) -> ParseResult<Option<Expr>> {
        loop {
            let Some(token) = self.current().cloned() else {
                if operand.is_none() && context.is_some() {
                    return Err(DiceError::at(
                        ErrorKind::UnexpectedEndOfExpression,
                        "expected an operand, found end of expression",
                        self.end_span(),
                    ));
                }
                return Ok(operand);
            };
            if operand.is_some() && token.kind.starts_atom() {
                return Err(DiceError::at(
                    ErrorKind::UnexpectedSymbol,
                    format!("expected an operator before '{}'", token.kind),
                    token.span,
                ));
            }

            operand = Some(match token.kind {
                // ── Atoms ───────────────────────────────────────────────
                TokenKind::Number(n) => {
                    self.advance();
                    Expr::new(ExprKind::Number(n), token.span)
                }
                TokenKind::FormulaRef(ref name) => {
                    self.advance();
                    Expr::new(ExprKind::FormulaRef(name.clone()), token.span)
                }
                TokenKind::LParen => self.parse_group(token.span)?,

                // ── Roll operators ──────────────────────────────────────
                TokenKind::Die | TokenKind::DieCrit => {
                    if Precedence::Dice.yields_to(context) {
                        return Ok(operand);
                    }
                    self.advance();
                    let sides = self.parse_operand(Precedence::Dice, &token)?;
                    let span = span_of(&operand, token.span).merge(sides.span);
                    Expr::new(
                        ExprKind::DieRoll {
                            count: operand.take().map(Box::new),
                            sides: Box::new(sides),
                            tracks_crits: token.kind == TokenKind::DieCrit,
                        },
                        span,
                    )
                }
                TokenKind::Apostrophe | TokenKind::Dot => {
                    if Precedence::Advantage.yields_to(context) {
                        return Ok(operand);
                    }
                    self.advance();
                    let body = self.parse_operand(Precedence::Advantage, &token)?;
                    let span = span_of(&operand, token.span).merge(body.span);
                    let mode = if token.kind == TokenKind::Apostrophe {
                        AdvantageMode::Advantage
                    } else {
                        AdvantageMode::Disadvantage
                    };
                    Expr::new(
                        ExprKind::Advantage {
                            mode,
                            level: operand.take().map(Box::new),
                            body: Box::new(body),
                        },
                        span,
                    )
                }

                // ── Arithmetic ──────────────────────────────────────────
                TokenKind::Minus if operand.is_none() => {
                    if Precedence::Negation.yields_to(context) {
                        return Ok(operand);
                    }
                    self.advance();
                    let inner = self.parse_operand(Precedence::Negation, &token)?;
                    let span = token.span.merge(inner.span);
                    Expr::new(ExprKind::Negate(Box::new(inner)), span)
                }
                TokenKind::Plus | TokenKind::Minus | TokenKind::Star | TokenKind::Slash => {
                    let op = match token.kind {
                        TokenKind::Plus => BinOp::Add,
                        TokenKind::Minus => BinOp::Sub,
                        TokenKind::Star => BinOp::Mul,
                        _ => BinOp::Div,
                    };
                    if op.precedence().yields_to(context) {
                        return Ok(operand);
                    }
                    let Some(left) = operand.take() else {
                        return Err(missing_operand(&token, "left"));
                    };
                    self.advance();
                    let right = self.parse_operand(op.precedence(), &token)?;
                    let span = left.span.merge(right.span);
                    Expr::new(
                        ExprKind::Binary {
                            left: Box::new(left),
                            op,
                            right: Box::new(right),
                        },
                        span,
                    )
                }

                // ── Anything else ───────────────────────────────────────
                TokenKind::RParen | TokenKind::Unknown(_) | TokenKind::Eof => {
                    return Err(DiceError::at(
                        ErrorKind::UnrecognizedSyntax,
                        format!("unrecognized syntax at '{}'", token.kind),
                        token.span,
                    ));
                }
            });
        }
    }

    /// Parse the right-hand operand of `op` at its own precedence.
    fn parse_operand(&mut self, precedence: Precedence, op: &Token) -> ParseResult<Expr> {
        self.parse_chain(None, Some(precedence))?
            .ok_or_else(|| missing_operand(op, "right"))
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Groups
    // ══════════════════════════════════════════════════════════════════════════

    /// `( expr )`: the inner text is parsed as its own range with no
    /// precedence context.
    fn parse_group(&mut self, open: Span) -> ParseResult<Expr> {
        let Some(close) = self.find_matching_paren() else {
            return Err(DiceError::at(
                ErrorKind::MismatchedParentheses,
                "'(' has no matching ')'",
                open,
            ));
        };
        self.advance(); // eat `(`

        let outer_end = std::mem::replace(&mut self.end, close);
        let inner = self.parse_chain(None, None);
        self.end = outer_end;

        let Some(inner) = inner? else {
            return Err(DiceError::at(
                ErrorKind::UnexpectedSymbol,
                "empty parentheses",
                open,
            ));
        };
        let span = open.merge(self.token_at(close).span);
        self.seek(close + 1);
        Ok(Expr::new(ExprKind::Group(Box::new(inner)), span))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn span_of(operand: &Option<Expr>, fallback: Span) -> Span {
    operand.as_ref().map(|e| e.span).unwrap_or(fallback)
}

fn missing_operand(op: &Token, side: &str) -> DiceError {
    DiceError::at(
        ErrorKind::UnexpectedSymbol,
        format!("'{}' is missing its {side} operand", op.kind),
        op.span,
    )
}
