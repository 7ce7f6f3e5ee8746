//! Token types for the DiceScript lexer.
//!
//! Defines [`TokenKind`] covering every lexeme of the dice language and
//! [`Token`], which pairs a kind with a source [`Span`].

use dicescript_types::Span;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in DiceScript.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Atoms ────────────────────────────────────────────────

    /// Run of ASCII digits: `42`
    Number(f64),
    /// Formula reference with its name verbatim: `[Eagle Eye]`
    FormulaRef(String),
    /// `(`
    LParen,
    /// `)`
    RParen,

    // ── Roll operators ───────────────────────────────────────

    /// `d` — plain die roll
    Die,
    /// `D` — die roll that reports crits and fumbles
    DieCrit,
    /// `'` — advantage
    Apostrophe,
    /// `.` — disadvantage
    Dot,

    // ── Arithmetic ───────────────────────────────────────────

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,

    // ── Special ──────────────────────────────────────────────

    /// Any character the grammar does not recognise, including an
    /// unterminated `[` and a stray `]`.
    Unknown(char),
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns `true` for tokens that start an atom.
    pub fn starts_atom(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_) | TokenKind::FormulaRef(_) | TokenKind::LParen
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::FormulaRef(name) => write!(f, "[{name}]"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::Die => f.write_str("d"),
            TokenKind::DieCrit => f.write_str("D"),
            TokenKind::Apostrophe => f.write_str("'"),
            TokenKind::Dot => f.write_str("."),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::Unknown(c) => write!(f, "{c}"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}
