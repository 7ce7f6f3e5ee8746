//! Core DiceScript lexer — converts a formula into a token stream.
//!
//! - Whitespace between tokens is skipped; whitespace inside `[...]` is
//!   part of the formula name
//! - Digits are ASCII only
//! - Never fails: unrecognised input becomes [`TokenKind::Unknown`] so the
//!   parser can report it at the point the grammar reaches it

use dicescript_types::Span;

use crate::token::{Token, TokenKind};

/// The DiceScript lexer.
pub struct Lexer<'src> {
    /// The full source text.
    source: &'src str,
    /// Current byte offset into `source`.
    pos: usize,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    /// Lex the entire source into a token stream ending with
    /// [`TokenKind::Eof`].
    pub fn lex(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.pos)
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan one token.
    fn scan_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;
        let Some(ch) = self.advance() else {
            return Token::new(TokenKind::Eof, Span::point(start));
        };

        let kind = match ch {
            '0'..='9' => return self.scan_number(start),
            '[' => return self.scan_formula_ref(start),
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            'd' => TokenKind::Die,
            'D' => TokenKind::DieCrit,
            '\'' => TokenKind::Apostrophe,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            other => TokenKind::Unknown(other),
        };
        Token::new(kind, self.span_from(start))
    }

    fn scan_number(&mut self, start: usize) -> Token {
        // First digit already consumed
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        let text = &self.source[start..self.pos];
        // Digit runs always parse; very long ones round to the nearest f64
        let value = text.parse::<f64>().unwrap_or(f64::INFINITY);
        Token::new(TokenKind::Number(value), self.span_from(start))
    }

    /// `[` name `]` where the name holds no brackets. Anything else leaves
    /// the `[` as an unknown token and resumes right after it.
    fn scan_formula_ref(&mut self, start: usize) -> Token {
        let body = self.rest();
        match body.find(|c: char| c == '[' || c == ']') {
            Some(idx) if body[idx..].starts_with(']') => {
                let name = body[..idx].to_string();
                self.pos += idx + 1;
                Token::new(TokenKind::FormulaRef(name), self.span_from(start))
            }
            _ => Token::new(TokenKind::Unknown('['), self.span_from(start)),
        }
    }
}
