//! Core parser infrastructure: token cursor, bounded sub-ranges, errors.

use dicescript_lexer::token::{Token, TokenKind};
use dicescript_lexer::Lexer;
use dicescript_types::ast::Program;
use dicescript_types::{DiceError, ErrorKind, Limits, Span};

/// The DiceScript parser.
///
/// Consumes a token stream produced by the lexer and builds an AST.
/// Stops at the first error.
pub struct Parser {
    /// The token stream (always ends with `Eof`).
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    /// Index the current sub-range stops at: the `Eof` token at top level,
    /// or the closing `)` while inside a group.
    pub(crate) end: usize,
    /// Current expression nesting depth.
    pub(crate) depth: u32,
    /// Maximum expression nesting depth.
    max_depth: u32,
}

impl Parser {
    /// Create a new parser from a token stream.
    pub fn new(mut tokens: Vec<Token>, limits: &Limits) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let at = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token::new(TokenKind::Eof, Span::point(at)));
        }
        let end = tokens.len() - 1;
        Self {
            tokens,
            pos: 0,
            end,
            depth: 0,
            max_depth: limits.max_depth,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token, or `None` at the end of the current range.
    pub(crate) fn current(&self) -> Option<&Token> {
        if self.pos < self.end {
            self.tokens.get(self.pos)
        } else {
            None
        }
    }

    /// Advance the cursor by one.
    pub(crate) fn advance(&mut self) {
        if self.pos < self.end {
            self.pos += 1;
        }
    }

    /// Move the cursor to an absolute token index.
    pub(crate) fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// The token at `idx`, which may lie past the current range.
    pub(crate) fn token_at(&self, idx: usize) -> &Token {
        &self.tokens[idx.min(self.tokens.len() - 1)]
    }

    /// Zero-width span at the end of the current range.
    pub(crate) fn end_span(&self) -> Span {
        Span::point(self.token_at(self.end).span.start)
    }

    /// Find the `)` matching the `(` at the cursor by depth counting,
    /// without leaving the current range.
    pub(crate) fn find_matching_paren(&self) -> Option<usize> {
        let mut level = 0usize;
        for idx in self.pos..self.end {
            match self.tokens[idx].kind {
                TokenKind::LParen => level += 1,
                TokenKind::RParen => {
                    level = level.saturating_sub(1);
                    if level == 0 {
                        return Some(idx);
                    }
                }
                _ => {}
            }
        }
        None
    }

    // ── Depth Tracking ────────────────────────────────────────────────────────

    pub(crate) fn enter(&mut self, span: Span) -> Result<(), DiceError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            self.depth -= 1;
            return Err(DiceError::at(
                ErrorKind::NestingTooDeep,
                format!("maximum expression nesting depth is {}", self.max_depth),
                span,
            ));
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the token stream into a [`Program`].
    pub fn parse(mut self) -> Result<Program, DiceError> {
        let expr = self.parse_chain(None, None)?;
        let span = match &expr {
            Some(e) => e.span,
            None => self.end_span(),
        };
        Ok(Program { expr, span })
    }
}

/// Lex and parse `source` in one step.
pub fn parse_source(source: &str, limits: &Limits) -> Result<Program, DiceError> {
    let tokens = Lexer::new(source).lex();
    Parser::new(tokens, limits).parse()
}
