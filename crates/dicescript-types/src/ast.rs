//! AST node types for DiceScript.
//!
//! Every node carries a [`Span`] into the source it was parsed from.
//! Recursive children are boxed.

use crate::Span;

// ══════════════════════════════════════════════════════════════════════════════
// Precedence
// ══════════════════════════════════════════════════════════════════════════════

/// Operator binding strength, lowest first.
///
/// An operator refuses to consume its symbol when the ambient context is
/// at or above its own level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Addition = 1,
    Multiplication = 2,
    Advantage = 3,
    Dice = 4,
    Negation = 5,
}

impl Precedence {
    /// Whether an operator at `self` must hand control back to a caller
    /// parsing at `context`.
    pub fn yields_to(self, context: Option<Precedence>) -> bool {
        context.is_some_and(|ctx| ctx >= self)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Program
// ══════════════════════════════════════════════════════════════════════════════

/// A parsed command. `expr` is `None` for empty input.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub expr: Option<Expr>,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `42`
    Number(f64),
    /// `( expr )`
    Group(Box<Expr>),
    /// `[name]`, name kept verbatim
    FormulaRef(String),
    /// `[count] d sides` / `[count] D sides`
    DieRoll {
        count: Option<Box<Expr>>,
        sides: Box<Expr>,
        /// Uppercase `D`: report crits and fumbles.
        tracks_crits: bool,
    },
    /// `[level] ' body` / `[level] . body`
    Advantage {
        mode: AdvantageMode,
        level: Option<Box<Expr>>,
        body: Box<Expr>,
    },
    /// `left op right`
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    /// `- operand`
    Negate(Box<Expr>),
}

/// Which trial an advantage roll keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvantageMode {
    /// `'` keeps the highest trial.
    Advantage,
    /// `.` keeps the lowest trial.
    Disadvantage,
}

impl AdvantageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvantageMode::Advantage => "advantage",
            AdvantageMode::Disadvantage => "disadvantage",
        }
    }

    /// Whether `candidate` replaces the current `best`. Ties keep the
    /// earlier trial.
    pub fn prefers(&self, candidate: f64, best: f64) -> bool {
        match self {
            AdvantageMode::Advantage => candidate > best,
            AdvantageMode::Disadvantage => candidate < best,
        }
    }
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// Returns the operator symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }

    /// Verb used in trace lines (`Adding 2 + 3:`).
    pub fn verb(&self) -> &'static str {
        match self {
            BinOp::Add => "Adding",
            BinOp::Sub => "Subtracting",
            BinOp::Mul => "Multiplying",
            BinOp::Div => "Dividing",
        }
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            BinOp::Add | BinOp::Sub => Precedence::Addition,
            BinOp::Mul | BinOp::Div => Precedence::Multiplication,
        }
    }

    /// Apply with host floating-point semantics (`1/0` is infinity).
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            BinOp::Add => left + right,
            BinOp::Sub => left - right,
            BinOp::Mul => left * right,
            BinOp::Div => left / right,
        }
    }
}
