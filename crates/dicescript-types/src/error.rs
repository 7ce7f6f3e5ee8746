use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// The text does not follow the grammar.
    Syntax,
    /// A die roll or advantage operand is out of bounds.
    Roll,
    /// A formula reference could not be resolved.
    Formula,
    /// A configured resource limit was hit.
    Limit,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Roll => write!(f, "roll"),
            Self::Formula => write!(f, "formula"),
            Self::Limit => write!(f, "limit"),
        }
    }
}

/// Numeric error code (E01–E12).
///
/// Codes 1–10 keep the numbering hosts already map to messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    pub const UNRECOGNIZED_SYNTAX: Self = Self(1);
    pub const UNEXPECTED_END_OF_EXPRESSION: Self = Self(2);
    pub const UNEXPECTED_SYMBOL: Self = Self(3);
    pub const INVALID_DICE_COUNT: Self = Self(4);
    pub const INVALID_SIDES_COUNT: Self = Self(5);
    pub const MISMATCHED_PARENTHESES: Self = Self(6);
    pub const INVALID_ADVANTAGE_LEVEL: Self = Self(7);
    pub const FORMULA_NOT_FOUND: Self = Self(8);
    pub const FORMULA_ILL_DEFINED: Self = Self(9);
    pub const SELF_REFERENTIAL_FORMULA: Self = Self(10);
    pub const NESTING_TOO_DEEP: Self = Self(11);
    pub const WORK_LIMIT_EXCEEDED: Self = Self(12);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:02}", self.0)
    }
}

/// Every way a single evaluation can fail.
///
/// One evaluation yields at most one error; the first one aborts the
/// whole descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The head of the remaining text matches no grammar alternative.
    UnrecognizedSyntax,
    /// Input ran out while an enclosing context still needed an operand.
    UnexpectedEndOfExpression,
    /// An operator is missing its left or right operand.
    UnexpectedSymbol,
    /// Dice count outside `0..=max_dice`.
    InvalidDiceCount,
    /// Sides below 1.
    InvalidSidesCount,
    /// Unbalanced `(` / `)`.
    MismatchedParentheses,
    /// Advantage/disadvantage level outside `0..=max_advantage_level`.
    InvalidAdvantageLevel,
    /// `[name]` is not in the formula table.
    FormulaNotFound,
    /// A referenced formula evaluated to nothing.
    FormulaIllDefined,
    /// `[name]` is already being evaluated further up the stack.
    SelfReferentialFormula,
    /// Nesting exceeded `max_depth`.
    NestingTooDeep,
    /// Evaluation exceeded `gas_limit` steps.
    WorkLimitExceeded,
}

impl ErrorKind {
    /// All kinds, in code order.
    pub const ALL: [ErrorKind; 12] = [
        Self::UnrecognizedSyntax,
        Self::UnexpectedEndOfExpression,
        Self::UnexpectedSymbol,
        Self::InvalidDiceCount,
        Self::InvalidSidesCount,
        Self::MismatchedParentheses,
        Self::InvalidAdvantageLevel,
        Self::FormulaNotFound,
        Self::FormulaIllDefined,
        Self::SelfReferentialFormula,
        Self::NestingTooDeep,
        Self::WorkLimitExceeded,
    ];

    /// The numeric code for this kind.
    pub fn code(self) -> ErrorCode {
        match self {
            Self::UnrecognizedSyntax => ErrorCode::UNRECOGNIZED_SYNTAX,
            Self::UnexpectedEndOfExpression => ErrorCode::UNEXPECTED_END_OF_EXPRESSION,
            Self::UnexpectedSymbol => ErrorCode::UNEXPECTED_SYMBOL,
            Self::InvalidDiceCount => ErrorCode::INVALID_DICE_COUNT,
            Self::InvalidSidesCount => ErrorCode::INVALID_SIDES_COUNT,
            Self::MismatchedParentheses => ErrorCode::MISMATCHED_PARENTHESES,
            Self::InvalidAdvantageLevel => ErrorCode::INVALID_ADVANTAGE_LEVEL,
            Self::FormulaNotFound => ErrorCode::FORMULA_NOT_FOUND,
            Self::FormulaIllDefined => ErrorCode::FORMULA_ILL_DEFINED,
            Self::SelfReferentialFormula => ErrorCode::SELF_REFERENTIAL_FORMULA,
            Self::NestingTooDeep => ErrorCode::NESTING_TOO_DEEP,
            Self::WorkLimitExceeded => ErrorCode::WORK_LIMIT_EXCEEDED,
        }
    }

    /// Get the category for this kind.
    pub fn category(self) -> ErrorCategory {
        match self {
            Self::UnrecognizedSyntax
            | Self::UnexpectedEndOfExpression
            | Self::UnexpectedSymbol
            | Self::MismatchedParentheses => ErrorCategory::Syntax,
            Self::InvalidDiceCount | Self::InvalidSidesCount | Self::InvalidAdvantageLevel => {
                ErrorCategory::Roll
            }
            Self::FormulaNotFound | Self::FormulaIllDefined | Self::SelfReferentialFormula => {
                ErrorCategory::Formula
            }
            Self::NestingTooDeep | Self::WorkLimitExceeded => ErrorCategory::Limit,
        }
    }

    /// The user-facing message for this kind.
    pub fn message(self) -> &'static str {
        match self {
            Self::UnrecognizedSyntax => "Unrecognized syntax",
            Self::UnexpectedEndOfExpression => "Unexpected end of expression",
            Self::UnexpectedSymbol => "Unexpected symbol",
            Self::InvalidDiceCount => "Invalid number of dice",
            Self::InvalidSidesCount => "Invalid number of sides",
            Self::MismatchedParentheses => "Mismatched parentheses",
            Self::InvalidAdvantageLevel => "Invalid advantage level",
            Self::FormulaNotFound => "Could not find formula",
            Self::FormulaIllDefined => "Formula ill-defined",
            Self::SelfReferentialFormula => "Self-referential formula",
            Self::NestingTooDeep => "Expression nested too deeply",
            Self::WorkLimitExceeded => "Evaluation step limit exceeded",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A structured DiceScript error.
///
/// Hosts render `kind.message()` (or `message`); they must not parse
/// the free-form detail text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiceError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Numeric code (derived from kind).
    pub code: ErrorCode,
    /// Error category (derived from kind).
    pub category: ErrorCategory,
    /// Human-readable detail.
    pub message: String,
    /// Location in the source the error points into, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Name of the formula whose code `span` refers to; `None` means the
    /// top-level command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl DiceError {
    /// Create a new error with the kind's default message.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            code: kind.code(),
            category: kind.category(),
            message: kind.message().to_string(),
            span: None,
            formula: None,
        }
    }

    /// Create an error with a detail message at `span`.
    pub fn at(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self::new(kind).with_message(message).with_span(span)
    }

    /// Replace the detail message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach a source location.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Record the formula this error originated in, unless a deeper
    /// formula was already recorded.
    pub fn in_formula(mut self, name: &str) -> Self {
        if self.formula.is_none() {
            self.formula = Some(name.to_string());
        }
        self
    }
}

impl From<ErrorKind> for DiceError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for DiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.formula {
            write!(f, "[{name}] ")?;
        }
        if let Some(span) = &self.span {
            write!(f, "{span}: ")?;
        }
        write!(f, "{} [{}] {}", self.code, self.category, self.message)
    }
}

impl std::error::Error for DiceError {}
