//! Shared types for DiceScript.
//!
//! This crate defines the AST node types, source spans, error types,
//! formula tables and evaluation limits used by every stage.

mod error;
mod limits;
mod span;
pub mod ast;
pub mod formula;
pub mod profiles;

pub use error::{DiceError, ErrorCategory, ErrorCode, ErrorKind};
pub use formula::{Formula, FormulaBook, FormulaTable, ProfileError};
pub use limits::{
    Limits, DEFAULT_GAS_LIMIT, DEFAULT_MAX_ADVANTAGE_LEVEL, DEFAULT_MAX_DEPTH, DEFAULT_MAX_DICE,
};
pub use span::Span;

/// Result type used throughout DiceScript.
pub type Result<T> = std::result::Result<T, DiceError>;
