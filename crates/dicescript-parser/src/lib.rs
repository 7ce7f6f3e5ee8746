//! DiceScript parser: converts a token stream into an AST.

mod parse_expr;
mod parser;

pub use parser::{parse_source, Parser};
