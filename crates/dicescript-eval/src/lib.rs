//! DiceScript evaluator.
//!
//! Evaluates dice commands such as `2d6+3`, `1'D20` or `[Broadsword]*2`:
//!
//! - parses the command (via `dicescript-parser`)
//! - rolls every die through a caller-supplied RNG
//! - resolves `[name]` references against a [`FormulaTable`], refusing
//!   self-reference
//! - reports each step to a [`TraceSink`]
//! - counts crits and fumbles on uppercase-`D` dice
//!
//! [`DiceRoller`] bundles the collaborators for repeated use, and
//! [`Console`] adds the command echo and result lines of an interactive log.
//!
//! [`FormulaTable`]: dicescript_types::FormulaTable

mod console;
mod evaluator;
mod guard;
mod number;
mod roller;
mod tally;
mod trace;

pub use console::{Console, WELCOME_LINES};
pub use evaluator::{evaluate, evaluate_program, EvalResult, Evaluation};
pub use guard::RecursionGuard;
pub use number::format_number;
pub use roller::DiceRoller;
pub use tally::RollTally;
pub use trace::{NullTrace, TraceLog, TraceSink, LOG_CLEARED, LOG_HISTORY_LENGTH};
