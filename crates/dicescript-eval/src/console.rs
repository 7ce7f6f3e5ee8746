//! The command/log loop a host front end drives.
//!
//! Echoes each command into a bounded [`TraceLog`], runs it, and appends
//! either the result (with its crit/fumble summary) or the error message.

use crate::evaluator::EvalResult;
use crate::number::format_number;
use crate::roller::DiceRoller;
use crate::trace::TraceLog;
use dicescript_types::{DiceError, ErrorKind, FormulaTable, Limits};
use rand::rngs::StdRng;

/// Greeting written by [`Console::welcome`].
pub const WELCOME_LINES: [&str; 3] = [
    "Welcome!",
    "Enter what you'd like to roll below:",
    "(Check out the help tab for more info!)",
];

/// A formula table plus the log its commands write to.
pub struct Console<T> {
    roller: DiceRoller<T, TraceLog>,
}

impl<T: FormulaTable> Console<T> {
    /// Create a console seeded from the operating system.
    #[cfg(feature = "os-rng")]
    pub fn new(table: T) -> Self {
        Self {
            roller: DiceRoller::new(table, TraceLog::new()),
        }
    }

    /// Create a console with a reproducible seed.
    pub fn with_seed(table: T, seed: u64) -> Self {
        Self {
            roller: DiceRoller::with_seed(table, TraceLog::new(), seed),
        }
    }

    pub fn with_rng(table: T, rng: StdRng) -> Self {
        Self {
            roller: DiceRoller::with_rng(table, TraceLog::new(), rng),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.roller = self.roller.with_limits(limits);
        self
    }

    /// Run a command and log it.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn execute(&mut self, code: &str) -> Option<EvalResult<f64>> {
        if code.trim().is_empty() {
            return None;
        }
        self.roller.sink_mut().push_lines([format!("> {code}")]);

        let outcome = self.roller.evaluate(code).and_then(|evaluation| {
            evaluation
                .value
                .ok_or_else(|| DiceError::new(ErrorKind::UnexpectedEndOfExpression))
        });

        let line = match &outcome {
            Ok(value) => format!(
                "Result: {}{}",
                format_number(*value),
                self.roller.crit_fumble_summary()
            ),
            Err(err) => {
                log::debug!("command {code:?} failed: {err}");
                format!("Error: {}", err.kind.message())
            }
        };
        self.roller.sink_mut().push_lines([line]);
        Some(outcome)
    }

    /// Run the stored code of formula `name`, as if it had been typed.
    ///
    /// Returns `None` if there is no such formula.
    pub fn roll_formula(&mut self, name: &str) -> Option<EvalResult<f64>> {
        let code = self.roller.table().lookup(name)?.code.clone();
        self.execute(&code)
    }

    /// Write the greeting lines.
    pub fn welcome(&mut self) {
        self.roller.sink_mut().push_lines(WELCOME_LINES);
    }

    /// Clear the log.
    pub fn clear(&mut self) {
        self.roller.sink_mut().clear();
    }

    pub fn log(&self) -> &TraceLog {
        self.roller.sink()
    }

    pub fn formulas(&self) -> &T {
        self.roller.table()
    }

    pub fn formulas_mut(&mut self) -> &mut T {
        self.roller.table_mut()
    }
}
