//! A reusable evaluator bound to a formula table and a trace sink.

use crate::evaluator::{evaluate, EvalResult, Evaluation};
use crate::tally::RollTally;
use crate::trace::TraceSink;
use dicescript_types::{FormulaTable, Limits};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Owns the collaborators an evaluation needs and remembers the tally of
/// the most recent one.
///
/// Each call to [`DiceRoller::evaluate`] starts from a fresh recursion guard
/// and tally; nothing else carries over between commands.
pub struct DiceRoller<T, S> {
    table: T,
    sink: S,
    rng: StdRng,
    limits: Limits,
    last_tally: RollTally,
}

impl<T: FormulaTable, S: TraceSink> DiceRoller<T, S> {
    /// Create a roller seeded from the operating system.
    #[cfg(feature = "os-rng")]
    pub fn new(table: T, sink: S) -> Self {
        Self::with_rng(table, sink, StdRng::from_os_rng())
    }

    /// Create a roller with a reproducible seed.
    pub fn with_seed(table: T, sink: S, seed: u64) -> Self {
        Self::with_rng(table, sink, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(table: T, sink: S, rng: StdRng) -> Self {
        Self {
            table,
            sink,
            rng,
            limits: Limits::default(),
            last_tally: RollTally::default(),
        }
    }

    /// Replace the default limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Evaluate one command. The tally is reset first, so after an error
    /// [`DiceRoller::crit_fumble_summary`] is empty.
    pub fn evaluate(&mut self, source: &str) -> EvalResult<Evaluation> {
        self.last_tally = RollTally::default();
        let evaluation = evaluate(
            source,
            &self.table,
            &mut self.sink,
            &mut self.rng,
            &self.limits,
        )?;
        self.last_tally = evaluation.tally;
        Ok(evaluation)
    }

    /// Crit/fumble suffix for the most recent evaluation, e.g.
    /// `" 2x CRIT! CRIT FAIL!"`, or `""`.
    pub fn crit_fumble_summary(&self) -> String {
        self.last_tally.summary()
    }

    pub fn last_tally(&self) -> RollTally {
        self.last_tally
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    /// Edit the formula table between evaluations.
    pub fn table_mut(&mut self) -> &mut T {
        &mut self.table
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_parts(self) -> (T, S) {
        (self.table, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicescript_types::{ErrorKind, Formula, FormulaBook};

    fn roller(formulas: &[(&str, &str)]) -> DiceRoller<FormulaBook, Vec<String>> {
        let book = FormulaBook::from_formulas(
            formulas
                .iter()
                .map(|(name, code)| Formula::new(*name, "Misc", *code)),
        )
        .unwrap();
        DiceRoller::with_seed(book, Vec::new(), 7)
    }

    #[test]
    fn test_summary_tracks_latest_evaluation_only() {
        let mut r = roller(&[]);
        r.evaluate("3D1").unwrap();
        assert_eq!(r.crit_fumble_summary(), " 3x CRIT! 3x CRIT FAIL!");
        r.evaluate("2+2").unwrap();
        assert_eq!(r.crit_fumble_summary(), "");
    }

    #[test]
    fn test_summary_is_empty_after_error() {
        let mut r = roller(&[]);
        r.evaluate("D1").unwrap();
        assert_eq!(r.crit_fumble_summary(), " CRIT! CRIT FAIL!");
        let err = r.evaluate("D1+").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEndOfExpression);
        assert_eq!(r.crit_fumble_summary(), "");
    }

    #[test]
    fn test_table_edits_apply_to_next_evaluation() {
        let mut r = roller(&[("Bonus", "2")]);
        assert_eq!(r.evaluate("[Bonus]*3").unwrap().value, Some(6.0));
        r.table_mut()
            .replace("Bonus", Formula::new("Bonus", "Misc", "5"))
            .unwrap();
        assert_eq!(r.evaluate("[Bonus]*3").unwrap().value, Some(15.0));
    }

    #[test]
    fn test_limits_are_configurable() {
        let mut r = roller(&[]).with_limits(Limits {
            max_dice: 10,
            ..Limits::default()
        });
        assert_eq!(
            r.evaluate("11d6").unwrap_err().kind,
            ErrorKind::InvalidDiceCount
        );
        assert!(r.evaluate("10d6").is_ok());
    }

    #[test]
    fn test_same_seed_same_rolls() {
        let mut a = roller(&[]);
        let mut b = roller(&[]);
        for _ in 0..20 {
            assert_eq!(a.evaluate("4d20").unwrap(), b.evaluate("4d20").unwrap());
        }
        assert_eq!(a.sink(), b.sink());
    }
}
