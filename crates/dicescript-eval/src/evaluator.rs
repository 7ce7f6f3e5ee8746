//! Core expression evaluator.
//!
//! Walks the AST produced by the parser, rolling dice through an injected
//! RNG and reporting each step to a [`TraceSink`]. All per-command state
//! (recursion guard, roll tally, depth, gas) lives in a [`Session`] that is
//! created for one top-level evaluation and dropped at its end.

use crate::guard::RecursionGuard;
use crate::number::format_number;
use crate::tally::RollTally;
use crate::trace::TraceSink;
use dicescript_parser::parse_source;
use dicescript_types::ast::*;
use dicescript_types::{DiceError, ErrorKind, FormulaTable, Limits, Span};
use rand::Rng;

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, DiceError>;

/// Outcome of one successful top-level evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// `None` when the command was empty.
    pub value: Option<f64>,
    /// Crits and fumbles that count towards the result.
    pub tally: RollTally,
}

/// Evaluate one command.
///
/// `table` resolves `[name]` references, `sink` receives the trace, and
/// `rng` draws every die.
pub fn evaluate<R: Rng + ?Sized>(
    source: &str,
    table: &dyn FormulaTable,
    sink: &mut dyn TraceSink,
    rng: &mut R,
    limits: &Limits,
) -> EvalResult<Evaluation> {
    let program = parse_source(source, limits)?;
    evaluate_program(&program, table, sink, rng, limits)
}

/// Evaluate an already parsed command.
pub fn evaluate_program<R: Rng + ?Sized>(
    program: &Program,
    table: &dyn FormulaTable,
    sink: &mut dyn TraceSink,
    rng: &mut R,
    limits: &Limits,
) -> EvalResult<Evaluation> {
    let mut session = Session::new(table, sink, rng, limits);
    let value = match &program.expr {
        Some(expr) => Some(session.eval_expr(expr)?),
        None => None,
    };
    debug_assert!(session.guard.is_empty());
    log::debug!(
        "evaluated to {:?} in {} steps ({} crits, {} fumbles)",
        value,
        session.gas,
        session.tally.crits,
        session.tally.fumbles
    );
    Ok(Evaluation {
        value,
        tally: session.tally,
    })
}

/// Mutable state for one top-level evaluation.
struct Session<'a, R: Rng + ?Sized> {
    table: &'a dyn FormulaTable,
    sink: &'a mut dyn TraceSink,
    rng: &'a mut R,
    limits: &'a Limits,
    /// Formulas whose bodies are being evaluated.
    guard: RecursionGuard,
    tally: RollTally,
    /// Steps taken so far.
    gas: u64,
    /// Current evaluation nesting depth, across formula references.
    depth: u32,
}

impl<'a, R: Rng + ?Sized> Session<'a, R> {
    fn new(
        table: &'a dyn FormulaTable,
        sink: &'a mut dyn TraceSink,
        rng: &'a mut R,
        limits: &'a Limits,
    ) -> Self {
        Self {
            table,
            sink,
            rng,
            limits,
            guard: RecursionGuard::new(),
            tally: RollTally::default(),
            gas: 0,
            depth: 0,
        }
    }

    /// Consume `steps` units of gas. Returns error if exhausted.
    fn burn(&mut self, steps: u64, span: Span) -> EvalResult<()> {
        self.gas = self.gas.saturating_add(steps);
        if self.gas > self.limits.gas_limit {
            log::warn!("evaluation exceeded {} steps", self.limits.gas_limit);
            return Err(DiceError::at(
                ErrorKind::WorkLimitExceeded,
                format!("evaluation exceeded {} steps", self.limits.gas_limit),
                span,
            ));
        }
        Ok(())
    }

    fn emit(&mut self, lines: Vec<String>) {
        log::trace!("{}", lines.join(" | "));
        self.sink.emit(&lines);
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expression evaluation
    // ══════════════════════════════════════════════════════════════════════

    fn eval_expr(&mut self, expr: &Expr) -> EvalResult<f64> {
        self.burn(1, expr.span)?;
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            self.depth -= 1;
            log::warn!("evaluation nested deeper than {}", self.limits.max_depth);
            return Err(DiceError::at(
                ErrorKind::NestingTooDeep,
                format!("maximum nesting depth is {}", self.limits.max_depth),
                expr.span,
            ));
        }
        let result = self.eval_kind(expr);
        self.depth -= 1;
        result
    }

    fn eval_kind(&mut self, expr: &Expr) -> EvalResult<f64> {
        match &expr.kind {
            ExprKind::Number(n) => Ok(*n),
            ExprKind::Group(inner) => self.eval_expr(inner),
            ExprKind::FormulaRef(name) => self.eval_formula_ref(name, expr.span),
            ExprKind::DieRoll {
                count,
                sides,
                tracks_crits,
            } => self.eval_die_roll(count.as_deref(), sides, *tracks_crits),
            ExprKind::Advantage { mode, level, body } => {
                self.eval_advantage(*mode, level.as_deref(), body)
            }
            ExprKind::Binary { left, op, right } => self.eval_binary(left, *op, right),
            // Negation is not traced
            ExprKind::Negate(inner) => Ok(-self.eval_expr(inner)?),
        }
    }

    // ── Arithmetic ───────────────────────────────────────────────────────

    fn eval_binary(&mut self, left: &Expr, op: BinOp, right: &Expr) -> EvalResult<f64> {
        let lv = self.eval_expr(left)?;
        let rv = self.eval_expr(right)?;
        let result = op.apply(lv, rv);
        self.emit(vec![
            format!(
                "{} {} {} {}:",
                op.verb(),
                format_number(lv),
                op.as_str(),
                format_number(rv)
            ),
            format_number(result),
        ]);
        Ok(result)
    }

    // ── Dice ─────────────────────────────────────────────────────────────

    fn eval_die_roll(
        &mut self,
        count: Option<&Expr>,
        sides: &Expr,
        tracks_crits: bool,
    ) -> EvalResult<f64> {
        let raw_count = match count {
            Some(expr) => self.eval_expr(expr)?,
            None => 1.0,
        };
        let max_dice = self.limits.max_dice;
        if !raw_count.is_finite() || raw_count < 0.0 || raw_count > f64::from(max_dice) {
            return Err(DiceError::at(
                ErrorKind::InvalidDiceCount,
                format!(
                    "dice count must be between 0 and {max_dice}, got {}",
                    format_number(raw_count)
                ),
                count.map(|e| e.span).unwrap_or(sides.span),
            ));
        }

        let raw_sides = self.eval_expr(sides)?;
        if !raw_sides.is_finite() || raw_sides < 1.0 {
            return Err(DiceError::at(
                ErrorKind::InvalidSidesCount,
                format!(
                    "a die needs at least 1 side, got {}",
                    format_number(raw_sides)
                ),
                sides.span,
            ));
        }

        let count = raw_count.floor() as u32;
        let sides_f = raw_sides.floor();
        // Saturates for absurdly large dice; the value is still a valid face count
        let face_count = sides_f as u64;
        self.burn(u64::from(count), sides.span)?;

        let rolls: Vec<u64> = (0..count)
            .map(|_| self.rng.random_range(1..=face_count))
            .collect();
        let total: f64 = rolls.iter().map(|&r| r as f64).sum();

        if tracks_crits {
            for &roll in &rolls {
                // A one-sided die is both at once
                if roll == 1 {
                    self.tally.fumbles += 1;
                }
                if roll == face_count {
                    self.tally.crits += 1;
                }
            }
        }

        let label = |roll: u64| -> &'static str {
            if !tracks_crits {
                ""
            } else if roll == 1 {
                " CRIT FAIL!"
            } else if roll == face_count {
                " CRIT!"
            } else {
                ""
            }
        };
        let sides_text = format_number(sides_f);

        if count == 1 {
            self.emit(vec![format!(
                "Rolling 1 die with {sides_text} sides: {}{}",
                rolls[0],
                label(rolls[0])
            )]);
        } else {
            let mut lines = Vec::with_capacity(rolls.len() + 2);
            lines.push(format!("Rolling {count} dice with {sides_text} sides:"));
            for (i, &roll) in rolls.iter().enumerate() {
                lines.push(format!("{}: {roll}{}", i + 1, label(roll)));
            }
            let joined: Vec<String> = rolls.iter().map(u64::to_string).collect();
            lines.push(format!("{} = {}", joined.join(" + "), format_number(total)));
            self.emit(lines);
        }

        Ok(total)
    }

    // ── Advantage / disadvantage ─────────────────────────────────────────

    fn eval_advantage(
        &mut self,
        mode: AdvantageMode,
        level: Option<&Expr>,
        body: &Expr,
    ) -> EvalResult<f64> {
        let level_value = match level {
            Some(expr) => self.eval_expr(expr)?,
            None => 1.0,
        };
        let max_level = self.limits.max_advantage_level;
        if !level_value.is_finite() || level_value < 0.0 || level_value > f64::from(max_level) {
            return Err(DiceError::at(
                ErrorKind::InvalidAdvantageLevel,
                format!(
                    "{} level must be between 0 and {max_level}, got {}",
                    mode.as_str(),
                    format_number(level_value)
                ),
                level.map(|e| e.span).unwrap_or(body.span),
            ));
        }
        // A fractional level still runs a trial for its partial step
        let extra_trials = level_value.ceil() as u32;

        let times = if level_value == 1.0 {
            String::new()
        } else {
            format!(" x{}", format_number(level_value))
        };
        self.emit(vec![
            format!("Trying with {}{times}:", mode.as_str()),
            "Trial 1:".to_string(),
        ]);

        // Only the kept trial's crits and fumbles count
        let baseline = self.tally;
        let mut best = self.eval_expr(body)?;
        let mut best_delta = self.tally.since(baseline);

        for trial in 0..extra_trials {
            self.emit(vec![format!("Trial {}:", trial + 2)]);
            self.tally = baseline;
            let value = self.eval_expr(body)?;
            if mode.prefers(value, best) {
                best = value;
                best_delta = self.tally.since(baseline);
            }
        }
        self.tally = baseline.plus(best_delta);

        self.emit(vec![format!(
            "Result with {}: {}",
            mode.as_str(),
            format_number(best)
        )]);
        Ok(best)
    }

    // ── Formula references ───────────────────────────────────────────────

    fn eval_formula_ref(&mut self, name: &str, span: Span) -> EvalResult<f64> {
        let table = self.table;
        let formula = table.lookup(name).ok_or_else(|| {
            DiceError::at(
                ErrorKind::FormulaNotFound,
                format!("no formula named '{name}'"),
                span,
            )
        })?;
        if !self.guard.push(name) {
            return Err(DiceError::at(
                ErrorKind::SelfReferentialFormula,
                format!("formula '{name}' refers to itself"),
                span,
            ));
        }

        self.emit(vec![format!("Evaluating formula [{name}]:")]);
        log::debug!("evaluating formula [{name}] at depth {}", self.guard.depth());
        let result = self.eval_formula_body(&formula.code);
        self.guard.pop();

        let value = result.map_err(|e| e.in_formula(name))?;
        let Some(value) = value else {
            return Err(DiceError::at(
                ErrorKind::FormulaIllDefined,
                format!("formula '{name}' has no value"),
                span,
            ));
        };
        self.emit(vec![format!(
            "Formula [{name}] evaluated to {}",
            format_number(value)
        )]);
        Ok(value)
    }

    fn eval_formula_body(&mut self, code: &str) -> EvalResult<Option<f64>> {
        let program = parse_source(code, self.limits)?;
        match &program.expr {
            Some(expr) => Ok(Some(self.eval_expr(expr)?)),
            None => Ok(None),
        }
    }
}
