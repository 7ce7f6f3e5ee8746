//! DiceScript roller as a WASM module for browser environments.
//!
//! This crate exposes the DiceScript evaluator via `wasm-bindgen`. Every
//! function returns a JSON string so the page needs no generated bindings
//! for the result types.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { roll, check } from 'dicescript-wasm';
//!
//! await init();
//!
//! const formulas = JSON.stringify([{ name: "Str", category: "Stat", code: "2" }]);
//! const seed = crypto.getRandomValues(new Uint32Array(1))[0];
//! console.log(JSON.parse(roll("D20+[Str]", formulas, seed)));
//! // { success: true, value: 14, display: "14", summary: "", trace: [...], ... }
//! ```

use dicescript_eval::{format_number, DiceRoller};
use dicescript_types::profiles::builtin_profiles;
use dicescript_types::{DiceError, FormulaBook, Limits};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Outcome of [`roll`].
#[derive(Debug, Serialize)]
pub struct RollResult {
    pub success: bool,
    /// `null` for empty input and for non-finite results.
    pub value: Option<f64>,
    /// The value as the log prints it (`"Infinity"`, `"NaN"`, ...).
    pub display: Option<String>,
    /// Crit/fumble suffix, e.g. `" 2x CRIT!"`.
    pub summary: String,
    pub trace: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DiceError>,
    /// Set when `formulas_json` could not be loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_error: Option<String>,
}

/// Outcome of [`check`].
#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub valid: bool,
    /// `true` when the source holds no expression at all.
    pub empty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DiceError>,
}

/// Evaluate `source` against a JSON array of `{name, category, code}`
/// formulas (an empty string means no formulas).
///
/// The browser has no OS entropy source for `rand`, so the caller passes
/// a seed for the roll.
#[wasm_bindgen]
pub fn roll(source: &str, formulas_json: &str, seed: u32) -> String {
    to_json(&roll_result(source, formulas_json, u64::from(seed)))
}

/// Parse `source` without rolling anything.
///
/// Reports syntax errors only; missing formulas and dice bounds are
/// evaluation-time checks.
#[wasm_bindgen]
pub fn check(source: &str) -> String {
    let result = match dicescript_parser::parse_source(source, &Limits::default()) {
        Ok(program) => CheckResult {
            valid: true,
            empty: program.expr.is_none(),
            error: None,
        },
        Err(error) => CheckResult {
            valid: false,
            empty: false,
            error: Some(error),
        },
    };
    to_json(&result)
}

/// Return the crate version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Return the built-in profile templates as JSON:
/// `[{ "name": ..., "desc": ..., "data": [{name, category, code}, ...] }]`.
#[wasm_bindgen]
pub fn profile_templates() -> String {
    to_json(&builtin_profiles())
}

fn roll_result(source: &str, formulas_json: &str, seed: u64) -> RollResult {
    let book = if formulas_json.trim().is_empty() {
        FormulaBook::new()
    } else {
        match FormulaBook::from_json(formulas_json) {
            Ok(book) => book,
            Err(e) => {
                return RollResult {
                    success: false,
                    value: None,
                    display: None,
                    summary: String::new(),
                    trace: Vec::new(),
                    error: None,
                    import_error: Some(e.to_string()),
                }
            }
        }
    };

    let mut roller = DiceRoller::with_seed(book, Vec::<String>::new(), seed);
    let outcome = roller.evaluate(source);
    let summary = roller.crit_fumble_summary();
    let (_, trace) = roller.into_parts();

    match outcome {
        Ok(evaluation) => RollResult {
            success: true,
            value: evaluation.value.filter(|v| v.is_finite()),
            display: evaluation.value.map(format_number),
            summary,
            trace,
            error: None,
            import_error: None,
        },
        Err(error) => RollResult {
            success: false,
            value: None,
            display: None,
            summary,
            trace,
            error: Some(error),
            import_error: None,
        },
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"import_error":"Serialization error: {}"}}"#,
            e
        )
    })
}
