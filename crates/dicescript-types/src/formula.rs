//! Named formulas and the tables that hold them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A named, reusable piece of DiceScript source.
///
/// `category` is a free-form label; `code` is not validated until it is
/// referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    pub name: String,
    pub category: String,
    pub code: String,
}

impl Formula {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            code: code.into(),
        }
    }
}

/// Read-only lookup used by the evaluator to resolve `[name]`.
pub trait FormulaTable {
    /// Find a formula by exact name.
    fn lookup(&self, name: &str) -> Option<&Formula>;
}

impl<T: FormulaTable + ?Sized> FormulaTable for &T {
    fn lookup(&self, name: &str) -> Option<&Formula> {
        (**self).lookup(name)
    }
}

impl FormulaTable for [Formula] {
    fn lookup(&self, name: &str) -> Option<&Formula> {
        self.iter().find(|f| f.name == name)
    }
}

impl FormulaTable for Vec<Formula> {
    fn lookup(&self, name: &str) -> Option<&Formula> {
        self.as_slice().lookup(name)
    }
}

impl FormulaTable for BTreeMap<String, Formula> {
    fn lookup(&self, name: &str) -> Option<&Formula> {
        self.get(name)
    }
}

/// Errors raised while editing or importing a [`FormulaBook`].
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The import text is not a JSON list of `{name, category, code}`.
    #[error("invalid profile JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two formulas share a name.
    #[error("duplicate formula name: {0}")]
    DuplicateName(String),

    /// No formula with this name exists.
    #[error("unknown formula: {0}")]
    UnknownFormula(String),
}

/// Ordered, name-unique collection of formulas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaBook {
    formulas: Vec<Formula>,
}

impl FormulaBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from a list, rejecting duplicate names.
    pub fn from_formulas(formulas: impl IntoIterator<Item = Formula>) -> Result<Self, ProfileError> {
        let mut book = Self::new();
        for formula in formulas {
            let name = formula.name.clone();
            if !book.add(formula) {
                return Err(ProfileError::DuplicateName(name));
            }
        }
        Ok(book)
    }

    /// Import a profile: a JSON array of `{name, category, code}` records.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let formulas: Vec<Formula> = serde_json::from_str(json)?;
        Self::from_formulas(formulas)
    }

    /// Export as a JSON array in table order.
    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string(&self.formulas)?)
    }

    /// Append a formula. Returns `false` (and leaves the book unchanged)
    /// if the name is taken.
    pub fn add(&mut self, formula: Formula) -> bool {
        if self.position(&formula.name).is_some() {
            return false;
        }
        self.formulas.push(formula);
        true
    }

    /// Remove a formula by name.
    pub fn remove(&mut self, name: &str) -> Option<Formula> {
        let idx = self.position(name)?;
        Some(self.formulas.remove(idx))
    }

    /// Replace the formula called `name` in place. The replacement may be
    /// renamed as long as the new name is free.
    pub fn replace(&mut self, name: &str, formula: Formula) -> Result<Formula, ProfileError> {
        let idx = self
            .position(name)
            .ok_or_else(|| ProfileError::UnknownFormula(name.to_string()))?;
        if formula.name != name && self.position(&formula.name).is_some() {
            return Err(ProfileError::DuplicateName(formula.name));
        }
        Ok(std::mem::replace(&mut self.formulas[idx], formula))
    }

    /// Move a formula one slot towards the front. Returns `false` if it is
    /// already first or missing.
    pub fn move_up(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) if idx > 0 => {
                self.formulas.swap(idx, idx - 1);
                true
            }
            _ => false,
        }
    }

    /// Move a formula one slot towards the back. Returns `false` if it is
    /// already last or missing.
    pub fn move_down(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) if idx + 1 < self.formulas.len() => {
                self.formulas.swap(idx, idx + 1);
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Formula> {
        self.formulas.iter()
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.formulas.iter().position(|f| f.name == name)
    }
}

impl FormulaTable for FormulaBook {
    fn lookup(&self, name: &str) -> Option<&Formula> {
        self.formulas.lookup(name)
    }
}
