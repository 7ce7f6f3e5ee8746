//! Stack of formulas currently being evaluated.

/// Names of the formulas whose bodies are on the call stack, innermost
/// last. A name may appear at most once.
#[derive(Debug, Clone, Default)]
pub struct RecursionGuard {
    stack: Vec<String>,
}

impl RecursionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is already being evaluated.
    pub fn contains(&self, name: &str) -> bool {
        self.stack.iter().any(|n| n == name)
    }

    /// Push `name`. Returns `false` (and leaves the stack unchanged) if it
    /// is already present.
    pub fn push(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.stack.push(name.to_string());
        true
    }

    /// Pop the innermost name.
    pub fn pop(&mut self) -> Option<String> {
        self.stack.pop()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
