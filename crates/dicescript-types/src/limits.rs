use serde::{Deserialize, Serialize};

/// Largest number of dice a single roll may throw.
pub const DEFAULT_MAX_DICE: u32 = 999;

/// Largest advantage/disadvantage level (extra trials).
pub const DEFAULT_MAX_ADVANTAGE_LEVEL: u32 = 9;

/// Maximum nesting of sub-expressions and formula references.
pub const DEFAULT_MAX_DEPTH: u32 = 128;

/// Maximum evaluation steps (nodes visited plus dice thrown) per command.
pub const DEFAULT_GAS_LIMIT: u64 = 100_000;

/// Resource limits applied to one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_dice: u32,
    pub max_advantage_level: u32,
    pub max_depth: u32,
    pub gas_limit: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_dice: DEFAULT_MAX_DICE,
            max_advantage_level: DEFAULT_MAX_ADVANTAGE_LEVEL,
            max_depth: DEFAULT_MAX_DEPTH,
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }
}
