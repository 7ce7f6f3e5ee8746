//! Crit/fumble counters for one evaluation.

use serde::{Deserialize, Serialize};

/// How many uppercase-`D` dice landed on their highest (crit) or lowest
/// (fumble) face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollTally {
    pub crits: u32,
    pub fumbles: u32,
}

impl RollTally {
    /// Counts gained since `baseline`.
    pub fn since(self, baseline: RollTally) -> RollTally {
        RollTally {
            crits: self.crits.saturating_sub(baseline.crits),
            fumbles: self.fumbles.saturating_sub(baseline.fumbles),
        }
    }

    /// `self` with `delta` added on.
    pub fn plus(self, delta: RollTally) -> RollTally {
        RollTally {
            crits: self.crits.saturating_add(delta.crits),
            fumbles: self.fumbles.saturating_add(delta.fumbles),
        }
    }

    /// Suffix for a result line: `" CRIT!"`, `" 2x CRIT! CRIT FAIL!"`, or
    /// empty when nothing was rolled on an edge face.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        push_count(&mut out, self.crits, "CRIT!");
        push_count(&mut out, self.fumbles, "CRIT FAIL!");
        out
    }
}

fn push_count(out: &mut String, count: u32, label: &str) {
    match count {
        0 => {}
        1 => {
            out.push(' ');
            out.push_str(label);
        }
        n => out.push_str(&format!(" {n}x {label}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        assert_eq!(RollTally::default().summary(), "");
        assert_eq!(RollTally { crits: 1, fumbles: 0 }.summary(), " CRIT!");
        assert_eq!(RollTally { crits: 0, fumbles: 3 }.summary(), " 3x CRIT FAIL!");
        assert_eq!(
            RollTally { crits: 2, fumbles: 1 }.summary(),
            " 2x CRIT! CRIT FAIL!"
        );
    }

    #[test]
    fn test_since_and_plus() {
        let base = RollTally { crits: 2, fumbles: 1 };
        let now = RollTally { crits: 5, fumbles: 1 };
        let delta = now.since(base);
        assert_eq!(delta, RollTally { crits: 3, fumbles: 0 });
        assert_eq!(base.plus(delta), now);
    }

    #[test]
    fn test_serializes_as_counts() {
        let json = serde_json::to_string(&RollTally { crits: 1, fumbles: 0 }).unwrap();
        assert_eq!(json, r#"{"crits":1,"fumbles":0}"#);
    }
}
