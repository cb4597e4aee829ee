//! Dice roll results and the per-die breakdown.

use serde::{Deserialize, Serialize};

use super::Die;

/// The result of rolling a single die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The type of die that was rolled.
    pub die: Die,
    /// The value rolled (1 to die.sides()).
    pub value: u32,
    /// Whether this die counts toward the result. Discarded dice are
    /// kept in the breakdown for display only.
    pub kept: bool,
}

impl DieResult {
    /// A kept die showing `value`.
    pub fn kept(die: Die, value: u32) -> Self {
        Self {
            die,
            value,
            kept: true,
        }
    }
}

/// The result of rolling a set of dice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual die results, in the order they were rolled.
    pub dice: Vec<DieResult>,
}

impl RollResult {
    /// Sum of all kept die values.
    pub fn total(&self) -> u64 {
        self.kept().map(|d| u64::from(d.value)).sum()
    }

    /// The highest single die value (kept or not), or 0 if empty.
    pub fn highest(&self) -> u32 {
        self.dice.iter().map(|d| d.value).max().unwrap_or(0)
    }

    /// The lowest single die value (kept or not), or 0 if empty.
    pub fn lowest(&self) -> u32 {
        self.dice.iter().map(|d| d.value).min().unwrap_or(0)
    }

    /// The value of the first kept die, if any.
    pub fn kept_value(&self) -> Option<u32> {
        self.kept().next().map(|d| d.value)
    }

    /// Iterate over the dice that count toward the result.
    pub fn kept(&self) -> impl Iterator<Item = &DieResult> {
        self.dice.iter().filter(|d| d.kept)
    }

    /// Iterate over the dice dropped by a keep rule.
    pub fn discarded(&self) -> impl Iterator<Item = &DieResult> {
        self.dice.iter().filter(|d| !d.kept)
    }

    /// Append another roll's dice to this one.
    pub fn extend(&mut self, other: RollResult) {
        self.dice.extend(other.dice);
    }

    /// Number of dice in the result.
    pub fn count(&self) -> usize {
        self.dice.len()
    }
}

impl std::fmt::Display for RollResult {
    /// Renders as `[35, (72)] = 35`; discarded dice are parenthesised.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self
            .dice
            .iter()
            .map(|d| {
                if d.kept {
                    d.value.to_string()
                } else {
                    format!("({})", d.value)
                }
            })
            .collect();
        write!(f, "[{}] = {}", values.join(", "), self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(values: &[(u32, bool)]) -> RollResult {
        RollResult {
            dice: values
                .iter()
                .map(|&(value, kept)| DieResult {
                    die: Die::D100,
                    value,
                    kept,
                })
                .collect(),
        }
    }

    #[test]
    fn total_counts_only_kept_dice() {
        let r = make_result(&[(15, true), (8, true), (90, false)]);
        assert_eq!(r.total(), 23);
    }

    #[test]
    fn highest_and_lowest_include_discarded() {
        let r = make_result(&[(30, true), (60, false), (10, false)]);
        assert_eq!(r.highest(), 60);
        assert_eq!(r.lowest(), 10);
    }

    #[test]
    fn empty_result() {
        let r = RollResult::default();
        assert_eq!(r.total(), 0);
        assert_eq!(r.highest(), 0);
        assert_eq!(r.lowest(), 0);
        assert_eq!(r.kept_value(), None);
        assert_eq!(r.count(), 0);
    }

    #[test]
    fn kept_and_discarded() {
        let r = make_result(&[(44, false), (12, true), (71, false)]);
        assert_eq!(r.kept_value(), Some(12));
        assert_eq!(r.kept().count(), 1);
        assert_eq!(r.discarded().count(), 2);
    }

    #[test]
    fn extend_appends() {
        let mut r = make_result(&[(1, true)]);
        r.extend(make_result(&[(2, true), (3, false)]));
        assert_eq!(r.count(), 3);
        assert_eq!(r.total(), 3);
    }

    #[test]
    fn total_does_not_overflow_u32() {
        let r = RollResult {
            dice: vec![DieResult::kept(Die::Custom(u32::MAX), u32::MAX); 3],
        };
        assert_eq!(r.total(), 3 * u64::from(u32::MAX));
    }

    #[test]
    fn display() {
        let r = make_result(&[(35, true), (72, false)]);
        assert_eq!(r.to_string(), "[35, (72)] = 35");
    }
}
