//! Percentile rolls with stacking advantage and disadvantage.
//!
//! Advantage and disadvantage sources cancel one another out and collapse
//! into a single net count. A net of zero rolls one d100. Any other net
//! rolls `|net| + 1` d100 and keeps one of them: the lowest under
//! advantage (low rolls succeed), the highest under disadvantage.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::dice::{DicePool, Die, RollResult};
use crate::request::MAX_SOURCES;

/// Which die of a percentile roll counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeepRule {
    /// A single die was rolled; it counts.
    Single,
    /// Keep the lowest die (advantage).
    Lowest,
    /// Keep the highest die (disadvantage).
    Highest,
}

impl KeepRule {
    /// Mark exactly one die of `roll` as kept according to this rule.
    ///
    /// Ties keep the earliest die so the breakdown stays stable.
    pub fn apply(self, roll: &mut RollResult) {
        let chosen = match self {
            Self::Single => (!roll.dice.is_empty()).then_some(0),
            Self::Lowest => roll
                .dice
                .iter()
                .enumerate()
                .min_by_key(|(_, d)| d.value)
                .map(|(i, _)| i),
            Self::Highest => roll
                .dice
                .iter()
                .enumerate()
                .rev()
                .max_by_key(|(_, d)| d.value)
                .map(|(i, _)| i),
        };
        for (i, die) in roll.dice.iter_mut().enumerate() {
            die.kept = Some(i) == chosen;
        }
    }

    /// Dice-notation suffix for this rule (`kl`, `kh`, or nothing).
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Single => "",
            Self::Lowest => "kl",
            Self::Highest => "kh",
        }
    }
}

/// Net advantage: advantage sources minus disadvantage sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advantage {
    net: i32,
}

impl Advantage {
    /// Wrap an already-computed net advantage.
    pub fn new(net: i32) -> Self {
        Self { net }
    }

    /// Compute the net advantage from stacking source counts.
    pub fn from_counts(advantage: u32, disadvantage: u32) -> Self {
        let net = i64::from(advantage) - i64::from(disadvantage);
        Self {
            net: net.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
        }
    }

    /// The signed net count.
    pub fn net(self) -> i32 {
        self.net
    }

    /// Limit the net count to `±max`.
    pub fn clamped(self, max: u32) -> Self {
        let max = i32::try_from(max).unwrap_or(i32::MAX);
        Self {
            net: self.net.clamp(-max, max),
        }
    }

    /// How the kept die is chosen.
    pub fn keep_rule(self) -> KeepRule {
        match self.net.signum() {
            1 => KeepRule::Lowest,
            -1 => KeepRule::Highest,
            _ => KeepRule::Single,
        }
    }

    /// Number of d100 rolled.
    pub fn dice_count(self) -> u32 {
        self.net.unsigned_abs().saturating_add(1)
    }

    /// The roll in dice notation, e.g. `1d100` or `3d100kl`.
    pub fn formula(self) -> String {
        format!(
            "{}{}{}",
            self.dice_count(),
            Die::D100,
            self.keep_rule().suffix()
        )
    }
}

/// Roll percentile dice for the given net advantage.
///
/// The returned breakdown holds every die rolled with exactly one marked
/// kept; [`RollResult::kept_value`] is the value to resolve against and is
/// always in `1..=100`. Nets beyond [`MAX_SOURCES`] roll as `±MAX_SOURCES`.
pub fn roll_percentile(net_advantage: i32, rng: &mut StdRng) -> RollResult {
    let advantage = Advantage::new(net_advantage).clamped(MAX_SOURCES);
    let mut roll = DicePool::new()
        .add(Die::D100, advantage.dice_count())
        .roll(rng);
    advantage.keep_rule().apply(&mut roll);
    tracing::trace!(net_advantage, %roll, "rolled percentile");
    roll
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DieResult;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn unkept(values: &[u32]) -> RollResult {
        RollResult {
            dice: values
                .iter()
                .map(|&value| DieResult {
                    die: Die::D100,
                    value,
                    kept: false,
                })
                .collect(),
        }
    }

    #[test]
    fn net_from_counts() {
        assert_eq!(Advantage::from_counts(2, 1).net(), 1);
        assert_eq!(Advantage::from_counts(0, 3).net(), -3);
        assert_eq!(Advantage::from_counts(4, 4).net(), 0);
        assert_eq!(Advantage::from_counts(u32::MAX, 0).net(), i32::MAX);
    }

    #[test]
    fn keep_rule_follows_sign() {
        assert_eq!(Advantage::new(0).keep_rule(), KeepRule::Single);
        assert_eq!(Advantage::new(2).keep_rule(), KeepRule::Lowest);
        assert_eq!(Advantage::new(-1).keep_rule(), KeepRule::Highest);
    }

    #[test]
    fn dice_count_and_formula() {
        assert_eq!(Advantage::new(0).dice_count(), 1);
        assert_eq!(Advantage::new(0).formula(), "1d100");
        assert_eq!(Advantage::new(2).formula(), "3d100kl");
        assert_eq!(Advantage::new(-1).formula(), "2d100kh");
    }

    #[test]
    fn clamped_limits_both_directions() {
        assert_eq!(Advantage::new(9).clamped(5).net(), 5);
        assert_eq!(Advantage::new(-9).clamped(5).net(), -5);
        assert_eq!(Advantage::new(3).clamped(5).net(), 3);
    }

    #[test]
    fn keep_lowest_marks_one_die() {
        let mut roll = unkept(&[44, 12, 71]);
        KeepRule::Lowest.apply(&mut roll);
        assert_eq!(roll.kept_value(), Some(12));
        assert_eq!(roll.kept().count(), 1);
    }

    #[test]
    fn keep_highest_marks_one_die() {
        let mut roll = unkept(&[44, 12, 71]);
        KeepRule::Highest.apply(&mut roll);
        assert_eq!(roll.kept_value(), Some(71));
        assert_eq!(roll.kept().count(), 1);
    }

    #[test]
    fn ties_keep_first_die() {
        let mut roll = unkept(&[20, 20]);
        KeepRule::Lowest.apply(&mut roll);
        assert!(roll.dice[0].kept);
        assert!(!roll.dice[1].kept);

        let mut roll = unkept(&[90, 90]);
        KeepRule::Highest.apply(&mut roll);
        assert!(roll.dice[0].kept);
        assert!(!roll.dice[1].kept);
    }

    #[test]
    fn two_advantage_one_disadvantage_rolls_two_keeps_lower() {
        let net = Advantage::from_counts(2, 1).net();
        let mut rng = StdRng::seed_from_u64(7);
        let roll = roll_percentile(net, &mut rng);
        assert_eq!(roll.count(), 2);
        assert_eq!(roll.kept_value(), Some(roll.lowest()));
    }

    #[test]
    fn extreme_nets_roll_a_bounded_pool() {
        let mut rng = StdRng::seed_from_u64(13);
        for net in [i32::MIN, -1_000_000, 1_000_000, i32::MAX] {
            let roll = roll_percentile(net, &mut rng);
            assert_eq!(roll.count(), MAX_SOURCES as usize + 1);
            assert_eq!(roll.kept().count(), 1);
            let kept = roll.kept_value().unwrap();
            assert!((1..=100).contains(&kept));
            if net > 0 {
                assert_eq!(kept, roll.lowest());
            } else {
                assert_eq!(kept, roll.highest());
            }
        }
    }

    #[test]
    fn normal_roll_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 100_000;
        let mut buckets = [0u32; 10];
        for _ in 0..trials {
            let value = roll_percentile(0, &mut rng).kept_value().unwrap_or(0);
            assert!((1..=100).contains(&value));
            buckets[((value - 1) / 10) as usize] += 1;
        }
        let expected = trials as f64 / 10.0;
        for count in buckets {
            let deviation = (f64::from(count) - expected).abs() / expected;
            assert!(deviation < 0.05, "bucket count {count} too far from {expected}");
        }
    }

    proptest! {
        #[test]
        fn advantage_keeps_lowest(seed in any::<u64>(), net in 1i32..=6) {
            let mut rng = StdRng::seed_from_u64(seed);
            let roll = roll_percentile(net, &mut rng);
            let kept = roll.kept_value().unwrap();
            prop_assert_eq!(roll.count(), net as usize + 1);
            prop_assert!(roll.dice.iter().all(|d| kept <= d.value));
            prop_assert!((1..=100).contains(&kept));
        }

        #[test]
        fn disadvantage_keeps_highest(seed in any::<u64>(), net in -6i32..=-1) {
            let mut rng = StdRng::seed_from_u64(seed);
            let roll = roll_percentile(net, &mut rng);
            let kept = roll.kept_value().unwrap();
            prop_assert_eq!(roll.count(), net.unsigned_abs() as usize + 1);
            prop_assert!(roll.dice.iter().all(|d| kept >= d.value));
            prop_assert!((1..=100).contains(&kept));
        }

        #[test]
        fn exactly_one_die_kept(seed in any::<u64>(), net in -6i32..=6) {
            let mut rng = StdRng::seed_from_u64(seed);
            let roll = roll_percentile(net, &mut rng);
            prop_assert_eq!(roll.kept().count(), 1);
        }
    }
}
