//! Roll outcomes and success-level display.

use serde::{Deserialize, Serialize};

use crate::dice::RollResult;

/// The broad result of a resolution, for labels and effect triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// Succeeded and the dice landed in a critical band.
    CriticalSuccess,
    /// A standard success.
    Success,
    /// A standard failure.
    Failure,
    /// Failed and the dice landed in a critical band.
    Fumble,
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CriticalSuccess => write!(f, "Critical Success"),
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
            Self::Fumble => write!(f, "Fumble"),
        }
    }
}

/// A degree of success paired with the margin it came from.
///
/// Displays with an explicit sign. A zero degree takes its sign from the
/// unrounded margin, so a near miss shows `-0` and a near hit `+0`. An
/// exact zero margin shows `+0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessLevel {
    /// The final degree of success.
    pub degree: i32,
    /// The margin of success the degree was computed from.
    pub margin: i32,
}

impl SuccessLevel {
    /// True if the displayed sign is negative.
    pub fn is_negative(self) -> bool {
        self.degree < 0 || (self.degree == 0 && self.margin < 0)
    }
}

impl std::fmt::Display for SuccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.is_negative() { '-' } else { '+' };
        write!(f, "{sign}{}", self.degree.unsigned_abs())
    }
}

/// The immutable result of resolving a [`RollRequest`](crate::RollRequest).
///
/// Built once by [`evaluate`](crate::engine::evaluate); only read thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub(crate) formula: String,
    pub(crate) net_advantage: i32,
    pub(crate) roll: RollResult,
    pub(crate) target_value: i32,
    pub(crate) dice_kept: i32,
    pub(crate) margin_of_success: i32,
    pub(crate) degree_of_success: i32,
    pub(crate) signed_level: String,
    pub(crate) is_success: bool,
    pub(crate) is_critical: bool,
    pub(crate) is_critical_success: bool,
    pub(crate) is_fumble: bool,
}

impl RollOutcome {
    /// Percentile formula in dice notation (`1d100`, `2d100kl`, ...).
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Net advantage the roll was made with.
    pub fn net_advantage(&self) -> i32 {
        self.net_advantage
    }

    /// Every die rolled, kept and discarded.
    pub fn roll(&self) -> &RollResult {
        &self.roll
    }

    /// The target the roll was made against.
    pub fn target_value(&self) -> i32 {
        self.target_value
    }

    /// The percentile value actually used.
    pub fn dice_kept(&self) -> i32 {
        self.dice_kept
    }

    /// `target - dice + luck`.
    pub fn margin_of_success(&self) -> i32 {
        self.margin_of_success
    }

    /// Truncated tens of the margin plus the flat modifier.
    pub fn degree_of_success(&self) -> i32 {
        self.degree_of_success
    }

    /// Degree of success with its display sign.
    pub fn success_level(&self) -> SuccessLevel {
        SuccessLevel {
            degree: self.degree_of_success,
            margin: self.margin_of_success,
        }
    }

    /// Degree of success is zero or more.
    pub fn is_success(&self) -> bool {
        self.is_success
    }

    /// The kept die fell in a critical band, regardless of success.
    pub fn is_critical(&self) -> bool {
        self.is_critical
    }

    /// Critical and successful.
    pub fn is_critical_success(&self) -> bool {
        self.is_critical_success
    }

    /// Critical and failed.
    pub fn is_fumble(&self) -> bool {
        self.is_fumble
    }

    /// Degree of success rendered with its sign (`+2`, `-0`).
    pub fn signed_level(&self) -> &str {
        &self.signed_level
    }

    /// Broad outcome category.
    pub fn kind(&self) -> OutcomeKind {
        match (self.is_success, self.is_critical) {
            (true, true) => OutcomeKind::CriticalSuccess,
            (true, false) => OutcomeKind::Success,
            (false, false) => OutcomeKind::Failure,
            (false, true) => OutcomeKind::Fumble,
        }
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vs {}: {} SL ({})",
            self.dice_kept,
            self.target_value,
            self.success_level(),
            self.kind()
        )
    }
}
