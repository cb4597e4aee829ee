//! Roll requests: everything a single resolution needs.

use serde::{Deserialize, Serialize};

use crate::config::RollConfig;
use crate::error::{EngineError, EngineResult};
use crate::percentile::Advantage;

/// Upper bound on advantage or disadvantage sources in one request.
pub const MAX_SOURCES: u32 = 100;

/// Input to a single degree-of-success resolution.
///
/// Built fresh for every roll attempt. When parsed from JSON the target and
/// both critical thresholds are required; the counts and modifiers default
/// to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    /// Percentile value to meet or undercut (usually 0-100, not clamped).
    pub target_value: i32,
    /// Number of stacking advantage sources.
    #[serde(default)]
    pub advantage_count: u32,
    /// Number of stacking disadvantage sources.
    #[serde(default)]
    pub disadvantage_count: u32,
    /// Luck spent on this roll, added straight to the margin.
    #[serde(default)]
    pub luck_applied: i32,
    /// Flat adjustment to the computed success level.
    #[serde(default)]
    pub success_level_modifier: i32,
    /// Dice at or below this value are critical.
    pub critical_success_threshold: i32,
    /// Dice at or above this value are critical.
    pub critical_fumble_threshold: i32,
}

impl RollRequest {
    /// A plain roll against `target_value` with the default thresholds.
    pub fn new(target_value: i32) -> Self {
        let config = RollConfig::default();
        Self {
            target_value,
            advantage_count: 0,
            disadvantage_count: 0,
            luck_applied: 0,
            success_level_modifier: 0,
            critical_success_threshold: config.critical_success_threshold,
            critical_fumble_threshold: config.critical_fumble_threshold,
        }
    }

    /// Set the advantage and disadvantage source counts.
    pub fn with_advantage(mut self, advantage: u32, disadvantage: u32) -> Self {
        self.advantage_count = advantage;
        self.disadvantage_count = disadvantage;
        self
    }

    /// Set the luck applied to the margin.
    pub fn with_luck(mut self, luck: i32) -> Self {
        self.luck_applied = luck;
        self
    }

    /// Set the flat success-level modifier.
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.success_level_modifier = modifier;
        self
    }

    /// Set both critical thresholds.
    pub fn with_thresholds(mut self, critical_success: i32, critical_fumble: i32) -> Self {
        self.critical_success_threshold = critical_success;
        self.critical_fumble_threshold = critical_fumble;
        self
    }

    /// Net advantage of this request.
    pub fn advantage(&self) -> Advantage {
        Advantage::from_counts(self.advantage_count, self.disadvantage_count)
    }

    /// Signed net advantage count.
    pub fn net_advantage(&self) -> i32 {
        self.advantage().net()
    }

    /// Reject requests that would produce a misleading outcome.
    pub fn validate(&self) -> EngineResult<()> {
        if self.advantage_count > MAX_SOURCES || self.disadvantage_count > MAX_SOURCES {
            return Err(EngineError::InvalidRequest(format!(
                "at most {MAX_SOURCES} advantage or disadvantage sources are allowed"
            )));
        }
        for (name, value) in [
            ("critical_success_threshold", self.critical_success_threshold),
            ("critical_fumble_threshold", self.critical_fumble_threshold),
        ] {
            if !(0..=101).contains(&value) {
                return Err(EngineError::InvalidRequest(format!(
                    "{name} must be between 0 and 101, got {value}"
                )));
            }
        }
        if self.critical_success_threshold >= self.critical_fumble_threshold {
            return Err(EngineError::InvalidRequest(format!(
                "critical success threshold {} overlaps fumble threshold {}",
                self.critical_success_threshold, self.critical_fumble_threshold
            )));
        }
        Ok(())
    }

    /// Parse and validate a request from JSON.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let request: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidRequest(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    /// Parse and validate a JSON array of requests.
    pub fn list_from_json(json: &str) -> EngineResult<Vec<Self>> {
        let requests: Vec<Self> = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidRequest(e.to_string()))?;
        for request in &requests {
            request.validate()?;
        }
        Ok(requests)
    }
}
