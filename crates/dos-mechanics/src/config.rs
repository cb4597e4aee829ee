//! Roll configuration and the request-building phase.
//!
//! A host assembles a roll in two steps: gather the target from a character
//! sheet plus whatever the player picked in a roll dialog, then resolve.
//! [`build_request`] is the first step; it merges the pieces with the
//! configured defaults into a validated [`RollRequest`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::percentile::Advantage;
use crate::request::RollRequest;

/// Ruleset-wide defaults for percentile checks.
///
/// Missing keys in a JSON file fall back to [`RollConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollConfig {
    /// Dice at or below this value are critical (default 5).
    pub critical_success_threshold: i32,
    /// Dice at or above this value are critical (default 96).
    pub critical_fumble_threshold: i32,
    /// Largest net advantage or disadvantage honoured (default 5).
    pub max_advantage: u32,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            critical_success_threshold: 5,
            critical_fumble_threshold: 96,
            max_advantage: 5,
        }
    }
}

impl RollConfig {
    /// Set both critical thresholds.
    pub fn with_thresholds(mut self, critical_success: i32, critical_fumble: i32) -> Self {
        self.critical_success_threshold = critical_success;
        self.critical_fumble_threshold = critical_fumble;
        self
    }

    /// Set the net advantage cap.
    pub fn with_max_advantage(mut self, max: u32) -> Self {
        self.max_advantage = max;
        self
    }

    /// Parse a configuration from JSON, filling gaps with defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))
    }

    /// Load a JSON configuration file.
    pub fn load(path: &Path) -> EngineResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), ?config, "loaded roll config");
        Ok(config)
    }
}

/// Situational modifiers chosen for a single roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollModifiers {
    /// Advantage sources.
    pub advantage: u32,
    /// Disadvantage sources.
    pub disadvantage: u32,
    /// Luck spent on the roll.
    pub luck: i32,
    /// Flat success-level adjustment from equipment or features.
    pub success_level_modifier: i32,
}

impl RollModifiers {
    /// Set advantage and disadvantage sources.
    pub fn with_advantage(mut self, advantage: u32, disadvantage: u32) -> Self {
        self.advantage = advantage;
        self.disadvantage = disadvantage;
        self
    }

    /// Set luck spent.
    pub fn with_luck(mut self, luck: i32) -> Self {
        self.luck = luck;
        self
    }

    /// Set the flat success-level adjustment.
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.success_level_modifier = modifier;
        self
    }
}

/// Merge a target value, dialog modifiers, and configuration into a request.
///
/// Net advantage beyond `config.max_advantage` is cancelled down: the larger
/// side is reduced until the net fits, so the request still records both
/// kinds of source.
pub fn build_request(
    config: &RollConfig,
    target_value: i32,
    modifiers: &RollModifiers,
) -> EngineResult<RollRequest> {
    let net = Advantage::from_counts(modifiers.advantage, modifiers.disadvantage);
    let capped = net.clamped(config.max_advantage);
    let (advantage_count, disadvantage_count) = match capped.net() {
        n if n > 0 => (
            modifiers.disadvantage.saturating_add(n.unsigned_abs()),
            modifiers.disadvantage,
        ),
        n if n < 0 => (
            modifiers.advantage,
            modifiers.advantage.saturating_add(n.unsigned_abs()),
        ),
        _ => (modifiers.advantage, modifiers.disadvantage),
    };
    if capped != net {
        tracing::debug!(
            requested = net.net(),
            capped = capped.net(),
            "net advantage capped"
        );
    }

    let request = RollRequest {
        target_value,
        advantage_count,
        disadvantage_count,
        luck_applied: modifiers.luck,
        success_level_modifier: modifiers.success_level_modifier,
        critical_success_threshold: config.critical_success_threshold,
        critical_fumble_threshold: config.critical_fumble_threshold,
    };
    request.validate()?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let cfg = RollConfig::default();
        assert_eq!(cfg.critical_success_threshold, 5);
        assert_eq!(cfg.critical_fumble_threshold, 96);
        assert_eq!(cfg.max_advantage, 5);
    }

    #[test]
    fn builder_methods() {
        let cfg = RollConfig::default()
            .with_thresholds(3, 98)
            .with_max_advantage(2);
        assert_eq!(cfg.critical_success_threshold, 3);
        assert_eq!(cfg.critical_fumble_threshold, 98);
        assert_eq!(cfg.max_advantage, 2);
    }

    #[test]
    fn partial_json_merges_with_defaults() {
        let cfg = RollConfig::from_json(r#"{"critical_fumble_threshold": 99}"#).unwrap();
        assert_eq!(cfg.critical_fumble_threshold, 99);
        assert_eq!(cfg.critical_success_threshold, 5);
        assert_eq!(cfg.max_advantage, 5);
    }

    #[test]
    fn malformed_json_rejected() {
        let result = RollConfig::from_json(r#"{"critical_fumble_threshold": "high"}"#);
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"critical_success_threshold": 10}}"#).unwrap();
        let cfg = RollConfig::load(file.path()).unwrap();
        assert_eq!(cfg.critical_success_threshold, 10);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = RollConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(EngineError::Io(_))));
    }

    #[test]
    fn build_request_merges_everything() {
        let cfg = RollConfig::default().with_thresholds(6, 96);
        let mods = RollModifiers::default()
            .with_advantage(2, 1)
            .with_luck(10)
            .with_modifier(1);
        let req = build_request(&cfg, 60, &mods).unwrap();
        assert_eq!(req.target_value, 60);
        assert_eq!(req.advantage_count, 2);
        assert_eq!(req.disadvantage_count, 1);
        assert_eq!(req.luck_applied, 10);
        assert_eq!(req.success_level_modifier, 1);
        assert_eq!(req.critical_success_threshold, 6);
    }

    #[test]
    fn build_request_caps_net_advantage() {
        let cfg = RollConfig::default().with_max_advantage(2);
        let mods = RollModifiers::default().with_advantage(6, 1);
        let req = build_request(&cfg, 50, &mods).unwrap();
        assert_eq!(req.net_advantage(), 2);
        assert_eq!(req.disadvantage_count, 1);

        let mods = RollModifiers::default().with_advantage(0, 4);
        let req = build_request(&cfg, 50, &mods).unwrap();
        assert_eq!(req.net_advantage(), -2);
    }

    #[test]
    fn build_request_rejects_bad_thresholds() {
        let cfg = RollConfig::default().with_thresholds(50, 40);
        assert!(build_request(&cfg, 50, &RollModifiers::default()).is_err());
    }
}
