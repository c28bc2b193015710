//! Core configuration with documented constants
//!
//! Defaults come from `core::constants`. A TOML file may override any field;
//! missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::constants::*;
use crate::core::error::{FleetError, Result};
use crate::core::types::Tick;

/// Configuration for the order execution rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    // === RESCUE ===
    /// Ticks past `expire_tick` during which a rescue request is still honored
    pub rescue_grace_ticks: Tick,

    /// Ticks after which an unchanged rescue request is refreshed
    pub rescue_reissue_ticks: Tick,

    /// Distance difference under which two anchors count as tied
    ///
    /// Ties resolve to the lower raw entity index, which keeps the
    /// chosen anchor independent of scan order.
    pub anchor_tie_epsilon: f32,

    // === SCAFFOLDING ===
    /// Ticks between scaffolding ensure passes
    pub scaffold_cadence_ticks: Tick,

    // === DOCKING ===
    /// Docking range when the target has no policy of its own
    pub default_docking_range: f32,

    // === TELEMETRY ===
    /// Fixed capacity of the action event log
    ///
    /// Once full, appends are refused. Oldest entries are never evicted.
    pub max_action_events: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            rescue_grace_ticks: RESCUE_GRACE_TICKS,
            rescue_reissue_ticks: RESCUE_REISSUE_TICKS,
            anchor_tie_epsilon: ANCHOR_TIE_EPSILON,
            scaffold_cadence_ticks: SCAFFOLD_CADENCE_TICKS,
            default_docking_range: DEFAULT_DOCKING_RANGE,
            max_action_events: DEFAULT_MAX_ACTION_EVENTS,
        }
    }
}

impl CoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CoreConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.scaffold_cadence_ticks == 0 {
            return Err(FleetError::InvalidConfig(
                "scaffold_cadence_ticks must be at least 1".into(),
            ));
        }

        if !(self.default_docking_range > 0.0) {
            return Err(FleetError::InvalidConfig(format!(
                "default_docking_range ({}) must be positive",
                self.default_docking_range
            )));
        }

        if !(self.anchor_tie_epsilon >= 0.0) {
            return Err(FleetError::InvalidConfig(format!(
                "anchor_tie_epsilon ({}) must be non-negative",
                self.anchor_tie_epsilon
            )));
        }

        if self.max_action_events == 0 {
            return Err(FleetError::InvalidConfig(
                "max_action_events must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Squared default docking range, compared against squared distances
    pub fn default_docking_range_sq(&self) -> f32 {
        self.default_docking_range * self.default_docking_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CoreConfig::default().validate().is_ok());
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = CoreConfig::new();
        assert_eq!(config.rescue_grace_ticks, 60);
        assert_eq!(config.scaffold_cadence_ticks, 60);
        assert_eq!(config.default_docking_range_sq(), 20.25);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CoreConfig::from_toml_str("rescue_grace_ticks = 90\n").unwrap();
        assert_eq!(config.rescue_grace_ticks, 90);
        assert_eq!(config.scaffold_cadence_ticks, SCAFFOLD_CADENCE_TICKS);
    }

    #[test]
    fn test_zero_cadence_rejected() {
        let result = CoreConfig::from_toml_str("scaffold_cadence_ticks = 0\n");
        assert!(matches!(result, Err(FleetError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = CoreConfig::from_toml_str("max_action_events = \"lots\"\n");
        assert!(matches!(result, Err(FleetError::ConfigParse(_))));
    }

    #[test]
    fn test_negative_range_rejected() {
        let config = CoreConfig {
            default_docking_range: -1.0,
            ..CoreConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
