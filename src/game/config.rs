// src/game/config.rs

//! Arcade configuration: register size, RNG seed, and scoring knobs.
//! Loadable from a TOML file; every field has a default so a missing or
//! partial file still yields a playable setup.

use crate::core::constants::{register, scoring};
use crate::core::ArcadeError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArcadeConfig {
    /// Register size, 1 through 4.
    pub qubits: u8,
    /// Fixed measurement seed. Unset means OS entropy.
    pub seed: Option<u64>,
    /// Points paid per successful gate press.
    pub points_per_gate: u32,
    /// Point total gating each level, multiplied by the current level.
    pub level_step: u32,
    /// One-time reward for completing a mission.
    pub mission_bonus: u32,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            qubits: register::DEFAULT_QUBITS,
            seed: None,
            points_per_gate: scoring::POINTS_PER_GATE,
            level_step: scoring::LEVEL_STEP,
            mission_bonus: scoring::MISSION_BONUS,
        }
    }
}

impl ArcadeConfig {
    /// Loads and validates a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ArcadeError> {
        let text = fs::read_to_string(path).map_err(|e| ArcadeError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config: ArcadeConfig = toml::from_str(&text).map_err(|e| ArcadeError::Config {
            message: format!("cannot parse {}: {}", path.display(), e),
        })?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "loaded arcade config");
        Ok(config)
    }

    /// Checks the settings against the arcade's limits.
    pub fn validate(&self) -> Result<(), ArcadeError> {
        if !(register::MIN_QUBITS..=register::MAX_QUBITS).contains(&self.qubits) {
            return Err(ArcadeError::Config {
                message: format!(
                    "qubits must be between {} and {}, got {}",
                    register::MIN_QUBITS,
                    register::MAX_QUBITS,
                    self.qubits
                ),
            });
        }
        if self.level_step == 0 {
            return Err(ArcadeError::Config {
                message: "level_step must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ArcadeConfig::default();
        assert_eq!(config.qubits, 4);
        assert_eq!(config.points_per_gate, 30);
        assert_eq!(config.level_step, 250);
        assert_eq!(config.mission_bonus, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_register() {
        let config = ArcadeConfig {
            qubits: 5,
            ..ArcadeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ArcadeError::Config { .. })));

        let config = ArcadeConfig {
            qubits: 0,
            ..ArcadeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_level_step() {
        let config = ArcadeConfig {
            level_step: 0,
            ..ArcadeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: ArcadeConfig = toml::from_str("qubits = 2\nseed = 7\n").expect("parses");
        assert_eq!(config.qubits, 2);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.level_step, 250);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<ArcadeConfig>("lives = 3\n").is_err());
    }
}
