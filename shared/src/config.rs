//! Tunable timings and limits for the simulations
//!
//! Loaded from TOML. Every section and key is optional; missing values fall
//! back to the defaults the page was designed around.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub reflex: ReflexConfig,
    pub plasticity: PlasticityConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReflexConfig {
    /// How long the signal rests on each path element.
    pub dwell_ms: u64,
    /// Extra hold on the effector before the run completes.
    pub final_hold_ms: u64,
}

impl Default for ReflexConfig {
    fn default() -> Self {
        Self {
            dwell_ms: 700,
            final_hold_ms: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlasticityConfig {
    pub initial_strength: u8,
    pub min_strength: u8,
    pub max_strength: u8,
    pub practice_gain: u8,
    pub disuse_loss: u8,
    pub neuron_flash_ms: u32,
}

impl Default for PlasticityConfig {
    fn default() -> Self {
        Self {
            initial_strength: 5,
            min_strength: 1,
            max_strength: 15,
            practice_gain: 2,
            disuse_loss: 1,
            neuron_flash_ms: 400,
        }
    }
}

impl SimulationConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reflex.dwell_ms == 0 || self.reflex.final_hold_ms == 0 {
            return Err(ConfigError::Invalid(
                "reflex durations must be greater than zero".to_string(),
            ));
        }
        let plasticity = &self.plasticity;
        if plasticity.min_strength > plasticity.max_strength {
            return Err(ConfigError::Invalid(format!(
                "plasticity.min_strength ({}) exceeds plasticity.max_strength ({})",
                plasticity.min_strength, plasticity.max_strength
            )));
        }
        if !(plasticity.min_strength..=plasticity.max_strength).contains(&plasticity.initial_strength) {
            return Err(ConfigError::Invalid(format!(
                "plasticity.initial_strength ({}) is outside {}..={}",
                plasticity.initial_strength, plasticity.min_strength, plasticity.max_strength
            )));
        }
        if plasticity.neuron_flash_ms == 0 {
            return Err(ConfigError::Invalid(
                "plasticity.neuron_flash_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(SimulationConfig::from_toml("").unwrap(), SimulationConfig::default());
    }

    #[test]
    fn partial_document_overrides_named_keys_only() {
        let config = SimulationConfig::from_toml(
            r#"
            [reflex]
            dwell_ms = 350

            [plasticity]
            max_strength = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.reflex.dwell_ms, 350);
        assert_eq!(config.reflex.final_hold_ms, 1000);
        assert_eq!(config.plasticity.max_strength, 20);
        assert_eq!(config.plasticity.initial_strength, 5);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let inverted = "[plasticity]\nmin_strength = 9\nmax_strength = 3\n";
        assert!(matches!(
            SimulationConfig::from_toml(inverted),
            Err(ConfigError::Invalid(_))
        ));

        let zero_dwell = "[reflex]\ndwell_ms = 0\n";
        assert!(matches!(
            SimulationConfig::from_toml(zero_dwell),
            Err(ConfigError::Invalid(_))
        ));

        let initial_above_max = "[plasticity]\ninitial_strength = 16\n";
        assert!(SimulationConfig::from_toml(initial_above_max).is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            SimulationConfig::from_toml("[reflex\ndwell_ms = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn shipped_defaults_round_trip_through_toml() {
        let text = toml::to_string(&SimulationConfig::default()).unwrap();
        assert_eq!(SimulationConfig::from_toml(&text).unwrap(), SimulationConfig::default());
    }
}
