use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Default number of independent rounds per run
pub const DEFAULT_NUM_SIMULATIONS: usize = 10_000;
/// Default number of devices in each synthetic network
pub const DEFAULT_NUM_DEVICES: usize = 10;
/// Default password length
pub const DEFAULT_PASSWORD_COMPLEXITY: usize = 1;
/// Default probability that a correct guess against a vulnerable device lands
pub const DEFAULT_SUCCESS_PROBABILITY: f64 = 1.0;
/// Default symbol set for passwords
pub const DEFAULT_ALPHABET: &str = "0123456789";
/// Default cap on collision retries when allocating a unique password
pub const DEFAULT_MAX_ALLOCATION_ATTEMPTS: u32 = 10_000;

/// How the attacker picks the password it tries against each device
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GuessPolicy {
    /// Draw from the same distribution as device passwords, no exclusions
    #[default]
    Independent,
    /// Allocate a guess that is absent from the network's password set
    ExcludeNetwork,
}

/// Parameters of a simulation run
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub num_simulations: usize,
    pub num_devices: usize,
    /// Password length in symbols
    pub password_complexity: usize,
    pub success_probability: f64,
    pub alphabet: String,
    /// Master seed; drawn from entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Wall-clock budget, checked between rounds only
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Duration>,
    /// Worker threads for per-device trials (0 = rayon default)
    pub threads: usize,
    pub max_allocation_attempts: u32,
    pub guess_policy: GuessPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: DEFAULT_NUM_SIMULATIONS,
            num_devices: DEFAULT_NUM_DEVICES,
            password_complexity: DEFAULT_PASSWORD_COMPLEXITY,
            success_probability: DEFAULT_SUCCESS_PROBABILITY,
            alphabet: DEFAULT_ALPHABET.to_string(),
            seed: None,
            deadline: None,
            threads: 0,
            max_allocation_attempts: DEFAULT_MAX_ALLOCATION_ATTEMPTS,
            guess_policy: GuessPolicy::Independent,
        }
    }
}

impl SimulationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_simulations == 0 {
            return Err(ConfigError::NoSimulations);
        }
        if self.num_devices == 0 {
            return Err(ConfigError::NoDevices);
        }
        if self.password_complexity == 0 {
            return Err(ConfigError::ZeroPasswordLength);
        }
        if self.alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        if !(0.0..=1.0).contains(&self.success_probability) {
            // NaN also lands here
            return Err(ConfigError::InvalidProbability(self.success_probability));
        }
        if self.max_allocation_attempts == 0 {
            return Err(ConfigError::NoAllocationAttempts);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_simulations, 10_000);
        assert_eq!(config.num_devices, 10);
        assert_eq!(config.alphabet, "0123456789");
    }

    #[test]
    fn test_config_parsing() {
        let yaml = r#"
num_simulations: 50
num_devices: 4
password_complexity: 2
success_probability: 0.25
alphabet: "ab"
seed: 7
deadline: "1m 30s"
guess_policy: exclude_network
"#;

        let config: SimulationConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_simulations, 50);
        assert_eq!(config.password_complexity, 2);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.deadline, Some(Duration::from_secs(90)));
        assert_eq!(config.guess_policy, GuessPolicy::ExcludeNetwork);
        // Unspecified fields fall back to defaults
        assert_eq!(config.threads, 0);
        assert_eq!(config.max_allocation_attempts, DEFAULT_MAX_ALLOCATION_ATTEMPTS);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "num_devicez: 3\n";
        assert!(serde_yaml::from_str::<SimulationConfig>(yaml).is_err());
    }

    #[test]
    fn test_validation_errors() {
        let base = SimulationConfig::default();

        let config = SimulationConfig { num_simulations: 0, ..base.clone() };
        assert_eq!(config.validate(), Err(ConfigError::NoSimulations));

        let config = SimulationConfig { num_devices: 0, ..base.clone() };
        assert_eq!(config.validate(), Err(ConfigError::NoDevices));

        let config = SimulationConfig { password_complexity: 0, ..base.clone() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPasswordLength));

        let config = SimulationConfig { alphabet: String::new(), ..base.clone() };
        assert_eq!(config.validate(), Err(ConfigError::EmptyAlphabet));

        let config = SimulationConfig { success_probability: -0.1, ..base.clone() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidProbability(_))));

        let config = SimulationConfig { success_probability: f64::NAN, ..base.clone() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidProbability(_))));

        let config = SimulationConfig { max_allocation_attempts: 0, ..base };
        assert_eq!(config.validate(), Err(ConfigError::NoAllocationAttempts));
    }

    #[test]
    fn test_probability_bounds_inclusive() {
        for p in [0.0, 1.0] {
            let config = SimulationConfig { success_probability: p, ..Default::default() };
            assert!(config.validate().is_ok());
        }
    }
}
