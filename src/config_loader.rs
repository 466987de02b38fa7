use crate::config::SimulationConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<SimulationConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let config: SimulationConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub simulations: Option<usize>,
    pub devices: Option<usize>,
    pub complexity: Option<usize>,
    pub probability: Option<f64>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut SimulationConfig, overrides: &CliOverrides) -> Result<()> {
    if let Some(simulations) = overrides.simulations {
        info!("Overriding num_simulations: {}", simulations);
        config.num_simulations = simulations;
    }
    if let Some(devices) = overrides.devices {
        info!("Overriding num_devices: {}", devices);
        config.num_devices = devices;
    }
    if let Some(complexity) = overrides.complexity {
        info!("Overriding password_complexity: {}", complexity);
        config.password_complexity = complexity;
    }
    if let Some(probability) = overrides.probability {
        info!("Overriding success_probability: {}", probability);
        config.success_probability = probability;
    }
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(threads) = overrides.threads {
        config.threads = threads;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}
