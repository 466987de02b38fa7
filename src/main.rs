use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use brutesim::config::SimulationConfig;
use brutesim::config_loader::{self, CliOverrides};
use brutesim::report;
use brutesim::simulation::SimulationDriver;

/// Monte Carlo simulation of brute-force password guessing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a simulation configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rounds to simulate
    #[arg(short = 'n', long)]
    simulations: Option<usize>,

    /// Devices per network
    #[arg(short, long)]
    devices: Option<usize>,

    /// Password length
    #[arg(long)]
    complexity: Option<usize>,

    /// Probability that a correct guess against a vulnerable device succeeds
    #[arg(short, long)]
    probability: Option<f64>,

    /// Master seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Worker threads for device trials (0 = one per core)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Write the run report as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level filter
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            simulations: self.simulations,
            devices: self.devices,
            complexity: self.complexity,
            probability: self.probability,
            seed: self.seed,
            threads: self.threads,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => {
            info!("No configuration file given, using defaults");
            SimulationConfig::default()
        }
    };
    config_loader::apply_overrides(&mut config, &args.overrides())?;

    let driver = SimulationDriver::new(config).wrap_err("Failed to set up simulation")?;
    let run_report = driver.run();

    report::log_summary(&run_report);

    if let Some(output) = &args.output {
        report::write_json_report(&run_report, output)?;
    }

    Ok(())
}
