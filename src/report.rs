//! Final run report and JSON export.
//!
//! The report carries everything downstream consumers need: the per-round
//! success-rate series for charting and the statistics snapshot.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::simulation::{DriverState, SimulationStatistics};

/// A round that aborted and contributed nothing to the statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundFailure {
    pub round: usize,
    pub error: String,
}

/// Everything a finished run exposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub state: DriverState,
    /// Master seed; feed it back through the config to replay the run
    pub seed: u64,
    pub config: SimulationConfig,
    pub statistics: SimulationStatistics,
    /// Success rate of each completed round, in round order
    pub success_rates: Vec<f64>,
    pub most_frequent_password: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub round_failures: Vec<RoundFailure>,
}

/// Write the report as pretty-printed JSON
pub fn write_json_report(report: &RunReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize run report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Log the headline numbers of a run
pub fn log_summary(report: &RunReport) {
    let stats = &report.statistics;
    log::info!("Total Simulations: {}", stats.total_rounds);
    log::info!("Successful Simulations: {}", stats.successful_rounds);
    log::info!("Failed Simulations: {}", stats.failed_rounds);
    if stats.total_rounds > 0 {
        log::info!("Min Success Rate: {:.2}%", stats.min_success_rate * 100.0);
        log::info!("Max Success Rate: {:.2}%", stats.max_success_rate * 100.0);
    }
    log::info!("Total Devices Hacked: {}", stats.total_devices_compromised);
    match &report.most_frequent_password {
        Some(password) => log::info!("Most Common Password: {}", password),
        None => log::info!("Most Common Password: n/a"),
    }
}
