//! Sequential driver folding rounds into run statistics.

use std::time::Instant;

use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::round::SimulationRound;
use super::stats::{RoundResult, SimulationStatistics};
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::report::{RoundFailure, RunReport};

/// Lifecycle of a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverState {
    NotStarted,
    /// 1-based index of the round in progress
    RunningRound(usize),
    Completed,
    /// Stopped between rounds because the deadline passed
    DeadlineExceeded,
}

/// Runs rounds one after another and accumulates their results
pub struct SimulationDriver {
    config: SimulationConfig,
    round: SimulationRound,
    pool: rayon::ThreadPool,
    seed: u64,
    state: DriverState,
    statistics: SimulationStatistics,
    success_rates: Vec<f64>,
    failures: Vec<RoundFailure>,
}

impl SimulationDriver {
    /// Validate `config` and prepare a driver; nothing runs yet
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let round = SimulationRound::from_config(&config)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("brutesim-worker-{}", i))
            .build()?;
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());

        Ok(Self {
            config,
            round,
            pool,
            seed,
            state: DriverState::NotStarted,
            statistics: SimulationStatistics::new(),
            success_rates: Vec::new(),
            failures: Vec::new(),
        })
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Master seed in effect for this run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn statistics(&self) -> &SimulationStatistics {
        &self.statistics
    }

    /// Run every round and return the final report
    pub fn run(mut self) -> RunReport {
        let num_simulations = self.config.num_simulations;
        info!(
            "Starting {} simulations of {} devices (password length {}, success probability {}, seed {})",
            num_simulations,
            self.config.num_devices,
            self.config.password_complexity,
            self.config.success_probability,
            self.seed
        );

        let started = Instant::now();
        let mut rng = StdRng::seed_from_u64(self.seed);

        for i in 1..=num_simulations {
            if let Some(deadline) = self.config.deadline {
                if started.elapsed() >= deadline {
                    warn!(
                        "Deadline of {:?} reached after {} of {} rounds, stopping",
                        deadline,
                        i - 1,
                        num_simulations
                    );
                    self.state = DriverState::DeadlineExceeded;
                    break;
                }
            }

            self.state = DriverState::RunningRound(i);
            // Every round consumes exactly one seed, failed or not
            let mut round_rng = StdRng::seed_from_u64(rng.gen());
            let round = &self.round;
            match self.pool.install(|| round.run(i, &mut round_rng)) {
                Ok(result) => self.fold(result),
                Err(e) => {
                    error!("Simulation {} failed: {}", i, e);
                    self.failures.push(RoundFailure {
                        round: i,
                        error: e.to_string(),
                    });
                }
            }
        }

        if self.state != DriverState::DeadlineExceeded {
            self.state = DriverState::Completed;
        }

        info!(
            "Finished {} rounds in {:.2?}: {} successful, {} failed, {} devices compromised",
            self.statistics.total_rounds,
            started.elapsed(),
            self.statistics.successful_rounds,
            self.statistics.failed_rounds,
            self.statistics.total_devices_compromised
        );
        if !self.failures.is_empty() {
            warn!("{} rounds aborted with errors", self.failures.len());
        }

        RunReport {
            state: self.state,
            seed: self.seed,
            config: self.config,
            most_frequent_password: self
                .statistics
                .most_frequent_password()
                .map(str::to_string),
            statistics: self.statistics,
            success_rates: self.success_rates,
            round_failures: self.failures,
        }
    }

    fn fold(&mut self, result: RoundResult) {
        debug!(
            "Simulation {}: Success Rate: {:.2}%",
            result.round,
            result.success_rate * 100.0
        );
        self.statistics.record_round(&result);
        self.success_rates.push(result.success_rate);
    }
}
