//! Round results and the run-wide statistics accumulator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Frequency table of guessed passwords
pub type PasswordHistogram = BTreeMap<String, u64>;

/// Outcome of one completed round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// 1-based round index
    pub round: usize,
    pub success_rate: f64,
    pub devices_compromised: usize,
    /// Guesses made during this round
    pub guesses: PasswordHistogram,
}

/// Aggregate statistics over every round folded so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    pub total_rounds: u64,
    pub successful_rounds: u64,
    pub failed_rounds: u64,
    pub min_success_rate: f64,
    pub max_success_rate: f64,
    pub total_devices_compromised: u64,
    pub password_frequency: PasswordHistogram,
}

impl Default for SimulationStatistics {
    fn default() -> Self {
        Self {
            total_rounds: 0,
            successful_rounds: 0,
            failed_rounds: 0,
            min_success_rate: 1.0,
            max_success_rate: 0.0,
            total_devices_compromised: 0,
            password_frequency: PasswordHistogram::new(),
        }
    }
}

impl SimulationStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no round has been folded in
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }

    /// Fold one round into the accumulator
    pub fn record_round(&mut self, result: &RoundResult) {
        self.total_rounds += 1;
        if result.devices_compromised > 0 {
            self.successful_rounds += 1;
        } else {
            self.failed_rounds += 1;
        }
        self.min_success_rate = self.min_success_rate.min(result.success_rate);
        self.max_success_rate = self.max_success_rate.max(result.success_rate);
        self.total_devices_compromised += result.devices_compromised as u64;

        for (password, count) in &result.guesses {
            *self.password_frequency.entry(password.clone()).or_insert(0) += count;
        }
    }

    /// Most frequently guessed password; ties go to the lexicographically smallest
    pub fn most_frequent_password(&self) -> Option<&str> {
        let mut best: Option<(&str, u64)> = None;
        // BTreeMap iterates in ascending key order, so a strict comparison keeps the smallest
        for (password, &count) in &self.password_frequency {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((password.as_str(), count));
            }
        }
        best.map(|(password, _)| password)
    }

    /// Total number of guesses recorded
    pub fn total_guesses(&self) -> u64 {
        self.password_frequency.values().sum()
    }
}
