//! One round: build a network, attack every device, aggregate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::stats::{PasswordHistogram, RoundResult};
use crate::attack::attempt;
use crate::config::{GuessPolicy, SimulationConfig};
use crate::error::{ConfigError, SimulationError};
use crate::network::Network;
use crate::password::{Alphabet, PasswordGenerator, UniquePasswordAllocator};

/// Round parameters shared by every round of a run
#[derive(Debug, Clone)]
pub struct SimulationRound {
    allocator: UniquePasswordAllocator,
    num_devices: usize,
    success_probability: f64,
    guess_policy: GuessPolicy,
}

impl SimulationRound {
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let alphabet = Alphabet::new(&config.alphabet)?;
        let generator = PasswordGenerator::new(config.password_complexity, alphabet)?;
        Ok(Self {
            allocator: UniquePasswordAllocator::new(generator, config.max_allocation_attempts),
            num_devices: config.num_devices,
            success_probability: config.success_probability,
            guess_policy: config.guess_policy,
        })
    }

    pub fn allocator(&self) -> &UniquePasswordAllocator {
        &self.allocator
    }

    /// Run round number `round`, drawing the network and per-device seeds from `rng`
    ///
    /// Device trials run on the current rayon pool.
    pub fn run(&self, round: usize, rng: &mut StdRng) -> Result<RoundResult, SimulationError> {
        let network = Network::build(self.num_devices, &self.allocator, rng)?;
        let seeds: Vec<u64> = (0..network.len()).map(|_| rng.gen()).collect();

        attack_network(
            &network,
            round,
            self.success_probability,
            &seeds,
            |network, rng| self.guess(network, rng),
        )
    }

    fn guess(&self, network: &Network, rng: &mut StdRng) -> Result<String, SimulationError> {
        match self.guess_policy {
            GuessPolicy::Independent => Ok(self.allocator.generator().generate(rng)),
            GuessPolicy::ExcludeNetwork => self.allocator.allocate(network.passwords(), rng),
        }
    }
}

/// Attack every device of `network` in parallel, one trial per seed
///
/// Each trial owns a `StdRng` seeded from its entry in `seeds`, so the outcome
/// does not depend on how rayon schedules the trials. `guess` picks the
/// password tried by a trial.
pub fn attack_network<F>(
    network: &Network,
    round: usize,
    success_probability: f64,
    seeds: &[u64],
    guess: F,
) -> Result<RoundResult, SimulationError>
where
    F: Fn(&Network, &mut StdRng) -> Result<String, SimulationError> + Sync,
{
    let histogram = Mutex::new(PasswordHistogram::new());
    let compromised = AtomicUsize::new(0);

    seeds.par_iter().try_for_each(|&seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let guessed = guess(network, &mut rng)?;

        if attempt(network, &guessed, success_probability, &mut rng) {
            trace!("Round {}: compromised device with password {}", round, guessed);
            compromised.fetch_add(1, Ordering::Relaxed);
        }

        let mut histogram = histogram.lock().unwrap_or_else(PoisonError::into_inner);
        *histogram.entry(guessed).or_insert(0) += 1;
        Ok::<(), SimulationError>(())
    })?;

    let devices_compromised = compromised.into_inner();
    let success_rate = if seeds.is_empty() {
        0.0
    } else {
        devices_compromised as f64 / seeds.len() as f64
    };

    Ok(RoundResult {
        round,
        success_rate,
        devices_compromised,
        guesses: histogram.into_inner().unwrap_or_else(PoisonError::into_inner),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Device;

    fn config(devices: usize, complexity: usize, alphabet: &str, p: f64) -> SimulationConfig {
        SimulationConfig {
            num_simulations: 1,
            num_devices: devices,
            password_complexity: complexity,
            success_probability: p,
            alphabet: alphabet.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_forced_guess_on_vulnerable_device() {
        let network = Network::from_devices(vec![Device::new("1", true)]).unwrap();
        let result = attack_network(&network, 1, 1.0, &[5], |_, _| Ok("1".to_string())).unwrap();
        assert_eq!(result.success_rate, 1.0);
        assert_eq!(result.devices_compromised, 1);
        assert_eq!(result.guesses["1"], 1);
    }

    #[test]
    fn test_round_bounds_and_histogram() {
        let round = SimulationRound::from_config(&config(25, 1, "0123456789", 0.7)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for i in 1..=20 {
            let result = round.run(i, &mut rng).unwrap();
            assert_eq!(result.round, i);
            assert!((0.0..=1.0).contains(&result.success_rate));
            assert!(result.devices_compromised <= 25);
            assert_eq!(result.guesses.values().sum::<u64>(), 25);
        }
    }

    #[test]
    fn test_zero_probability_round() {
        let round = SimulationRound::from_config(&config(10, 1, "0123456789", 0.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for i in 1..=50 {
            let result = round.run(i, &mut rng).unwrap();
            assert_eq!(result.success_rate, 0.0);
            assert_eq!(result.devices_compromised, 0);
        }
    }

    #[test]
    fn test_exclude_network_never_hits() {
        let mut cfg = config(5, 1, "0123456789", 1.0);
        cfg.guess_policy = GuessPolicy::ExcludeNetwork;
        let round = SimulationRound::from_config(&cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        for i in 1..=50 {
            assert_eq!(round.run(i, &mut rng).unwrap().devices_compromised, 0);
        }
    }

    #[test]
    fn test_exclude_network_exhausts_full_space() {
        let mut cfg = config(2, 1, "01", 1.0);
        cfg.guess_policy = GuessPolicy::ExcludeNetwork;
        let round = SimulationRound::from_config(&cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        assert!(matches!(
            round.run(1, &mut rng),
            Err(SimulationError::AllocationExhaustion { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_round() {
        let round = SimulationRound::from_config(&config(40, 2, "0123456789", 0.5)).unwrap();
        let a = round.run(1, &mut StdRng::seed_from_u64(77)).unwrap();
        let b = round.run(1, &mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(SimulationRound::from_config(&config(0, 1, "01", 0.5)).is_err());
    }
}
