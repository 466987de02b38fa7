//! Synthetic device networks.
//!
//! A [`Network`] is built once per round and is read-only afterwards, which
//! lets every device trial of the round share it by reference.

use std::collections::{HashMap, HashSet};

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::password::UniquePasswordAllocator;

/// A simulated endpoint identified by its password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub password: String,
    pub is_vulnerable: bool,
}

impl Device {
    pub fn new(password: impl Into<String>, is_vulnerable: bool) -> Self {
        Self {
            password: password.into(),
            is_vulnerable,
        }
    }
}

/// Set of devices keyed by unique password
#[derive(Debug, Clone, Default)]
pub struct Network {
    devices: Vec<Device>,
    index: HashMap<String, usize>,
    passwords: HashSet<String>,
}

impl Network {
    /// Build a network of `num_devices` devices with unique passwords and
    /// fair-coin vulnerability
    pub fn build<R: Rng + ?Sized>(
        num_devices: usize,
        allocator: &UniquePasswordAllocator,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        allocator.ensure_capacity(num_devices)?;

        let mut network = Network::default();
        for _ in 0..num_devices {
            let password = allocator.allocate(&network.passwords, rng)?;
            let is_vulnerable = rng.gen_bool(0.5);
            network.insert(Device::new(password, is_vulnerable))?;
        }

        debug!(
            "Built network with {} devices ({} vulnerable)",
            network.len(),
            network.vulnerable_count()
        );
        Ok(network)
    }

    /// Assemble a network from explicit devices
    pub fn from_devices<I>(devices: I) -> Result<Self, SimulationError>
    where
        I: IntoIterator<Item = Device>,
    {
        let mut network = Network::default();
        for device in devices {
            network.insert(device)?;
        }
        Ok(network)
    }

    fn insert(&mut self, device: Device) -> Result<(), SimulationError> {
        if !self.passwords.insert(device.password.clone()) {
            return Err(SimulationError::DuplicateDevice(device.password));
        }
        self.index.insert(device.password.clone(), self.devices.len());
        self.devices.push(device);
        Ok(())
    }

    pub fn contains_device(&self, password: &str) -> bool {
        self.index.contains_key(password)
    }

    pub fn is_vulnerable(&self, password: &str) -> Result<bool, SimulationError> {
        self.index
            .get(password)
            .map(|&i| self.devices[i].is_vulnerable)
            .ok_or_else(|| SimulationError::UnknownDevice(password.to_string()))
    }

    pub fn passwords(&self) -> &HashSet<String> {
        &self.passwords
    }

    /// Devices in insertion order
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn vulnerable_count(&self) -> usize {
        self.devices.iter().filter(|d| d.is_vulnerable).count()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::{Alphabet, PasswordGenerator};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn allocator(alphabet: &str, length: usize) -> UniquePasswordAllocator {
        let generator = PasswordGenerator::new(length, Alphabet::new(alphabet).unwrap()).unwrap();
        UniquePasswordAllocator::new(generator, 10_000)
    }

    #[test]
    fn test_build_unique_passwords() {
        let allocator = allocator("0123456789", 2);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let network = Network::build(60, &allocator, &mut rng).unwrap();
            assert_eq!(network.len(), 60);
            assert_eq!(network.passwords().len(), 60);
            for device in network.devices() {
                assert!(network.contains_device(&device.password));
            }
        }
    }

    #[test]
    fn test_build_exact_space() {
        let allocator = allocator("01", 1);
        let mut rng = StdRng::seed_from_u64(3);
        let network = Network::build(2, &allocator, &mut rng).unwrap();
        assert!(network.contains_device("0"));
        assert!(network.contains_device("1"));
    }

    #[test]
    fn test_build_undersized_space() {
        let allocator = allocator("01", 1);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            Network::build(3, &allocator, &mut rng),
            Err(SimulationError::AllocationExhaustion { space: 2, .. })
        ));
    }

    #[test]
    fn test_vulnerability_is_mixed() {
        let allocator = allocator("0123456789", 4);
        let mut rng = StdRng::seed_from_u64(8);
        let network = Network::build(1_000, &allocator, &mut rng).unwrap();
        let vulnerable = network.vulnerable_count();
        assert!((400..=600).contains(&vulnerable), "{} vulnerable", vulnerable);
    }

    #[test]
    fn test_lookup() {
        let network = Network::from_devices(vec![
            Device::new("alpha", true),
            Device::new("beta", false),
        ])
        .unwrap();

        assert!(network.contains_device("alpha"));
        assert!(!network.contains_device("gamma"));
        assert!(network.is_vulnerable("alpha").unwrap());
        assert!(!network.is_vulnerable("beta").unwrap());
        assert!(matches!(
            network.is_vulnerable("gamma"),
            Err(SimulationError::UnknownDevice(p)) if p == "gamma"
        ));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = Network::from_devices(vec![Device::new("x", true), Device::new("x", false)]);
        assert!(matches!(result, Err(SimulationError::DuplicateDevice(p)) if p == "x"));
    }
}
