//! Unique password allocation with a bounded retry loop.

use std::collections::HashSet;

use log::trace;
use rand::Rng;

use super::generator::PasswordGenerator;
use crate::error::SimulationError;

/// Draws passwords until one falls outside a given set
#[derive(Debug, Clone)]
pub struct UniquePasswordAllocator {
    generator: PasswordGenerator,
    max_attempts: u32,
}

impl UniquePasswordAllocator {
    pub fn new(generator: PasswordGenerator, max_attempts: u32) -> Self {
        Self {
            generator,
            max_attempts,
        }
    }

    pub fn generator(&self) -> &PasswordGenerator {
        &self.generator
    }

    /// Check that `needed` distinct passwords fit into the password space
    pub fn ensure_capacity(&self, needed: usize) -> Result<(), SimulationError> {
        let space = self.generator.password_space();
        if (needed as u128) > space {
            return Err(SimulationError::AllocationExhaustion {
                attempts: 0,
                existing: needed,
                space,
            });
        }
        Ok(())
    }

    /// Allocate a password absent from `existing`
    ///
    /// Fails immediately when `existing` already covers the whole password
    /// space, and after `max_attempts` colliding draws otherwise.
    pub fn allocate<R: Rng + ?Sized>(
        &self,
        existing: &HashSet<String>,
        rng: &mut R,
    ) -> Result<String, SimulationError> {
        let space = self.generator.password_space();
        if existing.len() as u128 >= space {
            return Err(SimulationError::AllocationExhaustion {
                attempts: 0,
                existing: existing.len(),
                space,
            });
        }

        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate(rng);
            if !existing.contains(&candidate) {
                if attempt > 1 {
                    trace!("Allocated unique password after {} attempts", attempt);
                }
                return Ok(candidate);
            }
        }

        Err(SimulationError::AllocationExhaustion {
            attempts: self.max_attempts,
            existing: existing.len(),
            space,
        })
    }
}
