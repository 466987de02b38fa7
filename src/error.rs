//! Error types for the simulation engine.
//!
//! Configuration problems are fatal and surface before any round runs.
//! Everything else is scoped to a single round.

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("num_simulations must be greater than 0")]
    NoSimulations,

    #[error("num_devices must be greater than 0")]
    NoDevices,

    #[error("password_complexity must be greater than 0")]
    ZeroPasswordLength,

    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    #[error("success_probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("max_allocation_attempts must be greater than 0")]
    NoAllocationAttempts,
}

/// Errors raised by the simulation engine
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error(
        "Password allocation exhausted after {attempts} attempts \
         ({existing} passwords already taken, space of {space})"
    )]
    AllocationExhaustion {
        attempts: u32,
        existing: usize,
        space: u128,
    },

    #[error("No device with password '{0}'")]
    UnknownDevice(String),

    #[error("Duplicate device password '{0}'")]
    DuplicateDevice(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SimulationError {
    /// True for errors that abort the whole run rather than a single round
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SimulationError::Configuration(_) | SimulationError::ThreadPool(_)
        )
    }
}
