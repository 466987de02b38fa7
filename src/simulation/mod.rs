//! Round execution and run-level aggregation.

pub mod driver;
pub mod round;
pub mod stats;

pub use driver::{DriverState, SimulationDriver};
pub use round::{attack_network, SimulationRound};
pub use stats::{PasswordHistogram, RoundResult, SimulationStatistics};
