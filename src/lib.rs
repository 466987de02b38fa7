//! # BruteSim - Monte Carlo simulation of brute-force password guessing
//!
//! This library simulates an attacker guessing device passwords across many
//! independent synthetic networks and aggregates how often the attack lands.
//!
//! ## Overview
//!
//! Each round builds a fresh network of devices. Every device gets a unique
//! random password and a fair-coin vulnerability flag. The attacker then makes
//! one guess per device, in parallel. A guess compromises a device when it
//! names that device, the device is vulnerable, and a probability check
//! passes. Rounds run one after another and are folded into run-wide
//! statistics.
//!
//! ## Architecture
//!
//! - `password`: random password generation and bounded unique allocation
//! - `network`: read-only device networks keyed by password
//! - `attack`: evaluation of a single guess
//! - `simulation`: rounds, the sequential driver and the statistics accumulator
//! - `config` / `config_loader`: typed configuration and YAML loading
//! - `report`: the final run report and its JSON export
//! - `error`: engine error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use brutesim::config::SimulationConfig;
//! use brutesim::simulation::SimulationDriver;
//!
//! let config = SimulationConfig {
//!     num_simulations: 1_000,
//!     num_devices: 10,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let report = SimulationDriver::new(config)?.run();
//! println!("max success rate: {}", report.statistics.max_success_rate);
//! # Ok::<(), brutesim::error::SimulationError>(())
//! ```
//!
//! ## Reproducibility
//!
//! A run draws all of its randomness from one master seed. Each round takes
//! one seed from the master stream and each device trial takes one seed from
//! its round, so results do not depend on thread scheduling or pool size.

pub mod attack;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod network;
pub mod password;
pub mod report;
pub mod simulation;
