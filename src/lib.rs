//! Slotted CSMA/CA contention simulator.
//!
//! Stations race through a simplified 802.11 binary exponential backoff with
//! a fixed per-slot collision probability that depends on the topology
//! (single collision domain or hidden terminal). A sweep over frame arrival
//! rates yields per-station throughput, collision counts and a fairness
//! index.
//!
//! - `config`: parameters, reference defaults and validation
//! - `random`: seedable random source
//! - `station`: per-station backoff state
//! - `engine`: the slot loop for one station
//! - `experiment`: arrival-rate sweeps and fairness
//! - `report`: text rendering of results

pub mod config;
pub mod engine;
pub mod error;
pub mod experiment;
pub mod random;
pub mod report;
pub mod station;

pub use config::{ExperimentConfig, SimulationParameters, TimeAdvance, Topology};
pub use error::{ConfigError, Error, Result};
pub use experiment::{ExperimentRunner, FairnessIndex, ResultRecord};
