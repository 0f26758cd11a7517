//! Arrival-rate sweeps.
//!
//! Every trial starts from freshly built stations, runs each of them through
//! its own [`ContentionEngine`](crate::engine::ContentionEngine) with a
//! private random stream, and folds the outcome into a [`ResultRecord`].

use rayon::prelude::*;
use std::fmt;
use tracing::info;

use crate::config::ExperimentConfig;
use crate::engine::simulate_station;
use crate::error::ConfigError;
use crate::random::{process_seed, station_stream, ChaChaSource};
use crate::station::Station;

/// How evenly frames were shared between stations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FairnessIndex {
    /// `frames[0] / frames[1]` for exactly two stations.
    Ratio(f64),
    /// Jain's index `(Σx)² / (n·Σx²)` for more than two stations.
    Jain(f64),
    /// The denominator was zero.
    Undefined,
}

impl FairnessIndex {
    /// Two-station ratio for two stations, Jain's index otherwise.
    pub fn from_frames(frames: &[u64]) -> FairnessIndex {
        match frames {
            [first, second] => {
                if *second == 0 {
                    FairnessIndex::Undefined
                } else {
                    FairnessIndex::Ratio(*first as f64 / *second as f64)
                }
            }
            _ => {
                let sum: f64 = frames.iter().map(|&x| x as f64).sum();
                let sum_sq: f64 = frames.iter().map(|&x| (x as f64) * (x as f64)).sum();
                if sum_sq == 0.0 {
                    FairnessIndex::Undefined
                } else {
                    FairnessIndex::Jain(sum * sum / (frames.len() as f64 * sum_sq))
                }
            }
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            FairnessIndex::Ratio(v) | FairnessIndex::Jain(v) => Some(*v),
            FairnessIndex::Undefined => None,
        }
    }
}

impl fmt::Display for FairnessIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{:.2}", v),
            None => write!(f, "undefined"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationResult {
    pub station: usize,
    pub throughput_kb: f64,
    pub collisions: u64,
    pub frames_transmitted: u64,
}

impl From<&Station> for StationResult {
    fn from(station: &Station) -> Self {
        StationResult {
            station: station.id(),
            throughput_kb: station.throughput_bytes() as f64 / 1000.0,
            collisions: station.collisions(),
            frames_transmitted: station.frames_transmitted(),
        }
    }
}

/// Outcome of one arrival-rate trial.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub arrival_rate: u32,
    pub stations: Vec<StationResult>,
    pub fairness: FairnessIndex,
}

pub struct ExperimentRunner {
    config: ExperimentConfig,
    seed: u64,
}

impl ExperimentRunner {
    pub fn new(config: ExperimentConfig) -> Result<ExperimentRunner, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(process_seed);
        Ok(ExperimentRunner { config, seed })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs every configured arrival rate, in order.
    pub fn run(&self) -> Vec<ResultRecord> {
        info!(
            seed = self.seed,
            stations = self.config.num_stations,
            topology = %self.config.params.topology,
            "starting sweep"
        );
        self.config
            .arrival_rates
            .iter()
            .enumerate()
            .map(|(trial, &rate)| self.run_trial(trial, rate))
            .collect()
    }

    /// Runs a single trial. `trial` selects the random streams, so the same
    /// `(trial, rate)` pair always reproduces the same record.
    pub fn run_trial(&self, trial: usize, arrival_rate: u32) -> ResultRecord {
        info!(rate = arrival_rate, trial, "simulating arrival rate");

        let params = &self.config.params;
        let run_one = |id: usize| {
            let station = Station::new(id, params.cw_min, params.cw_max);
            let rng = ChaChaSource::with_stream(self.seed, station_stream(trial, id));
            simulate_station(params, station, arrival_rate, rng)
        };

        let stations: Vec<Station> = if self.config.parallel {
            (0..self.config.num_stations).into_par_iter().map(run_one).collect()
        } else {
            (0..self.config.num_stations).map(run_one).collect()
        };

        let frames: Vec<u64> = stations.iter().map(Station::frames_transmitted).collect();
        ResultRecord {
            arrival_rate,
            stations: stations.iter().map(StationResult::from).collect(),
            fairness: FairnessIndex::from_frames(&frames),
        }
    }
}
