use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Result};

pub const SLOT_DURATION_US: u64 = 10;
pub const SIFS_SLOTS: u64 = 2;
pub const DIFS_SLOTS: u64 = 4;
pub const CW_MIN: u32 = 8;
pub const CW_MAX: u32 = 1024;
pub const FRAME_SIZE_BYTES: u64 = 1500;
pub const SIMULATION_TIME_SECS: u64 = 10;
pub const NUM_STATIONS: usize = 2;
pub const ARRIVAL_RATES: [u32; 6] = [100, 200, 300, 500, 700, 1000];

/// Size of the per-tick arrival draw space. A rate of 1000 arrives every tick.
pub const ARRIVAL_DRAW_SPACE: u32 = 1000;

/// Sweep description picked up from the working directory when present.
pub const CONFIG_FILE: &str = "csma_ca.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    /// All stations hear each other.
    SingleCollisionDomain,
    /// Stations cannot sense each other, so collisions are more likely.
    HiddenTerminal,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::SingleCollisionDomain => write!(f, "Single Collision Domain"),
            Topology::HiddenTerminal => write!(f, "Hidden Terminal"),
        }
    }
}

/// Per-slot collision probability, in percent, for each topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionProfile {
    pub single_domain_percent: u32,
    pub hidden_terminal_percent: u32,
}

impl CollisionProfile {
    /// A channel where no slot ever collides.
    pub fn collision_free() -> Self {
        Self {
            single_domain_percent: 0,
            hidden_terminal_percent: 0,
        }
    }

    pub fn percent_for(&self, topology: Topology) -> u32 {
        match topology {
            Topology::SingleCollisionDomain => self.single_domain_percent,
            Topology::HiddenTerminal => self.hidden_terminal_percent,
        }
    }
}

impl Default for CollisionProfile {
    fn default() -> Self {
        Self {
            single_domain_percent: 5,
            hidden_terminal_percent: 10,
        }
    }
}

/// How simulated time moves at the end of each arrival-check tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeAdvance {
    /// One trailing slot after every tick, on top of any backoff slots
    /// already counted down in that tick.
    #[default]
    Legacy,
    /// The trailing slot is only added when the tick spent no backoff slots.
    SingleSlot,
}

/// Parameters of a single contention run. Immutable while a run is in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    pub slot_duration_us: u64,
    /// Protocol constants, in slots. Not consulted by the backoff race.
    pub sifs_slots: u64,
    pub difs_slots: u64,
    pub cw_min: u32,
    pub cw_max: u32,
    pub frame_size_bytes: u64,
    pub duration_secs: u64,
    pub topology: Topology,
    pub time_advance: TimeAdvance,
    pub collisions: CollisionProfile,
}

impl SimulationParameters {
    pub fn total_duration_us(&self) -> u64 {
        self.duration_secs.saturating_mul(1_000_000)
    }

    pub fn sifs_us(&self) -> u64 {
        self.sifs_slots * self.slot_duration_us
    }

    pub fn difs_us(&self) -> u64 {
        self.difs_slots * self.slot_duration_us
    }

    pub fn collision_percent(&self) -> u32 {
        self.collisions.percent_for(self.topology)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.cw_min == 0 {
            return Err(ConfigError::ZeroContentionWindow);
        }
        if self.cw_min > self.cw_max {
            return Err(ConfigError::ContentionWindowOrder {
                min: self.cw_min,
                max: self.cw_max,
            });
        }
        if self.slot_duration_us == 0 {
            return Err(ConfigError::ZeroSlotDuration);
        }
        if self.duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.duration_secs.checked_mul(1_000_000).is_none() {
            return Err(ConfigError::DurationOverflow(self.duration_secs));
        }
        for percent in [
            self.collisions.single_domain_percent,
            self.collisions.hidden_terminal_percent,
        ] {
            if percent > 100 {
                return Err(ConfigError::CollisionPercentOutOfRange(percent));
            }
        }
        Ok(())
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            slot_duration_us: SLOT_DURATION_US,
            sifs_slots: SIFS_SLOTS,
            difs_slots: DIFS_SLOTS,
            cw_min: CW_MIN,
            cw_max: CW_MAX,
            frame_size_bytes: FRAME_SIZE_BYTES,
            duration_secs: SIMULATION_TIME_SECS,
            topology: Topology::SingleCollisionDomain,
            time_advance: TimeAdvance::default(),
            collisions: CollisionProfile::default(),
        }
    }
}

/// A full arrival-rate sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub num_stations: usize,
    pub arrival_rates: Vec<u32>,
    /// `None` picks a fresh seed for every process.
    pub seed: Option<u64>,
    /// Run the stations of one trial on the rayon pool.
    pub parallel: bool,
    pub params: SimulationParameters,
}

impl ExperimentConfig {
    /// Parses a TOML sweep description. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ExperimentConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.num_stations < 2 {
            return Err(ConfigError::TooFewStations(self.num_stations));
        }
        if self.arrival_rates.is_empty() {
            return Err(ConfigError::EmptyArrivalRates);
        }
        if let Some(&rate) = self
            .arrival_rates
            .iter()
            .find(|&&rate| rate > ARRIVAL_DRAW_SPACE)
        {
            return Err(ConfigError::ArrivalRateOutOfRange(rate));
        }
        self.params.validate()
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            num_stations: NUM_STATIONS,
            arrival_rates: ARRIVAL_RATES.to_vec(),
            seed: None,
            parallel: false,
            params: SimulationParameters::default(),
        }
    }
}
