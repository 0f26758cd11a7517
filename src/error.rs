//! Error types for the contention simulator.
//!
//! The simulation itself is total over validated inputs, so the only
//! failures are bad parameters (caught before any run), unreadable config
//! files and I/O while rendering a report.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Invalid simulation or experiment parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("CW_MIN ({min}) is greater than CW_MAX ({max})")]
    ContentionWindowOrder { min: u32, max: u32 },

    #[error("CW_MIN must be at least 1")]
    ZeroContentionWindow,

    #[error("slot duration must be positive")]
    ZeroSlotDuration,

    #[error("simulated duration must be positive")]
    ZeroDuration,

    #[error("simulated duration of {0} s does not fit in microseconds")]
    DurationOverflow(u64),

    #[error("arrival-rate sweep is empty")]
    EmptyArrivalRates,

    #[error("arrival rate {0} is outside 0..=1000")]
    ArrivalRateOutOfRange(u32),

    #[error("collision probability {0}% is outside 0..=100")]
    CollisionPercentOutOfRange(u32),

    #[error("fairness needs at least 2 stations, got {0}")]
    TooFewStations(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
