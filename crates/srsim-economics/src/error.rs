//! Error types for the reward simulator

use thiserror::Error;

/// Result type alias for simulator operations
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Errors surfaced by the simulator.
///
/// Degenerate witness sets and unknown target addresses are not errors; they
/// resolve to a `Candidate` result with zero rewards.
#[derive(Error, Debug)]
pub enum SimulationError {
    // === Input Validation ===
    /// Target address was empty or whitespace
    #[error("Target address must not be empty")]
    EmptyTargetAddress,

    /// A witness record carried an empty address
    #[error("Witness at position {index} has an empty address")]
    EmptyWitnessAddress { index: usize },

    /// Brokerage outside [0, 1] or not a finite number
    #[error("Brokerage {value} for witness {address} is outside [0, 1]")]
    BrokerageOutOfRange { address: String, value: f64 },

    /// Snapshot record carried a negative vote count
    #[error("Witness {address} has a negative vote count: {votes}")]
    NegativeVotes { address: String, votes: i64 },

    /// Reference price negative or not a finite number
    #[error("Reference price must be a finite non-negative number, got {0}")]
    InvalidPrice(f64),

    // === Configuration ===
    /// Network parameters cannot produce a projection
    #[error("Invalid network parameters: {0}")]
    InvalidParams(String),

    /// TOML parameter file could not be parsed
    #[error("Failed to parse network parameters: {0}")]
    ParamsParse(#[from] toml::de::Error),

    // === Snapshot Ingestion ===
    /// Witness or price payload was not valid JSON of a known shape
    #[error("Malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Price payload parsed but carried no USD quote
    #[error("Price feed payload has no USD quote")]
    MissingQuote,

    /// Reading a parameter or snapshot file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimulationError {
    /// Stable numeric code for API responses
    pub fn code(&self) -> u32 {
        match self {
            Self::EmptyTargetAddress => 2001,
            Self::EmptyWitnessAddress { .. } => 2002,
            Self::BrokerageOutOfRange { .. } => 2003,
            Self::NegativeVotes { .. } => 2004,
            Self::InvalidPrice(_) => 2005,
            Self::InvalidParams(_) | Self::ParamsParse(_) => 3001,
            Self::Snapshot(_) | Self::MissingQuote => 4001,
            Self::Io(_) => 9999,
        }
    }

    /// Whether the caller supplied structurally invalid data
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyTargetAddress
                | Self::EmptyWitnessAddress { .. }
                | Self::BrokerageOutOfRange { .. }
                | Self::NegativeVotes { .. }
                | Self::InvalidPrice(_)
                | Self::Snapshot(_)
                | Self::MissingQuote
        )
    }
}
