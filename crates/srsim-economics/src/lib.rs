//! # SRSim Economics - SR / SRP Reward Simulation
//!
//! Projects what a Tron witness earns given a snapshot of the witness
//! ranking: its competitive tier, the votes it needs to climb, and a daily
//! and monthly split of block and vote rewards before and after brokerage.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌────────────────┐    ┌─────────────────┐
//! │ Witness list │───▶│ RankedWitnessSet │───▶│ TierClassifier │───▶│ RewardProjector │
//! └──────────────┘    │ (stable by votes)│    │ SR / SRP / Cand│    │ daily / monthly │
//!                     └──────────────────┘    └────────────────┘    └────────┬────────┘
//!                                                                            ▼
//!                                                                   SimulationResult
//! ```
//!
//! ## Tiers
//!
//! | Tier | Ranks | Block rewards | Vote rewards |
//! |------|-------|---------------|--------------|
//! | SR | 0-26 | equal share of 28,800 blocks/day | by vote share |
//! | SRP | 27-126 | - | by vote share |
//! | Candidate | 127+ | - | - |
//!
//! The engine is pure and stateless; fetching witness and price data is the
//! caller's job (see [`snapshot`] for the payload shapes it accepts).

pub mod error;
pub mod params;
pub mod rewards;
pub mod simulation;
pub mod snapshot;
pub mod tier;
pub mod witness;

// Re-exports
pub use error::{Result, SimulationError};
pub use params::NetworkParams;
pub use rewards::{PeriodRewards, ProjectionInput, RewardBreakdown, RewardProjector};
pub use simulation::{simulate, simulate_with, SimulationInput, SimulationResult};
pub use snapshot::{PriceQuote, WitnessRecord, WitnessSnapshot};
pub use tier::{Tier, TierClassifier, TierResult, VotesNeeded};
pub use witness::{RankedWitnessSet, Witness};

/// Tron network constants
pub mod constants {
    /// Token symbol
    pub const SYMBOL: &str = "TRX";

    /// Tokens minted per block
    pub const BLOCK_REWARD: f64 = 16.0;

    /// Block interval: 3 seconds
    pub const BLOCK_INTERVAL_SECS: u64 = 3;

    /// Seconds per day
    pub const SECONDS_PER_DAY: u64 = 86_400;

    /// Daily vote pool is 10x the daily block rewards
    pub const VOTE_REWARD_RATIO: f64 = 10.0;

    /// Days per simulated month
    pub const DAYS_PER_MONTH: u32 = 30;

    /// Number of Super Representatives
    pub const SR_RANK_THRESHOLD: usize = 27;

    /// SRs plus Super Representative Partners
    pub const SRP_RANK_THRESHOLD: usize = 127;

    /// Brokerage assumed for unranked addresses (20%)
    pub const DEFAULT_BROKERAGE: f64 = 0.20;
}

pub use constants::*;
