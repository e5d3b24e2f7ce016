//! # Network Parameters
//!
//! Every protocol constant the projection depends on, gathered into one
//! value object so the engine can be pointed at another network (or a
//! future parameter change) without code edits.
//!
//! ## Derived Totals (Tron defaults)
//!
//! | Quantity | Formula | Value |
//! |----------|---------|-------|
//! | Daily blocks | 86400 / 3 | 28,800 |
//! | Daily block rewards | 28,800 × 16 | 460,800 TRX |
//! | Daily vote rewards | 10 × 460,800 | 4,608,000 TRX |

use crate::constants::*;
use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Network parameters driving tier thresholds and reward totals
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkParams {
    /// Tokens minted per produced block
    #[serde(default = "default_block_reward")]
    pub block_reward: f64,

    /// Seconds between blocks
    #[serde(default = "default_block_interval_secs")]
    pub block_interval_secs: u64,

    /// Seconds in one simulated day
    #[serde(default = "default_seconds_per_day")]
    pub seconds_per_day: u64,

    /// Daily vote reward pool as a multiple of daily block rewards
    #[serde(default = "default_vote_reward_ratio")]
    pub vote_reward_ratio: f64,

    /// Days in one simulated month
    #[serde(default = "default_days_per_month")]
    pub days_per_month: u32,

    /// Number of SR slots (ranks below this are SR)
    #[serde(default = "default_sr_rank_threshold")]
    pub sr_rank_threshold: usize,

    /// Ranks below this (and not SR) are SRP
    #[serde(default = "default_srp_rank_threshold")]
    pub srp_rank_threshold: usize,

    /// Brokerage assumed for addresses missing from the witness set
    #[serde(default = "default_brokerage")]
    pub default_brokerage: f64,
}

fn default_block_reward() -> f64 {
    BLOCK_REWARD
}

fn default_block_interval_secs() -> u64 {
    BLOCK_INTERVAL_SECS
}

fn default_seconds_per_day() -> u64 {
    SECONDS_PER_DAY
}

fn default_vote_reward_ratio() -> f64 {
    VOTE_REWARD_RATIO
}

fn default_days_per_month() -> u32 {
    DAYS_PER_MONTH
}

fn default_sr_rank_threshold() -> usize {
    SR_RANK_THRESHOLD
}

fn default_srp_rank_threshold() -> usize {
    SRP_RANK_THRESHOLD
}

fn default_brokerage() -> f64 {
    DEFAULT_BROKERAGE
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self::tron()
    }
}

impl NetworkParams {
    /// Tron mainnet parameters
    pub fn tron() -> Self {
        Self {
            block_reward: default_block_reward(),
            block_interval_secs: default_block_interval_secs(),
            seconds_per_day: default_seconds_per_day(),
            vote_reward_ratio: default_vote_reward_ratio(),
            days_per_month: default_days_per_month(),
            sr_rank_threshold: default_sr_rank_threshold(),
            srp_rank_threshold: default_srp_rank_threshold(),
            default_brokerage: default_brokerage(),
        }
    }

    /// Parse parameters from TOML; omitted keys take the Tron defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let params: Self = toml::from_str(content)?;
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject parameter sets that cannot produce a projection
    pub fn validate(&self) -> Result<()> {
        if self.block_interval_secs == 0 {
            return Err(SimulationError::InvalidParams(
                "block_interval_secs must be positive".into(),
            ));
        }
        if self.sr_rank_threshold == 0 {
            return Err(SimulationError::InvalidParams(
                "sr_rank_threshold must be positive".into(),
            ));
        }
        if self.srp_rank_threshold < self.sr_rank_threshold {
            return Err(SimulationError::InvalidParams(format!(
                "srp_rank_threshold ({}) is below sr_rank_threshold ({})",
                self.srp_rank_threshold, self.sr_rank_threshold
            )));
        }
        if !self.block_reward.is_finite() || self.block_reward < 0.0 {
            return Err(SimulationError::InvalidParams(format!(
                "block_reward must be finite and non-negative, got {}",
                self.block_reward
            )));
        }
        if !self.vote_reward_ratio.is_finite() || self.vote_reward_ratio < 0.0 {
            return Err(SimulationError::InvalidParams(format!(
                "vote_reward_ratio must be finite and non-negative, got {}",
                self.vote_reward_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.default_brokerage) {
            return Err(SimulationError::InvalidParams(format!(
                "default_brokerage must be within [0, 1], got {}",
                self.default_brokerage
            )));
        }
        Ok(())
    }

    /// Blocks produced network-wide per day
    pub fn total_daily_blocks(&self) -> u64 {
        self.seconds_per_day / self.block_interval_secs
    }

    /// Block rewards minted network-wide per day
    pub fn total_daily_block_rewards(&self) -> f64 {
        self.total_daily_blocks() as f64 * self.block_reward
    }

    /// Vote reward pool distributed per day
    pub fn total_daily_vote_rewards(&self) -> f64 {
        self.total_daily_block_rewards() * self.vote_reward_ratio
    }

    /// Blocks a single SR is credited with per day under the equal-share model
    pub fn blocks_per_sr_per_day(&self) -> f64 {
        self.total_daily_blocks() as f64 / self.sr_rank_threshold as f64
    }
}
