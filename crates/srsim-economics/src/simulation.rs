//! # Simulation Entry Point
//!
//! `simulate` ranks the witness set, classifies the target and projects its
//! rewards. It is a pure function: no I/O, no logging and no display
//! strings, so it can sit behind a CLI, an HTTP handler or a test alike.
//!
//! ## Fallback Paths
//!
//! - **Unknown address**: rank `None`, tier `Candidate`, brokerage taken from
//!   `NetworkParams::default_brokerage`.
//! - **Degenerate set** (no witnesses, or zero votes across the top
//!   `srp_rank_threshold`): rank `None`, tier `Candidate`, zero rewards.

use crate::error::{Result, SimulationError};
use crate::params::NetworkParams;
use crate::rewards::{ProjectionInput, RewardBreakdown, RewardProjector};
use crate::tier::{TierClassifier, TierResult};
use crate::witness::{RankedWitnessSet, Witness};
use serde::{Deserialize, Serialize};

/// One simulation request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Address to simulate
    pub target_address: String,

    /// Witness snapshot, any order
    pub witnesses: Vec<Witness>,

    /// Native token price in USD
    pub reference_price_usd_per_token: f64,
}

impl SimulationInput {
    /// Create a simulation request
    pub fn new(target_address: impl Into<String>, witnesses: Vec<Witness>, price: f64) -> Self {
        Self {
            target_address: target_address.into(),
            witnesses,
            reference_price_usd_per_token: price,
        }
    }

    /// Reject structurally invalid input
    pub fn validate(&self) -> Result<()> {
        if self.target_address.trim().is_empty() {
            return Err(SimulationError::EmptyTargetAddress);
        }

        let price = self.reference_price_usd_per_token;
        if !price.is_finite() || price < 0.0 {
            return Err(SimulationError::InvalidPrice(price));
        }

        for (index, witness) in self.witnesses.iter().enumerate() {
            witness.validate(index)?;
        }

        Ok(())
    }
}

/// Simulation outcome
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub tier: TierResult,
    pub rewards: RewardBreakdown,
}

/// Simulate with Tron parameters
pub fn simulate(input: &SimulationInput) -> Result<SimulationResult> {
    simulate_with(&NetworkParams::tron(), input)
}

/// Simulate with explicit network parameters
pub fn simulate_with(params: &NetworkParams, input: &SimulationInput) -> Result<SimulationResult> {
    params.validate()?;
    input.validate()?;

    let set = RankedWitnessSet::build(&input.witnesses);
    let classifier = TierClassifier::new(params);
    let projector = RewardProjector::new(params);

    let found = set.rank_of(&input.target_address);
    let target = found.and_then(|rank| set.get(rank));

    let degenerate = set.sum_votes_top_n(params.srp_rank_threshold) == 0;
    let rank = if degenerate { None } else { found };

    let current_votes = target.map(|w| w.votes).unwrap_or(0);
    let brokerage = target.map(|w| w.brokerage).unwrap_or(params.default_brokerage);
    let name = target.map(|w| w.name.clone()).unwrap_or_default();

    let tier = classifier.classify(rank);
    let (votes_to_sr, votes_to_srp) = classifier.votes_needed(rank, current_votes, &set);

    let rewards = if degenerate {
        RewardBreakdown::default()
    } else {
        projector.project(
            &ProjectionInput {
                tier,
                rank,
                current_votes,
                brokerage,
                price_usd: input.reference_price_usd_per_token,
            },
            &set,
        )
    };

    Ok(SimulationResult {
        tier: TierResult {
            rank,
            tier,
            votes_to_sr,
            votes_to_srp,
            brokerage,
            name,
        },
        rewards,
    })
}
