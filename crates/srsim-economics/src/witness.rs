//! # Witness Ranking
//!
//! Orders witness candidates by vote count and answers the rank, threshold
//! and aggregate-vote queries the tier and reward stages need.
//!
//! Ranking is a stable descending sort on `votes` with no secondary key:
//! witnesses holding equal votes keep the order the upstream data source
//! returned them in. This mirrors how explorers list ties and is an
//! assumption, not a statement about how the protocol breaks ties.

use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};

/// A registered block-producer candidate at a point in time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Witness {
    /// Account address (opaque key)
    pub address: String,

    /// Votes currently held
    pub votes: u64,

    /// Fraction of rewards kept by the witness, in [0, 1]
    pub brokerage: f64,

    /// Display name
    #[serde(default)]
    pub name: String,
}

impl Witness {
    /// Create a witness record
    pub fn new(address: impl Into<String>, votes: u64, brokerage: f64, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            votes,
            brokerage,
            name: name.into(),
        }
    }

    /// Check structural validity; `index` is the position in the input list
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(SimulationError::EmptyWitnessAddress { index });
        }
        if !(0.0..=1.0).contains(&self.brokerage) {
            return Err(SimulationError::BrokerageOutOfRange {
                address: self.address.clone(),
                value: self.brokerage,
            });
        }
        Ok(())
    }
}

/// Witnesses sorted by votes, best first
#[derive(Clone, Debug)]
pub struct RankedWitnessSet<'a> {
    ranked: Vec<&'a Witness>,
}

impl<'a> RankedWitnessSet<'a> {
    /// Rank a witness list
    pub fn build(witnesses: &'a [Witness]) -> Self {
        let mut ranked: Vec<&Witness> = witnesses.iter().collect();
        // `sort_by` is stable
        ranked.sort_by(|a, b| b.votes.cmp(&a.votes));
        Self { ranked }
    }

    /// 0-based rank of the first witness with this address
    pub fn rank_of(&self, address: &str) -> Option<usize> {
        self.ranked.iter().position(|w| w.address == address)
    }

    /// Witness at a rank
    pub fn get(&self, rank: usize) -> Option<&'a Witness> {
        self.ranked.get(rank).copied()
    }

    /// Votes held at a rank, 0 past the end of the set
    pub fn votes_at(&self, rank: usize) -> u64 {
        self.get(rank).map(|w| w.votes).unwrap_or(0)
    }

    /// Sum of votes over the first `min(n, len)` ranks, exact for any `u64` votes
    pub fn sum_votes_top_n(&self, n: usize) -> u128 {
        self.ranked.iter().take(n).map(|w| u128::from(w.votes)).sum()
    }

    /// The first `min(n, len)` witnesses
    pub fn top(&self, n: usize) -> &[&'a Witness] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    /// Iterate in rank order
    pub fn iter(&self) -> impl Iterator<Item = &'a Witness> + '_ {
        self.ranked.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}
