//! # Tier Classification
//!
//! Maps a witness rank to its competitive tier and works out how many more
//! votes are needed to climb to the next one.
//!
//! | Tier | Ranks (Tron) | Block rewards | Vote rewards |
//! |------|--------------|---------------|--------------|
//! | SR | 0-26 | yes | yes |
//! | SRP | 27-126 | no | yes |
//! | Candidate | 127+ or not ranked | no | no |

use crate::params::NetworkParams;
use crate::witness::RankedWitnessSet;
use serde::{Deserialize, Serialize};

/// Competitive tier of a witness
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Super Representative: produces blocks
    SR,
    /// Super Representative Partner: shares vote rewards only
    SRP,
    /// Everyone else
    Candidate,
}

impl Tier {
    /// Whether the tier is credited with block production
    pub fn produces_blocks(&self) -> bool {
        matches!(self, Self::SR)
    }

    /// Whether the tier shares the vote reward pool
    pub fn earns_vote_rewards(&self) -> bool {
        matches!(self, Self::SR | Self::SRP)
    }

    /// Get tier name
    pub fn name(&self) -> &'static str {
        match self {
            Self::SR => "SR",
            Self::SRP => "SRP",
            Self::Candidate => "Candidate",
        }
    }
}

/// Votes still required to reach a tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotesNeeded {
    /// Already at or above the tier
    AlreadyQualified,
    /// The tier is below the current one
    NotApplicable,
    /// Additional votes needed to match the lowest holder of the tier
    Remaining(u64),
}

impl VotesNeeded {
    /// Remaining vote count, if any
    pub fn remaining(&self) -> Option<u64> {
        match self {
            Self::Remaining(votes) => Some(*votes),
            _ => None,
        }
    }
}

/// Tier outcome for the simulated address
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierResult {
    /// 0-based rank; `None` when the address is not in the witness set
    pub rank: Option<usize>,

    /// Tier derived from the rank
    pub tier: Tier,

    /// Votes needed to become an SR
    pub votes_to_sr: VotesNeeded,

    /// Votes needed to become an SRP
    pub votes_to_srp: VotesNeeded,

    /// Brokerage applied to the projection
    pub brokerage: f64,

    /// Witness display name (empty when unknown)
    pub name: String,
}

/// Rank to tier mapping driven by network thresholds
#[derive(Clone, Copy, Debug)]
pub struct TierClassifier<'p> {
    params: &'p NetworkParams,
}

impl<'p> TierClassifier<'p> {
    /// Create a classifier over the given thresholds
    pub fn new(params: &'p NetworkParams) -> Self {
        Self { params }
    }

    /// Tier for a rank; unranked addresses are candidates
    pub fn classify(&self, rank: Option<usize>) -> Tier {
        match rank {
            Some(r) if r < self.params.sr_rank_threshold => Tier::SR,
            Some(r) if r < self.params.srp_rank_threshold => Tier::SRP,
            _ => Tier::Candidate,
        }
    }

    /// Votes needed to reach SR and SRP, in that order
    pub fn votes_needed(
        &self,
        rank: Option<usize>,
        current_votes: u64,
        set: &RankedWitnessSet<'_>,
    ) -> (VotesNeeded, VotesNeeded) {
        let tier = self.classify(rank);

        let lowest_sr = set.votes_at(self.params.sr_rank_threshold.saturating_sub(1));
        let lowest_srp = set.votes_at(self.params.srp_rank_threshold.saturating_sub(1));

        let to_sr = match tier {
            Tier::SR => VotesNeeded::AlreadyQualified,
            _ => VotesNeeded::Remaining(lowest_sr.saturating_sub(current_votes)),
        };

        let to_srp = match tier {
            Tier::SR => VotesNeeded::NotApplicable,
            Tier::SRP => VotesNeeded::AlreadyQualified,
            Tier::Candidate => VotesNeeded::Remaining(lowest_srp.saturating_sub(current_votes)),
        };

        (to_sr, to_srp)
    }
}
