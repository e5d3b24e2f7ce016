//! # Reward Projection
//!
//! Projects daily and monthly rewards for a witness from its tier and vote
//! share.
//!
//! ## Reward Types
//!
//! 1. **Block rewards** (SR only): the day's blocks are split evenly across
//!    every SR slot. This is an equal-share approximation of the producer
//!    schedule, not a replay of it.
//! 2. **Vote rewards** (SR and SRP): the daily vote pool is split by vote
//!    share among the top `srp_rank_threshold` witnesses.
//!
//! Brokerage is taken linearly from both components, so
//! `total_after == total_before * (1 - brokerage)`.

use crate::params::NetworkParams;
use crate::tier::{Tier, TierClassifier};
use crate::witness::RankedWitnessSet;
use serde::{Deserialize, Serialize};

/// Rewards for one period, in native tokens
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodRewards {
    /// Block production rewards before brokerage
    pub block_before: f64,

    /// Block production rewards after brokerage
    pub block_after: f64,

    /// Vote rewards before brokerage
    pub vote_before: f64,

    /// Vote rewards after brokerage
    pub vote_after: f64,

    /// `block_before + vote_before`
    pub total_before: f64,

    /// `block_after + vote_after`
    pub total_after: f64,

    /// `total_after` converted at the reference price
    pub usd_equivalent: f64,
}

impl PeriodRewards {
    fn new(block_before: f64, vote_before: f64, brokerage: f64, price: f64) -> Self {
        let keep = 1.0 - brokerage;
        let block_after = block_before * keep;
        let vote_after = vote_before * keep;
        let total_after = block_after + vote_after;

        Self {
            block_before,
            block_after,
            vote_before,
            vote_after,
            total_before: block_before + vote_before,
            total_after,
            usd_equivalent: total_after * price,
        }
    }

    /// Scale every token amount by `factor` and reprice the scaled total
    pub fn scaled(&self, factor: f64, price: f64) -> Self {
        let total_after = self.total_after * factor;

        Self {
            block_before: self.block_before * factor,
            block_after: self.block_after * factor,
            vote_before: self.vote_before * factor,
            vote_after: self.vote_after * factor,
            total_before: self.total_before * factor,
            total_after,
            usd_equivalent: total_after * price,
        }
    }
}

/// Daily and monthly reward projection
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    pub daily: PeriodRewards,
    pub monthly: PeriodRewards,
}

/// Everything the projector needs to know about the target
#[derive(Clone, Copy, Debug)]
pub struct ProjectionInput {
    pub tier: Tier,
    pub rank: Option<usize>,
    pub current_votes: u64,
    pub brokerage: f64,
    pub price_usd: f64,
}

/// Reward projector
#[derive(Clone, Copy, Debug)]
pub struct RewardProjector<'p> {
    params: &'p NetworkParams,
}

impl<'p> RewardProjector<'p> {
    /// Create a projector over the given network parameters
    pub fn new(params: &'p NetworkParams) -> Self {
        Self { params }
    }

    /// Blocks credited per day
    pub fn blocks_per_day(&self, tier: Tier) -> f64 {
        if tier.produces_blocks() {
            self.params.blocks_per_sr_per_day()
        } else {
            0.0
        }
    }

    /// Whether a rank shares the vote reward pool
    pub fn eligible_for_votes(&self, rank: Option<usize>) -> bool {
        TierClassifier::new(self.params)
            .classify(rank)
            .earns_vote_rewards()
    }

    /// Daily vote reward before brokerage
    pub fn daily_vote_reward(
        &self,
        rank: Option<usize>,
        current_votes: u64,
        set: &RankedWitnessSet<'_>,
    ) -> f64 {
        if !self.eligible_for_votes(rank) {
            return 0.0;
        }

        let total_network_votes = set.sum_votes_top_n(self.params.srp_rank_threshold);
        if total_network_votes == 0 {
            return 0.0;
        }

        let share = current_votes as f64 / total_network_votes as f64;
        share * self.params.total_daily_vote_rewards()
    }

    /// Project daily and monthly rewards
    pub fn project(&self, input: &ProjectionInput, set: &RankedWitnessSet<'_>) -> RewardBreakdown {
        let block_before = self.blocks_per_day(input.tier) * self.params.block_reward;
        let vote_before = self.daily_vote_reward(input.rank, input.current_votes, set);

        let daily = PeriodRewards::new(block_before, vote_before, input.brokerage, input.price_usd);
        let monthly = daily.scaled(f64::from(self.params.days_per_month), input.price_usd);

        RewardBreakdown { daily, monthly }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::witness::Witness;

    const EPS: f64 = 1e-6;

    fn sample() -> Vec<Witness> {
        vec![
            Witness::new("A", 500, 0.2, "Alpha"),
            Witness::new("B", 300, 0.2, "Bravo"),
            Witness::new("C", 100, 0.2, "Charlie"),
        ]
    }

    #[test]
    fn test_blocks_per_day() {
        let params = NetworkParams::tron();
        let projector = RewardProjector::new(&params);

        assert!((projector.blocks_per_day(Tier::SR) - 28_800.0 / 27.0).abs() < EPS);
        assert_eq!(projector.blocks_per_day(Tier::SRP), 0.0);
        assert_eq!(projector.blocks_per_day(Tier::Candidate), 0.0);
    }

    #[test]
    fn test_vote_share() {
        let params = NetworkParams::tron();
        let projector = RewardProjector::new(&params);
        let witnesses = sample();
        let set = RankedWitnessSet::build(&witnesses);

        let reward = projector.daily_vote_reward(Some(1), 300, &set);
        assert!((reward - 1_536_000.0).abs() < EPS);

        assert_eq!(projector.daily_vote_reward(None, 300, &set), 0.0);
        assert_eq!(projector.daily_vote_reward(Some(127), 300, &set), 0.0);
    }

    #[test]
    fn test_zero_total_votes() {
        let params = NetworkParams::tron();
        let projector = RewardProjector::new(&params);
        let witnesses = vec![Witness::new("A", 0, 0.1, ""), Witness::new("B", 0, 0.1, "")];
        let set = RankedWitnessSet::build(&witnesses);

        let reward = projector.daily_vote_reward(Some(0), 0, &set);
        assert_eq!(reward, 0.0);
        assert!(!reward.is_nan());
    }

    #[test]
    fn test_vote_pool_split_past_u64_total() {
        let params = NetworkParams::tron();
        let projector = RewardProjector::new(&params);
        let witnesses = vec![
            Witness::new("A", u64::MAX, 0.0, ""),
            Witness::new("B", u64::MAX, 0.0, ""),
        ];
        let set = RankedWitnessSet::build(&witnesses);

        let a = projector.daily_vote_reward(Some(0), u64::MAX, &set);
        let b = projector.daily_vote_reward(Some(1), u64::MAX, &set);

        assert!((a - 2_304_000.0).abs() < 1e-3);
        assert!((b - 2_304_000.0).abs() < 1e-3);
        assert!((a + b - params.total_daily_vote_rewards()).abs() < 1e-3);
    }

    #[test]
    fn test_vote_eligibility_follows_tier() {
        let params = NetworkParams::tron();
        let projector = RewardProjector::new(&params);

        assert!(projector.eligible_for_votes(Some(0)));
        assert!(projector.eligible_for_votes(Some(26)));
        assert!(projector.eligible_for_votes(Some(126)));
        assert!(!projector.eligible_for_votes(Some(127)));
        assert!(!projector.eligible_for_votes(None));
    }

    #[test]
    fn test_project_sr() {
        let params = NetworkParams::tron();
        let projector = RewardProjector::new(&params);
        let witnesses = sample();
        let set = RankedWitnessSet::build(&witnesses);

        let input = ProjectionInput {
            tier: Tier::SR,
            rank: Some(1),
            current_votes: 300,
            brokerage: 0.2,
            price_usd: 0.10,
        };
        let rewards = projector.project(&input, &set);

        assert!((rewards.daily.block_before - 17_066.666_667).abs() < 1e-3);
        assert!((rewards.daily.block_after - 13_653.333_333).abs() < 1e-3);
        assert!((rewards.daily.vote_after - 1_228_800.0).abs() < EPS);
        assert!((rewards.daily.total_after - 1_242_453.333_333).abs() < 1e-3);
        assert!((rewards.monthly.total_after - 37_273_600.0).abs() < 1e-3);
        assert!((rewards.monthly.usd_equivalent - 3_727_360.0).abs() < 1e-3);
    }

    #[test]
    fn test_srp_has_no_block_rewards() {
        let params = NetworkParams {
            sr_rank_threshold: 1,
            ..NetworkParams::tron()
        };
        let projector = RewardProjector::new(&params);
        let witnesses = sample();
        let set = RankedWitnessSet::build(&witnesses);

        let input = ProjectionInput {
            tier: Tier::SRP,
            rank: Some(2),
            current_votes: 100,
            brokerage: 0.5,
            price_usd: 1.0,
        };
        let rewards = projector.project(&input, &set);

        assert_eq!(rewards.daily.block_before, 0.0);
        assert!((rewards.daily.vote_before - 512_000.0).abs() < EPS);
        assert!((rewards.daily.vote_after - 256_000.0).abs() < EPS);
    }

    #[test]
    fn test_full_brokerage_keeps_nothing() {
        let daily = PeriodRewards::new(100.0, 900.0, 1.0, 2.0);

        assert_eq!(daily.total_before, 1_000.0);
        assert_eq!(daily.total_after, 0.0);
        assert_eq!(daily.usd_equivalent, 0.0);
    }

    #[test]
    fn test_monthly_scaling() {
        let daily = PeriodRewards::new(10.0, 20.0, 0.25, 0.5);
        let monthly = daily.scaled(30.0, 0.5);

        assert_eq!(monthly.block_before, 300.0);
        assert_eq!(monthly.vote_after, 450.0);
        assert_eq!(monthly.total_after, 675.0);
        assert_eq!(monthly.usd_equivalent, 337.5);
    }
}
