//! Human-readable rendering of simulation results
//!
//! All display strings live here; the engine only hands back tagged values.

use srsim_economics::{
    constants::SYMBOL, NetworkParams, PeriodRewards, RankedWitnessSet, SimulationResult, Tier,
    TierClassifier, VotesNeeded,
};
use std::fmt;

/// Insert thousands separators into a run of digits
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1242453.333` -> `1,242,453.33`
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{}.{frac_part}", group_digits(int_part))
}

/// `1240000` -> `1,240,000`
pub fn format_votes(votes: u128) -> String {
    group_digits(&votes.to_string())
}

/// Caption for a votes-needed value towards `tier`
pub fn votes_caption(needed: VotesNeeded, tier: Tier) -> String {
    match needed {
        VotesNeeded::AlreadyQualified => format!("Already an {}", tier.name()),
        VotesNeeded::NotApplicable => "N/A".to_string(),
        VotesNeeded::Remaining(votes) => format!("{} votes", format_votes(u128::from(votes))),
    }
}

/// 1-based rank for display
pub fn rank_caption(rank: Option<usize>) -> String {
    match rank {
        Some(r) => format!("#{}", r + 1),
        None => "Not ranked".to_string(),
    }
}

fn period_rows(f: &mut fmt::Formatter<'_>, label: &str, period: &PeriodRewards) -> fmt::Result {
    writeln!(f, "  {label}")?;
    writeln!(
        f,
        "    Block rewards   {:>20} {SYMBOL}  ->  {:>20} {SYMBOL}",
        format_amount(period.block_before),
        format_amount(period.block_after)
    )?;
    writeln!(
        f,
        "    Vote rewards    {:>20} {SYMBOL}  ->  {:>20} {SYMBOL}",
        format_amount(period.vote_before),
        format_amount(period.vote_after)
    )?;
    writeln!(
        f,
        "    Total           {:>20} {SYMBOL}  ->  {:>20} {SYMBOL}",
        format_amount(period.total_before),
        format_amount(period.total_after)
    )?;
    writeln!(f, "    USD (after)     {:>20} USD", format_amount(period.usd_equivalent))
}

/// Full text report for one simulation
pub struct SimulationReport<'a> {
    pub address: &'a str,
    pub price: f64,
    pub result: &'a SimulationResult,
}

impl fmt::Display for SimulationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tier = &self.result.tier;

        writeln!(f, "Address:        {}", self.address)?;
        if !tier.name.is_empty() {
            writeln!(f, "Name:           {}", tier.name)?;
        }
        writeln!(f, "Rank:           {}", rank_caption(tier.rank))?;
        writeln!(f, "Tier:           {}", tier.tier.name())?;
        writeln!(f, "Brokerage:      {:.0}%", tier.brokerage * 100.0)?;
        writeln!(f, "Votes to SR:    {}", votes_caption(tier.votes_to_sr, Tier::SR))?;
        writeln!(f, "Votes to SRP:   {}", votes_caption(tier.votes_to_srp, Tier::SRP))?;
        writeln!(f, "{SYMBOL} price:      ${}", self.price)?;
        writeln!(f)?;
        writeln!(f, "Rewards (before brokerage -> after brokerage)")?;
        period_rows(f, "Daily", &self.result.rewards.daily)?;
        period_rows(f, "Monthly", &self.result.rewards.monthly)
    }
}

/// Ranked witness table
pub struct RankingReport<'a, 'w> {
    pub set: &'a RankedWitnessSet<'w>,
    pub params: &'a NetworkParams,
    pub top: usize,
}

impl fmt::Display for RankingReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let classifier = TierClassifier::new(self.params);
        let shown = self.set.top(self.top);

        writeln!(
            f,
            "{:>5}  {:<10} {:<36} {:>18} {:>9}  Name",
            "Rank", "Tier", "Address", "Votes", "Brokerage"
        )?;
        for (rank, witness) in shown.iter().enumerate() {
            writeln!(
                f,
                "{:>5}  {:<10} {:<36} {:>18} {:>8.0}%  {}",
                rank + 1,
                classifier.classify(Some(rank)).name(),
                witness.address,
                format_votes(u128::from(witness.votes)),
                witness.brokerage * 100.0,
                witness.name
            )?;
        }
        writeln!(
            f,
            "\n{} of {} witnesses shown; top {} hold {} votes",
            shown.len(),
            self.set.len(),
            self.params.srp_rank_threshold,
            format_votes(self.set.sum_votes_top_n(self.params.srp_rank_threshold))
        )
    }
}
