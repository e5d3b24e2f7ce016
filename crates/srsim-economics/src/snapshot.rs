//! # Snapshot Ingestion
//!
//! Converts payloads already fetched from a block explorer and a price feed
//! into validated engine inputs. Nothing here performs network I/O.
//!
//! ## Accepted Shapes
//!
//! ```text
//! witnesses:  [ {address, name, realTimeVotes, brokerage}, ... ]
//!             { "data": [ ... ], "total": n }
//! price:      { "tron": { "usd": 0.12 } }
//!             { "usd": 0.12 }
//! ```
//!
//! Explorer brokerage is a whole percentage (0-100); the engine works in
//! fractions.

use crate::error::{Result, SimulationError};
use crate::params::NetworkParams;
use crate::witness::Witness;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One witness as reported by an explorer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WitnessRecord {
    pub address: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(alias = "realTimeVotes", alias = "voteCount")]
    pub votes: i64,

    /// Percent kept by the witness; `None` falls back to the default
    #[serde(default)]
    pub brokerage: Option<f64>,
}

impl WitnessRecord {
    /// Validate and convert into an engine witness
    pub fn into_witness(self, params: &NetworkParams) -> Result<Witness> {
        let votes = u64::try_from(self.votes).map_err(|_| SimulationError::NegativeVotes {
            address: self.address.clone(),
            votes: self.votes,
        })?;

        let brokerage = match self.brokerage {
            Some(percent) if (0.0..=100.0).contains(&percent) => percent / 100.0,
            Some(percent) => {
                return Err(SimulationError::BrokerageOutOfRange {
                    address: self.address,
                    value: percent / 100.0,
                })
            }
            None => {
                tracing::debug!(address = %self.address, "No brokerage reported, using default");
                params.default_brokerage
            }
        };

        Ok(Witness {
            address: self.address,
            votes,
            brokerage,
            name: self.name.unwrap_or_default(),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotPayload {
    Envelope { data: Vec<WitnessRecord> },
    Bare(Vec<WitnessRecord>),
}

/// A fetched witness list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WitnessSnapshot {
    pub records: Vec<WitnessRecord>,
}

impl WitnessSnapshot {
    /// Parse an explorer payload
    pub fn from_json(content: &str) -> Result<Self> {
        let records = match serde_json::from_str::<SnapshotPayload>(content)? {
            SnapshotPayload::Envelope { data } => data,
            SnapshotPayload::Bare(records) => records,
        };
        Ok(Self { records })
    }

    /// Convert every record, failing on the first invalid one
    pub fn into_witnesses(self, params: &NetworkParams) -> Result<Vec<Witness>> {
        let mut seen = HashSet::new();
        let mut witnesses = Vec::with_capacity(self.records.len());

        for (index, record) in self.records.into_iter().enumerate() {
            if !seen.insert(record.address.clone()) {
                tracing::warn!(address = %record.address, index, "Duplicate witness address in snapshot");
            }
            let witness = record.into_witness(params)?;
            witness.validate(index)?;
            witnesses.push(witness);
        }

        tracing::debug!(count = witnesses.len(), "Loaded witness snapshot");
        Ok(witnesses)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Native token price quote
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub usd: f64,
}

impl PriceQuote {
    /// Parse a price feed payload
    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;

        let usd = value
            .get("tron")
            .and_then(|t| t.get("usd"))
            .or_else(|| value.get("usd"))
            .and_then(|v| v.as_f64())
            .ok_or(SimulationError::MissingQuote)?;

        if !usd.is_finite() || usd < 0.0 {
            return Err(SimulationError::InvalidPrice(usd));
        }

        Ok(Self { usd })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explorer_envelope() {
        let json = r#"{
            "total": 2,
            "data": [
                {"address": "TA", "name": "Alpha", "realTimeVotes": 500, "brokerage": 20},
                {"address": "TB", "realTimeVotes": 300, "brokerage": 100}
            ]
        }"#;
        let snapshot = WitnessSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.len(), 2);

        let witnesses = snapshot.into_witnesses(&NetworkParams::tron()).unwrap();
        assert_eq!(witnesses[0], Witness::new("TA", 500, 0.2, "Alpha"));
        assert_eq!(witnesses[1].brokerage, 1.0);
        assert!(witnesses[1].name.is_empty());
    }

    #[test]
    fn test_bare_array_and_aliases() {
        let json = r#"[
            {"address": "TA", "votes": 7},
            {"address": "TB", "voteCount": 9, "brokerage": 0}
        ]"#;
        let witnesses = WitnessSnapshot::from_json(json)
            .unwrap()
            .into_witnesses(&NetworkParams::tron())
            .unwrap();

        assert_eq!(witnesses[0].votes, 7);
        assert_eq!(witnesses[0].brokerage, 0.2);
        assert_eq!(witnesses[1].votes, 9);
        assert_eq!(witnesses[1].brokerage, 0.0);
    }

    #[test]
    fn test_negative_votes_rejected() {
        let json = r#"[{"address": "TA", "votes": -1}]"#;
        let result = WitnessSnapshot::from_json(json)
            .unwrap()
            .into_witnesses(&NetworkParams::tron());

        assert!(matches!(
            result,
            Err(SimulationError::NegativeVotes { votes: -1, .. })
        ));
    }

    #[test]
    fn test_brokerage_percent_out_of_range() {
        let json = r#"[{"address": "TA", "votes": 1, "brokerage": 120}]"#;
        let result = WitnessSnapshot::from_json(json)
            .unwrap()
            .into_witnesses(&NetworkParams::tron());

        assert!(matches!(result, Err(SimulationError::BrokerageOutOfRange { .. })));
    }

    #[test]
    fn test_empty_address_rejected() {
        let json = r#"[{"address": "TA", "votes": 1}, {"address": "", "votes": 1}]"#;
        let result = WitnessSnapshot::from_json(json)
            .unwrap()
            .into_witnesses(&NetworkParams::tron());

        assert!(matches!(
            result,
            Err(SimulationError::EmptyWitnessAddress { index: 1 })
        ));
    }

    #[test]
    fn test_malformed_snapshot() {
        assert!(matches!(
            WitnessSnapshot::from_json("{\"data\": 5}"),
            Err(SimulationError::Snapshot(_))
        ));
    }

    #[test]
    fn test_price_quote_shapes() {
        assert_eq!(PriceQuote::from_json(r#"{"tron": {"usd": 0.12}}"#).unwrap().usd, 0.12);
        assert_eq!(PriceQuote::from_json(r#"{"usd": 0.5}"#).unwrap().usd, 0.5);
        assert!(matches!(
            PriceQuote::from_json(r#"{"tron": {"eur": 0.1}}"#),
            Err(SimulationError::MissingQuote)
        ));
        assert!(matches!(
            PriceQuote::from_json(r#"{"usd": -2}"#),
            Err(SimulationError::InvalidPrice(_))
        ));
    }
}
