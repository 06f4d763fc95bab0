//! Vote - immutable ballot cast by a wallet

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ballot choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    For,
    Against,
    Abstain,
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteChoice::For => write!(f, "for"),
            VoteChoice::Against => write!(f, "against"),
            VoteChoice::Abstain => write!(f, "abstain"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub proposal_id: Uuid,
    pub voter_wallet: String,
    pub choice: VoteChoice,
    pub voting_power: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Vote {
    pub fn new(
        proposal_id: Uuid,
        voter_wallet: impl Into<String>,
        choice: VoteChoice,
        voting_power: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            proposal_id,
            voter_wallet: voter_wallet.into(),
            choice,
            voting_power,
            timestamp,
        }
    }
}
