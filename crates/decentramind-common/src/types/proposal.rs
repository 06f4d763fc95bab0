//! Proposal - DAO proposal and its vote tally
//!
//! Lifecycle: `draft -> discussion -> voting -> {passed | failed} -> executed`,
//! with `cancelled` reachable from draft and discussion only.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::vote::{Vote, VoteChoice};
use crate::error::VoteError;

/// Proposal category; drives quorum, majority and voting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProposalType {
    PlatformDevelopment,
    EconomicPolicy,
    TreasuryManagement,
    Governance,
    Emergency,
}

impl ProposalType {
    pub const ALL: [ProposalType; 5] = [
        ProposalType::PlatformDevelopment,
        ProposalType::EconomicPolicy,
        ProposalType::TreasuryManagement,
        ProposalType::Governance,
        ProposalType::Emergency,
    ];
}

impl std::fmt::Display for ProposalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ProposalType::PlatformDevelopment => "platformDevelopment",
            ProposalType::EconomicPolicy => "economicPolicy",
            ProposalType::TreasuryManagement => "treasuryManagement",
            ProposalType::Governance => "governance",
            ProposalType::Emergency => "emergency",
        };
        f.write_str(label)
    }
}

/// Lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    #[default]
    Draft,
    Discussion,
    Voting,
    Passed,
    Failed,
    Executed,
    Cancelled,
}

impl ProposalStatus {
    /// No further transition is possible
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ProposalStatus::Executed | ProposalStatus::Failed | ProposalStatus::Cancelled
        )
    }

    /// Voting has finished (resolved, executed or cancelled)
    pub fn is_closed(self) -> bool {
        matches!(
            self,
            ProposalStatus::Passed
                | ProposalStatus::Failed
                | ProposalStatus::Executed
                | ProposalStatus::Cancelled
        )
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ProposalStatus::Draft => "draft",
            ProposalStatus::Discussion => "discussion",
            ProposalStatus::Voting => "voting",
            ProposalStatus::Passed => "passed",
            ProposalStatus::Failed => "failed",
            ProposalStatus::Executed => "executed",
            ProposalStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Running vote totals, weighted by voting power
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub for_votes: Decimal,
    pub against_votes: Decimal,
    pub abstain_votes: Decimal,
    pub total_votes: Decimal,
}

impl VoteTally {
    /// Add weighted power to one choice. The only mutation path, so
    /// `total_votes` always equals the sum of the three buckets. Leaves the
    /// tally untouched if either sum would overflow.
    pub fn add(&mut self, choice: VoteChoice, power: Decimal) -> Result<(), VoteError> {
        let overflow = || VoteError::InvalidInput(format!("tally overflow adding {}", power));

        let bucket = match choice {
            VoteChoice::For => &mut self.for_votes,
            VoteChoice::Against => &mut self.against_votes,
            VoteChoice::Abstain => &mut self.abstain_votes,
        };
        let next_bucket = bucket.checked_add(power).ok_or_else(overflow)?;
        let next_total = self.total_votes.checked_add(power).ok_or_else(overflow)?;

        *bucket = next_bucket;
        self.total_votes = next_total;
        Ok(())
    }

    /// Votes that count toward the majority ratio, saturating on stored
    /// tallies too large to sum
    #[inline]
    pub fn decisive(&self) -> Decimal {
        self.for_votes.saturating_add(self.against_votes)
    }

    pub fn is_consistent(&self) -> bool {
        self.for_votes
            .checked_add(self.against_votes)
            .and_then(|sum| sum.checked_add(self.abstain_votes))
            == Some(self.total_votes)
    }
}

/// Discussion and voting deadlines, fixed when discussion opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSchedule {
    pub discussion_end: DateTime<Utc>,
    pub voting_end: DateTime<Utc>,
}

/// DAO proposal snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub creator_wallet: String,
    #[serde(rename = "type")]
    pub proposal_type: ProposalType,
    /// Requested funding in DMT
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding: Option<Decimal>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: ProposalStatus,
    #[serde(default)]
    pub tally: VoteTally,
    #[serde(default)]
    pub votes: Vec<Vote>,
    /// Wallets that already voted
    #[serde(default)]
    pub voters: BTreeSet<String>,
    /// Wallets backing the proposal before it goes to a vote
    #[serde(default)]
    pub endorsements: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ProposalSchedule>,
    pub created_at: DateTime<Utc>,
}

impl Proposal {
    pub fn has_voted(&self, wallet: &str) -> bool {
        self.voters.contains(wallet)
    }

    pub fn has_endorsed(&self, wallet: &str) -> bool {
        self.endorsements.contains(wallet)
    }

    /// Share of decisive votes in favor, zero when nobody voted for/against
    pub fn for_ratio(&self) -> Decimal {
        let decisive = self.tally.decisive();
        if decisive.is_zero() {
            Decimal::ZERO
        } else {
            self.tally.for_votes / decisive
        }
    }
}
