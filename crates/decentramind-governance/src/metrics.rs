//! Aggregate governance metrics over a set of proposals

use decentramind_common::{Proposal, ProposalStatus};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceMetrics {
    pub total_proposals: usize,
    /// In discussion or voting
    pub active_proposals: usize,
    /// Passed, including those already executed
    pub passed_proposals: usize,
    /// Summed voting power across all proposals
    pub total_votes: Decimal,
    pub success_rate: Decimal,
    /// Mean voting power per proposal
    pub average_participation: Decimal,
}

impl GovernanceMetrics {
    pub fn from_proposals(proposals: &[Proposal]) -> Self {
        let total_proposals = proposals.len();
        if total_proposals == 0 {
            return Self::default();
        }

        let active_proposals = proposals
            .iter()
            .filter(|p| matches!(p.status, ProposalStatus::Discussion | ProposalStatus::Voting))
            .count();
        let passed_proposals = proposals
            .iter()
            .filter(|p| matches!(p.status, ProposalStatus::Passed | ProposalStatus::Executed))
            .count();
        let total_votes = proposals
            .iter()
            .fold(Decimal::ZERO, |sum, p| sum.saturating_add(p.tally.total_votes));

        let count = Decimal::from(total_proposals);
        Self {
            total_proposals,
            active_proposals,
            passed_proposals,
            total_votes,
            success_rate: Decimal::from(passed_proposals) / count,
            average_participation: total_votes / count,
        }
    }
}
