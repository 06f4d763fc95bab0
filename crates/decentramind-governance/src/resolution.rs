//! Quorum and majority resolution

use decentramind_common::Proposal;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::GovernanceEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
}

/// Outcome of a closed vote with the numbers behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub proposal_id: Uuid,
    pub outcome: Outcome,
    /// Minimum total votes, floored to whole tokens
    pub quorum: Decimal,
    pub total_votes: Decimal,
    pub quorum_met: bool,
    /// Required share of for+against votes in favor
    pub majority_threshold: Decimal,
    pub majority_met: bool,
    /// for / (for + against), zero when neither was cast
    pub for_ratio: Decimal,
}

impl Resolution {
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}

impl GovernanceEngine {
    /// Evaluate quorum then majority. Pure: the same proposal and supply
    /// always produce the same resolution.
    #[instrument(skip(self, proposal), fields(proposal_id = %proposal.id, proposal_type = %proposal.proposal_type))]
    pub fn resolve(&self, proposal: &Proposal, circulating_supply: Decimal) -> Resolution {
        let tally = &proposal.tally;
        let supply = circulating_supply.max(Decimal::ZERO);

        let quorum = (supply * self.config.quorum.for_type(proposal.proposal_type)).floor();
        let majority_threshold = self.config.majority.for_type(proposal.proposal_type);

        let quorum_met = tally.total_votes >= quorum;
        // for > t * (for + against), rearranged so no product exceeds its operand
        let majority_met = tally.for_votes * (Decimal::ONE - majority_threshold)
            > majority_threshold * tally.against_votes;
        let outcome = if quorum_met && majority_met {
            Outcome::Passed
        } else {
            Outcome::Failed
        };

        debug!(
            %quorum,
            total_votes = %tally.total_votes,
            quorum_met,
            %majority_threshold,
            majority_met,
            ?outcome,
            "Proposal resolved"
        );

        Resolution {
            proposal_id: proposal.id,
            outcome,
            quorum,
            total_votes: tally.total_votes,
            quorum_met,
            majority_threshold,
            majority_met,
            for_ratio: proposal.for_ratio(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::tests::{engine, voting_proposal};
    use crate::{GovernanceConfig, QuorumRequirements};
    use decentramind_common::{ProposalType, VoteChoice, VoteTally};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn tallied(for_votes: Decimal, against: Decimal, abstain: Decimal) -> Proposal {
        let mut proposal = voting_proposal(&engine(), ProposalType::Governance);
        let mut tally = VoteTally::default();
        tally.add(VoteChoice::For, for_votes).unwrap();
        tally.add(VoteChoice::Against, against).unwrap();
        tally.add(VoteChoice::Abstain, abstain).unwrap();
        proposal.tally = tally;
        proposal
    }

    #[test]
    fn test_governance_passes_with_quorum_and_supermajority() {
        let proposal = tallied(dec!(80000000), dec!(20000000), dec!(5000000));
        let resolution = engine().resolve(&proposal, dec!(700000000));

        assert_eq!(resolution.quorum, dec!(105000000));
        assert_eq!(resolution.total_votes, dec!(105000000));
        assert!(resolution.quorum_met);
        assert!(resolution.majority_met);
        assert_eq!(resolution.outcome, Outcome::Passed);
        assert_eq!(resolution.for_ratio, dec!(0.8));
    }

    #[test]
    fn test_fails_below_quorum_regardless_of_majority() {
        let config = GovernanceConfig {
            quorum: QuorumRequirements {
                governance: dec!(0.20),
                ..Default::default()
            },
            ..Default::default()
        };
        let engine = GovernanceEngine::new(config).unwrap();
        let proposal = tallied(dec!(80000000), dec!(20000000), dec!(5000000));

        let resolution = engine.resolve(&proposal, dec!(700000000));
        assert_eq!(resolution.quorum, dec!(140000000));
        assert!(!resolution.quorum_met);
        assert!(resolution.majority_met);
        assert_eq!(resolution.outcome, Outcome::Failed);
    }

    #[test]
    fn test_abstain_counts_for_quorum_only() {
        // 65% for among decisive votes misses the 0.66 constitution majority
        let proposal = tallied(dec!(65), dec!(35), dec!(900));
        let resolution = engine().resolve(&proposal, dec!(1000));

        assert!(resolution.quorum_met);
        assert!(!resolution.majority_met);
        assert!(!resolution.passed());
    }

    #[test]
    fn test_exact_majority_does_not_pass() {
        let mut proposal = tallied(dec!(50), dec!(50), Decimal::ZERO);
        proposal.proposal_type = ProposalType::EconomicPolicy;
        let resolution = engine().resolve(&proposal, dec!(100));
        assert!(!resolution.majority_met);
    }

    #[test]
    fn test_quorum_is_floored() {
        let mut proposal = tallied(dec!(10), Decimal::ZERO, Decimal::ZERO);
        proposal.proposal_type = ProposalType::Emergency;
        // 0.03 × 333 = 9.99 -> 9
        let resolution = engine().resolve(&proposal, dec!(333));
        assert_eq!(resolution.quorum, dec!(9));
        assert!(resolution.passed());
    }

    #[test]
    fn test_no_votes_fails() {
        let proposal = tallied(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        let resolution = engine().resolve(&proposal, Decimal::ZERO);
        assert!(resolution.quorum_met);
        assert!(!resolution.majority_met);
        assert_eq!(resolution.outcome, Outcome::Failed);
    }

    #[test]
    fn test_resolve_stored_tally_near_max() {
        let mut proposal = tallied(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        proposal.tally.for_votes = Decimal::MAX;
        proposal.tally.against_votes = Decimal::MAX;
        proposal.tally.total_votes = Decimal::MAX;

        let resolution = engine().resolve(&proposal, dec!(700000000));
        assert!(resolution.quorum_met);
        assert!(!resolution.majority_met);
        assert_eq!(resolution.for_ratio, dec!(1));
    }

    #[test]
    fn test_resolution_payload_is_camel_case() {
        let proposal = tallied(dec!(80000000), dec!(20000000), dec!(5000000));
        let resolution = engine().resolve(&proposal, dec!(700000000));

        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["outcome"], "passed");
        assert_eq!(json["quorumMet"], true);
        assert_eq!(json["majorityMet"], true);
        assert_eq!(json["proposalId"], proposal.id.to_string());
        assert!(json.get("totalVotes").is_some());
        assert!(json.get("majorityThreshold").is_some());
    }

    proptest! {
        #[test]
        fn prop_resolve_is_idempotent(
            for_votes in 0u64..1_000_000,
            against in 0u64..1_000_000,
            abstain in 0u64..1_000_000,
            supply in 0u64..50_000_000,
        ) {
            let engine = engine();
            let proposal = tallied(for_votes.into(), against.into(), abstain.into());
            let supply = Decimal::from(supply);

            let first = engine.resolve(&proposal, supply);
            let second = engine.resolve(&proposal, supply);
            prop_assert_eq!(first, second);
        }
    }
}
