//! Ballot recording and voting power

use decentramind_common::{Proposal, ProposalStatus, Vote, VoteError};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::GovernanceEngine;

impl GovernanceEngine {
    /// Voting power of a wallet: liquid balance plus boosted stake
    pub fn voting_power(&self, balance: Decimal, staked: Decimal) -> Decimal {
        balance.saturating_add(staked.saturating_mul(self.config.staking_bonus))
    }

    /// Record a ballot, returning the updated proposal
    #[instrument(
        skip(self, proposal, vote),
        fields(proposal_id = %proposal.id, voter = %vote.voter_wallet, choice = %vote.choice)
    )]
    pub fn record_vote(&self, proposal: &Proposal, vote: Vote) -> Result<Proposal, VoteError> {
        if !self.config.accepts_wallet(&vote.voter_wallet) {
            return Err(VoteError::InvalidInput(format!(
                "invalid voter wallet '{}'",
                vote.voter_wallet
            )));
        }
        if vote.voting_power <= Decimal::ZERO {
            return Err(VoteError::InvalidInput(format!(
                "voting power must be positive, got {}",
                vote.voting_power
            )));
        }
        if vote.proposal_id != proposal.id {
            return Err(VoteError::InvalidInput(format!(
                "vote targets proposal {} but was cast on {}",
                vote.proposal_id, proposal.id
            )));
        }

        match proposal.status {
            ProposalStatus::Voting => {}
            status @ (ProposalStatus::Draft | ProposalStatus::Discussion) => {
                warn!(%status, "Vote on proposal not yet open");
                return Err(VoteError::ProposalNotOpen { status });
            }
            from => {
                warn!(status = %from, "Vote on closed proposal");
                return Err(VoteError::InvalidStateTransition { from });
            }
        }
        if let Some(schedule) = proposal.schedule {
            if vote.timestamp > schedule.voting_end {
                warn!(voting_end = %schedule.voting_end, "Vote after voting window");
                return Err(VoteError::ProposalNotOpen {
                    status: proposal.status,
                });
            }
        }

        if vote.voting_power < self.config.min_voting_power {
            warn!(power = %vote.voting_power, "Voting power below minimum");
            return Err(VoteError::InsufficientVotingPower {
                required: self.config.min_voting_power,
                supplied: vote.voting_power,
            });
        }
        if proposal.has_voted(&vote.voter_wallet) {
            warn!("Duplicate vote");
            return Err(VoteError::DuplicateVote {
                wallet: vote.voter_wallet,
            });
        }

        let mut next = proposal.clone();
        if let Err(err) = next.tally.add(vote.choice, vote.voting_power) {
            warn!(power = %vote.voting_power, "Vote would overflow the tally");
            return Err(err);
        }
        next.voters.insert(vote.voter_wallet.clone());

        info!(
            power = %vote.voting_power,
            total_votes = %next.tally.total_votes,
            "Vote recorded"
        );
        next.votes.push(vote);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::tests::{engine, t0, voting_proposal};
    use chrono::Duration;
    use decentramind_common::{ProposalType, VoteChoice};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn ballot(proposal: &Proposal, wallet: &str, choice: VoteChoice, power: Decimal) -> Vote {
        Vote::new(proposal.id, wallet, choice, power, t0() + Duration::days(4))
    }

    #[test]
    fn test_record_vote() {
        let engine = engine();
        let proposal = voting_proposal(&engine, ProposalType::EconomicPolicy);

        let updated = engine
            .record_vote(&proposal, ballot(&proposal, "alice", VoteChoice::For, dec!(250)))
            .unwrap();

        assert_eq!(updated.tally.for_votes, dec!(250));
        assert_eq!(updated.tally.total_votes, dec!(250));
        assert!(updated.has_voted("alice"));
        assert_eq!(updated.votes.len(), 1);
        assert!(proposal.votes.is_empty());
    }

    #[test]
    fn test_insufficient_voting_power() {
        let engine = engine();
        let proposal = voting_proposal(&engine, ProposalType::Governance);

        let err = engine
            .record_vote(&proposal, ballot(&proposal, "bob", VoteChoice::For, dec!(50)))
            .unwrap_err();

        assert_eq!(
            err,
            VoteError::InsufficientVotingPower {
                required: dec!(100),
                supplied: dec!(50),
            }
        );
        assert_eq!(proposal.tally.total_votes, Decimal::ZERO);
    }

    #[test]
    fn test_duplicate_vote() {
        let engine = engine();
        let proposal = voting_proposal(&engine, ProposalType::Governance);

        let first = engine
            .record_vote(&proposal, ballot(&proposal, "carol", VoteChoice::Against, dec!(300)))
            .unwrap();
        let err = engine
            .record_vote(&first, ballot(&first, "carol", VoteChoice::For, dec!(900)))
            .unwrap_err();

        assert_eq!(
            err,
            VoteError::DuplicateVote {
                wallet: "carol".to_string()
            }
        );
        assert_eq!(first.tally.against_votes, dec!(300));
        assert_eq!(first.tally.for_votes, Decimal::ZERO);
    }

    #[test]
    fn test_vote_before_voting_opens() {
        let engine = engine();
        let draft = engine
            .create_proposal(
                crate::proposal::tests::input(ProposalType::Governance),
                dec!(1000),
                t0(),
            )
            .unwrap();

        let err = engine
            .record_vote(&draft, ballot(&draft, "dave", VoteChoice::For, dec!(500)))
            .unwrap_err();
        assert_eq!(
            err,
            VoteError::ProposalNotOpen {
                status: ProposalStatus::Draft
            }
        );
    }

    #[test]
    fn test_vote_after_window() {
        let engine = engine();
        let proposal = voting_proposal(&engine, ProposalType::Emergency);
        let late = Vote::new(
            proposal.id,
            "erin",
            VoteChoice::For,
            dec!(500),
            proposal.schedule.unwrap().voting_end + Duration::seconds(1),
        );

        assert!(matches!(
            engine.record_vote(&proposal, late),
            Err(VoteError::ProposalNotOpen { .. })
        ));
    }

    #[test]
    fn test_vote_on_passed_proposal() {
        let engine = engine();
        let mut proposal = voting_proposal(&engine, ProposalType::Governance);
        proposal.status = ProposalStatus::Passed;

        let err = engine
            .record_vote(&proposal, ballot(&proposal, "frank", VoteChoice::For, dec!(500)))
            .unwrap_err();
        assert_eq!(
            err,
            VoteError::InvalidStateTransition {
                from: ProposalStatus::Passed
            }
        );
    }

    #[test]
    fn test_invalid_ballots() {
        let engine = engine();
        let proposal = voting_proposal(&engine, ProposalType::Governance);

        let no_wallet = ballot(&proposal, "", VoteChoice::For, dec!(500));
        assert!(matches!(
            engine.record_vote(&proposal, no_wallet),
            Err(VoteError::InvalidInput(_))
        ));

        let zero_power = ballot(&proposal, "gina", VoteChoice::For, Decimal::ZERO);
        assert!(matches!(
            engine.record_vote(&proposal, zero_power),
            Err(VoteError::InvalidInput(_))
        ));

        let mut wrong_target = ballot(&proposal, "hank", VoteChoice::For, dec!(500));
        wrong_target.proposal_id = uuid::Uuid::now_v7();
        assert!(matches!(
            engine.record_vote(&proposal, wrong_target),
            Err(VoteError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_strict_wallets_reject_malformed_voter() {
        let engine = crate::GovernanceEngine::new(crate::GovernanceConfig {
            strict_wallets: true,
            ..Default::default()
        })
        .unwrap();
        let draft = engine
            .create_proposal(
                crate::ProposalInput {
                    creator_wallet: "4E1i4swPTALvtwvokjnzxnEQF2ZE4n24D2NCj5BR4sF".to_string(),
                    ..crate::proposal::tests::input(ProposalType::Emergency)
                },
                dec!(1000),
                t0(),
            )
            .unwrap();
        let discussion = engine.open_discussion(&draft, t0()).unwrap();
        let proposal = engine
            .advance(&discussion, t0() + Duration::days(3))
            .unwrap();

        let err = engine
            .record_vote(&proposal, ballot(&proposal, "alice", VoteChoice::For, dec!(500)))
            .unwrap_err();
        assert!(matches!(err, VoteError::InvalidInput(_)));

        let voter = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";
        let updated = engine
            .record_vote(&proposal, ballot(&proposal, voter, VoteChoice::For, dec!(500)))
            .unwrap();
        assert!(updated.has_voted(voter));
    }

    #[test]
    fn test_overflowing_ballot_rejected() {
        let engine = engine();
        let proposal = voting_proposal(&engine, ProposalType::Governance);

        let first = engine
            .record_vote(&proposal, ballot(&proposal, "whale-a", VoteChoice::For, Decimal::MAX))
            .unwrap();
        let err = engine
            .record_vote(&first, ballot(&first, "whale-b", VoteChoice::Against, Decimal::MAX))
            .unwrap_err();

        assert!(matches!(err, VoteError::InvalidInput(_)));
        assert!(!first.has_voted("whale-b"));
        assert_eq!(first.tally.total_votes, Decimal::MAX);
        assert!(first.tally.is_consistent());
    }

    #[test]
    fn test_voting_power_with_stake() {
        assert_eq!(engine().voting_power(dec!(100), dec!(200)), dec!(200));
    }

    fn choice_strategy() -> impl Strategy<Value = VoteChoice> {
        prop_oneof![
            Just(VoteChoice::For),
            Just(VoteChoice::Against),
            Just(VoteChoice::Abstain),
        ]
    }

    proptest! {
        #[test]
        fn prop_tally_invariant(ballots in prop::collection::vec((0usize..8, choice_strategy(), 1u32..5000), 0..40)) {
            let engine = engine();
            let mut proposal = voting_proposal(&engine, ProposalType::TreasuryManagement);

            for (wallet, choice, power) in ballots {
                let wallet = format!("wallet-{}", wallet);
                let vote = ballot(&proposal, &wallet, choice, Decimal::from(power));
                let already_voted = proposal.has_voted(&vote.voter_wallet);
                match engine.record_vote(&proposal, vote) {
                    Ok(updated) => {
                        prop_assert!(!already_voted);
                        proposal = updated;
                    }
                    Err(VoteError::DuplicateVote { .. }) => prop_assert!(already_voted),
                    Err(VoteError::InsufficientVotingPower { .. }) => prop_assert!(power < 100),
                    Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                }
                prop_assert!(proposal.tally.is_consistent());
                prop_assert_eq!(proposal.votes.len(), proposal.voters.len());
            }
        }
    }
}
