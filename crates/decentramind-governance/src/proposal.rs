//! Proposal creation and lifecycle transitions
//!
//! Every transition takes a snapshot and returns a new one; time windows are
//! checked against the caller-supplied `now`.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use decentramind_common::{
    GovernanceError, Proposal, ProposalSchedule, ProposalStatus, ProposalType, VoteTally,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::resolution::{Outcome, Resolution};
use crate::GovernanceEngine;

/// Fields supplied by a proposal's creator
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalInput {
    pub title: String,
    pub description: String,
    pub creator_wallet: String,
    #[serde(rename = "type")]
    pub proposal_type: ProposalType,
    #[serde(default)]
    pub funding: Option<Decimal>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn invalid_transition(from: ProposalStatus, to: ProposalStatus) -> GovernanceError {
    warn!(%from, %to, "Rejected proposal transition");
    GovernanceError::InvalidStateTransition { from, to }
}

fn require_status(
    proposal: &Proposal,
    expected: ProposalStatus,
    to: ProposalStatus,
) -> Result<(), GovernanceError> {
    if proposal.status == expected {
        Ok(())
    } else {
        Err(invalid_transition(proposal.status, to))
    }
}

fn schedule_of(proposal: &Proposal) -> Result<ProposalSchedule, GovernanceError> {
    proposal.schedule.ok_or_else(|| {
        GovernanceError::InvalidInput(format!("proposal {} has no schedule", proposal.id))
    })
}

impl GovernanceEngine {
    /// Validate creator input and yield a draft proposal
    #[instrument(skip(self, input), fields(creator = %input.creator_wallet, proposal_type = %input.proposal_type))]
    pub fn create_proposal(
        &self,
        input: ProposalInput,
        creator_balance: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Proposal, GovernanceError> {
        let title = input.title.trim();
        let description = input.description.trim();

        if !self.config.accepts_wallet(&input.creator_wallet) {
            return Err(GovernanceError::InvalidInput(format!(
                "invalid creator wallet '{}'",
                input.creator_wallet
            )));
        }
        if title.chars().count() < self.config.min_title_len {
            return Err(GovernanceError::InvalidInput(format!(
                "title must be at least {} characters",
                self.config.min_title_len
            )));
        }
        if description.chars().count() < self.config.min_description_len {
            return Err(GovernanceError::InvalidInput(format!(
                "description must be at least {} characters",
                self.config.min_description_len
            )));
        }
        if input.funding.is_some_and(|f| f.is_sign_negative()) {
            return Err(GovernanceError::InvalidInput(
                "funding cannot be negative".to_string(),
            ));
        }
        if creator_balance < self.config.min_proposal_creator_dmt {
            warn!(%creator_balance, "Creator below proposal threshold");
            return Err(GovernanceError::InsufficientProposalPower {
                required: self.config.min_proposal_creator_dmt,
                supplied: creator_balance,
            });
        }

        let proposal = Proposal {
            id: Uuid::now_v7(),
            title: title.to_string(),
            description: description.to_string(),
            creator_wallet: input.creator_wallet,
            proposal_type: input.proposal_type,
            funding: input.funding,
            tags: input.tags,
            status: ProposalStatus::Draft,
            tally: VoteTally::default(),
            votes: Vec::new(),
            voters: BTreeSet::new(),
            endorsements: BTreeSet::new(),
            schedule: None,
            created_at: now,
        };

        info!(proposal_id = %proposal.id, "Proposal drafted");
        Ok(proposal)
    }

    /// draft -> discussion; fixes the discussion and voting deadlines
    #[instrument(skip(self, proposal), fields(proposal_id = %proposal.id))]
    pub fn open_discussion(
        &self,
        proposal: &Proposal,
        now: DateTime<Utc>,
    ) -> Result<Proposal, GovernanceError> {
        require_status(proposal, ProposalStatus::Draft, ProposalStatus::Discussion)?;

        let discussion_end = now + self.config.discussion_period();
        let voting_end =
            discussion_end + self.config.voting_periods.for_type(proposal.proposal_type);

        let mut next = proposal.clone();
        next.status = ProposalStatus::Discussion;
        next.schedule = Some(ProposalSchedule {
            discussion_end,
            voting_end,
        });

        info!(%discussion_end, %voting_end, "Discussion opened");
        Ok(next)
    }

    /// Record a wallet's endorsement while the proposal is still in draft or discussion
    #[instrument(skip(self, proposal), fields(proposal_id = %proposal.id))]
    pub fn endorse(&self, proposal: &Proposal, wallet: &str) -> Result<Proposal, GovernanceError> {
        if !matches!(
            proposal.status,
            ProposalStatus::Draft | ProposalStatus::Discussion
        ) {
            return Err(GovernanceError::EndorsementClosed {
                status: proposal.status,
            });
        }
        if !self.config.accepts_wallet(wallet) {
            return Err(GovernanceError::InvalidInput(format!(
                "invalid endorser wallet '{}'",
                wallet
            )));
        }
        if proposal.has_endorsed(wallet) {
            warn!(wallet, "Duplicate endorsement");
            return Err(GovernanceError::DuplicateEndorsement {
                wallet: wallet.to_string(),
            });
        }

        let mut next = proposal.clone();
        next.endorsements.insert(wallet.to_string());
        info!(endorsements = next.endorsements.len(), "Proposal endorsed");
        Ok(next)
    }

    /// Whether the proposal has gathered `min_endorsements`
    pub fn is_endorsed(&self, proposal: &Proposal) -> bool {
        proposal.endorsements.len() >= self.config.min_endorsements
    }

    /// discussion -> voting once the discussion period is over
    #[instrument(skip(self, proposal), fields(proposal_id = %proposal.id))]
    pub fn advance(
        &self,
        proposal: &Proposal,
        now: DateTime<Utc>,
    ) -> Result<Proposal, GovernanceError> {
        require_status(proposal, ProposalStatus::Discussion, ProposalStatus::Voting)?;

        let schedule = schedule_of(proposal)?;
        if now < schedule.discussion_end {
            return Err(GovernanceError::PeriodNotElapsed {
                until: schedule.discussion_end,
            });
        }

        let mut next = proposal.clone();
        next.status = ProposalStatus::Voting;
        info!("Voting opened");
        Ok(next)
    }

    /// voting -> passed/failed once the voting window has closed
    #[instrument(skip(self, proposal), fields(proposal_id = %proposal.id))]
    pub fn close_voting(
        &self,
        proposal: &Proposal,
        circulating_supply: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(Proposal, Resolution), GovernanceError> {
        if proposal.status != ProposalStatus::Voting {
            return Err(invalid_transition(proposal.status, ProposalStatus::Passed));
        }

        let schedule = schedule_of(proposal)?;
        if now < schedule.voting_end {
            return Err(GovernanceError::PeriodNotElapsed {
                until: schedule.voting_end,
            });
        }

        let resolution = self.resolve(proposal, circulating_supply);
        let mut next = proposal.clone();
        next.status = match resolution.outcome {
            Outcome::Passed => ProposalStatus::Passed,
            Outcome::Failed => ProposalStatus::Failed,
        };

        info!(status = %next.status, "Voting closed");
        Ok((next, resolution))
    }

    /// passed -> executed once the timelock has elapsed
    #[instrument(skip(self, proposal), fields(proposal_id = %proposal.id))]
    pub fn execute(
        &self,
        proposal: &Proposal,
        now: DateTime<Utc>,
    ) -> Result<Proposal, GovernanceError> {
        require_status(proposal, ProposalStatus::Passed, ProposalStatus::Executed)?;

        let schedule = schedule_of(proposal)?;
        let unlocks_at = schedule.voting_end + self.config.timelock();
        if now < unlocks_at {
            return Err(GovernanceError::PeriodNotElapsed { until: unlocks_at });
        }

        let mut next = proposal.clone();
        next.status = ProposalStatus::Executed;
        info!("Proposal executed");
        Ok(next)
    }

    /// draft/discussion -> cancelled
    #[instrument(skip(self, proposal), fields(proposal_id = %proposal.id))]
    pub fn cancel(&self, proposal: &Proposal) -> Result<Proposal, GovernanceError> {
        match proposal.status {
            ProposalStatus::Draft | ProposalStatus::Discussion => {
                let mut next = proposal.clone();
                next.status = ProposalStatus::Cancelled;
                info!("Proposal cancelled");
                Ok(next)
            }
            from => Err(invalid_transition(from, ProposalStatus::Cancelled)),
        }
    }
}
