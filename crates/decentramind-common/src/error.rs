//! Error types for the DecentraMind engines
//!
//! Every engine returns one of the domain enums below; [`DecentraMindError`]
//! unifies them for callers that handle all engines in one place.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::proposal::ProposalStatus;
use crate::types::treasury::{TransactionStatus, TreasuryRole};

/// Result type alias using DecentraMindError
pub type Result<T> = std::result::Result<T, DecentraMindError>;

/// Unified error type for DecentraMind operations
#[derive(Debug, Error)]
pub enum DecentraMindError {
    // Task matching errors
    #[error("Task matching error: {0}")]
    Match(#[from] MatchError),

    // Agent evolution errors
    #[error("Evolution error: {0}")]
    Evolution(#[from] EvolutionError),

    // Ballot errors
    #[error("Vote error: {0}")]
    Vote(#[from] VoteError),

    // Proposal lifecycle errors
    #[error("Governance error: {0}")]
    Governance(#[from] GovernanceError),

    // Treasury errors
    #[error("Treasury error: {0}")]
    Treasury(#[from] TreasuryError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Task matching errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Agent {agent_id} is not a master agent")]
    NotAMaster { agent_id: String },

    #[error("No sub-agents available for delegation")]
    NoSubAgents,

    #[error("No suitable agent found for {domain} task")]
    NoSuitableAgent { domain: String },
}

/// Agent evolution errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvolutionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient DMT: required {required}, supplied {supplied}")]
    InsufficientFunds { required: Decimal, supplied: Decimal },

    #[error("Agent already at maximum evolution tier (level {level})")]
    MaxTierReached { level: u32 },

    #[error("Invalid evolution ladder: {0}")]
    InvalidLadder(String),
}

/// Ballot errors raised by `record_vote`
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VoteError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Proposal is not open for voting (status: {status})")]
    ProposalNotOpen { status: ProposalStatus },

    #[error("Proposal already left voting (status: {from})")]
    InvalidStateTransition { from: ProposalStatus },

    #[error("Insufficient voting power: required {required}, supplied {supplied}")]
    InsufficientVotingPower { required: Decimal, supplied: Decimal },

    #[error("Wallet {wallet} already voted on this proposal")]
    DuplicateVote { wallet: String },
}

/// Proposal lifecycle errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GovernanceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition {
        from: ProposalStatus,
        to: ProposalStatus,
    },

    #[error("Period has not elapsed yet (until {until})")]
    PeriodNotElapsed { until: DateTime<Utc> },

    #[error("Insufficient DMT to create a proposal: required {required}, supplied {supplied}")]
    InsufficientProposalPower { required: Decimal, supplied: Decimal },

    #[error("Invalid governance configuration: {0}")]
    InvalidConfig(String),

    #[error("Proposal no longer accepts endorsements (status: {status})")]
    EndorsementClosed { status: ProposalStatus },

    #[error("Wallet {wallet} already endorsed this proposal")]
    DuplicateEndorsement { wallet: String },
}

/// Treasury transaction errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreasuryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Amount {amount} exceeds spending cap {cap}")]
    ExceedsCap { amount: Decimal, cap: Decimal },

    #[error("Transaction is not pending (status: {status})")]
    NotPending { status: TransactionStatus },

    #[error("Approver {approver} already approved this transaction")]
    DuplicateApproval { approver: String },

    #[error("Transaction is not approved (status: {status})")]
    NotApproved { status: TransactionStatus },

    #[error("Approver {approver} is not eligible for the {role} role")]
    IneligibleApprover { approver: String, role: TreasuryRole },

    #[error("Large transaction is timelocked until {until}")]
    TimelockActive { until: DateTime<Utc> },

    #[error("Transaction amount {amount} does not match proposal funding {funding}")]
    FundingMismatch { amount: Decimal, funding: Decimal },
}

/// Serializable error shape for the UI layer (toasts, dialogs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    /// Stable machine-readable code, e.g. `INSUFFICIENT_FUNDS`
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Whether the caller may retry once the input changes
    pub retryable: bool,
}

impl DecentraMindError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            DecentraMindError::Match(e) => match e {
                MatchError::InvalidInput(_) => "INVALID_INPUT",
                MatchError::NotAMaster { .. } => "NOT_A_MASTER",
                MatchError::NoSubAgents => "NO_SUB_AGENTS",
                MatchError::NoSuitableAgent { .. } => "NO_SUITABLE_AGENT",
            },
            DecentraMindError::Evolution(e) => match e {
                EvolutionError::InvalidInput(_) => "INVALID_INPUT",
                EvolutionError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
                EvolutionError::MaxTierReached { .. } => "MAX_TIER_REACHED",
                EvolutionError::InvalidLadder(_) => "INVALID_LADDER",
            },
            DecentraMindError::Vote(e) => match e {
                VoteError::InvalidInput(_) => "INVALID_INPUT",
                VoteError::ProposalNotOpen { .. } => "PROPOSAL_NOT_OPEN",
                VoteError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
                VoteError::InsufficientVotingPower { .. } => "INSUFFICIENT_VOTING_POWER",
                VoteError::DuplicateVote { .. } => "DUPLICATE_VOTE",
            },
            DecentraMindError::Governance(e) => match e {
                GovernanceError::InvalidInput(_) => "INVALID_INPUT",
                GovernanceError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
                GovernanceError::PeriodNotElapsed { .. } => "PERIOD_NOT_ELAPSED",
                GovernanceError::InsufficientProposalPower { .. } => "INSUFFICIENT_PROPOSAL_POWER",
                GovernanceError::InvalidConfig(_) => "INVALID_CONFIG",
                GovernanceError::EndorsementClosed { .. } => "ENDORSEMENT_CLOSED",
                GovernanceError::DuplicateEndorsement { .. } => "DUPLICATE_ENDORSEMENT",
            },
            DecentraMindError::Treasury(e) => match e {
                TreasuryError::InvalidInput(_) => "INVALID_INPUT",
                TreasuryError::ExceedsCap { .. } => "EXCEEDS_CAP",
                TreasuryError::NotPending { .. } => "NOT_PENDING",
                TreasuryError::DuplicateApproval { .. } => "DUPLICATE_APPROVAL",
                TreasuryError::NotApproved { .. } => "NOT_APPROVED",
                TreasuryError::IneligibleApprover { .. } => "INELIGIBLE_APPROVER",
                TreasuryError::TimelockActive { .. } => "TIMELOCK_ACTIVE",
                TreasuryError::FundingMismatch { .. } => "FUNDING_MISMATCH",
            },
            DecentraMindError::Config(_) => "CONFIG",
            DecentraMindError::Serialization(_) => "SERIALIZATION",
            DecentraMindError::Internal(_) => "INTERNAL",
        }
    }

    /// Whether the caller can fix the failure by changing its input
    /// (more DMT, more tokens, waiting for a period to end)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DecentraMindError::Evolution(EvolutionError::InsufficientFunds { .. })
                | DecentraMindError::Vote(VoteError::InsufficientVotingPower { .. })
                | DecentraMindError::Governance(GovernanceError::PeriodNotElapsed { .. })
                | DecentraMindError::Governance(GovernanceError::InsufficientProposalPower { .. })
                | DecentraMindError::Treasury(TreasuryError::TimelockActive { .. })
        )
    }

    /// Convert into the payload rendered by the UI
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            retryable: self.is_retryable(),
        }
    }
}

impl From<serde_json::Error> for DecentraMindError {
    fn from(err: serde_json::Error) -> Self {
        DecentraMindError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for DecentraMindError {
    fn from(err: anyhow::Error) -> Self {
        DecentraMindError::Internal(err.to_string())
    }
}
