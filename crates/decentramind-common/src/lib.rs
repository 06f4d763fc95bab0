//! # DecentraMind Common
//!
//! Shared types and errors for the DecentraMind rule engines.
//!
//! ## Core Types
//!
//! - [`Agent`]: AI-agent NFT snapshot (level, XP, evolution state, LLM/RAG profile)
//! - [`Proposal`]: DAO proposal with its vote tally and lifecycle status
//! - [`Vote`]: Immutable ballot cast by a wallet
//! - [`TreasuryTransaction`]: Treasury movement awaiting multisig approval
//!
//! ## Errors
//!
//! - [`DecentraMindError`]: unified error wrapping every engine's error enum
//! - [`ErrorPayload`]: serializable form handed to the UI layer
//!
//! ## Concurrency
//!
//! - [`sync::EntityLocks`]: per-entity lock so callers serialize updates to one
//!   proposal or agent at a time

pub mod error;
pub mod sync;
pub mod types;
pub mod wallet;

// Re-export commonly used types at crate root
pub use error::{
    DecentraMindError, ErrorPayload, EvolutionError, GovernanceError, MatchError, Result,
    TreasuryError, VoteError,
};
pub use types::{
    agent::{
        Agent, AgentPerformance, AgentStatus, AgentType, EvolutionRecord, EvolutionStage,
        IndividualStats, LlmConfig, RagConfig,
    },
    proposal::{Proposal, ProposalSchedule, ProposalStatus, ProposalType, VoteTally},
    treasury::{Currency, TransactionStatus, TransactionType, TreasuryRole, TreasuryTransaction},
    vote::{Vote, VoteChoice},
};
pub use wallet::is_valid_wallet_address;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lowest level an agent can hold
pub const MIN_AGENT_LEVEL: u32 = 1;

/// Upper bound of `IndividualStats::domain_expertise`
pub const MAX_DOMAIN_EXPERTISE: u8 = 100;
