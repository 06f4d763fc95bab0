//! # DecentraMind Governance
//!
//! DAO proposal lifecycle, weighted voting and treasury rules.
//!
//! ## Resolution
//!
//! ```text
//! quorum   = floor(circulating_supply × quorum[type])
//! PASSED  ⇔ total_votes ≥ quorum  ∧  for > majority[type] × (for + against)
//! ```
//!
//! Abstentions count toward quorum but not toward the majority ratio.
//!
//! ## Lifecycle
//!
//! ```text
//! draft ─► discussion ─► voting ─► passed ─► executed
//!   │           │           └────► failed
//!   └───────────┴─► cancelled
//! ```

pub mod metrics;
pub mod proposal;
pub mod resolution;
pub mod treasury;
pub mod voting;

pub use metrics::GovernanceMetrics;
pub use proposal::ProposalInput;
pub use resolution::{Outcome, Resolution};
pub use treasury::{SignerStanding, TreasuryRules};

use chrono::Duration;
use decentramind_common::{is_valid_wallet_address, GovernanceError, ProposalType, TreasuryRole};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Fraction of circulating supply that must vote, per proposal type
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuorumRequirements {
    pub platform_development: Decimal,
    pub economic_policy: Decimal,
    pub treasury_management: Decimal,
    pub governance: Decimal,
    pub emergency: Decimal,
}

impl QuorumRequirements {
    pub fn for_type(&self, proposal_type: ProposalType) -> Decimal {
        match proposal_type {
            ProposalType::PlatformDevelopment => self.platform_development,
            ProposalType::EconomicPolicy => self.economic_policy,
            ProposalType::TreasuryManagement => self.treasury_management,
            ProposalType::Governance => self.governance,
            ProposalType::Emergency => self.emergency,
        }
    }
}

impl Default for QuorumRequirements {
    fn default() -> Self {
        Self {
            platform_development: dec!(0.05),
            economic_policy: dec!(0.10),
            treasury_management: dec!(0.07),
            governance: dec!(0.15),
            emergency: dec!(0.03),
        }
    }
}

/// Voting window length in days, per proposal type
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VotingPeriods {
    pub platform_development: i64,
    pub economic_policy: i64,
    pub treasury_management: i64,
    pub governance: i64,
    pub emergency: i64,
}

impl VotingPeriods {
    pub fn for_type(&self, proposal_type: ProposalType) -> Duration {
        let days = match proposal_type {
            ProposalType::PlatformDevelopment => self.platform_development,
            ProposalType::EconomicPolicy => self.economic_policy,
            ProposalType::TreasuryManagement => self.treasury_management,
            ProposalType::Governance => self.governance,
            ProposalType::Emergency => self.emergency,
        };
        Duration::days(days)
    }
}

impl Default for VotingPeriods {
    fn default() -> Self {
        Self {
            platform_development: 7,
            economic_policy: 14,
            treasury_management: 10,
            governance: 21,
            emergency: 3,
        }
    }
}

/// Share of for+against votes that must be in favor
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MajorityRequirements {
    pub standard: Decimal,
    /// Governance (constitutional) proposals
    pub constitution: Decimal,
    pub emergency: Decimal,
}

impl MajorityRequirements {
    pub fn for_type(&self, proposal_type: ProposalType) -> Decimal {
        match proposal_type {
            ProposalType::Governance => self.constitution,
            ProposalType::Emergency => self.emergency,
            _ => self.standard,
        }
    }
}

impl Default for MajorityRequirements {
    fn default() -> Self {
        Self {
            standard: dec!(0.50),
            constitution: dec!(0.66),
            emergency: dec!(0.75),
        }
    }
}

/// Standing a wallet needs before it may sign for a treasury role
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoleRequirements {
    pub guardian_min_balance: Decimal,
    pub guardian_min_stake: Decimal,
    pub council_min_balance: Decimal,
    pub council_min_endorsements: usize,
}

impl Default for RoleRequirements {
    fn default() -> Self {
        Self {
            guardian_min_balance: dec!(25000),
            guardian_min_stake: dec!(10000),
            council_min_balance: dec!(10000),
            council_min_endorsements: 100,
        }
    }
}

/// Treasury multisig and spending caps (DMT)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TreasuryConfig {
    pub multisig_threshold: usize,
    pub guardian_cap: Decimal,
    pub council_cap: Decimal,
    pub emergency_cap: Decimal,
    /// Amounts above this wait out `large_tx_timelock_days` before execution
    pub large_tx_threshold: Decimal,
    pub large_tx_timelock_days: i64,
    pub roles: RoleRequirements,
}

impl TreasuryConfig {
    pub fn cap_for_role(&self, role: TreasuryRole) -> Decimal {
        match role {
            TreasuryRole::Guardian => self.guardian_cap,
            TreasuryRole::Council => self.council_cap,
            TreasuryRole::EmergencyCommittee => self.emergency_cap,
        }
    }
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            multisig_threshold: 3,
            guardian_cap: dec!(10000),
            council_cap: dec!(50000),
            emergency_cap: dec!(25000),
            large_tx_threshold: dec!(10000),
            large_tx_timelock_days: 7,
            roles: RoleRequirements::default(),
        }
    }
}

/// Governance configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GovernanceConfig {
    /// Minimum voting power to cast a ballot
    pub min_voting_power: Decimal,
    /// Multiplier applied to staked DMT when computing voting power
    pub staking_bonus: Decimal,
    /// DMT balance required to create a proposal
    pub min_proposal_creator_dmt: Decimal,
    /// Endorsements a proposal needs to count as community-backed
    pub min_endorsements: usize,
    /// Reject creator, voter and endorser wallets that are not 32-44 alphanumerics
    pub strict_wallets: bool,
    pub min_title_len: usize,
    pub min_description_len: usize,
    pub discussion_period_days: i64,
    /// Days between the end of voting and execution
    pub timelock_days: i64,
    pub voting_periods: VotingPeriods,
    pub quorum: QuorumRequirements,
    pub majority: MajorityRequirements,
    pub treasury: TreasuryConfig,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            min_voting_power: dec!(100),
            staking_bonus: dec!(0.5),
            min_proposal_creator_dmt: dec!(1000),
            min_endorsements: 50,
            strict_wallets: false,
            min_title_len: 10,
            min_description_len: 50,
            discussion_period_days: 3,
            timelock_days: 7,
            voting_periods: VotingPeriods::default(),
            quorum: QuorumRequirements::default(),
            majority: MajorityRequirements::default(),
            treasury: TreasuryConfig::default(),
        }
    }
}

fn is_fraction(value: Decimal) -> bool {
    value > Decimal::ZERO && value <= Decimal::ONE
}

impl GovernanceConfig {
    pub fn discussion_period(&self) -> Duration {
        Duration::days(self.discussion_period_days)
    }

    pub fn timelock(&self) -> Duration {
        Duration::days(self.timelock_days)
    }

    /// Wallet check applied to creators, voters and endorsers
    pub fn accepts_wallet(&self, wallet: &str) -> bool {
        if self.strict_wallets {
            is_valid_wallet_address(wallet)
        } else {
            !wallet.trim().is_empty()
        }
    }

    /// Reject fractions outside (0, 1], empty periods and a zero multisig
    pub fn validate(&self) -> Result<(), GovernanceError> {
        for proposal_type in ProposalType::ALL {
            let quorum = self.quorum.for_type(proposal_type);
            if !is_fraction(quorum) {
                return Err(GovernanceError::InvalidConfig(format!(
                    "quorum for {} must be in (0, 1], got {}",
                    proposal_type, quorum
                )));
            }
            let majority = self.majority.for_type(proposal_type);
            if !is_fraction(majority) {
                return Err(GovernanceError::InvalidConfig(format!(
                    "majority for {} must be in (0, 1], got {}",
                    proposal_type, majority
                )));
            }
            if self.voting_periods.for_type(proposal_type) <= Duration::zero() {
                return Err(GovernanceError::InvalidConfig(format!(
                    "voting period for {} must be positive",
                    proposal_type
                )));
            }
        }

        if self.discussion_period_days < 0
            || self.timelock_days < 0
            || self.treasury.large_tx_timelock_days < 0
        {
            return Err(GovernanceError::InvalidConfig(
                "discussion period and timelock must not be negative".to_string(),
            ));
        }
        if self.treasury.multisig_threshold == 0 {
            return Err(GovernanceError::InvalidConfig(
                "multisig threshold must be at least 1".to_string(),
            ));
        }
        if self.min_voting_power.is_sign_negative() || self.staking_bonus.is_sign_negative() {
            return Err(GovernanceError::InvalidConfig(
                "voting power settings must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Governance rule engine
#[derive(Debug, Clone)]
pub struct GovernanceEngine {
    config: GovernanceConfig,
    treasury: TreasuryRules,
}

impl GovernanceEngine {
    pub fn new(config: GovernanceConfig) -> Result<Self, GovernanceError> {
        config.validate()?;
        let treasury = TreasuryRules::new(config.treasury.clone());
        Ok(Self { config, treasury })
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Treasury caps and multisig approvals
    pub fn treasury(&self) -> &TreasuryRules {
        &self.treasury
    }
}
