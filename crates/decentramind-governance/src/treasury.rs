//! Treasury spending caps and multisig approvals
//!
//! Spending is capped by the approving role, emergency transactions by the
//! emergency cap, and receiving/investment movements are uncapped. A pending
//! transaction becomes approved once `multisig_threshold` distinct signers
//! have approved it. Signers must hold the standing their role requires, and
//! amounts above `large_tx_threshold` stay timelocked after creation. The
//! engine never moves funds.

use chrono::{DateTime, Duration, Utc};
use decentramind_common::{
    Proposal, ProposalType, TransactionStatus, TransactionType, TreasuryError, TreasuryRole,
    TreasuryTransaction,
};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::TreasuryConfig;

/// Wallet standing the caller looked up for a signer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignerStanding {
    pub balance: Decimal,
    pub staked: Decimal,
    pub endorsements: usize,
}

#[derive(Debug, Clone)]
pub struct TreasuryRules {
    config: TreasuryConfig,
}

impl TreasuryRules {
    pub fn new(config: TreasuryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TreasuryConfig {
        &self.config
    }

    /// Cap applying to `tx` when approved by `role`; `None` if uncapped
    pub fn spending_cap(&self, tx: &TreasuryTransaction, role: TreasuryRole) -> Option<Decimal> {
        match tx.transaction_type {
            TransactionType::Spending => Some(self.config.cap_for_role(role)),
            TransactionType::Emergency => Some(self.config.emergency_cap),
            TransactionType::Receiving | TransactionType::Investment => None,
        }
    }

    pub fn is_within_cap(&self, tx: &TreasuryTransaction, role: TreasuryRole) -> bool {
        self.spending_cap(tx, role)
            .map_or(true, |cap| tx.amount <= cap)
    }

    /// Guardians and the emergency committee need balance and stake, the
    /// council needs balance and community endorsements
    pub fn is_eligible(&self, role: TreasuryRole, standing: &SignerStanding) -> bool {
        let req = &self.config.roles;
        match role {
            TreasuryRole::Guardian | TreasuryRole::EmergencyCommittee => {
                standing.balance >= req.guardian_min_balance
                    && standing.staked >= req.guardian_min_stake
            }
            TreasuryRole::Council => {
                standing.balance >= req.council_min_balance
                    && standing.endorsements >= req.council_min_endorsements
            }
        }
    }

    /// Earliest execution time of `tx`; `None` below the large-transaction threshold
    pub fn timelock_until(&self, tx: &TreasuryTransaction) -> Option<DateTime<Utc>> {
        (tx.amount > self.config.large_tx_threshold)
            .then(|| tx.created_at + Duration::days(self.config.large_tx_timelock_days))
    }

    /// A transaction funding a treasury-management proposal must move exactly
    /// the requested amount
    pub fn check_proposal_funding(
        &self,
        tx: &TreasuryTransaction,
        proposal: &Proposal,
    ) -> Result<(), TreasuryError> {
        if proposal.proposal_type != ProposalType::TreasuryManagement {
            return Ok(());
        }
        match proposal.funding {
            Some(funding) if funding != tx.amount => {
                warn!(tx_id = %tx.id, proposal_id = %proposal.id, "Funding mismatch");
                Err(TreasuryError::FundingMismatch {
                    amount: tx.amount,
                    funding,
                })
            }
            _ => Ok(()),
        }
    }

    /// Structural checks on a transaction
    pub fn validate_transaction(&self, tx: &TreasuryTransaction) -> Result<(), TreasuryError> {
        if tx.amount <= Decimal::ZERO {
            return Err(TreasuryError::InvalidInput(format!(
                "amount must be positive, got {}",
                tx.amount
            )));
        }
        if tx.recipient.trim().is_empty() {
            return Err(TreasuryError::InvalidInput("recipient is required".to_string()));
        }
        if tx.description.trim().is_empty() {
            return Err(TreasuryError::InvalidInput(
                "description is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Add one signer's approval
    #[instrument(skip(self, tx, standing), fields(tx_id = %tx.id, amount = %tx.amount))]
    pub fn approve(
        &self,
        tx: &TreasuryTransaction,
        approver: &str,
        role: TreasuryRole,
        standing: &SignerStanding,
    ) -> Result<TreasuryTransaction, TreasuryError> {
        if tx.status != TransactionStatus::Pending {
            return Err(TreasuryError::NotPending { status: tx.status });
        }
        if approver.trim().is_empty() {
            return Err(TreasuryError::InvalidInput("approver is required".to_string()));
        }
        self.validate_transaction(tx)?;

        if !self.is_eligible(role, standing) {
            warn!(%role, "Approver lacks role standing");
            return Err(TreasuryError::IneligibleApprover {
                approver: approver.to_string(),
                role,
            });
        }
        if tx.approved_by.contains(approver) {
            warn!("Duplicate approval");
            return Err(TreasuryError::DuplicateApproval {
                approver: approver.to_string(),
            });
        }
        if let Some(cap) = self.spending_cap(tx, role) {
            if tx.amount > cap {
                warn!(%cap, ?role, "Amount exceeds approver cap");
                return Err(TreasuryError::ExceedsCap {
                    amount: tx.amount,
                    cap,
                });
            }
        }

        let mut next = tx.clone();
        next.approved_by.insert(approver.to_string());
        if next.approvals() >= self.config.multisig_threshold {
            next.status = TransactionStatus::Approved;
            info!(approvals = next.approvals(), "Transaction approved");
        } else {
            debug!(
                approvals = next.approvals(),
                threshold = self.config.multisig_threshold,
                "Approval recorded"
            );
        }
        Ok(next)
    }

    #[instrument(skip(self, tx), fields(tx_id = %tx.id))]
    pub fn reject(&self, tx: &TreasuryTransaction) -> Result<TreasuryTransaction, TreasuryError> {
        if tx.status != TransactionStatus::Pending {
            return Err(TreasuryError::NotPending { status: tx.status });
        }
        let mut next = tx.clone();
        next.status = TransactionStatus::Rejected;
        info!("Transaction rejected");
        Ok(next)
    }

    /// approved -> executed once any large-transaction timelock has passed;
    /// the caller performs the transfer
    #[instrument(skip(self, tx), fields(tx_id = %tx.id))]
    pub fn execute(
        &self,
        tx: &TreasuryTransaction,
        now: DateTime<Utc>,
    ) -> Result<TreasuryTransaction, TreasuryError> {
        if tx.status != TransactionStatus::Approved {
            return Err(TreasuryError::NotApproved { status: tx.status });
        }
        if let Some(until) = self.timelock_until(tx) {
            if now < until {
                debug!(%until, "Large transaction still timelocked");
                return Err(TreasuryError::TimelockActive { until });
            }
        }
        let mut next = tx.clone();
        next.status = TransactionStatus::Executed;
        info!("Transaction executed");
        Ok(next)
    }
}
