//! Treasury transactions awaiting multisig approval
//!
//! Status flow: `pending -> approved -> executed`, or `pending -> rejected`.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Spending,
    Receiving,
    Investment,
    Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "DMT")]
    Dmt,
    #[serde(rename = "SOL")]
    Sol,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Dmt => write!(f, "DMT"),
            Currency::Sol => write!(f, "SOL"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Approved,
    Executed,
    Rejected,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Approved => "approved",
            TransactionStatus::Executed => "executed",
            TransactionStatus::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// Role of the signer approving a transaction; determines the spending cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TreasuryRole {
    Guardian,
    Council,
    EmergencyCommittee,
}

impl std::fmt::Display for TreasuryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TreasuryRole::Guardian => "guardian",
            TreasuryRole::Council => "council",
            TreasuryRole::EmergencyCommittee => "emergencyCommittee",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryTransaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub currency: Currency,
    pub recipient: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub approved_by: BTreeSet<String>,
    #[serde(default)]
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

impl TreasuryTransaction {
    pub fn new(
        transaction_type: TransactionType,
        amount: Decimal,
        currency: Currency,
        recipient: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            transaction_type,
            amount,
            currency,
            recipient: recipient.into(),
            description: String::new(),
            approved_by: BTreeSet::new(),
            status: TransactionStatus::Pending,
            created_at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[inline]
    pub fn approvals(&self) -> usize {
        self.approved_by.len()
    }
}
