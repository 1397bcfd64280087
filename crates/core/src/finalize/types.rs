//! Issued receipts and the publish batch.

use std::fmt;

use ceiba_shared::types::ReceiptId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::period::BillingPeriod;
use crate::property::ShareSummary;
use crate::settlement::Receipt;

/// Payment status of an issued receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    /// Issued and awaiting payment.
    #[default]
    Pending,
    /// Paid by the owner.
    Paid,
}

impl ReceiptStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A receipt as persisted when its period is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedReceipt {
    /// Unique identifier.
    pub id: ReceiptId,
    /// Issuance timestamp, shared by the whole batch.
    pub issued_at: DateTime<Utc>,
    /// Payment status.
    pub status: ReceiptStatus,
    /// Computed settlement.
    #[serde(flatten)]
    pub receipt: Receipt,
}

impl IssuedReceipt {
    /// Wraps an engine receipt as a pending issued receipt.
    #[must_use]
    pub fn issue(receipt: Receipt, issued_at: DateTime<Utc>) -> Self {
        Self {
            id: ReceiptId::new(),
            issued_at,
            status: ReceiptStatus::Pending,
            receipt,
        }
    }
}

/// Everything a period's publication writes, committed all-or-nothing.
#[derive(Debug, Clone)]
pub struct PublishBatch {
    /// The period, already in published state with its fund totals.
    pub period: BillingPeriod,
    /// One receipt per active unit.
    pub receipts: Vec<IssuedReceipt>,
}

/// Result of a successful finalize.
#[derive(Debug, Clone)]
pub struct FinalizeOutcome {
    /// The published period.
    pub period: BillingPeriod,
    /// Issued receipts in roster order.
    pub receipts: Vec<IssuedReceipt>,
    /// Share check of the billed roster.
    pub shares: ShareSummary,
}

impl FinalizeOutcome {
    /// Advisory warnings raised while finalizing.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.shares.warning().into_iter().collect()
    }
}
