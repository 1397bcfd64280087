//! Billing period types and lifecycle.

use std::fmt;

use ceiba_shared::types::{ExpenseId, PeriodId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PeriodError;
use crate::expense::Expense;
use crate::settlement::FundTotal;

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Returns the Spanish name of a month (1-12).
#[must_use]
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
}

/// Status of a billing period.
///
/// The only transition is Draft → Published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Expenses may be added and removed.
    Draft,
    /// Frozen; receipts have been issued.
    Published,
}

impl PeriodStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One month's expense-collection and receipt-issuance cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// Unique identifier.
    pub id: PeriodId,
    /// Month, 1-12.
    pub month: u32,
    /// Year.
    pub year: i32,
    /// Registered expense lines, in registration order.
    pub expenses: Vec<Expense>,
    /// Running total of common (prorated) expenses.
    pub total_common: Decimal,
    /// Lifecycle status.
    pub status: PeriodStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Publication timestamp.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Fund totals computed at publication.
    #[serde(default)]
    pub fund_totals: Vec<FundTotal>,
}

impl BillingPeriod {
    /// Opens a draft period for a month.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidMonth` when `month` is not 1-12.
    pub fn new(month: u32, year: i32) -> Result<Self, PeriodError> {
        if month_name(month).is_none() {
            return Err(PeriodError::InvalidMonth(month));
        }
        Ok(Self {
            id: PeriodId::new(),
            month,
            year,
            expenses: Vec::new(),
            total_common: Decimal::ZERO,
            status: PeriodStatus::Draft,
            created_at: Utc::now(),
            published_at: None,
            fund_totals: Vec::new(),
        })
    }

    /// Returns true while expenses can still change.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.status == PeriodStatus::Draft
    }

    /// Human label, e.g. "Julio 2025".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", month_name(self.month).unwrap_or("?"), self.year)
    }

    /// Registers an expense line.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::NotDraft` once the period is published and
    /// `PeriodError::TotalOutOfRange` when the common total would overflow.
    /// The period is left unchanged on error.
    pub fn add_expense(&mut self, expense: Expense) -> Result<(), PeriodError> {
        self.ensure_draft()?;
        let total = common_total(self.expenses.iter().chain(std::iter::once(&expense)))?;
        self.expenses.push(expense);
        self.total_common = total;
        Ok(())
    }

    /// Removes an expense line and returns it.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::NotDraft` once published and
    /// `PeriodError::ExpenseNotFound` for an unknown line.
    pub fn remove_expense(&mut self, expense_id: ExpenseId) -> Result<Expense, PeriodError> {
        self.ensure_draft()?;
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or(PeriodError::ExpenseNotFound(expense_id))?;
        let total = common_total(
            self.expenses
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, e)| e),
        )?;
        let removed = self.expenses.remove(index);
        self.total_common = total;
        Ok(removed)
    }

    /// Freezes the period with its computed fund totals.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidTransition` if already published.
    pub fn publish(
        &mut self,
        fund_totals: Vec<FundTotal>,
        at: DateTime<Utc>,
    ) -> Result<(), PeriodError> {
        if !self.is_draft() {
            return Err(PeriodError::InvalidTransition {
                from: self.status,
                to: PeriodStatus::Published,
            });
        }
        self.status = PeriodStatus::Published;
        self.published_at = Some(at);
        self.fund_totals = fund_totals;
        Ok(())
    }

    fn ensure_draft(&self) -> Result<(), PeriodError> {
        if self.is_draft() {
            Ok(())
        } else {
            Err(PeriodError::NotDraft(self.id))
        }
    }
}

fn common_total<'a>(expenses: impl Iterator<Item = &'a Expense>) -> Result<Decimal, PeriodError> {
    expenses
        .filter(|e| e.is_prorated())
        .try_fold(Decimal::ZERO, |acc, e| acc.checked_add(e.amount))
        .ok_or(PeriodError::TotalOutOfRange)
}

/// Rejects a second period for the same month and year.
///
/// # Errors
///
/// Returns `PeriodError::DuplicatePeriod` if one already exists.
pub fn ensure_unique(existing: &[BillingPeriod], month: u32, year: i32) -> Result<(), PeriodError> {
    if existing.iter().any(|p| p.month == month && p.year == year) {
        return Err(PeriodError::DuplicatePeriod { month, year });
    }
    Ok(())
}
