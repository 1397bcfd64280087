//! Billing period error types.

use ceiba_shared::types::{ExpenseId, PeriodId};
use thiserror::Error;

use super::types::PeriodStatus;

/// Errors raised by billing period operations.
#[derive(Debug, Error)]
pub enum PeriodError {
    /// Month outside 1-12.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// A period already exists for the month.
    #[error("A billing period for {month}/{year} already exists")]
    DuplicatePeriod {
        /// Month.
        month: u32,
        /// Year.
        year: i32,
    },

    /// The period is published and can no longer change.
    #[error("Billing period {0} is published and cannot be modified")]
    NotDraft(PeriodId),

    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: PeriodStatus,
        /// The attempted target status.
        to: PeriodStatus,
    },

    /// The common expense total is too large to represent.
    #[error("Common expense total is out of range")]
    TotalOutOfRange,

    /// Expense line not found in the period.
    #[error("Expense {0} not found in period")]
    ExpenseNotFound(ExpenseId),
}

impl PeriodError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::DuplicatePeriod { .. } => "DUPLICATE_PERIOD",
            Self::NotDraft(_) => "PERIOD_NOT_DRAFT",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ExpenseNotFound(_) => "EXPENSE_NOT_FOUND",
            Self::TotalOutOfRange => "INVALID_INPUT",
        }
    }
}

impl From<PeriodError> for ceiba_shared::AppError {
    fn from(err: PeriodError) -> Self {
        match err {
            PeriodError::InvalidMonth(_) | PeriodError::TotalOutOfRange => {
                Self::Validation(err.to_string())
            }
            PeriodError::DuplicatePeriod { .. } => Self::Conflict(err.to_string()),
            PeriodError::ExpenseNotFound(_) => Self::NotFound(err.to_string()),
            PeriodError::NotDraft(_) | PeriodError::InvalidTransition { .. } => {
                Self::BusinessRule(err.to_string())
            }
        }
    }
}
