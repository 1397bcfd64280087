//! Finalize and storage error types.

use ceiba_shared::types::PeriodId;
use thiserror::Error;

use crate::period::PeriodError;
use crate::settlement::SettlementError;

/// Errors raised by a roster or settlement store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Receipts were already committed for the period.
    #[error("Receipts for period {0} were already issued")]
    AlreadyIssued(PeriodId),

    /// The stored period is no longer in draft.
    #[error("Stored period {0} is already published")]
    AlreadyPublished(PeriodId),

    /// Backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Errors raised while finalizing a billing period.
#[derive(Debug, Error)]
pub enum FinalizeError {
    /// The period cannot be finalized in its current state.
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// The engine refused the roster or expenses.
    #[error(transparent)]
    Settlement(#[from] SettlementError),

    /// Reading the roster or committing the batch failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FinalizeError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Period(e) => e.error_code(),
            Self::Settlement(e) => e.error_code(),
            Self::Store(StoreError::AlreadyIssued(_) | StoreError::AlreadyPublished(_)) => {
                "ALREADY_PUBLISHED"
            }
            Self::Store(StoreError::Backend(_)) => "STORAGE_ERROR",
        }
    }
}

impl From<FinalizeError> for ceiba_shared::AppError {
    fn from(err: FinalizeError) -> Self {
        match err {
            FinalizeError::Period(e) => e.into(),
            FinalizeError::Settlement(e) => e.into(),
            FinalizeError::Store(e @ (StoreError::AlreadyIssued(_) | StoreError::AlreadyPublished(_))) => {
                Self::Conflict(e.to_string())
            }
            FinalizeError::Store(e @ StoreError::Backend(_)) => Self::Storage(e.to_string()),
        }
    }
}
