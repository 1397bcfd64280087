//! Expense catalog error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while defining concepts or registering expenses.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Description is blank.
    #[error("Expense description cannot be empty")]
    EmptyDescription,

    /// Amount is below zero.
    #[error("Expense amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// A variable concept was registered without an amount.
    #[error("Concept {concept:?} has no fixed amount; an amount is required")]
    MissingAmount {
        /// Concept description.
        concept: String,
    },

    /// Unknown category key.
    #[error("Unknown expense category: {0:?}")]
    UnknownCategory(String),
}

impl CatalogError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::MissingAmount { .. } => "MISSING_AMOUNT",
            Self::UnknownCategory(_) => "UNKNOWN_CATEGORY",
        }
    }
}

impl From<CatalogError> for ceiba_shared::AppError {
    fn from(err: CatalogError) -> Self {
        Self::Validation(err.to_string())
    }
}
