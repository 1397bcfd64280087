//! Settlement error types.

use thiserror::Error;

/// Errors raised by the settlement engine.
///
/// Data-quality conditions (shares not adding to 100, a period without
/// common expenses) are not errors; the engine computes through them.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// A numeric input cannot be used to compute a financial amount.
    #[error("Invalid input: {field} of {subject:?}: {reason}")]
    InvalidInput {
        /// Offending field (amount, share, ...).
        field: &'static str,
        /// Expense description or unit label the field belongs to.
        subject: String,
        /// Human-readable reason.
        reason: String,
    },
}

impl SettlementError {
    pub(crate) fn overflow(subject: &str, what: &str) -> Self {
        Self::InvalidInput {
            field: "amount",
            subject: subject.to_string(),
            reason: format!("{what} is out of range"),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
        }
    }
}

impl From<SettlementError> for ceiba_shared::AppError {
    fn from(err: SettlementError) -> Self {
        Self::Validation(err.to_string())
    }
}
