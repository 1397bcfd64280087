//! Unit registry error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while registering or importing units.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Unit label is blank.
    #[error("Unit label cannot be empty")]
    EmptyLabel,

    /// Ownership share is below zero.
    #[error("Ownership share cannot be negative: {0}")]
    NegativeShare(Decimal),

    /// Email address is malformed.
    #[error("Invalid email address: {0:?}")]
    InvalidEmail(String),

    /// A numeric import cell could not be parsed.
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber {
        /// Column name.
        field: &'static str,
        /// Raw cell text.
        value: String,
    },
}

impl RegistryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyLabel => "EMPTY_LABEL",
            Self::NegativeShare(_) => "NEGATIVE_SHARE",
            Self::InvalidEmail(_) => "INVALID_EMAIL",
            Self::InvalidNumber { .. } => "INVALID_NUMBER",
        }
    }
}

impl From<RegistryError> for ceiba_shared::AppError {
    fn from(err: RegistryError) -> Self {
        Self::Validation(err.to_string())
    }
}
