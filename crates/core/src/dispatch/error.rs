//! Dispatch error types.

use ceiba_shared::EmailError;
use ceiba_shared::types::UnitId;
use thiserror::Error;

/// Errors raised while delivering a single receipt.
///
/// None of these abort a batch; they are collected into the report.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The unit has no owner email on record.
    #[error("No owner email for unit {0}")]
    MissingEmail(UnitId),

    /// The receipt document could not be rendered.
    #[error("Failed to render receipt: {0}")]
    Render(String),

    /// The mail could not be built or sent.
    #[error(transparent)]
    Email(#[from] EmailError),
}

impl DispatchError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingEmail(_) => "MISSING_EMAIL",
            Self::Render(_) => "RENDER_FAILED",
            Self::Email(_) => "EMAIL_FAILED",
        }
    }
}

impl From<DispatchError> for ceiba_shared::AppError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::MissingEmail(_) => Self::Validation(err.to_string()),
            DispatchError::Render(_) => Self::Internal(err.to_string()),
            DispatchError::Email(_) => Self::ExternalService(err.to_string()),
        }
    }
}
