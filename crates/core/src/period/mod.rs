//! Billing period lifecycle.
//!
//! A period collects expense lines while in draft. Finalizing it computes the
//! settlement, issues receipts and publishes the period in one step.

pub mod error;
pub mod types;

pub use error::PeriodError;
pub use types::{BillingPeriod, PeriodStatus, ensure_unique, month_name};
