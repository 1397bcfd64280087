//! Delivery of issued receipts to unit owners.

pub mod error;
pub mod mailer;
pub mod service;

pub use error::DispatchError;
pub use mailer::{ReceiptMailer, ReceiptRenderer};
pub use service::{DispatchFailure, DispatchReport, DispatchService};
