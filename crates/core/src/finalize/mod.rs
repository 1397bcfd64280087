//! Finalizing a billing period.
//!
//! Finalize reads the active roster, runs the settlement engine over the
//! period's expenses and commits the issued receipts together with the
//! period's `draft → published` transition as one batch. When the engine
//! refuses its input nothing is committed and the period stays in draft.

pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use error::{FinalizeError, StoreError};
pub use service::FinalizeService;
pub use store::{InMemoryStore, SettlementStore, UnitRoster};
pub use types::{FinalizeOutcome, IssuedReceipt, PublishBatch, ReceiptStatus};
