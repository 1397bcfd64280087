//! Core business logic for Ceiba.
//!
//! This crate contains the condominium billing logic with ZERO web or
//! database dependencies. Storage and mail delivery are reached through
//! the ports declared in `finalize` and `dispatch`.
//!
//! # Modules
//!
//! - `property` - Units, owners and the ownership share check
//! - `expense` - Expense concepts and expense lines
//! - `period` - Billing period lifecycle
//! - `settlement` - Proration of expenses and funds into receipts
//! - `receipt` - Rounded receipt views and mail texts
//! - `finalize` - Publishing a period with its receipts
//! - `dispatch` - Mailing receipts to owners

pub mod dispatch;
pub mod expense;
pub mod finalize;
pub mod period;
pub mod property;
pub mod receipt;
pub mod settlement;
