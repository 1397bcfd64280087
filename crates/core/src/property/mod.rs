//! Unit (property) registry.
//!
//! Units carry the ownership share used to prorate common expenses and the
//! balance carried from earlier periods.

pub mod error;
pub mod roster;
pub mod types;

pub use error::RegistryError;
pub use roster::{ShareSummary, active_units, share_summary};
pub use types::{Contact, ImportRow, NewUnitInput, Unit};
