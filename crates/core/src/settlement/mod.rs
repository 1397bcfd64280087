//! Settlement engine: proration of common expenses and fund surcharges.
//!
//! # Modules
//!
//! - `types` - Fund configuration, allocation basis and receipt output
//! - `engine` - The pure settlement computation
//! - `error` - Settlement error types

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::{INTERNAL_SCALE, SettlementEngine, compute_settlement};
pub use error::SettlementError;
pub use types::{
    AllocationBasis, BreakdownLine, CONTINGENCY_FUND, FundConfig, FundRate, FundShare, FundTotal,
    RESERVE_FUND, Receipt, Settlement, UnitSnapshot,
};
