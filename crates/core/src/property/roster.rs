//! Roster-level helpers: active filtering and the share-sum check.

use rust_decimal::Decimal;
use serde::Serialize;

use super::types::Unit;

/// Number of decimals the share total is compared at.
const SHARE_CHECK_DECIMALS: u32 = 3;

/// Returns the units that take part in billing, in roster order.
#[must_use]
pub fn active_units(units: &[Unit]) -> Vec<Unit> {
    units.iter().filter(|u| u.active).cloned().collect()
}

/// Aggregate of the ownership shares of a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShareSummary {
    /// Sum of all shares, `None` when the sum is out of range.
    pub total: Option<Decimal>,
    /// Number of units summed.
    pub unit_count: usize,
    /// True when the total is 100 at three decimals.
    pub is_balanced: bool,
}

impl ShareSummary {
    /// Advisory message for an unbalanced roster, `None` when balanced.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        if self.is_balanced {
            return None;
        }
        let Some(total) = self.total else {
            return Some(format!(
                "Ownership shares of {} units are too large to add up",
                self.unit_count
            ));
        };
        let mut total = total.round_dp(SHARE_CHECK_DECIMALS);
        total.rescale(SHARE_CHECK_DECIMALS);
        Some(format!(
            "Ownership shares of {} units add up to {total}% instead of 100.000%",
            self.unit_count
        ))
    }
}

/// Sums the shares of the given units.
///
/// An unbalanced roster is a data-quality warning, never an error.
#[must_use]
pub fn share_summary(units: &[Unit]) -> ShareSummary {
    let total = units
        .iter()
        .try_fold(Decimal::ZERO, |acc, u| acc.checked_add(u.share));
    ShareSummary {
        total,
        unit_count: units.len(),
        is_balanced: total
            .is_some_and(|t| t.round_dp(SHARE_CHECK_DECIMALS) == Decimal::ONE_HUNDRED),
    }
}
