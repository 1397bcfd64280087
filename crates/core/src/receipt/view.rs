//! Rounded receipt views.

use ceiba_shared::types::{PeriodId, UnitId};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::settlement::{BreakdownLine, FundShare, Receipt};

/// Decimal places shown for ownership shares.
pub const SHARE_DECIMALS: u32 = 4;

/// One common expense line as printed on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownLineView {
    /// Expense description.
    pub description: String,
    /// Building-wide amount.
    pub expense_total: Decimal,
    /// The unit's part.
    pub unit_share: Decimal,
}

/// One fund line as printed on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundShareView {
    /// Fund name.
    pub name: String,
    /// Percentage rate.
    pub rate: Decimal,
    /// Building-wide fund amount.
    pub period_total: Decimal,
    /// The unit's part.
    pub unit_share: Decimal,
}

/// A receipt with every amount rounded for display or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptView {
    /// Billing period.
    pub period_id: PeriodId,
    /// Billed unit.
    pub unit_id: UnitId,
    /// Unit label, e.g. "2A".
    pub unit_label: String,
    /// Owner name at issuance.
    pub owner_name: String,
    /// Ownership share, four decimals.
    pub share: Decimal,
    /// Common expense lines.
    pub common_breakdown: Vec<BreakdownLineView>,
    /// Unit's part of common expenses.
    pub common_share: Decimal,
    /// Unit's part of each fund.
    pub fund_shares: Vec<FundShareView>,
    /// Charges for the period.
    pub subtotal: Decimal,
    /// Carried balance.
    pub prior_balance: Decimal,
    /// Amount to pay.
    pub total_due: Decimal,
}

impl ReceiptView {
    /// Rounds a receipt to `decimal_places`.
    ///
    /// Each amount is rounded on its own, so the printed subtotal may differ
    /// by a cent from the sum of the printed lines.
    #[must_use]
    pub fn from_receipt(receipt: &Receipt, decimal_places: u32) -> Self {
        let round = |value: Decimal| round_to(value, decimal_places);
        Self {
            period_id: receipt.period_id,
            unit_id: receipt.unit_id,
            unit_label: receipt.unit.label.clone(),
            owner_name: receipt.unit.owner_name.clone(),
            share: round_to(receipt.unit.share, SHARE_DECIMALS),
            common_breakdown: receipt
                .common_breakdown
                .iter()
                .map(|line: &BreakdownLine| BreakdownLineView {
                    description: line.description.clone(),
                    expense_total: round(line.expense_total),
                    unit_share: round(line.unit_share),
                })
                .collect(),
            common_share: round(receipt.common_share),
            fund_shares: receipt
                .fund_shares
                .iter()
                .map(|fund: &FundShare| FundShareView {
                    name: fund.name.clone(),
                    rate: fund.rate,
                    period_total: round(fund.period_total),
                    unit_share: round(fund.unit_share),
                })
                .collect(),
            subtotal: round(receipt.subtotal),
            prior_balance: round(receipt.prior_balance),
            total_due: round(receipt.total_due),
        }
    }

    /// Returns the rounded part of a fund, zero when absent.
    #[must_use]
    pub fn fund_share(&self, name: &str) -> Decimal {
        self.fund_shares
            .iter()
            .find(|f| f.name == name)
            .map_or(Decimal::ZERO, |f| f.unit_share)
    }
}

/// Rounds half away from zero and pads to exactly `decimal_places`.
pub(crate) fn round_to(value: Decimal, decimal_places: u32) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimal_places);
    rounded
}
