//! Proration of a period's common expenses and fund surcharges across units.
//!
//! The engine is a pure function of its arguments: no I/O, no retained state.
//! Every unit's fraction comes from its ownership share under the chosen
//! [`AllocationBasis`]; common expenses, fund totals and the per-line
//! breakdown are all multiplied by that same fraction.
//!
//! Amounts keep [`INTERNAL_SCALE`] decimal places. Rounding to cents happens
//! only when receipts are presented or exported.

use ceiba_shared::types::PeriodId;
use rust_decimal::Decimal;

use super::error::SettlementError;
use super::types::{
    AllocationBasis, BreakdownLine, FundConfig, FundShare, FundTotal, Receipt, Settlement,
    UnitSnapshot,
};
use crate::expense::Expense;
use crate::property::Unit;

/// Decimal places kept for every computed amount.
pub const INTERNAL_SCALE: u32 = 10;

/// Settlement engine.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Computes the settlement of a billing period.
    ///
    /// `units` is expected to be the active roster; every unit passed in gets
    /// a receipt, in the given order. Zero units or zero common expenses are
    /// valid and produce an empty receipt list or zero charges respectively.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::InvalidInput` when a share or expense amount
    /// is negative, or when an amount is too large to compute with.
    pub fn settle(
        period_id: PeriodId,
        expenses: &[Expense],
        units: &[Unit],
        funds: &FundConfig,
        basis: AllocationBasis,
    ) -> Result<Settlement, SettlementError> {
        validate_inputs(expenses, units)?;

        let common: Vec<&Expense> = expenses.iter().filter(|e| e.is_prorated()).collect();
        let total_common = checked_sum(common.iter().map(|e| e.amount), "expense amounts")?;

        let fund_totals = funds
            .iter()
            .map(|fund| {
                let amount = total_common
                    .checked_mul(fund.rate)
                    .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
                    .ok_or_else(|| SettlementError::overflow(&fund.name, "fund total"))?;
                Ok(FundTotal {
                    name: fund.name.clone(),
                    rate: fund.rate,
                    amount: to_internal(amount),
                })
            })
            .collect::<Result<Vec<_>, SettlementError>>()?;

        let denominator = match basis {
            AllocationBasis::Normalized => checked_sum(units.iter().map(|u| u.share), "shares")?,
            AllocationBasis::AbsolutePercent => Decimal::ONE_HUNDRED,
        };

        let receipts = units
            .iter()
            .map(|unit| {
                settle_unit(
                    period_id,
                    unit,
                    fraction(unit.share, denominator),
                    &common,
                    total_common,
                    &fund_totals,
                )
            })
            .collect::<Result<Vec<_>, SettlementError>>()?;

        Ok(Settlement {
            period_id,
            basis,
            total_common,
            fund_totals,
            receipts,
        })
    }
}

/// Computes one receipt per unit.
///
/// Shorthand for [`SettlementEngine::settle`] when only the receipts matter.
///
/// # Errors
///
/// See [`SettlementEngine::settle`].
pub fn compute_settlement(
    period_id: PeriodId,
    expenses: &[Expense],
    units: &[Unit],
    funds: &FundConfig,
    basis: AllocationBasis,
) -> Result<Vec<Receipt>, SettlementError> {
    SettlementEngine::settle(period_id, expenses, units, funds, basis).map(|s| s.receipts)
}

fn validate_inputs(expenses: &[Expense], units: &[Unit]) -> Result<(), SettlementError> {
    if let Some(expense) = expenses.iter().find(|e| is_negative(e.amount)) {
        return Err(SettlementError::InvalidInput {
            field: "amount",
            subject: expense.description.clone(),
            reason: format!("expense amount {} is negative", expense.amount),
        });
    }
    if let Some(unit) = units.iter().find(|u| is_negative(u.share)) {
        return Err(SettlementError::InvalidInput {
            field: "share",
            subject: unit.label.clone(),
            reason: format!("ownership share {} is negative", unit.share),
        });
    }
    Ok(())
}

/// Fraction of the building a unit pays for. An all-zero roster pays nothing.
fn fraction(share: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    share.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

fn settle_unit(
    period_id: PeriodId,
    unit: &Unit,
    fraction: Decimal,
    common: &[&Expense],
    total_common: Decimal,
    fund_totals: &[FundTotal],
) -> Result<Receipt, SettlementError> {
    let prorate = |amount: Decimal| {
        amount
            .checked_mul(fraction)
            .map(to_internal)
            .ok_or_else(|| SettlementError::overflow(&unit.label, "prorated amount"))
    };

    let common_breakdown = common
        .iter()
        .map(|expense| {
            Ok(BreakdownLine {
                expense_id: expense.id,
                description: expense.description.clone(),
                expense_total: expense.amount,
                unit_share: prorate(expense.amount)?,
            })
        })
        .collect::<Result<Vec<_>, SettlementError>>()?;

    let common_share = prorate(total_common)?;

    let fund_shares = fund_totals
        .iter()
        .map(|fund| {
            Ok(FundShare {
                name: fund.name.clone(),
                rate: fund.rate,
                period_total: fund.amount,
                unit_share: prorate(fund.amount)?,
            })
        })
        .collect::<Result<Vec<_>, SettlementError>>()?;

    let subtotal = checked_sum(
        std::iter::once(common_share).chain(fund_shares.iter().map(|f| f.unit_share)),
        "subtotal",
    )?;
    let total_due = subtotal
        .checked_add(unit.prior_balance)
        .ok_or_else(|| SettlementError::overflow(&unit.label, "total due"))?;

    Ok(Receipt {
        period_id,
        unit_id: unit.id,
        unit: UnitSnapshot {
            label: unit.label.clone(),
            owner_name: unit.owner.name.clone(),
            share: unit.share,
        },
        common_breakdown,
        common_share,
        fund_shares,
        subtotal,
        prior_balance: unit.prior_balance,
        total_due,
    })
}

fn checked_sum(
    mut values: impl Iterator<Item = Decimal>,
    what: &'static str,
) -> Result<Decimal, SettlementError> {
    values.try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| SettlementError::overflow(what, "sum"))
    })
}

fn to_internal(value: Decimal) -> Decimal {
    value.round_dp(INTERNAL_SCALE)
}

fn is_negative(value: Decimal) -> bool {
    value < Decimal::ZERO
}
