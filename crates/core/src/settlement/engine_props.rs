//! Property-based tests for the settlement engine.

use proptest::prelude::*;
use rust_decimal::Decimal;

use ceiba_shared::types::{ExpenseId, PeriodId, UnitId};

use super::engine::SettlementEngine;
use super::types::{AllocationBasis, FundConfig};
use crate::expense::{Expense, ExpenseCategory};
use crate::property::{Contact, Unit};

/// Strategy for an ownership share between 0.00001 and 50.
fn share() -> impl Strategy<Value = Decimal> {
    (1i64..5_000_000i64).prop_map(|v| Decimal::new(v, 5))
}

/// Strategy for an expense amount from 0.00 to 1,000,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a signed prior balance from -100,000.00 to 100,000.00.
fn prior_balance() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a fund rate from 0.00% to 100.00%.
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..10_000i64).prop_map(|v| Decimal::new(v, 2))
}

fn category() -> impl Strategy<Value = ExpenseCategory> {
    prop_oneof![
        3 => Just(ExpenseCategory::Common),
        1 => Just(ExpenseCategory::Individual),
        1 => Just(ExpenseCategory::ReserveFund),
        1 => Just(ExpenseCategory::ContingencyFund),
        1 => Just(ExpenseCategory::StabilizationFund),
    ]
}

fn expenses() -> impl Strategy<Value = Vec<Expense>> {
    prop::collection::vec((category(), amount()), 0..10).prop_map(|lines| {
        lines
            .into_iter()
            .enumerate()
            .map(|(i, (category, amount))| Expense {
                id: ExpenseId::new(),
                concept_id: None,
                description: format!("Gasto {i}"),
                category,
                amount,
            })
            .collect()
    })
}

fn units() -> impl Strategy<Value = Vec<Unit>> {
    prop::collection::vec((share(), prior_balance()), 1..25).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (share, prior_balance))| Unit {
                id: UnitId::new(),
                label: format!("U{i}"),
                owner: Contact {
                    name: format!("Owner {i}"),
                    email: format!("u{i}@ceiba.test"),
                    phone: None,
                },
                tenant: None,
                share,
                prior_balance,
                active: true,
            })
            .collect()
    })
}

fn funds() -> impl Strategy<Value = FundConfig> {
    prop::collection::vec(rate(), 0..4).prop_map(|rates| {
        rates
            .into_iter()
            .enumerate()
            .fold(FundConfig::new(), |funds, (i, rate)| {
                funds.with_fund(format!("fund-{i}"), rate)
            })
    })
}

fn common_total(expenses: &[Expense]) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.is_prorated())
        .map(|e| e.amount)
        .sum()
}

/// `|actual - expected| <= 1e-6 * max(|expected|, 1)`.
fn within_tolerance(actual: Decimal, expected: Decimal) -> bool {
    let scale = expected.abs().max(Decimal::ONE);
    (actual - expected).abs() <= scale * Decimal::new(1, 6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: an empty roster produces no receipts.
    #[test]
    fn prop_empty_roster_yields_nothing(expenses in expenses(), funds in funds()) {
        let settlement = SettlementEngine::settle(
            PeriodId::new(), &expenses, &[], &funds, AllocationBasis::Normalized,
        ).unwrap();
        prop_assert!(settlement.receipts.is_empty());
    }

    /// Property: without expenses every charge is zero and only the prior balance is due.
    #[test]
    fn prop_no_expenses_bills_prior_balance(units in units(), funds in funds()) {
        let settlement = SettlementEngine::settle(
            PeriodId::new(), &[], &units, &funds, AllocationBasis::Normalized,
        ).unwrap();

        for (receipt, unit) in settlement.receipts.iter().zip(&units) {
            prop_assert_eq!(receipt.common_share, Decimal::ZERO);
            prop_assert!(receipt.fund_shares.iter().all(|f| f.unit_share.is_zero()));
            prop_assert_eq!(receipt.subtotal, Decimal::ZERO);
            prop_assert_eq!(receipt.total_due, unit.prior_balance);
        }
    }

    /// Property: unit common shares add back up to the common expense total.
    #[test]
    fn prop_common_pool_conserved(expenses in expenses(), units in units(), funds in funds()) {
        let settlement = SettlementEngine::settle(
            PeriodId::new(), &expenses, &units, &funds, AllocationBasis::Normalized,
        ).unwrap();

        let total = common_total(&expenses);
        prop_assert_eq!(settlement.total_common, total);

        let allocated: Decimal = settlement.receipts.iter().map(|r| r.common_share).sum();
        prop_assert!(
            within_tolerance(allocated, total),
            "allocated {} of {}", allocated, total
        );
    }

    /// Property: unit fund shares add up to `total_common * rate / 100` per fund.
    #[test]
    fn prop_fund_totals_proportional(expenses in expenses(), units in units(), funds in funds()) {
        let settlement = SettlementEngine::settle(
            PeriodId::new(), &expenses, &units, &funds, AllocationBasis::Normalized,
        ).unwrap();

        let total = common_total(&expenses);
        for fund in funds.iter() {
            let expected = total * fund.rate / Decimal::ONE_HUNDRED;
            let allocated: Decimal = settlement
                .receipts
                .iter()
                .map(|r| r.fund_share(&fund.name))
                .sum();
            prop_assert!(
                within_tolerance(allocated, expected),
                "fund {} allocated {} of {}", fund.name, allocated, expected
            );
        }
    }

    /// Property: the prior balance is added to the subtotal without rounding.
    #[test]
    fn prop_prior_balance_added_exactly(
        expenses in expenses(),
        units in units(),
        funds in funds(),
        absolute in any::<bool>(),
    ) {
        let basis = if absolute { AllocationBasis::AbsolutePercent } else { AllocationBasis::Normalized };
        let settlement = SettlementEngine::settle(
            PeriodId::new(), &expenses, &units, &funds, basis,
        ).unwrap();

        for (receipt, unit) in settlement.receipts.iter().zip(&units) {
            prop_assert_eq!(receipt.total_due - receipt.subtotal, unit.prior_balance);
        }
    }

    /// Property: the per-line breakdown agrees with the unit's common share.
    #[test]
    fn prop_breakdown_matches_common_share(expenses in expenses(), units in units()) {
        let settlement = SettlementEngine::settle(
            PeriodId::new(), &expenses, &units, &FundConfig::new(), AllocationBasis::Normalized,
        ).unwrap();

        let common_lines = expenses.iter().filter(|e| e.is_prorated()).count();
        for receipt in &settlement.receipts {
            prop_assert_eq!(receipt.common_breakdown.len(), common_lines);
            let lines: Decimal = receipt.common_breakdown.iter().map(|l| l.unit_share).sum();
            prop_assert!(within_tolerance(lines, receipt.common_share));
        }
    }
}
