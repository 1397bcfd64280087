//! JSON input of the settlement CLI.

use std::fs;
use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::Deserialize;

use ceiba_core::expense::{Expense, ExpenseCategory};
use ceiba_core::property::{ImportRow, NewUnitInput, Unit};
use ceiba_core::settlement::{AllocationBasis, FundConfig};
use ceiba_shared::types::UnitId;

/// A registered unit; `id` keeps receipts stable across runs.
#[derive(Debug, Deserialize)]
pub struct UnitRecord {
    #[serde(default)]
    pub id: Option<UnitId>,
    #[serde(flatten)]
    pub unit: NewUnitInput,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ExpenseRecord {
    pub description: String,
    pub category: ExpenseCategory,
    pub amount: Decimal,
}

/// Everything needed to settle one period.
#[derive(Debug, Deserialize)]
pub struct SettlementInput {
    #[serde(default)]
    pub units: Vec<UnitRecord>,
    /// Spreadsheet-style rows, appended after `units`.
    #[serde(default)]
    pub import_rows: Vec<ImportRow>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    /// Overrides the condominium's fund rates.
    #[serde(default)]
    pub funds: Option<FundConfig>,
    /// Overrides the configured allocation basis.
    #[serde(default)]
    pub basis: Option<AllocationBasis>,
}

impl SettlementInput {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid input file {}", path.display()))
    }

    /// Validated roster in input order.
    pub fn units(&self) -> anyhow::Result<Vec<Unit>> {
        let registered = self.units.iter().map(|record| -> anyhow::Result<Unit> {
            let mut unit = record
                .unit
                .clone()
                .into_unit()
                .with_context(|| format!("Unit {:?}", record.unit.label))?;
            if let Some(id) = record.id {
                unit.id = id;
            }
            unit.active = record.active;
            Ok(unit)
        });

        let imported = self.import_rows.iter().enumerate().map(|(i, row)| {
            row.clone()
                .into_input()
                .and_then(NewUnitInput::into_unit)
                .with_context(|| format!("Import row {}", i + 1))
        });

        registered.chain(imported).collect()
    }

    pub fn expenses(&self) -> anyhow::Result<Vec<Expense>> {
        self.expenses
            .iter()
            .map(|e| {
                Expense::new(e.description.clone(), e.category, e.amount)
                    .with_context(|| format!("Expense {:?}", e.description))
            })
            .collect()
    }
}
