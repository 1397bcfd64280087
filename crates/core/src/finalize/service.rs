//! Finalize service.

use chrono::Utc;
use tracing::{info, warn};

use super::error::FinalizeError;
use super::store::{SettlementStore, UnitRoster};
use super::types::{FinalizeOutcome, IssuedReceipt, PublishBatch};
use crate::period::{BillingPeriod, PeriodError};
use crate::property::{active_units, share_summary};
use crate::settlement::{AllocationBasis, FundConfig, SettlementEngine};

/// Stateless service that publishes a billing period.
pub struct FinalizeService;

impl FinalizeService {
    /// Computes and issues the receipts of a draft period and publishes it.
    ///
    /// Inactive units are skipped. A roster whose shares do not add up to
    /// 100 is reported as a warning and billed anyway. The caller's `period`
    /// is never modified; the published copy is returned in the outcome.
    ///
    /// # Errors
    ///
    /// - `FinalizeError::Period` if the period is not in draft
    /// - `FinalizeError::Settlement` if the engine rejects a share or amount;
    ///   nothing is committed
    /// - `FinalizeError::Store` if the roster cannot be read or the batch
    ///   cannot be committed
    pub fn finalize<R, S>(
        period: &BillingPeriod,
        roster: &R,
        store: &S,
        funds: &FundConfig,
        basis: AllocationBasis,
    ) -> Result<FinalizeOutcome, FinalizeError>
    where
        R: UnitRoster + ?Sized,
        S: SettlementStore + ?Sized,
    {
        if !period.is_draft() {
            return Err(PeriodError::NotDraft(period.id).into());
        }

        let units = active_units(&roster.units()?);
        let shares = share_summary(&units);
        if let Some(message) = shares.warning() {
            warn!(period_id = %period.id, total = ?shares.total, "{message}");
        }

        let settlement =
            SettlementEngine::settle(period.id, &period.expenses, &units, funds, basis)
                .inspect_err(|e| {
                    warn!(period_id = %period.id, error = %e, "Settlement rejected, period left in draft");
                })?;

        let issued_at = Utc::now();
        let receipts: Vec<IssuedReceipt> = settlement
            .receipts
            .into_iter()
            .map(|receipt| IssuedReceipt::issue(receipt, issued_at))
            .collect();

        let mut published = period.clone();
        published.publish(settlement.fund_totals, issued_at)?;

        store.commit(PublishBatch {
            period: published.clone(),
            receipts: receipts.clone(),
        })?;

        info!(
            period_id = %published.id,
            period = %published.label(),
            receipts = receipts.len(),
            total_common = %settlement.total_common,
            basis = %basis,
            "Billing period published"
        );

        Ok(FinalizeOutcome {
            period: published,
            receipts,
            shares,
        })
    }
}
