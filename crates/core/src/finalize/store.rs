//! Roster and settlement storage ports.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use ceiba_shared::types::{PeriodId, UnitId};

use super::error::StoreError;
use super::types::{IssuedReceipt, PublishBatch};
use crate::period::BillingPeriod;
use crate::property::Unit;

/// Source of the unit roster.
pub trait UnitRoster: Send + Sync {
    /// Lists every registered unit, active or not, in roster order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the roster cannot be read.
    fn units(&self) -> Result<Vec<Unit>, StoreError>;
}

/// Sink for issued receipts and the period transition.
pub trait SettlementStore: Send + Sync {
    /// Persists a publish batch atomically: either every receipt and the
    /// period update are stored, or nothing is.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyIssued` or `StoreError::AlreadyPublished`
    /// when the period was finalized before, `StoreError::Backend` otherwise.
    fn commit(&self, batch: PublishBatch) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct State {
    units: Vec<Unit>,
    periods: HashMap<PeriodId, BillingPeriod>,
    receipts: BTreeMap<(PeriodId, UnitId), IssuedReceipt>,
}

/// In-process store used by the CLI and tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a roster.
    #[must_use]
    pub fn with_units(units: Vec<Unit>) -> Self {
        Self {
            state: Mutex::new(State {
                units,
                ..State::default()
            }),
        }
    }

    /// Saves a draft period.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyPublished` if the stored copy is published.
    pub fn save_period(&self, period: BillingPeriod) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        if state.periods.get(&period.id).is_some_and(|p| !p.is_draft()) {
            return Err(StoreError::AlreadyPublished(period.id));
        }
        state.periods.insert(period.id, period);
        Ok(())
    }

    /// Returns a stored period.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the store is unusable.
    pub fn period(&self, id: PeriodId) -> Result<Option<BillingPeriod>, StoreError> {
        Ok(self.lock()?.periods.get(&id).cloned())
    }

    /// Returns the receipts of a period ordered by unit id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the store is unusable.
    pub fn receipts(&self, period_id: PeriodId) -> Result<Vec<IssuedReceipt>, StoreError> {
        Ok(self
            .lock()?
            .receipts
            .iter()
            .filter(|((p, _), _)| *p == period_id)
            .map(|(_, r)| r.clone())
            .collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

impl UnitRoster for InMemoryStore {
    fn units(&self) -> Result<Vec<Unit>, StoreError> {
        Ok(self.lock()?.units.clone())
    }
}

impl SettlementStore for InMemoryStore {
    fn commit(&self, batch: PublishBatch) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let period_id = batch.period.id;

        if state.periods.get(&period_id).is_some_and(|p| !p.is_draft()) {
            return Err(StoreError::AlreadyPublished(period_id));
        }
        if state.receipts.keys().any(|(p, _)| *p == period_id) {
            return Err(StoreError::AlreadyIssued(period_id));
        }

        // Validation is done; the writes below cannot fail.
        for issued in batch.receipts {
            state
                .receipts
                .insert((period_id, issued.receipt.unit_id), issued);
        }
        state.periods.insert(period_id, batch.period);
        Ok(())
    }
}
