//! Unit registry types.

use ceiba_shared::types::UnitId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::RegistryError;

/// Contact details of an owner or tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Full name.
    pub name: String,
    /// Email address receipts are sent to.
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// A billed property (apartment, house, commercial space).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Unique identifier.
    pub id: UnitId,
    /// Display label, e.g. "Apto 10-A".
    pub label: String,
    /// Owner contact.
    pub owner: Contact,
    /// Optional tenant contact.
    #[serde(default)]
    pub tenant: Option<Contact>,
    /// Ownership share (alícuota) as a percentage, e.g. `1.612` for 1.612%.
    pub share: Decimal,
    /// Carried balance: negative is debt, positive is credit.
    #[serde(default)]
    pub prior_balance: Decimal,
    /// Whether the unit takes part in billing.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Input for registering a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUnitInput {
    /// Display label.
    pub label: String,
    /// Owner contact.
    pub owner: Contact,
    /// Optional tenant contact.
    #[serde(default)]
    pub tenant: Option<Contact>,
    /// Ownership share percentage.
    pub share: Decimal,
    /// Opening balance.
    #[serde(default)]
    pub prior_balance: Decimal,
}

impl NewUnitInput {
    /// Validates the input.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::EmptyLabel` for a blank label,
    /// `RegistryError::NegativeShare` for a share below zero and
    /// `RegistryError::InvalidEmail` for a malformed owner or tenant email.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.label.trim().is_empty() {
            return Err(RegistryError::EmptyLabel);
        }
        if self.share.is_sign_negative() && !self.share.is_zero() {
            return Err(RegistryError::NegativeShare(self.share));
        }
        validate_email(&self.owner.email)?;
        if let Some(tenant) = &self.tenant {
            validate_email(&tenant.email)?;
        }
        Ok(())
    }

    /// Validates the input and turns it into an active unit with a fresh ID.
    ///
    /// # Errors
    ///
    /// See [`NewUnitInput::validate`].
    pub fn into_unit(self) -> Result<Unit, RegistryError> {
        self.validate()?;
        Ok(Unit {
            id: UnitId::new(),
            label: self.label.trim().to_string(),
            owner: self.owner,
            tenant: self.tenant,
            share: self.share,
            prior_balance: self.prior_balance,
            active: true,
        })
    }
}

/// Minimal shape check: `local@domain.tld`.
fn validate_email(email: &str) -> Result<(), RegistryError> {
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain.split('.').count() >= 2
            && domain.split('.').all(|part| !part.is_empty())
    });

    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidEmail(email.to_string()))
    }
}

/// A row of an already-parsed roster import (CSV or spreadsheet).
///
/// Numeric cells arrive as text; blank cells mean zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportRow {
    /// Unit label column.
    pub label: String,
    /// Owner name column.
    pub owner_name: String,
    /// Owner email column.
    pub owner_email: String,
    /// Ownership share column.
    #[serde(default)]
    pub share: Option<String>,
    /// Prior balance column.
    #[serde(default)]
    pub prior_balance: Option<String>,
}

impl ImportRow {
    /// Converts the row into a registration input.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidNumber` when a numeric cell is not a number.
    pub fn into_input(self) -> Result<NewUnitInput, RegistryError> {
        Ok(NewUnitInput {
            share: parse_cell("share", self.share.as_deref())?,
            prior_balance: parse_cell("prior_balance", self.prior_balance.as_deref())?,
            label: self.label.trim().to_string(),
            owner: Contact {
                name: self.owner_name.trim().to_string(),
                email: self.owner_email.trim().to_string(),
                phone: None,
            },
            tenant: None,
        })
    }
}

fn parse_cell(field: &'static str, cell: Option<&str>) -> Result<Decimal, RegistryError> {
    match cell.map(str::trim) {
        None | Some("") => Ok(Decimal::ZERO),
        Some(text) => text
            .parse::<Decimal>()
            .map_err(|_| RegistryError::InvalidNumber {
                field,
                value: text.to_string(),
            }),
    }
}
