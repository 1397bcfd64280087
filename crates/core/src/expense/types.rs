//! Expense catalog types.

use std::fmt;

use ceiba_shared::types::{ConceptId, ExpenseId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::CatalogError;

/// How an expense is billed.
///
/// Only `Common` expenses are prorated across units by ownership share.
/// Fund categories record money spent from or paid into a fund; fund
/// surcharges themselves are computed from rates, not from these lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Shared building expense, prorated by ownership share.
    Common,
    /// Expense billed to a single unit.
    Individual,
    /// Reserve fund movement.
    ReserveFund,
    /// Contingency fund movement.
    ContingencyFund,
    /// Stabilization fund movement.
    StabilizationFund,
}

impl ExpenseCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Individual => "individual",
            Self::ReserveFund => "reserve_fund",
            Self::ContingencyFund => "contingency_fund",
            Self::StabilizationFund => "stabilization_fund",
        }
    }

    /// Parses a category, accepting the legacy Spanish keys too.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "common" | "comun" => Some(Self::Common),
            "individual" => Some(Self::Individual),
            "reserve_fund" | "fondo_reserva" => Some(Self::ReserveFund),
            "contingency_fund" | "fondo_contingencia" => Some(Self::ContingencyFund),
            "stabilization_fund" | "fondo_estabilizacion" => Some(Self::StabilizationFund),
            _ => None,
        }
    }

    /// Returns true if expenses of this category feed the prorated pool.
    #[must_use]
    pub fn is_prorated(&self) -> bool {
        matches!(self, Self::Common)
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Whether a concept has a standing amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConceptKind {
    /// Same amount every month (e.g. concierge salary).
    Fixed {
        /// Standing amount.
        amount: Decimal,
    },
    /// Amount entered each month (e.g. electricity bill).
    Variable,
}

/// A catalog entry describing a kind of expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseConcept {
    /// Unique identifier.
    pub id: ConceptId,
    /// Description copied onto registered expenses.
    pub description: String,
    /// Billing category.
    pub category: ExpenseCategory,
    /// Fixed or variable.
    pub kind: ConceptKind,
}

impl ExpenseConcept {
    /// Creates a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyDescription` for a blank description and
    /// `CatalogError::NegativeAmount` for a negative fixed amount.
    pub fn new(
        description: impl Into<String>,
        category: ExpenseCategory,
        kind: ConceptKind,
    ) -> Result<Self, CatalogError> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(CatalogError::EmptyDescription);
        }
        if let ConceptKind::Fixed { amount } = kind {
            ensure_non_negative(amount)?;
        }
        Ok(Self {
            id: ConceptId::new(),
            description,
            category,
            kind,
        })
    }

    /// Registers an expense line from this concept.
    ///
    /// A provided amount always wins; otherwise fixed concepts fall back to
    /// their standing amount.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingAmount` for a variable concept without an
    /// amount and `CatalogError::NegativeAmount` for a negative amount.
    pub fn register(&self, amount: Option<Decimal>) -> Result<Expense, CatalogError> {
        let amount = match (amount, self.kind) {
            (Some(amount), _) | (None, ConceptKind::Fixed { amount }) => amount,
            (None, ConceptKind::Variable) => {
                return Err(CatalogError::MissingAmount {
                    concept: self.description.clone(),
                });
            }
        };

        let mut expense = Expense::new(self.description.clone(), self.category, amount)?;
        expense.concept_id = Some(self.id);
        Ok(expense)
    }
}

/// An expense line registered against a billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier.
    pub id: ExpenseId,
    /// Catalog concept it was registered from, if any.
    #[serde(default)]
    pub concept_id: Option<ConceptId>,
    /// Description shown on receipts.
    pub description: String,
    /// Billing category.
    pub category: ExpenseCategory,
    /// Amount, never negative.
    pub amount: Decimal,
}

impl Expense {
    /// Creates an expense line not tied to a catalog concept.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyDescription` or `CatalogError::NegativeAmount`.
    pub fn new(
        description: impl Into<String>,
        category: ExpenseCategory,
        amount: Decimal,
    ) -> Result<Self, CatalogError> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(CatalogError::EmptyDescription);
        }
        ensure_non_negative(amount)?;
        Ok(Self {
            id: ExpenseId::new(),
            concept_id: None,
            description,
            category,
            amount,
        })
    }

    /// Returns true if this line feeds the prorated pool.
    #[must_use]
    pub fn is_prorated(&self) -> bool {
        self.category.is_prorated()
    }
}

fn ensure_non_negative(amount: Decimal) -> Result<(), CatalogError> {
    if amount < Decimal::ZERO {
        return Err(CatalogError::NegativeAmount(amount));
    }
    Ok(())
}
