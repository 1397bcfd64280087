//! Expense concept catalog and period expense lines.

pub mod error;
pub mod types;

pub use error::CatalogError;
pub use types::{ConceptKind, Expense, ExpenseCategory, ExpenseConcept};
