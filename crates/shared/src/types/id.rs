//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `UnitId` where a `PeriodId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UnitId, "Unique identifier for a billed unit (apartment, house).");
typed_id!(ConceptId, "Unique identifier for an expense concept in the catalog.");
typed_id!(ExpenseId, "Unique identifier for an expense line registered in a period.");
typed_id!(PeriodId, "Unique identifier for a billing period.");
typed_id!(ReceiptId, "Unique identifier for an issued receipt.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ids_are_time_ordered() {
        let first = PeriodId::new();
        let second = PeriodId::new();
        assert!(first <= second);
    }

    #[test]
    fn test_id_roundtrip_through_string() {
        let id = UnitId::new();
        let parsed = UnitId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_from_invalid_string() {
        assert!(ReceiptId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_id_serializes_transparently() {
        let uuid = Uuid::nil();
        let id = ExpenseId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
        assert_eq!(id.into_inner(), uuid);
    }
}
