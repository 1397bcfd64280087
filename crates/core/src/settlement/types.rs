//! Settlement input configuration and receipt output types.

use std::fmt;

use ceiba_shared::CondominiumConfig;
use ceiba_shared::types::{ExpenseId, PeriodId, UnitId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Name of the reserve fund in a [`FundConfig`].
pub const RESERVE_FUND: &str = "reserve";
/// Name of the contingency fund in a [`FundConfig`].
pub const CONTINGENCY_FUND: &str = "contingency";

/// How a unit's ownership share is turned into its allocation fraction.
///
/// The default is [`AllocationBasis::Normalized`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationBasis {
    /// `share / sum of all shares`. Self-normalizing when shares do not add to 100.
    #[default]
    Normalized,
    /// `share / 100`. Assumes the roster's shares add to exactly 100.
    AbsolutePercent,
}

impl AllocationBasis {
    /// Returns the string representation of the basis.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normalized => "normalized",
            Self::AbsolutePercent => "absolute_percent",
        }
    }

    /// Parses a basis from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "normalized" => Some(Self::Normalized),
            "absolute_percent" => Some(Self::AbsolutePercent),
            _ => None,
        }
    }
}

impl fmt::Display for AllocationBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named fund and its rate, as a percentage (0-100) of common expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundRate {
    /// Fund name, e.g. "reserve".
    pub name: String,
    /// Percentage rate.
    pub rate: Decimal,
}

/// Ordered set of fund rates charged on top of common expenses.
///
/// Order is display order on receipts. Serialized as a list of fund rates;
/// a name listed twice keeps its first position and its last rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FundRate>", into = "Vec<FundRate>")]
pub struct FundConfig {
    funds: Vec<FundRate>,
}

impl FundConfig {
    /// Creates an empty configuration (no fund surcharges).
    #[must_use]
    pub const fn new() -> Self {
        Self { funds: Vec::new() }
    }

    /// Adds a fund, replacing the rate of an existing fund with the same name.
    #[must_use]
    pub fn with_fund(mut self, name: impl Into<String>, rate: Decimal) -> Self {
        let name = name.into();
        match self.funds.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.rate = rate,
            None => self.funds.push(FundRate { name, rate }),
        }
        self
    }

    /// Builds the fund set from the condominium record: reserve, contingency,
    /// then any extra funds in name order.
    #[must_use]
    pub fn from_condominium(config: &CondominiumConfig) -> Self {
        config.extra_funds.iter().fold(
            Self::new()
                .with_fund(RESERVE_FUND, config.reserve_percent)
                .with_fund(CONTINGENCY_FUND, config.contingency_percent),
            |funds, (name, rate)| funds.with_fund(name.clone(), *rate),
        )
    }

    /// Returns the rate of a fund, if configured.
    #[must_use]
    pub fn rate(&self, name: &str) -> Option<Decimal> {
        self.funds.iter().find(|f| f.name == name).map(|f| f.rate)
    }

    /// Iterates funds in display order.
    pub fn iter(&self) -> impl Iterator<Item = &FundRate> {
        self.funds.iter()
    }

    /// Number of configured funds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.funds.len()
    }

    /// Returns true if no fund is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }
}

impl From<Vec<FundRate>> for FundConfig {
    fn from(funds: Vec<FundRate>) -> Self {
        funds
            .into_iter()
            .fold(Self::new(), |config, fund| config.with_fund(fund.name, fund.rate))
    }
}

impl From<FundConfig> for Vec<FundRate> {
    fn from(config: FundConfig) -> Self {
        config.funds
    }
}

/// Unit data frozen onto a receipt when it is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    /// Unit label at issuance.
    pub label: String,
    /// Owner name at issuance.
    pub owner_name: String,
    /// Ownership share at issuance.
    pub share: Decimal,
}

/// One common expense and the unit's part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownLine {
    /// Expense line this row comes from.
    pub expense_id: ExpenseId,
    /// Expense description.
    pub description: String,
    /// Full amount of the expense for the building.
    pub expense_total: Decimal,
    /// The unit's prorated part (cuota parte).
    pub unit_share: Decimal,
}

/// Period-wide total of one fund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundTotal {
    /// Fund name.
    pub name: String,
    /// Percentage rate applied.
    pub rate: Decimal,
    /// `total_common * rate / 100`.
    pub amount: Decimal,
}

/// A unit's part of one fund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundShare {
    /// Fund name.
    pub name: String,
    /// Percentage rate applied.
    pub rate: Decimal,
    /// Period-wide fund total.
    pub period_total: Decimal,
    /// The unit's prorated part.
    pub unit_share: Decimal,
}

/// Settlement of one unit for one billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Billing period, copied verbatim.
    pub period_id: PeriodId,
    /// Billed unit.
    pub unit_id: UnitId,
    /// Unit identity at issuance.
    pub unit: UnitSnapshot,
    /// Common expenses in registration order with the unit's part of each.
    pub common_breakdown: Vec<BreakdownLine>,
    /// Unit's part of the common expense pool.
    pub common_share: Decimal,
    /// Unit's part of each configured fund, in fund order.
    pub fund_shares: Vec<FundShare>,
    /// `common_share` plus every fund share.
    pub subtotal: Decimal,
    /// Carried balance: negative is debt, positive is credit.
    pub prior_balance: Decimal,
    /// `subtotal + prior_balance`.
    pub total_due: Decimal,
}

impl Receipt {
    /// Returns the unit's part of a fund, zero when the fund is not configured.
    #[must_use]
    pub fn fund_share(&self, name: &str) -> Decimal {
        self.fund_shares
            .iter()
            .find(|f| f.name == name)
            .map_or(Decimal::ZERO, |f| f.unit_share)
    }
}

/// Full engine output for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Billing period.
    pub period_id: PeriodId,
    /// Basis used to compute fractions.
    pub basis: AllocationBasis,
    /// Sum of common expenses.
    pub total_common: Decimal,
    /// Period-wide fund totals, in fund order.
    pub fund_totals: Vec<FundTotal>,
    /// One receipt per unit, in roster order.
    pub receipts: Vec<Receipt>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_basis_parse() {
        assert_eq!(AllocationBasis::parse("normalized"), Some(AllocationBasis::Normalized));
        assert_eq!(
            AllocationBasis::parse(" ABSOLUTE_PERCENT "),
            Some(AllocationBasis::AbsolutePercent)
        );
        assert_eq!(AllocationBasis::parse("equal"), None);
        assert_eq!(AllocationBasis::default(), AllocationBasis::Normalized);
    }

    #[test]
    fn test_with_fund_replaces_same_name() {
        let funds = FundConfig::new()
            .with_fund(RESERVE_FUND, dec!(10))
            .with_fund(CONTINGENCY_FUND, dec!(20))
            .with_fund(RESERVE_FUND, dec!(12));
        assert_eq!(funds.len(), 2);
        assert_eq!(funds.rate(RESERVE_FUND), Some(dec!(12)));
        let names: Vec<&str> = funds.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec![RESERVE_FUND, CONTINGENCY_FUND]);
    }

    #[test]
    fn test_from_condominium_order() {
        let mut condo = CondominiumConfig::default();
        condo.extra_funds.insert("stabilization".to_string(), dec!(5));
        let funds = FundConfig::from_condominium(&condo);
        let names: Vec<&str> = funds.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec![RESERVE_FUND, CONTINGENCY_FUND, "stabilization"]);
        assert_eq!(funds.rate(CONTINGENCY_FUND), Some(dec!(23.5)));
    }

    #[test]
    fn test_deserialized_duplicate_fund_is_merged() {
        let funds: FundConfig = serde_json::from_str(
            r#"[{"name":"reserve","rate":"10"},{"name":"contingency","rate":"20"},{"name":"reserve","rate":"12"}]"#,
        )
        .unwrap();
        assert_eq!(funds.len(), 2);
        assert_eq!(funds.rate(RESERVE_FUND), Some(dec!(12)));
        let names: Vec<&str> = funds.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec![RESERVE_FUND, CONTINGENCY_FUND]);
    }

    #[test]
    fn test_fund_config_serializes_as_list() {
        let funds = FundConfig::new().with_fund(RESERVE_FUND, dec!(10));
        let json = serde_json::to_string(&funds).unwrap();
        assert_eq!(json, r#"[{"name":"reserve","rate":"10"}]"#);
    }
}
