//! Per-category monthly ledger row
//!
//! The surrounding ledger keeps `available = carried_in + assigned - spent`
//! (carry-in only when carry-over is enabled). The engine treats `assigned`
//! and `available` as already computed inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::Currency;
use super::ids::CategoryId;
use super::money::Money;
use super::month::YearMonth;

/// One category's ledger for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMonthlyStatus {
    /// The category this row is for
    pub category_id: CategoryId,

    /// The month
    pub year_month: YearMonth,

    /// Amount assigned to this category this month
    pub assigned_amount: Money,

    /// Amount spent from this category this month
    pub spent_amount: Money,

    /// What remains (negative means overspent)
    pub available_amount: Money,

    /// Whether unspent money rolls into next month
    #[serde(default)]
    pub is_carry_over_enabled: bool,
}

impl CategoryMonthlyStatus {
    /// The all-zero row used when the ledger has nothing for a category
    pub fn zero(category_id: CategoryId, year_month: YearMonth, currency: Currency) -> Self {
        Self {
            category_id,
            year_month,
            assigned_amount: Money::zero(currency),
            spent_amount: Money::zero(currency),
            available_amount: Money::zero(currency),
            is_carry_over_enabled: false,
        }
    }

    /// Build a row from ledger figures, deriving the available amount
    ///
    /// `carried_in` is ignored when carry-over is disabled.
    pub fn from_ledger(
        category_id: CategoryId,
        year_month: YearMonth,
        carried_in: Money,
        assigned_amount: Money,
        spent_amount: Money,
        is_carry_over_enabled: bool,
    ) -> Self {
        let carry = if is_carry_over_enabled {
            carried_in
        } else {
            Money::zero(assigned_amount.currency())
        };

        Self {
            category_id,
            year_month,
            assigned_amount,
            spent_amount,
            available_amount: carry + assigned_amount - spent_amount,
            is_carry_over_enabled,
        }
    }

    /// Check if this category is overspent (available is negative)
    pub fn is_overspent(&self) -> bool {
        self.available_amount.is_negative()
    }

    /// The amount that rolls into the next month
    pub fn carry_over_amount(&self) -> Money {
        if self.is_carry_over_enabled {
            self.available_amount
        } else {
            Money::zero(self.available_amount.currency())
        }
    }

    /// Currency of the row (taken from the assigned amount)
    pub fn currency(&self) -> Currency {
        self.assigned_amount.currency()
    }
}

impl fmt::Display for CategoryMonthlyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Assigned: {} | Spent: {} | Available: {}",
            self.year_month, self.assigned_amount, self.spent_amount, self.available_amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oct() -> YearMonth {
        YearMonth::new(2026, 10).unwrap()
    }

    #[test]
    fn test_zero_status() {
        let status = CategoryMonthlyStatus::zero(CategoryId::new(), oct(), Currency::Eur);
        assert!(status.assigned_amount.is_zero());
        assert!(status.available_amount.is_zero());
        assert_eq!(status.currency(), Currency::Eur);
        assert!(!status.is_overspent());
    }

    #[test]
    fn test_from_ledger_with_carry_over() {
        let status = CategoryMonthlyStatus::from_ledger(
            CategoryId::new(),
            oct(),
            Money::from_cents(10000),
            Money::from_cents(50000),
            Money::from_cents(30000),
            true,
        );
        // 100 + 500 - 300
        assert_eq!(status.available_amount.cents(), 30000);
        assert_eq!(status.carry_over_amount().cents(), 30000);
    }

    #[test]
    fn test_from_ledger_without_carry_over_ignores_carry_in() {
        let status = CategoryMonthlyStatus::from_ledger(
            CategoryId::new(),
            oct(),
            Money::from_cents(10000),
            Money::from_cents(50000),
            Money::from_cents(60000),
            false,
        );
        assert_eq!(status.available_amount.cents(), -10000);
        assert!(status.is_overspent());
        assert!(status.carry_over_amount().is_zero());
    }

    #[test]
    fn test_serialization() {
        let status = CategoryMonthlyStatus::zero(CategoryId::new(), oct(), Currency::Usd);
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"year_month\":\"2026-10\""));
        let deserialized: CategoryMonthlyStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, deserialized);
    }
}
