//! Category and CategoryGroup models
//!
//! Categories are organized into groups for display. Each category carries
//! its goal configuration; the monthly ledger numbers live in
//! [`CategoryMonthlyStatus`](super::status::CategoryMonthlyStatus).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::Currency;
use super::ids::{CategoryGroupId, CategoryId};
use super::money::Money;

/// A group of related categories (e.g., "Bills", "Needs", "Wants")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Unique identifier
    pub id: CategoryGroupId,

    /// Group name
    pub name: String,

    /// Sort order for display
    #[serde(default)]
    pub list_position: i32,
}

impl CategoryGroup {
    /// Create a new category group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryGroupId::new(),
            name: name.into(),
            list_position: 0,
        }
    }

    /// Create a new group with a specific list position
    pub fn with_list_position(name: impl Into<String>, list_position: i32) -> Self {
        let mut group = Self::new(name);
        group.list_position = list_position;
        group
    }

    /// Validate the group
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// What kind of goal a category has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetType {
    /// No goal
    #[default]
    None,
    /// A fixed amount needed every month
    NeededForSpending,
    /// A balance to reach by a target date
    SavingsBalance,
}

impl TargetType {
    /// Parse a target type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(Self::None),
            "spending" | "needed_for_spending" => Some(Self::NeededForSpending),
            "savings" | "savings_balance" => Some(Self::SavingsBalance),
            _ => None,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "No goal"),
            Self::NeededForSpending => write!(f, "Needed for spending"),
            Self::SavingsBalance => write!(f, "Savings balance"),
        }
    }
}

/// A budget category within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// The group this category belongs to
    pub group_id: CategoryGroupId,

    /// Category name
    pub name: String,

    /// Emoji shown next to the name
    #[serde(default)]
    pub emoji: String,

    /// Desired funding level used for progress rendering
    #[serde(default)]
    pub budget_target: Option<Money>,

    /// Goal kind
    #[serde(default)]
    pub target_type: TargetType,

    /// Goal amount (monthly need or savings balance)
    #[serde(default)]
    pub target_amount: Option<Money>,

    /// Date a savings balance should be reached by
    #[serde(default)]
    pub target_date: Option<NaiveDate>,

    /// Sort order within the group
    #[serde(default)]
    pub list_position: i32,
}

impl Category {
    /// Create a new category without a goal
    pub fn new(name: impl Into<String>, group_id: CategoryGroupId) -> Self {
        Self {
            id: CategoryId::new(),
            group_id,
            name: name.into(),
            emoji: String::new(),
            budget_target: None,
            target_type: TargetType::None,
            target_amount: None,
            target_date: None,
            list_position: 0,
        }
    }

    /// Create a new category with a specific list position
    pub fn with_list_position(
        name: impl Into<String>,
        group_id: CategoryGroupId,
        list_position: i32,
    ) -> Self {
        let mut category = Self::new(name, group_id);
        category.list_position = list_position;
        category
    }

    /// Require a fixed amount every month
    pub fn set_spending_target(&mut self, amount: Money) {
        self.target_type = TargetType::NeededForSpending;
        self.target_amount = Some(amount);
        self.target_date = None;
        self.budget_target = Some(amount);
    }

    /// Save toward a balance by a date
    pub fn set_savings_goal(&mut self, amount: Money, date: NaiveDate) {
        self.target_type = TargetType::SavingsBalance;
        self.target_amount = Some(amount);
        self.target_date = Some(date);
        self.budget_target = Some(amount);
    }

    /// Remove the goal
    pub fn clear_target(&mut self) {
        self.target_type = TargetType::None;
        self.target_amount = None;
        self.target_date = None;
        self.budget_target = None;
    }

    /// The budget target, or zero when none is set
    pub fn budget_target_or_zero(&self, currency: Currency) -> Money {
        self.budget_target.unwrap_or(Money::zero(currency))
    }

    /// Display label with the emoji prefix when present
    pub fn label(&self) -> String {
        if self.emoji.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.emoji, self.name)
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)?;

        let negative = |m: Option<Money>| m.is_some_and(|m| m.is_negative());
        if negative(self.budget_target) || negative(self.target_amount) {
            return Err(CategoryValidationError::NegativeTarget);
        }

        match self.target_type {
            TargetType::None => {}
            TargetType::NeededForSpending => {
                if self.target_amount.is_none() {
                    return Err(CategoryValidationError::MissingTargetAmount);
                }
            }
            TargetType::SavingsBalance => {
                if self.target_amount.is_none() || self.target_date.is_none() {
                    return Err(CategoryValidationError::IncompleteSavingsGoal);
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
    if name.trim().is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }

    if name.len() > 50 {
        return Err(CategoryValidationError::NameTooLong(name.len()));
    }

    Ok(())
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeTarget,
    MissingTargetAmount,
    IncompleteSavingsGoal,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::NegativeTarget => write!(f, "Target amount cannot be negative"),
            Self::MissingTargetAmount => write!(f, "Spending target needs an amount"),
            Self::IncompleteSavingsGoal => {
                write!(f, "Savings goal needs both an amount and a target date")
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_new_category() {
        let group = CategoryGroup::new("Bills");
        let category = Category::new("Rent", group.id);

        assert_eq!(category.name, "Rent");
        assert_eq!(category.group_id, group.id);
        assert_eq!(category.target_type, TargetType::None);
        assert!(category.target_amount.is_none());
        assert!(category.budget_target_or_zero(Currency::Usd).is_zero());
    }

    #[test]
    fn test_goal_setters() {
        let group = CategoryGroup::new("Savings");
        let mut category = Category::new("Vacation", group.id);

        category.set_savings_goal(Money::from_cents(60000), date(2026, 11, 1));
        assert_eq!(category.target_type, TargetType::SavingsBalance);
        assert_eq!(category.target_date, Some(date(2026, 11, 1)));
        assert_eq!(category.budget_target, Some(Money::from_cents(60000)));

        category.set_spending_target(Money::from_cents(30000));
        assert_eq!(category.target_type, TargetType::NeededForSpending);
        assert!(category.target_date.is_none());

        category.clear_target();
        assert_eq!(category.target_type, TargetType::None);
        assert!(category.budget_target.is_none());
    }

    #[test]
    fn test_label() {
        let group = CategoryGroup::new("Needs");
        let mut category = Category::new("Groceries", group.id);
        assert_eq!(category.label(), "Groceries");

        category.emoji = "🛒".into();
        assert_eq!(category.label(), "🛒 Groceries");
    }

    #[test]
    fn test_group_validation() {
        let mut group = CategoryGroup::new("Valid");
        assert!(group.validate().is_ok());

        group.name = String::new();
        assert_eq!(group.validate(), Err(CategoryValidationError::EmptyName));

        group.name = "a".repeat(51);
        assert!(matches!(
            group.validate(),
            Err(CategoryValidationError::NameTooLong(_))
        ));
    }

    #[test]
    fn test_category_validation() {
        let group = CategoryGroup::new("Test");
        let mut category = Category::new("Valid", group.id);
        assert!(category.validate().is_ok());

        category.target_type = TargetType::SavingsBalance;
        category.target_amount = Some(Money::from_cents(1000));
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::IncompleteSavingsGoal)
        );

        category.target_type = TargetType::NeededForSpending;
        category.target_amount = None;
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::MissingTargetAmount)
        );

        category.target_amount = Some(Money::from_cents(-100));
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::NegativeTarget)
        );
    }

    #[test]
    fn test_target_type_serialization() {
        let json = serde_json::to_string(&TargetType::NeededForSpending).unwrap();
        assert_eq!(json, "\"NEEDED_FOR_SPENDING\"");
        assert_eq!(TargetType::parse("savings"), Some(TargetType::SavingsBalance));
        assert_eq!(TargetType::parse("weekly"), None);
    }

    #[test]
    fn test_serialization() {
        let group = CategoryGroup::new("Test Group");
        let mut category = Category::new("Test Category", group.id);
        category.set_savings_goal(Money::from_cents(50000), date(2027, 1, 1));

        let json = serde_json::to_string(&category).unwrap();
        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(category, deserialized);
    }
}
