//! Account model
//!
//! Accounts are owned by the account store; the engine only reads their
//! balance and type. Whether a balance counts toward money that can be
//! assigned is decided by [`AccountType::is_budget_eligible`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Cash/wallet
    Cash,
    /// Checking account
    Checking,
    /// Savings account
    Savings,
    /// Credit card
    CreditCard,
    /// Mortgage (tracked for net worth only)
    Mortgage,
    /// Loan (tracked for net worth only)
    Loan,
    /// Investment depot (tracked for net worth only)
    Depot,
    /// Anything the account store could not classify
    Unknown,
}

impl AccountType {
    /// All account types, in display order
    pub const ALL: [AccountType; 8] = [
        Self::Cash,
        Self::Checking,
        Self::Savings,
        Self::CreditCard,
        Self::Mortgage,
        Self::Loan,
        Self::Depot,
        Self::Unknown,
    ];

    /// Whether balances of this type count toward money that can be assigned
    ///
    /// Debts and investments are tracked for net worth but sit outside the
    /// spendable-cash pool. The match is exhaustive on purpose: a new account
    /// type must be classified here before it compiles.
    pub fn is_budget_eligible(&self) -> bool {
        match self {
            Self::Cash | Self::Checking | Self::Savings | Self::CreditCard => true,
            Self::Mortgage | Self::Loan | Self::Depot | Self::Unknown => false,
        }
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "credit" | "credit_card" | "creditcard" => Some(Self::CreditCard),
            "mortgage" => Some(Self::Mortgage),
            "loan" => Some(Self::Loan),
            "depot" | "investment" => Some(Self::Depot),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl Default for AccountType {
    fn default() -> Self {
        Self::Checking
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::CreditCard => write!(f, "Credit Card"),
            Self::Mortgage => write!(f, "Mortgage"),
            Self::Loan => write!(f, "Loan"),
            Self::Depot => write!(f, "Depot"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A snapshot of a financial account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g., "Chase Checking")
    pub name: String,

    /// Current balance
    pub balance: Money,

    /// Type of account
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Sort order for display
    #[serde(default)]
    pub list_position: i32,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        Self::with_balance(name, account_type, Money::default())
    }

    /// Create a new account with a balance
    pub fn with_balance(
        name: impl Into<String>,
        account_type: AccountType,
        balance: Money,
    ) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            balance,
            account_type,
            list_position: 0,
        }
    }

    /// Whether this account's balance counts toward ready-to-assign
    pub fn is_budget_eligible(&self) -> bool {
        self.account_type.is_budget_eligible()
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
