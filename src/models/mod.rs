//! Core data models for the budget engine
//!
//! Value snapshots handed to the engine by the account and category-ledger
//! stores: accounts, categories with their goals, monthly ledger rows, and
//! the money and month primitives they are built from.

pub mod account;
pub mod category;
pub mod currency;
pub mod ids;
pub mod money;
pub mod month;
pub mod status;

pub use account::{Account, AccountType};
pub use category::{Category, CategoryGroup, TargetType};
pub use currency::Currency;
pub use ids::{AccountId, CategoryGroupId, CategoryId};
pub use money::Money;
pub use month::YearMonth;
pub use status::CategoryMonthlyStatus;
