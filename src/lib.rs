//! Envelope Engine - zero-based budget allocation and progress
//!
//! The core of a zero-based budget: every unit of money is either ready to
//! assign or assigned to exactly one category. This crate computes
//!
//! - which accounts count toward the budget,
//! - how much a goal needs this month,
//! - the two-bar progress of each category with a hint for the user,
//! - the global ready-to-assign figure, recomputed as inputs change.
//!
//! # Architecture
//!
//! - `models`: money, accounts, categories, monthly ledger rows
//! - `services`: the calculators and the ready-to-assign aggregator
//! - `reports`: month overview built from a snapshot
//! - `storage`: JSON/YAML snapshot loading
//! - `display`: terminal formatting
//! - `cli`: command handlers for the binary
//! - `config`, `logging`, `error`: ambient plumbing
//!
//! # Example
//!
//! ```rust
//! use envelope_engine::models::Money;
//! use envelope_engine::services::{progress, UserHint};
//!
//! let p = progress(Money::from_cents(0), Money::from_cents(10000), Money::from_cents(0));
//! assert_eq!(p.hint, UserHint::AllSpent);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{EnvelopeError, EnvelopeResult};
