//! CLI command handlers
//!
//! Bridges clap argument parsing with the calculators and reports. Handlers
//! print to stdout; diagnostics go through tracing to stderr.

pub mod calculate;
pub mod overview;

pub use calculate::{
    handle_contribution_command, handle_progress_command, ContributionArgs, ProgressArgs,
};
pub use overview::{handle_overview_command, handle_ready_command, OverviewArgs, ReadyArgs};

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::{Currency, Money, YearMonth};

/// Parse a user-supplied amount such as "12.50" or "-$3"
pub fn parse_amount(s: &str, currency: Currency) -> EnvelopeResult<Money> {
    Ok(Money::parse(s, currency)?)
}

/// Parse a "YYYY-MM" month
pub fn parse_month(s: &str) -> EnvelopeResult<YearMonth> {
    Ok(YearMonth::parse(s)?)
}

/// Parse a date in the configured format, falling back to ISO
pub fn parse_date(s: &str, settings: &Settings) -> EnvelopeResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), &settings.date_format)
        .or_else(|_| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d"))
        .map_err(|_| EnvelopeError::Validation(format!("Invalid date: '{}'", s)))
}

/// The `--today` override or the local calendar date
pub fn resolve_today(today: Option<&str>, settings: &Settings) -> EnvelopeResult<NaiveDate> {
    match today {
        Some(s) => parse_date(s, settings),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
