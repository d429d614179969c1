//! Snapshot-based CLI commands
//!
//! `overview` prints the month report for a snapshot; `ready` runs the
//! ready-to-assign aggregator over it.

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use super::{parse_month, resolve_today};
use crate::config::Settings;
use crate::display::{format_account_table, format_ready_banner};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::YearMonth;
use crate::reports::BudgetOverviewReport;
use crate::services::{AggregatorHandle, ReadyToAssignAggregator};
use crate::storage::{load_snapshot, BudgetSnapshot};

/// Arguments for `overview`
#[derive(Args, Debug)]
pub struct OverviewArgs {
    /// Snapshot file (.json, .yaml or .yml)
    pub snapshot: PathBuf,

    /// Month to show (YYYY-MM); defaults to the latest month in the snapshot
    #[arg(short, long)]
    pub month: Option<String>,

    /// Date used for goal math (defaults to the local date)
    #[arg(short, long, env = "ENVELOPE_ENGINE_TODAY")]
    pub today: Option<String>,

    /// Write CSV to stdout instead of the terminal table
    #[arg(long)]
    pub csv: bool,
}

/// Arguments for `ready`
#[derive(Args, Debug)]
pub struct ReadyArgs {
    /// Snapshot file (.json, .yaml or .yml)
    pub snapshot: PathBuf,

    /// Month to compute for (YYYY-MM); defaults to the latest month in the snapshot
    #[arg(short, long)]
    pub month: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

fn resolve_month(
    month: Option<&str>,
    snapshot: &BudgetSnapshot,
    fallback: YearMonth,
) -> EnvelopeResult<YearMonth> {
    match month {
        Some(s) => parse_month(s),
        None => Ok(snapshot.latest_month().unwrap_or(fallback)),
    }
}

/// Handle `overview`
pub fn handle_overview_command(settings: &Settings, args: OverviewArgs) -> EnvelopeResult<()> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let today = resolve_today(args.today.as_deref(), settings)?;
    let month = resolve_month(args.month.as_deref(), &snapshot, YearMonth::from_date(today))?;

    let report = BudgetOverviewReport::generate(&snapshot, month, today)?;

    if args.csv {
        report.export_csv(std::io::stdout().lock())?;
    } else {
        print!("{}", report.format_terminal(settings.bar_width));
    }

    Ok(())
}

/// Handle `ready`
pub fn handle_ready_command(args: ReadyArgs) -> EnvelopeResult<()> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let month = resolve_month(args.month.as_deref(), &snapshot, YearMonth::current())?;

    let handle = AggregatorHandle::spawn(ReadyToAssignAggregator::new(snapshot.currency, month));
    let updates = handle.subscribe()?;
    handle.push_accounts(snapshot.accounts.clone())?;
    handle.push_statuses(snapshot.statuses.clone())?;

    let ready = updates
        .recv_timeout(Duration::from_secs(5))
        .map_err(|e| EnvelopeError::Aggregator(format!("No result: {}", e)))?;
    handle.shutdown()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ready)?);
    } else {
        println!("{}", format_account_table(&snapshot.accounts));
        println!();
        println!("{}", format_ready_banner(&ready, &snapshot.categories));
    }

    Ok(())
}
