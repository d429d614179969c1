//! One-off calculator commands
//!
//! Run the progress and contribution calculators on amounts given on the
//! command line, without a snapshot.

use clap::{Args, ValueEnum};

use super::{parse_amount, parse_date, resolve_today};
use crate::config::Settings;
use crate::display::format_progress_line;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::{Category, CategoryGroupId};
use crate::services::{progress, target_contribution};

/// Arguments for `progress`
#[derive(Args, Debug)]
pub struct ProgressArgs {
    /// Budget target (0 for none)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub target: String,

    /// Amount assigned this month
    #[arg(long, allow_hyphen_values = true)]
    pub assigned: String,

    /// Amount still available (negative when overspent)
    #[arg(long, allow_hyphen_values = true)]
    pub available: String,

    /// Print the progress value as JSON
    #[arg(long)]
    pub json: bool,
}

/// Goal kinds accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalKind {
    None,
    Spending,
    Savings,
}

/// Arguments for `contribution`
#[derive(Args, Debug)]
pub struct ContributionArgs {
    /// Goal kind
    #[arg(long, value_enum)]
    pub kind: GoalKind,

    /// Goal amount
    #[arg(long)]
    pub amount: Option<String>,

    /// Date a savings goal is due
    #[arg(long)]
    pub date: Option<String>,

    /// Amount currently available in the category
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub available: String,

    /// Date used for goal math (defaults to the local date)
    #[arg(long, env = "ENVELOPE_ENGINE_TODAY")]
    pub today: Option<String>,
}

/// Handle `progress`
pub fn handle_progress_command(settings: &Settings, args: ProgressArgs) -> EnvelopeResult<()> {
    let currency = settings.currency;
    let target = parse_amount(&args.target, currency)?;
    let assigned = parse_amount(&args.assigned, currency)?;
    let available = parse_amount(&args.available, currency)?;

    let result = progress(target, assigned, available);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", format_progress_line("Progress", &result, settings.bar_width));
    }

    Ok(())
}

/// Handle `contribution`
pub fn handle_contribution_command(
    settings: &Settings,
    args: ContributionArgs,
) -> EnvelopeResult<()> {
    let currency = settings.currency;
    let today = resolve_today(args.today.as_deref(), settings)?;
    let available = parse_amount(&args.available, currency)?;

    let mut category = Category::new("Goal", CategoryGroupId::new());
    match args.kind {
        GoalKind::None => {}
        GoalKind::Spending => {
            let amount = required(args.amount.as_deref(), "--amount")?;
            category.set_spending_target(parse_amount(amount, currency)?);
        }
        GoalKind::Savings => {
            let amount = required(args.amount.as_deref(), "--amount")?;
            let date = required(args.date.as_deref(), "--date")?;
            category.set_savings_goal(parse_amount(amount, currency)?, parse_date(date, settings)?);
        }
    }

    category
        .validate()
        .map_err(|e| EnvelopeError::Validation(e.to_string()))?;

    match target_contribution(&category, available, today) {
        Some(amount) => println!("Contribution this month: {}", amount),
        None => println!("No goal"),
    }

    Ok(())
}

fn required<'a>(value: Option<&'a str>, flag: &str) -> EnvelopeResult<&'a str> {
    value.ok_or_else(|| EnvelopeError::Validation(format!("{} is required for this goal", flag)))
}
