//! Budget Overview Report
//!
//! One month of a budget at a glance: every category with its ledger
//! figures, progress and goal contribution, grouped and totalled, plus the
//! ready-to-assign figure.

use chrono::NaiveDate;
use std::io::Write;
use tracing::debug;

use crate::display::progress::{format_bar, format_ready_banner};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::{
    Category, CategoryGroupId, CategoryId, Currency, Money, TargetType, YearMonth,
};
use crate::services::{
    progress, ready_to_assign, target_contribution, Progress, ReadyToAssign, TargetContribution,
};
use crate::storage::BudgetSnapshot;

/// A row in the report for a single category
#[derive(Debug, Clone)]
pub struct CategoryReportRow {
    pub category_id: CategoryId,
    /// Display label (emoji and name)
    pub category_name: String,
    pub group_id: CategoryGroupId,
    pub target_type: TargetType,
    pub assigned: Money,
    pub spent: Money,
    pub available: Money,
    pub progress: Progress,
    /// Amount this month's goal calls for
    pub contribution: TargetContribution,
    /// Part of the contribution not yet covered
    pub still_needed: Money,
}

impl CategoryReportRow {
    pub fn is_overspent(&self) -> bool {
        self.available.is_negative()
    }
}

/// What is still missing for this month's goal
///
/// Spending targets are a flat monthly need, so money assigned this month
/// counts against them. Savings contributions are already computed from the
/// available balance and are taken as is.
fn still_needed(category: &Category, contribution: TargetContribution, assigned: Money) -> Money {
    let zero = Money::zero(assigned.currency());
    match (category.target_type, contribution) {
        (TargetType::NeededForSpending, Some(amount)) => (amount - assigned).max(zero),
        (TargetType::SavingsBalance, Some(amount)) => amount.max(zero),
        _ => zero,
    }
}

fn ensure_currency(expected: Currency, amounts: &[Money]) -> EnvelopeResult<()> {
    match amounts.iter().find(|m| m.currency() != expected) {
        Some(found) => Err(EnvelopeError::CurrencyMismatch {
            expected,
            found: found.currency(),
        }),
        None => Ok(()),
    }
}

/// A category group with its categories and totals
#[derive(Debug, Clone)]
pub struct GroupReportRow {
    pub group_id: CategoryGroupId,
    pub group_name: String,
    pub categories: Vec<CategoryReportRow>,
    pub total_assigned: Money,
    pub total_spent: Money,
    pub total_available: Money,
    pub total_needed: Money,
}

impl GroupReportRow {
    pub fn new(group_id: CategoryGroupId, group_name: String, currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            group_id,
            group_name,
            categories: Vec::new(),
            total_assigned: zero,
            total_spent: zero,
            total_available: zero,
            total_needed: zero,
        }
    }

    /// Add a category, failing if its amounts are in another currency
    pub fn add_category(&mut self, category: CategoryReportRow) -> EnvelopeResult<()> {
        self.total_assigned = self.total_assigned.checked_add(category.assigned)?;
        self.total_spent = self.total_spent.checked_add(category.spent)?;
        self.total_available = self.total_available.checked_add(category.available)?;
        self.total_needed = self.total_needed.checked_add(category.still_needed)?;
        self.categories.push(category);
        Ok(())
    }

    pub fn has_overspent(&self) -> bool {
        self.categories.iter().any(|c| c.is_overspent())
    }
}

/// Budget Overview Report
#[derive(Debug, Clone)]
pub struct BudgetOverviewReport {
    pub month: YearMonth,
    pub currency: Currency,
    pub groups: Vec<GroupReportRow>,
    pub grand_total_assigned: Money,
    pub grand_total_spent: Money,
    pub grand_total_available: Money,
    pub grand_total_needed: Money,
    pub ready_to_assign: ReadyToAssign,
    /// Category names used when describing an overspent category
    categories: Vec<Category>,
}

impl BudgetOverviewReport {
    /// Generate the report for `month`
    ///
    /// Categories without a ledger row for the month are shown with zero
    /// amounts.
    pub fn generate(
        snapshot: &BudgetSnapshot,
        month: YearMonth,
        today: NaiveDate,
    ) -> EnvelopeResult<Self> {
        let currency = snapshot.currency;
        let zero = Money::zero(currency);

        let mut groups: Vec<_> = snapshot.groups.iter().collect();
        groups.sort_by(|a, b| {
            a.list_position
                .cmp(&b.list_position)
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut report_groups = Vec::with_capacity(groups.len());
        let mut grand_total_assigned = zero;
        let mut grand_total_spent = zero;
        let mut grand_total_available = zero;
        let mut grand_total_needed = zero;

        for group in groups {
            let mut group_row = GroupReportRow::new(group.id, group.name.clone(), currency);

            let mut categories: Vec<_> = snapshot
                .categories
                .iter()
                .filter(|c| c.group_id == group.id)
                .collect();
            categories.sort_by_key(|c| c.list_position);

            for category in categories {
                let status = snapshot.status_for(category.id, month);
                let target = category.budget_target_or_zero(currency);
                ensure_currency(
                    currency,
                    &[
                        target,
                        category.target_amount.unwrap_or(zero),
                        status.assigned_amount,
                        status.spent_amount,
                        status.available_amount,
                    ],
                )?;
                let contribution =
                    target_contribution(category, status.available_amount, today);

                group_row.add_category(CategoryReportRow {
                    category_id: category.id,
                    category_name: category.label(),
                    group_id: group.id,
                    target_type: category.target_type,
                    assigned: status.assigned_amount,
                    spent: status.spent_amount,
                    available: status.available_amount,
                    progress: progress(target, status.assigned_amount, status.available_amount),
                    contribution,
                    still_needed: still_needed(category, contribution, status.assigned_amount),
                })?;
            }

            grand_total_assigned = grand_total_assigned.checked_add(group_row.total_assigned)?;
            grand_total_spent = grand_total_spent.checked_add(group_row.total_spent)?;
            grand_total_available = grand_total_available.checked_add(group_row.total_available)?;
            grand_total_needed = grand_total_needed.checked_add(group_row.total_needed)?;

            report_groups.push(group_row);
        }

        let ready_to_assign =
            ready_to_assign(currency, month, &snapshot.accounts, &snapshot.statuses);

        debug!(
            %month,
            groups = report_groups.len(),
            assigned = %grand_total_assigned,
            ready = %ready_to_assign.amount,
            "Built budget overview"
        );

        Ok(Self {
            month,
            currency,
            groups: report_groups,
            grand_total_assigned,
            grand_total_spent,
            grand_total_available,
            grand_total_needed,
            ready_to_assign,
            categories: snapshot.categories.clone(),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, bar_width: usize) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget Overview - {}\n", self.month));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format_ready_banner(&self.ready_to_assign, &self.categories));
        output.push_str("\n\n");

        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12} {:>12}\n",
            "Category", "Assigned", "Spent", "Available", "Needed"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for group in &self.groups {
            output.push_str(&format!("\n{}\n", group.group_name.to_uppercase()));

            for category in &group.categories {
                let available_display = if category.is_overspent() {
                    format!("{} *", category.available)
                } else {
                    category.available.to_string()
                };

                output.push_str(&format!(
                    "  {:<22} {:>12} {:>12} {:>12} {:>12}\n",
                    category.category_name,
                    category.assigned,
                    category.spent,
                    available_display,
                    category.still_needed
                ));

                let bar_line = format!(
                    "  {:<22} {} {}",
                    "",
                    format_bar(&category.progress, bar_width),
                    category.progress.hint
                );
                output.push_str(bar_line.trim_end());
                output.push('\n');
            }

            output.push_str(&format!(
                "  {:<22} {:>12} {:>12} {:>12} {:>12}\n",
                "Group Total:",
                group.total_assigned,
                group.total_spent,
                group.total_available,
                group.total_needed
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12} {:>12}\n",
            "GRAND TOTAL",
            self.grand_total_assigned,
            self.grand_total_spent,
            self.grand_total_available,
            self.grand_total_needed
        ));

        if self.groups.iter().any(GroupReportRow::has_overspent) {
            output.push_str("\n* = Overspent\n");
        }

        output
    }

    /// Export the report rows to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> EnvelopeResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record([
            "Month",
            "Group",
            "Category",
            "Assigned",
            "Spent",
            "Available",
            "Contribution",
            "Needed",
            "Hint",
        ])?;

        for group in &self.groups {
            for category in &group.categories {
                let contribution = category
                    .contribution
                    .map(|c| c.format_plain())
                    .unwrap_or_default();

                csv.write_record([
                    self.month.to_string(),
                    group.group_name.clone(),
                    category.category_name.clone(),
                    category.assigned.format_plain(),
                    category.spent.format_plain(),
                    category.available.format_plain(),
                    contribution,
                    category.still_needed.format_plain(),
                    category.progress.hint.to_string(),
                ])?;
            }
        }

        csv.flush()?;
        Ok(())
    }
}
