//! Budget snapshots
//!
//! A snapshot is the materialized state the engine works on: accounts,
//! category groups, categories with their goals, and monthly ledger rows.
//! Snapshots are read from JSON or YAML depending on the file extension.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use super::file_io::{read_json_required, read_yaml_required, write_json_atomic};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::{
    Account, Category, CategoryGroup, CategoryId, CategoryMonthlyStatus, Currency, YearMonth,
};

/// Everything the engine needs for one budget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub accounts: Vec<Account>,

    #[serde(default)]
    pub groups: Vec<CategoryGroup>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub statuses: Vec<CategoryMonthlyStatus>,
}

impl BudgetSnapshot {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            ..Self::default()
        }
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// The ledger row for a category, or a zero row when there is none
    pub fn status_for(&self, category_id: CategoryId, month: YearMonth) -> CategoryMonthlyStatus {
        self.statuses
            .iter()
            .find(|s| s.category_id == category_id && s.year_month == month)
            .cloned()
            .unwrap_or_else(|| CategoryMonthlyStatus::zero(category_id, month, self.currency))
    }

    /// The latest month with ledger data
    pub fn latest_month(&self) -> Option<YearMonth> {
        self.statuses.iter().map(|s| s.year_month).max()
    }

    /// Check models and references between them
    pub fn validate(&self) -> EnvelopeResult<()> {
        for account in &self.accounts {
            account.validate().map_err(|e| {
                EnvelopeError::Validation(format!("Account '{}': {}", account.name, e))
            })?;
        }

        for group in &self.groups {
            group
                .validate()
                .map_err(|e| EnvelopeError::Validation(format!("Group '{}': {}", group.name, e)))?;
        }

        let group_ids: HashSet<_> = self.groups.iter().map(|g| g.id).collect();
        for category in &self.categories {
            category.validate().map_err(|e| {
                EnvelopeError::Validation(format!("Category '{}': {}", category.name, e))
            })?;
            if !group_ids.contains(&category.group_id) {
                return Err(EnvelopeError::group_not_found(category.group_id.to_string()));
            }
        }

        let category_ids: HashSet<_> = self.categories.iter().map(|c| c.id).collect();
        let mut seen = HashSet::new();
        for status in &self.statuses {
            if !category_ids.contains(&status.category_id) {
                return Err(EnvelopeError::category_not_found(
                    status.category_id.to_string(),
                ));
            }
            if !seen.insert((status.category_id, status.year_month)) {
                return Err(EnvelopeError::Validation(format!(
                    "Duplicate status for category {} in {}",
                    status.category_id, status.year_month
                )));
            }
        }

        Ok(())
    }
}

/// On-disk format of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> EnvelopeResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(EnvelopeError::Snapshot(format!(
                "Unsupported snapshot format: {} (expected .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }
}

/// Load and validate a snapshot
pub fn load_snapshot(path: impl AsRef<Path>) -> EnvelopeResult<BudgetSnapshot> {
    let path = path.as_ref();
    let snapshot: BudgetSnapshot = match SnapshotFormat::from_path(path)? {
        SnapshotFormat::Json => read_json_required(path)?,
        SnapshotFormat::Yaml => read_yaml_required(path)?,
    };
    snapshot.validate()?;

    info!(
        path = %path.display(),
        accounts = snapshot.accounts.len(),
        categories = snapshot.categories.len(),
        statuses = snapshot.statuses.len(),
        "Loaded snapshot"
    );
    Ok(snapshot)
}

/// Write a snapshot as pretty JSON
pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &BudgetSnapshot) -> EnvelopeResult<()> {
    let path = path.as_ref();
    if SnapshotFormat::from_path(path)? != SnapshotFormat::Json {
        return Err(EnvelopeError::Snapshot(format!(
            "Snapshots can only be saved as JSON: {}",
            path.display()
        )));
    }
    write_json_atomic(path, snapshot)
}
