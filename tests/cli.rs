use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use envelope_engine::models::{
    Account, AccountType, Category, CategoryGroup, CategoryMonthlyStatus, Currency, Money,
    YearMonth,
};
use envelope_engine::storage::{save_snapshot, BudgetSnapshot};

const BIN_NAME: &str = "envelope-engine";

/// A command isolated from the user's real configuration
fn command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("ENVELOPE_ENGINE_DIR", home.path());
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("ENVELOPE_ENGINE_TODAY");
    cmd
}

fn write_snapshot(dir: &Path) -> PathBuf {
    let month = YearMonth::new(2026, 10).unwrap();
    let group = CategoryGroup::new("Needs");
    let mut groceries = Category::new("Groceries", group.id);
    groceries.set_spending_target(Money::from_cents(30000));
    let status = CategoryMonthlyStatus::zero(groceries.id, month, Currency::Usd);

    let snapshot = BudgetSnapshot {
        currency: Currency::Usd,
        accounts: vec![
            Account::with_balance("Checking", AccountType::Checking, Money::from_cents(10000)),
            Account::with_balance("Wallet", AccountType::Cash, Money::from_cents(3200)),
            Account::with_balance("Savings", AccountType::Savings, Money::from_cents(203482)),
            Account::with_balance("House", AccountType::Mortgage, Money::from_cents(-15000000)),
        ],
        groups: vec![group],
        categories: vec![groceries],
        statuses: vec![status],
    };

    let path = dir.join("budget.json");
    save_snapshot(&path, &snapshot).unwrap();
    path
}

#[test]
fn cli_progress_all_spent() {
    let home = TempDir::new().unwrap();
    command(&home)
        .args(["progress", "--assigned", "100", "--available", "0"])
        .assert()
        .success()
        .stdout(contains("All money spent"));
}

#[test]
fn cli_progress_unassigned_overspent() {
    let home = TempDir::new().unwrap();
    command(&home)
        .args(["progress", "--assigned", "0", "--available=-20"])
        .assert()
        .success()
        .stdout(contains("Overspent by $20.00").and(contains("!!!!")));
}

#[test]
fn cli_progress_json() {
    let home = TempDir::new().unwrap();
    command(&home)
        .args(["progress", "--target", "300", "--assigned", "300", "--available", "300", "--json"])
        .assert()
        .success()
        .stdout(contains("\"hint\": \"FullyFunded\""));
}

#[test]
fn cli_contribution_savings_goal() {
    let home = TempDir::new().unwrap();
    command(&home)
        .args([
            "contribution",
            "--kind",
            "savings",
            "--amount",
            "600",
            "--date",
            "2026-11-01",
            "--available",
            "200",
            "--today",
            "2026-10-18",
        ])
        .assert()
        .success()
        .stdout(contains("Contribution this month: $200.00"));
}

#[test]
fn cli_contribution_without_goal() {
    let home = TempDir::new().unwrap();
    command(&home)
        .args(["contribution", "--kind", "none"])
        .assert()
        .success()
        .stdout(contains("No goal"));
}

#[test]
fn cli_contribution_missing_amount_fails() {
    let home = TempDir::new().unwrap();
    command(&home)
        .args(["contribution", "--kind", "spending"])
        .assert()
        .failure()
        .stderr(contains("--amount is required"));
}

#[test]
fn cli_ready_excludes_mortgage() {
    let home = TempDir::new().unwrap();
    let snapshot = write_snapshot(home.path());
    command(&home)
        .arg("ready")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(contains("Ready to Assign (2026-10): $2166.82").and(contains("House")));
}

#[test]
fn cli_ready_json() {
    let home = TempDir::new().unwrap();
    let snapshot = write_snapshot(home.path());
    command(&home)
        .arg("ready")
        .arg(&snapshot)
        .arg("--json")
        .assert()
        .success()
        .stdout(contains("\"cents\": 216682").and(contains("\"month\": \"2026-10\"")));
}

#[test]
fn cli_overview_terminal_and_csv() {
    let home = TempDir::new().unwrap();
    let snapshot = write_snapshot(home.path());

    command(&home)
        .arg("overview")
        .arg(&snapshot)
        .args(["--today", "2026-10-18"])
        .assert()
        .success()
        .stdout(contains("Budget Overview - 2026-10").and(contains("Groceries")));

    command(&home)
        .arg("overview")
        .arg(&snapshot)
        .args(["--today", "2026-10-18", "--csv"])
        .assert()
        .success()
        .stdout(contains("Month,Group,Category").and(contains("2026-10,Needs,Groceries")));
}

#[test]
fn cli_overview_rejects_unknown_format() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("budget.toml");
    std::fs::write(&path, "").unwrap();

    command(&home)
        .arg("overview")
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("Unsupported snapshot format"));
}

#[test]
fn cli_invalid_month_fails() {
    let home = TempDir::new().unwrap();
    let snapshot = write_snapshot(home.path());
    command(&home)
        .arg("ready")
        .arg(&snapshot)
        .args(["--month", "2026-13"])
        .assert()
        .failure();
}

#[test]
fn cli_config_uses_env_dir() {
    let home = TempDir::new().unwrap();
    command(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(contains(home.path().to_string_lossy().to_string()).and(contains("USD")));
}
