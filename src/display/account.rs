//! Account display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::Account;

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Account")]
    name: String,
    #[tabled(rename = "Type")]
    account_type: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Budget")]
    budget: &'static str,
}

/// Table of accounts showing which ones count toward ready-to-assign
pub fn format_account_table(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let mut sorted: Vec<&Account> = accounts.iter().collect();
    sorted.sort_by(|a, b| {
        a.list_position
            .cmp(&b.list_position)
            .then_with(|| a.name.cmp(&b.name))
    });

    let rows = sorted.into_iter().map(|account| AccountRow {
        name: account.name.clone(),
        account_type: account.account_type.to_string(),
        balance: account.balance.to_string(),
        budget: if account.is_budget_eligible() {
            "yes"
        } else {
            "no"
        },
    });

    Table::new(rows).with(Style::psql()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Money};

    #[test]
    fn test_empty() {
        assert_eq!(format_account_table(&[]), "No accounts found.");
    }

    #[test]
    fn test_table_marks_eligibility() {
        let accounts = vec![
            Account::with_balance("House", AccountType::Mortgage, Money::from_cents(-15000000)),
            Account::with_balance("Wallet", AccountType::Cash, Money::from_cents(3200)),
        ];
        let table = format_account_table(&accounts);

        let house = table.lines().find(|l| l.contains("House")).unwrap();
        assert!(house.contains("-$150000.00"));
        assert!(house.contains("no"));

        let wallet = table.lines().find(|l| l.contains("Wallet")).unwrap();
        assert!(wallet.contains("yes"));
        assert!(table.lines().next().unwrap().contains("Budget"));
    }
}
