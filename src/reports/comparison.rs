use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance_sheet::{AccountBalanceItem, BalanceSheet};
use crate::ledger::{
    money::{is_negligible, percentage_change},
    AccountType,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TotalChange {
    pub current: Decimal,
    pub previous: Decimal,
    pub change: Decimal,
    pub percentage_change: Decimal,
}

impl TotalChange {
    pub fn between(current: Decimal, previous: Decimal) -> Self {
        Self {
            current,
            previous,
            change: current - previous,
            percentage_change: percentage_change(current, previous),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountChange {
    pub account_code: String,
    pub account_name: String,
    pub account_type: AccountType,
    pub current_balance: Decimal,
    pub previous_balance: Decimal,
    pub change: Decimal,
    pub percentage_change: Decimal,
    pub is_new: bool,
    pub is_removed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonResult {
    pub current_date: NaiveDate,
    pub previous_date: NaiveDate,
    pub assets: TotalChange,
    pub liabilities: TotalChange,
    pub equity: TotalChange,
    /// Largest movements first.
    pub account_changes: Vec<AccountChange>,
}

/// Period-over-period movement between two balance sheets.
pub fn compare_balance_sheets(current: &BalanceSheet, previous: &BalanceSheet) -> ComparisonResult {
    let previous_items: BTreeMap<&str, &AccountBalanceItem> = previous
        .items()
        .map(|item| (item.account_code.as_str(), item))
        .collect();
    let current_items: BTreeMap<&str, &AccountBalanceItem> = current
        .items()
        .map(|item| (item.account_code.as_str(), item))
        .collect();

    let mut account_changes = Vec::new();

    for (code, item) in &current_items {
        let previous_balance = previous_items
            .get(code)
            .map(|prior| prior.balance)
            .unwrap_or(Decimal::ZERO);
        let change = item.balance - previous_balance;
        if is_negligible(change) {
            continue;
        }
        account_changes.push(AccountChange {
            account_code: item.account_code.clone(),
            account_name: item.account_name.clone(),
            account_type: item.account_type,
            current_balance: item.balance,
            previous_balance,
            change,
            percentage_change: percentage_change(item.balance, previous_balance),
            is_new: !previous_items.contains_key(code),
            is_removed: false,
        });
    }

    for (code, item) in &previous_items {
        if current_items.contains_key(code) || is_negligible(item.balance) {
            continue;
        }
        account_changes.push(AccountChange {
            account_code: item.account_code.clone(),
            account_name: item.account_name.clone(),
            account_type: item.account_type,
            current_balance: Decimal::ZERO,
            previous_balance: item.balance,
            change: -item.balance,
            percentage_change: percentage_change(Decimal::ZERO, item.balance),
            is_new: false,
            is_removed: true,
        });
    }

    account_changes.sort_by(|a, b| {
        b.change
            .abs()
            .cmp(&a.change.abs())
            .then_with(|| a.account_code.cmp(&b.account_code))
    });

    ComparisonResult {
        current_date: current.as_of_date,
        previous_date: previous.as_of_date,
        assets: TotalChange::between(current.total_assets, previous.total_assets),
        liabilities: TotalChange::between(current.total_liabilities, previous.total_liabilities),
        equity: TotalChange::between(current.total_equity, previous.total_equity),
        account_changes,
    }
}
