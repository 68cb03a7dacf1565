use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::history::ClosedPeriod;
use crate::ledger::{
    money::NEGLIGIBLE_AMOUNT, Account, AccountId, AccountType, JournalEntry, JournalLine,
};

const RETAINED_EARNINGS_LABEL: &str = "Retained Earnings";
const INCOME_SUMMARY_LABEL: &str = "Income Summary";

/// Net activity of one account within the closing range, in the account's
/// normal-balance sign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountActivity {
    pub account_id: AccountId,
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub amount: Decimal,
    #[serde(default = "AccountActivity::default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_header: bool,
}

impl AccountActivity {
    /// Uses the account's current balance as its period activity.
    pub fn from_account(account: &Account) -> Self {
        Self {
            account_id: account.id,
            code: account.code.clone(),
            name: account.name.clone(),
            account_type: account.account_type,
            amount: account.balance,
            is_active: account.is_active,
            is_header: account.is_header,
        }
    }

    fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }

    fn is_closable(&self) -> bool {
        matches!(self.account_type, AccountType::Revenue | AccountType::Expense)
            && self.is_active
            && !self.is_header
            && self.amount.abs() > NEGLIGIBLE_AMOUNT
    }

    fn default_active() -> bool {
        true
    }
}

/// Everything the backend reports about a candidate closing range.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PeriodActivity {
    #[serde(default)]
    pub accounts: Vec<AccountActivity>,
    #[serde(default)]
    pub posted_entries: u64,
    #[serde(default)]
    pub draft_entries: u64,
    #[serde(default)]
    pub unbalanced_entries: u64,
    #[serde(default)]
    pub closed_periods: Vec<ClosedPeriod>,
    #[serde(default)]
    pub retained_earnings: Option<Account>,
}

impl PeriodActivity {
    /// Activity drawn from a chart snapshot: its revenue and expense balances
    /// plus the equity account with `retained_earnings_code`. Entry counts
    /// start at zero for the caller to fill in.
    pub fn from_chart(accounts: &[Account], retained_earnings_code: &str) -> Self {
        Self {
            accounts: accounts
                .iter()
                .filter(|account| !account.account_type.is_permanent())
                .map(AccountActivity::from_account)
                .collect(),
            retained_earnings: accounts
                .iter()
                .find(|account| {
                    account.account_type == AccountType::Equity
                        && account.code == retained_earnings_code
                })
                .cloned(),
            ..Self::default()
        }
    }
}

/// Why a closing cannot proceed, or something the user should double-check.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClosingIssue {
    #[error("End date {end} must not be before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("Period from {start} to {end} is already closed")]
    AlreadyClosed { start: NaiveDate, end: NaiveDate },
    #[error("Found {count} overlapping closed periods; overlapping periods cannot be closed")]
    OverlappingClosedPeriods { count: usize },
    #[error("Retained earnings account not found; create it before closing")]
    MissingRetainedEarnings,
    #[error("No posted transactions found in this period")]
    NoTransactions,
    #[error("Found {count} draft journal entries in this period; post or delete them before closing")]
    DraftEntries { count: u64 },
    #[error("Found {count} unbalanced journal entries in this period; fix them before closing")]
    UnbalancedEntries { count: u64 },
    #[error("Period start {start} does not follow the last closing (expected {expected})")]
    DiscontinuousStart { start: NaiveDate, expected: NaiveDate },
}

impl ClosingIssue {
    pub fn is_blocking(&self) -> bool {
        !matches!(self, ClosingIssue::DiscontinuousStart { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodAccountBalance {
    pub account_id: AccountId,
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub balance: Decimal,
}

/// One line of the closing summary shown before execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClosingEntryPreview {
    pub description: String,
    pub debit_account: String,
    pub credit_account: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodClosingPreview {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Days in the range, both ends inclusive.
    pub period_days: i64,
    pub total_revenue: Decimal,
    pub total_expense: Decimal,
    pub net_income: Decimal,
    pub retained_earnings_id: Option<AccountId>,
    pub can_close: bool,
    pub validation_messages: Vec<String>,
    pub issues: Vec<ClosingIssue>,
    pub revenue_accounts: Vec<PeriodAccountBalance>,
    pub expense_accounts: Vec<PeriodAccountBalance>,
    pub closing_entries: Vec<ClosingEntryPreview>,
    pub transaction_count: u64,
    pub last_closing_date: Option<NaiveDate>,
}

impl PeriodClosingPreview {
    fn empty(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            period_days: 0,
            total_revenue: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            net_income: Decimal::ZERO,
            retained_earnings_id: None,
            can_close: true,
            validation_messages: Vec::new(),
            issues: Vec::new(),
            revenue_accounts: Vec::new(),
            expense_accounts: Vec::new(),
            closing_entries: Vec::new(),
            transaction_count: 0,
            last_closing_date: None,
        }
    }

    fn record(&mut self, issue: ClosingIssue) {
        if issue.is_blocking() {
            self.can_close = false;
        }
        self.validation_messages.push(issue.to_string());
        self.issues.push(issue);
    }

    pub fn blocking_messages(&self) -> Vec<String> {
        self.issues
            .iter()
            .filter(|issue| issue.is_blocking())
            .map(ToString::to_string)
            .collect()
    }

    /// The journal entry that zeroes every closed account into retained
    /// earnings. `None` without a retained earnings account or anything to close.
    pub fn closing_journal(&self, entry_date: NaiveDate) -> Option<JournalEntry> {
        let retained_earnings = self.retained_earnings_id?;
        if self.revenue_accounts.is_empty() && self.expense_accounts.is_empty() {
            return None;
        }

        let mut entry = JournalEntry::new(
            entry_date,
            format!("Period closing {} to {}", self.start_date, self.end_date),
        );
        for account in &self.revenue_accounts {
            let description = format!("Close revenue {} - {}", account.code, account.name);
            entry.lines.push(signed_line(account.account_id.0, description, account.balance));
        }
        for account in &self.expense_accounts {
            let description = format!("Close expense {} - {}", account.code, account.name);
            entry.lines.push(signed_line(account.account_id.0, description, -account.balance));
        }
        if !self.net_income.is_zero() {
            entry.lines.push(signed_line(
                retained_earnings.0,
                "Net income to retained earnings".to_string(),
                -self.net_income,
            ));
        }
        Some(entry)
    }
}

/// Positive amounts debit the account, negative amounts credit it.
fn signed_line(account_id: u64, description: String, amount: Decimal) -> JournalLine {
    if amount >= Decimal::ZERO {
        JournalLine::debit(account_id, description, amount)
    } else {
        JournalLine::credit(account_id, description, -amount)
    }
}

fn closing_entry(
    description: String,
    account: &str,
    retained_earnings: &str,
    amount: Decimal,
    debit_account_first: bool,
) -> ClosingEntryPreview {
    let (debit, credit) = if debit_account_first == (amount >= Decimal::ZERO) {
        (account, retained_earnings)
    } else {
        (retained_earnings, account)
    };
    ClosingEntryPreview {
        description,
        debit_account: debit.to_string(),
        credit_account: credit.to_string(),
        amount: amount.abs(),
    }
}

/// Builds the read-only closing preview for `[start_date, end_date]`.
pub fn preview_period_closing(
    activity: &PeriodActivity,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> PeriodClosingPreview {
    let mut preview = PeriodClosingPreview::empty(start_date, end_date);

    if end_date < start_date {
        preview.record(ClosingIssue::InvalidDateRange {
            start: start_date,
            end: end_date,
        });
        return preview;
    }
    preview.period_days = (end_date - start_date).num_days() + 1;
    preview.transaction_count = activity.posted_entries;

    let already_closed = activity
        .closed_periods
        .iter()
        .any(|period| period.matches(start_date, end_date));
    if already_closed {
        preview.record(ClosingIssue::AlreadyClosed {
            start: start_date,
            end: end_date,
        });
    }
    let overlapping = activity
        .closed_periods
        .iter()
        .filter(|period| !period.matches(start_date, end_date))
        .filter(|period| period.overlaps(start_date, end_date))
        .count();
    if overlapping > 0 {
        preview.record(ClosingIssue::OverlappingClosedPeriods { count: overlapping });
    }

    if let Some(last) = activity.closed_periods.iter().map(|p| p.end_date).max() {
        preview.last_closing_date = Some(last);
        let expected = last + Duration::days(1);
        if !already_closed && start_date != expected {
            preview.record(ClosingIssue::DiscontinuousStart {
                start: start_date,
                expected,
            });
        }
    }

    let retained_label = match &activity.retained_earnings {
        Some(account) => {
            preview.retained_earnings_id = Some(account.id);
            account.label()
        }
        None => {
            preview.record(ClosingIssue::MissingRetainedEarnings);
            RETAINED_EARNINGS_LABEL.to_string()
        }
    };

    for account in activity.accounts.iter().filter(|a| a.is_closable()) {
        let balance = PeriodAccountBalance {
            account_id: account.account_id,
            code: account.code.clone(),
            name: account.name.clone(),
            account_type: account.account_type,
            balance: account.amount,
        };
        match account.account_type {
            AccountType::Revenue => {
                preview.total_revenue += account.amount;
                preview.closing_entries.push(closing_entry(
                    format!("Close revenue account {}", account.label()),
                    &account.label(),
                    &retained_label,
                    account.amount,
                    true,
                ));
                preview.revenue_accounts.push(balance);
            }
            _ => {
                preview.total_expense += account.amount;
                preview.closing_entries.push(closing_entry(
                    format!("Close expense account {}", account.label()),
                    &account.label(),
                    &retained_label,
                    account.amount,
                    false,
                ));
                preview.expense_accounts.push(balance);
            }
        }
    }
    preview.net_income = preview.total_revenue - preview.total_expense;

    if !preview.closing_entries.is_empty() {
        let description = if preview.net_income >= Decimal::ZERO {
            "Transfer net income to retained earnings"
        } else {
            "Transfer net loss to retained earnings"
        };
        preview.closing_entries.push(closing_entry(
            description.to_string(),
            INCOME_SUMMARY_LABEL,
            &retained_label,
            preview.net_income,
            true,
        ));
    }

    if activity.posted_entries == 0 {
        preview.record(ClosingIssue::NoTransactions);
    }
    if activity.draft_entries > 0 {
        preview.record(ClosingIssue::DraftEntries {
            count: activity.draft_entries,
        });
    }
    if activity.unbalanced_entries > 0 {
        preview.record(ClosingIssue::UnbalancedEntries {
            count: activity.unbalanced_entries,
        });
    }

    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn activity(id: u64, code: &str, account_type: AccountType, amount: Decimal) -> AccountActivity {
        AccountActivity::from_account(&Account::new(id, code, code, account_type, amount))
    }

    fn ready_activity() -> PeriodActivity {
        PeriodActivity {
            accounts: vec![
                activity(40, "4101", AccountType::Revenue, dec!(1000)),
                activity(50, "5101", AccountType::Expense, dec!(400)),
            ],
            posted_entries: 12,
            retained_earnings: Some(Account::new(
                32,
                "3201",
                "Retained Earnings",
                AccountType::Equity,
                dec!(0),
            )),
            ..PeriodActivity::default()
        }
    }

    #[test]
    fn revenue_closes_to_the_credit_of_retained_earnings() {
        let preview = preview_period_closing(&ready_activity(), date(2024, 1, 1), date(2024, 12, 31));
        assert!(preview.can_close, "{:?}", preview.validation_messages);
        assert_eq!(preview.net_income, dec!(600));
        assert_eq!(preview.period_days, 366);
        let revenue = &preview.closing_entries[0];
        assert_eq!(revenue.debit_account, "4101 - 4101");
        assert_eq!(revenue.credit_account, "3201 - Retained Earnings");
        let expense = &preview.closing_entries[1];
        assert_eq!(expense.debit_account, "3201 - Retained Earnings");
        assert_eq!(expense.credit_account, "5101 - 5101");
        let summary = preview.closing_entries.last().unwrap();
        assert_eq!(summary.credit_account, "3201 - Retained Earnings");
        assert_eq!(summary.amount, dec!(600));
    }

    #[test]
    fn negligible_and_header_accounts_are_not_closed() {
        let mut input = ready_activity();
        input.accounts.push(activity(41, "4102", AccountType::Revenue, dec!(0.01)));
        let mut header = activity(42, "4000", AccountType::Revenue, dec!(1000));
        header.is_header = true;
        input.accounts.push(header);
        let preview = preview_period_closing(&input, date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(preview.revenue_accounts.len(), 1);
        assert_eq!(preview.total_revenue, dec!(1000));
    }

    #[test]
    fn exact_match_is_reported_once() {
        let mut input = ready_activity();
        input
            .closed_periods
            .push(ClosedPeriod::new(date(2024, 1, 1), date(2024, 12, 31)));
        let preview = preview_period_closing(&input, date(2024, 1, 1), date(2024, 12, 31));
        assert!(!preview.can_close);
        assert_eq!(
            preview.issues,
            vec![ClosingIssue::AlreadyClosed {
                start: date(2024, 1, 1),
                end: date(2024, 12, 31),
            }]
        );
    }

    #[test]
    fn gap_after_last_closing_only_warns() {
        let mut input = ready_activity();
        input
            .closed_periods
            .push(ClosedPeriod::new(date(2023, 1, 1), date(2023, 12, 31)));
        let preview = preview_period_closing(&input, date(2024, 2, 1), date(2024, 12, 31));
        assert!(preview.can_close);
        assert_eq!(preview.validation_messages.len(), 1);
        assert_eq!(preview.last_closing_date, Some(date(2023, 12, 31)));
        assert!(preview.blocking_messages().is_empty());
    }

    #[test]
    fn closing_journal_balances_for_a_loss() {
        let mut input = ready_activity();
        input.accounts[1].amount = dec!(1500);
        let preview = preview_period_closing(&input, date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(preview.net_income, dec!(-500));
        let journal = preview.closing_journal(date(2024, 12, 31)).unwrap();
        let validation = journal.validate();
        assert!(validation.is_valid, "{:?}", validation.errors);
        assert_eq!(validation.total_debit, dec!(1500));
        assert_eq!(journal.lines[2].debit_amount, dec!(500));
    }
}
