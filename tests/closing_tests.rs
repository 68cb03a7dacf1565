mod common;

use common::{closable_activity, date, InMemoryBackend};
use ledger_core::{
    closing::{preview_period_closing, ClosedPeriod, ClosingBackend, ClosingIssue},
    core::{ClosingService, ServiceError},
    errors::LedgerError,
    ledger::AccountType,
};
use rust_decimal_macros::dec;

#[test]
fn preview_totals_and_entries() {
    let preview = preview_period_closing(&closable_activity(), date(2024, 1, 1), date(2024, 12, 31));
    assert!(preview.can_close, "{:?}", preview.validation_messages);
    assert_eq!(preview.total_revenue, dec!(8000));
    assert_eq!(preview.total_expense, dec!(5700));
    assert_eq!(preview.net_income, dec!(2300));
    assert_eq!(preview.transaction_count, 42);
    assert_eq!(preview.revenue_accounts.len(), 1);
    assert_eq!(preview.expense_accounts.len(), 2);
    // one entry per closed account plus the summary transfer
    assert_eq!(preview.closing_entries.len(), 4);
    let summary = preview.closing_entries.last().unwrap();
    assert_eq!(summary.debit_account, "Income Summary");
    assert_eq!(summary.credit_account, "3201 - Retained Earnings");
    assert_eq!(summary.amount, dec!(2300));
}

#[test]
fn reversed_range_blocks_and_explains() {
    let preview = preview_period_closing(&closable_activity(), date(2024, 12, 31), date(2024, 1, 1));
    assert!(!preview.can_close);
    assert!(!preview.validation_messages.is_empty());
    assert!(matches!(preview.issues[0], ClosingIssue::InvalidDateRange { .. }));
    assert!(preview.closing_entries.is_empty());
}

#[test]
fn each_blocker_is_reported() {
    let mut activity = closable_activity();
    activity.posted_entries = 0;
    activity.draft_entries = 2;
    activity.unbalanced_entries = 1;
    activity.retained_earnings = None;
    activity
        .closed_periods
        .push(ClosedPeriod::new(date(2024, 6, 1), date(2024, 6, 30)));

    let preview = preview_period_closing(&activity, date(2024, 1, 1), date(2024, 12, 31));
    assert!(!preview.can_close);
    assert!(preview.issues.contains(&ClosingIssue::OverlappingClosedPeriods { count: 1 }));
    assert!(preview.issues.contains(&ClosingIssue::MissingRetainedEarnings));
    assert!(preview.issues.contains(&ClosingIssue::NoTransactions));
    assert!(preview.issues.contains(&ClosingIssue::DraftEntries { count: 2 }));
    assert!(preview.issues.contains(&ClosingIssue::UnbalancedEntries { count: 1 }));
    assert_eq!(preview.validation_messages.len(), preview.issues.len());
    assert!(preview.closing_journal(date(2024, 12, 31)).is_none());
}

#[test]
fn closing_journal_zeroes_temporary_accounts() {
    let preview = preview_period_closing(&closable_activity(), date(2024, 1, 1), date(2024, 12, 31));
    let journal = preview.closing_journal(date(2024, 12, 31)).unwrap();
    let validation = journal.validate();
    assert!(validation.is_valid, "{:?}", validation.messages());
    assert_eq!(validation.total_debit, dec!(8000));
    assert_eq!(journal.lines.len(), 4);
    let retained = journal.lines.last().unwrap();
    assert_eq!(retained.credit_amount, dec!(2300));
}

#[test]
fn inactive_and_negligible_accounts_stay_open() {
    let mut activity = closable_activity();
    activity.accounts[0].is_active = false;
    activity.accounts[1].amount = dec!(0.005);
    let preview = preview_period_closing(&activity, date(2024, 1, 1), date(2024, 12, 31));
    assert!(preview.revenue_accounts.is_empty());
    assert_eq!(preview.expense_accounts.len(), 1);
    assert_eq!(preview.expense_accounts[0].account_type, AccountType::Expense);
    assert_eq!(preview.net_income, dec!(-1200));
}

#[test]
fn full_cycle_through_backend() {
    let backend = InMemoryBackend::default();
    let preview = ClosingService::preview(&closable_activity(), date(2024, 1, 1), date(2024, 12, 31));
    let receipt = ClosingService::execute(&backend, &preview, "  ").unwrap();
    assert_eq!(receipt.journal_entry_number, "CLO-0001");
    let closed = backend.closed_periods().unwrap();
    assert_eq!(closed[0].description, "Period closing 2024-01-01 to 2024-12-31");
    assert!(closed[0].is_locked);

    let mut again = closable_activity();
    again.closed_periods = closed;
    let repeat = ClosingService::preview(&again, date(2024, 1, 1), date(2024, 12, 31));
    assert_eq!(
        repeat.issues,
        vec![ClosingIssue::AlreadyClosed {
            start: date(2024, 1, 1),
            end: date(2024, 12, 31),
        }]
    );

    let err = ClosingService::reopen(&backend, date(2024, 1, 1), date(2024, 12, 31), "").unwrap_err();
    assert!(matches!(err, ServiceError::Ledger(LedgerError::BlankReopenReason)));
    ClosingService::reopen(&backend, date(2024, 1, 1), date(2024, 12, 31), "Late invoice").unwrap();
    assert!(backend.closed_periods().unwrap().is_empty());
}

#[test]
fn backend_failures_surface_unchanged() {
    let backend = InMemoryBackend::failing("lock timeout");
    let preview = preview_period_closing(&closable_activity(), date(2024, 1, 1), date(2024, 12, 31));
    let err = ClosingService::execute(&backend, &preview, "FY2024").unwrap_err();
    assert_eq!(err.to_string(), "Backend error: lock timeout");
}
