mod common;

use common::date;
use ledger_core::ledger::{validate_journal_lines, JournalEntry, JournalIssue, JournalLine};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn balanced_lines_have_no_errors() {
    let lines = [
        JournalLine::debit(2, "Cash sale", dec!(100)),
        JournalLine::credit(12, "Cash sale", dec!(100)),
    ];
    let result = validate_journal_lines(&lines);
    assert!(result.is_valid);
    assert!(result.is_balanced);
    assert!(result.errors.is_empty());
    assert_eq!(result.difference, Decimal::ZERO);
}

#[test]
fn unbalanced_message_cites_both_totals() {
    let lines = [
        JournalLine::debit(2, "Cash sale", dec!(100)),
        JournalLine::credit(12, "Cash sale", dec!(90)),
    ];
    let result = validate_journal_lines(&lines);
    assert!(!result.is_valid);
    assert_eq!(
        result.errors,
        vec![JournalIssue::UnbalancedEntry {
            total_debit: dec!(100),
            total_credit: dec!(90),
        }]
    );
    let message = &result.messages()[0];
    assert!(message.contains("100") && message.contains("90"), "{message}");
}

#[test]
fn conflicting_line_is_flagged_even_when_totals_balance() {
    let lines = [
        JournalLine {
            account_id: Some(ledger_core::AccountId(2)),
            description: "Both sides".into(),
            debit_amount: dec!(50),
            credit_amount: dec!(50),
        },
        JournalLine::debit(3, "Other", dec!(10)),
        JournalLine::credit(4, "Other", dec!(10)),
    ];
    let result = validate_journal_lines(&lines);
    assert!(result.is_balanced);
    assert_eq!(result.errors, vec![JournalIssue::ConflictingAmounts { line: 1 }]);
}

#[test]
fn every_problem_is_reported_at_once() {
    let lines = [
        JournalLine {
            account_id: None,
            description: " ".into(),
            debit_amount: Decimal::ZERO,
            credit_amount: Decimal::ZERO,
        },
        JournalLine::credit(4, "Refund", dec!(-5)),
    ];
    let result = validate_journal_lines(&lines);
    assert_eq!(
        result.errors,
        vec![
            JournalIssue::MissingAccount { line: 1 },
            JournalIssue::MissingDescription { line: 1 },
            JournalIssue::ZeroAmount { line: 1 },
            JournalIssue::NegativeAmount { line: 2 },
            JournalIssue::UnbalancedEntry {
                total_debit: Decimal::ZERO,
                total_credit: dec!(-5),
            },
        ]
    );
}

#[test]
fn single_line_is_insufficient() {
    let result = validate_journal_lines(&[JournalLine::debit(2, "Alone", dec!(10))]);
    assert_eq!(result.errors[0], JournalIssue::InsufficientLines { count: 1 });
}

#[test]
fn empty_entry_is_rejected() {
    let result = validate_journal_lines(&[]);
    assert!(!result.is_valid);
    assert!(result.is_balanced);
    assert_eq!(result.total_debit, Decimal::ZERO);
    assert_eq!(result.errors, vec![JournalIssue::InsufficientLines { count: 0 }]);
}

#[test]
fn tolerance_is_one_cent_inclusive() {
    let within = [
        JournalLine::debit(2, "a", dec!(100.01)),
        JournalLine::credit(3, "b", dec!(100)),
    ];
    assert!(validate_journal_lines(&within).is_balanced);

    let beyond = [
        JournalLine::debit(2, "a", dec!(100.011)),
        JournalLine::credit(3, "b", dec!(100)),
    ];
    assert!(!validate_journal_lines(&beyond).is_balanced);
}

#[test]
fn entry_requires_its_own_description() {
    let entry = JournalEntry::new(date(2024, 3, 1), "")
        .with_line(JournalLine::debit(2, "Cash", dec!(10)))
        .with_line(JournalLine::credit(12, "Sales", dec!(10)));
    let result = entry.validate();
    assert!(!result.is_valid);
    assert_eq!(result.errors, vec![JournalIssue::MissingEntryDescription]);
}
