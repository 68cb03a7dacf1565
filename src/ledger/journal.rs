use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    account::AccountId,
    money::{within_tolerance, DEFAULT_TOLERANCE},
};

/// One proposed debit or credit against a single account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalLine {
    #[serde(default)]
    pub account_id: Option<AccountId>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub debit_amount: Decimal,
    #[serde(default)]
    pub credit_amount: Decimal,
}

impl JournalLine {
    pub fn debit(account_id: u64, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_id: Some(AccountId(account_id)),
            description: description.into(),
            debit_amount: amount,
            credit_amount: Decimal::ZERO,
        }
    }

    pub fn credit(account_id: u64, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_id: Some(AccountId(account_id)),
            description: description.into(),
            debit_amount: Decimal::ZERO,
            credit_amount: amount,
        }
    }

    /// The same line with debit and credit swapped.
    pub fn reversed(&self) -> Self {
        Self {
            account_id: self.account_id,
            description: format!("Reversal: {}", self.description),
            debit_amount: self.credit_amount,
            credit_amount: self.debit_amount,
        }
    }
}

/// A journal entry assembled in a form, before the backend numbers it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub entry_date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    pub fn new(entry_date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            entry_date,
            description: description.into(),
            lines: Vec::new(),
        }
    }

    pub fn with_line(mut self, line: JournalLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Validates the lines plus the entry-level description.
    pub fn validate(&self) -> JournalValidation {
        let mut validation = validate_journal_lines(&self.lines);
        if self.description.trim().is_empty() {
            validation.errors.insert(0, JournalIssue::MissingEntryDescription);
            validation.is_valid = false;
        }
        validation
    }

    /// Mirror entry that cancels this one, dated `entry_date`.
    pub fn reversal(&self, entry_date: NaiveDate, reason: &str) -> Self {
        Self {
            entry_date,
            description: format!("Reversal: {} - Reason: {}", self.description, reason.trim()),
            lines: self.lines.iter().map(JournalLine::reversed).collect(),
        }
    }
}

/// Lifecycle state assigned by the backend once an entry is submitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryStatus {
    Draft,
    Posted,
    Reversed,
}

/// An entry as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostedEntry {
    pub entry_number: String,
    pub status: EntryStatus,
    #[serde(flatten)]
    pub entry: JournalEntry,
}

/// A single problem found while validating journal lines. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JournalIssue {
    #[error("Entry description is required")]
    MissingEntryDescription,
    #[error("At least two lines are required, found {count}")]
    InsufficientLines { count: usize },
    #[error("Line {line}: account is required")]
    MissingAccount { line: usize },
    #[error("Line {line}: description is required")]
    MissingDescription { line: usize },
    #[error("Line {line}: amounts cannot be negative")]
    NegativeAmount { line: usize },
    #[error("Line {line}: a line cannot have both a debit and a credit amount")]
    ConflictingAmounts { line: usize },
    #[error("Line {line}: either a debit or a credit amount is required")]
    ZeroAmount { line: usize },
    #[error("Journal entry is not balanced: total debit {total_debit} does not equal total credit {total_credit}")]
    UnbalancedEntry {
        total_debit: Decimal,
        total_credit: Decimal,
    },
}

/// Outcome of [`validate_journal_lines`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalValidation {
    pub is_valid: bool,
    pub is_balanced: bool,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub difference: Decimal,
    pub errors: Vec<JournalIssue>,
}

impl JournalValidation {
    /// Human-readable messages, one per issue, in the order found.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Checks every line and the aggregate balance, collecting all problems.
pub fn validate_journal_lines(lines: &[JournalLine]) -> JournalValidation {
    let mut errors = Vec::new();
    if lines.len() < 2 {
        errors.push(JournalIssue::InsufficientLines { count: lines.len() });
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for (index, line) in lines.iter().enumerate() {
        let number = index + 1;
        total_debit += line.debit_amount;
        total_credit += line.credit_amount;

        if !line.account_id.is_some_and(AccountId::is_set) {
            errors.push(JournalIssue::MissingAccount { line: number });
        }
        if line.description.trim().is_empty() {
            errors.push(JournalIssue::MissingDescription { line: number });
        }

        let has_debit = line.debit_amount > Decimal::ZERO;
        let has_credit = line.credit_amount > Decimal::ZERO;
        if line.debit_amount < Decimal::ZERO || line.credit_amount < Decimal::ZERO {
            errors.push(JournalIssue::NegativeAmount { line: number });
        } else if has_debit && has_credit {
            errors.push(JournalIssue::ConflictingAmounts { line: number });
        } else if !has_debit && !has_credit {
            errors.push(JournalIssue::ZeroAmount { line: number });
        }
    }

    let is_balanced = within_tolerance(total_debit, total_credit, DEFAULT_TOLERANCE);
    if !is_balanced {
        errors.push(JournalIssue::UnbalancedEntry {
            total_debit,
            total_credit,
        });
    }

    JournalValidation {
        is_valid: errors.is_empty(),
        is_balanced,
        total_debit,
        total_credit,
        difference: total_debit - total_credit,
        errors,
    }
}
