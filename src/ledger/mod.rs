//! Chart-of-accounts snapshots, journal entries, fiscal periods, and money helpers.

pub mod account;
pub mod fiscal;
pub mod journal;
pub mod money;
pub mod reconciliation;

pub use account::{Account, AccountId, AccountType, BankDetails, NormalBalance};
pub use fiscal::{
    anchor_to_iso, compute_fiscal_period, iso_to_anchor, normalize_fiscal_start, FiscalAnchor,
    FiscalPeriod,
};
pub use journal::{
    validate_journal_lines, EntryStatus, JournalEntry, JournalIssue, JournalLine,
    JournalValidation, PostedEntry,
};
pub use money::{DEFAULT_TOLERANCE, NEGLIGIBLE_AMOUNT};
pub use reconciliation::{reconcile_balance, BalanceReconciliation, ReconciliationStatus};
