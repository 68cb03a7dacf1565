#![doc(test(attr(deny(warnings))))]

//! Ledger Core provides the arithmetic behind an accounting front end: fiscal
//! periods, journal balancing, balance sheets, and period closing previews.

pub mod closing;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod reports;
pub mod utils;

pub use closing::{preview_period_closing, ClosingBackend, PeriodActivity, PeriodClosingPreview};
pub use config::{ConfigManager, LedgerSettings};
pub use self::core::{ClosingService, FiscalService, ReportService};
pub use currency::{format_currency, format_date, DateFormat};
pub use errors::LedgerError;
pub use ledger::{
    compute_fiscal_period, validate_journal_lines, Account, AccountId, AccountType,
    FiscalPeriod, JournalLine, JournalValidation,
};
pub use reports::{
    compare_balance_sheets, compute_balance_sheet, compute_ratios, validate_balance_sheet,
    BalanceSheet, BalanceSheetOptions,
};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
