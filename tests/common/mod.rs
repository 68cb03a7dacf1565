#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::{NaiveDate, Utc};
use ledger_core::{
    closing::{
        ClosedPeriod, ClosingBackend, ClosingReceipt, PeriodActivity, PeriodClosingRequest,
        ReopenRequest,
    },
    errors::LedgerError,
    ledger::{Account, AccountType},
};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh directory for one test's settings file.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A small trading company mid-year: assets 17,300 = liabilities 4,000 + equity
/// 11,000 + unclosed earnings 2,300 (sales 8,000 less expenses 5,700).
pub fn sample_chart() -> Vec<Account> {
    vec![
        Account::new(1, "1000", "Current Assets", AccountType::Asset, dec!(0)).header(),
        Account::new(2, "1101", "Cash", AccountType::Asset, dec!(7300)),
        Account::new(3, "1201", "Accounts Receivable", AccountType::Asset, dec!(2000)),
        Account::new(4, "1301", "Inventory", AccountType::Asset, dec!(3000)),
        Account::new(5, "1501", "Equipment", AccountType::Asset, dec!(6000)),
        Account::new(6, "1509", "Accumulated Depreciation", AccountType::Asset, dec!(-1000)),
        Account::new(7, "2101", "Accounts Payable", AccountType::Liability, dec!(1500)),
        Account::new(8, "2102", "Tax Payable", AccountType::Liability, dec!(500)),
        Account::new(9, "2201", "Bank Loan", AccountType::Liability, dec!(2000)),
        Account::new(10, "3101", "Share Capital", AccountType::Equity, dec!(10000)),
        Account::new(11, "3201", "Retained Earnings", AccountType::Equity, dec!(1000)),
        Account::new(12, "4101", "Sales", AccountType::Revenue, dec!(8000)),
        Account::new(13, "5101", "Cost of Goods Sold", AccountType::Expense, dec!(4500)),
        Account::new(14, "5201", "Rent", AccountType::Expense, dec!(1200)),
    ]
}

/// Activity for a period ready to close: revenue 8,000, expenses 5,700.
pub fn closable_activity() -> PeriodActivity {
    PeriodActivity {
        posted_entries: 42,
        ..PeriodActivity::from_chart(&sample_chart(), "3201")
    }
}

/// Backend double that records closings in memory and enforces reopen order.
#[derive(Default)]
pub struct InMemoryBackend {
    closed: Mutex<Vec<ClosedPeriod>>,
    pub fail_with: Option<String>,
}

impl InMemoryBackend {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }
}

impl ClosingBackend for InMemoryBackend {
    fn execute_closing(&self, request: &PeriodClosingRequest) -> Result<ClosingReceipt, LedgerError> {
        if let Some(message) = &self.fail_with {
            return Err(LedgerError::Backend(message.clone()));
        }
        let mut closed = self.closed.lock().expect("lock closed periods");
        let mut period = ClosedPeriod::new(request.start_date, request.end_date);
        period.description = request.description.clone();
        period.is_locked = true;
        period.closed_at = Some(Utc::now());
        closed.push(period);
        Ok(ClosingReceipt {
            journal_entry_number: format!("CLO-{:04}", closed.len()),
            start_date: request.start_date,
            end_date: request.end_date,
            net_income: request.net_income,
            closed_at: Utc::now(),
        })
    }

    fn reopen_period(&self, request: &ReopenRequest) -> Result<(), LedgerError> {
        let mut closed = self.closed.lock().expect("lock closed periods");
        let before = closed.len();
        closed.retain(|period| !period.matches(request.start_date, request.end_date));
        if closed.len() == before {
            return Err(LedgerError::Backend("period is not closed".into()));
        }
        Ok(())
    }

    fn closed_periods(&self) -> Result<Vec<ClosedPeriod>, LedgerError> {
        Ok(self.closed.lock().expect("lock closed periods").clone())
    }
}
