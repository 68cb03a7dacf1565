use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::LedgerSettings;
use crate::ledger::{reconcile_balance, Account, BalanceReconciliation};
use crate::reports::{
    compare_balance_sheets, compute_balance_sheet, compute_ratios, validate_balance_sheet,
    BalanceSheet, ComparisonResult, RatioSet, ValidationOptions, ValidationResult,
};

/// A balance sheet together with its ratios and consistency checks.
#[derive(Debug, Clone)]
pub struct BalanceSheetReport {
    pub sheet: BalanceSheet,
    pub ratios: RatioSet,
    pub validation: ValidationResult,
}

pub struct ReportService;

impl ReportService {
    pub fn balance_sheet(
        accounts: &[Account],
        as_of_date: NaiveDate,
        settings: &LedgerSettings,
    ) -> BalanceSheet {
        let sheet = compute_balance_sheet(accounts, as_of_date, &settings.balance_sheet_options());
        if !sheet.is_balanced {
            tracing::warn!(
                as_of = %as_of_date,
                difference = %sheet.balance_difference,
                "balance sheet is not balanced"
            );
        }
        sheet
    }

    pub fn balance_sheet_report(
        accounts: &[Account],
        as_of_date: NaiveDate,
        settings: &LedgerSettings,
    ) -> BalanceSheetReport {
        let sheet = Self::balance_sheet(accounts, as_of_date, settings);
        let ratios = compute_ratios(&sheet);
        let validation = validate_balance_sheet(&sheet, &ValidationOptions::default());
        for warning in &validation.warnings {
            tracing::debug!(as_of = %as_of_date, "balance sheet warning: {warning}");
        }
        BalanceSheetReport {
            sheet,
            ratios,
            validation,
        }
    }

    pub fn compare(
        current: &[Account],
        current_date: NaiveDate,
        previous: &[Account],
        previous_date: NaiveDate,
        settings: &LedgerSettings,
    ) -> ComparisonResult {
        let current = Self::balance_sheet(current, current_date, settings);
        let previous = Self::balance_sheet(previous, previous_date, settings);
        compare_balance_sheets(&current, &previous)
    }

    /// Checks a live account balance against the backend's materialized one.
    pub fn reconcile(
        account: &Account,
        materialized: Decimal,
        settings: &LedgerSettings,
    ) -> BalanceReconciliation {
        let result = reconcile_balance(account.balance, materialized, settings.balance_tolerance);
        if result.is_drifted() {
            tracing::warn!(
                account = %account.code,
                live = %result.live,
                materialized = %result.materialized,
                "materialized balance drifted from live balance"
            );
        }
        result
    }
}
