use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::balance_sheet::{BalanceSheet, SectionKind};
use crate::ledger::money::within_tolerance;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationOptions {
    /// Balances at or above this magnitude raise a warning.
    pub large_balance_threshold: Decimal,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            large_balance_threshold: Decimal::new(1_000_000_000_000, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("Balance sheet is not balanced: difference of {difference} exceeds tolerance {tolerance}")]
    Imbalance {
        difference: Decimal,
        tolerance: Decimal,
    },
    #[error("{section:?} total {reported} does not match the sum of its items {computed}")]
    SectionTotalMismatch {
        section: SectionKind,
        reported: Decimal,
        computed: Decimal,
    },
    #[error("{section:?} section total {section_total} differs from the sheet total {sheet_total}")]
    GrandTotalMismatch {
        section: SectionKind,
        section_total: Decimal,
        sheet_total: Decimal,
    },
    #[error("Total liabilities and equity {reported} does not equal liabilities plus equity {computed}")]
    LiabilitiesEquityTotalMismatch {
        reported: Decimal,
        computed: Decimal,
    },
    #[error("Account {account_code} has an unusually large balance of {balance}")]
    UnusuallyLargeBalance {
        account_code: String,
        balance: Decimal,
    },
    #[error("Inactive account {account_code} still carries a balance of {balance}")]
    InactiveWithBalance {
        account_code: String,
        balance: Decimal,
    },
    #[error("Account {account_code} has a negative balance of {balance}")]
    NegativeBalance {
        account_code: String,
        balance: Decimal,
    },
    #[error("Balance sheet contains no accounts")]
    EmptyBalanceSheet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// Checks a computed balance sheet for imbalance and internal inconsistency.
///
/// Only the imbalance and total mismatches are errors; the rest are warnings.
pub fn validate_balance_sheet(sheet: &BalanceSheet, options: &ValidationOptions) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !within_tolerance(sheet.total_assets, sheet.total_liabilities_equity, sheet.tolerance) {
        errors.push(ValidationIssue::Imbalance {
            difference: sheet.total_assets - sheet.total_liabilities_equity,
            tolerance: sheet.tolerance,
        });
    }

    let sheet_totals = [
        sheet.total_assets,
        sheet.total_liabilities,
        sheet.total_equity,
    ];
    for (section, sheet_total) in sheet.sections().into_iter().zip(sheet_totals) {
        let computed = section.items_total();
        if computed != section.total {
            errors.push(ValidationIssue::SectionTotalMismatch {
                section: section.kind,
                reported: section.total,
                computed,
            });
        }
        if section.total != sheet_total {
            errors.push(ValidationIssue::GrandTotalMismatch {
                section: section.kind,
                section_total: section.total,
                sheet_total,
            });
        }
    }

    let liabilities_equity = sheet.total_liabilities + sheet.total_equity;
    if liabilities_equity != sheet.total_liabilities_equity {
        errors.push(ValidationIssue::LiabilitiesEquityTotalMismatch {
            reported: sheet.total_liabilities_equity,
            computed: liabilities_equity,
        });
    }

    let mut item_count = 0usize;
    for item in sheet.items() {
        item_count += 1;
        if item.balance.abs() >= options.large_balance_threshold {
            warnings.push(ValidationIssue::UnusuallyLargeBalance {
                account_code: item.account_code.clone(),
                balance: item.balance,
            });
        }
        if !item.is_active && !item.balance.is_zero() {
            warnings.push(ValidationIssue::InactiveWithBalance {
                account_code: item.account_code.clone(),
                balance: item.balance,
            });
        }
        if item.balance < Decimal::ZERO {
            warnings.push(ValidationIssue::NegativeBalance {
                account_code: item.account_code.clone(),
                balance: item.balance,
            });
        }
    }
    if item_count == 0 {
        warnings.push(ValidationIssue::EmptyBalanceSheet);
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}
