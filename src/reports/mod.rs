//! Balance sheet construction and the analyses built on top of it.

pub mod balance_sheet;
pub mod comparison;
pub mod ratios;
pub mod validation;

pub use balance_sheet::{
    compute_balance_sheet, AccountBalanceItem, BalanceSheet, BalanceSheetMetadata,
    BalanceSheetOptions, Classification, Section, SectionKind, CURRENT_EARNINGS_CODE,
};
pub use comparison::{compare_balance_sheets, AccountChange, ComparisonResult, TotalChange};
pub use ratios::{compute_ratios, RatioSet};
pub use validation::{
    validate_balance_sheet, ValidationIssue, ValidationOptions, ValidationResult,
};
