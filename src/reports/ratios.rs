use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance_sheet::BalanceSheet;
use crate::ledger::money::safe_div;

const RATIO_PRECISION: u32 = 4;

/// Liquidity and leverage figures derived from a balance sheet.
///
/// Every ratio is zero when its denominator is zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatioSet {
    pub current_assets: Decimal,
    pub current_liabilities: Decimal,
    pub current_ratio: Decimal,
    pub debt_to_equity_ratio: Decimal,
    pub equity_ratio: Decimal,
    pub debt_ratio: Decimal,
    pub working_capital: Decimal,
}

pub fn compute_ratios(sheet: &BalanceSheet) -> RatioSet {
    let current_assets = sheet.assets.current_total();
    let current_liabilities = sheet.liabilities.current_total();
    RatioSet {
        current_assets,
        current_liabilities,
        current_ratio: ratio(current_assets, current_liabilities),
        debt_to_equity_ratio: ratio(sheet.total_liabilities, sheet.total_equity),
        equity_ratio: ratio(sheet.total_equity, sheet.total_assets),
        debt_ratio: ratio(sheet.total_liabilities, sheet.total_assets),
        working_capital: current_assets - current_liabilities,
    }
}

fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    safe_div(numerator, denominator).round_dp(RATIO_PRECISION)
}
