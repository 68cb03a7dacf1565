use rust_decimal::Decimal;

/// Default equality tolerance for currency amounts (one cent).
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Movements smaller than this are treated as noise in comparisons and closings.
pub const NEGLIGIBLE_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Returns true when `a` and `b` differ by at most `tolerance`.
pub fn within_tolerance(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() <= tolerance
}

/// Returns true when `amount` is strictly below [`NEGLIGIBLE_AMOUNT`] in magnitude.
pub fn is_negligible(amount: Decimal) -> bool {
    amount.abs() < NEGLIGIBLE_AMOUNT
}

/// Divides `numerator` by `denominator`, yielding zero instead of failing on a
/// zero denominator or overflow.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Percentage change from `previous` to `current`, rounded to two places.
/// Zero when `previous` is zero or the result does not fit in a `Decimal`.
pub fn percentage_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    current
        .checked_sub(previous)
        .map(|delta| safe_div(delta, previous.abs()))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp(2))
        .unwrap_or(Decimal::ZERO)
}
