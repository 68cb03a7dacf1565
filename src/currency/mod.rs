use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{errors::LedgerError, ledger::fiscal::parse_iso_date};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Separators and symbol placement for one locale tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    /// `1.234,50 €` rather than `€1.234,50`.
    pub symbol_after: bool,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            symbol_after: false,
        }
    }
}

impl LocaleConfig {
    /// Known tags get their conventions; anything else formats as `en-US`.
    pub fn for_tag(tag: &str) -> Self {
        let language_tag = tag.trim().to_string();
        match language_tag.to_ascii_lowercase().as_str() {
            "id-id" | "id" => Self {
                language_tag,
                decimal_separator: ',',
                grouping_separator: '.',
                symbol_after: false,
            },
            "de-de" | "de" => Self {
                language_tag,
                decimal_separator: ',',
                grouping_separator: '.',
                symbol_after: true,
            },
            "fr-fr" | "fr" => Self {
                language_tag,
                decimal_separator: ',',
                grouping_separator: ' ',
                symbol_after: true,
            },
            _ => Self::default(),
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "IDR" => "Rp".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u32 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Renders `value` with `precision` decimals and the locale's separators.
pub fn format_number(locale: &LocaleConfig, value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let body = format!("{:.*}", precision as usize, rounded);
    let (int_part, fraction) = match body.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (body.as_str(), None),
    };
    let mut int_part = int_part.to_string();
    insert_grouping(&mut int_part, locale.grouping_separator);
    match fraction {
        Some(fraction) => format!("{}{}{}", int_part, locale.decimal_separator, fraction),
        None => int_part,
    }
}

fn insert_grouping(int_part: &mut String, separator: char) {
    if let Some(digits) = int_part.strip_prefix('-') {
        *int_part = format!("-{}", group_digits(digits, separator));
    } else {
        *int_part = group_digits(int_part, separator);
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_currency_value(amount: Decimal, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    let precision = minor_units_for(code.as_str());
    let rounded = amount.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let body = format_number(locale, rounded.abs(), precision);
    let symbol = symbol_for(code.as_str());
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    if locale.symbol_after {
        format!("{sign}{body} {symbol}")
    } else if symbol.chars().count() > 1 {
        format!("{sign}{symbol} {body}")
    } else {
        format!("{sign}{symbol}{body}")
    }
}

/// Formats `amount` in `currency` (ISO code) for the `locale` tag.
///
/// ```
/// use ledger_core::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123450, 2), "USD", "en-US"), "$1,234.50");
/// assert_eq!(format_currency(Decimal::new(123450, 2), "IDR", "id-ID"), "Rp 1.234,50");
/// ```
pub fn format_currency(amount: Decimal, currency: &str, locale: &str) -> String {
    format_currency_value(amount, &CurrencyCode::new(currency), &LocaleConfig::for_tag(locale))
}

/// Display pattern for calendar dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DateFormat {
    #[default]
    Iso,
    DayMonthYearSlash,
    MonthDayYearSlash,
    DayMonthYearDash,
    /// `15 June 2024`.
    Long,
}

impl DateFormat {
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::Iso => "YYYY-MM-DD",
            DateFormat::DayMonthYearSlash => "DD/MM/YYYY",
            DateFormat::MonthDayYearSlash => "MM/DD/YYYY",
            DateFormat::DayMonthYearDash => "DD-MM-YYYY",
            DateFormat::Long => "LONG",
        }
    }

    fn strftime(self) -> &'static str {
        match self {
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::DayMonthYearSlash => "%d/%m/%Y",
            DateFormat::MonthDayYearSlash => "%m/%d/%Y",
            DateFormat::DayMonthYearDash => "%d-%m-%Y",
            DateFormat::Long => "%-d %B %Y",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

impl FromStr for DateFormat {
    type Err = LedgerError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_uppercase().as_str() {
            "YYYY-MM-DD" | "ISO" => Ok(DateFormat::Iso),
            "DD/MM/YYYY" => Ok(DateFormat::DayMonthYearSlash),
            "MM/DD/YYYY" => Ok(DateFormat::MonthDayYearSlash),
            "DD-MM-YYYY" => Ok(DateFormat::DayMonthYearDash),
            "LONG" => Ok(DateFormat::Long),
            _ => Err(LedgerError::InvalidDateFormat(input.to_string())),
        }
    }
}

impl TryFrom<String> for DateFormat {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateFormat> for String {
    fn from(format: DateFormat) -> Self {
        format.pattern().to_string()
    }
}

/// Reformats an ISO `YYYY-MM-DD` date.
pub fn format_date(iso: &str, format: DateFormat) -> Result<String, LedgerError> {
    let date = parse_iso_date(iso)?;
    Ok(date.format(format.strftime()).to_string())
}
