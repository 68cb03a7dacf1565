use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Days per month in a common year. February 29 anchors clamp to the 28th so
/// the anchor resolves to the same calendar day every year.
const ANCHOR_MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Month and day on which the fiscal year begins, e.g. `"January 1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FiscalAnchor {
    month: u32,
    day: u32,
}

impl FiscalAnchor {
    /// Builds an anchor, clamping `day` to the last day of `month` in a common year.
    pub fn new(month: u32, day: u32) -> Result<Self, LedgerError> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::InvalidAnchor(format!(
                "month {month} is outside 1..=12"
            )));
        }
        if !(1..=31).contains(&day) {
            return Err(LedgerError::InvalidAnchor(format!(
                "day {day} is outside 1..=31"
            )));
        }
        let day = day.min(ANCHOR_MONTH_LENGTHS[month as usize - 1]);
        Ok(Self { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The anchor's calendar date in `year`.
    pub fn in_year(&self, year: i32) -> Result<NaiveDate, LedgerError> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .ok_or_else(|| LedgerError::InvalidDate(format!("{year}-{}-{}", self.month, self.day)))
    }

    /// Fiscal period containing `today`.
    pub fn period_containing(&self, today: NaiveDate) -> Result<FiscalPeriod, LedgerError> {
        let candidate = self.in_year(today.year())?;
        let start = if today < candidate {
            self.in_year(today.year() - 1)?
        } else {
            candidate
        };
        let next_start = self.in_year(start.year() + 1)?;
        Ok(FiscalPeriod {
            start_date: start,
            end_date: next_start - Duration::days(1),
        })
    }
}

impl Default for FiscalAnchor {
    fn default() -> Self {
        Self { month: 1, day: 1 }
    }
}

impl fmt::Display for FiscalAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", MONTH_NAMES[self.month as usize - 1], self.day)
    }
}

impl FromStr for FiscalAnchor {
    type Err = LedgerError;

    /// Accepts `"January 1"`, `"jan 1"`, `"01/01"` and `"1-31"`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let raw = input.trim();
        let invalid = || LedgerError::InvalidAnchor(input.to_string());

        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if let [month, day] = tokens.as_slice() {
            let month = month_from_name(month).ok_or_else(invalid)?;
            let day = day.parse::<u32>().map_err(|_| invalid())?;
            return Self::new(month, day);
        }

        let parts: Vec<&str> = raw.split(['/', '-']).collect();
        if let [month, day] = parts.as_slice() {
            let month = month.parse::<u32>().map_err(|_| invalid())?;
            let day = day.parse::<u32>().map_err(|_| invalid())?;
            return Self::new(month, day);
        }

        Err(invalid())
    }
}

impl TryFrom<String> for FiscalAnchor {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FiscalAnchor> for String {
    fn from(anchor: FiscalAnchor) -> Self {
        anchor.to_string()
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let lowered = name.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|candidate| {
            let candidate = candidate.to_ascii_lowercase();
            candidate == lowered || (lowered.len() == 3 && candidate.starts_with(&lowered))
        })
        .map(|index| index as u32 + 1)
}

/// A concrete fiscal year, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FiscalPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of days in the period, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn start_iso(&self) -> String {
        self.start_date.format("%Y-%m-%d").to_string()
    }

    pub fn end_iso(&self) -> String {
        self.end_date.format("%Y-%m-%d").to_string()
    }
}

/// Resolves the fiscal year in effect on `today` for a `"Month Day"` anchor.
pub fn compute_fiscal_period(anchor: &str, today: NaiveDate) -> Result<FiscalPeriod, LedgerError> {
    let anchor: FiscalAnchor = anchor.parse()?;
    anchor.period_containing(today)
}

/// Renders an anchor as an ISO date in `year` for date-picker binding.
pub fn anchor_to_iso(anchor: &str, year: i32) -> Result<String, LedgerError> {
    let anchor: FiscalAnchor = anchor.parse()?;
    Ok(anchor.in_year(year)?.format("%Y-%m-%d").to_string())
}

/// Converts an ISO date back into its `"Month Day"` anchor form.
pub fn iso_to_anchor(iso: &str) -> Result<String, LedgerError> {
    let date = parse_iso_date(iso)?;
    Ok(FiscalAnchor::new(date.month(), date.day())?.to_string())
}

/// Canonical `"Month Day"` spelling of any accepted anchor input.
pub fn normalize_fiscal_start(input: &str) -> Result<String, LedgerError> {
    Ok(input.parse::<FiscalAnchor>()?.to_string())
}

pub(crate) fn parse_iso_date(iso: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDate(iso.to_string()))
}
