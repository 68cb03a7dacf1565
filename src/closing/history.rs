use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::FiscalPeriod;

/// A date range already closed on the backend. Both ends inclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClosedPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

impl ClosedPeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            description: String::new(),
            is_locked: false,
            closed_at: None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }

    pub fn matches(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date == start && self.end_date == end
    }
}

/// Where the next closing should begin.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LastClosingInfo {
    pub has_previous_closing: bool,
    pub last_closing_date: Option<NaiveDate>,
    /// Day after the last closing.
    pub next_start_date: Option<NaiveDate>,
    /// Earliest posted entry, reported only when nothing has been closed yet.
    pub period_start_date: Option<NaiveDate>,
}

impl LastClosingInfo {
    /// Range to pre-fill in a closing form: from the first unclosed day up to
    /// the end of `fiscal`. `None` when everything up to that point is closed.
    pub fn suggested_range(&self, fiscal: &FiscalPeriod) -> Option<(NaiveDate, NaiveDate)> {
        let start = self
            .next_start_date
            .or(self.period_start_date)
            .unwrap_or(fiscal.start_date);
        (start <= fiscal.end_date).then_some((start, fiscal.end_date))
    }
}

pub fn last_closing_info(
    closed: &[ClosedPeriod],
    earliest_posted_entry: Option<NaiveDate>,
) -> LastClosingInfo {
    match closed.iter().map(|period| period.end_date).max() {
        Some(last) => LastClosingInfo {
            has_previous_closing: true,
            last_closing_date: Some(last),
            next_start_date: Some(last + Duration::days(1)),
            period_start_date: None,
        },
        None => LastClosingInfo {
            period_start_date: earliest_posted_entry,
            ..LastClosingInfo::default()
        },
    }
}

pub fn closed_period_for_date(closed: &[ClosedPeriod], date: NaiveDate) -> Option<&ClosedPeriod> {
    closed.iter().find(|period| period.contains(date))
}

/// Whether postings dated `date` would land in a closed period.
pub fn is_date_in_closed_period(closed: &[ClosedPeriod], date: NaiveDate) -> bool {
    closed_period_for_date(closed, date).is_some()
}
