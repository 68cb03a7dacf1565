use chrono::NaiveDate;

use crate::closing::{closed_period_for_date, last_closing_info, ClosedPeriod};
use crate::config::LedgerSettings;
use crate::ledger::FiscalPeriod;
use crate::utils::Clock;

use super::{ServiceError, ServiceResult};

pub struct FiscalService;

impl FiscalService {
    /// Fiscal year containing the clock's current date.
    pub fn current_period(settings: &LedgerSettings, clock: &dyn Clock) -> ServiceResult<FiscalPeriod> {
        Ok(settings.fiscal_year_start.period_containing(clock.today())?)
    }

    /// Range to offer for the next closing, or `None` when the current
    /// fiscal year is already closed through its last day.
    pub fn suggested_closing_range(
        settings: &LedgerSettings,
        clock: &dyn Clock,
        closed: &[ClosedPeriod],
        earliest_posted_entry: Option<NaiveDate>,
    ) -> ServiceResult<Option<(NaiveDate, NaiveDate)>> {
        let fiscal = Self::current_period(settings, clock)?;
        Ok(last_closing_info(closed, earliest_posted_entry).suggested_range(&fiscal))
    }

    /// Rejects postings dated inside a closed period.
    pub fn ensure_open(closed: &[ClosedPeriod], date: NaiveDate) -> ServiceResult<()> {
        match closed_period_for_date(closed, date) {
            Some(period) => Err(ServiceError::Invalid(format!(
                "{} falls in the closed period {} to {}",
                date, period.start_date, period.end_date
            ))),
            None => Ok(()),
        }
    }
}
