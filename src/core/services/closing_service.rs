use chrono::NaiveDate;

use crate::closing::{
    preview_period_closing, ClosingBackend, ClosingReceipt, PeriodActivity, PeriodClosingPreview,
    PeriodClosingRequest, ReopenRequest,
};
use crate::config::LedgerSettings;
use crate::ledger::Account;

use super::{ServiceError, ServiceResult};

pub struct ClosingService;

impl ClosingService {
    /// Period activity for a chart snapshot, using the configured retained
    /// earnings account.
    pub fn activity_from_chart(accounts: &[Account], settings: &LedgerSettings) -> PeriodActivity {
        PeriodActivity::from_chart(accounts, &settings.retained_earnings_code)
    }

    pub fn preview(
        activity: &PeriodActivity,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> PeriodClosingPreview {
        let preview = preview_period_closing(activity, start_date, end_date);
        tracing::debug!(
            start = %start_date,
            end = %end_date,
            net_income = %preview.net_income,
            can_close = preview.can_close,
            "period closing previewed"
        );
        preview
    }

    /// Submits a closing built from `preview`. Nothing reaches the backend
    /// while the preview still has blocking issues.
    pub fn execute(
        backend: &dyn ClosingBackend,
        preview: &PeriodClosingPreview,
        description: &str,
    ) -> ServiceResult<ClosingReceipt> {
        let request = match PeriodClosingRequest::from_preview(preview, description) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(
                    start = %preview.start_date,
                    end = %preview.end_date,
                    "period closing refused: {err}"
                );
                return Err(err.into());
            }
        };
        let receipt = backend.execute_closing(&request)?;
        tracing::info!(
            start = %receipt.start_date,
            end = %receipt.end_date,
            entry = %receipt.journal_entry_number,
            "period closed"
        );
        Ok(receipt)
    }

    /// Reopens the most recent closed period.
    pub fn reopen(
        backend: &dyn ClosingBackend,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: &str,
    ) -> ServiceResult<()> {
        let request = ReopenRequest::new(start_date, end_date, reason)?;
        let closed = backend.closed_periods()?;
        if !closed.iter().any(|period| period.matches(start_date, end_date)) {
            return Err(ServiceError::Invalid(format!(
                "No closed period from {start_date} to {end_date}"
            )));
        }
        if closed.iter().any(|period| period.end_date > end_date) {
            return Err(ServiceError::Invalid(
                "Only the most recent closed period can be reopened".into(),
            ));
        }
        backend.reopen_period(&request)?;
        tracing::info!(start = %start_date, end = %end_date, reason = %request.reason, "period reopened");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::closing::ClosedPeriod;
    use crate::errors::LedgerError;
    use crate::ledger::AccountType;

    #[derive(Default)]
    struct RecordingBackend {
        closed: Mutex<Vec<ClosedPeriod>>,
    }

    impl ClosingBackend for RecordingBackend {
        fn execute_closing(
            &self,
            request: &PeriodClosingRequest,
        ) -> Result<ClosingReceipt, LedgerError> {
            let mut closed = self.closed.lock().unwrap();
            closed.push(ClosedPeriod::new(request.start_date, request.end_date));
            Ok(ClosingReceipt {
                journal_entry_number: format!("CLO-{}", closed.len()),
                start_date: request.start_date,
                end_date: request.end_date,
                net_income: request.net_income,
                closed_at: Utc::now(),
            })
        }

        fn reopen_period(&self, request: &ReopenRequest) -> Result<(), LedgerError> {
            self.closed
                .lock()
                .unwrap()
                .retain(|period| !period.matches(request.start_date, request.end_date));
            Ok(())
        }

        fn closed_periods(&self) -> Result<Vec<ClosedPeriod>, LedgerError> {
            Ok(self.closed.lock().unwrap().clone())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn activity() -> PeriodActivity {
        let chart = vec![
            Account::new(40, "4101", "Sales", AccountType::Revenue, dec!(250)),
            Account::new(31, "3101", "Capital", AccountType::Equity, dec!(1000)),
            Account::new(32, "3201", "Retained Earnings", AccountType::Equity, dec!(0)),
        ];
        PeriodActivity {
            posted_entries: 3,
            ..ClosingService::activity_from_chart(&chart, &LedgerSettings::default())
        }
    }

    #[test]
    fn execute_forwards_a_closable_preview() {
        let backend = RecordingBackend::default();
        let preview = ClosingService::preview(&activity(), date(2024, 1, 1), date(2024, 6, 30));
        let receipt = ClosingService::execute(&backend, &preview, "H1 close").unwrap();
        assert_eq!(receipt.journal_entry_number, "CLO-1");
        assert_eq!(receipt.net_income, dec!(250));
    }

    #[test]
    fn blocked_preview_never_reaches_backend() {
        let backend = RecordingBackend::default();
        let preview = ClosingService::preview(&activity(), date(2024, 6, 30), date(2024, 1, 1));
        let err = ClosingService::execute(&backend, &preview, "").unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Ledger(LedgerError::ClosingPrecondition(_))
        ));
        assert!(backend.closed_periods().unwrap().is_empty());
    }

    #[test]
    fn only_latest_period_reopens() {
        let backend = RecordingBackend::default();
        for (start, end) in [
            (date(2024, 1, 1), date(2024, 6, 30)),
            (date(2024, 7, 1), date(2024, 12, 31)),
        ] {
            let mut input = activity();
            input.closed_periods = backend.closed_periods().unwrap();
            let preview = ClosingService::preview(&input, start, end);
            ClosingService::execute(&backend, &preview, "").unwrap();
        }

        let err = ClosingService::reopen(&backend, date(2024, 1, 1), date(2024, 6, 30), "fix")
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));

        ClosingService::reopen(&backend, date(2024, 7, 1), date(2024, 12, 31), "fix").unwrap();
        assert_eq!(backend.closed_periods().unwrap().len(), 1);
    }
}
