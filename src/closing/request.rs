use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::preview::PeriodClosingPreview;
use crate::{errors::LedgerError, ledger::AccountId};

/// Everything the backend needs to post a closing and lock the period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodClosingRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub retained_earnings_id: AccountId,
    pub net_income: Decimal,
}

impl PeriodClosingRequest {
    /// Turns a preview into a request, refusing when any blocking issue remains.
    pub fn from_preview(
        preview: &PeriodClosingPreview,
        description: &str,
    ) -> Result<Self, LedgerError> {
        if !preview.can_close {
            return Err(LedgerError::ClosingPrecondition(preview.blocking_messages()));
        }
        let retained_earnings_id = preview.retained_earnings_id.ok_or_else(|| {
            LedgerError::ClosingPrecondition(vec![
                "Retained earnings account not found; create it before closing".to_string(),
            ])
        })?;
        let description = match description.trim() {
            "" => format!(
                "Period closing {} to {}",
                preview.start_date, preview.end_date
            ),
            text => text.to_string(),
        };
        Ok(Self {
            start_date: preview.start_date,
            end_date: preview.end_date,
            description,
            retained_earnings_id,
            net_income: preview.net_income,
        })
    }
}

/// Asks the backend to reverse a closing. Only the most recent closed
/// period may be reopened; the backend enforces that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReopenRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

impl ReopenRequest {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, reason: &str) -> Result<Self, LedgerError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(LedgerError::BlankReopenReason);
        }
        if end_date < start_date {
            return Err(LedgerError::InvalidDate(format!(
                "end date {end_date} is before start date {start_date}"
            )));
        }
        Ok(Self {
            start_date,
            end_date,
            reason: reason.to_string(),
        })
    }
}

/// What the backend reports after a successful closing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClosingReceipt {
    pub journal_entry_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub net_income: Decimal,
    pub closed_at: DateTime<Utc>,
}
