//! Period closing: preview, request construction, and closed-period history.

pub mod backend;
pub mod history;
pub mod preview;
pub mod request;

pub use backend::ClosingBackend;
pub use history::{
    closed_period_for_date, is_date_in_closed_period, last_closing_info, ClosedPeriod,
    LastClosingInfo,
};
pub use preview::{
    preview_period_closing, AccountActivity, ClosingEntryPreview, ClosingIssue,
    PeriodAccountBalance, PeriodActivity, PeriodClosingPreview,
};
pub use request::{ClosingReceipt, PeriodClosingRequest, ReopenRequest};
