use super::{
    history::ClosedPeriod,
    request::{ClosingReceipt, PeriodClosingRequest, ReopenRequest},
};
use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// The persistence side of period closing. Implementations post the closing
/// journal, lock the range, and undo both on reopen.
pub trait ClosingBackend: Send + Sync {
    fn execute_closing(&self, request: &PeriodClosingRequest) -> Result<ClosingReceipt>;
    fn reopen_period(&self, request: &ReopenRequest) -> Result<()>;
    fn closed_periods(&self) -> Result<Vec<ClosedPeriod>>;
}
