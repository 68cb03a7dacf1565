pub mod closing_service;
pub mod fiscal_service;
pub mod report_service;

pub use closing_service::ClosingService;
pub use fiscal_service::FiscalService;
pub use report_service::{BalanceSheetReport, ReportService};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}
