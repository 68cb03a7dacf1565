//! Service layer: ties settings, clock, and backend to the pure computations.

pub mod services;

pub use services::{
    BalanceSheetReport, ClosingService, FiscalService, ReportService, ServiceError,
    ServiceResult,
};
