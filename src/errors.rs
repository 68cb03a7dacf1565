use thiserror::Error;

/// Error type that captures rejected ledger computations.
///
/// Expected domain conditions (unbalanced journals, balance sheet drift,
/// closing blockers) are reported inside result structs instead.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid fiscal year anchor: {0}")]
    InvalidAnchor(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid account type: {0}")]
    InvalidAccountType(String),
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),
    #[error("Period cannot be closed: {}", .0.join("; "))]
    ClosingPrecondition(Vec<String>),
    #[error("A reason is required to reopen a closed period")]
    BlankReopenReason,
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
