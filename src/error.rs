//! Error types for the card ledger.

use crate::decimal::ArithmeticError;
use thiserror::Error;

/// Result type alias for batch replay operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors returned by account ledger operations.
///
/// Every failure leaves the account untouched: no balance moves and no
/// transaction is appended.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// Requested amount exceeds the relevant available, held or captured
    /// balance
    #[error("requested amount exceeds available amount")]
    Underflow,

    /// Capture/Reverse/Refund referenced a merchant with no sub-ledger
    #[error("merchant record not found: ID {merchant_id}")]
    MerchantNotFound { merchant_id: u32 },

    /// A decimal result was not representable at the configured precision
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

/// Errors returned by the account store.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// An account with this ID already exists
    #[error("account {0} already exists")]
    AccountExists(u32),

    /// No account with this ID
    #[error("account {0} not found")]
    AccountNotFound(u32),
}

/// Errors that can occur during batch replay.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A statement could not be rendered
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: card-ledger <operations.csv>")]
    MissingArgument,
}
