//! # Card Ledger
//!
//! An in-memory prepaid card account ledger. Tracks money loaded onto a
//! card, money held ("blocked") for merchants, money captured by merchants,
//! and money returned via reversal or refund.
//!
//! ## Design Principles
//!
//! - **Exact decimal arithmetic**: checked add/sub at 16 significant digits
//!   via `rust_decimal`; money never touches binary floating point
//! - **Atomic operations**: a failed operation leaves the account untouched
//! - **Append-only history**: every successful operation appends one
//!   transaction; the log renders into a fixed-width statement
//! - **Deterministic output**: accounts and merchants live in ordered maps
//!
//! ## Example
//!
//! ```
//! use card_ledger::Account;
//!
//! let mut account = Account::new(0);
//! account.load("10.50".parse().unwrap()).unwrap();
//! account.authorize(1, "2.50".parse().unwrap()).unwrap();
//! account.capture(1, "2.50".parse().unwrap()).unwrap();
//!
//! println!("{}", account.statement().unwrap());
//! ```

pub mod account;
pub mod decimal;
pub mod engine;
pub mod error;
pub mod statement;
pub mod store;
pub mod transaction;

pub use account::{Account, Balance, Merchant};
pub use decimal::{Amount, ArithmeticError};
pub use engine::ReplayEngine;
pub use error::{EngineError, LedgerError, Result, StoreError};
pub use statement::Statement;
pub use store::AccountStore;
pub use transaction::{OpKind, Operation, OperationRecord, ParsedOperation, Transaction};
