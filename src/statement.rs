//! Fixed-width statement rendering.
//!
//! A statement is a pure function of the current balance and the full
//! transaction log; rendering never mutates the account.

use crate::account::{Account, Balance};
use crate::error::LedgerError;
use crate::transaction::Transaction;
use std::fmt;

/// Horizontal rule separating the statement header from the table body.
const RULE: &str = "-------------------------------------------";

/// A renderable point-in-time statement: the balance plus the transaction
/// history in append order.
///
/// Obtained from [`Account::statement`]; the `Display` implementation
/// produces the fixed-width report. Row IDs are the transactions' positions
/// in the log.
#[derive(Debug)]
pub struct Statement<'a> {
    balance: Balance,
    transactions: &'a [Transaction],
}

impl Account {
    /// Returns a statement view over the account's balance and history.
    pub fn statement(&self) -> Result<Statement<'_>, LedgerError> {
        Ok(Statement {
            balance: self.balance()?,
            transactions: &self.transactions,
        })
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available: {:>32.2}", self.balance.available)?;
        writeln!(f, "Blocked: {:>34.2}", self.balance.blocked)?;
        writeln!(f, "Total: {:>36.2}", self.balance.total)?;
        writeln!(f)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, " ID     | Type      | Merchant | Amount")?;
        write!(f, "{}", RULE)?;

        if self.transactions.is_empty() {
            return write!(f, "\n          *** NO TRANSACTIONS ***");
        }

        writeln!(f)?;

        for (id, tx) in self.transactions.iter().enumerate() {
            let merchant = tx.merchant_id.map(|m| m.to_string()).unwrap_or_default();

            writeln!(
                f,
                " {:<6} | {:<9} | {:<8} | {:>9.2}",
                id, tx.operation, merchant, tx.amount
            )?;
        }

        write!(f, "{}", RULE)
    }
}
