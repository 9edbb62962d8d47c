//! Prepaid card account model and ledger operations.
//!
//! Maintains the invariants: `blocked` equals the sum of all merchant holds,
//! and every balance is non-negative after each successful operation.

use crate::decimal::Amount;
use crate::error::LedgerError;
use crate::transaction::{Operation, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A merchant's sub-ledger within one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    /// Portion of the account's blocked balance currently held for this
    /// merchant.
    pub available: Amount,

    /// Cumulative amount captured by this merchant and not yet refunded.
    pub captured: Amount,
}

/// A point-in-time account balance, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    /// `available + blocked`.
    pub total: Amount,

    /// Spendable funds.
    pub available: Amount,

    /// Funds held across all merchants.
    pub blocked: Amount,
}

/// A prepaid card account.
///
/// # Invariants
///
/// - `available >= 0` and `blocked >= 0` after every successful operation
/// - `blocked` equals the sum of `available` across all merchant sub-ledgers
/// - The transaction log is append-only; an entry's index is its identifier
///
/// Every operation is atomic with respect to failure: a precondition or
/// arithmetic error leaves all balances unchanged and appends nothing.
/// Operations stage each arithmetic result and commit only once all of them
/// have succeeded.
///
/// The account is not thread-safe. The owning collaborator must serialize
/// access; see [`AccountStore`](crate::AccountStore).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier, assigned at creation.
    pub id: u32,

    /// Funds the cardholder can spend or authorize against.
    pub available: Amount,

    /// Sum of all outstanding merchant holds.
    pub blocked: Amount,

    /// Merchant sub-ledgers, created lazily on first authorization and never
    /// removed.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub merchants: BTreeMap<u32, Merchant>,

    /// Append-only record of every successful operation.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub transactions: Vec<Transaction>,
}

impl Account {
    /// Creates a new account with zero balances and an empty log.
    pub fn new(id: u32) -> Self {
        Account {
            id,
            available: Amount::ZERO,
            blocked: Amount::ZERO,
            merchants: BTreeMap::new(),
            transactions: Vec::new(),
        }
    }

    /// Loads the given amount onto the card.
    pub fn load(&mut self, amount: Amount) -> Result<(), LedgerError> {
        self.available = self.available.checked_add(amount)?;
        self.transactions
            .push(Transaction::new(Operation::Load, None, amount));

        Ok(())
    }

    /// Places a hold of `amount` for the given merchant.
    ///
    /// Moves funds from the cardholder's available balance into the blocked
    /// pool and the merchant's hold. The merchant sub-ledger is created on
    /// first authorization.
    pub fn authorize(&mut self, merchant_id: u32, amount: Amount) -> Result<(), LedgerError> {
        if self.available < amount {
            return Err(LedgerError::Underflow);
        }

        let available = self.available.checked_sub(amount)?;
        let blocked = self.blocked.checked_add(amount)?;
        let held = self
            .merchants
            .get(&merchant_id)
            .map_or(Amount::ZERO, |m| m.available)
            .checked_add(amount)?;

        self.available = available;
        self.blocked = blocked;
        self.merchant_entry(merchant_id).available = held;
        self.transactions
            .push(Transaction::new(Operation::Authorize, Some(merchant_id), amount));

        Ok(())
    }

    /// Captures `amount` of the merchant's hold as recognized revenue.
    ///
    /// Captured funds leave the account for good; they do not return to the
    /// cardholder's available balance.
    pub fn capture(&mut self, merchant_id: u32, amount: Amount) -> Result<(), LedgerError> {
        let merchant = self
            .merchants
            .get_mut(&merchant_id)
            .ok_or(LedgerError::MerchantNotFound { merchant_id })?;

        if merchant.available < amount {
            return Err(LedgerError::Underflow);
        }

        let held = merchant.available.checked_sub(amount)?;
        let captured = merchant.captured.checked_add(amount)?;
        let blocked = self.blocked.checked_sub(amount)?;

        merchant.available = held;
        merchant.captured = captured;
        self.blocked = blocked;
        self.transactions
            .push(Transaction::new(Operation::Capture, Some(merchant_id), amount));

        Ok(())
    }

    /// Reverses `amount` of the merchant's unused hold, returning the funds
    /// to the cardholder's available balance.
    pub fn reverse(&mut self, merchant_id: u32, amount: Amount) -> Result<(), LedgerError> {
        let merchant = self
            .merchants
            .get_mut(&merchant_id)
            .ok_or(LedgerError::MerchantNotFound { merchant_id })?;

        if merchant.available < amount {
            return Err(LedgerError::Underflow);
        }

        let held = merchant.available.checked_sub(amount)?;
        let blocked = self.blocked.checked_sub(amount)?;
        let available = self.available.checked_add(amount)?;

        merchant.available = held;
        self.blocked = blocked;
        self.available = available;
        self.transactions
            .push(Transaction::new(Operation::Reverse, Some(merchant_id), amount));

        Ok(())
    }

    /// Refunds `amount` of the merchant's captured funds directly to the
    /// cardholder's available balance.
    ///
    /// The hold for a captured amount no longer exists, so unlike
    /// [`reverse`](Account::reverse) the blocked pool is untouched.
    pub fn refund(&mut self, merchant_id: u32, amount: Amount) -> Result<(), LedgerError> {
        let merchant = self
            .merchants
            .get_mut(&merchant_id)
            .ok_or(LedgerError::MerchantNotFound { merchant_id })?;

        if merchant.captured < amount {
            return Err(LedgerError::Underflow);
        }

        let captured = merchant.captured.checked_sub(amount)?;
        let available = self.available.checked_add(amount)?;

        merchant.captured = captured;
        self.available = available;
        self.transactions
            .push(Transaction::new(Operation::Refund, Some(merchant_id), amount));

        Ok(())
    }

    /// Returns the current balance.
    pub fn balance(&self) -> Result<Balance, LedgerError> {
        Ok(Balance {
            total: self.available.checked_add(self.blocked)?,
            available: self.available,
            blocked: self.blocked,
        })
    }

    /// Get-or-create accessor for a merchant sub-ledger.
    fn merchant_entry(&mut self, merchant_id: u32) -> &mut Merchant {
        self.merchants.entry(merchant_id).or_default()
    }

    /// Verifies the invariants: all balances non-negative and
    /// `blocked == sum of merchant holds`.
    #[cfg(debug_assertions)]
    pub fn check_invariants(&self) -> bool {
        let mut held = Amount::ZERO;

        for merchant in self.merchants.values() {
            if merchant.available < Amount::ZERO || merchant.captured < Amount::ZERO {
                return false;
            }

            held = match held.checked_add(merchant.available) {
                Ok(sum) => sum,
                Err(_) => return false,
            };
        }

        self.available >= Amount::ZERO && self.blocked >= Amount::ZERO && self.blocked == held
    }
}
