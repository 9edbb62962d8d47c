//! Concurrent account directory.
//!
//! The account itself is not thread-safe; the store's lock is the single
//! serialization point for all mutations, so each account's transaction-log
//! order equals the lock-acquisition order.

use crate::account::Account;
use crate::error::StoreError;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockWriteGuard};

/// Repository of accounts guarded by a single read-write lock.
///
/// Constructed once and shared by reference with the calling layer. Accounts
/// are keyed by ID in an ordered map so iteration order is deterministic.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: RwLock<BTreeMap<u32, Account>>,
}

impl AccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        AccountStore {
            accounts: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates a new zero-balance account.
    pub fn create(&self, id: u32) -> Result<(), StoreError> {
        let mut accounts = self.write_lock();

        if accounts.contains_key(&id) {
            return Err(StoreError::AccountExists(id));
        }

        accounts.insert(id, Account::new(id));

        Ok(())
    }

    /// Runs `f` against the account under the write lock.
    pub fn with_account<R>(
        &self,
        id: u32,
        f: impl FnOnce(&mut Account) -> R,
    ) -> Result<R, StoreError> {
        let mut accounts = self.write_lock();
        let account = accounts
            .get_mut(&id)
            .ok_or(StoreError::AccountNotFound(id))?;

        Ok(f(account))
    }

    /// Runs `f` against the account, creating it first if absent.
    pub fn get_or_create<R>(&self, id: u32, f: impl FnOnce(&mut Account) -> R) -> R {
        let mut accounts = self.write_lock();
        let account = accounts.entry(id).or_insert_with(|| Account::new(id));

        f(account)
    }

    /// Returns a copy of every account, in ID order.
    pub fn snapshot(&self) -> Vec<Account> {
        self.accounts
            .read()
            .expect("account store lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    /// Number of accounts in the store.
    pub fn len(&self) -> usize {
        self.accounts
            .read()
            .expect("account store lock poisoned")
            .len()
    }

    /// Returns `true` if the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, BTreeMap<u32, Account>> {
        self.accounts.write().expect("account store lock poisoned")
    }
}
