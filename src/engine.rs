//! Batch replay of card operations.
//!
//! Streams an operations CSV into an account directory and renders the
//! final statement for every account touched. Rows are applied in input
//! order, which becomes each account's transaction-log order.

use crate::account::Account;
use crate::error::{LedgerError, Result};
use crate::store::AccountStore;
use crate::transaction::{OpKind, OperationRecord};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::io::{Read, Write};

/// Replays operation records against an account directory.
///
/// Rows that fail to parse or are rejected by the ledger (underflow, unknown
/// merchant) are caller-input errors: they are logged at warn level and
/// skipped, leaving the targeted account unchanged.
#[derive(Debug, Default)]
pub struct ReplayEngine {
    store: AccountStore,
}

impl ReplayEngine {
    /// Creates an engine over an empty account directory.
    pub fn new() -> Self {
        ReplayEngine {
            store: AccountStore::new(),
        }
    }

    /// The underlying account directory.
    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    /// Processes operation records from a CSV reader in streaming fashion.
    ///
    /// Accounts are created lazily on first reference.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<OperationRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => match record.parse() {
                    Some(op) => {
                        let outcome = self
                            .store
                            .get_or_create(op.account, |account| apply(account, op.kind));

                        match outcome {
                            Ok(()) => debug!("Row {}: applied {:?}", row_num, op.kind),
                            Err(e) => warn!("Row {}: operation rejected: {}", row_num, e),
                        }
                    }
                    None => warn!("Row {}: failed to parse operation record", row_num),
                },
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Writes each account's statement, in account ID order.
    pub fn write_statements<W: Write>(&self, mut writer: W) -> Result<()> {
        for account in self.store.snapshot() {
            writeln!(writer, "Account: {}", account.id)?;
            writeln!(writer, "{}", account.statement()?)?;
            writeln!(writer)?;
        }

        Ok(())
    }
}

/// Dispatches a parsed request to the matching account operation.
fn apply(account: &mut Account, kind: OpKind) -> std::result::Result<(), LedgerError> {
    match kind {
        OpKind::Load(amount) => account.load(amount),
        OpKind::Authorize {
            merchant_id,
            amount,
        } => account.authorize(merchant_id, amount),
        OpKind::Capture {
            merchant_id,
            amount,
        } => account.capture(merchant_id, amount),
        OpKind::Reverse {
            merchant_id,
            amount,
        } => account.reverse(merchant_id, amount),
        OpKind::Refund {
            merchant_id,
            amount,
        } => account.refund(merchant_id, amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Amount;
    use std::io::Cursor;

    fn amt(s: &str) -> Amount {
        s.parse().unwrap()
    }

    fn replay(csv: &str) -> ReplayEngine {
        let mut engine = ReplayEngine::new();
        engine.process_csv(Cursor::new(csv)).unwrap();
        engine
    }

    fn account(engine: &ReplayEngine, id: u32) -> Account {
        engine
            .store()
            .snapshot()
            .into_iter()
            .find(|a| a.id == id)
            .unwrap()
    }

    #[test]
    fn test_replay_full_flow() {
        let csv = "\
type,account,merchant,amount
load,1,,112.34
authorize,1,1,25.33
authorize,1,1,5
";

        let engine = replay(csv);
        let account = account(&engine, 1);

        assert_eq!(account.available, amt("82.01"));
        assert_eq!(account.blocked, amt("30.33"));
        assert_eq!(account.transactions.len(), 3);
    }

    #[test]
    fn test_rejected_operations_are_skipped() {
        let csv = "\
type,account,merchant,amount
load,1,,10
authorize,1,1,2
capture,1,2,1
capture,1,1,5
capture,1,1,1
";

        // Row 4 targets an unknown merchant, row 5 exceeds the hold; both
        // are skipped without touching the account.
        let engine = replay(csv);
        let account = account(&engine, 1);

        assert_eq!(account.available, amt("8"));
        assert_eq!(account.blocked, amt("1"));
        assert_eq!(account.merchants[&1].captured, amt("1"));
        assert_eq!(account.transactions.len(), 3);
    }

    #[test]
    fn test_invalid_rows_are_skipped() {
        let csv = "\
type,account,merchant,amount
load,1,,10
chargeback,1,1,5
load,not-a-number,,5
load,1,,oops
load,1,,5
";

        let engine = replay(csv);
        let account = account(&engine, 1);

        assert_eq!(account.available, amt("15"));
        assert_eq!(account.transactions.len(), 2);
    }

    #[test]
    fn test_accounts_are_independent() {
        let csv = "\
type,account,merchant,amount
load,2,,20
load,1,,10
authorize,2,9,5
";

        let engine = replay(csv);

        assert_eq!(account(&engine, 1).available, amt("10"));
        assert_eq!(account(&engine, 2).available, amt("15"));
        assert_eq!(account(&engine, 2).blocked, amt("5"));
    }

    #[test]
    fn test_write_statements_in_id_order() {
        let csv = "\
type,account,merchant,amount
load,2,,20
load,1,,10
";

        let engine = replay(csv);
        let mut output = Vec::new();
        engine.write_statements(&mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let first = output.find("Account: 1").unwrap();
        let second = output.find("Account: 2").unwrap();

        assert!(first < second);
        assert!(output.contains(" 0      | LOAD      |          |     10.00"));
    }
}
