//! Integration tests for the card-ledger CLI.
//!
//! These tests run the actual binary against temporary operation files and
//! verify the rendered statements.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Run the binary on the given CSV content and return stdout.
fn run_replay(csv: &str) -> String {
    let dir = tempdir().unwrap();
    let path = dir.path().join("operations.csv");
    fs::write(&path, csv).unwrap();

    let mut cmd = Command::cargo_bin("card-ledger").unwrap();
    let assert = cmd.arg(&path).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_statement_for_replayed_history() {
    let csv = "\
type,account,merchant,amount
load,1,,915.75
authorize,1,1,15.00
capture,1,1,5
capture,1,1,5
reverse,1,1,2.5
refund,1,1,10
capture,1,1,2.5
";

    let output = run_replay(csv);

    assert!(output.contains("Account: 1"));
    assert!(output.contains("Available:                           913.25"));
    assert!(output.contains("Blocked:                               0.00"));
    assert!(output.contains("Total:                               913.25"));
    assert!(output.contains(" 0      | LOAD      |          |    915.75"));
    assert!(output.contains(" 6      | CAPTURE   | 1        |      2.50"));
}

#[test]
fn test_statements_cover_all_accounts_in_order() {
    let csv = "\
type,account,merchant,amount
load,2,,20.00
load,1,,10.00
authorize,2,7,5.00
";

    let output = run_replay(csv);
    let first = output.find("Account: 1").unwrap();
    let second = output.find("Account: 2").unwrap();

    assert!(first < second);
    assert!(output.contains("Blocked:                               5.00"));
}

#[test]
fn test_rejected_rows_do_not_stop_the_replay() {
    let csv = "\
type,account,merchant,amount
load,1,,10.00
authorize,1,1,25.00
capture,1,9,1.00
load,1,,2.00
";

    let output = run_replay(csv);

    // The underflow and the unknown merchant are skipped; both loads apply.
    assert!(output.contains("Available:                            12.00"));
    assert!(output.contains(" 1      | LOAD      |          |      2.00"));
}

#[test]
fn test_account_without_transactions_renders_placeholder() {
    let csv = "\
type,account,merchant,amount
capture,3,1,1.00
";

    let output = run_replay(csv);

    assert!(output.contains("Account: 3"));
    assert!(output.contains("          *** NO TRANSACTIONS ***"));
}

#[test]
fn test_missing_file_error() {
    let mut cmd = Command::cargo_bin("card-ledger").unwrap();
    cmd.arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("card-ledger").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing input file"));
}
