//! Statement rendering fixtures, byte-exact.

use card_ledger::{Account, Amount};

fn amt(s: &str) -> Amount {
    s.parse().unwrap()
}

#[test]
fn statement_renders_full_history() {
    let mut account = Account::new(0);

    account.load(amt("915.75")).unwrap();
    account.authorize(1, amt("15.00")).unwrap();
    account.capture(1, amt("5")).unwrap();
    account.capture(1, amt("5")).unwrap();
    account.reverse(1, amt("2.5")).unwrap();
    account.refund(1, amt("10")).unwrap();
    account.capture(1, amt("2.5")).unwrap();

    let expected = r#"Available:                           913.25
Blocked:                               0.00
Total:                               913.25

-------------------------------------------
 ID     | Type      | Merchant | Amount
-------------------------------------------
 0      | LOAD      |          |    915.75
 1      | AUTHORIZE | 1        |     15.00
 2      | CAPTURE   | 1        |      5.00
 3      | CAPTURE   | 1        |      5.00
 4      | REVERSE   | 1        |      2.50
 5      | REFUND    | 1        |     10.00
 6      | CAPTURE   | 1        |      2.50
-------------------------------------------"#;

    assert_eq!(account.statement().unwrap().to_string(), expected);
}

#[test]
fn statement_without_transactions_renders_placeholder() {
    let account = Account::new(0);

    let expected = r#"Available:                             0.00
Blocked:                               0.00
Total:                                 0.00

-------------------------------------------
 ID     | Type      | Merchant | Amount
-------------------------------------------
          *** NO TRANSACTIONS ***"#;

    assert_eq!(account.statement().unwrap().to_string(), expected);
}
