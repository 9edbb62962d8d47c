//! Operation vocabulary, transaction log records and CSV request parsing.

use crate::decimal::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of ledger operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    /// Credit funds to the cardholder's available balance.
    Load,

    /// Place a hold against the available balance for a merchant.
    Authorize,

    /// Convert part of a merchant's hold into captured revenue.
    Capture,

    /// Cancel part of an unused hold, returning funds to the cardholder.
    Reverse,

    /// Return previously captured funds to the cardholder.
    Refund,
}

impl Operation {
    /// The operation's uppercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Load => "LOAD",
            Operation::Authorize => "AUTHORIZE",
            Operation::Capture => "CAPTURE",
            Operation::Reverse => "REVERSE",
            Operation::Refund => "REFUND",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` keeps width specifiers working in statement columns.
        f.pad(self.as_str())
    }
}

/// One entry in an account's append-only transaction log.
///
/// Records the amount named in the request, never a running balance. The
/// entry's position in the log is its stable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Operation that produced this entry
    #[serde(rename = "type")]
    pub operation: Operation,

    /// Merchant the operation targeted; `None` for loads
    #[serde(
        rename = "merchantID",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub merchant_id: Option<u32>,

    /// Requested amount
    pub amount: Amount,
}

impl Transaction {
    pub(crate) fn new(operation: Operation, merchant_id: Option<u32>, amount: Amount) -> Self {
        Transaction {
            operation,
            merchant_id,
            amount,
        }
    }
}

/// Raw operation record as read from a replay CSV.
///
/// The merchant column is empty for loads; amounts arrive as decimal text.
#[derive(Debug, Deserialize)]
pub struct OperationRecord {
    /// Operation name: load, authorize, capture, reverse, refund
    #[serde(rename = "type")]
    pub op_type: String,

    /// Account ID
    pub account: u32,

    /// Merchant ID (absent for load)
    pub merchant: Option<u32>,

    /// Amount as decimal text
    pub amount: Option<String>,
}

impl OperationRecord {
    /// Parses the raw CSV record into a typed request.
    ///
    /// Returns `None` if the record is invalid (unknown operation, missing
    /// merchant or amount, unparseable amount).
    pub fn parse(&self) -> Option<ParsedOperation> {
        let kind = match self.op_type.trim().to_lowercase().as_str() {
            "load" => OpKind::Load(self.parse_amount()?),
            "authorize" => OpKind::Authorize {
                merchant_id: self.merchant?,
                amount: self.parse_amount()?,
            },
            "capture" => OpKind::Capture {
                merchant_id: self.merchant?,
                amount: self.parse_amount()?,
            },
            "reverse" => OpKind::Reverse {
                merchant_id: self.merchant?,
                amount: self.parse_amount()?,
            },
            "refund" => OpKind::Refund {
                merchant_id: self.merchant?,
                amount: self.parse_amount()?,
            },
            _ => return None,
        };

        Some(ParsedOperation {
            account: self.account,
            kind,
        })
    }

    /// Parses the amount field into an [`Amount`].
    fn parse_amount(&self) -> Option<Amount> {
        let amount = self.amount.as_deref()?.trim();
        if amount.is_empty() {
            return None;
        }
        Amount::from_str(amount).ok()
    }
}

/// A parsed request ready for dispatch against an account.
#[derive(Debug, Clone, Copy)]
pub struct ParsedOperation {
    /// Target account ID
    pub account: u32,

    /// Request variant with its payload
    pub kind: OpKind,
}

/// Request variants with their payloads.
#[derive(Debug, Clone, Copy)]
pub enum OpKind {
    /// Credit funds to the cardholder's available balance.
    Load(Amount),

    /// Hold funds for a merchant.
    Authorize { merchant_id: u32, amount: Amount },

    /// Convert part of a merchant's hold into captured revenue.
    Capture { merchant_id: u32, amount: Amount },

    /// Cancel part of an unused hold.
    Reverse { merchant_id: u32, amount: Amount },

    /// Return captured funds to the cardholder.
    Refund { merchant_id: u32, amount: Amount },
}
