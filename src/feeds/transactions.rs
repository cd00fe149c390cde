use std::fs;
use std::path::Path;

use log::warn;
use serde::Deserialize;
use serde::de::Deserializer;
use serde_json::Value;
use strum::EnumString;

use crate::core::GenericResult;
use crate::time;
use crate::types::{Date, DateTime, Decimal};
use crate::util::{self, DecimalRestrictions};

#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
pub enum TransactionKind {
    Adjustment,
    Bought,
    Deposit,
    Dividend,
    Fee,
    Interest,
    Sold,
    Transfer,
    Withdrawal,
    #[strum(default)]
    Other(String),
}

impl TransactionKind {
    pub fn from_tag(tag: &str) -> TransactionKind {
        tag.parse().unwrap_or_else(|_| TransactionKind::Other(tag.to_owned()))
    }

    /// Returns whether the event may be associated with an open position during reconciliation.
    ///
    /// Deposits are cash movements and sells never start a holding period, so neither of them
    /// affects sale eligibility of the current holdings.
    pub fn is_reconcilable(&self) -> bool {
        !matches!(self, TransactionKind::Deposit | TransactionKind::Sold)
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    fn deserialize<D>(deserializer: D) -> Result<TransactionKind, D::Error>
        where D: Deserializer<'de>
    {
        let tag = String::deserialize(deserializer)?;
        Ok(TransactionKind::from_tag(&tag))
    }
}

/// An account activity event from the transactions history.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEvent {
    pub symbol: String,
    pub display_symbol: String,
    pub security_type: String,
    pub kind: TransactionKind,
    pub executed_at: DateTime,
    pub quantity: Decimal,
    pub price: Decimal,
    pub amount: Decimal,
    pub description: String,
}

impl TransactionEvent {
    pub fn execution_date(&self) -> Date {
        self.executed_at.date()
    }
}

pub struct TransactionsFeed {
    pub transactions: Vec<TransactionEvent>,
    pub skipped: usize,
}

pub fn read(path: &Path) -> GenericResult<TransactionsFeed> {
    let data = fs::read(path).map_err(|e| format!("Error while reading {:?}: {}", path, e))?;
    parse(&data).map_err(|e| format!("Error while parsing {:?}: {}", path, e).into())
}

fn parse(data: &[u8]) -> GenericResult<TransactionsFeed> {
    #[derive(Deserialize)]
    struct Response {
        #[serde(rename = "TransactionListResponse")]
        list: TransactionList,
    }

    #[derive(Deserialize)]
    struct TransactionList {
        #[serde(rename = "Transaction", default)]
        transactions: Vec<Value>,
    }

    let response: Response = serde_json::from_slice(data)?;

    let mut transactions = Vec::new();
    let mut skipped = 0;

    for record in response.list.transactions {
        // Deposits are cash movements and sells never start a holding period, so records of
        // these kinds are dropped before parsing and aren't subject to the malformed record
        // handling below.
        if let Some(tag) = record.get("transactionType").and_then(Value::as_str) {
            if !TransactionKind::from_tag(tag).is_reconcilable() {
                continue;
            }
        }

        match parse_transaction(&record) {
            Ok(transaction) => transactions.push(transaction),
            Err(e) => {
                let description = record.get("description").and_then(Value::as_str);
                match description {
                    Some(description) => warn!("Skipping {:?} transaction record: {}.", description, e),
                    None => warn!("Skipping a transaction record: {}.", e),
                }
                skipped += 1;
            },
        }
    }

    Ok(TransactionsFeed { transactions, skipped })
}

fn parse_transaction(record: &Value) -> GenericResult<TransactionEvent> {
    #[derive(Deserialize)]
    struct TransactionRecord {
        #[serde(rename = "transactionDate")]
        date: i64,
        amount: Decimal,
        #[serde(default)]
        description: String,
        #[serde(rename = "transactionType")]
        kind: TransactionKind,
        brokerage: Brokerage,
    }

    #[derive(Deserialize)]
    struct Brokerage {
        #[serde(rename = "displaySymbol", default)]
        display_symbol: String,
        quantity: Decimal,
        price: Decimal,
        product: Product,
    }

    #[derive(Deserialize)]
    struct Product {
        #[serde(default)]
        symbol: String,
        #[serde(rename = "securityType", default)]
        security_type: String,
    }

    let record: TransactionRecord = serde_json::from_value(record.clone())?;
    let brokerage = record.brokerage;

    Ok(TransactionEvent {
        symbol: brokerage.product.symbol,
        display_symbol: brokerage.display_symbol,
        security_type: brokerage.product.security_type,
        kind: record.kind,
        executed_at: time::from_timestamp_ms(record.date)?,
        quantity: brokerage.quantity,
        price: util::validate_named_decimal(
            "transaction price", brokerage.price, DecimalRestrictions::PositiveOrZero)?,
        amount: record.amount,
        description: record.description,
    })
}
