//! Parsing of saved brokerage API responses.
//!
//! Each account is backed by a directory with `positions.json`, `transactions.json` and
//! `balance.json` files which hold the raw API payloads. The feeds are known to be flaky and
//! incomplete, so a malformed record is logged and skipped instead of failing the whole feed,
//! and a missing feed degrades to an empty one at the account level.

pub mod balance;
pub mod positions;
pub mod transactions;

pub use self::balance::AccountBalance;
pub use self::positions::{Position, PositionsFeed};
pub use self::transactions::{TransactionEvent, TransactionKind, TransactionsFeed};

pub const POSITIONS_FEED: &str = "positions.json";
pub const TRANSACTIONS_FEED: &str = "transactions.json";
pub const BALANCE_FEED: &str = "balance.json";
