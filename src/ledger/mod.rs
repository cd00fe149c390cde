//! Reconciliation of position and transaction feeds into per-symbol holdings.

use std::collections::HashMap;

use log::debug;

use crate::feeds::{Position, TransactionEvent};

mod holding;
mod maturity;

pub use self::holding::{HoldLot, Holding};
pub use self::maturity::HoldingPeriod;

/// Mapping from symbol to its holding, rebuilt from scratch on each run: the feeds are
/// independent snapshots, so there is nothing to patch incrementally.
pub struct PortfolioLedger {
    holdings: HashMap<String, Holding>,
    orphan_transactions: usize,
}

impl PortfolioLedger {
    /// Reconciles the position and transaction feeds of one account.
    ///
    /// Positions create the holdings. Each transaction of a reconcilable kind is associated
    /// with the holding of its display symbol. An event for a symbol with no open position
    /// can't affect the portfolio, so it's dropped, leaving only a diagnostic counter behind.
    pub fn reconcile(
        positions: Vec<Position>, transactions: Vec<TransactionEvent>,
    ) -> PortfolioLedger {
        let mut ledger = PortfolioLedger {
            holdings: HashMap::new(),
            orphan_transactions: 0,
        };

        for position in positions {
            ledger.add_position(position);
        }

        for transaction in transactions {
            ledger.add_transaction(transaction);
        }

        ledger
    }

    fn add_position(&mut self, position: Position) {
        match self.holdings.get_mut(&position.symbol) {
            Some(holding) => holding.add_position(position),
            None => {
                self.holdings.insert(position.symbol.clone(), Holding::new(position));
            },
        }
    }

    fn add_transaction(&mut self, transaction: TransactionEvent) {
        if !transaction.kind.is_reconcilable() {
            return;
        }

        match self.holdings.get_mut(&transaction.display_symbol) {
            Some(holding) => holding.add_transaction(transaction),
            None => {
                debug!("Dropping {:?} transaction: there is no open position for it.",
                       transaction.display_symbol);
                self.orphan_transactions += 1;
            },
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&Holding> {
        self.holdings.get(symbol)
    }

    pub fn holdings(&self) -> impl Iterator<Item = &Holding> + '_ {
        self.holdings.values()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn orphan_transactions(&self) -> usize {
        self.orphan_transactions
    }
}
