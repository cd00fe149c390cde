use std::path::Path;

use log::{debug, warn};
use rayon::prelude::*;

use crate::config::{AccountConfig, Config};
use crate::feeds::{self, AccountBalance};
use crate::ledger::PortfolioLedger;

pub struct Account {
    pub name: String,
    pub description: Option<String>,
    pub balance: Option<AccountBalance>,
    pub ledger: PortfolioLedger,
    pub skipped_positions: usize,
    pub skipped_transactions: usize,
}

impl Account {
    /// Loads the account from its feed directory and reconciles the feeds.
    ///
    /// The feeds are known to be flaky, so a failure to load any of them degrades the result
    /// instead of propagating: one broken account must not block reporting for its siblings.
    pub fn load(config: &AccountConfig) -> Account {
        let path = Path::new(&config.data);

        let (positions, skipped_positions) = match feeds::positions::read(
            &path.join(feeds::POSITIONS_FEED),
        ) {
            Ok(feed) => (feed.positions, feed.skipped),
            Err(e) => {
                warn!("{:?} account: {}. Assuming it has no open positions.", config.name, e);
                (Vec::new(), 0)
            },
        };

        // There is nothing to associate the history with when the positions feed is unavailable
        let (transactions, skipped_transactions) = if positions.is_empty() {
            (Vec::new(), 0)
        } else {
            match feeds::transactions::read(&path.join(feeds::TRANSACTIONS_FEED)) {
                Ok(feed) => (feed.transactions, feed.skipped),
                Err(e) => {
                    warn!("{:?} account: {}. Assuming it has no transaction history.",
                          config.name, e);
                    (Vec::new(), 0)
                },
            }
        };

        let balance = match feeds::balance::read(&path.join(feeds::BALANCE_FEED)) {
            Ok(balance) => Some(balance),
            Err(e) => {
                warn!("{:?} account: {}. Its balance won't be shown in the report.",
                      config.name, e);
                None
            },
        };

        let ledger = PortfolioLedger::reconcile(positions, transactions);
        if ledger.orphan_transactions() != 0 {
            debug!("{:?} account: {} of its transactions have no matching open position.",
                   config.name, ledger.orphan_transactions());
        }

        Account {
            name: config.name.clone(),
            description: config.description.clone(),
            balance,
            ledger,
            skipped_positions,
            skipped_transactions,
        }
    }

    pub fn load_all(config: &Config) -> Vec<Account> {
        config.accounts.par_iter().map(Account::load).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_feeds() {
        let account = Account::load(&AccountConfig {
            name: s!("individual"),
            description: None,
            data: s!("/nonexistent/holdings/data"),
        });

        assert!(account.ledger.is_empty());
        assert!(account.balance.is_none());
        assert_eq!(account.skipped_positions, 0);
        assert_eq!(account.skipped_transactions, 0);
    }
}
