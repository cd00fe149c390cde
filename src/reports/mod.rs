//! Terminal reports over the reconciled accounts.

use crate::accounts::Account;
use crate::config::Config;
use crate::core::{EmptyResult, GenericResult};
use crate::formatting::{self, table::{print_table, Cell, Row, Table}};
use crate::ledger::{HoldLot, HoldingPeriod};
use crate::types::{Date, Decimal};

pub mod projections;

use self::projections::{MustHoldRow, OverviewRow, SellableRow};

/// The full digest: account summary and per-account holding monitor with liquidation candidates.
pub fn report(config: &Config, account: Option<&str>, today: Date) -> EmptyResult {
    let accounts = load_accounts(config, account)?;
    let period = HoldingPeriod::new(config.holding_period);

    print_summary(&accounts);

    for account in &accounts {
        print_account_report(account, period, today);
    }

    Ok(())
}

/// All holdings of the selected accounts with their locked and sellable parts.
pub fn show(config: &Config, account: Option<&str>, today: Date) -> EmptyResult {
    let accounts = load_accounts(config, account)?;
    let period = HoldingPeriod::new(config.holding_period);

    for account in &accounts {
        let rows = projections::overview(&account.ledger, period, today);
        if rows.is_empty() {
            println!();
            println!("{} has no open positions.", formatting::colorify_name(&account.name));
            continue;
        }

        print_overview_table(&account.name, &rows);
    }

    Ok(())
}

/// Holdings locked by the holding period with a detailed per-lot maturity schedule.
pub fn must_hold(config: &Config, account: Option<&str>, today: Date) -> EmptyResult {
    let accounts = load_accounts(config, account)?;
    let period = HoldingPeriod::new(config.holding_period);

    for account in &accounts {
        let rows = projections::must_hold(&account.ledger, period, today);
        if rows.is_empty() {
            println!();
            println!("{} has no locked holdings.", formatting::colorify_name(&account.name));
            continue;
        }

        println!();
        println!("{}", formatting::colorify_name(&account.name));
        print_must_hold_table("Must hold", &rows);

        for row in &rows {
            print_lots_table(&row.symbol, &row.lots);
        }
    }

    Ok(())
}

/// Fully sellable holdings partitioned into winners and losers.
pub fn sellable(config: &Config, account: Option<&str>, today: Date) -> EmptyResult {
    let accounts = load_accounts(config, account)?;
    let period = HoldingPeriod::new(config.holding_period);

    for account in &accounts {
        let winners = projections::sellable_winners(&account.ledger, period, today);
        let losers = projections::sellable_losers(&account.ledger, period, today);

        if winners.is_empty() && losers.is_empty() {
            println!();
            println!("{} has nothing sellable yet.", formatting::colorify_name(&account.name));
            continue;
        }

        println!();
        println!("{}", formatting::colorify_name(&account.name));
        print_liquidation(&winners, &losers);
    }

    Ok(())
}

fn load_accounts(config: &Config, name: Option<&str>) -> GenericResult<Vec<Account>> {
    Ok(match name {
        Some(name) => vec![Account::load(config.get_account(name)?)],
        None => Account::load_all(config),
    })
}

fn print_summary(accounts: &[Account]) {
    let mut table = Table::new();
    let mut total_assets = dec!(0);

    for account in accounts {
        let (buying_power, account_value) = match account.balance {
            Some(ref balance) => {
                total_assets += balance.total_value;
                (Cell::new_cash(balance.cash_buying_power), Cell::new_cash(balance.total_value))
            },
            None => (Cell::new_empty(), Cell::new_empty()),
        };

        table.add_row(Row::new(&[
            Cell::new(&account.name),
            Cell::new(account.description.as_deref().unwrap_or_default()),
            buying_power,
            account_value,
        ]));
    }

    print_table("Accounts", &["Account", "Description", "Buying power", "Account value"], table);

    println!();
    println!("{}: {}",
             formatting::colorify_name("Total assets"),
             formatting::format_cash_rounded(total_assets));
}

fn print_account_report(account: &Account, period: HoldingPeriod, today: Date) {
    let held = projections::must_hold(&account.ledger, period, today);
    let winners = projections::sellable_winners(&account.ledger, period, today);
    let losers = projections::sellable_losers(&account.ledger, period, today);

    if held.is_empty() && winners.is_empty() && losers.is_empty() {
        return;
    }

    println!();
    println!("{}", formatting::colorify_name(&account.name));

    if !held.is_empty() {
        print_must_hold_table("Must hold", &held);
    }

    print_liquidation(&winners, &losers);
}

fn print_liquidation(winners: &[SellableRow], losers: &[SellableRow]) {
    if !winners.is_empty() {
        println!();
        println!("{}: {}",
                 formatting::colorify_name("Total gain"),
                 formatting::colorify_gain(projections::total_gain(winners)));
        print_sellable_table("Sellable winners", winners);
    }

    if !losers.is_empty() {
        println!();
        println!("{}: {}",
                 formatting::colorify_name("Total loss"),
                 formatting::colorify_gain(projections::total_gain(losers)));
        print_sellable_table("Sellable losers", losers);
    }
}

fn print_overview_table(name: &str, rows: &[OverviewRow]) {
    let mut table = Table::new();

    for row in rows {
        table.add_row(Row::new(&[
            Cell::new(&row.symbol),
            Cell::new_cash(row.price),
            Cell::new_cash(row.price_paid),
            Cell::new_gain(row.total_gain),
            new_optional_ratio(row.percent_gain),
            Cell::new_quantity(row.held_quantity),
            Cell::new_quantity(row.sellable_quantity),
            match row.next_sell_date {
                Some(date) => Cell::new_date(date),
                None => Cell::new_empty(),
            },
            Cell::new_ratio(row.portfolio_weight),
        ]));
    }

    print_table(name, &[
        "Symbol", "Price", "Paid", "Total gain", "% Gain", "Must hold", "Sellable", "Sell date",
        "% Portfolio",
    ], table);
}

fn print_must_hold_table(name: &str, rows: &[MustHoldRow]) {
    let mut table = Table::new();

    for row in rows {
        table.add_row(Row::new(&[
            Cell::new(&row.symbol),
            Cell::new_cash(row.price),
            Cell::new_gain(row.total_gain),
            Cell::new_gain(row.held_gain),
            new_optional_ratio(row.percent_gain),
            Cell::new_quantity(row.held_quantity),
            Cell::new_quantity(row.sellable_quantity),
            Cell::new_date(row.next_sell_date),
            Cell::new_days(row.days_remaining),
            Cell::new_ratio(row.portfolio_weight),
        ]));
    }

    print_table(name, &[
        "Symbol", "Price", "Total gain", "Held gain", "% Gain", "Must hold", "Sellable",
        "Sell date", "Days left", "% Portfolio",
    ], table);
}

fn print_lots_table(name: &str, lots: &[HoldLot]) {
    let mut table = Table::new();

    for lot in lots {
        table.add_row(Row::new(&[
            Cell::new_quantity(lot.quantity),
            Cell::new_date(lot.purchased),
            Cell::new_date(lot.matures),
            Cell::new_days(lot.days_remaining),
        ]));
    }

    print_table(name, &["Quantity", "Purchased", "Matures", "Days left"], table);
}

fn print_sellable_table(name: &str, rows: &[SellableRow]) {
    let mut table = Table::new();

    for row in rows {
        table.add_row(Row::new(&[
            Cell::new(&row.symbol),
            Cell::new_cash(row.price),
            Cell::new_gain(row.gain),
            new_optional_ratio(row.percent_gain),
            Cell::new_quantity(row.quantity),
            Cell::new_ratio(row.portfolio_weight),
        ]));
    }

    print_table(name, &[
        "Symbol", "Price", "Gain", "% Gain", "Quantity", "% Portfolio",
    ], table);
}

fn new_optional_ratio(ratio: Option<Decimal>) -> Cell {
    match ratio {
        Some(ratio) => Cell::new_ratio(ratio),
        None => Cell::new_empty(),
    }
}

#[cfg(test)]
mod tests {
    use crate::feeds::{AccountBalance, Position, TransactionEvent, TransactionKind};
    use crate::ledger::PortfolioLedger;
    use super::*;

    #[test]
    fn empty_configuration() {
        let today = date!(2021, 5, 10);
        let config = Config::mock();

        report(&config, None, today).unwrap();
        show(&config, None, today).unwrap();

        assert!(report(&config, Some("individual"), today).is_err());
    }

    #[test]
    fn rendering() {
        let period = HoldingPeriod::new(31);
        let today = date!(2021, 5, 10);
        let account = new_account();

        print_summary(std::slice::from_ref(&account));
        print_account_report(&account, period, today);

        let rows = projections::overview(&account.ledger, period, today);
        print_overview_table(&account.name, &rows);

        for row in &projections::must_hold(&account.ledger, period, today) {
            print_lots_table(&row.symbol, &row.lots);
        }
    }

    fn new_account() -> Account {
        let positions = vec![
            new_position("AAPL", dec!(100), dec!(500), dec!(15500)),
            new_position("BND", dec!(10.5), dec!(-15.33), dec!(762.72)),
            new_position("VTI", dec!(5), dec!(150), dec!(1400)),
            new_position("GLD", dec!(2), dec!(180), dec!(180)),
        ];

        let transactions = vec![TransactionEvent {
            symbol: s!("AAPL"),
            display_symbol: s!("AAPL"),
            security_type: s!("EQ"),
            kind: TransactionKind::Bought,
            executed_at: date!(2021, 4, 30).and_hms_opt(14, 30, 0).unwrap(),
            quantity: dec!(40),
            price: dec!(155),
            amount: dec!(-6200),
            description: s!("BOUGHT 40 SHARES OF AAPL"),
        }];

        Account {
            name: s!("individual"),
            description: Some(s!("Individual Brokerage")),
            balance: Some(AccountBalance {
                total_value: dec!(43521.74),
                cash_buying_power: dec!(2210.38),
            }),
            ledger: PortfolioLedger::reconcile(positions, transactions),
            skipped_positions: 0,
            skipped_transactions: 0,
        }
    }

    fn new_position(
        symbol: &str, quantity: Decimal, total_gain: Decimal, market_value: Decimal,
    ) -> Position {
        Position {
            symbol: s!(symbol),
            quantity,
            last_trade: dec!(155),
            price_paid: dec!(150),
            total_gain,
            market_value,
            portfolio_weight: dec!(10),
        }
    }
}
