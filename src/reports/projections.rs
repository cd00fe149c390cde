//! Read-only views over a reconciled ledger.
//!
//! All projections are evaluated against the date passed by the caller, so the same ledger may
//! be projected for different dates without re-reconciliation, and repeated calls don't observe
//! any mutation. Monetary amounts are rounded to cents here, while the source holdings keep the
//! full precision. Relative values (percent gain, portfolio weight) are fractions.

use std::cmp::Ordering;

use itertools::Itertools;

use crate::ledger::{HoldLot, Holding, HoldingPeriod, PortfolioLedger};
use crate::types::{Date, Decimal};
use crate::util;

/// One holding with its locked and sellable parts, regardless of the bucket it falls into.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewRow {
    pub symbol: String,
    pub price: Decimal,
    pub price_paid: Decimal,
    pub total_gain: Decimal,
    pub percent_gain: Option<Decimal>,
    pub held_quantity: Decimal,
    pub sellable_quantity: Decimal,
    pub next_sell_date: Option<Date>,
    pub portfolio_weight: Decimal,
}

/// A holding with at least one lot which hasn't matured yet.
#[derive(Debug, Clone, PartialEq)]
pub struct MustHoldRow {
    pub symbol: String,
    pub price: Decimal,
    pub total_gain: Decimal,
    pub held_gain: Decimal,
    pub percent_gain: Option<Decimal>,
    pub held_quantity: Decimal,
    pub sellable_quantity: Decimal,
    pub next_sell_date: Date,
    pub days_remaining: u32,
    pub portfolio_weight: Decimal,
    pub lots: Vec<HoldLot>,
}

/// A holding with no locked lots left, so the whole quantity may be sold.
#[derive(Debug, Clone, PartialEq)]
pub struct SellableRow {
    pub symbol: String,
    pub price: Decimal,
    pub gain: Decimal,
    pub percent_gain: Option<Decimal>,
    pub quantity: Decimal,
    pub portfolio_weight: Decimal,
}

pub fn overview(ledger: &PortfolioLedger, period: HoldingPeriod, today: Date) -> Vec<OverviewRow> {
    ledger.holdings().map(|holding| {
        OverviewRow {
            symbol: holding.symbol().to_owned(),
            price: util::round(holding.last_trade_price()),
            price_paid: util::round(holding.cost_basis_price()),
            total_gain: util::round(holding.total_gain()),
            percent_gain: holding.percent_gain(),
            held_quantity: holding.held_quantity(period, today),
            sellable_quantity: holding.sellable_quantity(period, today),
            next_sell_date: holding.next_maturity(period, today).map(|lot| lot.matures),
            portfolio_weight: portfolio_weight(holding),
        }
    }).sorted_by(|a, b| rank(a.total_gain, b.total_gain, &a.symbol, &b.symbol)).collect()
}

pub fn must_hold(ledger: &PortfolioLedger, period: HoldingPeriod, today: Date) -> Vec<MustHoldRow> {
    ledger.holdings().filter_map(|holding| {
        let lots: Vec<HoldLot> = holding.hold_lots(period, today).collect();
        let next = lots.iter().min_by_key(|lot| lot.matures)?.clone();
        let (held_gain, _sellable_gain) = holding.attributed_gain(period, today);

        Some(MustHoldRow {
            symbol: holding.symbol().to_owned(),
            price: util::round(holding.last_trade_price()),
            total_gain: util::round(holding.total_gain()),
            held_gain: util::round(held_gain),
            percent_gain: holding.percent_gain(),
            held_quantity: lots.iter().map(|lot| lot.quantity).sum(),
            sellable_quantity: holding.sellable_quantity(period, today),
            next_sell_date: next.matures,
            days_remaining: next.days_remaining,
            portfolio_weight: portfolio_weight(holding),
            lots,
        })
    }).sorted_by(|a, b| rank(a.total_gain, b.total_gain, &a.symbol, &b.symbol)).collect()
}

/// Fully sellable holdings with a non-negative gain, the biggest gain first.
pub fn sellable_winners(
    ledger: &PortfolioLedger, period: HoldingPeriod, today: Date,
) -> Vec<SellableRow> {
    sellable(ledger, period, today)
        .filter(|row| row.gain >= dec!(0))
        .sorted_by(|a, b| rank(b.gain, a.gain, &a.symbol, &b.symbol))
        .collect()
}

/// Fully sellable holdings with a negative gain, the biggest loss first.
pub fn sellable_losers(
    ledger: &PortfolioLedger, period: HoldingPeriod, today: Date,
) -> Vec<SellableRow> {
    sellable(ledger, period, today)
        .filter(|row| row.gain < dec!(0))
        .sorted_by(|a, b| rank(a.gain, b.gain, &a.symbol, &b.symbol))
        .collect()
}

pub fn total_gain(rows: &[SellableRow]) -> Decimal {
    rows.iter().map(|row| row.gain).sum()
}

fn sellable(
    ledger: &PortfolioLedger, period: HoldingPeriod, today: Date,
) -> impl Iterator<Item = SellableRow> + '_ {
    ledger.holdings().filter_map(move |holding| {
        if holding.hold_lots(period, today).next().is_some() {
            return None;
        }

        Some(SellableRow {
            symbol: holding.symbol().to_owned(),
            price: util::round(holding.last_trade_price()),
            gain: util::round(holding.total_gain()),
            percent_gain: holding.percent_gain(),
            quantity: holding.quantity(),
            portfolio_weight: portfolio_weight(holding),
        })
    })
}

// The feed provides portfolio weights as percent values, but all ratios in the rows are fractions
fn portfolio_weight(holding: &Holding) -> Decimal {
    holding.portfolio_weight() / dec!(100)
}

fn rank(first: Decimal, second: Decimal, first_symbol: &str, second_symbol: &str) -> Ordering {
    first.cmp(&second).then_with(|| first_symbol.cmp(second_symbol))
}
