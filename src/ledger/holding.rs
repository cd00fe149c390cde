use crate::feeds::{Position, TransactionEvent};
use crate::types::{Date, Decimal};

use super::maturity::HoldingPeriod;

/// Per-symbol aggregate of the open position and the account activity associated with it.
///
/// A holding always has at least one associated position: it's created by the first position
/// record for its symbol. All quantities here are derived on demand from the associated records,
/// so there is no cached state to become stale between the reconciliation and the reports.
pub struct Holding {
    symbol: String,
    positions: Vec<Position>,
    transactions: Vec<TransactionEvent>,
}

/// A purchase that hasn't matured yet with the quantity it locks.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldLot {
    pub quantity: Decimal,
    pub purchased: Date,
    pub matures: Date,
    pub days_remaining: u32,
}

impl Holding {
    pub(super) fn new(position: Position) -> Holding {
        Holding {
            symbol: position.symbol.clone(),
            positions: vec![position],
            transactions: Vec::new(),
        }
    }

    pub(super) fn add_position(&mut self, position: Position) {
        self.positions.push(position);
    }

    pub(super) fn add_transaction(&mut self, transaction: TransactionEvent) {
        self.transactions.push(transaction);
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn transactions(&self) -> &[TransactionEvent] {
        &self.transactions
    }

    pub fn quantity(&self) -> Decimal {
        self.positions.iter().map(|position| position.quantity).sum()
    }

    pub fn market_value(&self) -> Decimal {
        self.positions.iter().map(|position| position.market_value).sum()
    }

    pub fn total_gain(&self) -> Decimal {
        self.positions.iter().map(|position| position.total_gain).sum()
    }

    pub fn portfolio_weight(&self) -> Decimal {
        self.positions.iter().map(|position| position.portfolio_weight).sum()
    }

    pub fn last_trade_price(&self) -> Decimal {
        self.positions.last().unwrap().last_trade
    }

    /// Returns the quantity-weighted average purchase price of the holding.
    pub fn cost_basis_price(&self) -> Decimal {
        let quantity = self.quantity();
        if quantity.is_zero() {
            return self.positions.last().unwrap().price_paid;
        }

        let cost: Decimal = self.positions.iter()
            .map(|position| position.price_paid * position.quantity).sum();

        cost / quantity
    }

    /// Returns the relative gain of the holding or `None` when its cost basis is zero, which
    /// makes the value undefined.
    pub fn percent_gain(&self) -> Option<Decimal> {
        let market_value = self.market_value();
        let cost_basis = market_value - self.total_gain();

        if cost_basis.is_zero() {
            return None;
        }

        Some(market_value / cost_basis - dec!(1))
    }

    /// Returns the purchase lots that can't be sold yet as of the specified date.
    ///
    /// Eligibility is recomputed on every call, so a lot that matures between two reads changes
    /// bucket without re-reconciliation. Associated events that don't deliver any shares
    /// (dividends, fees, adjustments to zero) carry no lot.
    pub fn hold_lots(&self, period: HoldingPeriod, today: Date) -> impl Iterator<Item = HoldLot> + '_ {
        self.transactions.iter().filter_map(move |transaction| {
            let purchased = transaction.execution_date();

            if transaction.quantity <= dec!(0) || period.is_eligible(purchased, today) {
                return None;
            }

            Some(HoldLot {
                quantity: transaction.quantity,
                purchased,
                matures: period.maturity_date(purchased),
                days_remaining: period.days_remaining(purchased, today),
            })
        })
    }

    pub fn held_quantity(&self, period: HoldingPeriod, today: Date) -> Decimal {
        self.hold_lots(period, today).map(|lot| lot.quantity).sum()
    }

    /// Returns the quantity that may be sold right now. It's always derived from the current
    /// lot state, so it never gets stale when a lot matures after the reconciliation.
    pub fn sellable_quantity(&self, period: HoldingPeriod, today: Date) -> Decimal {
        self.quantity() - self.held_quantity(period, today)
    }

    /// Returns the lot which will mature first, if any.
    pub fn next_maturity(&self, period: HoldingPeriod, today: Date) -> Option<HoldLot> {
        self.hold_lots(period, today).min_by_key(|lot| lot.matures)
    }

    /// Returns the share of the holding attributed to the locked lots.
    ///
    /// The split assumes a uniform per-share gain across all lots, so it's an approximation
    /// rather than a cost basis calculation. When there is no quantity to attribute, the whole
    /// holding is considered locked.
    pub fn hold_ratio(&self, period: HoldingPeriod, today: Date) -> Decimal {
        let quantity = self.quantity();
        if quantity.is_zero() {
            return dec!(1);
        }
        self.held_quantity(period, today) / quantity
    }

    /// Splits the total gain into (must hold, sellable) parts using [`Holding::hold_ratio`].
    pub fn attributed_gain(&self, period: HoldingPeriod, today: Date) -> (Decimal, Decimal) {
        let total_gain = self.total_gain();
        let held_gain = total_gain * self.hold_ratio(period, today);
        (held_gain, total_gain - held_gain)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use crate::feeds::TransactionKind;
    use super::*;

    #[test]
    fn derived_quantities() {
        let period = HoldingPeriod::new(31);
        let today = date!(2021, 5, 10);

        let mut holding = Holding::new(new_position(dec!(100), dec!(150), dec!(500), dec!(15500)));
        holding.add_transaction(new_transaction(
            TransactionKind::Bought, dec!(40), date!(2021, 4, 30)));

        assert_eq!(holding.quantity(), dec!(100));
        assert_eq!(holding.held_quantity(period, today), dec!(40));
        assert_eq!(holding.sellable_quantity(period, today), dec!(60));

        let lots: Vec<HoldLot> = holding.hold_lots(period, today).collect();
        assert_eq!(lots, vec![HoldLot {
            quantity: dec!(40),
            purchased: date!(2021, 4, 30),
            matures: date!(2021, 5, 31),
            days_remaining: 21,
        }]);

        assert_eq!(holding.attributed_gain(period, today), (dec!(200), dec!(300)));
        assert_eq!(holding.percent_gain(), Some(dec!(15500) / dec!(15000) - dec!(1)));
    }

    #[test]
    fn quantity_conservation() {
        let period = HoldingPeriod::new(31);

        let mut holding = Holding::new(new_position(dec!(100), dec!(150), dec!(500), dec!(15500)));
        holding.add_transaction(new_transaction(
            TransactionKind::Bought, dec!(40), date!(2021, 4, 30)));
        holding.add_transaction(new_transaction(
            TransactionKind::Bought, dec!(25), date!(2021, 5, 14)));
        holding.add_transaction(new_transaction(
            TransactionKind::Dividend, dec!(0), date!(2021, 5, 1)));

        for offset in 0..80 {
            let today = date!(2021, 4, 30) + Duration::days(offset);
            let held = holding.held_quantity(period, today);
            let sellable = holding.sellable_quantity(period, today);
            assert_eq!(sellable + held, dec!(100));
        }
    }

    #[test]
    fn lot_filtering() {
        let period = HoldingPeriod::new(31);
        let today = date!(2021, 5, 10);

        let mut holding = Holding::new(new_position(dec!(100), dec!(150), dec!(500), dec!(15500)));

        // Neither matured lots, nor events that don't deliver shares are locked
        holding.add_transaction(new_transaction(
            TransactionKind::Bought, dec!(30), date!(2021, 1, 11)));
        holding.add_transaction(new_transaction(
            TransactionKind::Dividend, dec!(0), date!(2021, 5, 1)));
        holding.add_transaction(new_transaction(
            TransactionKind::Adjustment, dec!(-5), date!(2021, 5, 3)));

        assert_eq!(holding.hold_lots(period, today).count(), 0);
        assert_eq!(holding.sellable_quantity(period, today), dec!(100));
        assert_eq!(holding.next_maturity(period, today), None);

        holding.add_transaction(new_transaction(
            TransactionKind::Bought, dec!(15), date!(2021, 5, 5)));
        holding.add_transaction(new_transaction(
            TransactionKind::Bought, dec!(10), date!(2021, 4, 25)));

        assert_eq!(holding.hold_lots(period, today).count(), 2);
        assert_eq!(holding.sellable_quantity(period, today), dec!(75));

        let next = holding.next_maturity(period, today).unwrap();
        assert_eq!(next.purchased, date!(2021, 4, 25));
        assert_eq!(next.matures, date!(2021, 5, 26));
    }

    #[test]
    fn multiple_positions() {
        let mut holding = Holding::new(new_position(dec!(10), dec!(100), dec!(200), dec!(1200)));
        holding.add_position(new_position(dec!(30), dec!(200), dec!(300), dec!(6300)));

        assert_eq!(holding.quantity(), dec!(40));
        assert_eq!(holding.total_gain(), dec!(500));
        assert_eq!(holding.market_value(), dec!(7500));
        assert_eq!(holding.cost_basis_price(), dec!(175));
        assert_eq!(holding.portfolio_weight(), dec!(20));
    }

    #[test]
    fn undefined_percent_gain() {
        let holding = Holding::new(new_position(dec!(10), dec!(0), dec!(100), dec!(100)));
        assert_eq!(holding.percent_gain(), None);
    }

    #[test]
    fn empty_position_attribution() {
        let period = HoldingPeriod::new(31);
        let today = date!(2021, 5, 10);

        let holding = Holding::new(new_position(dec!(0), dec!(150), dec!(100), dec!(100)));
        assert_eq!(holding.hold_ratio(period, today), dec!(1));
        assert_eq!(holding.attributed_gain(period, today), (dec!(100), dec!(0)));
    }

    fn new_position(
        quantity: Decimal, price_paid: Decimal, total_gain: Decimal, market_value: Decimal,
    ) -> Position {
        Position {
            symbol: s!("AAPL"),
            quantity,
            last_trade: dec!(155),
            price_paid,
            total_gain,
            market_value,
            portfolio_weight: dec!(10),
        }
    }

    fn new_transaction(kind: TransactionKind, quantity: Decimal, date: Date) -> TransactionEvent {
        TransactionEvent {
            symbol: s!("AAPL"),
            display_symbol: s!("AAPL"),
            security_type: s!("EQ"),
            kind,
            executed_at: date.and_hms_opt(14, 30, 0).unwrap(),
            quantity,
            price: dec!(155),
            amount: dec!(-155) * quantity,
            description: s!("BOUGHT 40 SHARES OF AAPL"),
        }
    }
}
