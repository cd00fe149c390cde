use chrono::Duration;

use crate::types::Date;

/// The minimum number of days a purchased lot must be held before it's allowed to be sold.
///
/// All arithmetic here is day-granular: events are attributed to their execution date, so a lot
/// purchased one minute before midnight still matures a whole `days` days later. Eligibility and
/// maturity must always be obtained from these methods, so that every part of the program agrees
/// on whether a particular lot is sellable.
#[derive(Debug, Clone, Copy)]
pub struct HoldingPeriod {
    days: u32,
}

impl HoldingPeriod {
    pub fn new(days: u32) -> HoldingPeriod {
        HoldingPeriod { days }
    }

    /// Returns whether a lot purchased on the specified date may be sold today. A lot becomes
    /// eligible on its maturity date, not after it.
    pub fn is_eligible(&self, purchased: Date, today: Date) -> bool {
        (today - purchased).num_days() >= i64::from(self.days)
    }

    pub fn maturity_date(&self, purchased: Date) -> Date {
        purchased + Duration::days(i64::from(self.days))
    }

    /// Returns the number of days left until the lot becomes sellable (zero when it already is).
    pub fn days_remaining(&self, purchased: Date, today: Date) -> u32 {
        cast::u32((self.maturity_date(purchased) - today).num_days().max(0)).unwrap()
    }
}
