pub use chrono::NaiveDate as Date;
pub use chrono::NaiveDateTime as DateTime;
pub use rust_decimal::Decimal;

#[cfg(test)]
macro_rules! date {
    ($year:expr, $month:expr, $day:expr) => (::chrono::NaiveDate::from_ymd_opt($year, $month, $day).unwrap())
}
