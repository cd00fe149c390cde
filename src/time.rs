use chrono::Local;
#[cfg(debug_assertions)] use chrono::TimeZone;
#[cfg(debug_assertions)] use lazy_static::lazy_static;

pub use chrono::DateTime as TzDateTime;
pub use crate::types::{Date, DateTime};

use crate::core::GenericResult;

pub fn today() -> Date {
    tz_now().naive_local().date()
}

pub fn now() -> DateTime {
    tz_now().naive_local()
}

pub fn utc_now() -> DateTime {
    tz_now().naive_utc()
}

pub fn parse_date(date: &str, format: &str) -> GenericResult<Date> {
    Ok(Date::parse_from_str(date, format).map_err(|_| format!(
        "Invalid date: {:?}", date))?)
}

pub fn parse_user_date(date: &str) -> GenericResult<Date> {
    parse_date(date, "%Y.%m.%d").or_else(|_| parse_date(date, "%d.%m.%Y"))
}

/// Converts a feed timestamp (Unix epoch milliseconds) into UTC time.
pub fn from_timestamp_ms(timestamp: i64) -> GenericResult<DateTime> {
    Ok(chrono::DateTime::from_timestamp_millis(timestamp)
        .ok_or_else(|| format!("Invalid timestamp: {}", timestamp))?
        .naive_utc())
}

fn tz_now() -> TzDateTime<Local> {
    #[cfg(debug_assertions)]
    {
        use std::process;

        lazy_static! {
            static ref FAKE_NOW: Option<TzDateTime<Local>> = parse_fake_now().unwrap_or_else(|e| {
                eprintln!("{}.", e);
                process::exit(1);
            });
        }

        if let Some(&now) = FAKE_NOW.as_ref() {
            return now;
        }
    }

    Local::now()
}

#[cfg(debug_assertions)]
fn parse_fake_now() -> GenericResult<Option<TzDateTime<Local>>> {
    use std::env::{self, VarError};

    let name = "HOLDINGS_NOW";

    let fake_now = match env::var(name) {
        Ok(value) => {
            chrono::NaiveDateTime::parse_from_str(&value, "%Y.%m.%d %H:%M:%S").ok()
                .and_then(|date_time| Local.from_local_datetime(&date_time).single())
        },
        Err(e) => match e {
            VarError::NotPresent => return Ok(None),
            VarError::NotUnicode(_) => None,
        },
    }.ok_or_else(|| format!("Invalid {} environment variable value", name))?;

    Ok(Some(fake_now))
}
