use std::fmt::Write;

use ansi_term::{ANSIString, Colour, Style};
use num_traits::ToPrimitive;
use separator::Separatable;

use crate::types::{Date, Decimal};
use crate::util;

pub mod table;

pub fn format_date(date: Date) -> String {
    date.format("%m-%d-%Y").to_string()
}

pub fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

pub fn format_cash(amount: Decimal) -> String {
    let mut amount = amount.normalize();

    if amount.scale() == 1 {
        amount.set_scale(0).unwrap();
        amount = Decimal::new(amount.to_i64().unwrap() * 10, 2);
    }

    format_usd(&separated_float!(amount.to_string()))
}

pub fn format_cash_rounded(amount: Decimal) -> String {
    format_usd(&util::round_to(amount, 0).to_i64().unwrap().separated_string())
}

pub fn colorify_name(name: &str) -> ANSIString<'_> {
    Style::new().bold().paint(name)
}

pub fn colorify_gain(amount: Decimal) -> String {
    gain_style(amount).paint(format_cash(amount)).to_string()
}

pub fn gain_style(amount: Decimal) -> Style {
    if amount.is_sign_negative() {
        Colour::Red.normal()
    } else {
        Colour::Green.normal()
    }
}

fn format_usd(mut amount: &str) -> String {
    let mut buffer = String::new();

    if amount.starts_with('-') || amount.starts_with('+') {
        write!(&mut buffer, "{}", &amount[..1]).unwrap();
        amount = &amount[1..];
    }

    write!(&mut buffer, "${}", amount).unwrap();

    buffer
}
