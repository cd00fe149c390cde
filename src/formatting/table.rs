//! This module provides a thin wrapper around prettytable.
//!
//! The main reason for it is to support ansi_term styling because term (which prettytable natively
//! supports) has not enough functionality - for example it doesn't support dimming style on Mac.

use ansi_term::Style;

use prettytable::{Row as RawRow, Cell as RawCell};
use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};

use crate::types::{Date, Decimal};
use crate::util;

pub use prettytable::{Table, format::Alignment};

#[derive(Clone)]
pub struct Cell {
    text: String,
    align: Alignment,
    style: Option<Style>,
}

impl Cell {
    pub fn new(text: &str) -> Cell {
        Cell::new_align(text, Alignment::LEFT)
    }

    pub fn new_empty() -> Cell {
        Cell::new("")
    }

    pub fn new_align(text: &str, align: Alignment) -> Cell {
        Cell {
            text: text.to_owned(),
            align: align,
            style: None,
        }
    }

    pub fn new_date(date: Date) -> Cell {
        Cell::new_align(&super::format_date(date), Alignment::CENTER)
    }

    pub fn new_quantity(quantity: Decimal) -> Cell {
        Cell::new_align(&super::format_quantity(quantity), Alignment::RIGHT)
    }

    pub fn new_days(days: u32) -> Cell {
        Cell::new_align(&days.to_string(), Alignment::RIGHT)
    }

    pub fn new_cash(amount: Decimal) -> Cell {
        Cell::new_align(&super::format_cash(amount), Alignment::RIGHT)
    }

    pub fn new_gain(amount: Decimal) -> Cell {
        Cell::new_cash(amount).with_style(super::gain_style(amount))
    }

    pub fn new_ratio(ratio: Decimal) -> Cell {
        Cell::new_align(&format!("{}%", util::round_to(ratio * dec!(100), 2)), Alignment::RIGHT)
    }

    pub fn with_style(mut self, style: Style) -> Cell {
        self.style = Some(style);
        self
    }
}

pub struct Row {
}

impl Row {
    pub fn new(row: &[Cell]) -> RawRow {
        let mut cells = Vec::with_capacity(row.len());

        for cell in row {
            let text = match cell.style {
                Some(style) => style.paint(cell.text.as_str()).to_string(),
                None => cell.text.clone(),
            };
            cells.push(RawCell::new_align(&text, cell.align));
        }

        RawRow::new(cells)
    }
}

pub fn print_table(name: &str, titles: &[&str], mut table: Table) {
    table.set_format(FormatBuilder::new().padding(1, 1).build());
    table.set_titles(RawRow::new(
        titles.iter().map(|name| RawCell::new_align(name, Alignment::CENTER)).collect()));

    let mut wrapping_table = Table::new();

    wrapping_table.set_format(FormatBuilder::new()
        .separator(LinePosition::Title, LineSeparator::new(' ', ' ', ' ', ' '))
        .build());

    wrapping_table.set_titles(RawRow::new(vec![
        RawCell::new_align(&("\n".to_owned() + name), Alignment::CENTER),
    ]));

    wrapping_table.add_row(RawRow::new(vec![RawCell::new(&table.to_string())]));
    wrapping_table.printstd();
}
