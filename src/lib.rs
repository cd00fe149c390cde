#[macro_use] extern crate separator;

#[macro_use] pub mod core;
#[macro_use] pub mod types;

pub mod accounts;
pub mod cli;
pub mod config;
pub mod feeds;
pub mod ledger;
pub mod reports;
pub mod time;
pub mod util;

mod formatting;
