use std::fs;
use std::path::Path;

use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::core::GenericResult;
use crate::types::Decimal;
use crate::util::{self, DecimalRestrictions};

/// An open position from the portfolio snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub quantity: Decimal,
    pub last_trade: Decimal,
    pub price_paid: Decimal,
    pub total_gain: Decimal,
    pub market_value: Decimal,
    pub portfolio_weight: Decimal,
}

pub struct PositionsFeed {
    pub positions: Vec<Position>,
    pub skipped: usize,
}

pub fn read(path: &Path) -> GenericResult<PositionsFeed> {
    let data = fs::read(path).map_err(|e| format!("Error while reading {:?}: {}", path, e))?;
    parse(&data).map_err(|e| format!("Error while parsing {:?}: {}", path, e).into())
}

fn parse(data: &[u8]) -> GenericResult<PositionsFeed> {
    #[derive(Deserialize)]
    struct Response {
        #[serde(rename = "PortfolioResponse")]
        portfolio: Portfolio,
    }

    #[derive(Deserialize)]
    struct Portfolio {
        #[serde(rename = "AccountPortfolio", default)]
        accounts: Vec<AccountPortfolio>,
    }

    #[derive(Deserialize)]
    struct AccountPortfolio {
        #[serde(rename = "Position", default)]
        positions: Vec<Value>,
    }

    let response: Response = serde_json::from_slice(data)?;

    let mut positions = Vec::new();
    let mut skipped = 0;

    for account in response.portfolio.accounts {
        for record in account.positions {
            match parse_position(&record) {
                Ok(position) => positions.push(position),
                Err(e) => {
                    let symbol = record.get("symbolDescription").and_then(Value::as_str);
                    match symbol {
                        Some(symbol) => warn!("Skipping {:?} position record: {}.", symbol, e),
                        None => warn!("Skipping a position record: {}.", e),
                    }
                    skipped += 1;
                },
            }
        }
    }

    Ok(PositionsFeed { positions, skipped })
}

fn parse_position(record: &Value) -> GenericResult<Position> {
    #[derive(Deserialize)]
    struct PositionRecord {
        #[serde(rename = "symbolDescription")]
        symbol: String,
        quantity: Decimal,
        #[serde(rename = "Quick")]
        quick: Quick,
        #[serde(rename = "pricePaid")]
        price_paid: Decimal,
        #[serde(rename = "totalGain")]
        total_gain: Decimal,
        #[serde(rename = "marketValue")]
        market_value: Decimal,
        #[serde(rename = "pctOfPortfolio")]
        portfolio_weight: Decimal,
    }

    #[derive(Deserialize)]
    struct Quick {
        #[serde(rename = "lastTrade")]
        last_trade: Decimal,
    }

    let record: PositionRecord = serde_json::from_value(record.clone())?;
    if record.symbol.is_empty() {
        return Err!("Got an empty symbol");
    }

    Ok(Position {
        symbol: record.symbol,
        quantity: record.quantity,
        last_trade: util::validate_named_decimal(
            "last trade price", record.quick.last_trade, DecimalRestrictions::PositiveOrZero)?,
        price_paid: util::validate_named_decimal(
            "price paid", record.price_paid, DecimalRestrictions::PositiveOrZero)?,
        total_gain: record.total_gain,
        market_value: record.market_value,
        portfolio_weight: record.portfolio_weight,
    })
}
