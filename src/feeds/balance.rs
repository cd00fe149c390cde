use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::GenericResult;
use crate::types::Decimal;

/// Computed account balances from the balance snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountBalance {
    pub total_value: Decimal,
    pub cash_buying_power: Decimal,
}

pub fn read(path: &Path) -> GenericResult<AccountBalance> {
    let data = fs::read(path).map_err(|e| format!("Error while reading {:?}: {}", path, e))?;
    parse(&data).map_err(|e| format!("Error while parsing {:?}: {}", path, e).into())
}

fn parse(data: &[u8]) -> GenericResult<AccountBalance> {
    #[derive(Deserialize)]
    struct Response {
        #[serde(rename = "BalanceResponse")]
        balance: Balance,
    }

    #[derive(Deserialize)]
    struct Balance {
        #[serde(rename = "Computed")]
        computed: Computed,
    }

    #[derive(Deserialize)]
    struct Computed {
        #[serde(rename = "RealTimeValues")]
        real_time: RealTimeValues,
        #[serde(rename = "cashBuyingPower")]
        cash_buying_power: Decimal,
    }

    #[derive(Deserialize)]
    struct RealTimeValues {
        #[serde(rename = "totalAccountValue")]
        total_value: Decimal,
    }

    let response: Response = serde_json::from_slice(data)?;
    let computed = response.balance.computed;

    Ok(AccountBalance {
        total_value: computed.real_time.total_value,
        cash_buying_power: computed.cash_buying_power,
    })
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use super::*;

    #[test]
    fn parsing() {
        let balance = parse(indoc!(br#"
            {
                "BalanceResponse": {
                    "accountId": "83405188",
                    "Computed": {
                        "RealTimeValues": {"totalAccountValue": 43521.74},
                        "cashBuyingPower": 2210.38
                    }
                }
            }
        "#)).unwrap();

        assert_eq!(balance, AccountBalance {
            total_value: dec!(43521.74),
            cash_buying_power: dec!(2210.38),
        });
    }

    #[test]
    fn invalid_feed() {
        assert!(parse(br#"{"BalanceResponse": {}}"#).is_err());
    }
}
