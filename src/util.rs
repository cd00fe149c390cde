use rust_decimal::RoundingStrategy;

use crate::core::GenericResult;
use crate::types::Decimal;

#[derive(Clone, Copy)]
pub enum DecimalRestrictions {
    NonZero,
    PositiveOrZero,
    StrictlyPositive,
}

pub fn validate_decimal(value: Decimal, restrictions: DecimalRestrictions) -> GenericResult<Decimal> {
    if !match restrictions {
        DecimalRestrictions::NonZero => !value.is_zero(),
        DecimalRestrictions::PositiveOrZero => !value.is_sign_negative() || value.is_zero(),
        DecimalRestrictions::StrictlyPositive => value.is_sign_positive() && !value.is_zero(),
    } {
        return Err!("The value doesn't comply to the specified restrictions");
    }

    Ok(value)
}

pub fn validate_named_decimal(
    name: &str, value: Decimal, restrictions: DecimalRestrictions,
) -> GenericResult<Decimal> {
    Ok(validate_decimal(value, restrictions).map_err(|e| format!(
        "Invalid {} ({}): {}", name, value, e))?)
}

pub fn round(value: Decimal) -> Decimal {
    round_to(value, 2)
}

pub fn round_to(value: Decimal, points: u32) -> Decimal {
    value.round_dp_with_strategy(points, RoundingStrategy::MidpointAwayFromZero).normalize()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use super::*;

    #[rstest(value, expected,
        case(dec!(1), dec!(1)),
        case(dec!(1.1), dec!(1.1)),
        case(dec!(1.004), dec!(1)),
        case(dec!(1.005), dec!(1.01)),
        case(dec!(-1.004), dec!(-1)),
        case(dec!(-1.005), dec!(-1.01)),
        case(dec!(1.500), dec!(1.5)),
    )]
    fn rounding(value: Decimal, expected: Decimal) {
        assert_eq!(round(value), expected);
    }

    #[rstest(value, restrictions, valid,
        case(dec!(0), DecimalRestrictions::NonZero, false),
        case(dec!(-1), DecimalRestrictions::NonZero, true),
        case(dec!(-1), DecimalRestrictions::PositiveOrZero, false),
        case(dec!(0), DecimalRestrictions::PositiveOrZero, true),
        case(dec!(1), DecimalRestrictions::PositiveOrZero, true),
        case(dec!(0), DecimalRestrictions::StrictlyPositive, false),
        case(dec!(1), DecimalRestrictions::StrictlyPositive, true),
    )]
    fn validate_restrictions(value: Decimal, restrictions: DecimalRestrictions, valid: bool) {
        assert_eq!(validate_decimal(value, restrictions).is_ok(), valid);
    }
}
