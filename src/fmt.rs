use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as currency with exactly two decimals: `$12.50`.
pub fn money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(dec("12.5")), "$12.50");
        assert_eq!(money(dec("45")), "$45.00");
        assert_eq!(money(Decimal::ZERO), "$0.00");
        assert_eq!(money(dec("1234.567")), "$1234.57");
        assert_eq!(money(dec("-3")), "-$3.00");
    }

    #[test]
    fn test_money_never_prints_negative_zero() {
        assert_eq!(money(dec("-0.001")), "$0.00");
    }
}
