use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as US currency: `$1,250,000.00`.
///
/// Rounds to cents, half away from zero.
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let text = rounded.abs().to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(dec!(1250000)), "$1,250,000.00");
        assert_eq!(format_currency(dec!(999)), "$999.00");
        assert_eq!(format_currency(dec!(1000)), "$1,000.00");
        assert_eq!(format_currency(dec!(0)), "$0.00");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(10.005)), "$10.01");
        assert_eq!(format_currency(dec!(10.004)), "$10.00");
        assert_eq!(format_currency(dec!(-2.345)), "-$2.35");
    }

    #[test]
    fn pads_cents() {
        assert_eq!(format_currency(dec!(450000.5)), "$450,000.50");
    }
}
