//! Monetary values on the wire.

use rust_decimal::Decimal;

/// Render an amount as a decimal string with two places, e.g. `"400.00"`.
pub(crate) fn format_amount(amount: Decimal) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_always_carry_two_places() {
        assert_eq!(format_amount(Decimal::new(400, 0)), "400.00");
        assert_eq!(format_amount(Decimal::new(3_605, 1)), "360.50");
        assert_eq!(format_amount(Decimal::new(10_00, 2)), "10.00");
    }
}
