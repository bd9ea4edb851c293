//! Whole-yen rounding helpers

use rust_decimal::{Decimal, prelude::ToPrimitive};

/// Round `amount` up to the nearest multiple of `unit`.
///
/// Returns `None` when `unit` is not positive or the result does not fit in
/// an `i64`.
pub fn ceil_to_unit(amount: Decimal, unit: i64) -> Option<i64> {
    if unit <= 0 {
        return None;
    }
    let unit = Decimal::from(unit);
    let steps = amount.checked_div(unit)?.ceil();
    steps.checked_mul(unit)?.to_i64()
}

/// Drop the fractional part of a yen amount, rounding toward negative infinity.
pub fn floor_yen(amount: Decimal) -> Option<i64> {
    amount.floor().to_i64()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_ceil_to_unit_rounds_up() {
        assert_eq!(ceil_to_unit(dec!(1234.5), 1000), Some(2000));
        assert_eq!(ceil_to_unit(dec!(1000.01), 1000), Some(2000));
        assert_eq!(ceil_to_unit(dec!(0.01), 1000), Some(1000));
    }

    #[test]
    fn test_ceil_to_unit_keeps_exact_multiples() {
        assert_eq!(ceil_to_unit(dec!(9000.00), 1000), Some(9000));
        assert_eq!(ceil_to_unit(Decimal::ZERO, 1000), Some(0));
    }

    #[test]
    fn test_ceil_to_unit_rejects_non_positive_unit() {
        assert_eq!(ceil_to_unit(dec!(10), 0), None);
        assert_eq!(ceil_to_unit(dec!(10), -100), None);
    }

    #[test]
    fn test_ceil_to_unit_bounds() {
        let raw_fees = [
            dec!(1),
            dec!(999.99),
            dec!(1234.5),
            dec!(54321.0),
            dec!(1000000),
        ];
        for raw in raw_fees {
            let fee = ceil_to_unit(raw, 1000).unwrap();
            let fee_dec = Decimal::from(fee);
            assert!(fee_dec >= raw);
            assert!(fee_dec < raw + dec!(1000));
            assert_eq!(fee % 1000, 0);
        }
    }

    #[test]
    fn test_floor_yen() {
        assert_eq!(floor_yen(dec!(444.44)), Some(444));
        assert_eq!(floor_yen(dec!(0.99)), Some(0));
        assert_eq!(floor_yen(dec!(1200)), Some(1200));
    }
}
