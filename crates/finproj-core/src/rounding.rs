//! Cent rounding shared by both engines.
//!
//! Every monetary intermediate is rounded to two decimal places before it is
//! stored or fed into the next step. Rounding is not associative, so callers
//! must round at the same points in the same order to reproduce a schedule.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

/// Round to the cent, half-up.
///
/// Ties move toward positive infinity for either sign: `1.005 -> 1.01` and
/// `-1.005 -> -1.00`. Decimal arithmetic carries no binary representation
/// error, so ties are detected exactly and no bias term is needed.
pub fn round2(value: Money) -> Money {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(2, strategy)
}

/// Running-sum step: `round2(running + delta)`, saturating at the decimal range.
pub fn round2_add(running: Money, delta: Money) -> Money {
    round2(running.saturating_add(delta))
}

/// `round2(running + delta)`, or `None` past the decimal range.
pub fn checked_round2_add(running: Money, delta: Money) -> Option<Money> {
    running.checked_add(delta).map(round2)
}

/// `round2(running - delta)`, or `None` past the decimal range.
pub fn checked_round2_sub(running: Money, delta: Money) -> Option<Money> {
    running.checked_sub(delta).map(round2)
}

/// `round2(amount * rate)`, or `None` past the decimal range.
pub fn checked_round2_mul(amount: Money, rate: Decimal) -> Option<Money> {
    amount.checked_mul(rate).map(round2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round2_ties_round_up() {
        assert_eq!(round2(dec!(1.005)), dec!(1.01));
        assert_eq!(round2(dec!(2.675)), dec!(2.68));
        assert_eq!(round2(dec!(0.125)), dec!(0.13));
    }

    #[test]
    fn test_round2_negative_ties_toward_positive_infinity() {
        assert_eq!(round2(dec!(-1.005)), dec!(-1.00));
        assert_eq!(round2(dec!(-1.006)), dec!(-1.01));
        assert_eq!(round2(dec!(-0.004)), Decimal::ZERO);
    }

    #[test]
    fn test_round2_below_tie_truncates() {
        assert_eq!(round2(dec!(0.004999)), Decimal::ZERO);
        assert_eq!(round2(dec!(729.1666666666)), dec!(729.17));
        assert_eq!(round2(dec!(416.664)), dec!(416.66));
    }

    #[test]
    fn test_round2_keeps_short_scales() {
        assert_eq!(round2(dec!(250000)), dec!(250000));
        assert_eq!(round2(dec!(12.5)), dec!(12.50));
    }

    #[test]
    fn test_round2_add_rounds_after_sum() {
        // 0.004 + 0.004 = 0.008 -> 0.01, while each term alone rounds to 0
        assert_eq!(round2_add(dec!(0.004), dec!(0.004)), dec!(0.01));
        assert_eq!(round2_add(dec!(100.10), dec!(0.20)), dec!(100.30));
    }

    #[test]
    fn test_round2_add_saturates_at_range() {
        assert_eq!(round2_add(Decimal::MAX, dec!(1)), Decimal::MAX);
        assert_eq!(round2_add(Decimal::MIN, dec!(-1)), Decimal::MIN);
    }

    #[test]
    fn test_checked_steps_report_overflow() {
        assert_eq!(checked_round2_add(dec!(1.004), dec!(0.001)), Some(dec!(1.01)));
        assert_eq!(checked_round2_sub(dec!(10.00), dec!(-0.005)), Some(dec!(10.01)));
        assert_eq!(checked_round2_mul(dec!(250000), dec!(0.035) / dec!(12)), Some(dec!(729.17)));

        assert_eq!(checked_round2_add(Decimal::MAX, dec!(1)), None);
        assert_eq!(checked_round2_sub(Decimal::MAX, dec!(-1)), None);
        assert_eq!(checked_round2_mul(Decimal::MAX, dec!(2)), None);
    }
}
