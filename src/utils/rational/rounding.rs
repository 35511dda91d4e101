use malachite::num::arithmetic::traits::RoundToMultipleOfPowerOf2;
use malachite::num::logic::traits::SignificantBits;
use malachite::rounding_modes::RoundingMode;
use malachite::Rational;

/// Rounding to a multiple of a power of two.
pub trait RoundBinary: Sized {
    type Output;

    fn round(self, position: i64, mode: RoundingMode) -> Self::Output;

    #[inline]
    fn round_nearest(self, position: i64) -> Self::Output {
        self.round(position, RoundingMode::Nearest)
    }
}

impl<T> RoundBinary for T
where
    T: RoundToMultipleOfPowerOf2<i64>,
{
    type Output = T::Output;

    fn round(self, position: i64, mode: RoundingMode) -> Self::Output {
        self.round_to_multiple_of_power_of_2(position, mode).0
    }
}

/// Estimates the base-2 exponent of a nonzero rational.
///
/// The result is the floor of the base-2 log of `|value|`, or one more than
/// that. Zero maps to `i64::MIN`.
pub fn exponent(value: &Rational) -> i64 {
    let numerator = value.numerator_ref().significant_bits();
    let denominator = value.denominator_ref().significant_bits();

    if numerator == 0 {
        i64::MIN
    } else {
        numerator as i64 - denominator as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use malachite::num::conversion::traits::FromSciString;

    #[test]
    fn rounding() {
        let five_quarters = Rational::from_sci_string("1.25").unwrap();
        let negative = Rational::from_sci_string("-1.25").unwrap();

        assert_eq!(
            five_quarters.clone().round(0, RoundingMode::Floor),
            Rational::from(1u32)
        );
        assert_eq!(
            five_quarters.clone().round(-1, RoundingMode::Ceiling),
            Rational::from_signeds(3, 2)
        );
        assert_eq!(five_quarters.round_nearest(1), Rational::from(2u32));
        assert_eq!(
            negative.clone().round(0, RoundingMode::Floor),
            Rational::from(-2)
        );
        assert_eq!(negative.round_nearest(-2), Rational::from_signeds(-5, 4));
    }

    #[test]
    fn exponent_estimate() {
        for (value, expected) in [
            ("1", [0, 0]),
            ("0.75", [-1, 0]),
            ("6", [2, 3]),
            ("-0.0625", [-4, -3]),
        ] {
            let value = Rational::from_sci_string(value).unwrap();

            assert!(expected.contains(&exponent(&value)));
        }

        assert_eq!(exponent(&Rational::from(0u32)), i64::MIN);
    }
}
