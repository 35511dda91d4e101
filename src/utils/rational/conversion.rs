//! Numeric conversions.

use std::cmp::Ordering;

use malachite::num::arithmetic::traits::{CheckedSub, PowerOf2, Sign};
use malachite::num::basic::traits::Zero;
use malachite::num::conversion::traits::RoundingFrom;
use malachite::num::logic::traits::SignificantBits;
use malachite::rounding_modes::RoundingMode;
use malachite::{Natural, Rational};

use super::RoundBinary;
use crate::format::Format;

/// A trait for converting to fixed-point representation.
pub trait FixedPoint {
    type Output;

    /// Computes the fixed-point word nearest to `self` in the given format,
    /// or `None` if the rounded value is out of range.
    ///
    /// Signed formats use two's complement.
    fn to_fixed_point(&self, format: &Format) -> Option<Self::Output>;
}

impl FixedPoint for Rational {
    type Output = Natural;

    fn to_fixed_point(&self, format: &Format) -> Option<Natural> {
        if format.width == 0 {
            return None;
        }

        let scaled = self.clone().round_nearest(format.lsb()) >> format.lsb();

        // Rounding leaves an integer, so the numerator is the magnitude.
        let magnitude = scaled.numerator_ref();
        let width = u64::from(format.width);

        match scaled.sign() {
            Ordering::Equal => Some(Natural::ZERO),
            Ordering::Greater => {
                let limit = width - u64::from(format.is_signed);

                (magnitude.significant_bits() <= limit)
                    .then(|| magnitude.clone())
            }
            Ordering::Less if format.is_signed => {
                // Check that magnitude <= 2^(width-1)
                if *magnitude > Natural::power_of_2(width - 1) {
                    return None;
                }

                Natural::power_of_2(width).checked_sub(magnitude)
            }
            Ordering::Less => None,
        }
    }
}

/// Rounds `value` to the nearest double.
pub fn to_f64(value: &Rational) -> f64 {
    f64::rounding_from(value, RoundingMode::Nearest).0
}
