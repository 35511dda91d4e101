//! Working precision.

use std::cmp::Ordering;

use malachite::num::arithmetic::traits::{Pow, Reciprocal, Sign};
use malachite::{Natural, Rational};

use crate::remez::RemezError;
use crate::utils::rational::{exponent, RoundBinary};

/// Number of significant decimal digits used when none is requested.
pub const DEFAULT_DIGITS: u32 = 50;

/// Extra bits carried beyond the requested decimal digits.
const GUARD_BITS: u64 = 16;

/// The number of significant digits carried by every arithmetic operation.
///
/// A `Precision` is passed explicitly to everything that rounds, so that runs
/// at different precisions never share state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Precision {
    digits: u32,
    bits: u64,
}

impl Precision {
    /// Creates a precision of `digits` significant decimal digits.
    pub fn new(digits: u32) -> Result<Precision, RemezError> {
        if digits == 0 {
            return Err(RemezError::InvalidPrecision(digits));
        }

        Ok(Precision::from_digits(digits))
    }

    fn from_digits(digits: u32) -> Precision {
        let bits = f64::from(digits) * std::f64::consts::LOG2_10;
        let bits = bits.ceil() as u64;

        Precision {
            digits,
            bits: bits + GUARD_BITS,
        }
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Significant bits kept by [`Precision::round`], guard bits included.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Returns a precision carrying `extra` more bits than `self`.
    pub fn widened(&self, extra: u64) -> Precision {
        Precision {
            digits: self.digits,
            bits: self.bits + extra,
        }
    }

    /// Rounds `value` to nearest with [`Precision::bits`] significant bits.
    pub fn round(&self, value: Rational) -> Rational {
        if value.sign() == Ordering::Equal {
            return value;
        }

        let position = exponent(&value) - self.bits as i64;

        value.round_nearest(position)
    }

    /// Relative resolution of the requested decimal digits, `10^-digits`.
    pub fn epsilon(&self) -> Rational {
        power_of_ten(u64::from(self.digits))
    }

    /// Width below which a bisection bracket is considered collapsed.
    pub fn bisection_tolerance(&self) -> Rational {
        power_of_ten(u64::from(self.digits / 2))
    }

    /// Relative step of the centered finite differences used to locate
    /// extrema.
    pub fn difference_step(&self) -> Rational {
        power_of_ten(u64::from(self.digits * 2 / 3 + 1))
    }

    /// Returns true if `term` no longer affects `reference` at this precision.
    pub fn is_negligible(
        &self,
        term: &Rational,
        reference: &Rational,
    ) -> bool {
        if term.sign() == Ordering::Equal {
            return true;
        }

        if reference.sign() == Ordering::Equal {
            return false;
        }

        let margin = (self.bits - GUARD_BITS / 2) as i64;

        exponent(term) + margin < exponent(reference)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Precision::from_digits(DEFAULT_DIGITS)
    }
}

/// Computes `10^-k`.
fn power_of_ten(k: u64) -> Rational {
    Rational::from(Natural::from(10u32).pow(k)).reciprocal()
}
