//! Elementary functions evaluated at a working precision.
//!
//! Every function returns a value rounded with [`Precision::round`]. Series
//! are summed until the next term is negligible relative to the partial sum.

use std::cmp::Ordering;

use malachite::num::arithmetic::traits::{PowerOf2, Sign};
use malachite::num::basic::traits::{One, Zero};
use malachite::Rational;

use super::{exponent, RoundBinary};
use crate::precision::Precision;

const NEWTON_STEPS: usize = 64;

/// Computes π with Machin's formula.
pub fn pi(prec: &Precision) -> Rational {
    let wide = prec.widened(8);

    let a = atan_series(&Rational::from_unsigneds(1u32, 5u32), &wide);
    let b = atan_series(&Rational::from_unsigneds(1u32, 239u32), &wide);

    prec.round((a << 4u32) - (b << 2u32))
}

/// Computes the square root of `x` by Newton's method.
///
/// # Panics
///
/// Panics if `x` is negative.
pub fn sqrt(x: &Rational, prec: &Precision) -> Rational {
    assert!(x.sign() != Ordering::Less, "square root of a negative number");

    if x.sign() == Ordering::Equal {
        return Rational::ZERO;
    }

    let mut y = Rational::power_of_2(exponent(x) / 2);

    for _ in 0..NEWTON_STEPS {
        let next = prec.round((&y + x / &y) >> 1u32);
        let done = prec.is_negligible(&(&next - &y), &next);

        y = next;

        if done {
            break;
        }
    }

    y
}

/// Computes the arctangent of `x`.
pub fn atan(x: &Rational, prec: &Precision) -> Rational {
    match x.sign() {
        Ordering::Equal => return Rational::ZERO,
        Ordering::Less => return -atan(&-x, prec),
        Ordering::Greater => {}
    }

    let wide = prec.widened(8);

    if *x > Rational::ONE {
        let complement = atan(&(Rational::ONE / x), &wide);

        return prec.round((pi(&wide) >> 1u32) - complement);
    }

    // atan(x) = 2 atan(x / (1 + sqrt(1 + x^2))), applied twice.
    let mut y = x.clone();

    for _ in 0..2 {
        let root = sqrt(&(Rational::ONE + &y * &y), &wide);

        y = wide.round(&y / (Rational::ONE + root));
    }

    prec.round(atan_series(&y, &wide) << 2u32)
}

/// Sums the Taylor series of the arctangent. Converges for `|x| < 1`.
fn atan_series(x: &Rational, prec: &Precision) -> Rational {
    let square = prec.round(x * x);

    let mut power = x.clone();
    let mut sum = x.clone();

    for k in 1u32.. {
        power = prec.round(-(power * &square));

        let term = &power / Rational::from(2 * k + 1);

        if prec.is_negligible(&term, &sum) {
            break;
        }

        sum = prec.round(sum + term);
    }

    sum
}

/// Sums the Taylor series of the inverse hyperbolic tangent. Converges for
/// `|x| < 1`.
fn atanh_series(x: &Rational, prec: &Precision) -> Rational {
    let square = prec.round(x * x);

    let mut power = x.clone();
    let mut sum = x.clone();

    for k in 1u32.. {
        power = prec.round(power * &square);

        let term = &power / Rational::from(2 * k + 1);

        if prec.is_negligible(&term, &sum) {
            break;
        }

        sum = prec.round(sum + term);
    }

    sum
}

/// Computes the exponential of `x`.
///
/// The argument is halved until it is below one half, and the result of the
/// Taylor series is squared back up.
pub fn exp(x: &Rational, prec: &Precision) -> Rational {
    if x.sign() == Ordering::Equal {
        return Rational::ONE;
    }

    let halvings = (exponent(x) + 2).max(0) as u64;
    let wide = prec.widened(halvings + 8);

    let y = x >> halvings;

    let mut term = Rational::ONE;
    let mut sum = Rational::ONE;

    for k in 1u32.. {
        term = wide.round(term * &y / Rational::from(k));

        if wide.is_negligible(&term, &sum) {
            break;
        }

        sum = wide.round(sum + &term);
    }

    for _ in 0..halvings {
        sum = wide.round(&sum * &sum);
    }

    prec.round(sum)
}

/// Computes the natural logarithm of `x`.
///
/// # Panics
///
/// Panics if `x` is not strictly positive.
pub fn ln(x: &Rational, prec: &Precision) -> Rational {
    assert!(
        x.sign() == Ordering::Greater,
        "logarithm of a nonpositive number"
    );

    let wide = prec.widened(8);

    // x = m 2^e with m in [1/2, 2).
    let e = exponent(x);
    let m = x >> e;

    let z = (&m - Rational::ONE) / (m + Rational::ONE);
    let ln_m = atanh_series(&wide.round(z), &wide) << 1u32;

    if e == 0 {
        return prec.round(ln_m);
    }

    let third = Rational::from_unsigneds(1u32, 3u32);
    let ln_2 = atanh_series(&third, &wide) << 1u32;

    prec.round(ln_m + ln_2 * Rational::from(e))
}

/// Computes the sine of `x`.
pub fn sin(x: &Rational, prec: &Precision) -> Rational {
    let wide = prec.widened(8);
    let t = reduce_turn(x, &wide);

    prec.round(trig_series(&t, Parity::Odd, &wide))
}

/// Computes the cosine of `x`.
pub fn cos(x: &Rational, prec: &Precision) -> Rational {
    let wide = prec.widened(8);
    let t = reduce_turn(x, &wide);

    prec.round(trig_series(&t, Parity::Even, &wide))
}

/// Reduces `x` into `[-π, π]`.
fn reduce_turn(x: &Rational, prec: &Precision) -> Rational {
    let turn = pi(prec) << 1u32;
    let turns = (x / &turn).round_nearest(0);

    if turns.sign() == Ordering::Equal {
        x.clone()
    } else {
        prec.round(x - turns * turn)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Parity {
    Odd,
    Even,
}

/// Sums the Taylor series of the sine (odd powers of `t`) or the cosine (even
/// powers of `t`).
fn trig_series(t: &Rational, parity: Parity, prec: &Precision) -> Rational {
    let square = prec.round(t * t);

    let (mut term, offset) = match parity {
        Parity::Odd => (t.clone(), 0),
        Parity::Even => (Rational::ONE, 1),
    };

    let mut sum = term.clone();

    for k in 1u32.. {
        let n = 2 * k - offset;
        let divisor = Rational::from(n) * Rational::from(n + 1);

        term = prec.round(-(term * &square) / divisor);

        if prec.is_negligible(&term, &sum) {
            break;
        }

        sum = prec.round(sum + &term);
    }

    sum
}
