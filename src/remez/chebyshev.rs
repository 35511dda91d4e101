//! Chebyshev polynomials of the first kind.

use std::iter;

use malachite::num::basic::traits::{One, Zero};
use malachite::{Integer, Rational};

use crate::precision::Precision;

/// Evaluates `T_0(x), ..., T_degree(x)` by the three-term recurrence.
pub fn basis(x: &Rational, degree: usize, prec: &Precision) -> Vec<Rational> {
    let mut values = Vec::with_capacity(degree + 1);

    values.push(Rational::ONE);

    if degree >= 1 {
        values.push(x.clone());
    }

    for k in 2..=degree {
        let twice = (x * &values[k - 1]) << 1u32;
        let next = prec.round(twice - &values[k - 2]);

        values.push(next);
    }

    values
}

/// Evaluates the Chebyshev series with the given coefficients at `x` using
/// Clenshaw's recurrence.
pub fn evaluate(
    coefficients: &[Rational],
    x: &Rational,
    prec: &Precision,
) -> Rational {
    let Some((first, rest)) = coefficients.split_first() else {
        return Rational::ZERO;
    };

    let mut b1 = Rational::ZERO;
    let mut b2 = Rational::ZERO;

    for c in rest.iter().rev() {
        let b0 = prec.round(c + ((x * &b1) << 1u32) - &b2);

        b2 = b1;
        b1 = b0;
    }

    prec.round(first + x * b1 - b2)
}

/// Converts Chebyshev series coefficients to power-basis coefficients.
///
/// The conversion is exact.
pub fn to_power_basis(coefficients: &[Rational]) -> Vec<Rational> {
    let mut power = vec![Rational::ZERO; coefficients.len()];

    for (c, t) in coefficients.iter().zip(polynomials(coefficients.len())) {
        for (p, a) in power.iter_mut().zip(&t) {
            *p += c * Rational::from(a);
        }
    }

    power
}

/// Computes the power-basis coefficients of `T_0, ..., T_(count-1)`.
fn polynomials(count: usize) -> Vec<Vec<Integer>> {
    let mut polys: Vec<Vec<Integer>> = Vec::with_capacity(count);

    for k in 0..count {
        let next = match k {
            0 => vec![Integer::ONE],
            1 => vec![Integer::ZERO, Integer::ONE],
            _ => {
                let mut next: Vec<Integer> = iter::once(Integer::ZERO)
                    .chain(polys[k - 1].iter().map(|a| a << 1u32))
                    .collect();

                for (a, b) in next.iter_mut().zip(&polys[k - 2]) {
                    *a -= b;
                }

                next
            }
        };

        polys.push(next);
    }

    polys
}
