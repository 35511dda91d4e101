//! Root finding by bisection.

use std::cmp::Ordering;
use std::mem;

use malachite::num::arithmetic::traits::{Abs, Sign};
use malachite::Rational;

use super::RemezError;
use crate::precision::Precision;

/// Finds a root of `g` between `low` and `high`.
///
/// The endpoints may be given in either order. The bracket is halved until it
/// is narrower than [`Precision::bisection_tolerance`], and its midpoint is
/// returned. Fails if `g` has the same strict sign at both endpoints.
pub fn bisect<G>(
    g: G,
    low: &Rational,
    high: &Rational,
    prec: &Precision,
) -> Result<Rational, RemezError>
where
    G: Fn(&Rational) -> Rational,
{
    let mut low = low.clone();
    let mut high = high.clone();

    let g_low = g(&low);
    let g_high = g(&high);

    // Keep the negative side of the bracket in `low`.
    let (negative, positive) = if g_high < g_low {
        mem::swap(&mut low, &mut high);
        (g_high, g_low)
    } else {
        (g_low, g_high)
    };

    if negative.sign() == Ordering::Greater
        || positive.sign() == Ordering::Less
    {
        return Err(RemezError::NoSignChange { low, high });
    }

    let tolerance = prec.bisection_tolerance();
    let mut mid = midpoint(&low, &high, prec);

    while (&high - &low).abs() >= tolerance {
        if g(&mid).sign() == Ordering::Less {
            low = mid;
        } else {
            high = mid;
        }

        let next = midpoint(&low, &high, prec);

        // The bracket cannot shrink any further at this precision.
        if next == low || next == high {
            return Ok(next);
        }

        mid = next;
    }

    Ok(mid)
}

fn midpoint(a: &Rational, b: &Rational, prec: &Precision) -> Rational {
    prec.round((a + b) >> 1u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    use malachite::num::conversion::traits::FromSciString;

    fn rational(s: &str) -> Rational {
        Rational::from_sci_string(s).unwrap()
    }

    #[test]
    fn identity_root() {
        let prec = Precision::new(30).unwrap();
        let root =
            bisect(|x| x.clone(), &rational("-1"), &rational("1"), &prec)
                .unwrap();

        assert!(root.abs() < prec.bisection_tolerance());
    }

    #[test]
    fn reversed_bracket() {
        let prec = Precision::new(30).unwrap();
        let g = |x: &Rational| rational("0.3") - x;

        for (low, high) in [("0", "1"), ("1", "0")] {
            let root = bisect(g, &rational(low), &rational(high), &prec)
                .unwrap();

            assert!((root - rational("0.3")).abs() < rational("1e-15"));
        }
    }

    #[test]
    fn root_of_square_minus_two() {
        let prec = Precision::new(40).unwrap();
        let g = |x: &Rational| x * x - Rational::from(2u32);

        let root = bisect(g, &rational("1"), &rational("2"), &prec).unwrap();
        let error = (&root * &root - Rational::from(2u32)).abs();

        assert!(error < rational("1e-19"));
    }

    #[test]
    fn missing_sign_change() {
        let prec = Precision::default();
        let g = |x: &Rational| x * x + Rational::from(1u32);

        assert!(matches!(
            bisect(g, &rational("-1"), &rational("2"), &prec),
            Err(RemezError::NoSignChange { .. })
        ));
    }
}
