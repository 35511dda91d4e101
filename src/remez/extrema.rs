//! Extremum location.

use malachite::num::arithmetic::traits::Abs;
use malachite::Rational;

use super::{roots, RemezError};
use crate::precision::Precision;

/// Finds a local extremum of `r` between `low` and `high`.
///
/// The derivative of `r` is approximated by a centered difference whose step
/// is [`Precision::difference_step`] times the width of the bracket, and its
/// root is located by bisection. Fails if the approximate derivative has the
/// same strict sign at both endpoints.
pub fn locate_extremum<R>(
    r: R,
    low: &Rational,
    high: &Rational,
    prec: &Precision,
) -> Result<Rational, RemezError>
where
    R: Fn(&Rational) -> Rational,
{
    let step = prec.round(prec.difference_step() * (high - low).abs());
    let span = &step << 1u32;

    let derivative =
        |x: &Rational| (r(&(x + &step)) - r(&(x - &step))) / &span;

    roots::bisect(derivative, low, high, prec).map_err(|err| match err {
        RemezError::NoSignChange { low, high } => {
            RemezError::NoExtremum { low, high }
        }
        err => err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use malachite::num::conversion::traits::FromSciString;

    fn rational(s: &str) -> Rational {
        Rational::from_sci_string(s).unwrap()
    }

    #[test]
    fn maximum_of_downward_parabola() {
        let prec = Precision::new(30).unwrap();
        let r = |x: &Rational| {
            let d = x - rational("0.5");
            -(&d * &d)
        };

        let x = locate_extremum(r, &rational("0"), &rational("1"), &prec)
            .unwrap();

        assert!((x - rational("0.5")).abs() < rational("1e-14"));
    }

    #[test]
    fn minimum_in_reversed_bracket() {
        let prec = Precision::new(30).unwrap();
        let r = |x: &Rational| {
            let d = x - rational("-0.2");
            &d * &d * &d * &d - Rational::from(1u32)
        };

        let x = locate_extremum(r, &rational("1"), &rational("-1"), &prec)
            .unwrap();

        assert!((x - rational("-0.2")).abs() < rational("1e-5"));
    }

    #[test]
    fn monotone_function_has_no_extremum() {
        let prec = Precision::default();
        let r = |x: &Rational| x * x * x;

        assert!(matches!(
            locate_extremum(r, &rational("0.5"), &rational("2"), &prec),
            Err(RemezError::NoExtremum { .. })
        ));
    }
}
