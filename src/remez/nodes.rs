//! Initial reference points.

use malachite::num::basic::traits::One;
use malachite::Rational;

use super::RemezError;
use crate::precision::Precision;
use crate::utils::rational::elementary;

/// Computes `count` Chebyshev nodes of the first kind, rescaled from `[-1, 1]`
/// to `[lower, upper]`.
///
/// Node `i` (counting from one) is
/// `(cos((2i - 1) π / 2 count) + 1) / 2 * (upper - lower) + lower`, so the
/// nodes are strictly decreasing.
pub fn chebyshev_nodes(
    count: usize,
    lower: &Rational,
    upper: &Rational,
    prec: &Precision,
) -> Result<Vec<Rational>, RemezError> {
    if count == 0 {
        return Err(RemezError::InvalidNodeCount);
    }

    if lower >= upper {
        return Err(RemezError::EmptyInterval {
            lower: lower.clone(),
            upper: upper.clone(),
        });
    }

    let pi = elementary::pi(&prec.widened(8));
    let width = upper - lower;
    let denominator = Rational::from(2 * count);

    let nodes = (1..=count)
        .map(|i| {
            let angle = &pi * Rational::from(2 * i - 1) / &denominator;
            let unit = (elementary::cos(&angle, prec) + Rational::ONE) >> 1u32;

            prec.round(unit * &width + lower)
        })
        .collect();

    Ok(nodes)
}
