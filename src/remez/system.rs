//! The linear system behind each Remez iteration.
//!
//! For reference points `x_0, ..., x_(n+1)` the system asks for Chebyshev
//! coefficients `c_0, ..., c_n` and a leveled error `E` such that
//! `sum c_k T_k(x_i) + (-1)^(i+1) E = f(x_i)` at every point.

use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

use malachite::num::arithmetic::traits::{Abs, Sign};
use malachite::num::basic::traits::{NegativeOne, One, Zero};
use malachite::Rational;

use super::{chebyshev, RemezError};
use crate::functions::Target;
use crate::precision::Precision;

/// A dense square matrix stored in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    size: usize,
    entries: Vec<Rational>,
}

impl Matrix {
    pub fn zeros(size: usize) -> Matrix {
        Matrix {
            size,
            entries: vec![Rational::ZERO; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            for k in 0..self.size {
                self.entries.swap(a * self.size + k, b * self.size + k);
            }
        }
    }

    fn max_magnitude(&self) -> Rational {
        self.entries
            .iter()
            .map(Abs::abs)
            .max()
            .unwrap_or(Rational::ZERO)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Rational;

    fn index(&self, (row, col): (usize, usize)) -> &Rational {
        &self.entries[row * self.size + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Rational {
        &mut self.entries[row * self.size + col]
    }
}

/// The solution of one Remez system.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Chebyshev coefficients `c_0, ..., c_n`.
    pub coefficients: Vec<Rational>,
    /// The signed leveled error `E`.
    pub leveled_error: Rational,
    /// Largest magnitude of the target over the reference points.
    pub scale: Rational,
}

impl Solution {
    /// Returns true if the leveled error vanishes at working precision.
    ///
    /// This happens when the target is a polynomial of the fitted degree, but
    /// also when the reference set is symmetric and the target has the parity
    /// of the degree.
    pub fn error_vanishes(&self, prec: &Precision) -> bool {
        (&self.leveled_error).abs() <= prec.epsilon() * &self.scale
    }
}

/// Builds the system for the given reference points.
///
/// Row `i` holds `T_0(x_i), ..., T_n(x_i)` followed by `(-1)^(i+1)`, where `n`
/// is two less than the number of points. The right-hand side is `f(x_i)`.
pub fn build<F>(
    reference: &[Rational],
    f: &F,
    prec: &Precision,
) -> (Matrix, Vec<Rational>)
where
    F: Target + ?Sized,
{
    let size = reference.len();
    let degree = size.saturating_sub(2);

    let mut matrix = Matrix::zeros(size);

    for (i, x) in reference.iter().enumerate() {
        let row = chebyshev::basis(x, degree, prec);

        for (j, t) in row.into_iter().enumerate() {
            matrix[(i, j)] = t;
        }

        matrix[(i, size - 1)] = if i % 2 == 0 {
            Rational::NEGATIVE_ONE
        } else {
            Rational::ONE
        };
    }

    let rhs = reference.iter().map(|x| f.eval(x, prec)).collect();

    (matrix, rhs)
}

/// Solves `matrix * x = rhs` by Gaussian elimination with partial pivoting.
///
/// Fails if a pivot is not above working epsilon relative to the largest
/// entry of the matrix.
pub fn solve(
    mut matrix: Matrix,
    mut rhs: Vec<Rational>,
    prec: &Precision,
) -> Result<Vec<Rational>, RemezError> {
    let n = matrix.size();
    let threshold = prec.epsilon() * matrix.max_magnitude();

    for col in 0..n {
        let pivot = (col..n)
            .max_by_key(|&row| (&matrix[(row, col)]).abs())
            .unwrap_or(col);

        if (&matrix[(pivot, col)]).abs() <= threshold {
            return Err(RemezError::SingularSystem { column: col });
        }

        matrix.swap_rows(col, pivot);
        rhs.swap(col, pivot);

        for row in col + 1..n {
            let ratio = &matrix[(row, col)] / &matrix[(col, col)];
            let factor = prec.round(ratio);

            if factor.sign() == Ordering::Equal {
                continue;
            }

            matrix[(row, col)] = Rational::ZERO;

            for k in col + 1..n {
                let value = &matrix[(row, k)] - &factor * &matrix[(col, k)];
                matrix[(row, k)] = prec.round(value);
            }

            let value = &rhs[row] - &factor * &rhs[col];
            rhs[row] = prec.round(value);
        }
    }

    let mut solution = vec![Rational::ZERO; n];

    for row in (0..n).rev() {
        let mut sum = rhs[row].clone();

        for k in row + 1..n {
            sum -= &matrix[(row, k)] * &solution[k];
        }

        solution[row] = prec.round(sum / &matrix[(row, row)]);
    }

    Ok(solution)
}

/// Builds and solves the system for the given reference points, splitting the
/// unknowns into coefficients and leveled error.
pub fn solve_reference<F>(
    reference: &[Rational],
    f: &F,
    prec: &Precision,
) -> Result<Solution, RemezError>
where
    F: Target + ?Sized,
{
    let (matrix, rhs) = build(reference, f, prec);

    let scale = rhs
        .iter()
        .map(Abs::abs)
        .max()
        .unwrap_or(Rational::ZERO);

    let mut coefficients = solve(matrix, rhs, prec)?;
    let leveled_error = coefficients.pop().unwrap_or(Rational::ZERO);

    Ok(Solution {
        coefficients,
        leveled_error,
        scale,
    })
}
