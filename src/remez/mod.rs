//! Minimax polynomial approximation by the Remez exchange algorithm.
//!
//! Starting from Chebyshev nodes, each iteration solves for the polynomial
//! whose error alternates with equal magnitude on the reference points, then
//! exchanges the reference points for the extrema of that error. The
//! iteration stops once the error magnitudes at the extrema agree to within a
//! relative tolerance, which by the equioscillation theorem characterizes the
//! minimax polynomial.

pub mod chebyshev;
mod driver;
pub mod extrema;
pub mod nodes;
pub mod roots;
pub mod system;

use std::error::Error;
use std::fmt;

use malachite::Rational;

pub use driver::{Approximation, Remez, Status, DEFAULT_MAX_ITERATIONS};

use crate::utils::rational::to_f64;

/// An error resulting from a Remez run or one of its stages.
#[derive(Debug)]
#[non_exhaustive]
pub enum RemezError {
    /// The interval bounds are not strictly increasing.
    EmptyInterval { lower: Rational, upper: Rational },
    /// The working precision carries no digits.
    InvalidPrecision(u32),
    /// No nodes were requested.
    InvalidNodeCount,
    /// The convergence tolerance is not strictly positive.
    InvalidTolerance(Rational),
    /// The iteration cap is zero.
    NoIterations,
    /// A root search was given a bracket without a sign change.
    NoSignChange { low: Rational, high: Rational },
    /// An extremum search was given a bracket over which the derivative has
    /// no sign change.
    NoExtremum { low: Rational, high: Rational },
    /// The linear system is singular at working precision, which signals a
    /// degenerate reference set.
    SingularSystem { column: usize },
    /// The target is not defined over the whole interval.
    OutsideDomain { lower: Rational },
    /// The leveled error vanishes on the reference set while the residual
    /// does not, and raising the degree did not resolve it.
    DegenerateReference { degree: u32 },
}

impl fmt::Display for RemezError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RemezError::EmptyInterval { lower, upper } => write!(
                f,
                "interval [{}, {}] is empty",
                to_f64(lower),
                to_f64(upper)
            ),
            RemezError::InvalidPrecision(digits) => {
                write!(f, "invalid precision of {digits} digits")
            }
            RemezError::InvalidNodeCount => {
                write!(f, "at least one node is required")
            }
            RemezError::InvalidTolerance(tolerance) => {
                write!(f, "tolerance {} is not positive", to_f64(tolerance))
            }
            RemezError::NoIterations => {
                write!(f, "iteration cap must be at least one")
            }
            RemezError::NoSignChange { low, high } => write!(
                f,
                "no sign change between {} and {}",
                to_f64(low),
                to_f64(high)
            ),
            RemezError::NoExtremum { low, high } => write!(
                f,
                "no extremum bracketed between {} and {}",
                to_f64(low),
                to_f64(high)
            ),
            RemezError::SingularSystem { column } => {
                write!(f, "linear system is singular at column {column}")
            }
            RemezError::OutsideDomain { lower } => write!(
                f,
                "target is not defined over an interval starting at {}",
                to_f64(lower)
            ),
            RemezError::DegenerateReference { degree } => write!(
                f,
                "leveled error vanishes on the reference set at degree {degree}"
            ),
        }
    }
}

impl Error for RemezError {}
