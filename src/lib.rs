//! Minimax polynomial approximation of real functions.
//!
//! The [`Remez`] exchange algorithm computes, for a target function on a
//! closed interval, the polynomial of a given degree that minimizes the
//! maximum absolute error. All arithmetic is carried out on exact rationals
//! rounded to a configurable working [`Precision`].
//!
//! ```no_run
//! use malachite::Rational;
//! use minimax::functions::Function;
//! use minimax::Remez;
//!
//! let remez = Remez::new(24, Rational::from(0u32), Rational::from(1u32))?;
//! let approx = remez.approximate(&Function::Atan)?;
//!
//! assert!(approx.is_converged());
//! # Ok::<(), minimax::remez::RemezError>(())
//! ```

pub mod format;
pub mod functions;
pub mod opts;
pub mod precision;
pub mod remez;
pub mod utils;

pub use precision::Precision;
pub use remez::{Approximation, Remez, RemezError, Status};
