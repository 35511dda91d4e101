use std::cmp::Ordering;

use itertools::Itertools;
use malachite::num::arithmetic::traits::{Abs, Sign};
use malachite::num::basic::traits::Zero;
use malachite::{Natural, Rational};
use strum_macros::Display;

use super::system;
use super::{chebyshev, extrema, nodes, roots, RemezError};
use crate::format::Format;
use crate::functions::Target;
use crate::precision::Precision;
use crate::utils::rational::{to_f64, FixedPoint};

/// Iteration cap used when none is configured.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// Configuration of a minimax approximation run.
#[derive(Clone, Debug)]
pub struct Remez {
    degree: u32,
    lower: Rational,
    upper: Rational,
    precision: Precision,
    max_iterations: u32,
    tolerance: Rational,
}

impl Remez {
    /// Configures an approximation of the given degree over `[lower, upper]`,
    /// with the default precision, iteration cap, and a relative tolerance of
    /// one in a million.
    pub fn new(
        degree: u32,
        lower: Rational,
        upper: Rational,
    ) -> Result<Remez, RemezError> {
        if lower >= upper {
            return Err(RemezError::EmptyInterval { lower, upper });
        }

        Ok(Remez {
            degree,
            lower,
            upper,
            precision: Precision::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: Rational::from_unsigneds(1u32, 1_000_000u32),
        })
    }

    pub fn with_precision(self, precision: Precision) -> Remez {
        Remez { precision, ..self }
    }

    pub fn with_max_iterations(
        self,
        max_iterations: u32,
    ) -> Result<Remez, RemezError> {
        if max_iterations == 0 {
            return Err(RemezError::NoIterations);
        }

        Ok(Remez {
            max_iterations,
            ..self
        })
    }

    /// Sets the relative spread of the extremal errors below which the
    /// iteration stops.
    pub fn with_tolerance(
        self,
        tolerance: Rational,
    ) -> Result<Remez, RemezError> {
        if tolerance.sign() != Ordering::Greater {
            return Err(RemezError::InvalidTolerance(tolerance));
        }

        Ok(Remez { tolerance, ..self })
    }

    pub fn degree(&self) -> u32 {
        self.degree
    }

    pub fn precision(&self) -> &Precision {
        &self.precision
    }

    /// Computes the minimax polynomial approximating `f`.
    ///
    /// Running out of iterations is not an error: the last estimate is
    /// returned with [`Status::Exhausted`].
    ///
    /// A symmetric reference set makes the leveled error vanish when the
    /// target has the parity of the degree, e.g. an odd target at odd degree
    /// on an interval centered on zero. The best approximation of degree `n`
    /// is then also the best of degree `n + 1`, so the exchange is rerun at
    /// the raised degree and the vanishing top coefficient is dropped.
    pub fn approximate<F>(&self, f: &F) -> Result<Approximation, RemezError>
    where
        F: Target + ?Sized,
    {
        if !f.is_defined_from(&self.lower) {
            return Err(RemezError::OutsideDomain {
                lower: self.lower.clone(),
            });
        }

        let run = match self.exchange(self.degree, f)? {
            Exchange::Finished(run) => return Ok(self.finish(run)),
            Exchange::Degenerate => {
                let raised = self.degree.checked_add(1).ok_or(
                    RemezError::DegenerateReference {
                        degree: self.degree,
                    },
                )?;

                log::info!(
                    "leveled error vanishes at degree {}; retrying at degree \
                     {raised}",
                    self.degree
                );

                match self.exchange(raised, f)? {
                    Exchange::Finished(run) => run,
                    Exchange::Degenerate => {
                        return Err(RemezError::DegenerateReference {
                            degree: raised,
                        })
                    }
                }
            }
        };

        self.lower_degree(run, f).map(|run| self.finish(run))
    }

    /// Runs the exchange iteration for a polynomial of the given degree.
    fn exchange<F>(&self, degree: u32, f: &F) -> Result<Exchange, RemezError>
    where
        F: Target + ?Sized,
    {
        let prec = &self.precision;
        let points = degree as usize + 2;

        let mut reference =
            nodes::chebyshev_nodes(points, &self.lower, &self.upper, prec)?;

        let mut last = None;

        for iteration in 1..=self.max_iterations {
            let solution = system::solve_reference(&reference, f, prec)?;

            let residual = |x: &Rational| {
                let p = chebyshev::evaluate(&solution.coefficients, x, prec);

                prec.round(f.eval(x, prec) - p)
            };

            if solution.error_vanishes(prec) {
                let threshold = prec.epsilon() * &solution.scale;

                // The residual must also vanish between the reference
                // points for the fit to be exact.
                let exact = reference.iter().tuple_windows().all(|(a, b)| {
                    let mid = prec.round((a + b) >> 1u32);

                    residual(&mid).abs() <= threshold
                });

                if !exact {
                    return Ok(Exchange::Degenerate);
                }

                log::info!("exact fit found at iteration {iteration}");

                let errors: Vec<_> = reference.iter().map(residual).collect();

                return Ok(Exchange::Finished(Run {
                    chebyshev: solution.coefficients,
                    extrema: reference,
                    residuals: errors,
                    iterations: iteration,
                    status: Status::Converged,
                }));
            }

            let crossings = reference
                .iter()
                .tuple_windows()
                .map(|(a, b)| roots::bisect(residual, a, b, prec))
                .collect::<Result<Vec<_>, _>>()?;

            // The extrema of the first and last subintervals are pinned to
            // the endpoints of the domain.
            let mut extrema = Vec::with_capacity(points);

            extrema.push(self.upper.clone());

            for (a, b) in crossings.iter().tuple_windows() {
                extrema.push(extrema::locate_extremum(residual, a, b, prec)?);
            }

            extrema.push(self.lower.clone());

            let errors: Vec<_> = extrema.iter().map(residual).collect();

            let mean = mean_magnitude(&errors);
            let deviation = max_deviation(&errors, &mean);

            log::debug!(
                "iteration {iteration}: leveled error {:e}, mean error {:e}, \
                 deviation {:e}",
                to_f64(&solution.leveled_error),
                to_f64(&mean),
                to_f64(&deviation),
            );

            if deviation <= &self.tolerance * &mean && alternating(&errors) {
                log::info!("converged after {iteration} iterations");

                return Ok(Exchange::Finished(Run {
                    chebyshev: solution.coefficients,
                    extrema,
                    residuals: errors,
                    iterations: iteration,
                    status: Status::Converged,
                }));
            }

            reference = extrema.clone();
            last = Some((solution, extrema, errors));
        }

        let Some((solution, extrema, errors)) = last else {
            return Err(RemezError::NoIterations);
        };

        log::warn!(
            "no convergence within {} iterations; returning last estimate",
            self.max_iterations
        );

        Ok(Exchange::Finished(Run {
            chebyshev: solution.coefficients,
            extrema,
            residuals: errors,
            iterations: self.max_iterations,
            status: Status::Exhausted,
        }))
    }

    /// Drops the top coefficient of a run at a raised degree, checking that
    /// the remaining polynomial still equioscillates on the extrema.
    fn lower_degree<F>(&self, run: Run, f: &F) -> Result<Run, RemezError>
    where
        F: Target + ?Sized,
    {
        let prec = &self.precision;

        let mut coefficients = run.chebyshev;
        coefficients.pop();

        let residuals: Vec<_> = run
            .extrema
            .iter()
            .map(|x| {
                let p = chebyshev::evaluate(&coefficients, x, prec);

                prec.round(f.eval(x, prec) - p)
            })
            .collect();

        let mean = mean_magnitude(&residuals);
        let leveled = max_deviation(&residuals, &mean)
            <= &self.tolerance * &mean
            && alternating(&residuals);

        if run.status == Status::Converged && !leveled {
            return Err(RemezError::DegenerateReference {
                degree: self.degree,
            });
        }

        Ok(Run {
            chebyshev: coefficients,
            residuals,
            ..run
        })
    }

    fn finish(&self, run: Run) -> Approximation {
        Approximation {
            coefficients: chebyshev::to_power_basis(&run.chebyshev),
            chebyshev: run.chebyshev,
            leveled_error: mean_magnitude(&run.residuals),
            extrema: run.extrema,
            residuals: run.residuals,
            iterations: run.iterations,
            status: run.status,
        }
    }
}

/// Outcome of one exchange iteration.
enum Exchange {
    Finished(Run),
    /// The leveled error vanished without the residual vanishing.
    Degenerate,
}

struct Run {
    chebyshev: Vec<Rational>,
    extrema: Vec<Rational>,
    residuals: Vec<Rational>,
    iterations: u32,
    status: Status,
}

fn mean_magnitude(values: &[Rational]) -> Rational {
    if values.is_empty() {
        return Rational::ZERO;
    }

    let sum: Rational = values.iter().map(Abs::abs).sum();

    sum / Rational::from(values.len())
}

fn max_deviation(values: &[Rational], mean: &Rational) -> Rational {
    values
        .iter()
        .map(|e| (e.abs() - mean).abs())
        .max()
        .unwrap_or(Rational::ZERO)
}

/// Returns true if the values are nonzero and alternate in sign.
fn alternating(values: &[Rational]) -> bool {
    values.iter().tuple_windows().all(|(a, b)| {
        a.sign() != Ordering::Equal && a.sign() == b.sign().reverse()
    })
}

/// How a run terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    /// The extremal errors agree to within the tolerance.
    Converged,
    /// The iteration cap was reached first.
    Exhausted,
}

/// The result of a minimax approximation run.
#[derive(Clone, Debug)]
pub struct Approximation {
    /// Power-basis coefficients `c_0, ..., c_n`.
    pub coefficients: Vec<Rational>,
    /// Chebyshev-basis coefficients of the same polynomial.
    pub chebyshev: Vec<Rational>,
    /// Mean magnitude of the error at the extrema.
    pub leveled_error: Rational,
    /// Final extrema, from the upper to the lower end of the domain.
    pub extrema: Vec<Rational>,
    /// Signed error at each of the extrema.
    pub residuals: Vec<Rational>,
    pub iterations: u32,
    pub status: Status,
}

impl Approximation {
    pub fn coefficients_f64(&self) -> Vec<f64> {
        self.coefficients.iter().map(to_f64).collect()
    }

    /// The leveled error as a double.
    pub fn max_error(&self) -> f64 {
        to_f64(&self.leveled_error)
    }

    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }

    /// Returns true if the error changes sign between consecutive extrema.
    pub fn alternates(&self) -> bool {
        alternating(&self.residuals)
    }

    /// Evaluates the polynomial exactly at `x`.
    pub fn evaluate(&self, x: &Rational) -> Rational {
        self.coefficients
            .iter()
            .rev()
            .fold(Rational::ZERO, |acc, c| acc * x + c)
    }

    /// Quantizes each coefficient to the nearest word of `format`, or returns
    /// `None` if any coefficient is out of range.
    pub fn to_fixed_point(&self, format: &Format) -> Option<Vec<Natural>> {
        self.coefficients
            .iter()
            .map(|c| c.to_fixed_point(format))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use malachite::num::conversion::traits::FromSciString;

    use crate::functions::Function;

    fn rational(s: &str) -> Rational {
        Rational::from_sci_string(s).unwrap()
    }

    fn remez(degree: u32, lower: &str, upper: &str, digits: u32) -> Remez {
        Remez::new(degree, rational(lower), rational(upper))
            .unwrap()
            .with_precision(Precision::new(digits).unwrap())
    }

    fn assert_equioscillates(approx: &Approximation, tolerance: f64) {
        let mean = approx.max_error();

        assert!(approx.alternates(), "{:?}", approx.residuals);

        for residual in &approx.residuals {
            let deviation = (to_f64(residual).abs() - mean).abs();

            assert!(deviation <= tolerance * mean, "{deviation} vs {mean}");
        }
    }

    /// Checks that the error on a uniform grid never exceeds the leveled
    /// error by more than the convergence tolerance allows.
    fn assert_bounded_on_grid(
        approx: &Approximation,
        function: Function,
        lower: &str,
        upper: &str,
    ) {
        let prec = Precision::new(30).unwrap();
        let lower = rational(lower);
        let width = rational(upper) - &lower;
        let bound = &approx.leveled_error * rational("1.0001");

        for i in 0..=200u32 {
            let x = &lower + &width * Rational::from_unsigneds(i, 200);
            let error = function.eval(&x, &prec) - approx.evaluate(&x);

            assert!(error.abs() <= bound, "{function} at {}", to_f64(&x));
        }
    }

    #[test]
    fn cubic_is_reproduced_exactly() {
        let cube = |x: &Rational, _: &Precision| x * x * x;
        let approx = remez(3, "-1", "1", 50).approximate(&cube).unwrap();

        assert_eq!(approx.status, Status::Converged);
        assert_eq!(approx.iterations, 1);
        assert!(approx.max_error() < 1e-40);

        let expected = [0., 0., 0., 1.];

        for (c, e) in approx.coefficients_f64().iter().zip(expected) {
            assert!((c - e).abs() < 1e-40, "{c}");
        }
    }

    #[test]
    fn best_line_through_parabola() {
        let square = |x: &Rational, _: &Precision| x * x;
        let approx = remez(1, "-1", "1", 40).approximate(&square).unwrap();

        assert!(approx.is_converged());
        assert_eq!(approx.iterations, 2);
        assert_eq!(approx.extrema.len(), 3);
        assert!((approx.max_error() - 0.5).abs() < 1e-12);

        let coefficients = approx.coefficients_f64();

        assert!((coefficients[0] - 0.5).abs() < 1e-12);
        assert!(coefficients[1].abs() < 1e-12);
        assert_equioscillates(&approx, 1e-6);
    }

    #[test]
    fn exponential_equioscillates() {
        let approx = remez(4, "0", "1", 30)
            .approximate(&Function::Exp)
            .unwrap();

        assert!(approx.is_converged());
        assert_eq!(approx.coefficients.len(), 5);
        assert_equioscillates(&approx, 1e-6);

        // Chebyshev interpolation bound for e^x on [0, 1].
        assert!(approx.max_error() < 4.5e-5);
        assert!(approx.max_error() > 0.0);

        assert_eq!(approx.extrema.first(), Some(&rational("1")));
        assert_eq!(approx.extrema.last(), Some(&rational("0")));
    }

    #[test]
    fn error_is_bounded_between_extrema() {
        let approx = remez(3, "1", "2", 30)
            .approximate(&Function::Log)
            .unwrap();

        assert!(approx.is_converged());
        assert_equioscillates(&approx, 1e-6);
        assert_bounded_on_grid(&approx, Function::Log, "1", "2");
    }

    #[test]
    fn odd_targets_on_symmetric_interval() {
        for (function, degree) in [
            (Function::Sin, 3),
            (Function::Atan, 5),
            (Function::Atan, 1),
        ] {
            let approx = remez(degree, "-1", "1", 30)
                .approximate(&function)
                .unwrap();

            assert!(approx.is_converged(), "{function} {degree}");
            assert_eq!(approx.coefficients.len(), degree as usize + 1);
            assert_eq!(approx.extrema.len(), degree as usize + 3);
            assert!(approx.max_error() > 1e-9, "{function} {degree}");

            assert_equioscillates(&approx, 1e-6);
            assert_bounded_on_grid(&approx, function, "-1", "1");

            for c in approx.coefficients_f64().iter().step_by(2) {
                assert!(c.abs() < 1e-12, "{function} {degree}: {c}");
            }
        }
    }

    #[test]
    fn even_target_on_symmetric_interval() {
        let approx = remez(4, "-1", "1", 30)
            .approximate(&Function::Cos)
            .unwrap();

        assert!(approx.is_converged());
        assert_eq!(approx.coefficients.len(), 5);
        assert!(approx.max_error() > 1e-9);

        assert_equioscillates(&approx, 1e-6);
        assert_bounded_on_grid(&approx, Function::Cos, "-1", "1");

        for c in approx.coefficients_f64().iter().skip(1).step_by(2) {
            assert!(c.abs() < 1e-12, "{c}");
        }
    }

    #[test]
    fn constant_through_cosine_is_midrange() {
        let approx = remez(0, "-1", "1", 30)
            .approximate(&Function::Cos)
            .unwrap();

        assert!(approx.is_converged());
        assert_eq!(approx.coefficients.len(), 1);
        assert_equioscillates(&approx, 1e-6);

        let (low, high) = (1f64.cos(), 1.0);
        let constant = approx.coefficients_f64()[0];

        assert!((constant - (low + high) / 2.0).abs() < 1e-12);
        assert!((approx.max_error() - (high - low) / 2.0).abs() < 1e-12);
        assert_bounded_on_grid(&approx, Function::Cos, "-1", "1");
    }

    #[test]
    fn trait_object_target() {
        let cube = |x: &Rational, _: &Precision| x * x * x;
        let dynamic: &dyn Fn(&Rational, &Precision) -> Rational = &cube;

        let approx = remez(3, "-1", "1", 30).approximate(dynamic).unwrap();

        assert!(approx.is_converged());
        assert!(approx.max_error() < 1e-25);
    }

    #[test]
    fn target_outside_its_domain() {
        let cases = [(Function::Log, "0"), (Function::Sqrt, "-1")];

        for (function, lower) in cases {
            assert!(matches!(
                remez(3, lower, "1", 20).approximate(&function),
                Err(RemezError::OutsideDomain { .. })
            ));
        }
    }

    #[test]
    fn deterministic() {
        let config = remez(5, "0", "1", 30);

        let first = config.approximate(&Function::Atan).unwrap();
        let second = config.clone().approximate(&Function::Atan).unwrap();

        assert_eq!(first.coefficients, second.coefficients);
        assert_eq!(first.leveled_error, second.leveled_error);
        assert_eq!(first.iterations, second.iterations);
    }

    #[test]
    fn exhausted_run_returns_last_estimate() {
        let square = |x: &Rational, _: &Precision| x * x;
        let approx = remez(1, "-1", "1", 40)
            .with_max_iterations(1)
            .unwrap()
            .approximate(&square)
            .unwrap();

        assert_eq!(approx.status, Status::Exhausted);
        assert!(!approx.is_converged());
        assert_eq!(approx.iterations, 1);
        assert_eq!(approx.coefficients.len(), 2);
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(matches!(
            Remez::new(3, rational("1"), rational("0")),
            Err(RemezError::EmptyInterval { .. })
        ));
        assert!(matches!(
            remez(3, "0", "1", 20).with_max_iterations(0),
            Err(RemezError::NoIterations)
        ));
        assert!(matches!(
            remez(3, "0", "1", 20).with_tolerance(Rational::ZERO),
            Err(RemezError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn fixed_point_coefficients() {
        let cube = |x: &Rational, _: &Precision| x * x * x;
        let approx = remez(3, "-1", "1", 50).approximate(&cube).unwrap();

        let words = approx.to_fixed_point(&"Q2.14".parse().unwrap()).unwrap();

        assert_eq!(words, [0u32, 0, 0, 1 << 14]);
        assert_eq!(approx.to_fixed_point(&"UQ0.8".parse().unwrap()), None);
    }

    #[test]
    #[ignore = "slow without optimizations"]
    fn arctangent_to_double_precision() {
        let approx = remez(24, "0", "1", 50)
            .approximate(&Function::Atan)
            .unwrap();

        assert!(approx.is_converged());
        assert!(approx.iterations <= DEFAULT_MAX_ITERATIONS);
        assert!(approx.max_error() < 1e-15);
        assert_equioscillates(&approx, 1e-6);
    }
}
