//! Target functions.

use malachite::Rational;
use strum_macros::{Display, EnumString, VariantNames};

use crate::precision::Precision;
use crate::utils::rational::elementary;

/// A real function that can be evaluated at an arbitrary working precision.
pub trait Target {
    fn eval(&self, x: &Rational, prec: &Precision) -> Rational;

    /// Returns true if the function is defined everywhere above `lower`.
    fn is_defined_from(&self, _lower: &Rational) -> bool {
        true
    }
}

impl<F> Target for F
where
    F: Fn(&Rational, &Precision) -> Rational + ?Sized,
{
    fn eval(&self, x: &Rational, prec: &Precision) -> Rational {
        self(x, prec)
    }
}

/// Built-in target functions, selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[derive(VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum Function {
    Atan,
    Sin,
    Cos,
    Exp,
    Log,
    Sqrt,
}

impl Target for Function {
    fn eval(&self, x: &Rational, prec: &Precision) -> Rational {
        match self {
            Function::Atan => elementary::atan(x, prec),
            Function::Sin => elementary::sin(x, prec),
            Function::Cos => elementary::cos(x, prec),
            Function::Exp => elementary::exp(x, prec),
            Function::Log => elementary::ln(x, prec),
            Function::Sqrt => elementary::sqrt(x, prec),
        }
    }

    fn is_defined_from(&self, lower: &Rational) -> bool {
        match self {
            Function::Log => *lower > Rational::from(0u32),
            Function::Sqrt => *lower >= Rational::from(0u32),
            _ => true,
        }
    }
}
