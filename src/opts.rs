use std::path::PathBuf;

use argh::FromArgs;
use log::LevelFilter;
use malachite::num::conversion::traits::FromSciString;
use malachite::Rational;

use crate::format::Format;
use crate::functions::Function;
use crate::precision::DEFAULT_DIGITS;
use crate::remez::DEFAULT_MAX_ITERATIONS;

/// Minimax polynomial approximation by the Remez exchange algorithm.
#[derive(FromArgs)]
pub struct Opts {
    /// function to approximate (atan, sin, cos, exp, log, sqrt)
    #[argh(positional)]
    pub function: Function,

    /// polynomial degree
    #[argh(option, short = 'n', default = "24")]
    pub degree: u32,

    /// lower end of the interval
    #[argh(
        option,
        from_str_fn(parse_rational),
        default = "Rational::from(0u32)"
    )]
    pub lower: Rational,

    /// upper end of the interval
    #[argh(
        option,
        from_str_fn(parse_rational),
        default = "Rational::from(1u32)"
    )]
    pub upper: Rational,

    /// working precision in decimal digits
    #[argh(option, default = "DEFAULT_DIGITS")]
    pub digits: u32,

    /// iteration cap
    #[argh(option, default = "DEFAULT_MAX_ITERATIONS")]
    pub max_iterations: u32,

    /// relative spread of the extremal errors accepted as convergence
    #[argh(option, from_str_fn(parse_rational))]
    pub tolerance: Option<Rational>,

    /// also print coefficients as fixed-point words in this format
    #[argh(option)]
    pub format: Option<Format>,

    /// fail if the iteration cap is reached before convergence
    #[argh(switch)]
    pub require_convergence: bool,

    /// output file
    #[argh(option, short = 'o')]
    pub output: Option<PathBuf>,

    /// logging level
    #[argh(option, long = "log", default = "LevelFilter::Warn")]
    pub log_level: LevelFilter,
}

impl Opts {
    /// Parse options from `env::args`.
    pub fn parse() -> Opts {
        argh::from_env()
    }
}

fn parse_rational(value: &str) -> Result<Rational, String> {
    Rational::from_sci_string(value)
        .ok_or_else(|| format!("invalid number: {value}"))
}
