use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use malachite::Natural;
use minimax::format::Format;
use minimax::opts::Opts;
use minimax::utils::rational::to_f64;
use minimax::{Approximation, Precision, Remez, RemezError};

fn configure(opts: &Opts) -> Result<Remez, RemezError> {
    let precision = Precision::new(opts.digits)?;

    let remez =
        Remez::new(opts.degree, opts.lower.clone(), opts.upper.clone())?
            .with_precision(precision)
            .with_max_iterations(opts.max_iterations)?;

    match &opts.tolerance {
        Some(tolerance) => remez.with_tolerance(tolerance.clone()),
        None => Ok(remez),
    }
}

fn write_output(
    approx: &Approximation,
    words: Option<(&Format, Vec<Natural>)>,
    file: &Option<PathBuf>,
) -> io::Result<()> {
    let mut out: Box<dyn io::Write> = if let Some(path) = file {
        Box::new(File::create(path)?)
    } else {
        Box::new(io::stdout())
    };

    writeln!(out, "status: {}", approx.status)?;
    writeln!(out, "iterations: {}", approx.iterations)?;
    writeln!(out, "max error: {:e}", approx.max_error())?;

    match words {
        Some((format, words)) => {
            let width = format.hex_digits();

            for (c, word) in approx.coefficients.iter().zip(words) {
                let hex = format!("{word:x}");

                writeln!(out, "{:+.17e} {hex:0>width$}", to_f64(c))?;
            }
        }
        None => {
            for c in &approx.coefficients {
                writeln!(out, "{:+.17e}", to_f64(c))?;
            }
        }
    }

    out.flush()
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    env_logger::Builder::new()
        .filter_level(opts.log_level)
        .init();

    let approx = match configure(&opts)
        .and_then(|remez| remez.approximate(&opts.function))
    {
        Ok(approx) => approx,
        Err(err) => {
            eprintln!("error: {err}");

            return ExitCode::FAILURE;
        }
    };

    let words = match &opts.format {
        Some(format) => match approx.to_fixed_point(format) {
            Some(words) => Some((format, words)),
            None => {
                eprintln!("error: coefficients do not fit in {format}");

                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    if let Err(err) = write_output(&approx, words, &opts.output) {
        eprintln!("error: {err}");

        return ExitCode::FAILURE;
    }

    if opts.require_convergence && !approx.is_converged() {
        eprintln!(
            "error: no convergence within {} iterations",
            approx.iterations
        );

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
