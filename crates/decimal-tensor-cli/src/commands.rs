//! Load a matrix, run one algorithm on it and emit the result.
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

use decimal_tensor::config::DecimalPolicy;
use decimal_tensor::io::{read_matrix_csv, write_matrix_csv};
use decimal_tensor::math::{Matrix, Scalar, Vector};

/// Log filter used when `DTENSOR_LOG` is unset: errors everywhere, file
/// loads and writes from the binary and both libraries.
pub const DEFAULT_LOG_FILTER: &str = "error,dtensor=info,decimal_tensor=info,decimal_tensor_cli=info";

/// Algorithms exposed as subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Rref,
    Det,
    Inverse,
    Trace,
    Transpose,
    Check,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Rref => "rref",
            Operation::Det => "det",
            Operation::Inverse => "inverse",
            Operation::Trace => "trace",
            Operation::Transpose => "transpose",
            Operation::Check => "check",
        }
    }

    pub fn all() -> [Operation; 6] {
        [
            Operation::Rref,
            Operation::Det,
            Operation::Inverse,
            Operation::Trace,
            Operation::Transpose,
            Operation::Check,
        ]
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::all()
            .into_iter()
            .find(|op| op.name() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown operation: {}", s))
    }
}

/// What an operation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Matrix(Matrix),
    Scalar(Scalar),
    Report(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Matrix(m) => write!(f, "{}", m),
            Outcome::Scalar(s) => write!(f, "{}", s),
            Outcome::Report(text) => write!(f, "{}", text.trim_end()),
        }
    }
}

/// Load a decimal policy from a JSON file. Missing fields take their defaults.
pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<DecimalPolicy> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let policy: DecimalPolicy = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(policy)
}

/// Apply `op` to an in-memory matrix.
pub fn apply(op: Operation, matrix: &Matrix, policy: &DecimalPolicy) -> Result<Outcome> {
    let outcome = match op {
        Operation::Rref => Outcome::Matrix(matrix.rref_with(policy)),
        Operation::Det => Outcome::Scalar(matrix.determinant()?),
        Operation::Inverse => Outcome::Matrix(matrix.inverse_with(policy)?),
        Operation::Trace => Outcome::Scalar(matrix.trace()?),
        Operation::Transpose => Outcome::Matrix(matrix.transpose()),
        Operation::Check => Outcome::Report(check_report(matrix)),
    };
    Ok(outcome)
}

/// Read the CSV at `input` and apply `op` to it.
pub fn run<P: AsRef<Path>>(op: Operation, input: P, policy: &DecimalPolicy) -> Result<Outcome> {
    let input = input.as_ref();
    let matrix = read_matrix_csv(input)
        .with_context(|| format!("Failed to load matrix: {}", input.display()))?;
    apply(op, &matrix, policy).with_context(|| format!("{} failed for {}", op.name(), input.display()))
}

/// One `name: value` line per structural predicate.
pub fn check_report(matrix: &Matrix) -> String {
    let (nrows, ncols) = matrix.size();
    let checks = [
        ("square", matrix.is_square()),
        ("upper_triangular", matrix.is_upper_triangular()),
        ("lower_triangular", matrix.is_lower_triangular()),
        ("identity", matrix.is_identity()),
        ("zero", matrix.is_zero_matrix()),
        ("rref", matrix.is_rref()),
    ];
    let mut report = format!("size: {}x{}\n", nrows, ncols);
    for (name, value) in checks {
        report.push_str(&format!("{}: {}\n", name, value));
    }
    report
}

/// Print the outcome, or write it to `output` when given. Scalars are
/// written as a one-cell CSV.
pub fn emit(outcome: &Outcome, output: Option<&Path>) -> Result<()> {
    let Some(path) = output else {
        println!("{}", outcome);
        return Ok(());
    };

    match outcome {
        Outcome::Matrix(m) => write_matrix_csv(path, m)?,
        Outcome::Scalar(s) => {
            let cell = Vector::from_scalars(vec![s.clone()]).to_row_matrix();
            write_matrix_csv(path, &cell)?
        }
        Outcome::Report(text) => fs::write(path, text)
            .with_context(|| format!("Failed to write report: {}", path.display()))?,
    }
    log::info!("[dtensor] Result written to {}", path.display());
    Ok(())
}
