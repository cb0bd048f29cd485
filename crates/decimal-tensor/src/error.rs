use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by scalar, vector and matrix operations.
///
/// Every fallible operation checks its preconditions before touching the
/// receiver, so an `Err` always leaves the receiver unmodified.
#[derive(Error, Debug)]
pub enum TensorError {
    /// A string could not be parsed as a decimal value.
    #[error("Invalid decimal literal '{input}'")]
    Parse { input: String },

    /// A random range was empty or a requested dimension was zero.
    #[error("Invalid range: {reason}")]
    InvalidRange { reason: String },

    /// Element, row or column access outside the current shape.
    #[error("Index {index:?} out of range for shape {shape:?}")]
    IndexOutOfRange { index: Vec<usize>, shape: Vec<usize> },

    /// Operand shapes are incompatible for a binary operation.
    #[error("Dimension mismatch in {op}: {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        op: &'static str,
        lhs: Vec<usize>,
        rhs: Vec<usize>,
    },

    /// The operation is only defined for square matrices.
    #[error("{op} requires a square matrix, got {rows}x{cols}")]
    NotSquare {
        op: &'static str,
        rows: usize,
        cols: usize,
    },

    /// The matrix has a zero determinant and cannot be inverted.
    #[error("Matrix is singular (determinant is zero)")]
    SingularMatrix,

    /// Malformed or inconsistent delimited text.
    #[error("CSV parse error at line {line}: {reason}")]
    CsvParse { line: u64, reason: String },

    /// The CSV source or destination could not be opened.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TensorError {
    pub(crate) fn index(index: &[usize], shape: &[usize]) -> Self {
        TensorError::IndexOutOfRange {
            index: index.to_vec(),
            shape: shape.to_vec(),
        }
    }

    pub(crate) fn mismatch(op: &'static str, lhs: &[usize], rhs: &[usize]) -> Self {
        TensorError::DimensionMismatch {
            op,
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TensorError>;
