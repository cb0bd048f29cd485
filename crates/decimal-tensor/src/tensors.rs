//! Non-mutating counterparts of the in-place arithmetic.
//!
//! Each function clones its left operand and delegates to the in-place
//! method, so neither argument is modified.
use crate::error::Result;
use crate::math::matrix::{self, Matrix};
use crate::math::{Scalar, Vector};

pub fn add_scalars(a: &Scalar, b: &Scalar) -> Scalar {
    let mut out = a.clone();
    out.add(b);
    out
}

pub fn multiply_scalars(a: &Scalar, b: &Scalar) -> Scalar {
    let mut out = a.clone();
    out.multiply(b);
    out
}

pub fn add_vectors(a: &Vector, b: &Vector) -> Result<Vector> {
    let mut out = a.clone();
    out.add(b)?;
    Ok(out)
}

pub fn scale_vector(a: &Vector, factor: &Scalar) -> Vector {
    let mut out = a.clone();
    out.scale(factor);
    out
}

/// `a + b` as a new matrix.
pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let mut out = a.clone();
    out.add(b)?;
    Ok(out)
}

/// `a * b` as a new matrix.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    matrix::product(a, b)
}

pub fn hstack(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.hstack(b)
}

pub fn vstack(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.vstack(b)
}

pub fn filled(nrows: usize, ncols: usize, value: &Scalar) -> Result<Matrix> {
    Matrix::filled(nrows, ncols, value)
}

pub fn zeros(nrows: usize, ncols: usize) -> Result<Matrix> {
    Matrix::zeros(nrows, ncols)
}

pub fn ones(nrows: usize, ncols: usize) -> Result<Matrix> {
    Matrix::ones(nrows, ncols)
}

pub fn identity(n: usize) -> Result<Matrix> {
    Matrix::identity(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TensorError;

    fn m<R: AsRef<[f64]>>(rows: &[R]) -> Matrix {
        Matrix::from_f64_rows(rows).unwrap()
    }

    #[test]
    fn scalar_ops_leave_operands_alone() {
        let a = Scalar::from(3);
        let b = Scalar::parse("0.5").unwrap();
        assert_eq!(add_scalars(&a, &b), Scalar::parse("3.5").unwrap());
        assert_eq!(multiply_scalars(&a, &b), Scalar::parse("1.5").unwrap());
        assert_eq!(a, Scalar::from(3));
    }

    #[test]
    fn vector_ops_leave_operands_alone() {
        let a = Vector::from_f64s(&[1.0, 2.0]).unwrap();
        let b = Vector::from_f64s(&[3.0, 4.0]).unwrap();
        assert_eq!(add_vectors(&a, &b).unwrap().to_string(), "[4, 6]");
        assert_eq!(scale_vector(&a, &Scalar::from(-1)).to_string(), "[-1, -2]");
        assert_eq!(a.to_string(), "[1, 2]");
        assert!(add_vectors(&a, &Vector::from_f64s(&[1.0]).unwrap()).is_err());
    }

    #[test]
    fn matrix_add_and_multiply_are_pure() {
        let a = m(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = m(&[[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(add(&a, &b).unwrap(), m(&[[1.0, 3.0], [4.0, 4.0]]));
        assert_eq!(multiply(&a, &b).unwrap(), m(&[[2.0, 1.0], [4.0, 3.0]]));
        assert_eq!(multiply(&b, &a).unwrap(), m(&[[3.0, 4.0], [1.0, 2.0]]));
        assert_eq!(a, m(&[[1.0, 2.0], [3.0, 4.0]]));
        assert!(matches!(
            multiply(&a, &m(&[[1.0, 2.0]])),
            Err(TensorError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn stacking_then_slicing_recovers_blocks() {
        let a = m(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = m(&[[5.0], [6.0]]);
        let wide = hstack(&a, &b).unwrap();
        assert_eq!(wide.size(), (2, 3));
        assert_eq!(wide.sub_matrix(0, 1, 0, 1).unwrap(), a);
        assert_eq!(wide.sub_matrix(0, 1, 2, 2).unwrap(), b);

        let tall = vstack(&a, &m(&[[7.0, 8.0]])).unwrap();
        assert_eq!(tall.size(), (3, 2));
        assert_eq!(tall.get_row(2).unwrap().to_string(), "[7, 8]");
        assert!(vstack(&a, &b).is_err());
        assert!(hstack(&a, &m(&[[1.0]])).is_err());
    }

    #[test]
    fn builders() {
        assert!(ones(2, 3).unwrap().row_iter().all(|r| r.iter().all(Scalar::is_one)));
        assert!(zeros(1, 1).unwrap().is_zero_matrix());
        assert!(identity(4).unwrap().is_identity());
        assert_eq!(filled(2, 2, &Scalar::from(7)).unwrap().trace().unwrap(), Scalar::from(14));
        assert!(matches!(zeros(0, 2), Err(TensorError::InvalidRange { .. })));
    }
}
