//! Scalar, vector and matrix types backed by arbitrary-precision decimals.
//!
//! `Scalar` wraps one `BigDecimal`, `Vector` is a fixed-length row of
//! scalars, and `Matrix` is a rectangular stack of vectors. The matrix
//! algorithms (elementary operations, RREF, determinant, inverse) live in
//! submodules of `matrix` and are exposed as inherent methods.
pub mod matrix;
pub mod scalar;
pub mod vector;

pub use matrix::Matrix;
pub use scalar::Scalar;
pub use vector::Vector;
