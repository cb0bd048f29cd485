//! decimal-tensor: exact linear algebra over arbitrary-precision decimals.
//!
//! This crate provides `Scalar`, `Vector` and `Matrix` types whose entries
//! are `BigDecimal`s, the elementary row and column operations, row
//! reduction to reduced row-echelon form, cofactor determinants and
//! adjugate-based inverses. Addition, multiplication and determinants are
//! exact; the only rounding happens where a quotient is formed, governed by
//! [`config::DecimalPolicy`].
//!
//! Matrices can also be read from and written to CSV (see [`io::csv`]), and
//! [`tensors`] offers non-mutating wrappers over the in-place arithmetic.
pub mod config;
pub mod error;
pub mod io;
pub mod math;
pub mod tensors;

pub use config::{DecimalPolicy, Rounding};
pub use error::{Result, TensorError};
pub use math::{Matrix, Scalar, Vector};
