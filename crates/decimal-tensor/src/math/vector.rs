use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;
use std::slice::Iter;

use rand::Rng;

use crate::config::DecimalPolicy;
use crate::error::{Result, TensorError};
use crate::math::matrix::Matrix;
use crate::math::scalar::Scalar;

/// A fixed-length sequence of [`Scalar`]s.
///
/// The vector owns its elements outright: [`Vector::get`] hands out a clone
/// and [`Vector::set`] stores a clone, so no caller can reach inside.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Vector {
    data: Vec<Scalar>,
}

impl Vector {
    /// Wrap a list of scalars. Unlike the sized builders this accepts an
    /// empty list, which is how the rows of an `m x 0` matrix are stored.
    pub fn from_scalars(data: Vec<Scalar>) -> Self {
        Self { data }
    }

    pub fn filled(len: usize, value: &Scalar) -> Result<Self> {
        check_len(len)?;
        Ok(Self::from_scalars(vec![value.clone(); len]))
    }

    pub fn zeros(len: usize) -> Result<Self> {
        Self::filled(len, &Scalar::zero())
    }

    pub fn random(len: usize, lo: f64, hi: f64) -> Result<Self> {
        Self::random_with(&mut rand::thread_rng(), len, lo, hi, &DecimalPolicy::default())
    }

    pub fn random_with<R: Rng>(
        rng: &mut R,
        len: usize,
        lo: f64,
        hi: f64,
        policy: &DecimalPolicy,
    ) -> Result<Self> {
        check_len(len)?;
        (0..len)
            .map(|_| Scalar::random_with(rng, lo, hi, policy))
            .collect::<Result<Vec<_>>>()
            .map(Self::from_scalars)
    }

    pub fn from_f64s(values: &[f64]) -> Result<Self> {
        check_len(values.len())?;
        values
            .iter()
            .map(|&v| Scalar::from_f64(v))
            .collect::<Result<Vec<_>>>()
            .map(Self::from_scalars)
    }

    pub fn parse(literals: &[&str]) -> Result<Self> {
        check_len(literals.len())?;
        literals
            .iter()
            .map(|s| Scalar::parse(s))
            .collect::<Result<Vec<_>>>()
            .map(Self::from_scalars)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Scalar> {
        self.data.iter()
    }

    pub fn get(&self, index: usize) -> Result<Scalar> {
        self.data
            .get(index)
            .cloned()
            .ok_or_else(|| TensorError::index(&[index], &[self.len()]))
    }

    pub fn set(&mut self, index: usize, value: &Scalar) -> Result<()> {
        let len = self.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or_else(|| TensorError::index(&[index], &[len]))?;
        *slot = value.clone();
        Ok(())
    }

    /// Element-wise `self += other`.
    pub fn add(&mut self, other: &Vector) -> Result<&mut Self> {
        if self.len() != other.len() {
            return Err(TensorError::mismatch(
                "vector add",
                &[self.len()],
                &[other.len()],
            ));
        }
        for (lhs, rhs) in self.data.iter_mut().zip(other.data.iter()) {
            lhs.add(rhs);
        }
        Ok(self)
    }

    /// Multiply every element by `factor` in place.
    pub fn scale(&mut self, factor: &Scalar) -> &mut Self {
        for value in self.data.iter_mut() {
            value.multiply(factor);
        }
        self
    }

    /// Sum of element-wise products.
    pub fn dot(&self, other: &Vector) -> Result<Scalar> {
        if self.len() != other.len() {
            return Err(TensorError::mismatch(
                "dot product",
                &[self.len()],
                &[other.len()],
            ));
        }
        let mut sum = Scalar::zero();
        for (a, b) in self.iter().zip(other.iter()) {
            let mut product = a.clone();
            product.multiply(b);
            sum.add(&product);
        }
        Ok(sum)
    }

    /// A new `1 x n` matrix holding a copy of this vector.
    pub fn to_row_matrix(&self) -> Matrix {
        Matrix::from_vectors_unchecked(vec![self.clone()], self.len())
    }

    /// A new `n x 1` matrix holding a copy of this vector.
    pub fn to_col_matrix(&self) -> Matrix {
        let rows = self
            .iter()
            .map(|v| Vector::from_scalars(vec![v.clone()]))
            .collect();
        Matrix::from_vectors_unchecked(rows, 1)
    }

    pub(crate) fn as_slice(&self) -> &[Scalar] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Scalar] {
        &mut self.data
    }
}

fn check_len(len: usize) -> Result<()> {
    if len == 0 {
        return Err(TensorError::InvalidRange {
            reason: "vector length must be positive".to_string(),
        });
    }
    Ok(())
}

impl From<Vec<Scalar>> for Vector {
    fn from(value: Vec<Scalar>) -> Self {
        Vector::from_scalars(value)
    }
}

impl From<Vector> for Vec<Scalar> {
    fn from(value: Vector) -> Self {
        value.data
    }
}

impl FromIterator<Scalar> for Vector {
    fn from_iter<I: IntoIterator<Item = Scalar>>(iter: I) -> Self {
        Vector::from_scalars(iter.into_iter().collect())
    }
}

impl Index<usize> for Vector {
    type Output = Scalar;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
