//! Cofactor-expansion determinant and adjugate-based inverse.
//!
//! Both recurse over minors and are exponential in `n`. Determinants of
//! matrices with exact entries are themselves exact; only the division of
//! the adjugate by the determinant is rounded.

use super::Matrix;
use crate::config::DecimalPolicy;
use crate::error::{Result, TensorError};
use crate::math::scalar::Scalar;

impl Matrix {
    /// Laplace expansion along the first row.
    ///
    /// The `0 x 0` determinant is one by convention.
    pub fn determinant(&self) -> Result<Scalar> {
        let n = self.require_square("determinant")?;
        match n {
            0 => Ok(Scalar::one()),
            1 => self.get(0, 0),
            2 => {
                let mut ad = self.get(0, 0)?;
                ad.multiply(&self.get(1, 1)?);
                let mut bc = self.get(0, 1)?;
                bc.multiply(&self.get(1, 0)?);
                ad.add(&bc.negated());
                Ok(ad)
            }
            _ => {
                let mut det = Scalar::zero();
                for j in 0..n {
                    let entry = self.get(0, j)?;
                    if entry.is_zero() {
                        continue;
                    }
                    let mut term = self.minor(0, j)?.determinant()?;
                    term.multiply(&entry);
                    if j % 2 == 1 {
                        term = term.negated();
                    }
                    det.add(&term);
                }
                Ok(det)
            }
        }
    }

    /// `(-1)^(i+j) * det(minor(i, j))`
    pub fn cofactor(&self, i: usize, j: usize) -> Result<Scalar> {
        self.require_square("cofactor")?;
        let det = self.minor(i, j)?.determinant()?;
        Ok(if (i + j) % 2 == 1 { det.negated() } else { det })
    }

    /// Transpose of the cofactor matrix.
    pub fn adjugate(&self) -> Result<Matrix> {
        let n = self.require_square("adjugate")?;
        let mut rows = vec![Vec::with_capacity(n); n];
        for i in 0..n {
            for (j, row) in rows.iter_mut().enumerate() {
                // cofactor (i, j) lands at (j, i)
                row.push(self.cofactor(i, j)?);
            }
        }
        Matrix::from_scalar_rows(rows)
    }

    /// Inverse using the default [`DecimalPolicy`].
    pub fn inverse(&self) -> Result<Matrix> {
        self.inverse_with(&DecimalPolicy::default())
    }

    /// `adjugate / det`, each entry's quotient cut to `policy.inverse_scale`
    /// fractional digits.
    pub fn inverse_with(&self, policy: &DecimalPolicy) -> Result<Matrix> {
        let n = self.require_square("inverse")?;
        if n == 0 {
            return Ok(Matrix::empty());
        }

        let det = self.determinant()?;
        log::debug!("inverse: {}x{} determinant = {}", n, n, det);
        if det.is_zero() {
            return Err(TensorError::SingularMatrix);
        }

        let mut adj = self.adjugate()?;
        for row in adj.rows.iter_mut() {
            for entry in row.as_mut_slice().iter_mut() {
                if let Some(q) = entry.quotient(&det, policy.inverse_scale, policy) {
                    *entry = q;
                }
            }
        }
        Ok(adj)
    }
}
