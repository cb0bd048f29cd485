//! Elementary row and column operations.
//!
//! These are the only mutations RREF and the inverse are built from. Each
//! validates its indices up front, so a failing call leaves the matrix as
//! it was.

use super::Matrix;
use crate::error::Result;
use crate::math::scalar::Scalar;

impl Matrix {
    pub fn swap_rows(&mut self, i: usize, j: usize) -> Result<&mut Self> {
        self.check_row(i)?;
        self.check_row(j)?;
        self.rows.swap(i, j);
        Ok(self)
    }

    pub fn swap_cols(&mut self, i: usize, j: usize) -> Result<&mut Self> {
        self.check_col(i)?;
        self.check_col(j)?;
        for row in self.rows.iter_mut() {
            row.as_mut_slice().swap(i, j);
        }
        Ok(self)
    }

    /// Multiply every entry of row `i` by `factor`.
    pub fn scale_row(&mut self, i: usize, factor: &Scalar) -> Result<&mut Self> {
        self.check_row(i)?;
        self.rows[i].scale(factor);
        Ok(self)
    }

    /// Multiply every entry of column `i` by `factor`.
    pub fn scale_col(&mut self, i: usize, factor: &Scalar) -> Result<&mut Self> {
        self.check_col(i)?;
        for row in self.rows.iter_mut() {
            row.as_mut_slice()[i].multiply(factor);
        }
        Ok(self)
    }

    /// `row[target] += factor * row[source]`
    ///
    /// With `target == source` this is `row[target] *= 1 + factor`.
    pub fn add_scaled_row(
        &mut self,
        target: usize,
        source: usize,
        factor: &Scalar,
    ) -> Result<&mut Self> {
        self.check_row(target)?;
        self.check_row(source)?;
        if target == source {
            let mut one_plus = Scalar::one();
            one_plus.add(factor);
            return self.scale_row(target, &one_plus);
        }
        let mut scaled = self.rows[source].clone();
        scaled.scale(factor);
        self.rows[target].add(&scaled)?;
        Ok(self)
    }

    /// `col[target] += factor * col[source]`, applied row by row.
    ///
    /// With `target == source` this is `col[target] *= 1 + factor`.
    pub fn add_scaled_col(
        &mut self,
        target: usize,
        source: usize,
        factor: &Scalar,
    ) -> Result<&mut Self> {
        self.check_col(target)?;
        self.check_col(source)?;
        if target == source {
            let mut one_plus = Scalar::one();
            one_plus.add(factor);
            return self.scale_col(target, &one_plus);
        }
        for row in self.rows.iter_mut() {
            let entries = row.as_mut_slice();
            let mut scaled = entries[source].clone();
            scaled.multiply(factor);
            entries[target].add(&scaled);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TensorError;

    fn sample() -> Matrix {
        Matrix::from_f64_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn swap_rows_twice_restores() {
        let mut a = sample();
        a.swap_rows(0, 1).unwrap();
        assert_eq!(a.get(0, 0).unwrap(), Scalar::from(4));
        a.swap_rows(0, 1).unwrap();
        assert_eq!(a, sample());
        a.swap_rows(1, 1).unwrap();
        assert_eq!(a, sample());
    }

    #[test]
    fn swap_cols_exchanges_columns() {
        let mut a = sample();
        a.swap_cols(0, 2).unwrap();
        assert_eq!(
            a,
            Matrix::from_f64_rows(&[[3.0, 2.0, 1.0], [6.0, 5.0, 4.0]]).unwrap()
        );
        assert!(matches!(
            a.swap_cols(0, 3),
            Err(TensorError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn scale_row_leaves_factor_untouched() {
        let mut a = sample();
        let factor = Scalar::from(2);
        a.scale_row(1, &factor).unwrap();
        assert_eq!(factor, Scalar::from(2));
        assert_eq!(a.get_row(1).unwrap().to_string(), "[8, 10, 12]");
    }

    #[test]
    fn scale_col_multiplies_each_row() {
        let mut a = sample();
        a.scale_col(1, &Scalar::from(-1)).unwrap();
        assert_eq!(a.get_col(1).unwrap().to_string(), "[-2, -5]");
    }

    #[test]
    fn add_scaled_row_combines_rows() {
        let mut a = sample();
        a.add_scaled_row(1, 0, &Scalar::from(-4)).unwrap();
        assert_eq!(
            a,
            Matrix::from_f64_rows(&[[1.0, 2.0, 3.0], [0.0, -3.0, -6.0]]).unwrap()
        );
        a.add_scaled_row(1, 0, &Scalar::from(4)).unwrap();
        assert_eq!(a, sample());
    }

    #[test]
    fn add_scaled_row_onto_itself_scales() {
        let mut a = sample();
        a.add_scaled_row(0, 0, &Scalar::from(2)).unwrap();
        assert_eq!(a.get_row(0).unwrap().to_string(), "[3, 6, 9]");
    }

    #[test]
    fn add_scaled_col_combines_columns() {
        let mut a = sample();
        a.add_scaled_col(2, 0, &Scalar::from(-3)).unwrap();
        assert_eq!(a.get_col(2).unwrap().to_string(), "[0, -6]");
        a.add_scaled_col(1, 1, &Scalar::from(-1)).unwrap();
        assert!(a.get_col(1).unwrap().iter().all(Scalar::is_zero));
    }

    #[test]
    fn out_of_range_leaves_matrix_untouched() {
        let mut a = sample();
        assert!(a.add_scaled_row(0, 5, &Scalar::one()).is_err());
        assert!(a.scale_row(2, &Scalar::one()).is_err());
        assert_eq!(a, sample());
    }
}
