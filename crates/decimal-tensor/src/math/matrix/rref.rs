//! Gauss-Jordan reduction to reduced row-echelon form.

use super::Matrix;
use crate::config::DecimalPolicy;
use crate::math::scalar::Scalar;

impl Matrix {
    /// Reduced row-echelon form of this matrix, using the default
    /// [`DecimalPolicy`]. The receiver is left untouched.
    pub fn rref(&self) -> Matrix {
        self.rref_with(&DecimalPolicy::default())
    }

    /// Reduced row-echelon form with an explicit division policy.
    ///
    /// Pivots are searched column by column; a column with no nonzero entry
    /// at or below the current row is skipped. A pivot other than one is
    /// normalised by dividing every entry of its row by the pivot, cut to
    /// `policy.division_scale` digits, which is the only inexact step. The
    /// pivot itself divides to exactly one, so the result always passes
    /// [`Matrix::is_rref`].
    pub fn rref_with(&self, policy: &DecimalPolicy) -> Matrix {
        let mut out = self.clone();
        let (nrows, ncols) = out.size();
        if nrows == 0 || ncols == 0 {
            return out;
        }
        out.reduce(policy);
        log::debug!("rref: reduced {}x{} matrix", nrows, ncols);
        out
    }

    fn reduce(&mut self, policy: &DecimalPolicy) {
        let (nrows, ncols) = self.size();
        let mut lead = 0;
        for r in 0..nrows {
            let Some((pivot_row, col)) = self.find_pivot(r, lead) else {
                break;
            };
            lead = col;
            log::trace!("rref: pivot for row {} found at ({}, {})", r, pivot_row, lead);

            self.rows.swap(pivot_row, r);
            self.normalise_row(r, lead, policy);

            let source = self.rows[r].clone();
            for (j, row) in self.rows.iter_mut().enumerate() {
                let factor = row[lead].negated();
                if j == r || factor.is_zero() {
                    continue;
                }
                for (entry, pivot_entry) in row.as_mut_slice().iter_mut().zip(source.iter()) {
                    let mut delta = pivot_entry.clone();
                    delta.multiply(&factor);
                    entry.add(&delta);
                }
            }

            lead += 1;
            if lead == ncols {
                break;
            }
        }
    }

    /// Divide row `r` by its nonzero entry at `lead`.
    fn normalise_row(&mut self, r: usize, lead: usize, policy: &DecimalPolicy) {
        let pivot = self.rows[r][lead].clone();
        if pivot.is_one() {
            return;
        }
        for entry in self.rows[r].as_mut_slice().iter_mut() {
            if let Some(q) = entry.quotient(&pivot, policy.division_scale, policy) {
                *entry = q;
            }
        }
    }

    /// First `(row, col)` with `row >= start_row`, `col >= start_col` and a
    /// nonzero entry, scanning column by column.
    fn find_pivot(&self, start_row: usize, start_col: usize) -> Option<(usize, usize)> {
        (start_col..self.width).find_map(|col| {
            (start_row..self.rows.len())
                .find(|&row| !self.rows[row][col].is_zero())
                .map(|row| (row, col))
        })
    }

    /// Whether this matrix is already in reduced row-echelon form.
    pub fn is_rref(&self) -> bool {
        let (nrows, ncols) = self.size();
        if nrows == 0 || ncols == 0 {
            return true;
        }

        let mut previous: Option<usize> = None;
        for (r, row) in self.rows.iter().enumerate() {
            let Some(col) = row.iter().position(|v| !v.is_zero()) else {
                return self.rows[r + 1..]
                    .iter()
                    .all(|rest| rest.iter().all(Scalar::is_zero));
            };

            if !row[col].is_one() {
                return false;
            }
            if previous.is_some_and(|p| col <= p) {
                return false;
            }
            let column_clear = self
                .rows
                .iter()
                .enumerate()
                .all(|(i, other)| i == r || other[col].is_zero());
            if !column_clear {
                return false;
            }
            previous = Some(col);
        }
        true
    }
}
