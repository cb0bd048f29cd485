use std::fmt;
use std::ops::Index;
use std::slice::Iter;

use bigdecimal::BigDecimal;
use rand::Rng;

use crate::config::DecimalPolicy;
use crate::error::{Result, TensorError};
use crate::math::scalar::Scalar;
use crate::math::vector::Vector;

mod determinant;
mod elementary;
mod rref;

/// A rectangular matrix of [`Scalar`]s stored as a list of row [`Vector`]s.
///
/// # Ownership
///
/// The matrix owns every row. Element reads ([`Matrix::get`],
/// [`Matrix::get_row`], [`Matrix::get_col`]) return clones and writes
/// ([`Matrix::set`]) store clones.
///
/// # In place vs. new
///
/// Methods taking `&mut self` (the elementary row/column operations,
/// [`Matrix::add`], [`Matrix::multiply`], [`Matrix::multiply_left`]) modify
/// the receiver and return it for chaining. Everything that takes `&self`
/// and produces a matrix ([`Matrix::rref`], [`Matrix::transpose`],
/// [`Matrix::minor`], [`Matrix::inverse`], ...) allocates a new one.
///
/// # Degenerate shapes
///
/// A matrix with no rows reports its size as `(0, 0)`, but keeps the width
/// it was created with so that transposing an `m x 0` matrix twice gives
/// back an `m x 0` matrix. Two matrices without rows always compare equal,
/// add to each other and stack onto any matrix. Only [`Matrix::multiply`]
/// and [`Matrix::transpose`] look at the declared width.
#[derive(Clone, Debug)]
pub struct Matrix {
    rows: Vec<Vector>,
    width: usize,
}

impl Matrix {
    /// The `0 x 0` matrix.
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            width: 0,
        }
    }

    pub(crate) fn from_vectors_unchecked(rows: Vec<Vector>, width: usize) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == width));
        Self { rows, width }
    }

    /// Build a matrix from row vectors, which must all have the same length.
    pub fn from_rows(rows: Vec<Vector>) -> Result<Self> {
        let width = rows.first().map_or(0, Vector::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(TensorError::mismatch("from_rows", &[width], &[bad.len()]));
        }
        Ok(Self::from_vectors_unchecked(rows, width))
    }

    pub fn from_scalar_rows(rows: Vec<Vec<Scalar>>) -> Result<Self> {
        Self::from_rows(rows.into_iter().map(Vector::from_scalars).collect())
    }

    /// Build from a two-dimensional `f64` literal, e.g. `&[[1.0, 2.0], [3.0, 4.0]]`.
    pub fn from_f64_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|&v| Scalar::from_f64(v))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_scalar_rows(rows)
    }

    /// Build from a two-dimensional array of decimal literals.
    pub fn parse_rows<S: AsRef<str>, R: AsRef<[S]>>(rows: &[R]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|s| Scalar::parse(s.as_ref()))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_scalar_rows(rows)
    }

    pub fn filled(nrows: usize, ncols: usize, value: &Scalar) -> Result<Self> {
        check_dims(nrows, ncols)?;
        let row = Vector::filled(ncols, value)?;
        Ok(Self::from_vectors_unchecked(vec![row; nrows], ncols))
    }

    pub fn zeros(nrows: usize, ncols: usize) -> Result<Self> {
        Self::filled(nrows, ncols, &Scalar::zero())
    }

    pub fn ones(nrows: usize, ncols: usize) -> Result<Self> {
        Self::filled(nrows, ncols, &Scalar::one())
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::zeros(n, n)?;
        for (i, row) in m.rows.iter_mut().enumerate() {
            row.as_mut_slice()[i] = Scalar::one();
        }
        Ok(m)
    }

    pub fn random(nrows: usize, ncols: usize, lo: f64, hi: f64) -> Result<Self> {
        Self::random_with(
            &mut rand::thread_rng(),
            nrows,
            ncols,
            lo,
            hi,
            &DecimalPolicy::default(),
        )
    }

    pub fn random_with<R: Rng>(
        rng: &mut R,
        nrows: usize,
        ncols: usize,
        lo: f64,
        hi: f64,
        policy: &DecimalPolicy,
    ) -> Result<Self> {
        check_dims(nrows, ncols)?;
        let rows = (0..nrows)
            .map(|_| Vector::random_with(rng, ncols, lo, hi, policy))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_vectors_unchecked(rows, ncols))
    }

    /// `(rows, cols)`; a matrix without rows reports `(0, 0)`.
    pub fn size(&self) -> (usize, usize) {
        if self.rows.is_empty() {
            (0, 0)
        } else {
            (self.rows.len(), self.width)
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.size().1
    }

    /// Rows and declared width, used for shape compatibility checks.
    fn shape(&self) -> [usize; 2] {
        [self.rows.len(), self.width]
    }

    pub fn row_iter(&self) -> Iter<'_, Vector> {
        self.rows.iter()
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        let (nrows, ncols) = self.size();
        if row >= nrows || col >= ncols {
            return Err(TensorError::index(&[row, col], &[nrows, ncols]));
        }
        Ok(())
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.nrows() {
            return Err(TensorError::index(&[row], &[self.nrows()]));
        }
        Ok(())
    }

    fn check_col(&self, col: usize) -> Result<()> {
        if col >= self.ncols() {
            return Err(TensorError::index(&[col], &[self.ncols()]));
        }
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Scalar> {
        self.check_index(row, col)?;
        Ok(self.rows[row][col].clone())
    }

    pub fn set(&mut self, row: usize, col: usize, value: &Scalar) -> Result<()> {
        self.check_index(row, col)?;
        self.rows[row].as_mut_slice()[col] = value.clone();
        Ok(())
    }

    pub fn get_row(&self, row: usize) -> Result<Vector> {
        self.check_row(row)?;
        Ok(self.rows[row].clone())
    }

    pub fn get_col(&self, col: usize) -> Result<Vector> {
        self.check_col(col)?;
        Ok(self.rows.iter().map(|r| r[col].clone()).collect())
    }

    pub fn is_square(&self) -> bool {
        let (nrows, ncols) = self.size();
        nrows == ncols
    }

    /// Every entry strictly below the diagonal is zero. False for
    /// non-square matrices.
    pub fn is_upper_triangular(&self) -> bool {
        self.is_square()
            && self
                .rows
                .iter()
                .enumerate()
                .all(|(i, row)| row.as_slice()[..i].iter().all(Scalar::is_zero))
    }

    /// Every entry strictly above the diagonal is zero. False for
    /// non-square matrices.
    pub fn is_lower_triangular(&self) -> bool {
        self.is_square()
            && self
                .rows
                .iter()
                .enumerate()
                .all(|(i, row)| row.as_slice()[i + 1..].iter().all(Scalar::is_zero))
    }

    pub fn is_identity(&self) -> bool {
        self.is_square()
            && self.rows.iter().enumerate().all(|(i, row)| {
                row.iter().enumerate().all(|(j, v)| {
                    if i == j {
                        v.is_one()
                    } else {
                        v.is_zero()
                    }
                })
            })
    }

    pub fn is_zero_matrix(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(Scalar::is_zero))
    }

    /// Element-wise `self += other`. Shapes are compared by [`Matrix::size`],
    /// so any two row-less matrices add.
    pub fn add(&mut self, other: &Matrix) -> Result<&mut Self> {
        if self.size() != other.size() {
            return Err(TensorError::mismatch(
                "matrix add",
                &self.shape(),
                &other.shape(),
            ));
        }
        for (lhs, rhs) in self.rows.iter_mut().zip(other.rows.iter()) {
            lhs.add(rhs)?;
        }
        Ok(self)
    }

    /// `self = self * other`
    pub fn multiply(&mut self, other: &Matrix) -> Result<&mut Self> {
        *self = product(self, other)?;
        Ok(self)
    }

    /// `self = other * self`
    pub fn multiply_left(&mut self, other: &Matrix) -> Result<&mut Self> {
        *self = product(other, self)?;
        Ok(self)
    }

    /// Concatenate `other`'s columns to the right of this matrix.
    pub fn hstack(&self, other: &Matrix) -> Result<Matrix> {
        if self.nrows() != other.nrows() {
            return Err(TensorError::mismatch("hstack", &self.shape(), &other.shape()));
        }
        let rows = self
            .rows
            .iter()
            .zip(other.rows.iter())
            .map(|(a, b)| a.iter().chain(b.iter()).cloned().collect())
            .collect();
        Ok(Self::from_vectors_unchecked(rows, self.width + other.width))
    }

    /// Append `other`'s rows below this matrix. A row-less operand stacks
    /// onto anything.
    pub fn vstack(&self, other: &Matrix) -> Result<Matrix> {
        let width = if self.rows.is_empty() {
            other.width
        } else if other.rows.is_empty() || self.width == other.width {
            self.width
        } else {
            return Err(TensorError::mismatch("vstack", &self.shape(), &other.shape()));
        };
        let rows = self.rows.iter().chain(other.rows.iter()).cloned().collect();
        Ok(Self::from_vectors_unchecked(rows, width))
    }

    /// The block spanning rows `start_row..=end_row` and columns
    /// `start_col..=end_col`.
    pub fn sub_matrix(
        &self,
        start_row: usize,
        end_row: usize,
        start_col: usize,
        end_col: usize,
    ) -> Result<Matrix> {
        let (nrows, ncols) = self.size();
        if end_row < start_row || end_row >= nrows || end_col < start_col || end_col >= ncols {
            return Err(TensorError::index(
                &[start_row, end_row, start_col, end_col],
                &[nrows, ncols],
            ));
        }
        let rows = self.rows[start_row..=end_row]
            .iter()
            .map(|r| Vector::from_scalars(r.as_slice()[start_col..=end_col].to_vec()))
            .collect();
        Ok(Self::from_vectors_unchecked(rows, end_col - start_col + 1))
    }

    /// This matrix with `row` and `col` removed. A single-row or
    /// single-column matrix has an empty (`0 x 0`) minor.
    pub fn minor(&self, row: usize, col: usize) -> Result<Matrix> {
        self.check_index(row, col)?;
        let (nrows, ncols) = self.size();
        if nrows <= 1 || ncols <= 1 {
            return Ok(Matrix::empty());
        }
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != row)
            .map(|(_, r)| {
                r.iter()
                    .enumerate()
                    .filter(|&(j, _)| j != col)
                    .map(|(_, v)| v.clone())
                    .collect()
            })
            .collect();
        Ok(Self::from_vectors_unchecked(rows, ncols - 1))
    }

    pub fn transpose(&self) -> Matrix {
        let rows = (0..self.width)
            .map(|j| self.rows.iter().map(|r| r[j].clone()).collect())
            .collect();
        Self::from_vectors_unchecked(rows, self.rows.len())
    }

    /// Sum of the diagonal; zero for the `0 x 0` matrix.
    pub fn trace(&self) -> Result<Scalar> {
        self.require_square("trace")?;
        let mut sum = Scalar::zero();
        for (i, row) in self.rows.iter().enumerate() {
            sum.add(&row[i]);
        }
        Ok(sum)
    }

    fn require_square(&self, op: &'static str) -> Result<usize> {
        let (nrows, ncols) = self.size();
        if nrows != ncols {
            return Err(TensorError::NotSquare {
                op,
                rows: nrows,
                cols: ncols,
            });
        }
        Ok(nrows)
    }

    /// Same size and every entry within `tolerance` of its counterpart.
    pub fn approx_eq(&self, other: &Matrix, tolerance: &BigDecimal) -> bool {
        self.size() == other.size()
            && self.rows.iter().zip(other.rows.iter()).all(|(a, b)| {
                a.iter()
                    .zip(b.iter())
                    .all(|(x, y)| x.distance(y) <= *tolerance)
            })
    }
}

fn check_dims(nrows: usize, ncols: usize) -> Result<()> {
    if nrows == 0 || ncols == 0 {
        return Err(TensorError::InvalidRange {
            reason: format!("matrix dimensions must be positive, got {}x{}", nrows, ncols),
        });
    }
    Ok(())
}

/// `lhs * rhs` as a new matrix.
pub(crate) fn product(lhs: &Matrix, rhs: &Matrix) -> Result<Matrix> {
    if lhs.width != rhs.nrows() {
        return Err(TensorError::mismatch(
            "matrix multiply",
            &lhs.shape(),
            &rhs.shape(),
        ));
    }
    let columns: Vec<Vector> = (0..rhs.width)
        .map(|j| rhs.rows.iter().map(|r| r[j].clone()).collect())
        .collect();
    let mut rows = Vec::with_capacity(lhs.nrows());
    for row in lhs.rows.iter() {
        let entries = columns
            .iter()
            .map(|col| row.dot(col))
            .collect::<Result<Vec<_>>>()?;
        rows.push(Vector::from_scalars(entries));
    }
    Ok(Matrix::from_vectors_unchecked(rows, rhs.width))
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.rows == other.rows
    }
}

impl Eq for Matrix {}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::empty()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Scalar;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.rows[index.0][index.1]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "[[]]");
        }
        writeln!(f, "[")?;
        for (idx, row) in self.rows.iter().enumerate() {
            write!(f, "  {}", row)?;
            if idx + 1 != self.rows.len() {
                writeln!(f, ",")?;
            } else {
                writeln!(f)?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m<R: AsRef<[f64]>>(rows: &[R]) -> Matrix {
        Matrix::from_f64_rows(rows).unwrap()
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows = vec![
            Vector::from_f64s(&[1.0, 2.0]).unwrap(),
            Vector::from_f64s(&[3.0]).unwrap(),
        ];
        assert!(matches!(
            Matrix::from_rows(rows),
            Err(TensorError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn empty_matrix_reports_zero_by_zero() {
        let e = Matrix::empty();
        assert_eq!(e.size(), (0, 0));
        assert!(e.is_square());
        assert!(e.is_identity());
        assert!(e.is_upper_triangular() && e.is_lower_triangular());
        assert!(e.is_zero_matrix());
        assert_eq!(e.trace().unwrap(), Scalar::zero());
        assert_eq!(e.to_string(), "[[]]");
    }

    #[test]
    fn element_access_is_bounds_checked() {
        let mut a = m(&[[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(a.get(1, 0).unwrap(), Scalar::from(3));
        assert!(matches!(a.get(2, 0), Err(TensorError::IndexOutOfRange { .. })));
        assert!(a.set(0, 2, &Scalar::one()).is_err());
        a.set(0, 1, &Scalar::from(7)).unwrap();
        assert_eq!(a[(0, 1)], Scalar::from(7));
    }

    #[test]
    fn triangular_predicates() {
        let upper = m(&[[1.0, 2.0], [0.0, 3.0]]);
        let lower = m(&[[1.0, 0.0], [5.0, 3.0]]);
        assert!(upper.is_upper_triangular() && !upper.is_lower_triangular());
        assert!(lower.is_lower_triangular() && !lower.is_upper_triangular());
        let wide = m(&[[1.0, 0.0, 0.0]]);
        assert!(!wide.is_upper_triangular());
        assert!(!wide.is_identity());
    }

    #[test]
    fn identity_and_zero_predicates() {
        assert!(Matrix::identity(3).unwrap().is_identity());
        assert!(!m(&[[1.0, 0.0], [0.0, 2.0]]).is_identity());
        assert!(Matrix::zeros(2, 3).unwrap().is_zero_matrix());
        assert!(!m(&[[0.0, 0.1]]).is_zero_matrix());
        assert!(Matrix::identity(0).is_err());
    }

    #[test]
    fn multiply_and_multiply_left() {
        let mut a = m(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = m(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        a.multiply(&b).unwrap();
        assert_eq!(a, m(&[[4.0, 5.0], [10.0, 11.0]]));

        let mut c = m(&[[1.0, 1.0], [0.0, 1.0]]);
        c.multiply_left(&m(&[[2.0, 0.0], [0.0, 3.0]])).unwrap();
        assert_eq!(c, m(&[[2.0, 2.0], [0.0, 3.0]]));

        let before = c.clone();
        assert!(c.multiply(&m(&[[1.0, 2.0, 3.0]])).is_err());
        assert_eq!(c, before);
    }

    #[test]
    fn add_checks_shape() {
        let mut a = m(&[[1.0, 2.0]]);
        a.add(&m(&[[3.0, 4.0]])).unwrap();
        assert_eq!(a, m(&[[4.0, 6.0]]));
        assert!(matches!(
            a.add(&m(&[[1.0], [2.0]])),
            Err(TensorError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn transpose_of_degenerate_shapes_round_trips() {
        let tall_empty = Matrix::from_rows(vec![Vector::default(), Vector::default()]).unwrap();
        assert_eq!(tall_empty.size(), (2, 0));
        let t = tall_empty.transpose();
        assert_eq!(t.size(), (0, 0));
        assert_eq!(t.transpose(), tall_empty);
    }

    #[test]
    fn zero_column_matrix_predicates() {
        let no_cols = Matrix::from_rows(vec![Vector::default(); 2]).unwrap();
        assert_eq!(no_cols.size(), (2, 0));
        assert!(!no_cols.is_square());
        assert!(!no_cols.is_identity());
        assert!(!no_cols.is_upper_triangular() && !no_cols.is_lower_triangular());
        assert!(no_cols.is_zero_matrix());
        assert!(matches!(no_cols.trace(), Err(TensorError::NotSquare { .. })));
        assert_eq!(no_cols.to_string(), "[\n  [],\n  []\n]");
    }

    #[test]
    fn row_less_matrices_add_and_stack_like_they_compare() {
        // no rows but a declared width of two
        let no_rows = Matrix::from_rows(vec![Vector::default(); 2]).unwrap().transpose();
        assert_eq!(no_rows, Matrix::empty());
        assert!(no_rows.is_square() && no_rows.is_zero_matrix());

        let mut e = Matrix::empty();
        e.add(&no_rows).unwrap();
        assert_eq!(e, Matrix::empty());

        let row = m(&[[1.0, 2.0, 3.0]]);
        assert_eq!(no_rows.vstack(&row).unwrap(), row);
        assert_eq!(row.vstack(&no_rows).unwrap(), row);
        assert_eq!(Matrix::empty().vstack(&row).unwrap(), row);
        assert!(row.vstack(&m(&[[1.0]])).is_err());
    }

    #[test]
    fn minor_of_single_row_is_empty() {
        let a = m(&[[1.0, 2.0, 3.0]]);
        assert_eq!(a.minor(0, 1).unwrap().size(), (0, 0));
        assert!(a.minor(1, 0).is_err());
    }

    #[test]
    fn sub_matrix_checks_order() {
        let a = m(&[[1.0, 2.0], [3.0, 4.0]]);
        assert!(a.sub_matrix(1, 0, 0, 1).is_err());
        assert!(a.sub_matrix(0, 2, 0, 1).is_err());
        assert_eq!(a.sub_matrix(1, 1, 0, 1).unwrap(), m(&[[3.0, 4.0]]));
    }

    #[test]
    fn trace_requires_square() {
        assert!(matches!(
            m(&[[1.0, 2.0]]).trace(),
            Err(TensorError::NotSquare { .. })
        ));
    }

    #[test]
    fn display_lists_rows() {
        let a = m(&[[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(a.to_string(), "[\n  [1, 2],\n  [3, 4]\n]");
    }
}
