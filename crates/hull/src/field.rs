//! Exact linear algebra facade (component C1).
//!
//! Everything above this module talks to the scalar field only through
//! [`Scalar`], [`Vector`] and [`Matrix`]. No floating-point fallback exists
//! anywhere in the crate; `Scalar` is an arbitrary-precision rational, so
//! `null_space` / `basis_rows` are exact and deterministic given the same
//! input rows in the same order (several engine invariants depend on that).

use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

/// The ordered field the engine computes over.
pub type Scalar = BigRational;

/// Dense row vector over [`Scalar`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vector(pub Vec<Scalar>);

impl Vector {
    pub fn zeros(n: usize) -> Self {
        Vector(vec![Scalar::zero(); n])
    }

    pub fn unit(n: usize, i: usize) -> Self {
        let mut v = vec![Scalar::zero(); n];
        v[i] = Scalar::one();
        Vector(v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_zero_vector(&self) -> bool {
        self.0.iter().all(Zero::is_zero)
    }

    /// Index of the first non-zero entry, if any. Used wherever the source
    /// needs "some distinguishing coordinate" deterministically.
    pub fn first_nonzero_index(&self) -> Option<usize> {
        self.0.iter().position(|x| !x.is_zero())
    }

    pub fn add(&self, other: &Vector) -> Vector {
        Vector(self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect())
    }

    pub fn sub(&self, other: &Vector) -> Vector {
        Vector(self.0.iter().zip(&other.0).map(|(a, b)| a - b).collect())
    }

    pub fn scale(&self, k: &Scalar) -> Vector {
        Vector(self.0.iter().map(|a| a * k).collect())
    }

    pub fn negate(&self) -> Vector {
        Vector(self.0.iter().map(|a| -a).collect())
    }
}

impl Index<usize> for Vector {
    type Output = Scalar;
    fn index(&self, i: usize) -> &Scalar {
        &self.0[i]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, i: usize) -> &mut Scalar {
        &mut self.0[i]
    }
}

/// `u . v`
pub fn dot(u: &Vector, v: &Vector) -> Scalar {
    u.0.iter().zip(&v.0).map(|(a, b)| a * b).sum()
}

/// `sqr(v) = v . v`
pub fn sqr(v: &Vector) -> Scalar {
    dot(v, v)
}

/// Whether `x` is exactly zero.
pub fn is_zero(x: &Scalar) -> bool {
    Zero::is_zero(x)
}

/// `-1`, `0` or `+1` depending on the sign of `x`.
pub fn sign(x: &Scalar) -> i8 {
    match x.cmp(&Scalar::zero()) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Sign of the first non-zero coordinate of `v`, or `0` for the zero vector.
pub fn sign_of_vector(v: &Vector) -> i8 {
    match v.first_nonzero_index() {
        Some(i) => sign(&v.0[i]),
        None => 0,
    }
}

/// Dense row-major matrix over [`Scalar`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Vector>,
    cols: usize,
}

impl Matrix {
    pub fn from_rows(rows: Vec<Vector>, cols: usize) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == cols));
        Matrix { rows, cols }
    }

    pub fn zero(nrows: usize, ncols: usize) -> Self {
        Matrix {
            rows: (0..nrows).map(|_| Vector::zeros(ncols)).collect(),
            cols: ncols,
        }
    }

    pub fn identity(n: usize) -> Self {
        Matrix {
            rows: (0..n).map(|i| Vector::unit(n, i)).collect(),
            cols: n,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &Vector {
        &self.rows[i]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut Vector {
        &mut self.rows[i]
    }

    pub fn row_iter(&self) -> impl Iterator<Item = &Vector> {
        self.rows.iter()
    }

    pub fn push_row(&mut self, row: Vector) {
        debug_assert_eq!(row.len(), self.cols);
        self.rows.push(row);
    }

    pub fn remove_row(&mut self, i: usize) -> Vector {
        self.rows.remove(i)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Row selection: build a new matrix out of the rows at `idx`, in order.
    pub fn select_rows(&self, idx: &[usize]) -> Matrix {
        Matrix {
            rows: idx.iter().map(|&i| self.rows[i].clone()).collect(),
            cols: self.cols,
        }
    }

    /// Row concatenation (`self` on top of `other`).
    pub fn vcat(&self, other: &Matrix) -> Matrix {
        debug_assert_eq!(self.cols, other.cols);
        let mut rows = self.rows.clone();
        rows.extend(other.rows.iter().cloned());
        Matrix { rows, cols: self.cols }
    }

    /// Column slicing: keep only columns `0..n`.
    pub fn first_columns(&self, n: usize) -> Matrix {
        Matrix {
            rows: self
                .rows
                .iter()
                .map(|r| Vector(r.0[..n].to_vec()))
                .collect(),
            cols: n,
        }
    }

    /// Zero-extend every row on the right by `extra` columns.
    pub fn pad_columns(&self, extra: usize) -> Matrix {
        Matrix {
            rows: self
                .rows
                .iter()
                .map(|r| {
                    let mut v = r.0.clone();
                    v.extend(std::iter::repeat(Scalar::zero()).take(extra));
                    Vector(v)
                })
                .collect(),
            cols: self.cols + extra,
        }
    }

    /// Prepend a constant column, shifting every existing column right by
    /// one. Used to homogenize affine points with a leading `1` (and
    /// linealities with a leading `0`) so the "far hyperplane" the engine
    /// reasons about is just column 0.
    pub fn prepend_constant_column(&self, value: Scalar) -> Matrix {
        Matrix {
            rows: self
                .rows
                .iter()
                .map(|r| {
                    let mut v = Vec::with_capacity(r.len() + 1);
                    v.push(value.clone());
                    v.extend(r.0.iter().cloned());
                    Vector(v)
                })
                .collect(),
            cols: self.cols + 1,
        }
    }

    /// Drop column 0, the inverse of [`Matrix::prepend_constant_column`].
    pub fn drop_first_column(&self) -> Matrix {
        Matrix {
            rows: self.rows.iter().map(|r| Vector(r.0[1..].to_vec())).collect(),
            cols: self.cols - 1,
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zero(self.cols, self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            for (j, x) in row.0.iter().enumerate() {
                out.rows[j][i] = x.clone();
            }
        }
        out
    }

    /// `self * other`
    pub fn mul(&self, other: &Matrix) -> Matrix {
        debug_assert_eq!(self.cols, other.rows());
        let ot = other.transpose();
        Matrix {
            rows: self
                .rows
                .iter()
                .map(|r| Vector(ot.rows.iter().map(|c| dot(r, c)).collect()))
                .collect(),
            cols: other.cols,
        }
    }

    /// `v * self` (row vector times matrix).
    pub fn apply_row(&self, v: &Vector) -> Vector {
        let t = self.transpose();
        Vector(t.rows.iter().map(|c| dot(v, c)).collect())
    }
}

/// Basis of `{ x : M x = 0 }` (M's rows read as linear functionals on
/// columns), via Gauss-Jordan elimination in reduced row-echelon form.
/// Pivoting always picks the first row (from the top) with a non-zero entry
/// in the current column, so the result is deterministic given the input
/// row order.
pub fn null_space(m: &Matrix) -> Matrix {
    let ncols = m.cols();
    let mut rows: Vec<Vector> = m.row_iter().cloned().collect();
    let nrows = rows.len();
    let mut pivot_row_of_col: Vec<Option<usize>> = vec![None; ncols];
    let mut rank = 0;

    for col in 0..ncols {
        let Some(pr) = (rank..nrows).find(|&r| !rows[r][col].is_zero()) else {
            continue;
        };
        rows.swap(rank, pr);
        let inv = rows[rank][col].clone().recip();
        rows[rank] = rows[rank].scale(&inv);
        for r in 0..nrows {
            if r == rank {
                continue;
            }
            if !rows[r][col].is_zero() {
                let factor = rows[r][col].clone();
                rows[r] = rows[r].sub(&rows[rank].scale(&factor));
            }
        }
        pivot_row_of_col[col] = Some(rank);
        rank += 1;
    }

    let free_cols: Vec<usize> = (0..ncols).filter(|&c| pivot_row_of_col[c].is_none()).collect();
    let mut basis = Vec::with_capacity(free_cols.len());
    for &fc in &free_cols {
        let mut v = Vector::zeros(ncols);
        v[fc] = Scalar::one();
        for col in 0..ncols {
            if let Some(pr) = pivot_row_of_col[col] {
                v[col] = -rows[pr][fc].clone();
            }
        }
        basis.push(v);
    }
    Matrix::from_rows(basis, ncols)
}

/// Indices of a maximal linearly independent subset of `m`'s rows, in the
/// order they first appear. Deterministic for the same reason as
/// [`null_space`]: earlier rows always win ties over later, dependent ones.
pub fn basis_rows(m: &Matrix) -> Vec<usize> {
    let mut pivots: Vec<(usize, Vector)> = Vec::new();
    let mut result = Vec::new();
    for (i, row) in m.row_iter().enumerate() {
        let mut r = row.clone();
        for (pc, prow) in &pivots {
            if !r[*pc].is_zero() {
                let factor = r[*pc].clone();
                r = r.sub(&prow.scale(&factor));
            }
        }
        if let Some(pc) = r.first_nonzero_index() {
            let inv = r[pc].clone().recip();
            pivots.push((pc, r.scale(&inv)));
            result.push(i);
        }
    }
    result
}

/// Update `ns`, a basis of subspace `N`, into a basis of `N ∩ v⊥`.
/// Returns `true` iff `v` was not already orthogonal to all of `N` (the
/// subspace shrank by exactly one dimension).
pub fn reduce_nullspace(ns: &mut Matrix, v: &Vector) -> bool {
    let Some(pivot) = (0..ns.rows()).find(|&i| !dot(ns.row(i), v).is_zero()) else {
        return false;
    };
    let prow = ns.row(pivot).clone();
    let pdot = dot(&prow, v);
    for i in 0..ns.rows() {
        if i == pivot {
            continue;
        }
        let d = dot(ns.row(i), v);
        if !d.is_zero() {
            let factor = d / pdot.clone();
            let reduced = ns.row(i).sub(&prow.scale(&factor));
            *ns.row_mut(i) = reduced;
        }
    }
    ns.remove_row(pivot);
    true
}

/// Inverse of a square, invertible matrix, by Gauss-Jordan elimination with
/// an augmented identity. Panics if `a` is singular; callers only invoke
/// this once a full-rank complement has already been established.
pub fn solve_inverse(a: &Matrix) -> Matrix {
    let n = a.rows();
    debug_assert_eq!(n, a.cols());
    let mut work: Vec<Vector> = a.row_iter().cloned().collect();
    let mut inv: Vec<Vector> = (0..n).map(|i| Vector::unit(n, i)).collect();

    for col in 0..n {
        let pr = (col..n)
            .find(|&r| !work[r][col].is_zero())
            .expect("solve_inverse: matrix is singular");
        work.swap(col, pr);
        inv.swap(col, pr);
        let piv_inv = work[col][col].clone().recip();
        work[col] = work[col].scale(&piv_inv);
        inv[col] = inv[col].scale(&piv_inv);
        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = work[r][col].clone();
            if !factor.is_zero() {
                work[r] = work[r].sub(&work[col].scale(&factor));
                inv[r] = inv[r].sub(&inv[col].scale(&factor));
            }
        }
    }
    Matrix::from_rows(inv, n)
}

/// Build an exact rational from a pair of integers, for convenience at call
/// sites and in tests.
pub fn ratio(numer: i64, denom: i64) -> Scalar {
    BigRational::new(numer.into(), denom.into())
}

/// Build an exact integer scalar.
pub fn int(n: i64) -> Scalar {
    BigRational::from_integer(n.into())
}
