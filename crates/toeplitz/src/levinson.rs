//! Levinson-Durbin solver for Toeplitz systems.
//!
//! The recursion splits into a part that depends only on `T` (forward and
//! backward vectors of every order) and a part that folds in the right-hand
//! side. [`LevinsonSolver`] runs the first part once so that many
//! right-hand sides can share it.
//!
//! Inner products are plain sums `sum a_i * b_i` without conjugation, which
//! keeps the recursion valid for general (not only Hermitian) Toeplitz
//! matrices.

use nalgebra::DMatrix;
use num_complex::Complex32;
use rayon::prelude::*;
use tracing::debug;

use crate::error::ToeplitzError;

/// Default pivot tolerance.
///
/// The recursion fails when any `|1 - eb * ef|` falls below it, or when
/// `|T[0,0]|` falls below it relative to the largest first-row or
/// first-column magnitude.
pub const DEFAULT_TOLERANCE: f32 = 1e-6;

/// Precomputed Levinson-Durbin session for one Toeplitz matrix.
///
/// Only the first row and first column of the matrix are read; the remaining
/// entries are assumed to follow the Toeplitz structure.
///
/// # Example
///
/// ```
/// use nalgebra::DMatrix;
/// use num_complex::Complex32;
/// use parspec_toeplitz::{LevinsonSolver, hermitian_toeplitz};
///
/// let r = [Complex32::new(2.0, 0.0), Complex32::new(0.5, 0.25)];
/// let t = hermitian_toeplitz(&r).unwrap();
/// let solver = LevinsonSolver::new(&t).unwrap();
/// let x = solver.solve(&[Complex32::new(1.0, 0.0), Complex32::new(0.0, 1.0)]).unwrap();
/// assert_eq!(x.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct LevinsonSolver {
    /// `T[k, 0]` for `k = 0..N`.
    first_column: Vec<Complex32>,
    /// Backward vector of order `k + 1` at index `k`.
    backward: Vec<Vec<Complex32>>,
    tolerance: f32,
}

impl LevinsonSolver {
    /// Runs the matrix-only part of the recursion with [`DEFAULT_TOLERANCE`].
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ToeplitzError::EmptyMatrix`] | `matrix` has no rows |
    /// | [`ToeplitzError::NotSquare`] | `matrix` is not square |
    /// | [`ToeplitzError::NumericalInstability`] | a pivot is below tolerance or not finite |
    pub fn new(matrix: &DMatrix<Complex32>) -> Result<Self, ToeplitzError> {
        Self::with_tolerance(matrix, DEFAULT_TOLERANCE)
    }

    /// Runs the matrix-only part of the recursion with a custom pivot
    /// tolerance.
    ///
    /// # Errors
    ///
    /// Same as [`LevinsonSolver::new`], plus
    /// [`ToeplitzError::InvalidTolerance`] for a negative or non-finite
    /// tolerance.
    #[tracing::instrument(skip(matrix), fields(dim = matrix.nrows()))]
    pub fn with_tolerance(
        matrix: &DMatrix<Complex32>,
        tolerance: f32,
    ) -> Result<Self, ToeplitzError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ToeplitzError::InvalidTolerance { tolerance });
        }
        let (rows, cols) = matrix.shape();
        if rows != cols {
            return Err(ToeplitzError::NotSquare { rows, cols });
        }
        if rows == 0 {
            return Err(ToeplitzError::EmptyMatrix);
        }
        let n = rows;

        let first_column: Vec<Complex32> = matrix.column(0).iter().copied().collect();
        let first_row: Vec<Complex32> = matrix.row(0).iter().copied().collect();

        let t0 = matrix[(0, 0)];
        check_leading_pivot(t0, &first_row, &first_column, tolerance)?;
        let inv = t0.inv();

        let mut forward = vec![inv];
        let mut backward = Vec::with_capacity(n);
        backward.push(vec![inv]);

        for order in 2..=n {
            let b = &backward[order - 2];
            // Column 0 read upwards from row order-1, and row 0 from column 1.
            let ef: Complex32 = (0..order - 1)
                .map(|i| first_column[order - 1 - i] * forward[i])
                .sum();
            let eb: Complex32 = (0..order - 1).map(|i| first_row[i + 1] * b[i]).sum();

            let denominator = Complex32::new(1.0, 0.0) - eb * ef;
            check_pivot(denominator, order, tolerance)?;
            let ed = denominator.inv();

            let zero = Complex32::new(0.0, 0.0);
            let mut next_forward = Vec::with_capacity(order);
            let mut next_backward = Vec::with_capacity(order);
            for i in 0..order {
                let f_ext = forward.get(i).copied().unwrap_or(zero);
                let b_shift = if i == 0 { zero } else { b[i - 1] };
                next_forward.push(ed * f_ext - ef * ed * b_shift);
                next_backward.push(ed * b_shift - eb * ed * f_ext);
            }
            forward = next_forward;
            backward.push(next_backward);
        }

        debug!(dim = n, "Levinson session ready");
        Ok(Self {
            first_column,
            backward,
            tolerance,
        })
    }

    /// Returns the system dimension `N`.
    pub fn dim(&self) -> usize {
        self.first_column.len()
    }

    /// Returns the pivot tolerance used to build this session.
    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Solves `T x = y` for one right-hand side.
    ///
    /// # Errors
    ///
    /// Returns [`ToeplitzError::DimensionMismatch`] if `y.len() != N`.
    pub fn solve(&self, y: &[Complex32]) -> Result<Vec<Complex32>, ToeplitzError> {
        if y.len() != self.dim() {
            return Err(ToeplitzError::DimensionMismatch {
                expected: self.dim(),
                got: y.len(),
            });
        }
        Ok(self.run(|k| y[k]))
    }

    /// Solves `T X = Y` column by column.
    ///
    /// # Errors
    ///
    /// Returns [`ToeplitzError::DimensionMismatch`] if `Y` does not have `N`
    /// rows.
    pub fn solve_many(&self, y: &DMatrix<Complex32>) -> Result<DMatrix<Complex32>, ToeplitzError> {
        let n = self.dim();
        if y.nrows() != n {
            return Err(ToeplitzError::DimensionMismatch {
                expected: n,
                got: y.nrows(),
            });
        }
        let columns: Vec<Vec<Complex32>> = (0..y.ncols())
            .into_par_iter()
            .map(|c| self.run(|k| y[(k, c)]))
            .collect();
        Ok(DMatrix::from_iterator(
            n,
            y.ncols(),
            columns.into_iter().flatten(),
        ))
    }

    /// Right-hand-side part of the recursion.
    fn run(&self, y: impl Fn(usize) -> Complex32) -> Vec<Complex32> {
        let n = self.dim();
        let mut x = Vec::with_capacity(n);
        x.push(y(0) * self.backward[0][0]);
        for order in 2..=n {
            // Row order-1 left of the diagonal, via the Toeplitz first column.
            let err: Complex32 = x
                .iter()
                .enumerate()
                .map(|(i, xi)| xi * self.first_column[order - 1 - i])
                .sum();
            let scale = y(order - 1) - err;
            x.push(Complex32::new(0.0, 0.0));
            for (xi, bi) in x.iter_mut().zip(&self.backward[order - 1]) {
                *xi += scale * bi;
            }
        }
        x
    }
}

/// Order-1 pivot, measured against the matrix scale so that the check does
/// not depend on signal amplitude.
fn check_leading_pivot(
    t0: Complex32,
    first_row: &[Complex32],
    first_column: &[Complex32],
    tolerance: f32,
) -> Result<(), ToeplitzError> {
    let scale = first_row
        .iter()
        .chain(first_column)
        .map(|v| v.norm())
        .fold(0.0_f32, f32::max);
    let magnitude = t0.norm();
    if !scale.is_finite() || magnitude == 0.0 || magnitude < tolerance * scale {
        let denominator = if scale > 0.0 { magnitude / scale } else { magnitude };
        return Err(ToeplitzError::NumericalInstability {
            order: 1,
            denominator,
        });
    }
    Ok(())
}

fn check_pivot(value: Complex32, order: usize, tolerance: f32) -> Result<(), ToeplitzError> {
    let denominator = value.norm();
    if !denominator.is_finite() || denominator < tolerance {
        return Err(ToeplitzError::NumericalInstability { order, denominator });
    }
    Ok(())
}

/// Solves `T x = y` with a one-off [`LevinsonSolver`].
///
/// # Errors
///
/// Every error of [`LevinsonSolver::new`] and [`LevinsonSolver::solve`].
pub fn solve_toeplitz(
    matrix: &DMatrix<Complex32>,
    y: &[Complex32],
) -> Result<Vec<Complex32>, ToeplitzError> {
    LevinsonSolver::new(matrix)?.solve(y)
}

/// Solves `T X = Y` with a one-off [`LevinsonSolver`].
///
/// # Errors
///
/// Every error of [`LevinsonSolver::new`] and [`LevinsonSolver::solve_many`].
pub fn solve_toeplitz_many(
    matrix: &DMatrix<Complex32>,
    y: &DMatrix<Complex32>,
) -> Result<DMatrix<Complex32>, ToeplitzError> {
    LevinsonSolver::new(matrix)?.solve_many(y)
}
