//! Per-grid-point quadratic forms and matrix inversion.

use nalgebra::DMatrix;
use num_complex::Complex32;
use rayon::prelude::*;

use crate::error::EstimateError;

/// `a_g^H * mb_g` for every column `g`, where `mb = M * B` is precomputed.
///
/// Columns are independent and evaluated in parallel.
pub(crate) fn column_forms(a: &DMatrix<Complex32>, mb: &DMatrix<Complex32>) -> Vec<Complex32> {
    (0..a.ncols())
        .into_par_iter()
        .map(|g| a.column(g).dotc(&mb.column(g)))
        .collect()
}

/// `a_g^H * M * b_g` for every column `g`.
pub(crate) fn quadratic_forms(
    a: &DMatrix<Complex32>,
    m: &DMatrix<Complex32>,
    b: &DMatrix<Complex32>,
) -> Vec<Complex32> {
    column_forms(a, &(m * b))
}

/// `a_g^H * v` for every column `g`.
pub(crate) fn projections(a: &DMatrix<Complex32>, v: &[Complex32]) -> Vec<Complex32> {
    (0..a.ncols())
        .into_par_iter()
        .map(|g| {
            a.column(g)
                .iter()
                .zip(v)
                .map(|(ai, vi)| ai.conj() * vi)
                .sum::<Complex32>()
        })
        .collect()
}

/// Explicit inverse, failing on singular or numerically useless input.
pub(crate) fn invert(m: &DMatrix<Complex32>) -> Result<DMatrix<Complex32>, EstimateError> {
    let dim = m.nrows();
    let inv = m
        .clone()
        .try_inverse()
        .ok_or(EstimateError::SingularMatrix { dim })?;
    if !inv.iter().all(|c| c.is_finite()) {
        return Err(EstimateError::SingularMatrix { dim });
    }
    Ok(inv)
}
