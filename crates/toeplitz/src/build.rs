//! Hermitian Toeplitz construction from autocorrelation vectors.

use nalgebra::DMatrix;
use num_complex::Complex32;
use rayon::prelude::*;

use crate::error::ToeplitzError;

/// Builds the `N x N` Hermitian Toeplitz matrix of an autocorrelation vector.
///
/// Entry `(i, j)` is `conj(r[j - i])` on and above the diagonal and
/// `r[i - j]` below it. The diagonal holds `Re(r[0])`, so it is real even
/// when round-off leaves an imaginary residue on the zero lag.
///
/// # Errors
///
/// Returns [`ToeplitzError::EmptyAutocorrelation`] if `r` is empty.
///
/// # Example
///
/// ```
/// use num_complex::Complex32;
/// use parspec_toeplitz::hermitian_toeplitz;
///
/// let r = [Complex32::new(2.0, 0.0), Complex32::new(0.5, 0.5)];
/// let t = hermitian_toeplitz(&r).unwrap();
/// assert_eq!(t[(0, 1)], Complex32::new(0.5, -0.5));
/// assert_eq!(t[(1, 0)], Complex32::new(0.5, 0.5));
/// ```
pub fn hermitian_toeplitz(r: &[Complex32]) -> Result<DMatrix<Complex32>, ToeplitzError> {
    if r.is_empty() {
        return Err(ToeplitzError::EmptyAutocorrelation);
    }
    let n = r.len();
    let diagonal = Complex32::new(r[0].re, 0.0);
    Ok(DMatrix::from_fn(n, n, |i, j| match i.cmp(&j) {
        std::cmp::Ordering::Equal => diagonal,
        std::cmp::Ordering::Less => r[j - i].conj(),
        std::cmp::Ordering::Greater => r[i - j],
    }))
}

/// Builds one Hermitian Toeplitz matrix per autocorrelation vector.
///
/// # Errors
///
/// Returns [`ToeplitzError::EmptyAutocorrelation`] if any vector is empty.
pub fn hermitian_toeplitz_batch(
    rs: &[Vec<Complex32>],
) -> Result<Vec<DMatrix<Complex32>>, ToeplitzError> {
    rs.par_iter().map(|r| hermitian_toeplitz(r)).collect()
}
