//! Signal/noise subspace split of a covariance matrix.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex32;
use tracing::debug;

use crate::error::SubspaceError;

/// Factorisation used to obtain the ordered basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decomposition {
    /// Left singular vectors, ordered by singular value. Works for any
    /// square input.
    #[default]
    Svd,
    /// Eigenvectors of a Hermitian matrix, ordered by eigenvalue. Only the
    /// lower triangle is read.
    HermitianEigen,
}

impl Decomposition {
    fn name(self) -> &'static str {
        match self {
            Decomposition::Svd => "SVD",
            Decomposition::HermitianEigen => "Hermitian eigen",
        }
    }
}

/// Orthonormal bases of the signal and noise subspaces.
///
/// The signal basis holds the `num_sources` dominant directions and the noise
/// basis the remaining `dim - num_sources`. Together their columns form a
/// unitary matrix, so each basis is orthogonal to the other.
#[derive(Clone, Debug)]
pub struct SubspaceSplit {
    signal: DMatrix<Complex32>,
    noise: DMatrix<Complex32>,
    values: Vec<f32>,
}

impl SubspaceSplit {
    /// Returns the `dim x num_sources` signal basis.
    pub fn signal(&self) -> &DMatrix<Complex32> {
        &self.signal
    }

    /// Returns the `dim x (dim - num_sources)` noise basis.
    pub fn noise(&self) -> &DMatrix<Complex32> {
        &self.noise
    }

    /// Returns the singular values or eigenvalues in descending order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the number of signal directions.
    pub fn num_sources(&self) -> usize {
        self.signal.ncols()
    }

    /// Returns the covariance dimension.
    pub fn dim(&self) -> usize {
        self.signal.nrows()
    }

    /// Consumes the split and returns `(signal, noise)`.
    pub fn into_bases(self) -> (DMatrix<Complex32>, DMatrix<Complex32>) {
        (self.signal, self.noise)
    }
}

/// Splits `cov` into signal and noise subspaces via SVD.
///
/// # Errors
///
/// See [`decompose_with`].
pub fn decompose(
    cov: &DMatrix<Complex32>,
    num_sources: usize,
) -> Result<SubspaceSplit, SubspaceError> {
    decompose_with(cov, num_sources, Decomposition::Svd)
}

/// Splits `cov` into signal and noise subspaces with the chosen
/// factorisation.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SubspaceError::NotSquare`] | `cov` is not square |
/// | [`SubspaceError::InvalidSourceCount`] | `num_sources == 0` or `num_sources >= dim` |
/// | [`SubspaceError::NonFiniteInput`] | NaN or infinite entries |
/// | [`SubspaceError::DecompositionFailed`] | no convergence |
#[tracing::instrument(skip(cov), fields(dim = cov.nrows()))]
pub fn decompose_with(
    cov: &DMatrix<Complex32>,
    num_sources: usize,
    method: Decomposition,
) -> Result<SubspaceSplit, SubspaceError> {
    let (rows, cols) = cov.shape();
    if rows != cols {
        return Err(SubspaceError::NotSquare { rows, cols });
    }
    let dim = rows;
    if num_sources == 0 || num_sources >= dim {
        return Err(SubspaceError::InvalidSourceCount { num_sources, dim });
    }
    if !cov.iter().all(|c| c.is_finite()) {
        return Err(SubspaceError::NonFiniteInput);
    }

    let failed = || SubspaceError::DecompositionFailed {
        method: method.name(),
    };
    let (basis, values) = match method {
        Decomposition::Svd => {
            let svd = cov
                .clone()
                .try_svd(true, false, f32::EPSILON, 0)
                .ok_or_else(failed)?;
            let u = svd.u.ok_or_else(failed)?;
            (u, svd.singular_values)
        }
        Decomposition::HermitianEigen => {
            let eig = cov
                .clone()
                .try_symmetric_eigen(f32::EPSILON, 0)
                .ok_or_else(failed)?;
            (eig.eigenvectors, eig.eigenvalues)
        }
    };

    let order = descending_order(&values);
    let signal = basis.select_columns(&order[..num_sources]);
    let noise = basis.select_columns(&order[num_sources..]);
    let values: Vec<f32> = order.iter().map(|&i| values[i]).collect();

    debug!(
        num_sources,
        largest = values[0],
        smallest = values[dim - 1],
        "subspace split"
    );
    Ok(SubspaceSplit {
        signal,
        noise,
        values,
    })
}

/// Column indices sorted by descending value.
fn descending_order(values: &DVector<f32>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    order
}
