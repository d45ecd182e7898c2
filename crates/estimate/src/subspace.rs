//! Subspace estimators: MUSIC pseudo-spectrum and ESPRIT frequencies.
//!
//! Both decompose the same covariance (normalised by the signal length) and
//! steer with [`SteeringSign::Negative`], so a sinusoid `exp(-j w0 n)` shows
//! up at `+w0` in either.

use nalgebra::DMatrix;
use nalgebra::linalg::Schur;
use num_complex::Complex32;
use parspec_covariance::{Normalizer, SampleMatrix, backward_covariance, forward_covariance};
use parspec_subspace::{SubspaceError, decompose};
use rayon::prelude::*;
use tracing::debug;

use crate::error::EstimateError;
use crate::grid::FrequencyGrid;
use crate::model::{CovarianceModel, single_channel, toeplitz_covariance};
use crate::steering::{SteeringSign, vandermonde};

/// Singular values below this are dropped by the ESPRIT pseudo-inverse.
const PINV_EPS: f32 = 1e-6;

/// Parameters shared by [`music`] and [`esprit`].
///
/// # Example
///
/// ```
/// use parspec_estimate::{CovarianceModel, MusicConfig};
///
/// let config = MusicConfig::new(2).with_model(CovarianceModel::Forward { model_order: 8 });
/// assert!(config.validate(32).is_ok());
/// assert!(config.validate(16).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubspaceConfig {
    num_sources: usize,
    model: CovarianceModel,
}

/// Configuration of the MUSIC estimator.
pub type MusicConfig = SubspaceConfig;

/// Configuration of the ESPRIT estimator.
pub type EspritConfig = SubspaceConfig;

impl SubspaceConfig {
    /// Creates a configuration for `num_sources` sinusoids.
    ///
    /// Defaults: `model = Toeplitz`.
    pub fn new(num_sources: usize) -> Self {
        Self {
            num_sources,
            model: CovarianceModel::Toeplitz,
        }
    }

    /// Sets the covariance model.
    pub fn with_model(mut self, model: CovarianceModel) -> Self {
        self.model = model;
        self
    }

    /// Returns the assumed number of sinusoids.
    pub fn num_sources(&self) -> usize {
        self.num_sources
    }

    /// Returns the covariance model.
    pub fn model(&self) -> CovarianceModel {
        self.model
    }

    /// Dimension of the covariance matrix for a signal of length `len`.
    pub fn covariance_dim(&self, signal_length: usize) -> usize {
        self.model.model_order().unwrap_or(signal_length)
    }

    /// Validates this configuration against a signal length.
    ///
    /// # Errors
    ///
    /// Model order errors from [`CovarianceModel::validate`], and
    /// [`SubspaceError::InvalidSourceCount`] unless
    /// `1 <= num_sources < covariance_dim`.
    pub fn validate(&self, signal_length: usize) -> Result<(), EstimateError> {
        self.model.validate(signal_length)?;
        let dim = self.covariance_dim(signal_length);
        if self.num_sources == 0 || self.num_sources >= dim {
            return Err(SubspaceError::InvalidSourceCount {
                num_sources: self.num_sources,
                dim,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for SubspaceConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Covariance used by both subspace estimators; windowed forms divide by `L`.
fn subspace_covariance(
    samples: &SampleMatrix,
    model: CovarianceModel,
) -> Result<DMatrix<Complex32>, EstimateError> {
    let cov = match model {
        CovarianceModel::Toeplitz => toeplitz_covariance(&single_channel(samples, "subspace"))?,
        CovarianceModel::Forward { model_order } => {
            forward_covariance(samples, model_order, Normalizer::SignalLength)?
        }
        CovarianceModel::Backward { model_order } => {
            backward_covariance(samples, model_order, Normalizer::SignalLength)?
        }
    };
    Ok(cov)
}

/// MUSIC pseudo-spectrum `1 / |G^H a(w)|^2` over `grid`, where `G` is the
/// noise subspace.
///
/// # Errors
///
/// Configuration errors from [`SubspaceConfig::validate`], and any error of
/// the covariance and decomposition stages.
#[tracing::instrument(skip_all, fields(len = samples.signal_length(), points = grid.len()))]
pub fn music(
    samples: &SampleMatrix,
    config: &MusicConfig,
    grid: &FrequencyGrid,
) -> Result<Vec<f32>, EstimateError> {
    config.validate(samples.signal_length())?;
    let cov = subspace_covariance(samples, config.model())?;
    let split = decompose(&cov, config.num_sources())?;

    let a = vandermonde(cov.nrows(), grid, SteeringSign::Negative);
    let gha = split.noise().adjoint() * &a;
    let spectrum = (0..gha.ncols())
        .into_par_iter()
        .map(|g| 1.0 / gha.column(g).norm_squared())
        .collect();

    debug!(dim = cov.nrows(), model = ?config.model(), "MUSIC done");
    Ok(spectrum)
}

/// ESPRIT frequency estimates, one per source, in no particular order.
///
/// The signal subspace `U` is split into its first and last `dim - 1` rows
/// `U1`, `U2`; the eigenvalues of `pinv(U1) * U2` carry the frequencies in
/// their phase. Estimates are reported as `-arg(lambda)` to match the MUSIC
/// orientation.
///
/// # Errors
///
/// Same as [`music`], plus [`EstimateError::DecompositionFailed`] when the
/// pseudo-inverse or the Schur decomposition fails.
#[tracing::instrument(skip_all, fields(len = samples.signal_length()))]
pub fn esprit(samples: &SampleMatrix, config: &EspritConfig) -> Result<Vec<f32>, EstimateError> {
    config.validate(samples.signal_length())?;
    let cov = subspace_covariance(samples, config.model())?;
    let split = decompose(&cov, config.num_sources())?;

    let us = split.signal();
    let dim = us.nrows();
    let u1 = us.rows(0, dim - 1).into_owned();
    let u2 = us.rows(1, dim - 1).into_owned();

    let pinv = u1
        .pseudo_inverse(PINV_EPS)
        .map_err(|_| EstimateError::DecompositionFailed {
            method: "pseudo-inverse",
        })?;
    let phi = pinv * u2;

    // Complex Schur form is upper triangular; its diagonal holds the eigenvalues.
    let schur = Schur::try_new(phi, f32::EPSILON, 0).ok_or(EstimateError::DecompositionFailed {
        method: "Schur decomposition",
    })?;
    let (_, t) = schur.unpack();
    let frequencies: Vec<f32> = t.diagonal().iter().map(|lambda| -lambda.arg()).collect();

    debug!(dim, ?frequencies, "ESPRIT done");
    Ok(frequencies)
}
