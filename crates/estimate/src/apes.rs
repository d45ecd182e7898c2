//! Amplitude and phase estimation (APES).

use num_complex::Complex32;
use parspec_covariance::{
    Normalizer, SampleMatrix, WindowDirection, backward_covariance, snapshot_matrix,
};
use tracing::debug;

use crate::error::EstimateError;
use crate::grid::FrequencyGrid;
use crate::model::{single_channel, validate_model_order};
use crate::projection::{column_forms, invert, quadratic_forms};
use crate::steering::{SteeringSign, vandermonde, vandermonde_offset};

/// Configuration of the APES estimator.
///
/// # Example
///
/// ```
/// use parspec_estimate::ApesConfig;
///
/// let config = ApesConfig::new(8);
/// assert!(config.validate(32).is_ok());
/// assert!(config.validate(16).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApesConfig {
    model_order: usize,
}

impl ApesConfig {
    /// Creates a configuration with filter length `model_order + 1`.
    pub fn new(model_order: usize) -> Self {
        Self { model_order }
    }

    /// Returns the model order.
    pub fn model_order(&self) -> usize {
        self.model_order
    }

    /// Validates the model order against a signal length.
    ///
    /// # Errors
    ///
    /// See [`validate_model_order`].
    pub fn validate(&self, signal_length: usize) -> Result<(), EstimateError> {
        validate_model_order(self.model_order, signal_length)
    }
}

/// Complex APES spectrum of channel 0 over `grid`.
///
/// With `Y` the backward snapshots of length `M + 1` and `R = Y Y^H / (L - M)`:
///
/// ```text
/// G(w)     = Y p(w) / (L - M + 1),   p(w)_c = exp(+j (M + c) w)
/// spec(w)  = a^H R^-1 G / ((1 - G^H R^-1 G) a^H R^-1 a + |a^H R^-1 G|^2)
/// ```
///
/// `a(w)` and `p(w)` both use [`SteeringSign::Positive`].
///
/// # Errors
///
/// Model order errors and [`EstimateError::SingularMatrix`].
#[tracing::instrument(skip_all, fields(len = samples.signal_length(), points = grid.len()))]
pub fn apes(
    samples: &SampleMatrix,
    config: &ApesConfig,
    grid: &FrequencyGrid,
) -> Result<Vec<Complex32>, EstimateError> {
    let len = samples.signal_length();
    config.validate(len)?;
    let m = config.model_order();
    let single = SampleMatrix::from_channel(single_channel(samples, "apes"))?;

    let y = snapshot_matrix(&single, m + 1, WindowDirection::Backward)?;
    let r = backward_covariance(&single, m + 1, Normalizer::SignalLengthMinus(m))?;
    let rinv = invert(&r)?;

    let a = vandermonde(m + 1, grid, SteeringSign::Positive);
    let phasor = vandermonde_offset(m, len - m, grid, SteeringSign::Positive);
    let scale = (len - m + 1) as f32;
    let g_omega = (&y * &phasor).map(|v| v / scale);

    let rinv_g = &rinv * &g_omega;
    let ah_rinv_g = column_forms(&a, &rinv_g);
    let gh_rinv_g = column_forms(&g_omega, &rinv_g);
    let ah_rinv_a = quadratic_forms(&a, &rinv, &a);

    let one = Complex32::new(1.0, 0.0);
    let spectrum = ah_rinv_g
        .iter()
        .zip(&gh_rinv_g)
        .zip(&ah_rinv_a)
        .map(|((ag, gg), aa)| ag / ((one - gg) * aa + ag.norm_sqr()))
        .collect();

    debug!(model_order = m, "APES done");
    Ok(spectrum)
}
