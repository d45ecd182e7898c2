//! Capon (minimum-variance) power spectral density.

use parspec_covariance::{Normalizer, SampleMatrix, backward_covariance, forward_covariance};
use tracing::debug;

use crate::error::EstimateError;
use crate::grid::FrequencyGrid;
use crate::model::{CovarianceModel, single_channel, toeplitz_covariance};
use crate::projection::{column_forms, invert, quadratic_forms};
use crate::steering::{SteeringSign, vandermonde};

/// Configuration of the Capon estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaponConfig {
    model: CovarianceModel,
}

impl CaponConfig {
    /// Creates a configuration with the given covariance model.
    pub fn new(model: CovarianceModel) -> Self {
        Self { model }
    }

    /// Returns the covariance model.
    pub fn model(&self) -> CovarianceModel {
        self.model
    }

    /// Validates the model order against a signal length.
    ///
    /// # Errors
    ///
    /// See [`CovarianceModel::validate`].
    pub fn validate(&self, signal_length: usize) -> Result<(), EstimateError> {
        self.model.validate(signal_length)
    }
}

/// Capon PSD `|1 / (beta * a^H R^-1 a)|` over `grid`.
///
/// | Model | `R` | `beta` |
/// |-------|-----|--------|
/// | `Toeplitz` | fast autocorrelation, `L x L` | `a^H R^-2 a / (a^H R^-1 a)^2` |
/// | `Forward { m }` | forward windows of `m`, divided by `L - m` | `m + 1` |
/// | `Backward { m }` | backward windows of `m + 1`, divided by `L - m` | `m + 1` |
///
/// # Errors
///
/// Model order errors, covariance errors, and
/// [`EstimateError::SingularMatrix`] when `R` cannot be inverted.
#[tracing::instrument(skip_all, fields(len = samples.signal_length(), points = grid.len()))]
pub fn capon(
    samples: &SampleMatrix,
    config: &CaponConfig,
    grid: &FrequencyGrid,
) -> Result<Vec<f32>, EstimateError> {
    config.validate(samples.signal_length())?;
    let (r, bandwidth) = match config.model() {
        CovarianceModel::Toeplitz => (
            toeplitz_covariance(&single_channel(samples, "capon"))?,
            None,
        ),
        CovarianceModel::Forward { model_order } => (
            forward_covariance(
                samples,
                model_order,
                Normalizer::SignalLengthMinus(model_order),
            )?,
            Some((model_order + 1) as f32),
        ),
        CovarianceModel::Backward { model_order } => (
            backward_covariance(
                samples,
                model_order + 1,
                Normalizer::SignalLengthMinus(model_order),
            )?,
            Some((model_order + 1) as f32),
        ),
    };

    let rinv = invert(&r)?;
    let a = vandermonde(r.nrows(), grid, SteeringSign::Negative);
    let ah_rinv_a = quadratic_forms(&a, &rinv, &a);

    let psd = match bandwidth {
        Some(beta) => ah_rinv_a.iter().map(|q| (q.inv() / beta).norm()).collect(),
        None => {
            let rinv2 = &rinv * &rinv;
            let ah_rinv2_a = column_forms(&a, &(&rinv2 * &a));
            ah_rinv_a
                .iter()
                .zip(&ah_rinv2_a)
                .map(|(q1, q2)| {
                    let beta = q2 / (q1 * q1);
                    (q1.inv() / beta).norm()
                })
                .collect()
        }
    };

    debug!(dim = r.nrows(), model = ?config.model(), "Capon done");
    Ok(psd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex32;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Normal};

    fn noisy_tone(len: usize, omega: f32, seed: u64) -> SampleMatrix {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0_f32, 0.1).unwrap();
        let x: Vec<Complex32> = (0..len)
            .map(|n| {
                Complex32::from_polar(1.0, -omega * n as f32)
                    + Complex32::new(normal.sample(&mut rng), normal.sample(&mut rng))
            })
            .collect();
        SampleMatrix::from_channel(x).unwrap()
    }

    fn argmax(spectrum: &[f32], grid: &FrequencyGrid) -> f32 {
        let (i, _) = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();
        grid.as_slice()[i]
    }

    #[test]
    fn windowed_models_peak_at_tone() {
        let samples = noisy_tone(48, 1.0, 3);
        let grid = FrequencyGrid::centered(512).unwrap();

        let forward = CaponConfig::new(CovarianceModel::Forward { model_order: 12 });
        let psd = capon(&samples, &forward, &grid).unwrap();
        assert!((argmax(&psd, &grid) - 1.0).abs() < 0.05);

        let backward = CaponConfig::new(CovarianceModel::Backward { model_order: 12 });
        let psd = capon(&samples, &backward, &grid).unwrap();
        assert!((argmax(&psd, &grid) + 1.0).abs() < 0.05);
    }

    #[test]
    fn singular_covariance_is_reported() {
        // A single window of a constant signal has rank one.
        let x = vec![Complex32::new(1.0, 0.0); 8];
        let samples = SampleMatrix::from_channel(x).unwrap();
        let grid = FrequencyGrid::centered(16).unwrap();
        let config = CaponConfig::new(CovarianceModel::Forward { model_order: 3 });
        assert!(matches!(
            capon(&samples, &config, &grid),
            Err(EstimateError::SingularMatrix { dim: 3 })
        ));
    }

    #[test]
    fn default_is_toeplitz() {
        assert_eq!(CaponConfig::default().model(), CovarianceModel::Toeplitz);
    }
}
