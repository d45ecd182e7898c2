//! Dispatch from an [`EstimationConfig`] to the estimator it names.

use num_complex::Complex32;
use parspec_covariance::SampleMatrix;
use parspec_estimate::{apes, capon, esprit, iaa, music};
use tracing::info;

use crate::config::EstimationConfig;
use crate::convert::{
    Method, build_apes_config, build_capon_config, build_grid, build_iaa_config,
    build_subspace_config, parse_method,
};
use crate::error::ParspecError;

/// Output of one estimation run.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    /// Real pseudo-spectrum over the grid (MUSIC, Capon).
    PseudoSpectrum(Vec<f32>),
    /// Complex amplitude spectrum over the grid (APES, IAA).
    Spectrum(Vec<Complex32>),
    /// Frequency estimates in radians per sample (ESPRIT).
    Frequencies(Vec<f32>),
}

impl Estimate {
    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            Estimate::PseudoSpectrum(v) | Estimate::Frequencies(v) => v.len(),
            Estimate::Spectrum(v) => v.len(),
        }
    }

    /// Whether the estimate holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Real-valued view over the grid: the pseudo-spectrum as is, or the
    /// magnitude of a complex spectrum. `None` for ESPRIT frequencies.
    pub fn magnitudes(&self) -> Option<Vec<f32>> {
        match self {
            Estimate::PseudoSpectrum(v) => Some(v.clone()),
            Estimate::Spectrum(v) => Some(v.iter().map(|c| c.norm()).collect()),
            Estimate::Frequencies(_) => None,
        }
    }
}

/// Runs the estimator named by `config` on `samples`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ParspecError::UnknownVariant`] | unrecognised method, model or IAA variant |
/// | [`ParspecError::MissingField`] / [`ParspecError::UnusedField`] | settings inconsistent with the method |
/// | [`ParspecError::Estimate`] | any estimator failure |
#[tracing::instrument(skip_all, fields(method = %config.method, len = samples.signal_length()))]
pub fn run(config: &EstimationConfig, samples: &SampleMatrix) -> Result<Estimate, ParspecError> {
    let method = parse_method(&config.method)?;

    let estimate = match method {
        Method::Music => {
            let cfg = build_subspace_config(config)?;
            let grid = build_grid(&config.grid)?;
            Estimate::PseudoSpectrum(music(samples, &cfg, &grid)?)
        }
        Method::Esprit => {
            let cfg = build_subspace_config(config)?;
            Estimate::Frequencies(esprit(samples, &cfg)?)
        }
        Method::Capon => {
            let cfg = build_capon_config(config)?;
            let grid = build_grid(&config.grid)?;
            Estimate::PseudoSpectrum(capon(samples, &cfg, &grid)?)
        }
        Method::Apes => {
            let cfg = build_apes_config(config)?;
            let grid = build_grid(&config.grid)?;
            Estimate::Spectrum(apes(samples, &cfg, &grid)?)
        }
        Method::Iaa => {
            let cfg = build_iaa_config(&config.iaa)?;
            let grid = build_grid(&config.grid)?;
            Estimate::Spectrum(iaa(samples, &cfg, &grid)?)
        }
    };

    info!(?method, values = estimate.len(), "estimation complete");
    Ok(estimate)
}
