//! Iterative adaptive approach (IAA).
//!
//! Every variant reprojects the signal through an estimated covariance:
//!
//! ```text
//! spec(w) = a(w)^H R^-1 y / a(w)^H R^-1 a(w),   a(w)_n = exp(+j n w)
//! ```
//!
//! The iterative variants start from the zero-padded FFT of `y` and rebuild
//! `R` from the power of the previous estimate on every pass.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex32;
use parspec_covariance::SampleMatrix;
use parspec_toeplitz::{LevinsonSolver, hermitian_toeplitz};
use rustfft::{Fft, FftPlanner};
use tracing::debug;

use crate::error::EstimateError;
use crate::grid::FrequencyGrid;
use crate::model::{single_channel, toeplitz_covariance};
use crate::projection::{column_forms, invert, projections, quadratic_forms};
use crate::steering::{SteeringSign, vandermonde};

/// How the covariance is obtained and inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IaaVariant {
    /// One pass with the Toeplitz matrix of the sample autocorrelation.
    NonRecursive,
    /// Explicit `R = A diag(|s|^2) A^H` each pass, inverted directly.
    Synthesized,
    /// Toeplitz `R` from the FFT of the power spectrum, inverted directly.
    #[default]
    Recursive,
    /// As [`IaaVariant::Recursive`], solved with a Levinson-Durbin session.
    RecursiveLevinson,
}

impl IaaVariant {
    /// Whether the variant starts from an FFT and iterates.
    pub fn is_iterative(self) -> bool {
        !matches!(self, IaaVariant::NonRecursive)
    }
}

/// Configuration of the IAA estimator.
///
/// # Example
///
/// ```
/// use parspec_estimate::{IaaConfig, IaaVariant};
///
/// let config = IaaConfig::new(IaaVariant::RecursiveLevinson).with_iterations(4);
/// assert!(config.validate(16, 64).is_ok());
/// assert!(config.validate(16, 8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IaaConfig {
    variant: IaaVariant,
    iterations: usize,
}

impl IaaConfig {
    /// Creates a configuration for `variant`.
    ///
    /// Defaults: `iterations = 10`.
    pub fn new(variant: IaaVariant) -> Self {
        Self {
            variant,
            iterations: 10,
        }
    }

    /// Sets the number of passes. The loop never stops early.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Returns the variant.
    pub fn variant(&self) -> IaaVariant {
        self.variant
    }

    /// Returns the number of passes.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// [`EstimateError::InvalidIterations`] for zero iterations, and
    /// [`EstimateError::GridTooCoarse`] when an iterative variant gets fewer
    /// grid points than samples.
    pub fn validate(&self, signal_length: usize, grid_points: usize) -> Result<(), EstimateError> {
        if self.iterations == 0 {
            return Err(EstimateError::InvalidIterations {
                iterations: self.iterations,
            });
        }
        if self.variant.is_iterative() && grid_points < signal_length {
            return Err(EstimateError::GridTooCoarse {
                points: grid_points,
                signal_length,
            });
        }
        Ok(())
    }
}

impl Default for IaaConfig {
    fn default() -> Self {
        Self::new(IaaVariant::default())
    }
}

/// Complex IAA spectrum of channel 0 over `grid`.
///
/// The iterative variants read the estimate as an FFT-shifted spectrum, so
/// `grid` should be [`FrequencyGrid::centered`] with at least `L` points.
///
/// # Errors
///
/// Configuration errors, [`EstimateError::SingularMatrix`] for the inverting
/// variants and Levinson errors for [`IaaVariant::RecursiveLevinson`].
#[tracing::instrument(skip_all, fields(len = samples.signal_length(), points = grid.len()))]
pub fn iaa(
    samples: &SampleMatrix,
    config: &IaaConfig,
    grid: &FrequencyGrid,
) -> Result<Vec<Complex32>, EstimateError> {
    let len = samples.signal_length();
    let points = grid.len();
    config.validate(len, points)?;

    let y = single_channel(samples, "iaa");
    let a = vandermonde(len, grid, SteeringSign::Positive);
    let variant = config.variant();

    if !variant.is_iterative() {
        let rinv = invert(&toeplitz_covariance(&y)?)?;
        return Ok(reproject_inverse(&a, &rinv, &y));
    }

    let fft = FftPlanner::<f32>::new().plan_fft_forward(points);
    let mut spectrum = initial_spectrum(&y, points, fft.as_ref());

    for iteration in 0..config.iterations() {
        let r = match variant {
            IaaVariant::Synthesized => synthesized_covariance(&a, &spectrum),
            _ => power_toeplitz(&spectrum, len, fft.as_ref())?,
        };
        spectrum = match variant {
            IaaVariant::RecursiveLevinson => reproject_levinson(&a, &r, &y)?,
            _ => reproject_inverse(&a, &invert(&r)?, &y),
        };
        debug!(iteration, ?variant, "IAA pass done");
    }
    Ok(spectrum)
}

/// `fftshift(FFT_G(y)) / L`, zero-padding or truncating `y` to `G` points.
fn initial_spectrum(y: &[Complex32], points: usize, fft: &dyn Fft<f32>) -> Vec<Complex32> {
    let mut buffer = vec![Complex32::new(0.0, 0.0); points];
    for (b, v) in buffer.iter_mut().zip(y) {
        *b = *v;
    }
    fft.process(&mut buffer);

    let scale = 1.0 / y.len() as f32;
    for v in buffer.iter_mut() {
        *v *= scale;
    }
    buffer.rotate_right(points / 2);
    buffer
}

/// Toeplitz covariance of the power spectrum `|s|^2`.
///
/// Lags are `r = FFT_G(|ifftshift(s)|^2) / G` truncated to `L`. The
/// Hermitian Toeplitz matrix of `r` is transposed so that it equals
/// `A diag(|s|^2) A^H / G` for positive steering.
fn power_toeplitz(
    spectrum: &[Complex32],
    len: usize,
    fft: &dyn Fft<f32>,
) -> Result<DMatrix<Complex32>, EstimateError> {
    let points = spectrum.len();
    let mut buffer: Vec<Complex32> = spectrum
        .iter()
        .map(|s| Complex32::new(s.norm_sqr(), 0.0))
        .collect();
    buffer.rotate_left(points / 2);
    fft.process(&mut buffer);

    // rustfft is unnormalized
    let scale = 1.0 / points as f32;
    let r: Vec<Complex32> = buffer.iter().take(len).map(|v| *v * scale).collect();
    Ok(hermitian_toeplitz(&r)?.transpose())
}

/// `A diag(|s|^2) A^H`.
fn synthesized_covariance(a: &DMatrix<Complex32>, spectrum: &[Complex32]) -> DMatrix<Complex32> {
    let mut weighted = a.clone();
    for (mut column, s) in weighted.column_iter_mut().zip(spectrum) {
        column *= Complex32::new(s.norm_sqr(), 0.0);
    }
    weighted * a.adjoint()
}

fn reproject_inverse(
    a: &DMatrix<Complex32>,
    rinv: &DMatrix<Complex32>,
    y: &[Complex32],
) -> Vec<Complex32> {
    let rinv_y = rinv * DVector::from_column_slice(y);
    let ah_rinv_y = projections(a, rinv_y.as_slice());
    let ah_rinv_a = quadratic_forms(a, rinv, a);
    ratio(&ah_rinv_y, &ah_rinv_a)
}

fn reproject_levinson(
    a: &DMatrix<Complex32>,
    r: &DMatrix<Complex32>,
    y: &[Complex32],
) -> Result<Vec<Complex32>, EstimateError> {
    let solver = LevinsonSolver::new(r)?;
    let rinv_y = solver.solve(y)?;
    let rinv_a = solver.solve_many(a)?;
    let ah_rinv_y = projections(a, &rinv_y);
    let ah_rinv_a = column_forms(a, &rinv_a);
    Ok(ratio(&ah_rinv_y, &ah_rinv_a))
}

fn ratio(num: &[Complex32], den: &[Complex32]) -> Vec<Complex32> {
    num.iter().zip(den).map(|(n, d)| n / d).collect()
}
