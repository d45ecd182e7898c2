//! Covariance models shared by the estimators.

use nalgebra::DMatrix;
use num_complex::Complex32;
use parspec_covariance::{SampleMatrix, fast_autocorrelation_channel};
use parspec_toeplitz::hermitian_toeplitz;
use tracing::warn;

use crate::error::EstimateError;

/// How an estimator turns samples into a covariance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CovarianceModel {
    /// Hermitian Toeplitz matrix of the whole-signal autocorrelation of
    /// channel 0. Dimension equals the signal length.
    #[default]
    Toeplitz,
    /// Averaged outer products of time-ordered windows.
    Forward {
        /// Window length `M`, strictly below half the signal length.
        model_order: usize,
    },
    /// Averaged outer products of time-reversed windows.
    Backward {
        /// Window length `M`, strictly below half the signal length.
        model_order: usize,
    },
}

impl CovarianceModel {
    /// Returns the model order, or `None` for [`CovarianceModel::Toeplitz`].
    pub fn model_order(&self) -> Option<usize> {
        match *self {
            CovarianceModel::Toeplitz => None,
            CovarianceModel::Forward { model_order } | CovarianceModel::Backward { model_order } => {
                Some(model_order)
            }
        }
    }

    /// Checks the model order against the signal length.
    ///
    /// # Errors
    ///
    /// See [`validate_model_order`].
    pub fn validate(&self, signal_length: usize) -> Result<(), EstimateError> {
        match self.model_order() {
            Some(model_order) => validate_model_order(model_order, signal_length),
            None => Ok(()),
        }
    }
}

/// Requires `1 <= model_order` and `2 * model_order < signal_length`.
///
/// # Errors
///
/// [`EstimateError::InvalidModelOrder`] or
/// [`EstimateError::ModelOrderTooLarge`].
pub fn validate_model_order(model_order: usize, signal_length: usize) -> Result<(), EstimateError> {
    if model_order == 0 {
        return Err(EstimateError::InvalidModelOrder { model_order });
    }
    if 2 * model_order >= signal_length {
        return Err(EstimateError::ModelOrderTooLarge {
            model_order,
            signal_length,
        });
    }
    Ok(())
}

/// Channel 0 of `samples`, warning when further channels are dropped.
pub(crate) fn single_channel(samples: &SampleMatrix, estimator: &'static str) -> Vec<Complex32> {
    if samples.num_channels() > 1 {
        warn!(
            estimator,
            channels = samples.num_channels(),
            "using channel 0 only"
        );
    }
    samples.first_channel()
}

/// Hermitian Toeplitz matrix of the fast autocorrelation of one channel.
pub(crate) fn toeplitz_covariance(x: &[Complex32]) -> Result<DMatrix<Complex32>, EstimateError> {
    let r = fast_autocorrelation_channel(x);
    Ok(hermitian_toeplitz(&r)?)
}
