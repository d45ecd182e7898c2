//! Error types for the parspec-estimate crate.

use parspec_covariance::CovarianceError;
use parspec_subspace::SubspaceError;
use parspec_toeplitz::ToeplitzError;

/// Error type for all fallible operations in the parspec-estimate crate.
///
/// Parameter problems are reported before any matrix is built. Errors from the
/// covariance, Toeplitz and subspace stages pass through unchanged.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EstimateError {
    /// Sample validation or covariance estimation failed.
    #[error(transparent)]
    Covariance(#[from] CovarianceError),

    /// Toeplitz construction or the Levinson recursion failed.
    #[error(transparent)]
    Toeplitz(#[from] ToeplitzError),

    /// Subspace separation failed.
    #[error(transparent)]
    Subspace(#[from] SubspaceError),

    /// Returned when a covariance matrix cannot be inverted.
    #[error("covariance matrix of dimension {dim} is singular")]
    SingularMatrix {
        /// Matrix dimension.
        dim: usize,
    },

    /// Returned when the model order is zero.
    #[error("model order must be at least 1, got {model_order}")]
    InvalidModelOrder {
        /// Rejected model order.
        model_order: usize,
    },

    /// Returned when the model order is not below half the signal length.
    #[error("model order {model_order} must be less than half the signal length {signal_length}")]
    ModelOrderTooLarge {
        /// Rejected model order.
        model_order: usize,
        /// Signal length.
        signal_length: usize,
    },

    /// Returned when an iterative estimator is asked for zero iterations.
    #[error("iterations must be at least 1, got {iterations}")]
    InvalidIterations {
        /// Rejected iteration count.
        iterations: usize,
    },

    /// Returned when the frequency grid has no points.
    #[error("frequency grid is empty")]
    EmptyGrid,

    /// Returned when the frequency grid contains NaN or infinite values.
    #[error("frequency grid contains non-finite values")]
    NonFiniteGrid,

    /// Returned when the grid has fewer points than lags the estimator needs.
    #[error("frequency grid has {points} points, need at least the signal length {signal_length}")]
    GridTooCoarse {
        /// Number of grid points.
        points: usize,
        /// Signal length.
        signal_length: usize,
    },

    /// Returned when an eigen or pseudo-inverse computation does not converge.
    #[error("{method} did not converge")]
    DecompositionFailed {
        /// Name of the failed computation.
        method: &'static str,
    },
}
