//! Error types for the parspec-subspace crate.

/// Error type for all fallible operations in the parspec-subspace crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SubspaceError {
    /// Returned when the covariance matrix is not square.
    #[error("covariance matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when the source count leaves no signal or no noise subspace.
    #[error("num_sources must be in 1..{dim}, got {num_sources}")]
    InvalidSourceCount {
        /// Requested number of sources.
        num_sources: usize,
        /// Covariance dimension.
        dim: usize,
    },

    /// Returned when the covariance matrix contains NaN or infinite entries.
    #[error("covariance matrix contains non-finite values")]
    NonFiniteInput,

    /// Returned when the decomposition does not converge.
    #[error("{method} decomposition did not converge")]
    DecompositionFailed {
        /// Name of the decomposition.
        method: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_not_square() {
        let err = SubspaceError::NotSquare { rows: 4, cols: 2 };
        assert_eq!(err.to_string(), "covariance matrix must be square, got 4x2");
    }

    #[test]
    fn error_invalid_source_count() {
        let err = SubspaceError::InvalidSourceCount {
            num_sources: 8,
            dim: 8,
        };
        assert_eq!(err.to_string(), "num_sources must be in 1..8, got 8");
    }

    #[test]
    fn error_non_finite_input() {
        let err = SubspaceError::NonFiniteInput;
        assert_eq!(
            err.to_string(),
            "covariance matrix contains non-finite values"
        );
    }

    #[test]
    fn error_decomposition_failed() {
        let err = SubspaceError::DecompositionFailed { method: "SVD" };
        assert_eq!(err.to_string(), "SVD decomposition did not converge");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SubspaceError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SubspaceError>();
    }
}
