//! Error types for the parspec-toeplitz crate.

/// Error type for all fallible operations in the parspec-toeplitz crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ToeplitzError {
    /// Returned when a Toeplitz matrix is requested from an empty
    /// autocorrelation vector.
    #[error("autocorrelation vector is empty")]
    EmptyAutocorrelation,

    /// Returned when the system matrix has no rows.
    #[error("system matrix is empty")]
    EmptyMatrix,

    /// Returned when the system matrix is not square.
    #[error("system matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when the right-hand side does not match the system size.
    #[error("right-hand side has {got} rows, expected {expected}")]
    DimensionMismatch {
        /// System dimension.
        expected: usize,
        /// Length of the right-hand side.
        got: usize,
    },

    /// Returned when a pivot of the recursion is too close to zero.
    ///
    /// `order` is the size of the leading sub-system being solved when the
    /// pivot collapsed (1 for the `T[0,0]` pivot).
    #[error("Levinson recursion unstable at order {order}: |denominator| = {denominator:e}")]
    NumericalInstability {
        /// Order at which the recursion failed.
        order: usize,
        /// Magnitude of the offending denominator.
        denominator: f32,
    },

    /// Returned when the instability tolerance is negative or not finite.
    #[error("tolerance must be finite and non-negative, got {tolerance}")]
    InvalidTolerance {
        /// Rejected tolerance.
        tolerance: f32,
    },
}
