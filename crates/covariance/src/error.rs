//! Error types for the parspec-covariance crate.

/// Error type for all fallible operations in the parspec-covariance crate.
///
/// Covers sample validation and window-length problems that may occur while
/// estimating autocorrelation or covariance.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CovarianceError {
    /// Returned when the signal has fewer samples than required.
    #[error("signal too short: got {len} samples, need at least {min}")]
    SignalTooShort {
        /// Number of samples provided.
        len: usize,
        /// Minimum number of samples required.
        min: usize,
    },

    /// Returned when the sample matrix has no channels.
    #[error("sample matrix has no channels")]
    NoChannels,

    /// Returned when the samples contain non-finite values (NaN or infinity).
    #[error("samples contain non-finite values")]
    NonFiniteData,

    /// Returned when channels passed separately differ in length.
    #[error("channel {channel} has {got} samples, expected {expected}")]
    ChannelLengthMismatch {
        /// Offending channel.
        channel: usize,
        /// Length of the first channel.
        expected: usize,
        /// Length of the offending channel.
        got: usize,
    },

    /// Returned when a channel index is out of range.
    #[error("channel {channel} out of range for {channels} channels")]
    ChannelOutOfRange {
        /// Requested channel.
        channel: usize,
        /// Number of available channels.
        channels: usize,
    },

    /// Returned when the window length is zero or exceeds the signal length.
    #[error("invalid window length {window_len} for signal of length {len}")]
    InvalidWindow {
        /// Requested window length.
        window_len: usize,
        /// Signal length.
        len: usize,
    },

    /// Returned when the normaliser divisor is not positive.
    #[error("normaliser divisor must be positive for signal of length {len}")]
    InvalidNormalizer {
        /// Signal length.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_signal_too_short() {
        let err = CovarianceError::SignalTooShort { len: 1, min: 2 };
        assert_eq!(
            err.to_string(),
            "signal too short: got 1 samples, need at least 2"
        );
    }

    #[test]
    fn error_no_channels() {
        let err = CovarianceError::NoChannels;
        assert_eq!(err.to_string(), "sample matrix has no channels");
    }

    #[test]
    fn error_non_finite_data() {
        let err = CovarianceError::NonFiniteData;
        assert_eq!(err.to_string(), "samples contain non-finite values");
    }

    #[test]
    fn error_channel_length_mismatch() {
        let err = CovarianceError::ChannelLengthMismatch {
            channel: 1,
            expected: 16,
            got: 15,
        };
        assert_eq!(err.to_string(), "channel 1 has 15 samples, expected 16");
    }

    #[test]
    fn error_channel_out_of_range() {
        let err = CovarianceError::ChannelOutOfRange {
            channel: 3,
            channels: 2,
        };
        assert_eq!(err.to_string(), "channel 3 out of range for 2 channels");
    }

    #[test]
    fn error_invalid_window() {
        let err = CovarianceError::InvalidWindow {
            window_len: 40,
            len: 32,
        };
        assert_eq!(
            err.to_string(),
            "invalid window length 40 for signal of length 32"
        );
    }

    #[test]
    fn error_invalid_normalizer() {
        let err = CovarianceError::InvalidNormalizer { len: 8 };
        assert_eq!(
            err.to_string(),
            "normaliser divisor must be positive for signal of length 8"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CovarianceError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CovarianceError>();
    }
}
