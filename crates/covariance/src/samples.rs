//! Validated complex sample matrix.

use nalgebra::DMatrix;
use num_complex::Complex32;

use crate::error::CovarianceError;

/// A validated `signal_length x num_channels` matrix of complex samples.
///
/// Guarantees:
/// - at least 2 samples per channel
/// - at least 1 channel
/// - every entry is finite
///
/// Channels are independent snapshots or array elements observed over the
/// same time window.
///
/// # Example
///
/// ```
/// use num_complex::Complex32;
/// use parspec_covariance::SampleMatrix;
///
/// let x = vec![Complex32::new(1.0, 0.0), Complex32::new(0.0, 1.0)];
/// let samples = SampleMatrix::from_channel(x).unwrap();
/// assert_eq!(samples.signal_length(), 2);
/// assert_eq!(samples.num_channels(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct SampleMatrix {
    data: DMatrix<Complex32>,
}

impl SampleMatrix {
    /// Wraps a `signal_length x num_channels` matrix after validation.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`CovarianceError::NoChannels`] | zero columns |
    /// | [`CovarianceError::SignalTooShort`] | fewer than 2 rows |
    /// | [`CovarianceError::NonFiniteData`] | any entry is NaN or infinite |
    pub fn new(data: DMatrix<Complex32>) -> Result<Self, CovarianceError> {
        if data.ncols() == 0 {
            return Err(CovarianceError::NoChannels);
        }
        if data.nrows() < 2 {
            return Err(CovarianceError::SignalTooShort {
                len: data.nrows(),
                min: 2,
            });
        }
        if !data.iter().all(|c| c.is_finite()) {
            return Err(CovarianceError::NonFiniteData);
        }
        Ok(Self { data })
    }

    /// Builds a single-channel sample matrix.
    pub fn from_channel(samples: Vec<Complex32>) -> Result<Self, CovarianceError> {
        let len = samples.len();
        Self::new(DMatrix::from_vec(len, 1, samples))
    }

    /// Builds a sample matrix from equally long channels.
    ///
    /// # Errors
    ///
    /// Returns [`CovarianceError::ChannelLengthMismatch`] if the channels
    /// differ in length, plus every error of [`SampleMatrix::new`].
    pub fn from_channels(channels: &[Vec<Complex32>]) -> Result<Self, CovarianceError> {
        let Some(first) = channels.first() else {
            return Err(CovarianceError::NoChannels);
        };
        let expected = first.len();
        if let Some((channel, c)) = channels
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != expected)
        {
            return Err(CovarianceError::ChannelLengthMismatch {
                channel,
                expected,
                got: c.len(),
            });
        }
        let flat: Vec<Complex32> = channels.iter().flatten().copied().collect();
        Self::new(DMatrix::from_vec(expected, channels.len(), flat))
    }

    /// Returns the number of samples per channel.
    pub fn signal_length(&self) -> usize {
        self.data.nrows()
    }

    /// Returns the number of channels.
    pub fn num_channels(&self) -> usize {
        self.data.ncols()
    }

    /// Returns the underlying matrix.
    pub fn as_matrix(&self) -> &DMatrix<Complex32> {
        &self.data
    }

    /// Returns a copy of one channel.
    ///
    /// # Errors
    ///
    /// Returns [`CovarianceError::ChannelOutOfRange`] for an invalid index.
    pub fn channel(&self, channel: usize) -> Result<Vec<Complex32>, CovarianceError> {
        if channel >= self.num_channels() {
            return Err(CovarianceError::ChannelOutOfRange {
                channel,
                channels: self.num_channels(),
            });
        }
        Ok(self.data.column(channel).iter().copied().collect())
    }

    /// Returns a copy of channel 0, which always exists.
    pub fn first_channel(&self) -> Vec<Complex32> {
        self.data.column(0).iter().copied().collect()
    }
}

impl AsRef<DMatrix<Complex32>> for SampleMatrix {
    fn as_ref(&self) -> &DMatrix<Complex32> {
        &self.data
    }
}
