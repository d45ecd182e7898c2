//! Sliding-window covariance estimation.
//!
//! A window of length `W` slides over the signal one sample at a time; every
//! position contributes the outer product `w * w^H` of its samples (summed
//! across channels). Forward windows read samples in time order, backward
//! windows read them time-reversed.

use nalgebra::DMatrix;
use num_complex::Complex32;
use rayon::prelude::*;

use crate::error::CovarianceError;
use crate::samples::SampleMatrix;

/// Order in which each window reads the samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowDirection {
    /// `x[s], x[s+1], ..., x[s+W-1]` for start offsets `s = 0..=L-W`.
    Forward,
    /// `x[e], x[e-1], ..., x[e-W+1]` for end offsets `e = W-1..L`.
    Backward,
}

/// Divisor applied to the accumulated outer products.
///
/// Estimators disagree on this divisor and their output scaling depends on
/// it, so each one names its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// Divide by the signal length `L`.
    SignalLength,
    /// Divide by `L - m`.
    SignalLengthMinus(usize),
}

impl Normalizer {
    /// Returns the divisor for a signal of length `len`.
    ///
    /// # Errors
    ///
    /// Returns [`CovarianceError::InvalidNormalizer`] if the divisor is zero.
    pub fn divisor(&self, len: usize) -> Result<f32, CovarianceError> {
        let d = match *self {
            Normalizer::SignalLength => len,
            Normalizer::SignalLengthMinus(m) => len.saturating_sub(m),
        };
        if d == 0 {
            return Err(CovarianceError::InvalidNormalizer { len });
        }
        Ok(d as f32)
    }
}

/// Number of window positions for a signal of length `len`; zero when the
/// window does not fit.
pub fn window_count(len: usize, window_len: usize) -> usize {
    (len + 1).saturating_sub(window_len)
}

/// Stacks every window into a `window_len x (windows * channels)` matrix.
///
/// Columns are ordered window by window, and within a window channel by
/// channel. Column `w * C + c` holds window `w` of channel `c`.
///
/// # Errors
///
/// Returns [`CovarianceError::InvalidWindow`] unless `1 <= window_len <= L`.
pub fn snapshot_matrix(
    samples: &SampleMatrix,
    window_len: usize,
    direction: WindowDirection,
) -> Result<DMatrix<Complex32>, CovarianceError> {
    let len = samples.signal_length();
    validate_window(len, window_len)?;

    let channels = samples.num_channels();
    let x = samples.as_matrix();
    let windows = window_count(len, window_len);

    Ok(DMatrix::from_fn(
        window_len,
        windows * channels,
        |i, col| {
            let (w, ch) = (col / channels, col % channels);
            x[(sample_row(w, i, window_len, direction), ch)]
        },
    ))
}

/// Averaged covariance of forward (time-ordered) windows.
///
/// # Errors
///
/// Returns [`CovarianceError::InvalidWindow`] for an invalid window length and
/// [`CovarianceError::InvalidNormalizer`] for a zero divisor.
pub fn forward_covariance(
    samples: &SampleMatrix,
    window_len: usize,
    normalizer: Normalizer,
) -> Result<DMatrix<Complex32>, CovarianceError> {
    windowed_covariance(samples, window_len, normalizer, WindowDirection::Forward)
}

/// Averaged covariance of backward (time-reversed) windows.
///
/// # Errors
///
/// Same as [`forward_covariance`].
pub fn backward_covariance(
    samples: &SampleMatrix,
    window_len: usize,
    normalizer: Normalizer,
) -> Result<DMatrix<Complex32>, CovarianceError> {
    windowed_covariance(samples, window_len, normalizer, WindowDirection::Backward)
}

/// Sums `w * w^H` over all window positions, then divides by the normaliser.
#[tracing::instrument(skip(samples), fields(len = samples.signal_length(), channels = samples.num_channels()))]
pub fn windowed_covariance(
    samples: &SampleMatrix,
    window_len: usize,
    normalizer: Normalizer,
    direction: WindowDirection,
) -> Result<DMatrix<Complex32>, CovarianceError> {
    let len = samples.signal_length();
    validate_window(len, window_len)?;
    let divisor = normalizer.divisor(len)?;

    let x = samples.as_matrix();
    let channels = samples.num_channels();

    let sum = (0..window_count(len, window_len))
        .into_par_iter()
        .map(|w| {
            let window = DMatrix::from_fn(window_len, channels, |i, ch| {
                x[(sample_row(w, i, window_len, direction), ch)]
            });
            &window * window.adjoint()
        })
        .reduce(
            || DMatrix::zeros(window_len, window_len),
            |acc, outer| acc + outer,
        );

    Ok(sum.map(|v| v / divisor))
}

/// Row of the sample matrix read at position `i` of window `w`.
fn sample_row(w: usize, i: usize, window_len: usize, direction: WindowDirection) -> usize {
    match direction {
        WindowDirection::Forward => w + i,
        WindowDirection::Backward => w + window_len - 1 - i,
    }
}

fn validate_window(len: usize, window_len: usize) -> Result<(), CovarianceError> {
    if window_len == 0 || window_len > len {
        return Err(CovarianceError::InvalidWindow { window_len, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp(len: usize) -> SampleMatrix {
        let x: Vec<Complex32> = (0..len)
            .map(|n| Complex32::new(n as f32, 1.0 - n as f32 * 0.5))
            .collect();
        SampleMatrix::from_channel(x).unwrap()
    }

    #[test]
    fn divisor_values() {
        assert_eq!(Normalizer::SignalLength.divisor(10).unwrap(), 10.0);
        assert_eq!(Normalizer::SignalLengthMinus(3).divisor(10).unwrap(), 7.0);
        assert!(matches!(
            Normalizer::SignalLengthMinus(10).divisor(10),
            Err(CovarianceError::InvalidNormalizer { len: 10 })
        ));
    }

    #[test]
    fn window_count_values() {
        assert_eq!(window_count(10, 3), 8);
        assert_eq!(window_count(4, 4), 1);
        assert_eq!(window_count(4, 5), 0);
        assert_eq!(window_count(4, 10), 0);
    }

    #[test]
    fn snapshot_forward_layout() {
        let s = ramp(5);
        let snaps = snapshot_matrix(&s, 3, WindowDirection::Forward).unwrap();
        assert_eq!(snaps.shape(), (3, 3));
        // window 1 = x[1], x[2], x[3]
        assert_eq!(snaps[(0, 1)].re, 1.0);
        assert_eq!(snaps[(2, 1)].re, 3.0);
    }

    #[test]
    fn snapshot_backward_layout() {
        let s = ramp(5);
        let snaps = snapshot_matrix(&s, 3, WindowDirection::Backward).unwrap();
        assert_eq!(snaps.shape(), (3, 3));
        // window 0 ends at x[2]: x[2], x[1], x[0]
        assert_eq!(snaps[(0, 0)].re, 2.0);
        assert_eq!(snaps[(2, 0)].re, 0.0);
        // last window ends at x[4]
        assert_eq!(snaps[(0, 2)].re, 4.0);
    }

    #[test]
    fn snapshot_interleaves_channels() {
        let a: Vec<Complex32> = (0..4).map(|n| Complex32::new(n as f32, 0.0)).collect();
        let b: Vec<Complex32> = (0..4).map(|n| Complex32::new(10.0 + n as f32, 0.0)).collect();
        let s = SampleMatrix::from_channels(&[a, b]).unwrap();
        let snaps = snapshot_matrix(&s, 2, WindowDirection::Forward).unwrap();
        assert_eq!(snaps.shape(), (2, 6));
        assert_eq!(snaps[(0, 0)].re, 0.0);
        assert_eq!(snaps[(0, 1)].re, 10.0);
        assert_eq!(snaps[(0, 2)].re, 1.0);
        assert_eq!(snaps[(1, 3)].re, 12.0);
    }

    #[test]
    fn covariance_is_snapshot_gram() {
        let s = ramp(9);
        for direction in [WindowDirection::Forward, WindowDirection::Backward] {
            let snaps = snapshot_matrix(&s, 4, direction).unwrap();
            let gram = (&snaps * snaps.adjoint()).map(|v| v / 9.0);
            let cov = windowed_covariance(&s, 4, Normalizer::SignalLength, direction).unwrap();
            for (a, b) in cov.iter().zip(gram.iter()) {
                assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-3);
                assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn covariance_is_hermitian() {
        let s = ramp(12);
        let cov = backward_covariance(&s, 5, Normalizer::SignalLengthMinus(4)).unwrap();
        for i in 0..5 {
            for j in 0..5 {
                let d = cov[(i, j)] - cov[(j, i)].conj();
                assert!(d.norm() < 1e-3, "({i},{j}) not Hermitian: {d}");
            }
        }
    }

    #[test]
    fn backward_is_flipped_forward() {
        // Each backward window is a forward window read in reverse.
        let s = ramp(10);
        let f = forward_covariance(&s, 3, Normalizer::SignalLength).unwrap();
        let b = backward_covariance(&s, 3, Normalizer::SignalLength).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = f[(2 - i, 2 - j)];
                assert_abs_diff_eq!(b[(i, j)].re, expected.re, epsilon = 1e-3);
                assert_abs_diff_eq!(b[(i, j)].im, expected.im, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn invalid_window_rejected() {
        let s = ramp(4);
        assert!(matches!(
            forward_covariance(&s, 0, Normalizer::SignalLength),
            Err(CovarianceError::InvalidWindow {
                window_len: 0,
                len: 4
            })
        ));
        assert!(matches!(
            snapshot_matrix(&s, 5, WindowDirection::Backward),
            Err(CovarianceError::InvalidWindow {
                window_len: 5,
                len: 4
            })
        ));
    }
}
