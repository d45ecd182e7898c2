//! Whole-signal autocorrelation via FFT.
//!
//! Zero-padding each channel to twice its length turns the circular
//! correlation computed by the FFT into the linear one, so the result equals
//! the direct lag sum without the O(N^2) cost.

use num_complex::Complex32;
use rustfft::{Fft, FftPlanner};

use crate::samples::SampleMatrix;

/// Computes the autocorrelation vector of every channel.
///
/// Each output has the same length `L` as the signal, with lag `k` equal to
/// `sum_m x[m + k] * conj(x[m]) / (2L)`. The `1/(2L)` factor is the
/// inverse-transform scale of the padded FFT.
pub fn fast_autocorrelation(samples: &SampleMatrix) -> Vec<Vec<Complex32>> {
    let n = samples.signal_length();
    let mut planner = FftPlanner::<f32>::new();
    let forward = planner.plan_fft_forward(2 * n);
    let inverse = planner.plan_fft_inverse(2 * n);

    samples
        .as_matrix()
        .column_iter()
        .map(|column| {
            let x: Vec<Complex32> = column.iter().copied().collect();
            correlate(&x, forward.as_ref(), inverse.as_ref())
        })
        .collect()
}

/// Computes the autocorrelation vector of a single channel.
///
/// Returns an empty vector for empty input.
pub fn fast_autocorrelation_channel(x: &[Complex32]) -> Vec<Complex32> {
    if x.is_empty() {
        return Vec::new();
    }
    let mut planner = FftPlanner::<f32>::new();
    let forward = planner.plan_fft_forward(2 * x.len());
    let inverse = planner.plan_fft_inverse(2 * x.len());
    correlate(x, forward.as_ref(), inverse.as_ref())
}

fn correlate(x: &[Complex32], forward: &dyn Fft<f32>, inverse: &dyn Fft<f32>) -> Vec<Complex32> {
    let n = x.len();
    let mut buffer: Vec<Complex32> = x
        .iter()
        .copied()
        .chain(std::iter::repeat_n(Complex32::new(0.0, 0.0), n))
        .collect();

    forward.process(&mut buffer);

    // X * conj(X)
    for v in buffer.iter_mut() {
        *v = Complex32::new(v.norm_sqr(), 0.0);
    }

    inverse.process(&mut buffer);

    // rustfft is unnormalized
    let norm = 1.0 / (2 * n) as f32;
    buffer.truncate(n);
    buffer.into_iter().map(|c| c * norm).collect()
}
