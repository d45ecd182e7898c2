//! Shared synthetic signals for the estimator integration tests.

#![allow(dead_code)]

use num_complex::Complex32;
use parspec_covariance::SampleMatrix;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// Sum of unit tones `exp(sign * j * w * n)` plus complex Gaussian noise with
/// total standard deviation `noise_std`.
pub fn noisy_tones(
    len: usize,
    omegas: &[f32],
    sign: f32,
    noise_std: f32,
    seed: u64,
) -> Vec<Complex32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0_f32, noise_std / 2.0_f32.sqrt()).unwrap();
    (0..len)
        .map(|n| {
            let clean: Complex32 = omegas
                .iter()
                .map(|&w| Complex32::from_polar(1.0, sign * w * n as f32))
                .sum();
            clean + Complex32::new(normal.sample(&mut rng), normal.sample(&mut rng))
        })
        .collect()
}

pub fn samples(x: Vec<Complex32>) -> SampleMatrix {
    SampleMatrix::from_channel(x).unwrap()
}

/// Asserts that every expected frequency has an estimate within `tol`.
pub fn assert_matched(estimates: &[f32], expected: &[f32], tol: f32) {
    assert_eq!(estimates.len(), expected.len(), "estimates: {estimates:?}");
    for &e in expected {
        let nearest = estimates
            .iter()
            .map(|&f| (f - e).abs())
            .fold(f32::INFINITY, f32::min);
        assert!(
            nearest < tol,
            "no estimate within {tol} of {e}: {estimates:?}"
        );
    }
}
