//! Integration tests for parspec-covariance on synthetic tones.

use num_complex::Complex32;
use parspec_covariance::{
    Normalizer, SampleMatrix, WindowDirection, backward_covariance, fast_autocorrelation,
    forward_covariance, snapshot_matrix, window_count,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

fn tone(len: usize, omega: f32) -> Vec<Complex32> {
    (0..len)
        .map(|n| Complex32::from_polar(1.0, omega * n as f32))
        .collect()
}

#[test]
fn autocorrelation_of_tone_rotates_by_frequency() {
    let omega = 0.7;
    let samples = SampleMatrix::from_channel(tone(32, omega)).unwrap();
    let r = &fast_autocorrelation(&samples)[0];

    // r[k] = (L - k) / (2L) * exp(j omega k)
    for k in [1usize, 2, 5, 9] {
        let expected = Complex32::from_polar((32 - k) as f32 / 64.0, omega * k as f32);
        assert!(
            (r[k] - expected).norm() < 1e-4,
            "lag {k}: expected {expected}, got {}",
            r[k]
        );
    }
}

#[test]
fn zero_lag_is_real_and_non_negative() {
    let mut rng = StdRng::seed_from_u64(7);
    let normal = Normal::new(0.0_f32, 1.0).unwrap();
    let x: Vec<Complex32> = (0..50)
        .map(|_| Complex32::new(normal.sample(&mut rng), normal.sample(&mut rng)))
        .collect();
    let samples = SampleMatrix::from_channel(x).unwrap();
    let r = &fast_autocorrelation(&samples)[0];
    assert!(r[0].re > 0.0);
    assert!(r[0].im.abs() < 1e-4);
}

#[test]
fn forward_covariance_of_tone_has_rank_one_structure() {
    let omega = 0.4;
    let len = 24;
    let m = 6;
    let samples = SampleMatrix::from_channel(tone(len, omega)).unwrap();
    let r = forward_covariance(&samples, m, Normalizer::SignalLength).unwrap();

    // Every window of a pure tone gives exp(j omega (i - j)).
    let scale = window_count(len, m) as f32 / len as f32;
    for i in 0..m {
        for j in 0..m {
            let expected = Complex32::from_polar(scale, omega * (i as f32 - j as f32));
            assert!((r[(i, j)] - expected).norm() < 1e-4);
        }
    }
}

#[test]
fn backward_covariance_reverses_phase_progression() {
    let omega = 0.4;
    let len = 24;
    let m = 6;
    let samples = SampleMatrix::from_channel(tone(len, omega)).unwrap();
    let r = backward_covariance(&samples, m, Normalizer::SignalLengthMinus(m)).unwrap();

    let scale = window_count(len, m) as f32 / (len - m) as f32;
    for i in 0..m {
        for j in 0..m {
            let expected = Complex32::from_polar(scale, -omega * (i as f32 - j as f32));
            assert!((r[(i, j)] - expected).norm() < 1e-4);
        }
    }
}

#[test]
fn channels_accumulate_into_one_covariance() {
    let a = tone(16, 0.3);
    let b = tone(16, -1.1);
    let both = SampleMatrix::from_channels(&[a.clone(), b.clone()]).unwrap();
    let ra = forward_covariance(&SampleMatrix::from_channel(a).unwrap(), 4, Normalizer::SignalLength)
        .unwrap();
    let rb = forward_covariance(&SampleMatrix::from_channel(b).unwrap(), 4, Normalizer::SignalLength)
        .unwrap();
    let r = forward_covariance(&both, 4, Normalizer::SignalLength).unwrap();
    for ((x, y), z) in r.iter().zip(ra.iter()).zip(rb.iter()) {
        assert!((x - (y + z)).norm() < 1e-4);
    }
}

#[test]
fn snapshot_count_matches_windows() {
    let samples = SampleMatrix::from_channel(tone(20, 0.1)).unwrap();
    let snaps = snapshot_matrix(&samples, 7, WindowDirection::Backward).unwrap();
    assert_eq!(snaps.ncols(), window_count(20, 7));
    assert_eq!(snaps.nrows(), 7);
}
