//! Parameter validation happens before any matrix is built.

mod common;

use common::{noisy_tones, samples};
use parspec_estimate::{
    ApesConfig, CaponConfig, CovarianceModel, EspritConfig, EstimateError, FrequencyGrid,
    IaaConfig, IaaVariant, MusicConfig, apes, capon, esprit, iaa, music,
};
use parspec_subspace::SubspaceError;

#[test]
fn model_order_must_be_below_half_length() {
    let s = samples(noisy_tones(20, &[1.0], -1.0, 0.1, 1));
    let grid = FrequencyGrid::centered(64).unwrap();
    let too_large = CovarianceModel::Forward { model_order: 10 };

    assert!(matches!(
        music(&s, &MusicConfig::new(1).with_model(too_large), &grid),
        Err(EstimateError::ModelOrderTooLarge {
            model_order: 10,
            signal_length: 20
        })
    ));
    assert!(matches!(
        capon(&s, &CaponConfig::new(too_large), &grid),
        Err(EstimateError::ModelOrderTooLarge { .. })
    ));
    assert!(matches!(
        apes(&s, &ApesConfig::new(0), &grid),
        Err(EstimateError::InvalidModelOrder { model_order: 0 })
    ));
}

#[test]
fn source_count_must_leave_a_noise_subspace() {
    let s = samples(noisy_tones(20, &[1.0], -1.0, 0.1, 2));
    let config = EspritConfig::new(5).with_model(CovarianceModel::Backward { model_order: 5 });
    assert!(matches!(
        esprit(&s, &config),
        Err(EstimateError::Subspace(SubspaceError::InvalidSourceCount {
            num_sources: 5,
            dim: 5
        }))
    ));
}

#[test]
fn iaa_requires_iterations_and_fine_grid() {
    let s = samples(noisy_tones(32, &[1.0], 1.0, 0.1, 3));
    let coarse = FrequencyGrid::centered(16).unwrap();
    assert!(matches!(
        iaa(&s, &IaaConfig::new(IaaVariant::Recursive), &coarse),
        Err(EstimateError::GridTooCoarse {
            points: 16,
            signal_length: 32
        })
    ));

    let grid = FrequencyGrid::centered(64).unwrap();
    assert!(matches!(
        iaa(
            &s,
            &IaaConfig::new(IaaVariant::RecursiveLevinson).with_iterations(0),
            &grid
        ),
        Err(EstimateError::InvalidIterations { iterations: 0 })
    ));
}

#[test]
fn zero_signal_is_singular_for_inverting_estimators() {
    let s = samples(vec![parspec_estimate::Complex32::new(0.0, 0.0); 16]);
    let grid = FrequencyGrid::centered(32).unwrap();
    assert!(matches!(
        capon(&s, &CaponConfig::new(CovarianceModel::Toeplitz), &grid),
        Err(EstimateError::SingularMatrix { dim: 16 })
    ));
    assert!(matches!(
        iaa(&s, &IaaConfig::new(IaaVariant::RecursiveLevinson), &grid),
        Err(EstimateError::Toeplitz(_))
    ));
}

#[test]
fn music_degrades_gracefully_on_singular_covariance() {
    let s = samples(vec![parspec_estimate::Complex32::new(0.0, 0.0); 16]);
    let grid = FrequencyGrid::centered(32).unwrap();
    let spectrum = music(&s, &MusicConfig::new(2), &grid).unwrap();
    assert_eq!(spectrum.len(), 32);
}
