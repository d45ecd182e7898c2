//! Frequency grids in radians per sample.

use std::f32::consts::PI;

use crate::error::EstimateError;

/// Ordered digital frequencies (radians/sample) at which a spectrum is
/// evaluated.
///
/// Any finite spacing is allowed. The FFT-initialised IAA variants
/// additionally assume the grid returned by [`FrequencyGrid::centered`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid {
    frequencies: Vec<f32>,
}

impl FrequencyGrid {
    /// Wraps caller-supplied frequencies.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EstimateError::EmptyGrid`] | no frequencies |
    /// | [`EstimateError::NonFiniteGrid`] | NaN or infinite frequency |
    pub fn new(frequencies: Vec<f32>) -> Result<Self, EstimateError> {
        if frequencies.is_empty() {
            return Err(EstimateError::EmptyGrid);
        }
        if !frequencies.iter().all(|f| f.is_finite()) {
            return Err(EstimateError::NonFiniteGrid);
        }
        Ok(Self { frequencies })
    }

    /// The `points`-point uniform grid in FFT-shifted order.
    ///
    /// Point `g` is `2 * pi * (g - points / 2) / points`, i.e. `-pi` up to
    /// just below `pi` for even `points`. This is the order produced by
    /// shifting an unshifted `points`-point FFT.
    ///
    /// # Example
    ///
    /// ```
    /// use parspec_estimate::FrequencyGrid;
    ///
    /// let grid = FrequencyGrid::centered(4).unwrap();
    /// let pi = std::f32::consts::PI;
    /// assert_eq!(grid.as_slice(), &[-pi, -pi / 2.0, 0.0, pi / 2.0]);
    /// ```
    pub fn centered(points: usize) -> Result<Self, EstimateError> {
        if points == 0 {
            return Err(EstimateError::EmptyGrid);
        }
        let half = (points / 2) as f32;
        let step = 2.0 * PI / points as f32;
        Ok(Self {
            frequencies: (0..points).map(|g| (g as f32 - half) * step).collect(),
        })
    }

    /// `points` evenly spaced frequencies from `start` to `end` inclusive.
    ///
    /// # Errors
    ///
    /// [`EstimateError::EmptyGrid`] for zero points and
    /// [`EstimateError::NonFiniteGrid`] for non-finite bounds.
    pub fn linspace(start: f32, end: f32, points: usize) -> Result<Self, EstimateError> {
        if points == 0 {
            return Err(EstimateError::EmptyGrid);
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(EstimateError::NonFiniteGrid);
        }
        if points == 1 {
            return Ok(Self {
                frequencies: vec![start],
            });
        }
        let step = (end - start) / (points - 1) as f32;
        Ok(Self {
            frequencies: (0..points).map(|g| start + g as f32 * step).collect(),
        })
    }

    /// Returns the frequencies.
    pub fn as_slice(&self) -> &[f32] {
        &self.frequencies
    }

    /// Returns the number of grid points.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Always `false`; a grid holds at least one point.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

impl AsRef<[f32]> for FrequencyGrid {
    fn as_ref(&self) -> &[f32] {
        &self.frequencies
    }
}
