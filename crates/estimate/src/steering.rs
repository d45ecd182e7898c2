//! Vandermonde steering matrices.

use nalgebra::DMatrix;
use num_complex::Complex32;

use crate::grid::FrequencyGrid;

/// Sign of the exponent in a steering vector.
///
/// MUSIC, ESPRIT and Capon steer with [`SteeringSign::Negative`]; APES and IAA
/// with [`SteeringSign::Positive`]. Swapping the sign mirrors the spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteeringSign {
    /// `exp(+j n w)`.
    Positive,
    /// `exp(-j n w)`.
    Negative,
}

impl SteeringSign {
    fn factor(self) -> f32 {
        match self {
            SteeringSign::Positive => 1.0,
            SteeringSign::Negative => -1.0,
        }
    }
}

/// `rows x G` matrix with entry `(n, g) = exp(sign * j * n * grid[g])`.
pub fn vandermonde(rows: usize, grid: &FrequencyGrid, sign: SteeringSign) -> DMatrix<Complex32> {
    vandermonde_offset(0, rows, grid, sign)
}

/// Like [`vandermonde`], with row `n` using exponent index `first_row + n`.
pub fn vandermonde_offset(
    first_row: usize,
    rows: usize,
    grid: &FrequencyGrid,
    sign: SteeringSign,
) -> DMatrix<Complex32> {
    let w = grid.as_slice();
    let s = sign.factor();
    DMatrix::from_fn(rows, w.len(), |n, g| {
        Complex32::from_polar(1.0, s * (first_row + n) as f32 * w[g])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sign_flips_phase() {
        let grid = FrequencyGrid::new(vec![0.5]).unwrap();
        let pos = vandermonde(3, &grid, SteeringSign::Positive);
        let neg = vandermonde(3, &grid, SteeringSign::Negative);
        for n in 0..3 {
            assert_abs_diff_eq!(pos[(n, 0)].arg(), 0.5 * n as f32, epsilon = 1e-6);
            assert_eq!(neg[(n, 0)], pos[(n, 0)].conj());
        }
    }

    #[test]
    fn first_row_is_ones() {
        let grid = FrequencyGrid::centered(6).unwrap();
        let a = vandermonde(4, &grid, SteeringSign::Negative);
        assert_eq!(a.shape(), (4, 6));
        for g in 0..6 {
            assert_eq!(a[(0, g)], Complex32::new(1.0, 0.0));
        }
    }

    #[test]
    fn offset_shifts_exponent() {
        let grid = FrequencyGrid::new(vec![0.2, -0.7]).unwrap();
        let full = vandermonde(6, &grid, SteeringSign::Positive);
        let tail = vandermonde_offset(2, 4, &grid, SteeringSign::Positive);
        for n in 0..4 {
            for g in 0..2 {
                assert!((tail[(n, g)] - full[(n + 2, g)]).norm() < 1e-6);
            }
        }
    }
}
