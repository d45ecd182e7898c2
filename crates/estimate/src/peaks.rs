//! Peak picking on pseudo-spectra.

use crate::grid::FrequencyGrid;

/// A local maximum of a spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Grid index of the maximum.
    pub index: usize,
    /// Grid frequency in radians per sample.
    pub frequency: f32,
    /// Spectrum value at the maximum.
    pub value: f32,
}

/// Returns up to `n_max` interior local maxima, highest first.
///
/// A point is a local maximum when it is strictly greater than both
/// neighbours. Complex spectra should be passed as magnitudes. Extra points
/// in the longer of `spectrum` and `grid` are ignored.
///
/// # Example
///
/// ```
/// use parspec_estimate::{FrequencyGrid, find_peaks};
///
/// let grid = FrequencyGrid::linspace(0.0, 4.0, 5).unwrap();
/// let peaks = find_peaks(&[0.0, 3.0, 1.0, 5.0, 0.0], &grid, 2);
/// assert_eq!(peaks[0].index, 3);
/// assert_eq!(peaks[1].frequency, 1.0);
/// ```
pub fn find_peaks(spectrum: &[f32], grid: &FrequencyGrid, n_max: usize) -> Vec<Peak> {
    let frequencies = grid.as_slice();
    let len = spectrum.len().min(frequencies.len());
    if len < 3 {
        return Vec::new();
    }

    let mut peaks: Vec<Peak> = (1..len - 1)
        .filter(|&i| spectrum[i] > spectrum[i - 1] && spectrum[i] > spectrum[i + 1])
        .map(|i| Peak {
            index: i,
            frequency: frequencies[i],
            value: spectrum[i],
        })
        .collect();

    peaks.sort_by(|a, b| b.value.total_cmp(&a.value));
    peaks.truncate(n_max);
    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_height() {
        let grid = FrequencyGrid::linspace(0.0, 6.0, 7).unwrap();
        let peaks = find_peaks(&[0.0, 2.0, 0.0, 9.0, 0.0, 4.0, 0.0], &grid, 10);
        let idx: Vec<usize> = peaks.iter().map(|p| p.index).collect();
        assert_eq!(idx, vec![3, 5, 1]);
    }

    #[test]
    fn plateaus_and_edges_are_not_peaks() {
        let grid = FrequencyGrid::linspace(0.0, 4.0, 5).unwrap();
        assert!(find_peaks(&[5.0, 1.0, 1.0, 1.0, 5.0], &grid, 3).is_empty());
    }

    #[test]
    fn short_input() {
        let grid = FrequencyGrid::linspace(0.0, 1.0, 2).unwrap();
        assert!(find_peaks(&[1.0, 2.0], &grid, 1).is_empty());
    }

    #[test]
    fn truncates_to_n_max() {
        let grid = FrequencyGrid::linspace(0.0, 6.0, 7).unwrap();
        let peaks = find_peaks(&[0.0, 2.0, 0.0, 9.0, 0.0, 4.0, 0.0], &grid, 1);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].value, 9.0);
    }
}
