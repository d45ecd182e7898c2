//! # parspec-estimate
//!
//! Super-resolution spectral estimators for a few complex sinusoids in noise.
//!
//! ## Estimator Family
//!
//! ```mermaid
//! graph LR
//!     S["SampleMatrix"] --> T["Toeplitz (fast autocorrelation)"]
//!     S --> W["windowed covariance"]
//!     T --> D["decompose(&cov, k)?"]
//!     W --> D
//!     D --> M["music(): pseudo-spectrum"]
//!     D --> E["esprit(): frequencies"]
//!     T --> C["capon(): PSD"]
//!     W --> C
//!     W --> A["apes(): complex spectrum"]
//!     T --> I["iaa(): complex spectrum"]
//!     I -->|"RecursiveLevinson"| L["LevinsonSolver"]
//! ```
//!
//! ## Steering Conventions
//!
//! | Estimator | Steering | Output |
//! |-----------|----------|--------|
//! | [`music`] | `exp(-j n w)` | `Vec<f32>` pseudo-spectrum |
//! | [`esprit`] | `exp(-j n w)` | `Vec<f32>` frequencies, unordered |
//! | [`capon`] | `exp(-j n w)` | `Vec<f32>` PSD |
//! | [`apes`] | `exp(+j n w)` | `Vec<Complex32>` |
//! | [`iaa`] | `exp(+j n w)` | `Vec<Complex32>` |
//!
//! The signs are part of the contract; flipping one mirrors that estimator's
//! spectrum.
//!
//! ## Quick Start
//!
//! ```ignore
//! use parspec_estimate::{music, find_peaks, FrequencyGrid, MusicConfig};
//!
//! let grid = FrequencyGrid::centered(1024)?;
//! let spectrum = music(&samples, &MusicConfig::new(2), &grid)?;
//! let peaks = find_peaks(&spectrum, &grid, 2);
//! ```

mod apes;
mod capon;
mod error;
mod grid;
mod iaa;
mod model;
mod peaks;
mod projection;
mod steering;
mod subspace;

pub use apes::{ApesConfig, apes};
pub use capon::{CaponConfig, capon};
pub use error::EstimateError;
pub use grid::FrequencyGrid;
pub use iaa::{IaaConfig, IaaVariant, iaa};
pub use model::{CovarianceModel, validate_model_order};
pub use peaks::{Peak, find_peaks};
pub use steering::{SteeringSign, vandermonde, vandermonde_offset};
pub use subspace::{EspritConfig, MusicConfig, SubspaceConfig, esprit, music};

pub use num_complex::Complex32;
