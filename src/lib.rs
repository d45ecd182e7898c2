//! # parspec
//!
//! Super-resolution parametric spectral estimation for a few complex
//! sinusoids in noise: MUSIC, ESPRIT, Capon, APES and IAA.
//!
//! ## Workspace
//!
//! ```mermaid
//! graph TD
//!     P["parspec (config, dispatch, logging)"] --> E["parspec-estimate"]
//!     E --> C["parspec-covariance"]
//!     E --> S["parspec-subspace"]
//!     E --> T["parspec-toeplitz"]
//! ```
//!
//! | Crate | Concern |
//! |-------|---------|
//! | [`covariance`] | sample validation, autocorrelation, windowed covariance |
//! | [`toeplitz`] | Hermitian Toeplitz construction, Levinson solver |
//! | [`subspace`] | signal/noise subspace split |
//! | [`estimate`] | the five estimators, grids, peak picking |
//!
//! ## Quick Start
//!
//! ```ignore
//! use parspec::{EstimationConfig, SampleMatrix, run};
//!
//! let config = EstimationConfig::from_toml_str(r#"
//!     method = "music"
//!     num_sources = 2
//!     [grid]
//!     points = 1024
//! "#)?;
//! let samples = SampleMatrix::from_channel(x)?;
//! let spectrum = run(&config, &samples)?;
//! ```

pub mod config;
pub mod convert;
pub mod logging;

mod error;
mod dispatch;

pub use config::EstimationConfig;
pub use convert::Method;
pub use error::ParspecError;
pub use dispatch::{Estimate, run};

pub use parspec_covariance as covariance;
pub use parspec_estimate as estimate;
pub use parspec_subspace as subspace;
pub use parspec_toeplitz as toeplitz;

pub use parspec_covariance::SampleMatrix;
pub use parspec_estimate::{Complex32, FrequencyGrid, Peak, find_peaks};
