//! # parspec-covariance
//!
//! Sample autocorrelation and covariance estimation for complex signals.
//!
//! ## Estimation Paths
//!
//! ```mermaid
//! graph LR
//!     A["SampleMatrix::new(data)?"] -->|"validate"| B["SampleMatrix"]
//!     B -->|"fast_autocorrelation(&s)"| C["Vec&lt;Complex32&gt; per channel"]
//!     B -->|"forward_covariance(&s, w, norm)?"| D["W x W covariance"]
//!     B -->|"backward_covariance(&s, w, norm)?"| D
//!     B -->|"snapshot_matrix(&s, w, dir)?"| E["W x (windows * channels)"]
//! ```
//!
//! ## Normalisers
//!
//! | Variant | Divisor |
//! |---------|---------|
//! | [`Normalizer::SignalLength`] | `L` |
//! | [`Normalizer::SignalLengthMinus`]`(m)` | `L - m` |
//!
//! ## Quick Start
//!
//! ```ignore
//! use parspec_covariance::{SampleMatrix, Normalizer, forward_covariance};
//!
//! let samples = SampleMatrix::from_channel(x)?;
//! let r = forward_covariance(&samples, 8, Normalizer::SignalLength)?;
//! ```

mod autocorrelation;
mod error;
mod samples;
mod windowed;

pub use autocorrelation::{fast_autocorrelation, fast_autocorrelation_channel};
pub use error::CovarianceError;
pub use samples::SampleMatrix;
pub use windowed::{
    Normalizer, WindowDirection, backward_covariance, forward_covariance, snapshot_matrix,
    window_count, windowed_covariance,
};
