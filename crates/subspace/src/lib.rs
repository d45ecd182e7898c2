//! # parspec-subspace
//!
//! Splits a covariance matrix into orthogonal signal and noise subspaces.
//!
//! ```mermaid
//! graph LR
//!     A["covariance (M x M)"] -->|"decompose(&cov, k)?"| B["SubspaceSplit"]
//!     B --> C[".signal(): k dominant directions"]
//!     B --> D[".noise(): M - k remaining directions"]
//!     B --> E[".values(): descending"]
//! ```
//!
//! The SVD path accepts any square matrix; the Hermitian eigen path is
//! cheaper but requires a Hermitian input. Either way the bases are ordered
//! explicitly by descending value.

mod error;
mod split;

pub use error::SubspaceError;
pub use split::{Decomposition, SubspaceSplit, decompose, decompose_with};
