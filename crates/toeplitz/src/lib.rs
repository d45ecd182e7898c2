//! # parspec-toeplitz
//!
//! Hermitian Toeplitz matrices built from autocorrelation vectors, and an
//! O(N^2) Levinson-Durbin solver for Toeplitz systems.
//!
//! ## Solver Session
//!
//! ```mermaid
//! graph LR
//!     A["hermitian_toeplitz(&r)?"] --> B["T (N x N)"]
//!     B -->|"LevinsonSolver::new(&T)?"| C["LevinsonSolver"]
//!     C -->|".solve(&y)?"| D["x"]
//!     C -->|".solve_many(&Y)?"| E["X"]
//! ```
//!
//! The session stores the backward vector of every order, so solving for
//! additional right-hand sides skips the matrix-only half of the recursion.
//!
//! ## Quick Start
//!
//! ```ignore
//! use parspec_toeplitz::{hermitian_toeplitz, LevinsonSolver};
//!
//! let t = hermitian_toeplitz(&r)?;
//! let solver = LevinsonSolver::new(&t)?;
//! let x = solver.solve(&y)?;
//! let xs = solver.solve_many(&steering)?;
//! ```

mod build;
mod error;
mod levinson;

pub use build::{hermitian_toeplitz, hermitian_toeplitz_batch};
pub use error::ToeplitzError;
pub use levinson::{DEFAULT_TOLERANCE, LevinsonSolver, solve_toeplitz, solve_toeplitz_many};
