//! Block Jacobi-Davidson / Generalized Davidson eigensolver for large
//! sparse or matrix-free Hermitian operators.
//!
//! The operator is supplied as a [`MatVec`] closure or trait object — no
//! explicit matrix is ever required — and the solver iteratively builds an
//! orthonormal subspace, extracts Ritz pairs from a small dense projected
//! problem (backed by [`ndarray_linalg::Eigh`]), and refines the working
//! block with either a preconditioned GD+k step or an inner JDQMR Krylov
//! correction, switching between the two automatically when dynamic
//! switching is enabled (see [`config::DynamicSwitchConfig`]).
//!
//! ```no_run
//! use davidson::{DavidsonConfig, solve};
//! use ndarray::{Array2, ArrayView2};
//!
//! let n = 100;
//! let mut matvec = |v: ArrayView2<f64>| -> Array2<f64> {
//!     // Apply the operator to each column of `v`.
//!     v.to_owned()
//! };
//! let config = DavidsonConfig::new(4);
//! let result = solve(n, &mut matvec, None, &mut davidson::operator::SingleProcess, None, &config)
//!     .expect("solve failed");
//! assert!(result.eigenvalues.len() <= 4);
//! ```

pub mod candidates;
pub mod config;
pub mod convergence;
pub mod correction;
pub mod cost_model;
pub mod dense_solver;
pub mod driver;
pub mod error;
pub mod locking;
pub mod operator;
pub mod ortho;
pub mod projection;
pub mod restart;
pub mod stats;
pub mod workspace;

pub use config::{
    CorrectionConfig, CorrectionProjectors, DavidsonConfig, DynamicSwitchConfig, Locking,
    Projection, Target,
};
pub use driver::{solve, DavidsonResult};
pub use error::{DavidsonError, Result};
pub use operator::{GlobalSum, MatVec, NoPreconditioner, Preconditioner, SingleProcess};
pub use stats::Stats;
