//! Error taxonomy for the outer Davidson-type driver.
//!
//! Mirrors `ndarray_linalg::error::LinalgError`: a `thiserror`-derived enum
//! whose variants carry the underlying collaborator error as `#[source]` so a
//! caller can distinguish "the dense solver rejected the matrix" from "the
//! orthogonalizer could not extend the basis" without string-matching.

use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, DavidsonError>;

/// Fatal and near-fatal failure kinds the outer driver can report.
#[derive(Debug, Error)]
pub enum DavidsonError {
    /// The initial basis could not be constructed: every user-supplied guess
    /// was linearly dependent and the random fallback also failed.
    #[error("failed to build an initial basis: {0}")]
    Init(String),

    /// `ortho` could not produce an orthonormal extension after its
    /// two-pass-then-fail contract was exhausted.
    #[error("orthogonalization failed: {0}")]
    Ortho(String),

    /// The dense projected eigensolver or SVD failed to converge.
    #[error("projected problem solve failed: {0}")]
    SolveH(#[source] ndarray_linalg::error::LinalgError),

    /// The inner correction-equation solver (GD+k or JDQMR) failed.
    #[error("correction solve failed: {0}")]
    Correction(String),

    /// The restart engine could not consistently compress the basis.
    #[error("restart failed: {0}")]
    Restart(String),

    /// Locking a converged pair out of the working basis failed.
    #[error("locking failed: {0}")]
    Lock(String),

    /// Configuration is internally inconsistent (e.g. `minRestartSize >
    /// maxBasisSize`). Not part of the original exit-code taxonomy, but
    /// needed because Rust has no implicit "undefined behavior" escape
    /// hatch for bad sizing.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
