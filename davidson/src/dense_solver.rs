//! Adapters onto the dense collaborator named in spec §6:
//! `dense_heev`/`dense_hegv`/`dense_gesvd`. These wrap `ndarray_linalg`'s
//! `Eigh`/`SVD` traits (in turn backed by `lax`'s `dsyev`/`zheev`,
//! `dgesvd`/`zgesvd`) rather than calling LAPACK directly; if either
//! returns failure the driver exits with `SolveH`.

use ndarray::{Array1, Array2};
use ndarray_linalg::{Eigh, Lapack, Scalar, SVD, UPLO};

use crate::error::{DavidsonError, Result};

/// `dense_heev`: eigendecomposition of a dense Hermitian matrix, sorted
/// ascending by `ndarray_linalg::Eigh`'s own LAPACK contract (spec §3's
/// Ritz data is sorted downstream by the target selector, not here).
pub fn dense_heev<A>(h: &Array2<A>) -> Result<(Array1<A::Real>, Array2<A>)>
where
    A: Scalar + Lapack,
{
    h.eigh(UPLO::Upper).map_err(DavidsonError::SolveH)
}

/// `dense_gesvd`: singular value decomposition of `R` from the harmonic/
/// refined QR, used to pick `hU`/`hSVals`.
pub fn dense_gesvd<A>(r: &Array2<A>) -> Result<(Array2<A>, Array1<A::Real>, Array2<A>)>
where
    A: Scalar + Lapack,
{
    let (u, s, vt) = r.svd(true, true).map_err(DavidsonError::SolveH)?;
    Ok((
        u.expect("requested U"),
        s,
        vt.expect("requested V^T"),
    ))
}
