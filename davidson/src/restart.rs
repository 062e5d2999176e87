//! Restart engine (spec §4.4): compresses the basis to `retain_size`
//! Ritz vectors when it would otherwise exceed `max_basis_size`, with an
//! optional thick-restart "+k" extension that also keeps a handful of Ritz
//! vectors from the *previous* restart that did not make this cut.

use ndarray::{s, Array1, Array2, ArrayView2};
use ndarray_linalg::types::{Lapack, Scalar};

use crate::error::{DavidsonError, Result};
use crate::workspace::Workspace;

/// How many basis columns a restart should keep, given how many are
/// currently live, how many of those are locked-out-already-converged, and
/// the configured floor/ceiling.
pub fn retain_size(basis_size: usize, min_restart_size: usize, max_block_size: usize) -> usize {
    min_restart_size.min(basis_size).max(max_block_size.min(basis_size))
}

/// Compresses `V, W, H, hVecs, hVals` to the leading `retain_size` Ritz
/// pairs, optionally absorbing up to `num_prev` additional columns carried
/// over from the previous restart ("+k", spec §4.1(i)).
///
/// Precondition: `h_vecs_active`/`h_vals_active` hold an up-to-date
/// Rayleigh-Ritz solve of `h_active` (i.e. `prepare_vecs` has already run
/// this outer iteration).
pub fn compress<A>(ws: &mut Workspace<A>, retain_size: usize) -> Result<()>
where
    A: Scalar + Lapack,
{
    let basis_size = ws.basis_size();
    if retain_size > basis_size {
        return Err(DavidsonError::Restart(format!(
            "retain_size ({retain_size}) exceeds current basis_size ({basis_size})"
        )));
    }
    if retain_size == basis_size {
        return Ok(());
    }

    let num_prev = ws.num_prev_retained();
    let total_cols = retain_size + num_prev;

    let v_old = ws.v_active().to_owned();
    let w_old = ws.w_active().to_owned();
    let h_vecs = ws.h_vecs_active().to_owned();
    let h_vals = ws.h_vals_active().to_owned();
    let prev = ws.previous_h_vecs().to_owned();

    let coeffs = combine_coefficients(h_vecs.view(), retain_size, prev.view());

    let v_new = v_old.dot(&coeffs);
    let w_new = w_old.dot(&coeffs);

    // H in the new basis is exact for the retained Ritz directions
    // (diagonal, since they are eigenvectors of the old H) and only needs
    // fresh inner products for the "+k" columns appended alongside them.
    let mut h_new = Array2::<A>::zeros((total_cols, total_cols));
    for i in 0..retain_size {
        h_new[(i, i)] = A::from_real(h_vals[i]);
    }
    if num_prev > 0 {
        crate::projection::extend_h(&mut h_new, v_new.view(), w_new.view(), retain_size, total_cols);
    }

    ws.set_basis_size(total_cols);
    ws.v_active_mut().assign(&v_new);
    ws.w_active_mut().assign(&w_new);
    ws.h_active_mut().assign(&h_new);
    ws.clear_previous_retained();
    Ok(())
}

/// Builds the `basis_size x (retain_size + num_prev)` coefficient matrix
/// used to project the old basis onto the retained Ritz directions plus
/// the carried-over "+k" directions.
fn combine_coefficients<A: Scalar>(
    h_vecs: ArrayView2<A>,
    retain_size: usize,
    prev: ArrayView2<A>,
) -> Array2<A> {
    let basis_size = h_vecs.nrows();
    let num_prev = prev.ncols();
    let mut coeffs = Array2::zeros((basis_size, retain_size + num_prev));
    coeffs
        .slice_mut(s![.., ..retain_size])
        .assign(&h_vecs.slice(s![.., ..retain_size]));
    if num_prev > 0 {
        coeffs.slice_mut(s![.., retain_size..]).assign(&prev);
    }
    coeffs
}

/// Selects which previously-live Ritz vectors should be carried forward as
/// "+k" columns: the `max_prev_retain` highest-indexed columns beyond
/// `retain_size` that were not already selected, in target order.
pub fn select_prev_retained(basis_size: usize, retain_size: usize, max_prev_retain: usize) -> Vec<usize> {
    (retain_size..basis_size).take(max_prev_retain).collect()
}

/// Removes the Ritz directions at `drop` (global indices into the current
/// `hVecs`/`hVals`) from `V`, `W`, `H` (spec §4.4: "any converged Ritz
/// vector in the restart window is removed from V ... the basis shrinks
/// accordingly"). Unlike [`compress`], this does not retain any "+k"
/// columns — it runs right after locking, not at a basis-full restart.
///
/// Precondition, same as `compress`: `hVecs`/`hVals` hold an up-to-date
/// Rayleigh-Ritz solve of `H`. Since the surviving columns are still
/// eigenvectors of the old `H`, the new `H` is exactly `diag(hVals[keep])`
/// with no fresh inner products needed.
pub fn drop_locked_columns<A>(ws: &mut Workspace<A>, drop: &[usize]) -> Result<()>
where
    A: Scalar + Lapack,
{
    let basis_size = ws.basis_size();
    let keep: Vec<usize> = (0..basis_size).filter(|i| !drop.contains(i)).collect();
    if keep.len() == basis_size {
        return Ok(());
    }

    let v_old = ws.v_active().to_owned();
    let w_old = ws.w_active().to_owned();
    let h_vecs = ws.h_vecs_active().to_owned();
    let h_vals = ws.h_vals_active().to_owned();

    let mut coeffs = Array2::<A>::zeros((basis_size, keep.len()));
    for (j, &idx) in keep.iter().enumerate() {
        coeffs.column_mut(j).assign(&h_vecs.column(idx));
    }
    let v_new = v_old.dot(&coeffs);
    let w_new = w_old.dot(&coeffs);
    let mut h_new = Array2::<A>::zeros((keep.len(), keep.len()));
    for (j, &idx) in keep.iter().enumerate() {
        h_new[(j, j)] = A::from_real(h_vals[idx]);
    }

    ws.set_basis_size(keep.len());
    ws.v_active_mut().assign(&v_new);
    ws.w_active_mut().assign(&w_new);
    ws.h_active_mut().assign(&h_new);
    Ok(())
}
