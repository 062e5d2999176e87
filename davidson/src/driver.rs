//! The outer driver (spec §4.1): the state machine that ties candidate
//! preparation, correction, orthogonalization and restart together into a
//! full eigenvalue solve.

use ndarray::{s, Array1, Array2, ArrayView2};
use ndarray_linalg::types::{Lapack, Scalar};
use num_traits::Float;

use crate::candidates::{self, CandidateState};
use crate::config::{DavidsonConfig, Locking, Projection, Target};
use crate::convergence::ConvergenceEstimates;
use crate::cost_model::{CostModel, Method};
use crate::correction;
use crate::dense_solver::dense_heev;
use crate::error::Result;
use crate::locking::LockedSet;
use crate::operator::{GlobalSum, MatVec, NoPreconditioner, Preconditioner};
use crate::ortho::orthogonalize;
use crate::projection;
use crate::restart;
use crate::stats::Stats;
use crate::workspace::Workspace;

/// Final output of [`solve`]: the converged pairs, their residual norms,
/// whether every requested pair actually converged, and run statistics.
pub struct DavidsonResult<A: Scalar> {
    pub eigenvalues: Array1<A::Real>,
    pub eigenvectors: Array2<A>,
    pub resnorms: Array1<A::Real>,
    pub converged: bool,
    /// Set when the basis grew to span the entire orthogonal complement
    /// (`basisSize >= n - numOrthoConst - numLocked`) before `numEvals`
    /// pairs converged — spec §4.1's `wholeSpace` exit (B3).
    pub whole_space: bool,
    /// Set when locking accepted a `PRACTICALLY_CONVERGED` pair into
    /// `evecs` rather than failing the solve (spec §4.5/§7).
    pub locking_problem: bool,
    pub stats: Stats<A>,
}

/// Orders the current Ritz values by the configured target, returning
/// global indices into `h_vals` best-match first.
fn target_order<R: Float>(h_vals: &[R], target: Target, shifts: &[R]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..h_vals.len()).collect();
    match target {
        Target::Smallest => idx.sort_by(|&a, &b| h_vals[a].partial_cmp(&h_vals[b]).unwrap()),
        Target::Largest => idx.sort_by(|&a, &b| h_vals[b].partial_cmp(&h_vals[a]).unwrap()),
        Target::ClosestAbs | Target::ClosestLeq | Target::ClosestGeq | Target::Interior => {
            // "Closest" targets are always relative to the selected shift
            // tau (spec glossary: "Shift tau: a scalar used ... to target
            // interior eigenvalues"), not to zero.
            let tau = shifts.first().copied().unwrap_or(R::zero());
            idx.sort_by(|&a, &b| {
                (h_vals[a] - tau)
                    .abs()
                    .partial_cmp(&(h_vals[b] - tau).abs())
                    .unwrap()
            });
        }
    }
    idx
}

/// Counts how many of the leading `num_evals` target-ordered indices are
/// already flagged CONVERGED/PRACTICALLY_CONVERGED (spec I5, no-locking
/// case: `numConverged = numLocked + #soft-converged flags`, with
/// `numLocked = 0`).
fn count_soft_converged<R>(
    state: &CandidateState<R>,
    order: &[usize],
    num_evals: usize,
) -> usize
where
    R: Float,
{
    order
        .iter()
        .take(num_evals)
        .filter(|&&idx| {
            matches!(
                state.flags.get(idx),
                Some(crate::convergence::ConvergenceFlag::Converged)
                    | Some(crate::convergence::ConvergenceFlag::PracticallyConverged)
            )
        })
        .count()
}

/// Shift used by the cost-model-independent part of the driver to decide
/// interior-target side exclusion and (when the extraction mode needs it)
/// the harmonic/refined auxiliary projection.
fn current_shift<R: Float>(target: Target, shifts: &[R]) -> Option<R> {
    match target {
        Target::ClosestLeq | Target::ClosestGeq | Target::Interior => {
            Some(shifts.first().copied().unwrap_or(R::zero()))
        }
        _ => None,
    }
}

/// The shift `tau` used to build the harmonic/refined auxiliary projection
/// (spec I6), independent of whether the *target* selector itself is
/// interior: a harmonic or refined run targeting `ClosestAbs` still needs a
/// `tau` to build `(A - tau I) V`, defaulting to the first configured
/// target shift (or zero when none was supplied).
fn projection_tau<R: Float>(shifts: &[R]) -> R {
    shifts.first().copied().unwrap_or(R::zero())
}

/// Runs the block Davidson-type solve for a Hermitian operator of local
/// dimension `n`, applied through `matvec`, seeking `config.num_evals`
/// pairs. `initial` supplies up to `config.max_block_size` starting
/// vectors; any missing columns are filled with pseudo-random directions
/// seeded by `config.iseed`.
pub fn solve<A>(
    n: usize,
    matvec: &mut dyn MatVec<A>,
    precond: Option<&mut dyn Preconditioner<A>>,
    global_sum: &mut dyn GlobalSum<A::Real>,
    initial: Option<ArrayView2<A>>,
    config: &DavidsonConfig<A::Real>,
) -> Result<DavidsonResult<A>>
where
    A: Scalar + Lapack,
    A::Real: Float,
{
    config.validate()?;

    // R1: nothing was asked for, so nothing is done — not even the initial
    // block's matvec.
    if config.num_evals == 0 {
        return Ok(DavidsonResult {
            eigenvalues: Array1::zeros(0),
            eigenvectors: Array2::zeros((n, 0)),
            resnorms: Array1::zeros(0),
            converged: true,
            whole_space: false,
            locking_problem: false,
            stats: Stats::<A>::new(),
        });
    }

    // Special case (spec §4.8): a 1-dimensional operator has exactly one
    // eigenpair, the unit vector itself; one matvec settles it with no
    // iteration at all.
    if n == 1 && config.num_evals > 0 {
        let one = Array2::<A>::from_elem((1, 1), A::one());
        let av = matvec.apply(one.view());
        let mut stats = Stats::<A>::new();
        stats.num_matvecs = 1;
        stats.num_outer_iterations = 1;
        let lambda = av[(0, 0)].re();
        return Ok(DavidsonResult {
            eigenvalues: Array1::from(vec![lambda]),
            eigenvectors: one,
            resnorms: Array1::from(vec![A::Real::zero()]),
            converged: true,
            whole_space: true,
            locking_problem: false,
            stats,
        });
    }

    // Special case (spec §4.8): with only two orthogonal directions
    // available, thick restart's "+k" columns have nowhere to go and a
    // restart window smaller than the full space is pointless.
    let (min_restart_size, max_prev_retain) = if n == 2 {
        (2usize, 0usize)
    } else {
        (config.min_restart_size, config.max_prev_retain)
    };

    let mut seed = config.iseed;
    let mut stats = Stats::<A>::new();
    let mut estimates = ConvergenceEstimates::<A::Real>::new();
    let mut cost_model = CostModel::<A::Real>::new(config.dynamic_switch);
    let mut fallback_precond = NoPreconditioner;
    let precond: &mut dyn Preconditioner<A> = match precond {
        Some(p) => p,
        None => &mut fallback_precond,
    };
    let mut locking_problem = false;
    let mut whole_space = false;

    let mut ws = Workspace::<A>::new(n, config.max_basis_size, config.max_block_size);
    let mut locked = LockedSet::<A>::new(n, config.num_evals);

    let block_size = config.max_block_size.min(config.max_basis_size);
    let mut seed_block = Array2::<A>::zeros((n, block_size));
    if let Some(initial) = initial {
        let k = initial.ncols().min(block_size);
        seed_block.slice_mut(s![.., ..k]).assign(&initial.slice(s![.., ..k]));
    }
    let empty = Array2::<A>::zeros((n, 0));
    let v0 = orthogonalize(seed_block.view(), empty.view(), empty.view(), config.eps, &mut seed)?;

    ws.set_basis_size(block_size);
    ws.v_active_mut().assign(&v0);
    let w0 = matvec.apply(v0.view());
    stats.num_matvecs += block_size;
    ws.w_active_mut().assign(&w0);
    let h0 = projection::rebuild_h(ws.v_active(), ws.w_active());
    ws.h_active_mut().assign(&h0);

    let mut candidate_state = CandidateState::<A::Real>::new(block_size);

    let mut converged_all = false;
    while stats.num_outer_iterations < config.max_outer_iterations
        && stats.num_matvecs < config.max_matvecs
    {
        let (h_vals, h_vecs) = match config.projection {
            Projection::RayleighRitz => dense_heev(&ws.h_active().to_owned())?,
            Projection::Harmonic | Projection::Refined => projection::extract_harmonic_refined(
                ws.v_active(),
                ws.w_active(),
                ws.h_active(),
                projection_tau(&config.target_shifts),
            )?,
        };
        ws.h_vals_active_mut().assign(&h_vals);
        ws.h_vecs_active_mut().assign(&h_vecs);

        log::trace!(
            "outer iteration {}: basis_size={} matvecs={}",
            stats.num_outer_iterations,
            ws.basis_size(),
            stats.num_matvecs
        );

        let order = target_order(h_vals.as_slice().unwrap(), config.target, &config.target_shifts);
        let tau = current_shift(config.target, &config.target_shifts);

        let (block, converged) = candidates::prepare::<A>(
            ws.v_active(),
            ws.w_active(),
            ws.h_vals_active(),
            ws.h_vecs_active(),
            &order,
            &mut candidate_state,
            &mut estimates,
            locked.count(),
            config.num_evals,
            config.max_block_size,
            config.eps,
            config.a_norm,
            A::Real::epsilon(),
            config.target,
            tau,
        );

        // Captured before any locking-driven basis compression below, since
        // `block.iev` indexes into *this* iteration's `hVals` — once the
        // basis shrinks those indices no longer line up with it.
        let block_lambdas: Vec<A::Real> = block.iev.iter().map(|&idx| h_vals[idx]).collect();

        let mut locked_idx = Vec::with_capacity(converged.len());
        for pair in &converged {
            if matches!(config.locking, Locking::On) {
                locked.lock(
                    ws.v_active(),
                    ws.h_vecs_active().column(pair.target_index),
                    pair.eigenvalue,
                    pair.resnorm,
                )?;
                log::debug!(
                    "locked eigenpair lambda={:?} resnorm={:?} (locked {} of {})",
                    pair.eigenvalue,
                    pair.resnorm,
                    locked.count(),
                    config.num_evals
                );
                if pair.practically {
                    locking_problem = true;
                    log::debug!("pair accepted under locking was only practically converged");
                }
                locked_idx.push(pair.target_index);
            }
            // Without locking, a converged pair is only soft-marked (spec
            // glossary: "soft locking"): its flag in `candidate_state`
            // already records CONVERGED/PRACTICALLY_CONVERGED and it stays
            // in `V`, so no further action is needed here — `num_converged`
            // below recounts flags every pass.
            cost_model.on_converged();
        }

        if matches!(config.locking, Locking::On) && !locked_idx.is_empty() {
            // spec §4.4: "any converged Ritz vector in the restart window
            // is removed from V ... written to evecs ... the basis shrinks
            // accordingly" — done here, right after locking, rather than
            // only at the next basis-full restart, so a locked direction
            // can never reappear and be reported (and locked) a second
            // time in a later outer iteration.
            locked_idx.sort_unstable();
            locked_idx.dedup();
            restart::drop_locked_columns(&mut ws, &locked_idx)?;
            // Ritz indices are renumbered by the drop; stale flags would
            // misclassify the new indexing, so start the next pass fresh
            // (same discipline as the outer verification loop's flag
            // reset).
            candidate_state = CandidateState::<A::Real>::new(ws.basis_size());
            log::debug!(
                "dropped {} locked column(s) from the basis; basis_size now {}",
                locked_idx.len(),
                ws.basis_size()
            );
        }

        let num_converged = match config.locking {
            Locking::On => locked.count(),
            Locking::Off => count_soft_converged(&candidate_state, &order, config.num_evals),
        };
        if num_converged >= config.num_evals {
            converged_all = true;
            break;
        }

        // wholeSpace (spec §4.1 restart loop exit, B3): the basis has
        // already spanned the entire orthogonal complement of the locked
        // and user-fixed directions, so no further growth can find new
        // candidates; stop and report whatever converged.
        if ws.basis_size() >= n.saturating_sub(config.num_ortho_const + locked.count()) {
            whole_space = true;
            converged_all = num_converged >= config.num_evals;
            break;
        }

        stats.num_outer_iterations += 1;
        let mut buf = vec![A::Real::zero(); 1];
        global_sum.sum(&mut buf);

        if block.iev.is_empty() {
            match grow_with_random(&mut ws, &mut seed, matvec, &locked, config.eps, &mut stats) {
                Ok(()) => continue,
                // The reachable subspace (dimension `n`) is already fully
                // spanned by `V` and the locked vectors: no further growth
                // is possible. Return what has converged so far rather than
                // failing (spec's "wholeSpace" case).
                Err(_) => {
                    whole_space = true;
                    break;
                }
            }
        }

        let new_cols = match cost_model.method() {
            Method::GdPlusK => correction::gd_plus_k_step(
                block.r_block.view(),
                precond,
                block.x.view(),
                locked.vecs(),
                config.correction.projectors,
            ),
            Method::Jdqmr => {
                // `block_lambdas` was captured before this iteration's
                // locking pass may have shrunk and renumbered the basis;
                // `ws.h_vals_active()` no longer lines up with `block.iev`
                // once that has happened.
                let lambdas = block_lambdas.clone();
                let max_inner = if config.correction.max_inner_iterations > 0 {
                    config.correction.max_inner_iterations as u32
                } else {
                    5
                };
                correction::jdqmr_step(
                    block.r_block.view(),
                    &lambdas,
                    matvec,
                    precond,
                    block.x.view(),
                    locked.vecs(),
                    config.correction.projectors,
                    max_inner,
                    A::Real::from(0.1).unwrap(),
                )
            }
        };

        let avg_norm = block.block_norms.iter().copied().fold(A::Real::zero(), |a, b| a.max(b));
        let method_before = cost_model.method();
        cost_model.observe_step(
            A::Real::from(block.iev.len() as f64).unwrap(),
            A::Real::from(0.5).unwrap().min(avg_norm.max(A::Real::from(1e-300).unwrap())),
        );
        cost_model.update();
        if cost_model.method() != method_before {
            log::debug!(
                "dynamic method switch: {:?} -> {:?} at outer iteration {}",
                method_before,
                cost_model.method(),
                stats.num_outer_iterations
            );
        }

        let ortho_cols = match orthogonalize(
            new_cols.view(),
            ws.v_active(),
            locked.vecs(),
            config.eps,
            &mut seed,
        ) {
            Ok(cols) => cols,
            Err(_) => break,
        };

        if ws.basis_size() + ortho_cols.ncols() > ws.max_basis_size() {
            let old_basis_size = ws.basis_size();
            let retain = restart::retain_size(old_basis_size, min_restart_size, config.max_block_size);
            let prev_idx = restart::select_prev_retained(old_basis_size, retain, max_prev_retain);
            ws.retain_previous(&prev_idx);
            restart::compress(&mut ws, retain)?;
            stats.num_restarts += 1;
            log::debug!(
                "restart #{}: basis_size {} -> {} ({} previous columns retained)",
                stats.num_restarts,
                old_basis_size,
                ws.basis_size(),
                prev_idx.len()
            );
        }

        append_columns(&mut ws, ortho_cols.view(), matvec, &mut stats)?;
    }

    if !converged_all
        && !whole_space
        && (stats.num_outer_iterations >= config.max_outer_iterations
            || stats.num_matvecs >= config.max_matvecs)
    {
        log::debug!(
            "budget exhausted after {} outer iterations and {} matvecs; returning best effort",
            stats.num_outer_iterations,
            stats.num_matvecs
        );
    }

    stats.estimate_max_eval = estimates.estimate_max_eval;
    stats.estimate_min_eval = estimates.estimate_min_eval;
    stats.estimate_largest_sval = estimates.estimate_largest_sval;
    stats.max_conv_tol = estimates.max_conv_tol;
    stats.estimate_residual_error = estimates.estimate_residual_error;

    let (eigenvalues, eigenvectors, resnorms) = match config.locking {
        Locking::On => {
            let resnorms = Array1::from(locked.resnorms().to_vec());
            let (eigenvalues, eigenvectors) = locked.into_result();
            (eigenvalues, eigenvectors, resnorms)
        }
        // No locking (spec §4.1 final step): copy the leading `numEvals`
        // hVals/V columns in target order directly, rather than draining a
        // separate locked store — converged pairs were never removed from
        // the working basis.
        Locking::Off => {
            let (h_vals, h_vecs) = match config.projection {
                Projection::RayleighRitz => dense_heev(&ws.h_active().to_owned())?,
                Projection::Harmonic | Projection::Refined => projection::extract_harmonic_refined(
                    ws.v_active(),
                    ws.w_active(),
                    ws.h_active(),
                    projection_tau(&config.target_shifts),
                )?,
            };
            let order = target_order(h_vals.as_slice().unwrap(), config.target, &config.target_shifts);
            let take = config.num_evals.min(order.len());
            let mut eigenvalues = Array1::zeros(take);
            let mut eigenvectors = Array2::zeros((ws.n_local(), take));
            let mut resnorms = Array1::zeros(take);
            for (j, &idx) in order.iter().take(take).enumerate() {
                eigenvalues[j] = h_vals[idx];
                let x_col = ws.v_active().dot(&h_vecs.column(idx));
                eigenvectors.column_mut(j).assign(&x_col);
                let (_, r_norm) =
                    candidates::residual::<A>(ws.v_active(), ws.w_active(), h_vecs.view(), idx, h_vals[idx]);
                resnorms[j] = r_norm;
            }
            (eigenvalues, eigenvectors, resnorms)
        }
    };

    Ok(DavidsonResult {
        eigenvalues,
        eigenvectors,
        resnorms,
        converged: converged_all,
        whole_space,
        locking_problem,
        stats,
    })
}

/// Appends `new_cols` to the live basis: assigns `V`, computes their
/// `A`-image, and extends `H` for the new block.
fn append_columns<A>(
    ws: &mut Workspace<A>,
    new_cols: ArrayView2<A>,
    matvec: &mut dyn MatVec<A>,
    stats: &mut Stats<A>,
) -> Result<()>
where
    A: Scalar + Lapack,
{
    let old_size = ws.basis_size();
    let new_size = old_size + new_cols.ncols();
    let w_new = matvec.apply(new_cols);
    stats.num_matvecs += new_cols.ncols();

    ws.set_basis_size(new_size);
    ws.v_active_mut().slice_mut(s![.., old_size..new_size]).assign(&new_cols);
    ws.w_active_mut().slice_mut(s![.., old_size..new_size]).assign(&w_new);

    let v_snapshot = ws.v_active().to_owned();
    let w_snapshot = ws.w_active().to_owned();
    let mut h_full = ndarray::Array2::zeros((new_size, new_size));
    h_full.slice_mut(s![..old_size, ..old_size]).assign(&ws.h_active().slice(s![..old_size, ..old_size]));
    projection::extend_h(&mut h_full, v_snapshot.view(), w_snapshot.view(), old_size, new_size);
    ws.h_active_mut().assign(&h_full);
    Ok(())
}

/// Fills in `max_block_size` fresh random directions when the candidate
/// block came back empty (every remaining Ritz pair already converged but
/// not enough pairs have locked yet to stop).
fn grow_with_random<A>(
    ws: &mut Workspace<A>,
    seed: &mut [u32; 4],
    matvec: &mut dyn MatVec<A>,
    locked: &LockedSet<A>,
    tol: A::Real,
    stats: &mut Stats<A>,
) -> Result<()>
where
    A: Scalar + Lapack,
{
    let block_size = ws.block_norms_mut().len();
    let zeros = Array2::<A>::zeros((ws.n_local(), block_size));
    let cols = orthogonalize(zeros.view(), ws.v_active(), locked.vecs(), tol, seed)?;

    if ws.basis_size() + cols.ncols() > ws.max_basis_size() {
        let retain = restart::retain_size(ws.basis_size(), ws.basis_size() / 2, block_size);
        let prev_idx = restart::select_prev_retained(ws.basis_size(), retain, 0);
        ws.retain_previous(&prev_idx);
        restart::compress(ws, retain)?;
    }
    append_columns(ws, cols.view(), matvec, stats)
}
