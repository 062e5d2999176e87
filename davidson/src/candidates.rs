//! Candidate preparation (spec §4.3) — selects the next block of Ritz
//! pairs, computes residuals, and folds in pairs that just converged.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use ndarray_linalg::types::{Lapack, Scalar};
use ndarray_linalg::Norm;
use num_traits::Float;

use crate::config::Target;
use crate::convergence::{classify, tolerance, ConvergenceEstimates, ConvergenceFlag};

/// The working block: up to `max_block_size` Ritz indices, their current
/// Ritz vectors and residuals.
pub struct Block<A: Scalar> {
    pub iev: Vec<usize>,
    pub x: Array2<A>,
    pub r_block: Array2<A>,
    pub block_norms: Array1<A::Real>,
}

/// One pair recorded as converged this call: index into the *global*
/// target ordering (not into `iev`), its Ritz value, and residual norm.
pub struct ConvergedPair<R> {
    pub target_index: usize,
    pub eigenvalue: R,
    pub resnorm: R,
    /// `true` when the pair only met the relaxed `PRACTICALLY_CONVERGED`
    /// band (spec §4.5); under locking this sets `LockingProblem` since the
    /// pair is accepted into `evecs` anyway.
    pub practically: bool,
}

/// Mutable state carried across calls to [`prepare`] (spec §4.3 inputs:
/// per-pair `flags`, `smallestResNorm`).
pub struct CandidateState<R> {
    pub flags: Vec<ConvergenceFlag>,
    pub smallest_res_norm: R,
}

impl<R: Float> CandidateState<R> {
    pub fn new(basis_size: usize) -> Self {
        CandidateState {
            flags: vec![ConvergenceFlag::Unconverged; basis_size],
            smallest_res_norm: R::infinity(),
        }
    }
}

pub(crate) fn residual<A: Scalar + Lapack>(
    v: ArrayView2<A>,
    w: ArrayView2<A>,
    h_vecs: ArrayView2<A>,
    idx: usize,
    lambda: A::Real,
) -> (Array1<A>, A::Real) {
    let x_col = v.dot(&h_vecs.column(idx));
    let mut r_col = w.dot(&h_vecs.column(idx));
    let shift = A::from_real(lambda);
    for (ri, xi) in r_col.iter_mut().zip(x_col.iter()) {
        *ri = *ri - shift * *xi;
    }
    let norm = r_col.norm_l2();
    (r_col, norm)
}

/// Selects/refreshes the working block, testing convergence for indices
/// already in it and filling newly vacated slots from the leading
/// unconverged Ritz indices in target order.
///
/// Returns the refreshed block and any pairs that converged this call; the
/// caller is responsible for writing those into `evals`/`resNorms`
/// (unlocked) or handing them to the locking engine.
#[allow(clippy::too_many_arguments)]
pub fn prepare<A>(
    v: ArrayView2<A>,
    w: ArrayView2<A>,
    h_vals: ArrayView1<A::Real>,
    h_vecs: ArrayView2<A>,
    target_order: &[usize],
    state: &mut CandidateState<A::Real>,
    estimates: &mut ConvergenceEstimates<A::Real>,
    num_locked: usize,
    num_evals: usize,
    max_block_size: usize,
    eps: A::Real,
    a_norm: Option<A::Real>,
    mach_eps: A::Real,
    target: Target,
    tau: Option<A::Real>,
) -> (Block<A>, Vec<ConvergedPair<A::Real>>)
where
    A: Scalar + Lapack,
{
    let basis_size = h_vals.len();
    if state.flags.len() != basis_size {
        state.flags.resize(basis_size, ConvergenceFlag::Unconverged);
    }

    let tol = tolerance(eps, a_norm, estimates.estimate_largest_sval);

    let mut iev = Vec::with_capacity(max_block_size);
    let mut converged = Vec::new();

    for &global_idx in target_order {
        if global_idx >= basis_size || converged.len() + num_locked >= num_evals {
            continue;
        }
        let lambda = h_vals[global_idx];

        // Interior targets: a pair whose residual band is provably on the
        // wrong side of the shift is left out of this block entirely, since
        // refining it further cannot change which side of `tau` it is on.
        if matches!(target, Target::ClosestLeq | Target::ClosestGeq) {
            if let Some(tau) = tau {
                let band_lo = lambda - state.smallest_res_norm;
                let band_hi = lambda + state.smallest_res_norm;
                let wrong_side = match target {
                    Target::ClosestLeq => band_lo > tau,
                    Target::ClosestGeq => band_hi < tau,
                    _ => false,
                };
                if wrong_side {
                    continue;
                }
            }
        }

        let (_, r_norm) = residual(v, w, h_vecs, global_idx, lambda);
        let flag = classify::<A>(r_norm, lambda, tol, mach_eps, estimates);
        state.flags[global_idx] = flag;

        let is_converged = matches!(
            flag,
            ConvergenceFlag::Converged | ConvergenceFlag::PracticallyConverged
        );

        if is_converged {
            converged.push(ConvergedPair {
                target_index: global_idx,
                eigenvalue: lambda,
                resnorm: r_norm,
                practically: matches!(flag, ConvergenceFlag::PracticallyConverged),
            });
            continue;
        }

        if iev.len() < max_block_size {
            iev.push(global_idx);
        }
        if iev.len() == max_block_size {
            break;
        }
    }

    state.smallest_res_norm = converged
        .iter()
        .map(|p| p.resnorm)
        .fold(state.smallest_res_norm, |acc, r| acc.min(r));

    let mut x = Array2::zeros((v.nrows(), iev.len()));
    let mut r_block = Array2::zeros((v.nrows(), iev.len()));
    let mut block_norms = Array1::zeros(iev.len());
    for (j, &idx) in iev.iter().enumerate() {
        let lambda = h_vals[idx];
        let x_col = v.dot(&h_vecs.column(idx));
        let (r_col, norm) = residual(v, w, h_vecs, idx, lambda);
        block_norms[j] = norm;
        x.column_mut(j).assign(&x_col);
        r_block.column_mut(j).assign(&r_col);
    }

    (
        Block {
            iev,
            x,
            r_block,
            block_norms,
        },
        converged,
    )
}
