//! Scratch-region layout (spec §4.2), as a typed arena + view structs
//! instead of pointer-arithmetic subdivision into one flat buffer (spec §9
//! design note). Each region is an independently owned array sized to its
//! capacity; `basis_size` tracks how many of `max_basis_size` columns are
//! currently live, and the `*_active` accessors hand out views over exactly
//! that many.

use ndarray::{s, Array1, Array2, ArrayView2, ArrayViewMut2};
use ndarray_linalg::types::{Lapack, Scalar};

/// Owns `V`, its `A`-image `W`, the projected matrix `H`, the Ritz
/// coefficient matrix `hVecs`, the thick-restart retention buffer
/// `previousHVecs`, and the per-pair residual norm scratch `blockNorms`.
///
/// Optional auxiliary projections for harmonic/refined extraction (`Q`,
/// `R`, `QtV`, `hU`, `hSVals`) live in [`crate::projection::AuxiliaryProjection`]
/// since they are only allocated when the projection mode needs them.
pub struct Workspace<A: Scalar> {
    n_local: usize,
    max_basis_size: usize,
    basis_size: usize,

    v: Array2<A>,
    w: Array2<A>,
    h: Array2<A>,
    h_vecs: Array2<A>,
    previous_h_vecs: Array2<A>,
    num_prev_retained: usize,
    h_vals: Array1<A::Real>,
    block_norms: Array1<A::Real>,
}

impl<A: Scalar + Lapack> Workspace<A> {
    pub fn new(n_local: usize, max_basis_size: usize, max_block_size: usize) -> Self {
        Workspace {
            n_local,
            max_basis_size,
            basis_size: 0,
            v: Array2::zeros((n_local, max_basis_size)),
            w: Array2::zeros((n_local, max_basis_size)),
            h: Array2::zeros((max_basis_size, max_basis_size)),
            h_vecs: Array2::zeros((max_basis_size, max_basis_size)),
            previous_h_vecs: Array2::zeros((max_basis_size, max_block_size)),
            num_prev_retained: 0,
            h_vals: Array1::zeros(max_basis_size),
            block_norms: Array1::zeros(max_block_size),
        }
    }

    pub fn n_local(&self) -> usize {
        self.n_local
    }

    pub fn max_basis_size(&self) -> usize {
        self.max_basis_size
    }

    pub fn basis_size(&self) -> usize {
        self.basis_size
    }

    /// Sets the number of live columns. Does not touch the underlying data;
    /// callers must have already written (or zeroed, per spec §4.1(e)) the
    /// newly exposed columns.
    pub fn set_basis_size(&mut self, basis_size: usize) {
        assert!(basis_size <= self.max_basis_size);
        self.basis_size = basis_size;
    }

    pub fn v_active(&self) -> ArrayView2<A> {
        self.v.slice(s![.., ..self.basis_size])
    }

    pub fn v_active_mut(&mut self) -> ArrayViewMut2<A> {
        self.v.slice_mut(s![.., ..self.basis_size])
    }

    pub fn w_active(&self) -> ArrayView2<A> {
        self.w.slice(s![.., ..self.basis_size])
    }

    pub fn w_active_mut(&mut self) -> ArrayViewMut2<A> {
        self.w.slice_mut(s![.., ..self.basis_size])
    }

    pub fn h_active(&self) -> ArrayView2<A> {
        self.h.slice(s![..self.basis_size, ..self.basis_size])
    }

    pub fn h_active_mut(&mut self) -> ArrayViewMut2<A> {
        self.h.slice_mut(s![..self.basis_size, ..self.basis_size])
    }

    pub fn h_vecs_active(&self) -> ArrayView2<A> {
        self.h_vecs.slice(s![..self.basis_size, ..self.basis_size])
    }

    pub fn h_vecs_active_mut(&mut self) -> ArrayViewMut2<A> {
        self.h_vecs
            .slice_mut(s![..self.basis_size, ..self.basis_size])
    }

    pub fn h_vals_active(&self) -> ndarray::ArrayView1<A::Real> {
        self.h_vals.slice(s![..self.basis_size])
    }

    pub fn h_vals_active_mut(&mut self) -> ndarray::ArrayViewMut1<A::Real> {
        self.h_vals.slice_mut(s![..self.basis_size])
    }

    pub fn block_norms_mut(&mut self) -> &mut Array1<A::Real> {
        &mut self.block_norms
    }

    /// Snapshots `columns` of the current `hVecs` into `previousHVecs`, for
    /// the "+k" step of thick restart (spec §4.1(i)).
    pub fn retain_previous(&mut self, columns: &[usize]) {
        self.num_prev_retained = columns.len();
        for (j, &col) in columns.iter().enumerate() {
            let src = self.h_vecs.column(col).to_owned();
            self.previous_h_vecs.column_mut(j).assign(&src);
        }
    }

    pub fn num_prev_retained(&self) -> usize {
        self.num_prev_retained
    }

    pub fn previous_h_vecs(&self) -> ArrayView2<A> {
        self.previous_h_vecs
            .slice(s![..self.basis_size, ..self.num_prev_retained])
    }

    pub fn clear_previous_retained(&mut self) {
        self.num_prev_retained = 0;
    }
}
