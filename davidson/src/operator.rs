//! Narrow interfaces to the external collaborators named in spec §6:
//! matvec, preconditioner and the single distributed-coordination
//! primitive, `globalSum`.
//!
//! These are traits rather than function-pointer-plus-void-context structs
//! (design note in spec §9): the type system already provides closure
//! capture, so a plain closure or a small struct implementing the trait is
//! enough.

use ndarray::{Array2, ArrayView2};
use ndarray_linalg::types::Scalar;

/// Applies the linear operator `A` to a block of columns.
///
/// Implementations must be linear and, in a distributed run, must compute
/// the same result on every process for the same input.
pub trait MatVec<A: Scalar> {
    fn apply(&mut self, v: ArrayView2<A>) -> Array2<A>;
}

impl<A: Scalar, F: FnMut(ArrayView2<A>) -> Array2<A>> MatVec<A> for F {
    fn apply(&mut self, v: ArrayView2<A>) -> Array2<A> {
        (self)(v)
    }
}

/// An optional linear approximation to `(A - sigma*I)^-1`.
pub trait Preconditioner<A: Scalar> {
    fn apply(&mut self, v: ArrayView2<A>) -> Array2<A>;
}

impl<A: Scalar, F: FnMut(ArrayView2<A>) -> Array2<A>> Preconditioner<A> for F {
    fn apply(&mut self, v: ArrayView2<A>) -> Array2<A> {
        (self)(v)
    }
}

/// Identity preconditioner: `apply(v) = v`. The default when no
/// preconditioner is supplied.
pub struct NoPreconditioner;

impl<A: Scalar> Preconditioner<A> for NoPreconditioner {
    fn apply(&mut self, v: ArrayView2<A>) -> Array2<A> {
        v.to_owned()
    }
}

/// The single distributed-coordination primitive (spec §5): an elementwise
/// sum across processes of a real-valued buffer. The reference batches
/// every reduction needed in one outer step into a single call; callers in
/// this crate follow the same discipline (see `driver.rs`).
pub trait GlobalSum<R> {
    fn sum(&mut self, buf: &mut [R]);
}

/// Single-process default: `globalSum` is the identity, since there is only
/// one rank to sum over.
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleProcess;

impl<R> GlobalSum<R> for SingleProcess {
    fn sum(&mut self, _buf: &mut [R]) {}
}
