//! Vector and matrix norms not backed by a LAPACK routine
//!
//! `OperationNorm` (opnorm) dispatches to `*lange`; these norms are cheap
//! enough, and needed often enough inside iterative code such as
//! `krylov::mgs`, that computing them directly with `ndarray` is preferable
//! to a LAPACK round-trip.

use ndarray::*;
use num_traits::Zero;

use crate::types::*;

pub trait Norm {
    type Output;

    /// L1 norm: sum of absolute values of elements
    fn norm_l1(&self) -> Self::Output;

    /// L2 norm: square root of the sum of squared absolute values
    fn norm_l2(&self) -> Self::Output;

    /// Maximum norm: largest absolute value among elements
    fn norm_max(&self) -> Self::Output;
}

impl<A, S, D> Norm for ArrayBase<S, D>
where
    A: Scalar,
    S: Data<Elem = A>,
    D: Dimension,
{
    type Output = A::Real;

    fn norm_l1(&self) -> A::Real {
        self.iter().map(|x| x.abs()).sum()
    }

    fn norm_l2(&self) -> A::Real {
        self.iter()
            .map(|x| x.abs_sqr())
            .sum::<A::Real>()
            .sqrt()
    }

    fn norm_max(&self) -> A::Real {
        self.iter()
            .fold(A::Real::zero(), |acc, x| acc.max(x.abs()))
    }
}
