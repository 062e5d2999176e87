//! Run statistics returned alongside the solution (spec §6).

use ndarray_linalg::types::Scalar;
use num_traits::Float;

/// Counters and running estimates accumulated over a solve.
#[derive(Debug, Clone, Copy)]
pub struct Stats<A: Scalar> {
    pub num_outer_iterations: usize,
    pub num_restarts: usize,
    pub num_matvecs: usize,
    pub estimate_max_eval: A::Real,
    pub estimate_min_eval: A::Real,
    pub estimate_largest_sval: A::Real,
    pub max_conv_tol: A::Real,
    pub estimate_residual_error: A::Real,
}

impl<A: Scalar> Stats<A>
where
    A::Real: Float,
{
    pub fn new() -> Self {
        Stats {
            num_outer_iterations: 0,
            num_restarts: 0,
            num_matvecs: 0,
            estimate_max_eval: A::Real::neg_infinity(),
            estimate_min_eval: A::Real::infinity(),
            estimate_largest_sval: A::Real::zero(),
            max_conv_tol: A::Real::zero(),
            estimate_residual_error: A::Real::zero(),
        }
    }
}

impl<A: Scalar> Default for Stats<A>
where
    A::Real: Float,
{
    fn default() -> Self {
        Self::new()
    }
}
