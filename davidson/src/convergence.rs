//! Convergence test (spec §4.5): classifies a single candidate from its
//! residual norm, Ritz value, tolerance and a machine-precision floor.

use ndarray_linalg::types::Scalar;
use num_traits::Float;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceFlag {
    Unconverged,
    Converged,
    PracticallyConverged,
}

/// Running estimates updated by every convergence test, and consumed by the
/// cost model and the tolerance computation itself (spec §4.5 side
/// effects).
#[derive(Debug, Clone, Copy)]
pub struct ConvergenceEstimates<R> {
    pub estimate_largest_sval: R,
    pub estimate_max_eval: R,
    pub estimate_min_eval: R,
    pub estimate_residual_error: R,
    pub max_conv_tol: R,
}

impl<R: Float> ConvergenceEstimates<R> {
    pub fn new() -> Self {
        ConvergenceEstimates {
            estimate_largest_sval: R::zero(),
            estimate_max_eval: R::neg_infinity(),
            estimate_min_eval: R::infinity(),
            estimate_residual_error: R::zero(),
            max_conv_tol: R::zero(),
        }
    }

    fn observe(&mut self, lambda: R, r: R) {
        self.estimate_largest_sval = self.estimate_largest_sval.max(lambda.abs());
        self.estimate_max_eval = self.estimate_max_eval.max(lambda);
        self.estimate_min_eval = self.estimate_min_eval.min(lambda);
        self.estimate_residual_error = self.estimate_residual_error.max(r);
    }
}

impl<R: Float> Default for ConvergenceEstimates<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// `tol = eps * aNorm` if the caller supplied `aNorm`, else `eps *
/// estimateLargestSVal`.
pub fn tolerance<R: Float>(eps: R, a_norm: Option<R>, estimate_largest_sval: R) -> R {
    eps * a_norm.unwrap_or(estimate_largest_sval)
}

/// Classifies one candidate, updating the running estimates in place.
///
/// - `CONVERGED`: `r <= tol`.
/// - `PRACTICALLY_CONVERGED`: `r <= max(tol, machEps * |lambda|)` but `r >
///   tol`.
/// - `UNCONVERGED` otherwise.
pub fn classify<A: Scalar>(
    r: A::Real,
    lambda: A::Real,
    tol: A::Real,
    mach_eps: A::Real,
    estimates: &mut ConvergenceEstimates<A::Real>,
) -> ConvergenceFlag
where
    A::Real: Float,
{
    estimates.observe(lambda, r);
    if r <= tol {
        estimates.max_conv_tol = estimates.max_conv_tol.max(r);
        ConvergenceFlag::Converged
    } else if r <= tol.max(mach_eps * lambda.abs()) {
        ConvergenceFlag::PracticallyConverged
    } else {
        ConvergenceFlag::Unconverged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converged_when_residual_below_tolerance() {
        let mut est = ConvergenceEstimates::<f64>::new();
        let flag = classify::<f64>(1e-12, 5.0, 1e-10, 1e-16, &mut est);
        assert_eq!(flag, ConvergenceFlag::Converged);
    }

    #[test]
    fn unconverged_when_residual_well_above_tolerance() {
        let mut est = ConvergenceEstimates::<f64>::new();
        let flag = classify::<f64>(1e-3, 5.0, 1e-10, 1e-16, &mut est);
        assert_eq!(flag, ConvergenceFlag::Unconverged);
    }

    #[test]
    fn practically_converged_band() {
        let mut est = ConvergenceEstimates::<f64>::new();
        // tol = 1e-14, machEps*|lambda| = 1e-10*100 = 1e-8: r falls in (tol, 1e-8]
        let flag = classify::<f64>(5e-9, 100.0, 1e-14, 1e-10, &mut est);
        assert_eq!(flag, ConvergenceFlag::PracticallyConverged);
    }
}
