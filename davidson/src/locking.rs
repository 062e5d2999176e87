//! Locking (spec §4.1/§4.3): moves converged Ritz pairs out of the
//! iteration into permanent storage, where they act only as extra
//! orthogonality constraints for everything still being refined.

use ndarray::{Array1, Array2, ArrayView2};
use ndarray_linalg::types::{Lapack, Scalar};

use crate::error::{DavidsonError, Result};

/// Converged eigenpairs accumulated so far, plus the space they occupy for
/// orthogonalization purposes (spec §6 `ortho`'s `locked` argument).
pub struct LockedSet<A: Scalar> {
    n_local: usize,
    max_locked: usize,
    count: usize,
    vecs: Array2<A>,
    vals: Vec<A::Real>,
    resnorms: Vec<A::Real>,
}

impl<A: Scalar + Lapack> LockedSet<A> {
    pub fn new(n_local: usize, max_locked: usize) -> Self {
        LockedSet {
            n_local,
            max_locked,
            count: 0,
            vecs: Array2::zeros((n_local, max_locked)),
            vals: Vec::with_capacity(max_locked),
            resnorms: Vec::with_capacity(max_locked),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn vecs(&self) -> ArrayView2<A> {
        self.vecs.slice(ndarray::s![.., ..self.count])
    }

    pub fn vals(&self) -> &[A::Real] {
        &self.vals
    }

    pub fn resnorms(&self) -> &[A::Real] {
        &self.resnorms
    }

    /// Records a newly-converged Ritz pair `(lambda, V*hVecs[:, idx])` into
    /// permanent storage.
    pub fn lock(
        &mut self,
        v: ArrayView2<A>,
        h_vecs_col: ndarray::ArrayView1<A>,
        lambda: A::Real,
        resnorm: A::Real,
    ) -> Result<()> {
        if self.count == self.max_locked {
            return Err(DavidsonError::Lock(format!(
                "locked-vector storage exhausted at capacity {}",
                self.max_locked
            )));
        }
        let x = v.dot(&h_vecs_col);
        self.vecs.column_mut(self.count).assign(&x);
        self.vals.push(lambda);
        self.resnorms.push(resnorm);
        self.count += 1;
        Ok(())
    }

    /// Final `(eigenvalues, eigenvectors)` pair in ascending-by-lock-order,
    /// for the solver's public result.
    pub fn into_result(self) -> (Array1<A::Real>, Array2<A>) {
        let vals = Array1::from(self.vals);
        let vecs = self.vecs.slice(ndarray::s![.., ..self.count]).to_owned();
        (vals, vecs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn locking_accumulates_pairs_up_to_capacity() {
        let v: Array2<f64> = Array2::eye(3);
        let mut locked = LockedSet::<f64>::new(3, 2);
        let col0 = v.column(0).to_owned();
        let col1 = v.column(1).to_owned();

        locked.lock(v.view(), col0.view(), 1.0, 1e-12).unwrap();
        locked.lock(v.view(), col1.view(), 2.0, 1e-12).unwrap();
        assert_eq!(locked.count(), 2);

        let col2 = array![0.0, 0.0, 1.0];
        assert!(locked.lock(v.view(), col2.view(), 3.0, 1e-12).is_err());
    }
}
