//! Zeroing out one triangle of a matrix
//!
//! LAPACK's `*geqrf` leaves arbitrary garbage below (or above) the diagonal
//! of the R factor it overwrites `A` with; callers that want an actual
//! triangular matrix back need to clear it explicitly.

use ndarray::*;
use num_traits::Zero;

use lax::UPLO;

/// Zero out the entries of a square matrix outside the given triangle.
pub trait IntoTriangular {
    fn into_triangular(self, uplo: UPLO) -> Self;
}

impl<A, S> IntoTriangular for ArrayBase<S, Ix2>
where
    A: Copy + Zero,
    S: DataMut<Elem = A>,
{
    fn into_triangular(mut self, uplo: UPLO) -> Self {
        let n = self.nrows();
        let m = self.ncols();
        match uplo {
            UPLO::Upper => {
                for i in 0..n {
                    for j in 0..m.min(i) {
                        self[(i, j)] = A::zero();
                    }
                }
            }
            UPLO::Lower => {
                for i in 0..n {
                    for j in (i + 1)..m {
                        self[(i, j)] = A::zero();
                    }
                }
            }
        }
        self
    }
}
