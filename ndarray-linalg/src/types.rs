//! Basic types and their methods for linear algebra

pub use cauchy::Scalar;
pub use lax::Lapack;

pub use num_complex::Complex32 as c32;
pub use num_complex::Complex64 as c64;
