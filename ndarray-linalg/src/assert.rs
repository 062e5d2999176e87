//! Assertions for numerical linear algebra

/// Assert two numbers are close, based on the maximum norm
#[macro_export]
macro_rules! assert_aclose {
    ($test:expr, $truth:expr, $tol:expr) => {
        match (&($test), &($truth), &($tol)) {
            (test_val, truth_val, tol_val) => {
                let abs_diff = (*test_val - *truth_val).abs();
                if abs_diff > *tol_val {
                    panic!(
                        "assertion failed: `(left ~= right)`\n  left: `{:?}`\n right: `{:?}`\n  tol: `{:?}`\n  diff: `{:?}`",
                        test_val, truth_val, tol_val, abs_diff
                    );
                }
            }
        }
    };
}

/// Assert two arrays are close in L2 norm
#[macro_export]
macro_rules! assert_close_l2 {
    ($test:expr, $truth:expr, $rtol:expr) => {
        match (&($test), &($truth), &($rtol)) {
            (test_val, truth_val, rtol_val) => {
                let tol = *rtol_val * $crate::Norm::norm_l2(truth_val);
                let diff = $crate::Norm::norm_l2(&(test_val - truth_val));
                if diff > tol {
                    panic!(
                        "assertion failed: `(left ~= right)`\n  left: `{:?}`\n right: `{:?}`\n  rtol: `{:?}`\n  diff: `{:?}`",
                        test_val, truth_val, rtol_val, diff
                    );
                }
            }
        }
    };
}
