//! Test helpers shared by the workspace test suites.
use nalgebra::storage::Storage;
use nalgebra::{Dim, Matrix, RealField};

/// Poor man's approx assertion for matrices
#[macro_export]
macro_rules! assert_approx_matrix_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        let diff = $x - $y;

        let max_absdiff = diff.abs().max();
        let approx_eq = max_absdiff <= $tol;

        if !approx_eq {
            println!("abstol: {:e}", $tol);
            println!("left: {}", $x);
            println!("right: {}", $y);
            println!("diff: {:e}", diff);
        }
        assert!(approx_eq);
    }};
}

/// Largest asymmetry `|a_ij - a_ji|` relative to the largest absolute entry of the matrix.
///
/// Returns zero for a zero matrix.
pub fn relative_asymmetry<T, R, C, S>(matrix: &Matrix<T, R, C, S>) -> T
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
{
    assert_eq!(matrix.nrows(), matrix.ncols(), "Matrix must be square");
    let n = matrix.nrows();
    let scale = matrix.iter().fold(T::zero(), |acc, x| acc.max(x.abs()));
    if scale == T::zero() {
        return T::zero();
    }

    let mut max_diff = T::zero();
    for i in 0..n {
        for j in 0..n {
            max_diff = max_diff.max((matrix[(i, j)] - matrix[(j, i)]).abs());
        }
    }
    max_diff / scale
}
