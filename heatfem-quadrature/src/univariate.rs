//! Gauss–Legendre rules on the interval `[-1, 1]`.

use crate::{Error, Rule, MAX_GAUSS_POINTS};
use std::f64::consts::PI;

/// Newton iterations per root are capped here; convergence takes a handful of steps.
const MAX_NEWTON_ITERATIONS: usize = 100;

/// Step size below which a Newton iterate is accepted as a root.
const ROOT_TOLERANCE: f64 = 1e-15;

/// Evaluates `P_n(x)` and `P_n'(x)` by Bonnet's three-term recurrence.
///
/// The derivative uses `(x^2 - 1) P_n' = n (x P_n - P_{n-1})`, which is singular at the end
/// points, so `x` must lie strictly inside `(-1, 1)`.
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    // (P_k, P_{k-1}) starting from (P_0, P_{-1}) = (1, 0)
    let (p_n, p_prev) = (1..=n).fold((1.0, 0.0), |(p_k, p_km1), k| {
        let k = k as f64;
        (((2.0 * k - 1.0) * x * p_k - (k - 1.0) * p_km1) / k, p_k)
    });
    let dp_n = n as f64 * (x * p_n - p_prev) / (x * x - 1.0);
    (p_n, dp_n)
}

/// Refines the root of `P_n` near `guess` by Newton's method and returns it together with
/// the derivative `P_n'` at the root.
fn newton_root(n: usize, guess: f64) -> (f64, f64) {
    let mut x = guess;
    let (mut p, mut dp) = legendre_with_derivative(n, x);
    for _ in 0..MAX_NEWTON_ITERATIONS {
        let step = p / dp;
        x -= step;
        (p, dp) = legendre_with_derivative(n, x);
        if step.abs() <= ROOT_TOLERANCE {
            break;
        }
    }
    (x, dp)
}

/// The Gauss–Legendre rule with `num_points` points on `[-1, 1]`.
///
/// The rule integrates polynomials of degree up to `2 * num_points - 1` exactly. Points are
/// returned in ascending order and the rule is exactly symmetric about zero.
///
/// Returns [`Error::UnsupportedOrder`] if `num_points` is zero or exceeds
/// [`MAX_GAUSS_POINTS`].
pub fn try_gauss(num_points: usize) -> Result<Rule<1>, Error> {
    let n = num_points;
    if n == 0 || n > MAX_GAUSS_POINTS {
        return Err(Error::UnsupportedOrder { order: n });
    }

    // Negative half (including the middle point of odd rules), from -1 towards 0. The
    // Chebyshev-like guess cos(π (i + 3/4) / (n + 1/2)) approximates the i-th largest root.
    let half: Vec<(f64, f64)> = (0..(n + 1) / 2)
        .map(|i| {
            let guess = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
            let (root, dp) = newton_root(n, guess);
            let weight = 2.0 / ((1.0 - root * root) * dp * dp);
            (-root, weight)
        })
        .collect();

    let mut points = Vec::with_capacity(n);
    let mut weights = Vec::with_capacity(n);
    for &(x, w) in &half {
        points.push([x]);
        weights.push(w);
    }
    if n % 2 == 1 {
        points[half.len() - 1] = [0.0];
    }
    // Mirror the strictly negative points onto the positive half
    for &(x, w) in half[..n / 2].iter().rev() {
        points.push([-x]);
        weights.push(w);
    }

    debug_assert_eq!(points.len(), n);
    Ok((weights, points))
}

/// Same as [`try_gauss`].
///
/// # Panics
///
/// Panics if the number of points is not supported.
pub fn gauss(num_points: usize) -> Rule<1> {
    try_gauss(num_points).unwrap_or_else(|err| panic!("{err}"))
}
