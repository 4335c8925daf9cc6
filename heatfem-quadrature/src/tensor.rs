//! Tensor-product Gauss rules on the reference square.

use crate::univariate::try_gauss;
use crate::{Error, Rule};

/// The `n × n` Gauss rule on `[-1, 1]^2`.
///
/// Point `(i, j)` pairs the `i`-th and `j`-th 1D abscissa and is stored at index `i * n + j`,
/// so the first coordinate varies slowest. Its weight is the product of the 1D weights.
pub fn try_quadrilateral_gauss(num_points_per_dim: usize) -> Result<Rule<2>, Error> {
    let (weights, points) = try_gauss(num_points_per_dim)?;
    let pairs = || weights.iter().copied().zip(points.iter().map(|&[x]| x));

    Ok(pairs()
        .flat_map(|(wx, x)| pairs().map(move |(wy, y)| (wx * wy, [x, y])))
        .unzip())
}

/// Same as [`try_quadrilateral_gauss`].
///
/// # Panics
///
/// Panics if the number of points is not supported.
pub fn quadrilateral_gauss(num_points_per_dim: usize) -> Rule<2> {
    try_quadrilateral_gauss(num_points_per_dim).unwrap_or_else(|err| panic!("{err}"))
}
