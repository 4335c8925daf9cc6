//! Gauss–Legendre quadrature rules for the reference interval `[-1, 1]` and the reference
//! square `[-1, 1]^2`.
//!
//! The rules are computed on demand in `f64` and may be used completely independently of
//! `heatfem`. Conversion to other scalar types happens in `heatfem::quadrature`.

use std::fmt;
use std::fmt::{Display, Formatter};

pub mod tensor;
pub mod univariate;

/// The largest number of points per dimension for which rules are computed.
pub const MAX_GAUSS_POINTS: usize = 64;

/// Library-wide error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Indicates that no rule with the requested number of points is available.
    UnsupportedOrder { order: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedOrder { order } => {
                write!(
                    f,
                    "No Gauss quadrature rule with {order} points is available (supported: 1..={MAX_GAUSS_POINTS})"
                )
            }
        }
    }
}

impl std::error::Error for Error {}

/// A D-dimensional point.
pub type Point<const D: usize> = [f64; D];

/// A D-dimensional rule, stored as `(weights, points)`.
pub type Rule<const D: usize> = (Vec<f64>, Vec<Point<D>>);

/// A one-dimensional quadrature rule.
pub type Rule1d = Rule<1>;

/// A two-dimensional quadrature rule.
pub type Rule2d = Rule<2>;

/// Approximates the integral of `f` with the given rule.
pub fn integrate<const D: usize>(rule: &Rule<D>, f: impl Fn(&Point<D>) -> f64) -> f64 {
    let (weights, points) = rule;
    weights
        .iter()
        .zip(points)
        .map(|(w, p)| w * f(p))
        .sum()
}
