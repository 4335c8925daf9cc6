//! Gauss–Legendre quadrature in the scalar type of the assembly.
//!
//! Rules are computed in `f64` by `heatfem-quadrature` and converted to `T` here.
use crate::error::QuadratureError;
use crate::nalgebra::{convert, Point1, Point2};
use crate::Real;
use heatfem_quadrature::{tensor, univariate};
use numeric_literals::replace_float_literals;
use std::convert::Infallible;

pub type QuadraturePair<T, P> = (Vec<T>, Vec<P>);
pub type QuadraturePair1d<T> = QuadraturePair<T, Point1<T>>;
pub type QuadraturePair2d<T> = QuadraturePair<T, Point2<T>>;

/// A quadrature rule consisting of weights and points.
pub trait Quadrature<T: Real, P> {
    fn weights(&self) -> &[T];
    fn points(&self) -> &[P];

    /// Approximates the integral of the given function using this quadrature rule.
    fn integrate(&self, mut f: impl FnMut(&P) -> T) -> T {
        self.weights()
            .iter()
            .zip(self.points())
            .fold(T::zero(), |integral, (&w, p)| integral + w * f(p))
    }

    /// Like [`integrate`](Self::integrate), but stops at the first failing evaluation.
    fn try_integrate<E>(&self, mut f: impl FnMut(&P) -> Result<T, E>) -> Result<T, E> {
        let mut integral = T::zero();
        for (&w, p) in self.weights().iter().zip(self.points()) {
            integral += w * f(p)?;
        }
        Ok(integral)
    }
}

impl<T: Real, P> Quadrature<T, P> for (Vec<T>, Vec<P>) {
    fn weights(&self) -> &[T] {
        &self.0
    }

    fn points(&self) -> &[P] {
        &self.1
    }
}

/// The `num_points` Gauss–Legendre rule on `[-1, 1]`.
pub fn gauss<T: Real>(num_points: usize) -> Result<QuadraturePair1d<T>, QuadratureError> {
    let (weights, points) = univariate::try_gauss(num_points)?;
    let weights = weights.into_iter().map(convert).collect();
    let points = points
        .into_iter()
        .map(|[x]| Point1::new(convert(x)))
        .collect();
    Ok((weights, points))
}

/// The `num_points_per_dim`² tensor-product Gauss rule on `[-1, 1]^2`.
pub fn quadrilateral_gauss<T: Real>(num_points_per_dim: usize) -> Result<QuadraturePair2d<T>, QuadratureError> {
    let (weights, points) = tensor::try_quadrilateral_gauss(num_points_per_dim)?;
    let weights = weights.into_iter().map(convert).collect();
    let points = points
        .into_iter()
        .map(|[x, y]| Point2::new(convert(x), convert(y)))
        .collect();
    Ok((weights, points))
}

/// A tensor-product Gauss rule that can be mapped onto arbitrary rectangles.
///
/// The reference rule is computed once, so the same instance can be used for many integrals.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorGauss2d<T: Real> {
    points_per_dim: usize,
    rule: QuadraturePair2d<T>,
}

impl<T: Real> TensorGauss2d<T> {
    pub fn new(points_per_dim: usize) -> Result<Self, QuadratureError> {
        Ok(Self {
            points_per_dim,
            rule: quadrilateral_gauss(points_per_dim)?,
        })
    }

    pub fn points_per_dim(&self) -> usize {
        self.points_per_dim
    }

    /// The underlying rule on the reference square.
    pub fn reference_rule(&self) -> &QuadraturePair2d<T> {
        &self.rule
    }

    /// Integrates `f(ξ, η)` over the rectangle `[x0, x1] × [y0, y1]`.
    pub fn integrate_over(&self, mut f: impl FnMut(T, T) -> T, x0: T, x1: T, y0: T, y1: T) -> T {
        let result: Result<T, Infallible> = self.try_integrate_over(|xi, eta| Ok(f(xi, eta)), x0, x1, y0, y1);
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Integrates a fallible `f(ξ, η)` over the rectangle `[x0, x1] × [y0, y1]`, returning the
    /// first error encountered.
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn try_integrate_over<E>(
        &self,
        mut f: impl FnMut(T, T) -> Result<T, E>,
        x0: T,
        x1: T,
        y0: T,
        y1: T,
    ) -> Result<T, E> {
        // Affine map from [-1, 1] onto [a, b]: x = (b - a) / 2 * s + (a + b) / 2
        let half_x = (x1 - x0) / 2.0;
        let half_y = (y1 - y0) / 2.0;
        let mid_x = (x0 + x1) / 2.0;
        let mid_y = (y0 + y1) / 2.0;

        let reference_integral = self.rule.try_integrate(|p| {
            let xi = half_x * p.x + mid_x;
            let eta = half_y * p.y + mid_y;
            f(xi, eta)
        })?;
        Ok(reference_integral * half_x * half_y)
    }
}

/// Integrates `f(ξ, η)` over `[x0, x1] × [y0, y1]` with the `n × n` Gauss rule.
///
/// The result is the weighted sum over the mapped points, scaled by
/// `(x1 - x0) * (y1 - y0) / 4`. Fails before evaluating `f` if no rule with `n` points exists.
pub fn integrate_2d<T: Real>(
    f: impl FnMut(T, T) -> T,
    n: usize,
    x0: T,
    x1: T,
    y0: T,
    y1: T,
) -> Result<T, QuadratureError> {
    Ok(TensorGauss2d::new(n)?.integrate_over(f, x0, x1, y0, y1))
}
