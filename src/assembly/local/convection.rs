use crate::element::{Quad4Element, QUAD4_EDGES};
use crate::error::AssemblyError;
use crate::nalgebra::{distance, Matrix2, Matrix4, Point2, Vector2, Vector4};
use crate::quadrature::{gauss, Quadrature, QuadraturePair1d};
use crate::Real;
use numeric_literals::replace_float_literals;

/// Linear shape functions of an edge at the reference coordinate `ξ ∈ [-1, 1]`.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
fn edge_shape_functions<T: Real>(xi: T) -> Vector2<T> {
    Vector2::new(0.5 * (1.0 - xi), 0.5 * (1.0 + xi))
}

/// Convective contribution `α ∫ N Nᵀ ds` of the edge from `a` to `b`.
///
/// The edge differential is the constant half-length `|b - a| / 2`.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn edge_convection_matrix<T: Real>(
    a: &Point2<T>,
    b: &Point2<T>,
    convection_coefficient: T,
    rule: &QuadraturePair1d<T>,
) -> Matrix2<T> {
    let det_j = 0.5 * distance(a, b);
    let mut matrix = Matrix2::zeros();
    for (&w, xi) in rule.weights().iter().zip(rule.points()) {
        let n = edge_shape_functions(xi.x);
        matrix += n * n.transpose() * (convection_coefficient * w * det_j);
    }
    matrix
}

/// Load contribution `α T_∞ ∫ N ds` of the edge from `a` to `b`.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn edge_load_vector<T: Real>(
    a: &Point2<T>,
    b: &Point2<T>,
    convection_coefficient: T,
    ambient_temperature: T,
    rule: &QuadraturePair1d<T>,
) -> Vector2<T> {
    let det_j = 0.5 * distance(a, b);
    let mut load = Vector2::zeros();
    for (&w, xi) in rule.weights().iter().zip(rule.points()) {
        load += edge_shape_functions(xi.x) * (convection_coefficient * ambient_temperature * w * det_j);
    }
    load
}

/// Parameters of the convective (Robin) boundary condition `q = α (T - T_∞)`.
#[derive(Debug, Clone)]
pub struct ConvectionBoundary<T: Real> {
    coefficient: T,
    ambient_temperature: T,
    rule: QuadraturePair1d<T>,
}

impl<T: Real> ConvectionBoundary<T> {
    /// Fails if the coefficient is not positive, the ambient temperature is not finite or no
    /// rule with `edge_quadrature_points` points exists.
    pub fn new(coefficient: T, ambient_temperature: T, edge_quadrature_points: usize) -> Result<Self, AssemblyError> {
        if !(coefficient > T::zero()) {
            return Err(AssemblyError::invalid_parameter(
                "convection_coefficient",
                "must be positive",
            ));
        }
        if !ambient_temperature.is_finite() {
            return Err(AssemblyError::invalid_parameter(
                "ambient_temperature",
                "must be finite",
            ));
        }
        Ok(Self {
            coefficient,
            ambient_temperature,
            rule: gauss(edge_quadrature_points)?,
        })
    }

    pub fn coefficient(&self) -> T {
        self.coefficient
    }

    pub fn ambient_temperature(&self) -> T {
        self.ambient_temperature
    }

    pub fn rule(&self) -> &QuadraturePair1d<T> {
        &self.rule
    }
}

/// Boundary matrix and load vector of a single element.
///
/// Only edges with both end points flagged as convective boundary nodes contribute. The 2x2
/// edge quantities are added to the rows/columns of the edge's two local nodes.
pub fn assemble_element_boundary<T: Real>(
    element: &Quad4Element<T>,
    boundary: &ConvectionBoundary<T>,
) -> (Matrix4<T>, Vector4<T>) {
    let mut matrix = Matrix4::zeros();
    let mut load = Vector4::zeros();
    let nodes = element.nodes();

    for &(a, b) in &QUAD4_EDGES {
        let (node_a, node_b) = (&nodes[a], &nodes[b]);
        if !(node_a.is_convective_boundary() && node_b.is_convective_boundary()) {
            continue;
        }

        let edge_matrix = edge_convection_matrix(
            node_a.position(),
            node_b.position(),
            boundary.coefficient,
            &boundary.rule,
        );
        let edge_load = edge_load_vector(
            node_a.position(),
            node_b.position(),
            boundary.coefficient,
            boundary.ambient_temperature,
            &boundary.rule,
        );

        let local = [a, b];
        for (r, &row) in local.iter().enumerate() {
            for (c, &col) in local.iter().enumerate() {
                matrix[(row, col)] += edge_matrix[(r, c)];
            }
            load[row] += edge_load[r];
        }
    }

    (matrix, load)
}

/// Computes the boundary matrix and load vector of every element and stores them on the
/// elements, replacing previous values.
pub fn apply_convection_boundary<T: Real>(elements: &mut [Quad4Element<T>], boundary: &ConvectionBoundary<T>) {
    for element in elements {
        let (matrix, load) = assemble_element_boundary(element, boundary);
        element.set_boundary_matrix(matrix);
        element.set_boundary_load(load);
    }
}
