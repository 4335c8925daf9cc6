use crate::element::{Jacobian, Node};
use crate::nalgebra::{distance, Matrix1x4, Matrix2x4, Matrix4, Point2, Vector2, Vector4};
use crate::Real;
use numeric_literals::replace_float_literals;

/// Local node pairs forming the four edges of a quadrilateral, in loop order.
pub const QUAD4_EDGES: [(usize, usize); 4] = [(0, 1), (1, 2), (2, 3), (3, 0)];

/// Bilinear shape functions `N_k(ξ, η)` of the reference quadrilateral.
///
/// Node `k` sits at `(-1, -1)`, `(1, -1)`, `(1, 1)`, `(-1, 1)` for `k = 0, 1, 2, 3`.
#[rustfmt::skip]
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn quad4_shape_functions<T: Real>(xi: T, eta: T) -> Matrix1x4<T> {
    // N_{alpha, beta}([alpha, beta]) = 1 with alpha, beta = 1 or -1
    let phi = |alpha: T, beta: T| (1.0 + alpha * xi) * (1.0 + beta * eta) / 4.0;
    Matrix1x4::new(
        phi(-1.0, -1.0),
        phi( 1.0, -1.0),
        phi( 1.0,  1.0),
        phi(-1.0,  1.0),
    )
}

/// Derivatives of the bilinear shape functions with respect to the reference coordinates.
///
/// Row 0 holds `dN_k/dξ` and row 1 holds `dN_k/dη`, one column per node.
#[rustfmt::skip]
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn quad4_shape_derivatives<T: Real>(xi: T, eta: T) -> Matrix2x4<T> {
    let phi_grad = |alpha: T, beta: T|
        Vector2::new(
            alpha * (1.0 + beta * eta) / 4.0,
            beta * (1.0 + alpha * xi) / 4.0,
        );

    Matrix2x4::from_columns(&[
        phi_grad(-1.0, -1.0),
        phi_grad( 1.0, -1.0),
        phi_grad( 1.0,  1.0),
        phi_grad(-1.0,  1.0),
    ])
}

/// A 4-node bilinear quadrilateral in two dimensions.
///
/// Besides its geometry, the element stores its local-to-global node indices and the
/// convective boundary matrix and load vector computed for it. The nodes are expected in
/// counter-clockwise order, which gives a positive Jacobian determinant.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad4Element<T: Real> {
    nodes: [Node<T>; 4],
    global_indices: [usize; 4],
    boundary_matrix: Matrix4<T>,
    boundary_load: Vector4<T>,
}

impl<T: Real> Quad4Element<T> {
    pub fn new(nodes: [Node<T>; 4], global_indices: [usize; 4]) -> Self {
        Self {
            nodes,
            global_indices,
            boundary_matrix: Matrix4::zeros(),
            boundary_load: Vector4::zeros(),
        }
    }

    /// Creates an element of interior nodes at the given positions.
    pub fn from_vertices(vertices: [Point2<T>; 4], global_indices: [usize; 4]) -> Self {
        Self::new(vertices.map(Node::interior), global_indices)
    }

    /// The reference element `[-1, 1]^2` with global indices `0..4`.
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn reference() -> Self {
        Self::from_vertices(
            [
                Point2::new(-1.0, -1.0),
                Point2::new(1.0, -1.0),
                Point2::new(1.0, 1.0),
                Point2::new(-1.0, 1.0),
            ],
            [0, 1, 2, 3],
        )
    }

    pub fn nodes(&self) -> &[Node<T>; 4] {
        &self.nodes
    }

    pub fn global_indices(&self) -> &[usize; 4] {
        &self.global_indices
    }

    pub fn boundary_matrix(&self) -> &Matrix4<T> {
        &self.boundary_matrix
    }

    pub fn set_boundary_matrix(&mut self, matrix: Matrix4<T>) {
        self.boundary_matrix = matrix;
    }

    pub fn boundary_load(&self) -> &Vector4<T> {
        &self.boundary_load
    }

    pub fn set_boundary_load(&mut self, load: Vector4<T>) {
        self.boundary_load = load;
    }

    /// Returns the `(node, node)` pairs of the four edges.
    pub fn edges(&self) -> impl Iterator<Item = (&Node<T>, &Node<T>)> + '_ {
        QUAD4_EDGES
            .iter()
            .map(move |&(a, b)| (&self.nodes[a], &self.nodes[b]))
    }

    /// Node coordinates as columns of a 2x4 matrix.
    fn coordinate_matrix(&self) -> Matrix2x4<T> {
        Matrix2x4::from_fn(|i, j| self.nodes[j].position()[i])
    }

    /// Maps reference coordinates to physical coordinates.
    #[allow(non_snake_case)]
    pub fn map_reference_coords(&self, xi: T, eta: T) -> Point2<T> {
        let X = self.coordinate_matrix();
        let N = quad4_shape_functions(xi, eta);
        Point2::from(X * N.transpose())
    }

    /// Jacobian of the isoparametric map at `(ξ, η)`.
    ///
    /// `J[0][0] = Σ dN/dξ x_k`, `J[0][1] = Σ dN/dη x_k`, `J[1][0] = Σ dN/dξ y_k`,
    /// `J[1][1] = Σ dN/dη y_k`.
    #[allow(non_snake_case)]
    pub fn jacobian(&self, xi: T, eta: T) -> Jacobian<T> {
        let X = self.coordinate_matrix();
        let G = quad4_shape_derivatives(xi, eta);
        Jacobian::from_matrix(X * G.transpose())
    }

    /// Physical area, integrated with the 2x2 Gauss rule (exact for bilinear geometry).
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn area(&self) -> T {
        let a = 1.0 / T::sqrt(3.0);
        [(-a, -a), (a, -a), (a, a), (-a, a)]
            .iter()
            .map(|&(xi, eta)| self.jacobian(xi, eta).determinant())
            .fold(T::zero(), |acc, det| acc + det)
    }

    /// Largest distance between two nodes.
    pub fn diameter(&self) -> T {
        let mut diameter = T::zero();
        for (i, a) in self.nodes.iter().enumerate() {
            for b in &self.nodes[i + 1..] {
                diameter = diameter.max(distance(a.position(), b.position()));
            }
        }
        diameter
    }
}
