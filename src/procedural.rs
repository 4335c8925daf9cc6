//! Procedural generation of structured quadrilateral grids.
use crate::element::{Node, Quad4Element};
use crate::error::AssemblyError;
use crate::nalgebra::{convert, Point2};
use crate::Real;

/// Nodes and elements of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadGrid<T: Real> {
    pub nodes: Vec<Node<T>>,
    pub elements: Vec<Quad4Element<T>>,
}

impl<T: Real> QuadGrid<T> {
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}

/// Generates a uniform grid covering `[0, width] × [0, height]`.
///
/// Nodes are numbered column by column, i.e. node `(i, j)` with `i` counting in `x` and `j`
/// counting in `y` gets index `i * nodes_high + j`. Nodes on the perimeter are flagged as
/// convective boundary nodes. Elements are numbered the same way and list their nodes
/// counter-clockwise, starting at the lower left corner.
pub fn rectangular_grid<T: Real>(
    width: T,
    height: T,
    nodes_wide: usize,
    nodes_high: usize,
) -> Result<QuadGrid<T>, AssemblyError> {
    if !(width > T::zero()) || !(height > T::zero()) {
        return Err(AssemblyError::invalid_parameter(
            "width/height",
            "grid extents must be positive",
        ));
    }
    if nodes_wide < 2 || nodes_high < 2 {
        return Err(AssemblyError::invalid_parameter(
            "nodes_wide/nodes_high",
            "a grid needs at least two nodes per direction",
        ));
    }

    let to_real = |n: usize| -> T { convert(n as f64) };
    let dx = width / to_real(nodes_wide - 1);
    let dy = height / to_real(nodes_high - 1);
    let node_index = |i: usize, j: usize| i * nodes_high + j;

    let mut nodes = Vec::with_capacity(nodes_wide * nodes_high);
    for i in 0..nodes_wide {
        for j in 0..nodes_high {
            let x = dx * to_real(i);
            let y = dy * to_real(j);
            let on_boundary = i == 0 || i + 1 == nodes_wide || j == 0 || j + 1 == nodes_high;
            nodes.push(Node::new(Point2::new(x, y), on_boundary));
        }
    }

    let mut elements = Vec::with_capacity((nodes_wide - 1) * (nodes_high - 1));
    for i in 0..nodes_wide - 1 {
        for j in 0..nodes_high - 1 {
            let indices = [
                node_index(i, j),
                node_index(i + 1, j),
                node_index(i + 1, j + 1),
                node_index(i, j + 1),
            ];
            elements.push(Quad4Element::new(indices.map(|idx| nodes[idx]), indices));
        }
    }

    Ok(QuadGrid { nodes, elements })
}

/// A grid of the unit square with `cells_per_dim` elements along each side.
///
/// # Panics
///
/// Panics if `cells_per_dim` is zero.
pub fn unit_square_grid<T: Real>(cells_per_dim: usize) -> QuadGrid<T> {
    assert!(cells_per_dim > 0, "Need at least one cell per dimension");
    rectangular_grid(T::one(), T::one(), cells_per_dim + 1, cells_per_dim + 1)
        .expect("Unit square grid parameters are always valid")
}
