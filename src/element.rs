//! Mesh nodes, bilinear quadrilateral elements and their isoparametric geometry.
use crate::nalgebra::{Point2, Scalar};
use serde::{Deserialize, Serialize};

mod jacobian;
mod quadrilateral;

pub use jacobian::*;
pub use quadrilateral::*;

/// A mesh node with its physical position.
///
/// Nodes flagged as convective boundary nodes take part in the boundary integrals: an edge
/// contributes boundary terms only if both of its end points are flagged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node<T: Scalar> {
    position: Point2<T>,
    convective_boundary: bool,
}

impl<T: Scalar> Node<T> {
    pub fn new(position: Point2<T>, convective_boundary: bool) -> Self {
        Self {
            position,
            convective_boundary,
        }
    }

    /// An interior node, i.e. one without convective boundary condition.
    pub fn interior(position: Point2<T>) -> Self {
        Self::new(position, false)
    }

    pub fn boundary(position: Point2<T>) -> Self {
        Self::new(position, true)
    }

    pub fn position(&self) -> &Point2<T> {
        &self.position
    }

    pub fn x(&self) -> T {
        self.position.x.clone()
    }

    pub fn y(&self) -> T {
        self.position.y.clone()
    }

    pub fn is_convective_boundary(&self) -> bool {
        self.convective_boundary
    }
}
