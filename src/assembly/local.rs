//! Element integrands and local (per-element) assembly.
use crate::element::Quad4Element;
use crate::error::AssemblyError;
use crate::nalgebra::Matrix4;
use crate::quadrature::TensorGauss2d;
use crate::Real;

mod conduction;
mod convection;

pub use conduction::*;
pub use convection::*;

/// Number of Gauss points per dimension used for the stiffness integrals by default.
pub const DEFAULT_AREA_QUADRATURE_POINTS: usize = 4;

/// Number of Gauss points used for boundary edge integrals by default.
pub const DEFAULT_EDGE_QUADRATURE_POINTS: usize = 2;

/// Computes complete local stiffness matrices (conduction plus convective boundary terms) for a
/// fixed conductivity.
///
/// The quadrature rule is set up once, so the same assembler can be used for all elements
/// of a mesh, also from several threads.
#[derive(Debug, Clone)]
pub struct LocalHeatAssembler<T: Real> {
    conductivity: T,
    quadrature: TensorGauss2d<T>,
}

impl<T: Real> LocalHeatAssembler<T> {
    /// Fails if the conductivity is not positive or the quadrature order is unsupported.
    pub fn new(conductivity: T, quadrature_points: usize) -> Result<Self, AssemblyError> {
        if !(conductivity > T::zero()) {
            return Err(AssemblyError::invalid_parameter(
                "conductivity",
                "must be positive",
            ));
        }
        Ok(Self {
            conductivity,
            quadrature: TensorGauss2d::new(quadrature_points)?,
        })
    }

    pub fn conductivity(&self) -> T {
        self.conductivity
    }

    pub fn quadrature(&self) -> &TensorGauss2d<T> {
        &self.quadrature
    }

    /// The conduction part of the local stiffness matrix only.
    pub fn assemble_element_conduction(&self, element: &Quad4Element<T>) -> Result<Matrix4<T>, AssemblyError> {
        assemble_element_conduction(element, self.conductivity, &self.quadrature)
    }

    /// The complete local stiffness matrix: conduction integral plus the boundary matrix
    /// stored on the element.
    ///
    /// The boundary matrix must have been set (see [`apply_convection_boundary`]) beforehand,
    /// otherwise only conduction is accounted for.
    pub fn assemble_element_stiffness(&self, element: &Quad4Element<T>) -> Result<Matrix4<T>, AssemblyError> {
        let conduction = self.assemble_element_conduction(element)?;
        Ok(conduction + element.boundary_matrix())
    }
}
