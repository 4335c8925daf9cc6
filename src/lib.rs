//! Assembly of the stationary heat-conduction system for 2-D meshes of bilinear
//! quadrilaterals.
//!
//! The crate computes, for every element, the conduction stiffness matrix by Gauss–Legendre
//! quadrature of the isoparametric integrand, adds convective (Robin) boundary contributions
//! along flagged edges and scatters the local quantities into a global conductivity matrix and
//! load vector. The resulting linear system is solved elsewhere.
//!
//! The usual entry point is [`model::HeatAssembler`].
use nalgebra::RealField;

pub mod assembly;
pub mod config;
pub mod element;
pub mod error;
pub mod model;
pub mod procedural;
pub mod quadrature;
pub mod report;

pub extern crate nalgebra;

/// Scalar type used throughout the crate.
///
/// Trait alias for real scalars that are cheap to copy, e.g. `f32` and `f64`.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}

/// Magnitude below which a Jacobian determinant is considered degenerate.
pub const DETERMINANT_TOLERANCE: f64 = 1e-12;
