//! The assembly driver tying boundary conditions, local and global assembly together.
use crate::assembly::global::{
    assemble_global_load, assemble_global_stiffness, par_assemble_global_load, par_assemble_global_stiffness,
};
use crate::assembly::local::{assemble_element_boundary, ConvectionBoundary, LocalHeatAssembler};
use crate::assembly::trace::AssemblyTrace;
use crate::config::{DegenerateElementPolicy, HeatParameters};
use crate::element::Quad4Element;
use crate::error::AssemblyError;
use crate::nalgebra::{DMatrix, DVector, Matrix4};
use crate::Real;
use itertools::Itertools;
use log::{debug, info, warn};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// The assembled linear system `H t = P` for the nodal temperatures `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatSystem<T: Real> {
    /// Global conductivity matrix including convective boundary terms.
    pub conductivity_matrix: DMatrix<T>,
    /// Global load vector.
    pub load_vector: DVector<T>,
    /// Indices of elements left out because of degenerate geometry.
    pub excluded_elements: Vec<usize>,
    /// Every skipped contribution, in the order it was encountered.
    pub diagnostics: Vec<AssemblyError>,
}

/// The global conductivity matrix together with what was skipped while assembling it.
#[derive(Debug, Clone, PartialEq)]
pub struct StiffnessAssembly<T: Real> {
    pub matrix: DMatrix<T>,
    pub excluded_elements: Vec<usize>,
    pub diagnostics: Vec<AssemblyError>,
}

/// Assembles the stationary heat-conduction system of a quadrilateral mesh.
///
/// Parameters are validated once on construction. A typical pass first stores the
/// convective boundary terms on the elements and then assembles the global system:
///
/// ```
/// use heatfem::config::HeatParameters;
/// use heatfem::model::HeatAssembler;
/// use heatfem::procedural::unit_square_grid;
///
/// let mut grid = unit_square_grid::<f64>(4);
/// let assembler = HeatAssembler::new(HeatParameters::new(25.0, 300.0, 1200.0)).unwrap();
/// let system = assembler.assemble(&mut grid.elements, grid.nodes.len(), ()).unwrap();
/// assert_eq!(system.conductivity_matrix.nrows(), 25);
/// assert!(system.diagnostics.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct HeatAssembler<T: Real> {
    parameters: HeatParameters<T>,
    local: LocalHeatAssembler<T>,
    boundary: ConvectionBoundary<T>,
}

impl<T: Real> HeatAssembler<T> {
    /// Fails with `InvalidParameter` or `UnsupportedQuadratureOrder` before any assembly work.
    pub fn new(parameters: HeatParameters<T>) -> Result<Self, AssemblyError> {
        parameters.validate()?;
        let local = LocalHeatAssembler::new(parameters.conductivity, parameters.area_quadrature_points)?;
        let boundary = ConvectionBoundary::new(
            parameters.convection_coefficient,
            parameters.ambient_temperature,
            parameters.edge_quadrature_points,
        )?;
        Ok(Self {
            parameters,
            local,
            boundary,
        })
    }

    pub fn parameters(&self) -> &HeatParameters<T> {
        &self.parameters
    }

    pub fn local_assembler(&self) -> &LocalHeatAssembler<T> {
        &self.local
    }

    pub fn convection_boundary(&self) -> &ConvectionBoundary<T> {
        &self.boundary
    }

    /// An assembler for a different conductivity with otherwise identical parameters.
    ///
    /// Boundary terms do not depend on the conductivity, so elements prepared with
    /// [`apply_boundary_conditions`](Self::apply_boundary_conditions) can be reused as they are.
    pub fn with_conductivity(&self, conductivity: T) -> Result<Self, AssemblyError> {
        Self::new(HeatParameters {
            conductivity,
            ..self.parameters.clone()
        })
    }

    /// Computes the boundary matrix and load vector of every element and stores them on the
    /// element.
    pub fn apply_boundary_conditions(&self, elements: &mut [Quad4Element<T>], mut trace: impl AssemblyTrace<T>) {
        for (element_index, element) in elements.iter_mut().enumerate() {
            let (matrix, load) = assemble_element_boundary(element, &self.boundary);
            trace.element_boundary(element_index, &matrix, &load);
            element.set_boundary_matrix(matrix);
            element.set_boundary_load(load);
        }
    }

    /// Computes the complete local stiffness matrix of every element.
    ///
    /// Elements with degenerate geometry are handled according to the degenerate element
    /// policy: with `Skip` their entry is `None` and the error is added to `diagnostics`,
    /// with `Abort` the first such error is returned.
    pub fn assemble_local_matrices(
        &self,
        elements: &[Quad4Element<T>],
        diagnostics: &mut Vec<AssemblyError>,
        mut trace: impl AssemblyTrace<T>,
    ) -> Result<Vec<Option<Matrix4<T>>>, AssemblyError> {
        let results: Vec<Result<Matrix4<T>, AssemblyError>> = if self.parameters.parallel {
            elements
                .par_iter()
                .map(|element| self.local.assemble_element_stiffness(element))
                .collect()
        } else {
            elements
                .iter()
                .map(|element| self.local.assemble_element_stiffness(element))
                .collect()
        };

        let mut local_matrices = Vec::with_capacity(results.len());
        for (element_index, result) in results.into_iter().enumerate() {
            match result {
                Ok(matrix) => {
                    trace.element_stiffness(element_index, &matrix);
                    local_matrices.push(Some(matrix));
                }
                Err(err) => {
                    let err = err.in_element(element_index);
                    match self.parameters.degenerate_policy {
                        DegenerateElementPolicy::Abort => return Err(err),
                        DegenerateElementPolicy::Skip => {
                            warn!("Excluding element {element_index} from assembly: {err}");
                            trace.diagnostic(&err);
                            diagnostics.push(err);
                            local_matrices.push(None);
                        }
                    }
                }
            }
        }
        Ok(local_matrices)
    }

    /// Assembles the global conductivity matrix for `num_nodes` nodes.
    ///
    /// Boundary matrices already stored on the elements are included.
    pub fn assemble_stiffness(
        &self,
        elements: &[Quad4Element<T>],
        num_nodes: usize,
        mut trace: impl AssemblyTrace<T>,
    ) -> Result<StiffnessAssembly<T>, AssemblyError> {
        let mut diagnostics = Vec::new();
        let local_matrices = self.assemble_local_matrices(elements, &mut diagnostics, &mut trace)?;
        let excluded_elements = local_matrices.iter().positions(Option::is_none).collect();

        let (matrix, index_diagnostics) = if self.parameters.parallel {
            par_assemble_global_stiffness(elements, &local_matrices, num_nodes)
        } else {
            assemble_global_stiffness(elements, &local_matrices, num_nodes)
        };
        report_index_diagnostics(&index_diagnostics, &mut trace);
        diagnostics.extend(index_diagnostics);
        trace.global_stiffness(&matrix);

        Ok(StiffnessAssembly {
            matrix,
            excluded_elements,
            diagnostics,
        })
    }

    /// Assembles the global load vector from the boundary loads stored on the elements.
    pub fn assemble_load(
        &self,
        elements: &[Quad4Element<T>],
        num_nodes: usize,
        mut trace: impl AssemblyTrace<T>,
    ) -> (DVector<T>, Vec<AssemblyError>) {
        let (load, diagnostics) = if self.parameters.parallel {
            par_assemble_global_load(elements, num_nodes)
        } else {
            assemble_global_load(elements, num_nodes)
        };
        report_index_diagnostics(&diagnostics, &mut trace);
        trace.global_load(&load);
        (load, diagnostics)
    }

    /// Runs a complete assembly pass: boundary conditions, local matrices, global matrix and
    /// load vector.
    pub fn assemble(
        &self,
        elements: &mut [Quad4Element<T>],
        num_nodes: usize,
        mut trace: impl AssemblyTrace<T>,
    ) -> Result<HeatSystem<T>, AssemblyError> {
        debug!(
            "Assembling heat system with {} elements and {} nodes",
            elements.len(),
            num_nodes
        );
        self.apply_boundary_conditions(elements, &mut trace);
        let StiffnessAssembly {
            matrix,
            excluded_elements,
            mut diagnostics,
        } = self.assemble_stiffness(elements, num_nodes, &mut trace)?;
        let (load_vector, load_diagnostics) = self.assemble_load(elements, num_nodes, &mut trace);
        diagnostics.extend(load_diagnostics);

        if !diagnostics.is_empty() {
            warn!(
                "Heat system assembled with {} skipped contributions ({} excluded elements)",
                diagnostics.len(),
                excluded_elements.len()
            );
        } else {
            info!("Heat system assembled ({num_nodes} nodes)");
        }

        Ok(HeatSystem {
            conductivity_matrix: matrix,
            load_vector,
            excluded_elements,
            diagnostics,
        })
    }
}

fn report_index_diagnostics<T: Real>(diagnostics: &[AssemblyError], trace: &mut impl AssemblyTrace<T>) {
    for diagnostic in diagnostics {
        warn!("Skipping contribution: {diagnostic}");
        trace.diagnostic(diagnostic);
    }
}
