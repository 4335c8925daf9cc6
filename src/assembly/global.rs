//! Scatter-add of local element quantities into the global conductivity matrix and load
//! vector.
//!
//! Contributions through an out-of-range global index are skipped individually and reported
//! as [`AssemblyError::InvalidGlobalIndex`]; everything else is still assembled.
use crate::element::Quad4Element;
use crate::error::AssemblyError;
use crate::nalgebra::{DMatrix, DVector, Matrix4, Vector4};
use crate::Real;
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

fn invalid_index(element_index: usize, global_index: usize, num_nodes: usize) -> AssemblyError {
    AssemblyError::InvalidGlobalIndex {
        element_index,
        global_index,
        num_nodes,
    }
}

/// Adds a local matrix into `global` through the element's index map.
pub fn scatter_element_matrix<T: Real>(
    global: &mut DMatrix<T>,
    element_index: usize,
    global_indices: &[usize; 4],
    local: &Matrix4<T>,
    diagnostics: &mut Vec<AssemblyError>,
) {
    let num_nodes = global.nrows();
    for (i, &row) in global_indices.iter().enumerate() {
        for (j, &col) in global_indices.iter().enumerate() {
            if row < num_nodes && col < num_nodes {
                global[(row, col)] += local[(i, j)];
            } else {
                let offending = if row >= num_nodes { row } else { col };
                diagnostics.push(invalid_index(element_index, offending, num_nodes));
            }
        }
    }
}

/// Adds a local vector into `global` through the element's index map.
pub fn scatter_element_vector<T: Real>(
    global: &mut DVector<T>,
    element_index: usize,
    global_indices: &[usize; 4],
    local: &Vector4<T>,
    diagnostics: &mut Vec<AssemblyError>,
) {
    let num_nodes = global.len();
    for (i, &row) in global_indices.iter().enumerate() {
        if row < num_nodes {
            global[row] += local[i];
        } else {
            diagnostics.push(invalid_index(element_index, row, num_nodes));
        }
    }
}

/// Assembles the `num_nodes × num_nodes` global conductivity matrix.
///
/// `local_matrices[e]` is the local stiffness matrix of `elements[e]`, or `None` if the element
/// is excluded from assembly. Returns the matrix together with one diagnostic per skipped
/// `(i, j)` accumulation.
///
/// # Panics
///
/// Panics if `elements` and `local_matrices` differ in length.
pub fn assemble_global_stiffness<T: Real>(
    elements: &[Quad4Element<T>],
    local_matrices: &[Option<Matrix4<T>>],
    num_nodes: usize,
) -> (DMatrix<T>, Vec<AssemblyError>) {
    assert_eq!(
        elements.len(),
        local_matrices.len(),
        "Need exactly one local matrix entry per element"
    );
    let mut global = DMatrix::zeros(num_nodes, num_nodes);
    let mut diagnostics = Vec::new();
    for (element_index, (element, local)) in elements.iter().zip(local_matrices).enumerate() {
        if let Some(local) = local {
            scatter_element_matrix(
                &mut global,
                element_index,
                element.global_indices(),
                local,
                &mut diagnostics,
            );
        }
    }
    (global, diagnostics)
}

/// Assembles the global load vector from the boundary loads stored on the elements.
pub fn assemble_global_load<T: Real>(
    elements: &[Quad4Element<T>],
    num_nodes: usize,
) -> (DVector<T>, Vec<AssemblyError>) {
    let mut global = DVector::zeros(num_nodes);
    let mut diagnostics = Vec::new();
    for (element_index, element) in elements.iter().enumerate() {
        scatter_element_vector(
            &mut global,
            element_index,
            element.global_indices(),
            element.boundary_load(),
            &mut diagnostics,
        );
    }
    (global, diagnostics)
}

/// Parallel version of [`assemble_global_stiffness`].
///
/// Every worker accumulates into its own partial matrix, and the partial matrices are summed
/// at the end. The result equals the sequential one up to floating-point summation order.
pub fn par_assemble_global_stiffness<T: Real>(
    elements: &[Quad4Element<T>],
    local_matrices: &[Option<Matrix4<T>>],
    num_nodes: usize,
) -> (DMatrix<T>, Vec<AssemblyError>) {
    assert_eq!(
        elements.len(),
        local_matrices.len(),
        "Need exactly one local matrix entry per element"
    );
    let empty = || (DMatrix::zeros(num_nodes, num_nodes), Vec::new());
    elements
        .par_iter()
        .zip(local_matrices.par_iter())
        .enumerate()
        .fold(empty, |(mut global, mut diagnostics), (element_index, (element, local))| {
            if let Some(local) = local {
                scatter_element_matrix(
                    &mut global,
                    element_index,
                    element.global_indices(),
                    local,
                    &mut diagnostics,
                );
            }
            (global, diagnostics)
        })
        .reduce(empty, |(a, mut diagnostics_a), (b, diagnostics_b)| {
            diagnostics_a.extend(diagnostics_b);
            (a + b, diagnostics_a)
        })
}

/// Parallel version of [`assemble_global_load`].
pub fn par_assemble_global_load<T: Real>(
    elements: &[Quad4Element<T>],
    num_nodes: usize,
) -> (DVector<T>, Vec<AssemblyError>) {
    let empty = || (DVector::zeros(num_nodes), Vec::new());
    elements
        .par_iter()
        .enumerate()
        .fold(empty, |(mut global, mut diagnostics), (element_index, element)| {
            scatter_element_vector(
                &mut global,
                element_index,
                element.global_indices(),
                element.boundary_load(),
                &mut diagnostics,
            );
            (global, diagnostics)
        })
        .reduce(empty, |(a, mut diagnostics_a), (b, diagnostics_b)| {
            diagnostics_a.extend(diagnostics_b);
            (a + b, diagnostics_a)
        })
}
