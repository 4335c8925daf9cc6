//! Observers notified about intermediate results of an assembly pass.
//!
//! Assembly never depends on an observer being present: `()` implements [`AssemblyTrace`]
//! with no-ops and is what callers pass when they are not interested in intermediate data.
use crate::error::AssemblyError;
use crate::nalgebra::{DMatrix, DVector, Matrix4, Vector4};
use crate::Real;
use log::{debug, trace, warn};

/// Receives intermediate matrices and diagnostics during assembly.
///
/// All methods have empty default implementations.
pub trait AssemblyTrace<T: Real> {
    /// Called once per element after its boundary matrix and load vector were computed.
    fn element_boundary(&mut self, _element_index: usize, _matrix: &Matrix4<T>, _load: &Vector4<T>) {}

    /// Called once per element with its complete local stiffness matrix.
    fn element_stiffness(&mut self, _element_index: usize, _matrix: &Matrix4<T>) {}

    fn global_stiffness(&mut self, _matrix: &DMatrix<T>) {}

    fn global_load(&mut self, _load: &DVector<T>) {}

    /// Called for every skipped contribution (excluded element or invalid index).
    fn diagnostic(&mut self, _diagnostic: &AssemblyError) {}
}

impl<T: Real> AssemblyTrace<T> for () {}

impl<T: Real, X: AssemblyTrace<T> + ?Sized> AssemblyTrace<T> for &mut X {
    fn element_boundary(&mut self, element_index: usize, matrix: &Matrix4<T>, load: &Vector4<T>) {
        X::element_boundary(self, element_index, matrix, load)
    }

    fn element_stiffness(&mut self, element_index: usize, matrix: &Matrix4<T>) {
        X::element_stiffness(self, element_index, matrix)
    }

    fn global_stiffness(&mut self, matrix: &DMatrix<T>) {
        X::global_stiffness(self, matrix)
    }

    fn global_load(&mut self, load: &DVector<T>) {
        X::global_load(self, load)
    }

    fn diagnostic(&mut self, diagnostic: &AssemblyError) {
        X::diagnostic(self, diagnostic)
    }
}

/// Forwards assembly events to the `log` facade.
///
/// Local matrices are logged at `trace` level, global results at `debug` level and
/// diagnostics as warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl<T: Real> AssemblyTrace<T> for LogTrace {
    fn element_boundary(&mut self, element_index: usize, matrix: &Matrix4<T>, load: &Vector4<T>) {
        trace!("Element {element_index}: boundary matrix {matrix} boundary load {load}");
    }

    fn element_stiffness(&mut self, element_index: usize, matrix: &Matrix4<T>) {
        trace!("Element {element_index}: local stiffness matrix {matrix}");
    }

    fn global_stiffness(&mut self, matrix: &DMatrix<T>) {
        debug!(
            "Assembled global conductivity matrix ({} x {})",
            matrix.nrows(),
            matrix.ncols()
        );
    }

    fn global_load(&mut self, load: &DVector<T>) {
        debug!("Assembled global load vector ({} entries)", load.len());
    }

    fn diagnostic(&mut self, diagnostic: &AssemblyError) {
        warn!("{diagnostic}");
    }
}
