//! Human-readable text dumps of assembled matrices and vectors.
//!
//! Values are written with five decimals, one matrix row per line.
use crate::assembly::trace::AssemblyTrace;
use crate::error::AssemblyError;
use crate::model::HeatSystem;
use crate::nalgebra::storage::Storage;
use crate::nalgebra::{DMatrix, DVector, Dim, Matrix, Matrix4, Vector4, U1};
use crate::Real;
use eyre::WrapErr;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the rows of a matrix, separating values by a single space.
pub fn write_matrix<T, R, C, S>(writer: &mut impl Write, matrix: &Matrix<T, R, C, S>) -> io::Result<()>
where
    T: Real,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
{
    for row in matrix.row_iter() {
        let mut first = true;
        for value in row.iter() {
            if !first {
                write!(writer, " ")?;
            }
            write!(writer, "{value:.5}")?;
            first = false;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Writes a vector, one value per line.
pub fn write_vector<T, R, S>(writer: &mut impl Write, vector: &Matrix<T, R, U1, S>) -> io::Result<()>
where
    T: Real,
    R: Dim,
    S: Storage<T, R, U1>,
{
    for value in vector.iter() {
        writeln!(writer, "{value:.5}")?;
    }
    Ok(())
}

/// Writes the conductivity matrix and the load vector of `system` to two text files.
pub fn save_system<T: Real>(
    system: &HeatSystem<T>,
    matrix_path: impl AsRef<Path>,
    load_path: impl AsRef<Path>,
) -> eyre::Result<()> {
    let matrix_path = matrix_path.as_ref();
    let load_path = load_path.as_ref();
    let mut matrix_file = BufWriter::new(
        File::create(matrix_path).wrap_err_with(|| format!("Failed to create {}", matrix_path.display()))?,
    );
    write_matrix(&mut matrix_file, &system.conductivity_matrix)
        .and_then(|_| matrix_file.flush())
        .wrap_err_with(|| format!("Failed to write conductivity matrix to {}", matrix_path.display()))?;

    let mut load_file = BufWriter::new(
        File::create(load_path).wrap_err_with(|| format!("Failed to create {}", load_path.display()))?,
    );
    write_vector(&mut load_file, &system.load_vector)
        .and_then(|_| load_file.flush())
        .wrap_err_with(|| format!("Failed to write load vector to {}", load_path.display()))?;
    Ok(())
}

/// An [`AssemblyTrace`] writing every intermediate result as text.
///
/// Writing stops at the first I/O error, which is returned by [`finish`](Self::finish).
#[derive(Debug)]
pub struct TextReport<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> TextReport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, error: None }
    }

    /// Returns the writer, or the first error encountered while writing.
    pub fn finish(mut self) -> io::Result<W> {
        match self.error.take() {
            Some(err) => Err(err),
            None => {
                self.writer.flush()?;
                Ok(self.writer)
            }
        }
    }

    fn record(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_none() {
            if let Err(err) = f(&mut self.writer) {
                self.error = Some(err);
            }
        }
    }
}

impl<T: Real, W: Write> AssemblyTrace<T> for TextReport<W> {
    fn element_boundary(&mut self, element_index: usize, matrix: &Matrix4<T>, load: &Vector4<T>) {
        self.record(|w| {
            writeln!(w, "Element {element_index}: boundary matrix Hbc")?;
            write_matrix(w, matrix)?;
            writeln!(w, "Element {element_index}: boundary load P")?;
            write_matrix(w, &load.transpose())
        });
    }

    fn element_stiffness(&mut self, element_index: usize, matrix: &Matrix4<T>) {
        self.record(|w| {
            writeln!(w, "Element {element_index}: local matrix H")?;
            write_matrix(w, matrix)
        });
    }

    fn global_stiffness(&mut self, matrix: &DMatrix<T>) {
        self.record(|w| {
            writeln!(w, "Global matrix H")?;
            write_matrix(w, matrix)
        });
    }

    fn global_load(&mut self, load: &DVector<T>) {
        self.record(|w| {
            writeln!(w, "Global vector P")?;
            write_vector(w, load)
        });
    }

    fn diagnostic(&mut self, diagnostic: &AssemblyError) {
        self.record(|w| writeln!(w, "Skipped: {diagnostic}"));
    }
}
