use heatfem::assembly::trace::AssemblyTrace;
use heatfem::config::HeatParameters;
use heatfem::error::AssemblyError;
use heatfem::model::HeatAssembler;
use heatfem::nalgebra::{DVector, Matrix2x3, Vector3};
use heatfem::procedural::unit_square_grid;
use heatfem::report::{write_matrix, write_vector, TextReport};
use std::io;
use std::io::Write;

#[test]
fn write_matrix_uses_five_decimals() {
    let matrix = Matrix2x3::new(1.0, -0.5, 2.0 / 3.0, 0.0, 1234.5, -1e-7);
    let mut output = Vec::new();
    write_matrix(&mut output, &matrix).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "1.00000 -0.50000 0.66667\n0.00000 1234.50000 -0.00000\n"
    );
}

#[test]
fn write_vector_writes_one_value_per_line() {
    let mut output = Vec::new();
    write_vector(&mut output, &Vector3::new(1.0, 2.5, -3.0)).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "1.00000\n2.50000\n-3.00000\n");

    let mut output = Vec::new();
    write_vector(&mut output, &DVector::<f64>::zeros(0)).unwrap();
    assert!(output.is_empty());
}

#[test]
fn text_report_contains_every_stage() {
    let mut grid = unit_square_grid::<f64>(1);
    let assembler = HeatAssembler::new(HeatParameters::new(1.0, 6.0, 10.0)).unwrap();
    let mut report = TextReport::new(Vec::new());
    assembler
        .assemble(&mut grid.elements, grid.nodes.len(), &mut report)
        .unwrap();
    let text = String::from_utf8(report.finish().unwrap()).unwrap();

    let headings = [
        "Element 0: boundary matrix Hbc",
        "Element 0: boundary load P",
        "Element 0: local matrix H",
        "Global matrix H",
        "Global vector P",
    ];
    let mut last = 0;
    for heading in headings {
        let position = text.find(heading).expect("Heading missing from report");
        assert!(position >= last, "Heading {heading} out of order");
        last = position;
    }
    assert!(!text.contains("Skipped"));

    // The load of every corner node of the unit square is alpha * T * 1
    let global_load = text.split("Global vector P\n").nth(1).unwrap();
    assert_eq!(global_load, "60.00000\n60.00000\n60.00000\n60.00000\n");
}

#[test]
fn text_report_lists_diagnostics() {
    let mut report = TextReport::new(Vec::new());
    AssemblyTrace::<f64>::diagnostic(
        &mut report,
        &AssemblyError::InvalidGlobalIndex {
            element_index: 3,
            global_index: 12,
            num_nodes: 9,
        },
    );
    let text = String::from_utf8(report.finish().unwrap()).unwrap();
    assert!(text.starts_with("Skipped: Element 3 references global index 12"));
}

struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn text_report_returns_first_write_error() {
    let mut grid = unit_square_grid::<f64>(2);
    let assembler = HeatAssembler::new(HeatParameters::new(1.0, 6.0, 10.0)).unwrap();
    let mut report = TextReport::new(FailingWriter);
    // Assembly itself is unaffected by the failing report
    let system = assembler
        .assemble(&mut grid.elements, grid.nodes.len(), &mut report)
        .unwrap();
    assert_eq!(system.load_vector.len(), 9);

    let err = report.finish().err().expect("Report must fail");
    assert_eq!(err.to_string(), "disk full");
}
