use heatfem::assembly::trace::{AssemblyTrace, LogTrace};
use heatfem::config::HeatParameters;
use heatfem::element::Quad4Element;
use heatfem::error::AssemblyError;
use heatfem::model::HeatAssembler;
use heatfem::nalgebra::{DMatrix, DVector, Matrix4, Point2, Vector4};
use heatfem::procedural::unit_square_grid;

#[derive(Debug, Default)]
struct RecordingTrace {
    boundary: Vec<usize>,
    stiffness: Vec<usize>,
    global_matrix_shape: Option<(usize, usize)>,
    global_load_len: Option<usize>,
    diagnostics: Vec<AssemblyError>,
}

impl AssemblyTrace<f64> for RecordingTrace {
    fn element_boundary(&mut self, element_index: usize, _matrix: &Matrix4<f64>, _load: &Vector4<f64>) {
        self.boundary.push(element_index);
    }

    fn element_stiffness(&mut self, element_index: usize, _matrix: &Matrix4<f64>) {
        self.stiffness.push(element_index);
    }

    fn global_stiffness(&mut self, matrix: &DMatrix<f64>) {
        self.global_matrix_shape = Some(matrix.shape());
    }

    fn global_load(&mut self, load: &DVector<f64>) {
        self.global_load_len = Some(load.len());
    }

    fn diagnostic(&mut self, diagnostic: &AssemblyError) {
        self.diagnostics.push(diagnostic.clone());
    }
}

fn assembler() -> HeatAssembler<f64> {
    HeatAssembler::new(HeatParameters::new(1.0, 10.0, 20.0)).unwrap()
}

#[test]
fn trace_observes_every_stage() {
    let mut grid = unit_square_grid::<f64>(2);
    let mut trace = RecordingTrace::default();
    let system = assembler()
        .assemble(&mut grid.elements, grid.nodes.len(), &mut trace)
        .unwrap();

    assert_eq!(trace.boundary, vec![0, 1, 2, 3]);
    assert_eq!(trace.stiffness, vec![0, 1, 2, 3]);
    assert_eq!(trace.global_matrix_shape, Some((9, 9)));
    assert_eq!(trace.global_load_len, Some(9));
    assert!(trace.diagnostics.is_empty());
    assert!(system.diagnostics.is_empty());
}

#[test]
fn trace_receives_diagnostics() {
    let mut grid = unit_square_grid::<f64>(1);
    let collapsed = [(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 0.0)].map(|(x, y)| Point2::new(x, y));
    grid.elements.push(Quad4Element::from_vertices(collapsed, [0, 1, 2, 3]));
    let square = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)].map(|(x, y)| Point2::new(x, y));
    grid.elements.push(Quad4Element::from_vertices(square, [0, 1, 2, 4]));

    let mut trace = RecordingTrace::default();
    let system = assembler().assemble(&mut grid.elements, 4, &mut trace).unwrap();

    assert_eq!(trace.stiffness, vec![0, 2]);
    assert_eq!(system.excluded_elements, vec![1]);
    // One excluded element, 7 skipped matrix entries and 1 skipped load entry
    assert_eq!(trace.diagnostics.len(), 9);
    assert_eq!(trace.diagnostics, system.diagnostics);
    assert!(matches!(
        trace.diagnostics[0],
        AssemblyError::DegenerateElement {
            element_index: Some(1),
            ..
        }
    ));
}

#[test]
fn unit_and_log_traces_do_not_affect_results() {
    let mut grid = unit_square_grid::<f64>(3);
    let silent = assembler().assemble(&mut grid.elements, grid.nodes.len(), ()).unwrap();
    let logged = assembler()
        .assemble(&mut grid.elements, grid.nodes.len(), LogTrace)
        .unwrap();
    assert_eq!(silent, logged);
}
