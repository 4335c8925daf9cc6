use heatfem::config::{DegenerateElementPolicy, HeatParameters, SimulationData};
use heatfem::error::AssemblyError;

const DATA: &str = "100 50 25 300 1200 100 7800 700 16 9 4 4 0.1 0.1";

#[test]
fn heat_parameters_defaults() {
    let params = HeatParameters::new(25.0, 300.0, 1200.0);
    assert_eq!(params.area_quadrature_points, 4);
    assert_eq!(params.edge_quadrature_points, 2);
    assert_eq!(params.degenerate_policy, DegenerateElementPolicy::Skip);
    assert!(!params.parallel);
    assert!(params.validate().is_ok());

    let params = params
        .with_quadrature_points(3, 5)
        .with_degenerate_policy(DegenerateElementPolicy::Abort)
        .with_parallel(true);
    assert_eq!(params.area_quadrature_points, 3);
    assert_eq!(params.edge_quadrature_points, 5);
    assert_eq!(params.degenerate_policy, DegenerateElementPolicy::Abort);
    assert!(params.parallel);
}

#[test]
fn heat_parameters_validation() {
    let invalid_name = |params: HeatParameters<f64>| match params.validate() {
        Err(AssemblyError::InvalidParameter { name, .. }) => name,
        other => panic!("Expected invalid parameter, got {other:?}"),
    };

    assert_eq!(invalid_name(HeatParameters::new(0.0, 300.0, 1200.0)), "conductivity");
    assert_eq!(invalid_name(HeatParameters::new(f64::NAN, 300.0, 1200.0)), "conductivity");
    assert_eq!(invalid_name(HeatParameters::new(25.0, -1.0, 1200.0)), "convection_coefficient");
    assert_eq!(invalid_name(HeatParameters::new(25.0, 300.0, f64::INFINITY)), "ambient_temperature");
    assert_eq!(
        invalid_name(HeatParameters::new(25.0, 300.0, 1200.0).with_quadrature_points(0, 2)),
        "area_quadrature_points"
    );
    assert_eq!(
        invalid_name(HeatParameters::new(25.0, 300.0, 1200.0).with_quadrature_points(2, 0)),
        "edge_quadrature_points"
    );

    // Negative ambient temperatures are fine
    assert!(HeatParameters::new(25.0, 300.0, -40.0).validate().is_ok());
}

#[test]
fn heat_parameters_deserialize_with_defaults() {
    let json = r#"{ "conductivity": 25.0, "convection_coefficient": 300.0, "ambient_temperature": 1200.0 }"#;
    let params: HeatParameters<f64> = serde_json::from_str(json).unwrap();
    assert_eq!(params, HeatParameters::new(25.0, 300.0, 1200.0));

    let json = r#"{
        "conductivity": 1.0,
        "convection_coefficient": 2.0,
        "ambient_temperature": 3.0,
        "area_quadrature_points": 2,
        "degenerate_policy": "abort",
        "parallel": true
    }"#;
    let params: HeatParameters<f64> = serde_json::from_str(json).unwrap();
    assert_eq!(params.area_quadrature_points, 2);
    assert_eq!(params.edge_quadrature_points, 2);
    assert_eq!(params.degenerate_policy, DegenerateElementPolicy::Abort);
    assert!(params.parallel);

    let serialized = serde_json::to_string(&params).unwrap();
    let deserialized: HeatParameters<f64> = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized, params);
}

#[test]
fn simulation_data_parses_all_values() {
    let data = SimulationData::parse(DATA).unwrap();
    assert_eq!(data.simulation_time, 100.0);
    assert_eq!(data.simulation_step_time, 50.0);
    assert_eq!(data.conductivity, 25.0);
    assert_eq!(data.convection_coefficient, 300.0);
    assert_eq!(data.ambient_temperature, 1200.0);
    assert_eq!(data.initial_temperature, 100.0);
    assert_eq!(data.density, 7800.0);
    assert_eq!(data.specific_heat, 700.0);
    assert_eq!(data.num_nodes, 16);
    assert_eq!(data.num_elements, 9);
    assert_eq!(data.nodes_high, 4);
    assert_eq!(data.nodes_wide, 4);
    assert_eq!(data.height, 0.1);
    assert_eq!(data.width, 0.1);

    assert_eq!(data.heat_parameters(), HeatParameters::new(25.0, 300.0, 1200.0));

    let grid = data.grid().unwrap();
    assert_eq!(grid.num_nodes(), 16);
    assert_eq!(grid.elements.len(), 9);
}

#[test]
fn simulation_data_accepts_arbitrary_whitespace() {
    let multiline = DATA.replace(' ', "\n\t ");
    assert_eq!(SimulationData::parse(&multiline).unwrap(), SimulationData::parse(DATA).unwrap());
    assert!(SimulationData::parse(&format!("  {DATA}  \n")).is_ok());
}

#[test]
fn simulation_data_reports_missing_and_malformed_values() {
    let truncated = "100 50 25 300 1200 100 7800 700 16 9 4 4 0.1";
    let err = SimulationData::parse(truncated).unwrap_err();
    assert!(format!("{err}").contains("width"));

    let malformed = DATA.replace("7800", "steel");
    let err = SimulationData::parse(&malformed).unwrap_err();
    assert!(format!("{err}").contains("density"));

    // Counts must be integers
    let fractional = DATA.replace(" 16 ", " 16.5 ");
    assert!(SimulationData::parse(&fractional).is_err());
}

#[test]
fn simulation_data_rejects_invalid_values() {
    assert!(SimulationData::parse(&DATA.replacen("100", "-1", 1)).is_err());
    assert!(SimulationData::parse(&DATA.replacen("100", "0", 1)).is_ok());
    assert!(SimulationData::parse(&DATA.replace(" 25 ", " 0 ")).is_err());
    assert!(SimulationData::parse(&DATA.replace(" 4 4 ", " 0 4 ")).is_err());
    assert!(SimulationData::parse(&DATA.replace(" 1200 ", " NaN ")).is_err());
}

#[test]
fn simulation_data_checks_declared_counts() {
    let data = SimulationData::parse(&DATA.replace(" 16 9 ", " 15 9 ")).unwrap();
    assert!(data.grid().is_err());
    let data = SimulationData::parse(&DATA.replace(" 16 9 ", " 16 8 ")).unwrap();
    assert!(data.grid().is_err());
}

#[test]
fn simulation_data_from_missing_file_fails() {
    let path = std::env::temp_dir().join("heatfem-does-not-exist").join("data.txt");
    assert!(SimulationData::from_file(path).is_err());
}

#[test]
fn simulation_data_from_file() {
    let dir = std::env::temp_dir().join(format!("heatfem-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("data.txt");
    std::fs::write(&path, DATA).unwrap();
    let data = SimulationData::from_file(&path).unwrap();
    assert_eq!(data, SimulationData::parse(DATA).unwrap());
    std::fs::remove_dir_all(&dir).unwrap();
}
