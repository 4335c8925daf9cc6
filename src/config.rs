//! Assembly parameters and loading of simulation data files.
use crate::assembly::local::{DEFAULT_AREA_QUADRATURE_POINTS, DEFAULT_EDGE_QUADRATURE_POINTS};
use crate::error::AssemblyError;
use crate::procedural::{rectangular_grid, QuadGrid};
use crate::Real;
use eyre::{eyre, WrapErr};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

/// What to do with an element whose Jacobian is degenerate at some quadrature point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateElementPolicy {
    /// Exclude the element from the global matrix and record a diagnostic.
    #[default]
    Skip,
    /// Abort the whole assembly with the element's error.
    Abort,
}

/// Parameters of a stationary heat-conduction assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatParameters<T> {
    /// Thermal conductivity `k`.
    pub conductivity: T,
    /// Convective heat transfer coefficient `α` of the boundary.
    pub convection_coefficient: T,
    /// Ambient temperature `T_∞` of the boundary condition.
    pub ambient_temperature: T,
    /// Gauss points per dimension for the stiffness integrals.
    #[serde(default = "default_area_quadrature_points")]
    pub area_quadrature_points: usize,
    /// Gauss points for the edge integrals.
    #[serde(default = "default_edge_quadrature_points")]
    pub edge_quadrature_points: usize,
    #[serde(default)]
    pub degenerate_policy: DegenerateElementPolicy,
    /// Compute local matrices and global reductions with rayon.
    #[serde(default)]
    pub parallel: bool,
}

fn default_area_quadrature_points() -> usize {
    DEFAULT_AREA_QUADRATURE_POINTS
}

fn default_edge_quadrature_points() -> usize {
    DEFAULT_EDGE_QUADRATURE_POINTS
}

impl<T: Real> HeatParameters<T> {
    /// Parameters with default quadrature orders, the `Skip` policy and sequential assembly.
    pub fn new(conductivity: T, convection_coefficient: T, ambient_temperature: T) -> Self {
        Self {
            conductivity,
            convection_coefficient,
            ambient_temperature,
            area_quadrature_points: DEFAULT_AREA_QUADRATURE_POINTS,
            edge_quadrature_points: DEFAULT_EDGE_QUADRATURE_POINTS,
            degenerate_policy: DegenerateElementPolicy::default(),
            parallel: false,
        }
    }

    pub fn with_quadrature_points(self, area: usize, edge: usize) -> Self {
        Self {
            area_quadrature_points: area,
            edge_quadrature_points: edge,
            ..self
        }
    }

    pub fn with_degenerate_policy(self, degenerate_policy: DegenerateElementPolicy) -> Self {
        Self {
            degenerate_policy,
            ..self
        }
    }

    pub fn with_parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }

    /// Checks the parameters for caller errors.
    ///
    /// Conductivity and convection coefficient must be positive, the ambient temperature
    /// finite and both quadrature orders non-zero.
    pub fn validate(&self) -> Result<(), AssemblyError> {
        if !(self.conductivity > T::zero()) {
            return Err(AssemblyError::invalid_parameter("conductivity", "must be positive"));
        }
        if !(self.convection_coefficient > T::zero()) {
            return Err(AssemblyError::invalid_parameter(
                "convection_coefficient",
                "must be positive",
            ));
        }
        if !self.ambient_temperature.is_finite() {
            return Err(AssemblyError::invalid_parameter(
                "ambient_temperature",
                "must be finite",
            ));
        }
        if self.area_quadrature_points == 0 {
            return Err(AssemblyError::invalid_parameter(
                "area_quadrature_points",
                "must be positive",
            ));
        }
        if self.edge_quadrature_points == 0 {
            return Err(AssemblyError::invalid_parameter(
                "edge_quadrature_points",
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// Contents of a simulation data file.
///
/// The file holds 14 whitespace-separated values in the order of the fields below. The
/// transient quantities (times, initial temperature, density, specific heat) are carried along
/// but not used by the stationary assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationData {
    pub simulation_time: f64,
    pub simulation_step_time: f64,
    pub conductivity: f64,
    pub convection_coefficient: f64,
    pub ambient_temperature: f64,
    pub initial_temperature: f64,
    pub density: f64,
    pub specific_heat: f64,
    pub num_nodes: usize,
    pub num_elements: usize,
    pub nodes_high: usize,
    pub nodes_wide: usize,
    pub height: f64,
    pub width: f64,
}

fn next_value<'a, V>(tokens: &mut impl Iterator<Item = &'a str>, name: &str) -> eyre::Result<V>
where
    V: FromStr,
    V::Err: std::error::Error + Send + Sync + 'static,
{
    let token = tokens
        .next()
        .ok_or_else(|| eyre!("Missing value for `{name}`"))?;
    token
        .parse()
        .wrap_err_with(|| format!("Failed to parse `{name}` from \"{token}\""))
}

impl SimulationData {
    /// Parses and validates the contents of a simulation data file.
    pub fn parse(data: &str) -> eyre::Result<Self> {
        let mut tokens = data.split_whitespace();
        let t = &mut tokens;
        let simulation_data = Self {
            simulation_time: next_value(t, "simulation_time")?,
            simulation_step_time: next_value(t, "simulation_step_time")?,
            conductivity: next_value(t, "conductivity")?,
            convection_coefficient: next_value(t, "convection_coefficient")?,
            ambient_temperature: next_value(t, "ambient_temperature")?,
            initial_temperature: next_value(t, "initial_temperature")?,
            density: next_value(t, "density")?,
            specific_heat: next_value(t, "specific_heat")?,
            num_nodes: next_value(t, "num_nodes")?,
            num_elements: next_value(t, "num_elements")?,
            nodes_high: next_value(t, "nodes_high")?,
            nodes_wide: next_value(t, "nodes_wide")?,
            height: next_value(t, "height")?,
            width: next_value(t, "width")?,
        };
        simulation_data.validate()?;
        Ok(simulation_data)
    }

    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let data = read_to_string(path)
            .wrap_err_with(|| format!("Failed to read simulation data file {}", path.display()))?;
        Self::parse(&data).wrap_err_with(|| format!("Invalid simulation data in {}", path.display()))
    }

    /// The simulation time may be zero, every other quantity must be positive.
    pub fn validate(&self) -> eyre::Result<()> {
        if !(self.simulation_time >= 0.0) {
            return Err(eyre!("Simulation time cannot be negative"));
        }
        let positive = [
            ("simulation_step_time", self.simulation_step_time),
            ("conductivity", self.conductivity),
            ("convection_coefficient", self.convection_coefficient),
            ("density", self.density),
            ("specific_heat", self.specific_heat),
            ("height", self.height),
            ("width", self.width),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(eyre!("`{name}` must be positive, got {value}"));
            }
        }
        let counts = [
            ("num_nodes", self.num_nodes),
            ("num_elements", self.num_elements),
            ("nodes_high", self.nodes_high),
            ("nodes_wide", self.nodes_wide),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(eyre!("`{name}` must be positive"));
            }
        }
        if !self.ambient_temperature.is_finite() {
            return Err(eyre!("Ambient temperature must be finite"));
        }
        Ok(())
    }

    /// The stationary assembly parameters with default quadrature settings.
    pub fn heat_parameters(&self) -> HeatParameters<f64> {
        HeatParameters::new(
            self.conductivity,
            self.convection_coefficient,
            self.ambient_temperature,
        )
    }

    /// Builds the structured grid described by the file.
    ///
    /// Fails if the declared node and element counts do not match the grid dimensions.
    pub fn grid(&self) -> eyre::Result<QuadGrid<f64>> {
        let grid = rectangular_grid(self.width, self.height, self.nodes_wide, self.nodes_high)?;
        if grid.num_nodes() != self.num_nodes {
            return Err(eyre!(
                "Declared {} nodes, but a {} x {} grid has {}",
                self.num_nodes,
                self.nodes_wide,
                self.nodes_high,
                grid.num_nodes()
            ));
        }
        if grid.elements.len() != self.num_elements {
            return Err(eyre!(
                "Declared {} elements, but a {} x {} grid has {}",
                self.num_elements,
                self.nodes_wide,
                self.nodes_high,
                grid.elements.len()
            ));
        }
        Ok(grid)
    }
}
