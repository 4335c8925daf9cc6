//! Error types for element and global assembly.
use std::fmt;
use std::fmt::{Display, Formatter};

pub use heatfem_quadrature::Error as QuadratureError;

/// Errors and diagnostics produced during assembly.
///
/// `DegenerateElement` and `InvalidGlobalIndex` are local to a single element or matrix cell
/// and are usually collected as diagnostics, while `UnsupportedQuadratureOrder` and
/// `InvalidParameter` abort the whole operation before any work is done.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AssemblyError {
    /// The Jacobian determinant at an evaluation point is (nearly) zero or negative.
    ///
    /// The element index is not known at the geometry level and is attached by the assembler.
    DegenerateElement {
        element_index: Option<usize>,
        determinant: f64,
    },
    /// A local-to-global index is not smaller than the number of nodes.
    InvalidGlobalIndex {
        element_index: usize,
        global_index: usize,
        num_nodes: usize,
    },
    /// No quadrature rule with the requested number of points is available.
    UnsupportedQuadratureOrder { order: usize },
    /// A caller-provided parameter is out of range.
    InvalidParameter { name: &'static str, reason: String },
}

impl AssemblyError {
    /// Attaches the index of the element being assembled to a geometry error.
    pub fn in_element(self, index: usize) -> Self {
        match self {
            Self::DegenerateElement {
                element_index: None,
                determinant,
            } => Self::DegenerateElement {
                element_index: Some(index),
                determinant,
            },
            other => other,
        }
    }

    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl Display for AssemblyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateElement {
                element_index: Some(index),
                determinant,
            } => write!(
                f,
                "Element {index} is degenerate or inverted (Jacobian determinant {determinant:e})"
            ),
            Self::DegenerateElement {
                element_index: None,
                determinant,
            } => write!(
                f,
                "Degenerate or inverted element (Jacobian determinant {determinant:e})"
            ),
            Self::InvalidGlobalIndex {
                element_index,
                global_index,
                num_nodes,
            } => write!(
                f,
                "Element {element_index} references global index {global_index}, \
                 but there are only {num_nodes} nodes"
            ),
            Self::UnsupportedQuadratureOrder { order } => {
                write!(f, "Unsupported quadrature order {order}")
            }
            Self::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter `{name}`: {reason}")
            }
        }
    }
}

impl std::error::Error for AssemblyError {}

impl From<QuadratureError> for AssemblyError {
    fn from(err: QuadratureError) -> Self {
        match err {
            QuadratureError::UnsupportedOrder { order } => Self::UnsupportedQuadratureOrder { order },
        }
    }
}
