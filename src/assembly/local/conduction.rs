use crate::element::{quad4_shape_derivatives, Quad4Element};
use crate::error::AssemblyError;
use crate::nalgebra::{convert, try_convert, Matrix4};
use crate::quadrature::TensorGauss2d;
use crate::{Real, DETERMINANT_TOLERANCE};

/// Pointwise conduction integrand for the local stiffness entry `(i, j)` at `(ξ, η)`.
///
/// Returns `k (dN_i/dx dN_j/dx + dN_i/dy dN_j/dy) det J`. Fails with
/// [`AssemblyError::DegenerateElement`] if `det J` is below `1e-12` or NaN, which covers
/// collapsed, inverted (clockwise) and non-finite elements.
///
/// # Panics
///
/// Panics if `i` or `j` is not a local node index, i.e. not in `0..4`.
pub fn stiffness_integrand<T: Real>(
    element: &Quad4Element<T>,
    conductivity: T,
    i: usize,
    j: usize,
    xi: T,
    eta: T,
) -> Result<T, AssemblyError> {
    assert!(i < 4 && j < 4, "Local node indices must be in 0..4");
    let jacobian = element.jacobian(xi, eta);
    let det = jacobian.determinant();
    let tol: T = convert(DETERMINANT_TOLERANCE);
    if !(det >= tol) {
        return Err(AssemblyError::DegenerateElement {
            element_index: None,
            determinant: try_convert(det).unwrap_or(f64::NAN),
        });
    }

    let inverse = jacobian.try_inverse()?;
    let reference_gradients = quad4_shape_derivatives(xi, eta);
    let gradients = inverse.physical_gradients(&reference_gradients);

    let dot = gradients.column(i).dot(&gradients.column(j));
    Ok(conductivity * dot * det)
}

/// Integrates the 16 conduction entries of the local stiffness matrix over the reference
/// square with the given rule.
pub fn assemble_element_conduction<T: Real>(
    element: &Quad4Element<T>,
    conductivity: T,
    quadrature: &TensorGauss2d<T>,
) -> Result<Matrix4<T>, AssemblyError> {
    let mut matrix = Matrix4::zeros();
    let (lower, upper) = (-T::one(), T::one());
    for i in 0..4 {
        for j in 0..4 {
            matrix[(i, j)] = quadrature.try_integrate_over(
                |xi, eta| stiffness_integrand(element, conductivity, i, j, xi, eta),
                lower,
                upper,
                lower,
                upper,
            )?;
        }
    }
    Ok(matrix)
}
