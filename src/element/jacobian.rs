use crate::error::AssemblyError;
use crate::nalgebra::{convert, try_convert, Matrix2, Matrix2x4};
use crate::{Real, DETERMINANT_TOLERANCE};

/// The Jacobian of the map from reference coordinates `(ξ, η)` to physical coordinates
/// `(x, y)`.
///
/// The layout is
///
/// ```text
/// J = [ dx/dξ  dx/dη ]
///     [ dy/dξ  dy/dη ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jacobian<T: Real>(Matrix2<T>);

impl<T: Real> Jacobian<T> {
    pub fn from_matrix(matrix: Matrix2<T>) -> Self {
        Self(matrix)
    }

    #[rustfmt::skip]
    pub fn new(dx_dxi: T, dx_deta: T, dy_dxi: T, dy_deta: T) -> Self {
        Self(Matrix2::new(
            dx_dxi, dx_deta,
            dy_dxi, dy_deta,
        ))
    }

    pub fn as_matrix(&self) -> &Matrix2<T> {
        &self.0
    }

    pub fn dx_dxi(&self) -> T {
        self.0[(0, 0)]
    }

    pub fn dx_deta(&self) -> T {
        self.0[(0, 1)]
    }

    pub fn dy_dxi(&self) -> T {
        self.0[(1, 0)]
    }

    pub fn dy_deta(&self) -> T {
        self.0[(1, 1)]
    }

    /// The local area scaling factor `J00 * J11 - J01 * J10`.
    pub fn determinant(&self) -> T {
        self.dx_dxi() * self.dy_deta() - self.dx_deta() * self.dy_dxi()
    }

    /// Inverts the Jacobian.
    ///
    /// Fails with [`AssemblyError::DegenerateElement`] if `|det J| < 1e-12` or `det J` is NaN.
    pub fn try_inverse(&self) -> Result<InverseJacobian<T>, AssemblyError> {
        let det = self.determinant();
        let tol: T = convert(DETERMINANT_TOLERANCE);
        if !(det.abs() >= tol) {
            return Err(AssemblyError::DegenerateElement {
                element_index: None,
                determinant: try_convert(det).unwrap_or(f64::NAN),
            });
        }

        #[rustfmt::skip]
        let inverse = Matrix2::new(
             self.dy_deta() / det, -self.dx_deta() / det,
            -self.dy_dxi() / det,   self.dx_dxi() / det,
        );
        Ok(InverseJacobian(inverse))
    }
}

/// The inverse `J⁻¹` of a [`Jacobian`], whose entries are `dξ/dx, dξ/dy, dη/dx, dη/dy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseJacobian<T: Real>(Matrix2<T>);

impl<T: Real> InverseJacobian<T> {
    pub fn as_matrix(&self) -> &Matrix2<T> {
        &self.0
    }

    pub fn dxi_dx(&self) -> T {
        self.0[(0, 0)]
    }

    pub fn dxi_dy(&self) -> T {
        self.0[(0, 1)]
    }

    pub fn deta_dx(&self) -> T {
        self.0[(1, 0)]
    }

    pub fn deta_dy(&self) -> T {
        self.0[(1, 1)]
    }

    /// Transforms shape function gradients from reference to physical coordinates.
    ///
    /// Column `k` of `reference_gradients` holds `[dN_k/dξ, dN_k/dη]`. By the chain rule
    ///
    /// ```text
    /// dN/dx = dN/dξ · dξ/dx + dN/dη · dη/dx = invJ[0][0] · dN/dξ + invJ[1][0] · dN/dη
    /// dN/dy = dN/dξ · dξ/dy + dN/dη · dη/dy = invJ[0][1] · dN/dξ + invJ[1][1] · dN/dη
    /// ```
    ///
    /// i.e. the physical gradients are `J⁻ᵀ G`. Column `k` of the result is `[dN_k/dx, dN_k/dy]`.
    pub fn physical_gradients(&self, reference_gradients: &Matrix2x4<T>) -> Matrix2x4<T> {
        self.0.transpose() * reference_gradients
    }
}
