use heatfem_quadrature::univariate::{gauss, try_gauss};
use heatfem_quadrature::{integrate, Error, MAX_GAUSS_POINTS};

use matrixcompare::assert_scalar_eq;

#[test]
fn gauss_rules_satisfy_expected_accuracy() {
    for n in 1..=MAX_GAUSS_POINTS {
        let expected_polynomial_degree = 2 * n - 1;
        let rule = gauss(n);

        assert_eq!(rule.0.len(), n);
        assert!(rule.0.iter().all(|&w| w > 0.0));

        // Monomials with large exponents lose accuracy to cancellation, so we stop at 30
        for alpha in 0..=expected_polynomial_degree.min(30) as i32 {
            let monomial_integral = (1.0 - (-1.0f64).powi(alpha + 1)) / (alpha as f64 + 1.0);
            let estimated_integral = integrate(&rule, |x| x[0].powi(alpha));

            assert_scalar_eq!(estimated_integral, monomial_integral, comp = abs, tol = 1e-13);
        }
    }
}

#[test]
fn gauss_points_are_ascending_and_symmetric() {
    for n in 1..=12 {
        let (weights, points) = gauss(n);
        for pair in points.windows(2) {
            assert!(pair[0][0] < pair[1][0]);
        }
        for i in 0..n {
            assert_scalar_eq!(points[i][0], -points[n - i - 1][0], comp = abs, tol = 1e-15);
            assert_scalar_eq!(weights[i], weights[n - i - 1], comp = abs, tol = 1e-15);
        }
    }
}

#[test]
fn gauss_two_point_rule_matches_closed_form() {
    let (weights, points) = gauss(2);
    let a = 1.0 / 3.0f64.sqrt();
    assert_scalar_eq!(points[0][0], -a, comp = abs, tol = 1e-15);
    assert_scalar_eq!(points[1][0], a, comp = abs, tol = 1e-15);
    assert_scalar_eq!(weights[0], 1.0, comp = abs, tol = 1e-15);
    assert_scalar_eq!(weights[1], 1.0, comp = abs, tol = 1e-15);
}

#[test]
fn gauss_four_point_rule_matches_closed_form() {
    let (weights, points) = gauss(4);
    let inner = (3.0 / 7.0 - 2.0 / 7.0 * (6.0f64 / 5.0).sqrt()).sqrt();
    let outer = (3.0 / 7.0 + 2.0 / 7.0 * (6.0f64 / 5.0).sqrt()).sqrt();
    let w_inner = (18.0 + 30.0f64.sqrt()) / 36.0;
    let w_outer = (18.0 - 30.0f64.sqrt()) / 36.0;

    assert_scalar_eq!(points[0][0], -outer, comp = abs, tol = 1e-14);
    assert_scalar_eq!(points[1][0], -inner, comp = abs, tol = 1e-14);
    assert_scalar_eq!(points[2][0], inner, comp = abs, tol = 1e-14);
    assert_scalar_eq!(points[3][0], outer, comp = abs, tol = 1e-14);
    assert_scalar_eq!(weights[0], w_outer, comp = abs, tol = 1e-14);
    assert_scalar_eq!(weights[1], w_inner, comp = abs, tol = 1e-14);
}

#[test]
fn unsupported_orders_are_rejected() {
    assert_eq!(try_gauss(0), Err(Error::UnsupportedOrder { order: 0 }));
    assert_eq!(
        try_gauss(MAX_GAUSS_POINTS + 1),
        Err(Error::UnsupportedOrder {
            order: MAX_GAUSS_POINTS + 1
        })
    );
}

#[test]
#[should_panic]
fn gauss_panics_on_zero_points() {
    gauss(0);
}
