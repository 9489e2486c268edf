//! Finite difference derivatives of joint residuals.

use crate::error::JointResult;
use nalgebra::{DMatrix, DVector, Isometry3, Vector3};

/// Twist components: translation x, y, z then rotation x, y, z.
pub const TWIST_DIM: usize = 6;

/// Step used for residual derivatives.
pub const FD_EPSILON: f64 = 1e-7;

/// Apply a small twist to `rel`, expressed in the J frame's own axes.
pub fn perturb(rel: &Isometry3<f64>, twist: &DVector<f64>) -> Isometry3<f64> {
    let delta = Isometry3::new(
        Vector3::new(twist[0], twist[1], twist[2]),
        Vector3::new(twist[3], twist[4], twist[5]),
    );
    rel * delta
}

/// Compute Jacobian using central finite differences.
///
/// For each column j, perturbs x[j] both ways and computes (f(x+e) - f(x-e)) / 2e.
pub fn central_difference_jacobian<F>(
    x: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> JointResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> JointResult<DVector<f64>>,
{
    let n = x.len();
    let m = f(x)?.len();

    let mut jac = DMatrix::zeros(m, n);

    for j in 0..n {
        let dx = epsilon * x[j].abs().max(1.0);

        let mut x_plus = x.clone();
        x_plus[j] += dx;
        let f_plus = f(&x_plus)?;

        let mut x_minus = x.clone();
        x_minus[j] -= dx;
        let f_minus = f(&x_minus)?;

        let df = (f_plus - f_minus) / (2.0 * dx);
        jac.set_column(j, &df);
    }

    Ok(jac)
}
