//! Residual acceptance and finiteness checks.

use crate::MbError;

pub type Real = f64;

/// When a constraint residual counts as satisfied.
///
/// Residuals are evaluated in SI working units, so `residual` is metres for
/// positional equations and radians (or unit dot products) for angular ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub residual: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { residual: 1e-12 }
    }
}

impl Tolerances {
    /// NaN never satisfies.
    pub fn satisfies(self, residual: Real) -> bool {
        residual.abs() <= self.residual
    }

    /// Every entry of a stacked residual vector passes.
    pub fn all_satisfied<'a>(self, residuals: impl IntoIterator<Item = &'a Real>) -> bool {
        residuals.into_iter().all(|r| self.satisfies(*r))
    }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, MbError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(MbError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residual_bound_is_inclusive() {
        let tol = Tolerances { residual: 1e-9 };
        assert!(tol.satisfies(1e-9));
        assert!(tol.satisfies(-5e-10));
        assert!(!tol.satisfies(2e-9));
        assert!(!tol.satisfies(Real::NAN));
        assert!(tol.all_satisfied(&[0.0, 1e-10]));
        assert!(!tol.all_satisfied(&[0.0, 1e-3]));
    }

    #[test]
    fn ensure_finite_names_the_value() {
        let err = ensure_finite(Real::INFINITY, "pitch radius").unwrap_err();
        assert!(err.to_string().contains("pitch radius"));
    }
}
