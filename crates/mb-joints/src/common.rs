//! Common utilities for joint calculations.

use crate::error::{JointError, JointResult};
use mb_core::numeric::ensure_finite;

/// Smallest radius accepted as a divisor in gear ratios.
pub const EPSILON_RADIUS: f64 = 1e-12;

/// Ensure a value is finite, returning JointError if not.
pub fn check_finite(value: f64, what: &'static str) -> JointResult<()> {
    ensure_finite(value, what).map_err(|_| JointError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a value can be used as a divisor.
pub fn check_nonzero(value: f64, what: &'static str) -> JointResult<()> {
    check_finite(value, what)?;
    if value.abs() < EPSILON_RADIUS {
        return Err(JointError::NonPhysical { what });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_check_nonzero() {
        assert!(check_nonzero(0.5, "r").is_ok());
        assert!(check_nonzero(-0.5, "r").is_ok());
        assert!(check_nonzero(0.0, "r").is_err());
    }
}
