//! Error types for runtime constraint evaluation.

use crate::traits::JointKind;
use mb_core::error::MbError;
use thiserror::Error;

/// Errors that can occur while evaluating or configuring a joint.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JointError {
    #[error("Joint '{name}' is not attached to markers")]
    NotAttached { name: String },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Joint '{name}' is assembled on the flipped branch: {axis} axes point apart")]
    FlippedAssembly { name: String, axis: &'static str },

    #[error("Joint kind mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: JointKind, found: JointKind },
}

pub type JointResult<T> = Result<T, JointError>;

impl From<JointError> for MbError {
    fn from(e: JointError) -> Self {
        match e {
            JointError::NonPhysical { what } => MbError::InvalidArg { what },
            other => MbError::Invariant {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = JointError::NonPhysical { what: "radiusJ" };
        assert!(err.to_string().contains("radiusJ"));
    }

    #[test]
    fn error_conversion() {
        let err = JointError::NotAttached {
            name: "J1".to_string(),
        };
        let mb: MbError = err.into();
        assert!(matches!(mb, MbError::Invariant { .. }));
    }
}
