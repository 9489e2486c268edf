//! System construction and evaluation errors.

use mb_core::{ConstraintId, MarkerId, MbError};
use mb_joints::JointError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SystemError {
    #[error("Duplicate marker name: {name}")]
    DuplicateMarker { name: String },

    #[error("Unknown marker: {name}")]
    UnknownMarker { name: String },

    #[error("Marker {id} not found")]
    MarkerNotFound { id: MarkerId },

    #[error("Constraint {id} not found")]
    UnknownConstraint { id: ConstraintId },

    #[error("Constraint {id} ('{name}') is not attached to markers")]
    Unattached { id: ConstraintId, name: String },

    #[error("Joint error: {0}")]
    Joint(#[from] JointError),
}

pub type SystemResult<T> = Result<T, SystemError>;

impl From<SystemError> for MbError {
    fn from(e: SystemError) -> Self {
        MbError::Invariant {
            what: e.to_string(),
        }
    }
}
