use mb_asmt::AsmtError;
use mb_core::MbError;
use mb_joints::{JointError, JointKind};
use mb_system::SystemError;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("ASMT error: {0}")]
    Asmt(#[from] AsmtError),

    #[error("Unsupported joint type '{tag}' at line {line}")]
    UnsupportedJoint { tag: String, line: usize },

    #[error("Structural invariant violated: {what}")]
    Structural { what: String },

    #[error("In {kind} block at line {line}: {source}")]
    InJoint {
        kind: JointKind,
        line: usize,
        #[source]
        source: Box<ModelError>,
    },

    #[error("While materializing joint '{name}': {source}")]
    Materialize {
        name: String,
        #[source]
        source: Box<ModelError>,
    },

    #[error("System error: {0}")]
    System(#[from] SystemError),

    #[error("Joint error: {0}")]
    Joint(#[from] JointError),

    #[error("Invalid model: {0}")]
    Core(#[from] MbError),
}

impl ModelError {
    pub(crate) fn in_joint(kind: JointKind, line: usize, source: impl Into<ModelError>) -> Self {
        ModelError::InJoint {
            kind,
            line,
            source: Box::new(source.into()),
        }
    }

    /// Innermost error, skipping joint context wrappers.
    pub fn root(&self) -> &ModelError {
        match self {
            ModelError::InJoint { source, .. } | ModelError::Materialize { source, .. } => {
                source.root()
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mb_asmt::FormatError;

    #[test]
    fn context_wraps_and_unwraps() {
        let inner = AsmtError::Format {
            line: 9,
            source: FormatError::new("a finite number", "abc"),
        };
        let err = ModelError::in_joint(JointKind::RackPinion, 2, inner.clone());
        assert!(err.to_string().contains("line 2"));
        assert!(matches!(err.root(), ModelError::Asmt(e) if *e == inner));
    }
}
