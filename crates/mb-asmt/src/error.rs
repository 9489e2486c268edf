//! Error types for ASMT decoding.

use mb_core::MbError;
use thiserror::Error;

/// A single value line that could not be decoded.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("expected {what}, found {text:?}")]
pub struct FormatError {
    pub what: &'static str,
    pub text: String,
}

impl FormatError {
    pub fn new(what: &'static str, text: impl Into<String>) -> Self {
        Self {
            what,
            text: text.into(),
        }
    }
}

/// Errors raised while walking a line sequence.
///
/// Line numbers are 1-based positions in the text the cursor was built from.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AsmtError {
    #[error("Format error at line {line}: {source}")]
    Format {
        line: usize,
        #[source]
        source: FormatError,
    },

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("Missing keyword at line {line}: expected {expected:?}, found {found:?}")]
    MissingKeyword {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("Unexpected line {line}: {text:?}")]
    UnexpectedLine { line: usize, text: String },
}

pub type AsmtResult<T> = Result<T, AsmtError>;

impl AsmtError {
    /// Line the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            AsmtError::Format { line, .. }
            | AsmtError::MissingKeyword { line, .. }
            | AsmtError::UnexpectedLine { line, .. } => Some(*line),
            AsmtError::UnexpectedEnd { .. } => None,
        }
    }
}

impl From<AsmtError> for MbError {
    fn from(e: AsmtError) -> Self {
        MbError::Invariant {
            what: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_carries_line() {
        let err = AsmtError::Format {
            line: 7,
            source: FormatError::new("a number", "abc"),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("abc"));
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn unexpected_end_has_no_line() {
        let err = AsmtError::UnexpectedEnd { expected: "Name" };
        assert_eq!(err.line(), None);
    }
}
