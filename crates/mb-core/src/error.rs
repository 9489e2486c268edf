//! Error shared by every crate of the workspace. Crate errors convert into it.

use thiserror::Error;

pub type MbResult<T> = Result<T, MbError>;

#[derive(Error, Debug)]
pub enum MbError {
    /// A model number (scale factor, joint parameter) is NaN or infinite.
    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// A model number is finite but has no physical meaning, e.g. a zero
    /// length unit or a zero gear radius.
    #[error("Non-physical value for {what}")]
    InvalidArg { what: &'static str },

    /// Structural failure reported by a lower layer (format, system, joint).
    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
