//! mb-core: stable foundation for the multibody joint workspace.
//!
//! Contains:
//! - units (uom SI types + the model `Units` context)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact arena handles for markers and constraints)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{MbError, MbResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
