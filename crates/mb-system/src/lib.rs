//! mb-system: marker table and ordered constraint set.
//!
//! A [`SystemBuilder`] collects named markers and runtime constraints, then
//! freezes into a [`System`] that evaluates stacked residuals and derivative
//! blocks. Marker frames are kept in model units; constraints see them in SI.

pub mod builder;
pub mod error;
pub mod marker;
pub mod system;

pub use builder::SystemBuilder;
pub use error::{SystemError, SystemResult};
pub use marker::{Marker, to_working_frame};
pub use system::System;
