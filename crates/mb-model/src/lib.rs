//! mb-model: persisted joint descriptors and their assembly into a system.
//!
//! - `factory`: block tags, empty descriptors and runtime joints per kind
//! - `descriptor`: parse / materialize / store for one joint block
//! - `marker`: marker blocks
//! - `assembler`: markers and joints into a frozen `System`
//! - `document`: whole `Units` / `Markers` / `Joints` documents
//!
//! # Example
//!
//! ```
//! use mb_model::{AsmtDocument, LoadOptions};
//!
//! let text = "Joints\n\tRackPinionJoint\n\t\tName\n\t\t\tJoint1\n\t\tMarkerI\n\t\t\t/M1\n\t\tMarkerJ\n\t\t\t/M2\n";
//! let doc = AsmtDocument::parse(text, LoadOptions::default()).unwrap();
//! assert_eq!(doc.joints[0].name(), "Joint1");
//! assert!(doc.store().contains("\t\tpitchRadius\n\t\t\t0\n"));
//! ```

pub mod assembler;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod factory;
pub mod marker;
pub mod summary;

pub use assembler::Assembler;
pub use descriptor::{JointCommon, JointDescriptor, JointParams};
pub use document::{AsmtDocument, LoadOptions, SkippedJoint, UnsupportedJointPolicy};
pub use error::{ModelError, ModelResult};
pub use marker::MarkerDescriptor;
pub use summary::{DocumentSummary, JointSummary};
