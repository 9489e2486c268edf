//! mb-asmt: line-oriented ASMT text codec.
//!
//! Provides:
//! - `read`: stateless decoders for value lines (`read_double`, rows, strings)
//! - `cursor`: `LineCursor`, the explicit shared cursor every parse step advances
//! - `write`: `AsmtWriter`, the indentation-level sink used when storing
//!
//! The crate knows nothing about joints; it only turns lines into primitives
//! and back.
//!
//! # Example
//!
//! ```
//! use mb_asmt::{AsmtWriter, LineCursor};
//!
//! let mut cursor = LineCursor::new("\t\tpitchRadius\n\t\t\t12.5\n");
//! assert_eq!(cursor.read_optional_double("pitchRadius").unwrap(), Some(12.5));
//! assert!(cursor.is_exhausted());
//!
//! let mut w = AsmtWriter::new();
//! w.store_keyword_double(2, "pitchRadius", 12.5);
//! assert_eq!(w.as_str(), "\t\tpitchRadius\n\t\t\t12.5\n");
//! ```

pub mod cursor;
pub mod error;
pub mod read;
pub mod write;

pub use cursor::{Checkpoint, LineCursor};
pub use error::{AsmtError, AsmtResult, FormatError};
pub use read::{read_double, read_row_of_doubles, read_string};
pub use write::AsmtWriter;
