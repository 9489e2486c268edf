//! Arena handles for the assembled system.
//!
//! Markers and constraints live in separate arenas, so their handles are
//! distinct types: a marker handle cannot index the constraint table.

use core::fmt;
use core::num::NonZeroU32;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Handle for the 0-based arena slot `index`.
            pub fn from_index(index: u32) -> Self {
                match NonZeroU32::new(index.wrapping_add(1)) {
                    Some(raw) => Self(raw),
                    None => panic!("arena index {index} overflows {}", stringify!($name)),
                }
            }

            pub fn index(self) -> u32 {
                self.0.get() - 1
            }

            /// Arena slot as `usize`, for indexing vectors.
            pub fn slot(self) -> usize {
                self.index() as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.index())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.index())
            }
        }
    };
}

arena_id!(
    /// Slot of a marker frame, in the order markers were added.
    MarkerId,
    "marker#"
);

arena_id!(
    /// Slot of a runtime joint. Residual rows are laid out in this order.
    ConstraintId,
    "constraint#"
);
