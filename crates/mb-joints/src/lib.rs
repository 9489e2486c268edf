//! mb-joints: runtime constraint objects for multibody systems.
//!
//! Provides the live joints a solver evaluates:
//! - Lower pairs (fixed, revolute, cylindrical, translational, spherical,
//!   planar, point-in-line, point-in-plane)
//! - Couplers (rack-pinion, gear, screw)
//! - Distance joints (sphere-sphere, cylinder-sphere)
//!
//! All joints implement [`JointConstraint`] and are deterministic functions of
//! the pose of marker J relative to marker I.
//!
//! # Example
//!
//! ```
//! use mb_joints::{JointConstraint, RackPinJoint};
//! use nalgebra::{Isometry3, Vector3};
//!
//! let mut joint = RackPinJoint::new();
//! joint.pitch_radius = 0.5;
//!
//! // Pinion turned 0.2 rad, rack moved back by 0.1.
//! let rel = Isometry3::new(Vector3::new(-0.1, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.2));
//! let r = joint.residuals_at(&rel).unwrap();
//! assert!(r[0].abs() < 1e-12);
//! ```

pub mod base;
pub mod common;
pub mod distance;
pub mod error;
pub mod gear;
pub mod jacobian;
pub mod lower_pair;
pub mod rack_pinion;
pub mod screw;
pub mod traits;

// Re-exports
pub use base::{Attachment, JointBase};
pub use distance::{DistanceJoint, DistanceKind};
pub use error::{JointError, JointResult};
pub use gear::GearJoint;
pub use lower_pair::{LowerPair, LowerPairKind};
pub use rack_pinion::RackPinJoint;
pub use screw::ScrewJoint;
pub use traits::{JointConstraint, JointKind};
