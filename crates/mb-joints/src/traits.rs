//! Core trait for runtime constraint objects.

use std::any::Any;
use std::fmt;

use mb_core::MarkerId;
use nalgebra::{DMatrix, DVector, Isometry3};

use crate::base::JointBase;
use crate::error::JointResult;
use crate::jacobian::{FD_EPSILON, TWIST_DIM, central_difference_jacobian, perturb};

/// Every joint kind the solver knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JointKind {
    Fixed,
    Revolute,
    Cylindrical,
    Translational,
    Spherical,
    Planar,
    PointInLine,
    PointInPlane,
    RackPinion,
    Gear,
    Screw,
    SphSph,
    CylSph,
}

impl JointKind {
    pub const ALL: [JointKind; 13] = [
        JointKind::Fixed,
        JointKind::Revolute,
        JointKind::Cylindrical,
        JointKind::Translational,
        JointKind::Spherical,
        JointKind::Planar,
        JointKind::PointInLine,
        JointKind::PointInPlane,
        JointKind::RackPinion,
        JointKind::Gear,
        JointKind::Screw,
        JointKind::SphSph,
        JointKind::CylSph,
    ];

    /// Number of scalar constraint equations (degrees of freedom removed).
    pub fn equation_count(self) -> usize {
        match self {
            JointKind::Fixed => 6,
            JointKind::Revolute | JointKind::Translational => 5,
            JointKind::Cylindrical => 4,
            JointKind::Spherical | JointKind::Planar => 3,
            JointKind::PointInLine => 2,
            JointKind::PointInPlane
            | JointKind::RackPinion
            | JointKind::Gear
            | JointKind::Screw
            | JointKind::SphSph
            | JointKind::CylSph => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            JointKind::Fixed => "fixed",
            JointKind::Revolute => "revolute",
            JointKind::Cylindrical => "cylindrical",
            JointKind::Translational => "translational",
            JointKind::Spherical => "spherical",
            JointKind::Planar => "planar",
            JointKind::PointInLine => "point-in-line",
            JointKind::PointInPlane => "point-in-plane",
            JointKind::RackPinion => "rack-pinion",
            JointKind::Gear => "gear",
            JointKind::Screw => "screw",
            JointKind::SphSph => "sphere-sphere",
            JointKind::CylSph => "cylinder-sphere",
        }
    }
}

impl fmt::Display for JointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A live joint inside an assembled system.
///
/// Equations are expressed on the pose of marker J relative to marker I,
/// so a joint is satisfied when every residual is zero. Implementations are
/// plain data plus pure functions of that pose.
pub trait JointConstraint: Send + Sync + fmt::Debug {
    fn kind(&self) -> JointKind;

    fn base(&self) -> &JointBase;

    fn base_mut(&mut self) -> &mut JointBase;

    /// Joint name for debugging and identification.
    fn name(&self) -> &str {
        &self.base().name
    }

    fn equation_count(&self) -> usize {
        self.kind().equation_count()
    }

    /// Constraint residuals for a given relative pose of J in I.
    ///
    /// Must return exactly `equation_count()` values.
    fn residuals_at(&self, rel: &Isometry3<f64>) -> JointResult<Vec<f64>>;

    /// Called once when the owning system is frozen, with markers at their
    /// assembly pose. Joints that measure against a reference value capture it
    /// here. Default: nothing to capture.
    fn initialize(&mut self) -> JointResult<()> {
        Ok(())
    }

    /// Called after an attached marker moved. Couplers advance their
    /// continuous angles here. Default: nothing to track.
    fn track(&mut self) -> JointResult<()> {
        Ok(())
    }

    /// Move an attached marker to `frame` (SI) and let the joint follow it.
    ///
    /// Returns whether this joint uses the marker. Couplers stay continuous as
    /// long as each move turns them by less than half a revolution.
    fn move_marker(&mut self, marker: MarkerId, frame: Isometry3<f64>) -> JointResult<bool> {
        let used = self.base_mut().update_marker_frame(marker, frame);
        if used {
            self.track()?;
        }
        Ok(used)
    }

    /// Residuals at the current attachment pose.
    fn residuals(&self) -> JointResult<Vec<f64>> {
        let rel = self.base().relative_pose()?;
        self.residuals_at(&rel)
    }

    /// Derivative rows of the residuals with respect to a twist of the J frame
    /// (translation then rotation, in J's local axes).
    ///
    /// Default: central finite differences.
    fn jacobian(&self) -> JointResult<DMatrix<f64>> {
        let rel = self.base().relative_pose()?;
        central_difference_jacobian(
            &DVector::zeros(TWIST_DIM),
            |twist| {
                let r = self.residuals_at(&perturb(&rel, twist))?;
                Ok(DVector::from_vec(r))
            },
            FD_EPSILON,
        )
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn JointConstraint {
    /// Typed access to a concrete runtime joint.
    pub fn downcast_ref<T: JointConstraint + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Typed mutable access to a concrete runtime joint.
    pub fn downcast_mut<T: JointConstraint + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
