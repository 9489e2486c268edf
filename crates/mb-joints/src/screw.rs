//! Screw (helical) coupling.

use std::any::Any;
use std::f64::consts::TAU;

use nalgebra::Isometry3;

use crate::base::{JointBase, theta_z, unwrap_angle};
use crate::common::check_finite;
use crate::error::JointResult;
use crate::traits::{JointConstraint, JointKind};

/// Advance along I's z axis per turn about it equals `pitch`:
///
/// `2π·z - pitch·θz - c = 0`
///
/// `θz` accumulates over turns, unwrapped against the last tracked angle.
#[derive(Debug, Clone, Default)]
pub struct ScrewJoint {
    base: JointBase,
    /// Axial advance per full revolution.
    pub pitch: f64,
    reference: f64,
    angle: f64,
}

impl ScrewJoint {
    pub fn new() -> Self {
        Self::default()
    }

    fn coupling_value(&self, rel: &Isometry3<f64>) -> f64 {
        TAU * rel.translation.vector.z - self.pitch * unwrap_angle(theta_z(rel), self.angle)
    }

    /// Turn angle accumulated since assembly, in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

impl JointConstraint for ScrewJoint {
    fn kind(&self) -> JointKind {
        JointKind::Screw
    }

    fn base(&self) -> &JointBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut JointBase {
        &mut self.base
    }

    fn residuals_at(&self, rel: &Isometry3<f64>) -> JointResult<Vec<f64>> {
        check_finite(self.pitch, "screw pitch")?;
        Ok(vec![self.coupling_value(rel) - self.reference])
    }

    fn initialize(&mut self) -> JointResult<()> {
        check_finite(self.pitch, "screw pitch")?;
        let rel = self.base.relative_pose()?;
        self.angle = theta_z(&rel);
        self.reference = self.coupling_value(&rel);
        Ok(())
    }

    fn track(&mut self) -> JointResult<()> {
        let rel = self.base.relative_pose()?;
        self.angle = unwrap_angle(theta_z(&rel), self.angle);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
