//! Rack-and-pinion coupling.

use std::any::Any;

use nalgebra::Isometry3;

use crate::base::{JointBase, theta_z, unwrap_angle};
use crate::common::check_finite;
use crate::error::JointResult;
use crate::traits::{JointConstraint, JointKind};

/// Couples translation of the rack (J's origin along I's x axis) to rotation
/// of the pinion (J about I's z axis):
///
/// `x + pitch_radius * θz - c = 0`
///
/// where `c` is the value at the assembly pose, captured by `initialize`.
/// `θz` is continuous: it is unwrapped against the last tracked angle, so the
/// rack keeps moving after the pinion passes half a turn.
#[derive(Debug, Clone, Default)]
pub struct RackPinJoint {
    base: JointBase,
    /// Pitch radius of the pinion, in the model's working length units.
    pub pitch_radius: f64,
    reference: f64,
    angle: f64,
}

impl RackPinJoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constraint function value before the reference is subtracted.
    pub fn coupling_value(&self, rel: &Isometry3<f64>) -> f64 {
        rel.translation.vector.x + self.pitch_radius * unwrap_angle(theta_z(rel), self.angle)
    }

    pub fn reference(&self) -> f64 {
        self.reference
    }

    /// Pinion angle accumulated since assembly, in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

impl JointConstraint for RackPinJoint {
    fn kind(&self) -> JointKind {
        JointKind::RackPinion
    }

    fn base(&self) -> &JointBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut JointBase {
        &mut self.base
    }

    fn residuals_at(&self, rel: &Isometry3<f64>) -> JointResult<Vec<f64>> {
        check_finite(self.pitch_radius, "pitch radius")?;
        Ok(vec![self.coupling_value(rel) - self.reference])
    }

    fn initialize(&mut self) -> JointResult<()> {
        check_finite(self.pitch_radius, "pitch radius")?;
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
