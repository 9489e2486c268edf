//! Compound joints that hold a fixed distance between features.

use std::any::Any;

use nalgebra::Isometry3;

use crate::base::JointBase;
use crate::common::check_finite;
use crate::error::JointResult;
use crate::traits::{JointConstraint, JointKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceKind {
    /// Origin of J stays `distance` away from origin of I.
    SphSph,
    /// Origin of J stays `distance` away from I's z axis.
    CylSph,
}

impl From<DistanceKind> for JointKind {
    fn from(kind: DistanceKind) -> Self {
        match kind {
            DistanceKind::SphSph => JointKind::SphSph,
            DistanceKind::CylSph => JointKind::CylSph,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DistanceJoint {
    kind: DistanceKind,
    base: JointBase,
    pub distance: f64,
}

impl DistanceJoint {
    pub fn new(kind: DistanceKind) -> Self {
        Self {
            kind,
            base: JointBase::default(),
            distance: 0.0,
        }
    }

    pub fn distance_kind(&self) -> DistanceKind {
        self.kind
    }
}

impl JointConstraint for DistanceJoint {
    fn kind(&self) -> JointKind {
        self.kind.into()
    }

    fn base(&self) -> &JointBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut JointBase {
        &mut self.base
    }

    fn residuals_at(&self, rel: &Isometry3<f64>) -> JointResult<Vec<f64>> {
        check_finite(self.distance, "distanceIJ")?;
        let t = rel.translation.vector;
        let measured = match self.kind {
            DistanceKind::SphSph => t.norm(),
            DistanceKind::CylSph => t.x.hypot(t.y),
        };
        Ok(vec![measured - self.distance])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
