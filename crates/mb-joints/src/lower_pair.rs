//! Joints built purely from coincidence and alignment conditions.
//!
//! All equations are read off the relative pose of J in I:
//! - translation components `x`, `y`, `z` of J's origin in I's axes
//! - axis dot products `zJ·xI`, `zJ·yI`, `yJ·xI` (entries of the relative
//!   rotation matrix)
//!
//! Dot products vanish on two branches: `zJ·xI = zJ·yI = 0` also holds with
//! `zJ` reversed, and `yJ·xI = 0` also holds with J turned half a turn about z.
//! `initialize` rejects an assembly pose on the reversed branch.

use std::any::Any;

use nalgebra::Isometry3;

use crate::base::JointBase;
use crate::error::{JointError, JointResult};
use crate::traits::{JointConstraint, JointKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LowerPairKind {
    Fixed,
    Revolute,
    Cylindrical,
    Translational,
    Spherical,
    Planar,
    PointInLine,
    PointInPlane,
}

impl From<LowerPairKind> for JointKind {
    fn from(kind: LowerPairKind) -> Self {
        match kind {
            LowerPairKind::Fixed => JointKind::Fixed,
            LowerPairKind::Revolute => JointKind::Revolute,
            LowerPairKind::Cylindrical => JointKind::Cylindrical,
            LowerPairKind::Translational => JointKind::Translational,
            LowerPairKind::Spherical => JointKind::Spherical,
            LowerPairKind::Planar => JointKind::Planar,
            LowerPairKind::PointInLine => JointKind::PointInLine,
            LowerPairKind::PointInPlane => JointKind::PointInPlane,
        }
    }
}

/// Fixed, revolute, sliding, spherical and point-on-feature joints.
#[derive(Debug, Clone)]
pub struct LowerPair {
    kind: LowerPairKind,
    base: JointBase,
}

impl LowerPair {
    pub fn new(kind: LowerPairKind) -> Self {
        Self {
            kind,
            base: JointBase::default(),
        }
    }

    pub fn pair_kind(&self) -> LowerPairKind {
        self.kind
    }

    /// Whether the residuals hold the z axes parallel.
    fn aligns_z(&self) -> bool {
        matches!(
            self.kind,
            LowerPairKind::Fixed
                | LowerPairKind::Revolute
                | LowerPairKind::Cylindrical
                | LowerPairKind::Translational
                | LowerPairKind::Planar
        )
    }

    /// Whether the residuals lock rotation about z.
    fn locks_spin(&self) -> bool {
        matches!(self.kind, LowerPairKind::Fixed | LowerPairKind::Translational)
    }
}

impl JointConstraint for LowerPair {
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
        let t = rel.translation.vector;
        let rot = rel.rotation.to_rotation_matrix();
        let r = rot.matrix();
        let (zj_xi, zj_yi, yj_xi) = (r[(0, 2)], r[(1, 2)], r[(0, 1)]);

        let eqs = match self.kind {
            LowerPairKind::Fixed => vec![t.x, t.y, t.z, zj_xi, zj_yi, yj_xi],
            LowerPairKind::Revolute => vec![t.x, t.y, t.z, zj_xi, zj_yi],
            LowerPairKind::Cylindrical => vec![t.x, t.y, zj_xi, zj_yi],
            LowerPairKind::Translational => vec![t.x, t.y, zj_xi, zj_yi, yj_xi],
            LowerPairKind::Spherical => vec![t.x, t.y, t.z],
            LowerPairKind::Planar => vec![t.z, zj_xi, zj_yi],
            LowerPairKind::PointInLine => vec![t.x, t.y],
            LowerPairKind::PointInPlane => vec![t.z],
        };
        Ok(eqs)
    }

    fn initialize(&mut self) -> JointResult<()> {
        let rel = self.base.relative_pose()?;
        let rot = rel.rotation.to_rotation_matrix();
        let r = rot.matrix();
        let flipped = if self.aligns_z() && r[(2, 2)] <= 0.0 {
            Some("z")
        } else if self.locks_spin() && r[(0, 0)] <= 0.0 {
            Some("x")
        } else {
            None
        };
        match flipped {
            Some(axis) => Err(JointError::FlippedAssembly {
                name: self.base.name.clone(),
                axis,
            }),
            None => Ok(()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
