//! Kind tags and construction of descriptors and runtime joints.

use mb_joints::{
    DistanceJoint, DistanceKind, GearJoint, JointConstraint, JointKind, LowerPair, LowerPairKind,
    RackPinJoint, ScrewJoint,
};

use crate::descriptor::JointDescriptor;
use crate::error::{ModelError, ModelResult};

/// Block tags as they appear in the `Joints` section.
const TAGS: [(JointKind, &str); 13] = [
    (JointKind::Fixed, "FixedJoint"),
    (JointKind::Revolute, "RevoluteJoint"),
    (JointKind::Cylindrical, "CylindricalJoint"),
    (JointKind::Translational, "TranslationalJoint"),
    (JointKind::Spherical, "SphericalJoint"),
    (JointKind::Planar, "PlanarJoint"),
    (JointKind::PointInLine, "PointInLineJoint"),
    (JointKind::PointInPlane, "PointInPlaneJoint"),
    (JointKind::RackPinion, "RackPinionJoint"),
    (JointKind::Gear, "GearJoint"),
    (JointKind::Screw, "ScrewJoint"),
    (JointKind::SphSph, "SphSphJoint"),
    (JointKind::CylSph, "CylSphJoint"),
];

pub fn tag_of(kind: JointKind) -> &'static str {
    TAGS.iter()
        .find(|(k, _)| *k == kind)
        .map_or("UnknownJoint", |(_, tag)| *tag)
}

/// Kind for a block tag. `line` is only used for the error.
pub fn kind_from_tag(tag: &str, line: usize) -> ModelResult<JointKind> {
    TAGS.iter()
        .find(|(_, t)| *t == tag)
        .map(|(kind, _)| *kind)
        .ok_or_else(|| ModelError::UnsupportedJoint {
            tag: tag.to_string(),
            line,
        })
}

/// Empty descriptor for a kind, with every parameter at its default.
pub fn descriptor(kind: JointKind) -> JointDescriptor {
    JointDescriptor::new(kind)
}

/// Fresh, unattached runtime joint for a kind.
pub fn instantiate_runtime(kind: JointKind) -> Box<dyn JointConstraint> {
    match kind {
        JointKind::Fixed => Box::new(LowerPair::new(LowerPairKind::Fixed)),
        JointKind::Revolute => Box::new(LowerPair::new(LowerPairKind::Revolute)),
        JointKind::Cylindrical => Box::new(LowerPair::new(LowerPairKind::Cylindrical)),
        JointKind::Translational => Box::new(LowerPair::new(LowerPairKind::Translational)),
        JointKind::Spherical => Box::new(LowerPair::new(LowerPairKind::Spherical)),
        JointKind::Planar => Box::new(LowerPair::new(LowerPairKind::Planar)),
        JointKind::PointInLine => Box::new(LowerPair::new(LowerPairKind::PointInLine)),
        JointKind::PointInPlane => Box::new(LowerPair::new(LowerPairKind::PointInPlane)),
        JointKind::RackPinion => Box::new(RackPinJoint::new()),
        JointKind::Gear => Box::new(GearJoint::new()),
        JointKind::Screw => Box::new(ScrewJoint::new()),
        JointKind::SphSph => Box::new(DistanceJoint::new(DistanceKind::SphSph)),
        JointKind::CylSph => Box::new(DistanceJoint::new(DistanceKind::CylSph)),
    }
}

/// Runtime joint for a block tag.
pub fn create(tag: &str) -> ModelResult<Box<dyn JointConstraint>> {
    kind_from_tag(tag, 0).map(instantiate_runtime)
}
