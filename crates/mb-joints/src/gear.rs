//! Gear coupling between two rotating frames.

use std::any::Any;

use nalgebra::Isometry3;

use crate::base::{JointBase, orbit_ij, orbit_ji, unwrap_angle};
use crate::common::{check_finite, check_nonzero};
use crate::error::JointResult;
use crate::traits::{JointConstraint, JointKind};

/// Meshing gears with pitch radii `radius_i` and `radius_j`.
///
/// `orbit_ji + (radius_i / radius_j) * orbit_ij - c = 0`
///
/// `orbit_ij` is the angle of J's origin around I's z axis, `orbit_ji` the
/// angle of I's origin around J's z axis; `c` is captured at assembly. Both
/// angles are tracked continuously across turns.
#[derive(Debug, Clone, Default)]
pub struct GearJoint {
    base: JointBase,
    pub radius_i: f64,
    pub radius_j: f64,
    reference: f64,
    orbits: (f64, f64),
}

impl GearJoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ratio(&self) -> JointResult<f64> {
        check_finite(self.radius_i, "gear radiusI")?;
        check_nonzero(self.radius_j, "gear radiusJ")?;
        Ok(self.radius_i / self.radius_j)
    }

    /// `(orbit_ij, orbit_ji)` unwrapped against the tracked pair.
    fn orbits_at(&self, rel: &Isometry3<f64>) -> (f64, f64) {
        (
            unwrap_angle(orbit_ij(rel), self.orbits.0),
            unwrap_angle(orbit_ji(rel), self.orbits.1),
        )
    }

    fn coupling_value(&self, rel: &Isometry3<f64>) -> JointResult<f64> {
        let (ij, ji) = self.orbits_at(rel);
        Ok(ji + self.ratio()? * ij)
    }
}

impl JointConstraint for GearJoint {
    fn kind(&self) -> JointKind {
        JointKind::Gear
    }

    fn base(&self) -> &JointBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut JointBase {
        &mut self.base
    }

    fn residuals_at(&self, rel: &Isometry3<f64>) -> JointResult<Vec<f64>> {
        Ok(vec![self.coupling_value(rel)? - self.reference])
    }

    fn initialize(&mut self) -> JointResult<()> {
        let rel = self.base.relative_pose()?;
        self.orbits = (orbit_ij(&rel), orbit_ji(&rel));
        self.reference = self.coupling_value(&rel)?;
        Ok(())
    }

    fn track(&mut self) -> JointResult<()> {
        let rel = self.base.relative_pose()?;
        self.orbits = self.orbits_at(&rel);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JointError;
    use nalgebra::Vector3;

    #[test]
    fn zero_radius_j_is_non_physical() {
        let joint = GearJoint {
            radius_i: 1.0,
            ..GearJoint::new()
        };
        let err = joint.residuals_at(&Isometry3::identity()).unwrap_err();
        assert_eq!(
            err,
            JointError::NonPhysical {
                what: "gear radiusJ"
            }
        );
    }

    #[test]
    fn equal_gears_counter_rotate() {
        let joint = GearJoint {
            radius_i: 1.0,
            radius_j: 1.0,
            ..GearJoint::new()
        };
        // J's centre sits at distance 2 along I's x axis.
        let rest = Isometry3::translation(2.0, 0.0, 0.0);
        let at_rest = joint.residuals_at(&rest).unwrap()[0];

        // Rotating J in place by +a changes orbit_ji by -a, which the ratio-1
        // term does not compensate: the coupling must register the change.
        let turned = Isometry3::new(Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.1));
        let moved = joint.residuals_at(&turned).unwrap()[0];
        assert!((moved - at_rest).abs() > 1e-3);
    }

    #[test]
    fn planet_orbits_more_than_a_turn() {
        use crate::base::Attachment;
        use mb_core::MarkerId;

        let mut joint = GearJoint {
            radius_i: 1.0,
            radius_j: 1.0,
            ..GearJoint::new()
        };
        let (sun, planet) = (MarkerId::from_index(0), MarkerId::from_index(1));
        joint.base.attach(
            "G",
            Attachment {
                marker_i: sun,
                marker_j: planet,
                frame_i: Isometry3::identity(),
                frame_j: Isometry3::translation(2.0, 0.0, 0.0),
            },
        );
        joint.initialize().unwrap();

        // Equal gears: the planet spins twice as fast as it orbits.
        for step in 1..=20 {
            let a = 0.4 * f64::from(step);
            let frame = Isometry3::new(
                Vector3::new(2.0 * a.cos(), 2.0 * a.sin(), 0.0),
                Vector3::new(0.0, 0.0, 2.0 * a),
            );
            joint.move_marker(planet, frame).unwrap();
            let r = joint.residuals().unwrap()[0];
            assert!(r.abs() < 1e-9, "orbit {a}: residual {r}");
        }
    }
}
