//! State shared by every runtime joint: identity and attachment frames.

use std::f64::consts::{PI, TAU};

use mb_core::MarkerId;
use nalgebra::Isometry3;

use crate::error::{JointError, JointResult};

/// The two marker frames a joint connects, in SI working units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attachment {
    pub marker_i: MarkerId,
    pub marker_j: MarkerId,
    pub frame_i: Isometry3<f64>,
    pub frame_j: Isometry3<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointBase {
    pub name: String,
    attachment: Option<Attachment>,
}

impl JointBase {
    pub fn attach(&mut self, name: impl Into<String>, attachment: Attachment) {
        self.name = name.into();
        self.attachment = Some(attachment);
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn attachment(&self) -> JointResult<&Attachment> {
        self.attachment.as_ref().ok_or_else(|| JointError::NotAttached {
            name: self.name.clone(),
        })
    }

    /// Move one of the attached markers. Returns whether this joint uses it.
    pub fn update_marker_frame(&mut self, marker: MarkerId, frame: Isometry3<f64>) -> bool {
        let Some(att) = self.attachment.as_mut() else {
            return false;
        };
        let mut used = false;
        if att.marker_i == marker {
            att.frame_i = frame;
            used = true;
        }
        if att.marker_j == marker {
            att.frame_j = frame;
            used = true;
        }
        used
    }

    /// Pose of marker J expressed in marker I.
    pub fn relative_pose(&self) -> JointResult<Isometry3<f64>> {
        let att = self.attachment()?;
        Ok(att.frame_i.inverse() * att.frame_j)
    }
}

/// Rotation of J about I's z axis, in `(-π, π]`.
pub fn theta_z(rel: &Isometry3<f64>) -> f64 {
    let r = rel.rotation.to_rotation_matrix();
    let m = r.matrix();
    m[(1, 0)].atan2(m[(0, 0)])
}

/// The value of `theta` modulo a full turn that lies closest to `near`.
///
/// Angles read from `atan2` live in `(-π, π]`; coupling joints keep the last
/// unwrapped value and measure against it so they stay continuous across turns.
pub fn unwrap_angle(theta: f64, near: f64) -> f64 {
    near + ((theta - near + PI).rem_euclid(TAU) - PI)
}

/// Angle of J's origin around I's z axis.
pub fn orbit_ij(rel: &Isometry3<f64>) -> f64 {
    let t = rel.translation.vector;
    t.y.atan2(t.x)
}

/// Angle of I's origin around J's z axis.
pub fn orbit_ji(rel: &Isometry3<f64>) -> f64 {
    let t = rel.inverse().translation.vector;
    t.y.atan2(t.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use std::f64::consts::FRAC_PI_2;

    fn attachment(frame_i: Isometry3<f64>, frame_j: Isometry3<f64>) -> Attachment {
        Attachment {
            marker_i: MarkerId::from_index(0),
            marker_j: MarkerId::from_index(1),
            frame_i,
            frame_j,
        }
    }

    #[test]
    fn unattached_joint_reports_name() {
        let base = JointBase {
            name: "J1".to_string(),
            attachment: None,
        };
        let err = base.relative_pose().unwrap_err();
        assert_eq!(
            err,
            JointError::NotAttached {
                name: "J1".to_string()
            }
        );
    }

    #[test]
    fn relative_pose_is_j_in_i() {
        let mut base = JointBase::default();
        base.attach(
            "J1",
            attachment(
                Isometry3::translation(1.0, 0.0, 0.0),
                Isometry3::translation(1.0, 2.0, 0.0),
            ),
        );
        let rel = base.relative_pose().unwrap();
        assert!((rel.translation.vector - Vector3::new(0.0, 2.0, 0.0)).norm() < 1e-12);
        assert!((orbit_ij(&rel) - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn marker_updates_only_touch_attached_markers() {
        let mut base = JointBase::default();
        base.attach(
            "J1",
            attachment(Isometry3::identity(), Isometry3::identity()),
        );
        assert!(!base.update_marker_frame(MarkerId::from_index(5), Isometry3::identity()));
        assert!(base.update_marker_frame(
            MarkerId::from_index(1),
            Isometry3::translation(0.0, 0.0, 3.0)
        ));
        let rel = base.relative_pose().unwrap();
        assert!((rel.translation.vector.z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn unwrap_continues_past_half_turn() {
        let wrapped = theta_z(&Isometry3::new(Vector3::zeros(), Vector3::new(0.0, 0.0, 3.5)));
        assert!(wrapped < 0.0);
        assert!((unwrap_angle(wrapped, 3.0) - 3.5).abs() < 1e-12);
        assert!((unwrap_angle(-3.0, -12.0) - (-3.0 - TAU)).abs() < 1e-12);
        assert!((unwrap_angle(0.2, 0.0) - 0.2).abs() < 1e-15);
    }

    #[test]
    fn theta_z_reads_rotation_about_z() {
        let rel = Isometry3::new(Vector3::zeros(), Vector3::new(0.0, 0.0, 0.3));
        assert!((theta_z(&rel) - 0.3).abs() < 1e-12);
    }
}
