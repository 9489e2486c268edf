//! Named attachment frames.

use mb_core::{MarkerId, Units};
use nalgebra::{Isometry3, Translation3};

/// A marker as registered with the system, in model units.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub name: String,
    pub frame: Isometry3<f64>,
}

/// Express a model-unit frame in SI working units.
///
/// Only the origin carries a length; the rotation is dimensionless.
pub fn to_working_frame(units: &Units, frame: &Isometry3<f64>) -> Isometry3<f64> {
    let [_, _, scale, _] = units.scale_factors();
    Isometry3::from_parts(
        Translation3::from(frame.translation.vector * scale),
        frame.rotation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn millimetre_origin_becomes_metres() {
        let units = Units::from_scale_factors(1.0, 1.0, 0.001, 1.0).unwrap();
        let frame = Isometry3::new(Vector3::new(100.0, 0.0, -20.0), Vector3::new(0.0, 0.0, 0.3));
        let si = to_working_frame(&units, &frame);
        assert!((si.translation.vector - Vector3::new(0.1, 0.0, -0.02)).norm() < 1e-15);
        assert_eq!(si.rotation, frame.rotation);
    }
}
