//! Model measurement system.

use uom::si::f64::{Angle as UomAngle, Length as UomLength, Mass as UomMass, Time as UomTime};

use crate::error::{MbError, MbResult};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Time = UomTime;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

/// Measurement system a model's raw numbers are expressed in.
///
/// Each field is the size of *one* model unit. A model saved in millimetres has
/// `length == m(0.001)`; a raw length `r` then means `r * length`.
///
/// The context is fixed before any joint is materialized and only ever shared
/// by reference afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Units {
    pub time: Time,
    pub mass: Mass,
    pub length: Length,
    pub angle: Angle,
}

impl Default for Units {
    fn default() -> Self {
        Self::si()
    }
}

impl Units {
    /// Seconds, kilograms, metres, radians.
    pub fn si() -> Self {
        Self {
            time: s(1.0),
            mass: kg(1.0),
            length: m(1.0),
            angle: rad(1.0),
        }
    }

    /// Build a context from raw scale factors (SI value of one model unit).
    pub fn from_scale_factors(time: f64, mass: f64, length: f64, angle: f64) -> MbResult<Self> {
        Ok(Self {
            time: s(positive_scale(time, "time unit")?),
            mass: kg(positive_scale(mass, "mass unit")?),
            length: m(positive_scale(length, "length unit")?),
            angle: rad(positive_scale(angle, "angle unit")?),
        })
    }

    /// Scale factors in the order time, mass, length, angle.
    pub fn scale_factors(&self) -> [f64; 4] {
        use uom::si::{angle::radian, length::meter, mass::kilogram, time::second};
        [
            self.time.get::<second>(),
            self.mass.get::<kilogram>(),
            self.length.get::<meter>(),
            self.angle.get::<radian>(),
        ]
    }

    /// True when raw lengths are already metres.
    pub fn is_si_length(&self) -> bool {
        use uom::si::length::meter;
        self.length.get::<meter>() == 1.0
    }
}

fn positive_scale(v: f64, what: &'static str) -> MbResult<f64> {
    let v = crate::numeric::ensure_finite(v, what)?;
    if v <= 0.0 {
        return Err(MbError::InvalidArg { what });
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uom::si::length::millimeter;

    #[test]
    fn default_is_si() {
        let units = Units::default();
        assert_eq!(units.scale_factors(), [1.0, 1.0, 1.0, 1.0]);
        assert!(units.is_si_length());
    }

    #[test]
    fn millimetre_model() {
        let units = Units::from_scale_factors(1.0, 1.0, 0.001, 1.0).unwrap();
        assert!((units.length.get::<millimeter>() - 1.0).abs() < 1e-12);
        assert_eq!(units.scale_factors()[2], 0.001);
        assert!(!units.is_si_length());
    }

    #[test]
    fn rejects_non_positive_scale() {
        assert!(Units::from_scale_factors(1.0, 0.0, 1.0, 1.0).is_err());
        assert!(Units::from_scale_factors(1.0, 1.0, -0.001, 1.0).is_err());
        assert!(Units::from_scale_factors(f64::NAN, 1.0, 1.0, 1.0).is_err());
    }

    proptest! {
        #[test]
        fn scale_factors_read_back_bit_exact(
            factors in prop::array::uniform4(1e-9..1e9_f64)
        ) {
            let [t, m, l, a] = factors;
            let units = Units::from_scale_factors(t, m, l, a).unwrap();
            let back = units.scale_factors();
            for (got, want) in back.iter().zip(factors) {
                prop_assert_eq!(got.to_bits(), want.to_bits());
            }
        }
    }
}
