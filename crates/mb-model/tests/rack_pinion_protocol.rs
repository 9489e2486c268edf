//! Parse / materialize / store behavior of a rack-pinion joint block.

use mb_asmt::{AsmtError, AsmtWriter, LineCursor};
use mb_core::Units;
use mb_joints::{JointKind, RackPinJoint};
use mb_model::{Assembler, JointCommon, JointDescriptor, JointParams, MarkerDescriptor};
use nalgebra::Isometry3;
use proptest::prelude::*;

fn pitch_radius(desc: &JointDescriptor) -> f64 {
    match desc.params {
        JointParams::RackPinion { pitch_radius } => pitch_radius,
        other => panic!("not a rack-pinion: {other:?}"),
    }
}

fn common_lines() -> &'static str {
    "\t\tName\n\t\t\tJoint1\n\t\tMarkerI\n\t\t\t/Assembly/Marker1\n\t\tMarkerJ\n\t\t\t/Assembly/Part1/Marker1\n"
}

#[test]
fn absent_pitch_radius_is_zero_and_consumes_nothing() {
    let text = format!("{}\tRevoluteJoint\n", common_lines());
    let mut cursor = LineCursor::new(&text);
    let mut desc = JointDescriptor::new(JointKind::RackPinion);

    let consumed = desc.parse(&mut cursor).unwrap();
    assert_eq!(consumed, 6);
    assert_eq!(pitch_radius(&desc).to_bits(), 0.0_f64.to_bits());
    assert_eq!(cursor.peek(), Some("\tRevoluteJoint"));
}

#[test]
fn present_pitch_radius_consumes_two_lines() {
    let mut cursor = LineCursor::new("pitchRadius\n12.5\n");
    let mut params = JointParams::empty(JointKind::RackPinion);
    assert_eq!(params.parse(&mut cursor).unwrap(), 2);
    assert_eq!(params, JointParams::RackPinion { pitch_radius: 12.5 });
}

#[test]
fn value_without_number_is_fatal_and_cursor_unmoved() {
    let text = format!("{}\t\tpitchRadius\n\t\t\ttwelve\n", common_lines());
    let mut cursor = LineCursor::new(&text);
    let mut desc = JointDescriptor::new(JointKind::RackPinion);

    let err = desc.parse(&mut cursor).unwrap_err();
    assert!(matches!(err, AsmtError::Format { line: 8, .. }));
    assert_eq!(cursor.position(), 0);
}

#[test]
fn materialize_copies_pitch_radius_raw() {
    // Millimetre model: marker frames are scaled, the pitch radius is not.
    let units = Units::from_scale_factors(1.0, 1.0, 0.001, 1.0).unwrap();
    let mut asm = Assembler::new(units);
    asm.add_marker(&MarkerDescriptor::new("/Assembly/Marker1", &Isometry3::identity()))
        .unwrap();
    asm.add_marker(&MarkerDescriptor::new(
        "/Assembly/Part1/Marker1",
        &Isometry3::translation(40.0, 0.0, 0.0),
    ))
    .unwrap();

    let mut desc = JointDescriptor::with_common(
        JointCommon::new("Joint1", "/Assembly/Marker1", "/Assembly/Part1/Marker1"),
        JointParams::RackPinion { pitch_radius: 12.5 },
    );
    let id = asm.add_joint(&mut desc).unwrap();
    assert_eq!(desc.runtime(), Some(id));

    let system = asm.finish().unwrap();
    let rack = system
        .constraint(id)
        .unwrap()
        .downcast_ref::<RackPinJoint>()
        .unwrap();
    assert_eq!(rack.pitch_radius, 12.5);
    // Reference captured from the SI pose: x = 0.04 m, no rotation.
    assert!((rack.reference() - 0.04).abs() < 1e-15);
}

#[test]
fn store_uses_tab_levels() {
    let desc = JointDescriptor::with_common(
        JointCommon::new("Joint1", "/Assembly/Marker1", "/Assembly/Part1/Marker1"),
        JointParams::RackPinion { pitch_radius: 12.5 },
    );
    let mut w = AsmtWriter::new();
    desc.store(&mut w, 1);
    let expected = format!("\tRackPinionJoint\n{}\t\tpitchRadius\n\t\t\t12.5\n", common_lines());
    assert_eq!(w.as_str(), expected);
}

proptest! {
    #[test]
    fn pitch_radius_round_trips_bit_exact(
        value in prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
    ) {
        let desc = JointDescriptor::with_common(
            JointCommon::new("J", "/a", "/b"),
            JointParams::RackPinion { pitch_radius: value },
        );
        let mut w = AsmtWriter::new();
        desc.store(&mut w, 1);
        let text = w.into_string();

        let mut cursor = LineCursor::new(&text);
        cursor.next_line("tag").unwrap();
        let mut back = JointDescriptor::new(JointKind::RackPinion);
        back.parse(&mut cursor).unwrap();
        prop_assert_eq!(pitch_radius(&back).to_bits(), value.to_bits());
        prop_assert!(cursor.is_exhausted());
    }
}
