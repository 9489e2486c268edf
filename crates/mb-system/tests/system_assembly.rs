//! Integration tests for building and evaluating a constraint system.

use mb_core::{ConstraintId, MarkerId, Tolerances, Units};
use mb_joints::{Attachment, JointConstraint, LowerPair, LowerPairKind, RackPinJoint};
use mb_system::{System, SystemBuilder, SystemError, to_working_frame};
use nalgebra::{Isometry3, Vector3};

fn attached(
    builder: &SystemBuilder,
    mut joint: Box<dyn JointConstraint>,
    name: &str,
    i: &str,
    j: &str,
    units: &Units,
) -> Box<dyn JointConstraint> {
    let mi = builder.resolve_marker(i).unwrap();
    let mj = builder.resolve_marker(j).unwrap();
    joint.base_mut().attach(
        name,
        Attachment {
            marker_i: mi.id,
            marker_j: mj.id,
            frame_i: to_working_frame(units, &mi.frame),
            frame_j: to_working_frame(units, &mj.frame),
        },
    );
    joint
}

fn rack_pinion(pitch_radius: f64) -> RackPinJoint {
    let mut joint = RackPinJoint::new();
    joint.pitch_radius = pitch_radius;
    joint
}

fn three_joint_system() -> System {
    let units = Units::si();
    let mut builder = SystemBuilder::new();
    builder.add_marker("ground", Isometry3::identity()).unwrap();
    builder
        .add_marker("pinion", Isometry3::translation(0.0, 0.0, 0.0))
        .unwrap();
    builder
        .add_marker("rack", Isometry3::translation(0.2, 0.0, 0.0))
        .unwrap();

    let names = [("J1", "ground", "pinion"), ("J2", "pinion", "rack"), ("J3", "ground", "rack")];
    let joints: Vec<Box<dyn JointConstraint>> = vec![
        Box::new(LowerPair::new(LowerPairKind::Revolute)),
        Box::new(rack_pinion(0.05)),
        Box::new(LowerPair::new(LowerPairKind::PointInPlane)),
    ];
    for ((name, i, j), joint) in names.into_iter().zip(joints) {
        let joint = attached(&builder, joint, name, i, j, &units);
        builder.add_constraint(joint);
    }
    builder.build(units).unwrap()
}

#[test]
fn constraints_keep_registration_order() {
    let system = three_joint_system();
    let names: Vec<&str> = system.constraints().map(|(_, c)| c.name()).collect();
    assert_eq!(names, ["J1", "J2", "J3"]);
}

#[test]
fn residual_rows_follow_equation_ranges() {
    let system = three_joint_system();
    assert_eq!(system.equation_count(), 5 + 1 + 1);
    assert_eq!(system.equation_ranges(), vec![0..5, 5..6, 6..7]);
    assert_eq!(system.residuals().unwrap().len(), 7);
}

#[test]
fn assembly_pose_is_satisfied() {
    let system = three_joint_system();
    assert!(system.is_satisfied(Tolerances::default()).unwrap());
}

#[test]
fn jacobian_stacks_rows_in_constraint_order() {
    let system = three_joint_system();
    let jac = system.jacobian().unwrap();
    assert_eq!(jac.nrows(), system.equation_count());
    assert_eq!(jac.ncols(), 6);

    // Rack-pinion row: d/dx = 1, d/dθz = pitch radius.
    let rack_row = system.equation_ranges()[1].start;
    assert!((jac[(rack_row, 0)] - 1.0).abs() < 1e-6);
    assert!((jac[(rack_row, 5)] - 0.05).abs() < 1e-6);
}

#[test]
fn moving_the_rack_breaks_the_coupling() {
    let mut system = three_joint_system();
    let rack = system.marker_id("rack").unwrap();
    let touched = system
        .set_marker_frame(rack, Isometry3::translation(0.3, 0.0, 0.0))
        .unwrap();
    assert_eq!(touched, 2);
    assert!(!system.is_satisfied(Tolerances::default()).unwrap());
    assert_eq!(system.marker(rack).unwrap().frame.translation.x, 0.3);
}

#[test]
fn rolling_in_steps_stays_satisfied_past_half_a_turn() {
    let mut system = three_joint_system();
    let rack = system.marker_id("rack").unwrap();

    for step in 1..=10 {
        let theta = 0.4 * f64::from(step);
        let frame = Isometry3::new(
            Vector3::new(0.2 - 0.05 * theta, 0.0, 0.0),
            Vector3::new(0.0, 0.0, theta),
        );
        system.set_marker_frame(rack, frame).unwrap();
        assert!(
            system.is_satisfied(Tolerances::default()).unwrap(),
            "theta = {theta}: {:?}",
            system.residuals().unwrap()
        );
    }
}

#[test]
fn marker_frames_reach_joints_in_si() {
    let units = Units::from_scale_factors(1.0, 1.0, 0.001, 1.0).unwrap();
    let mut builder = SystemBuilder::new();
    builder.add_marker("a", Isometry3::identity()).unwrap();
    builder
        .add_marker("b", Isometry3::new(Vector3::new(250.0, 0.0, 0.0), Vector3::zeros()))
        .unwrap();
    let joint = attached(
        &builder,
        Box::new(LowerPair::new(LowerPairKind::Spherical)),
        "S",
        "a",
        "b",
        &units,
    );
    builder.add_constraint(joint);
    let system = builder.build(units).unwrap();

    // Stored marker stays in millimetres, the residual is in metres.
    let b = system.marker_id("b").unwrap();
    assert_eq!(system.marker(b).unwrap().frame.translation.x, 250.0);
    let r = system.residuals().unwrap();
    assert!((r[0] - 0.25).abs() < 1e-12);
}

#[test]
fn unknown_ids_are_reported() {
    let system = three_joint_system();
    assert!(matches!(
        system.marker(MarkerId::from_index(99)),
        Err(SystemError::MarkerNotFound { .. })
    ));
    assert!(matches!(
        system.constraint(ConstraintId::from_index(99)),
        Err(SystemError::UnknownConstraint { .. })
    ));
}
