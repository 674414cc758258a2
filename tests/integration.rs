use foam_frame_engine::FoamEngine;
use foam_frame_engine::edge_frame;
use foam_frame_engine::geom::{EdgeFrame, Point2, Point3, Tolerance};
use foam_frame_engine::params::{AffineParameters, RotationConstraint};
use foam_frame_engine::parse::dmp::{self, ParseError};

const FOAM_DMP: &str = "\
// Surface Evolver dump: 2D foam, 3 bubbles
SPACE_DIMENSION 2
PARAMETER x_translation = 0.125 /* offset in x */
PARAMETER y_translation = -0.5
PARAMETER rotation_angle = pi / 6
PARAMETER rot_center_x = 0.5
PARAMETER rot_center_y = 0.5
OPTIMIZING_PARAMETER rot_angle = 2 * rotation_angle

constraint 1 /* circle */
formula: (x - rot_center_x)^2 + (y - rot_center_y)^2 = 0.04
";

#[test]
fn engine_starts_unloaded() {
    let engine = FoamEngine::new();
    assert!(!engine.is_loaded());
    assert_eq!(engine.parameter_count(), 0);
}

#[test]
fn engine_resolves_containers_from_dmp() {
    let mut engine = FoamEngine::new();
    engine.load_dmp(FOAM_DMP).expect("load dmp");
    assert!(engine.is_loaded());
    assert_eq!(engine.parameter_count(), 6);

    let affine = engine
        .resolve_affine("x_translation", "y_translation", "rotation_angle")
        .expect("affine parameters");
    assert_eq!(affine.x(), 0.125);
    assert_eq!(affine.y(), -0.5);
    assert!((affine.angle() - std::f64::consts::FRAC_PI_6).abs() < 1e-12);
    assert_eq!(affine.name(2).unwrap(), "rotation_angle");

    let rotation = engine
        .resolve_rotation(1, "rot_center_x", "rot_center_y", "rot_angle")
        .expect("rotation constraint");
    assert_eq!(rotation.center(), Point2::new(0.5, 0.5));
    assert_eq!(rotation.constraint_index(), 1);
    assert!((rotation.angle() - std::f64::consts::FRAC_PI_3).abs() < 1e-12);
}

#[test]
fn failed_load_keeps_previous_document() {
    let mut engine = FoamEngine::new();
    engine.load_dmp(FOAM_DMP).unwrap();

    assert!(engine.load_dmp("PARAMETER broken = 1 +\n").is_err());
    assert_eq!(engine.parameter("x_translation"), Some(0.125));
}

#[test]
fn missing_label_is_reported_by_name() {
    let parameters = dmp::parse_parameters(FOAM_DMP).unwrap();
    let mut affine = AffineParameters::with_labels("x_translation", "y_shift", "rotation_angle");

    match affine.resolve(&parameters) {
        Err(ParseError::MissingParameter(name)) => assert_eq!(name, "y_shift"),
        other => panic!("expected missing parameter, got {other:?}"),
    }
}

#[test]
fn unlabeled_rotation_keeps_constructed_values() {
    let parameters = dmp::parse_parameters(FOAM_DMP).unwrap();
    let mut constraint = RotationConstraint::new(Point2::new(3.0, 4.0), 1.2, 7);
    constraint.resolve(&parameters).unwrap();

    assert_eq!(constraint.center(), Point2::new(3.0, 4.0));
    assert_eq!(constraint.angle(), 1.2);
    assert_eq!(constraint.constraint_index(), 7);
}

#[test]
fn edge_frame_returns_gl_matrix() {
    let matrix = edge_frame(&[0.0, 0.0, 0.0], &[0.0, 0.0, 5.0])
        .expect("valid input")
        .expect("non-degenerate edge");

    assert_eq!(matrix.len(), 16);
    assert_eq!(&matrix[8..12], &[0.0, 0.0, 1.0, 0.0]);
    assert_eq!(&matrix[12..16], &[0.0, 0.0, 0.0, 1.0]);

    let expected = EdgeFrame::from_axis(Point3::ORIGIN, Point3::new(0.0, 0.0, 5.0)).unwrap();
    assert_eq!(matrix, expected.to_gl_matrix(Point3::ORIGIN).to_vec());
    assert!(expected.is_orthonormal(Tolerance::DEFAULT));
}

#[test]
fn edge_frame_is_null_for_zero_length_edge() {
    let matrix = edge_frame(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).expect("valid input");
    assert!(matrix.is_none());
}

#[test]
fn edge_frame_rejects_wrong_arity() {
    assert!(edge_frame(&[1.0, 2.0], &[1.0, 2.0, 3.0]).is_err());
}
