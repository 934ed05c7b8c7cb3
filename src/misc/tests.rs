use nalgebra::{Point2, Vector1, Vector2};

use crate::error::UpdateError;

use super::*;

#[test]
fn projection_keeps_values_inside_box() {
    let domain = ParameterBox::try_rectangle((0.0, 1.0), (-0.5, 0.5)).unwrap();
    let p = Vector2::new(0.3, -0.25);
    assert_eq!(domain.project(&p), p);
    assert_eq!(domain.project(&domain.project(&p)), p);
    assert!(domain.contains(&p));
}

#[test]
fn projection_clamps_to_exact_bounds() {
    let domain = ParameterBox::try_rectangle((0.1, 0.9), (0.2, 0.7)).unwrap();
    let above = domain.project(&Vector2::new(3.0, 0.7000001));
    assert_eq!(above, Vector2::new(0.9, 0.7));
    let below = domain.project(&Vector2::new(-3.0, 0.1999));
    assert_eq!(below, Vector2::new(0.1, 0.2));
    assert!(domain.contains(&above));
    assert!(domain.contains(&below));
}

#[test]
fn boundary_values_are_inside() {
    let domain = ParameterBox::try_interval(0.25, 0.75).unwrap();
    assert!(domain.contains(&Vector1::new(0.25)));
    assert!(domain.contains(&Vector1::new(0.75)));
    assert!(!domain.contains(&Vector1::new(0.7500001)));
}

#[test]
fn degenerate_interval_is_allowed() {
    let domain = ParameterBox::try_interval(0.5, 0.5).unwrap();
    assert_eq!(domain.project(&Vector1::new(0.0)), Vector1::new(0.5));
}

#[test]
fn invalid_boxes_are_rejected() {
    assert!(matches!(
        ParameterBox::try_interval(1.0, 0.0),
        Err(UpdateError::InvalidInput(_))
    ));
    assert!(matches!(
        ParameterBox::try_rectangle((0.0, 1.0), (0.0, f64::NAN)),
        Err(UpdateError::InvalidInput(_))
    ));
    assert!(matches!(
        ParameterBox::try_interval(f64::NEG_INFINITY, 0.0),
        Err(UpdateError::InvalidInput(_))
    ));
}

#[test]
fn unit_box() {
    let domain = ParameterBox::<f64, 2>::unit();
    assert_eq!(domain.lower(), &Vector2::new(0.0, 0.0));
    assert_eq!(domain.upper(), &Vector2::new(1.0, 1.0));
}

#[test]
fn distance_rate_matches_definition() {
    let diff = Vector2::new(3.0, 4.0);
    let d_diff = Vector2::new(1.0, 0.0);
    assert_eq!(distance_rate(&diff, &d_diff), 0.6);
}

#[test]
fn distance_rate_vanishes_at_coincident_points() {
    let rate = distance_rate(&Vector2::new(0.0, 0.0), &Vector2::new(1.0, 2.0));
    assert_eq!(rate, 0.0);
}

#[test]
fn unit_direction_between_points() {
    let a = Point2::new(1.0, 1.0);
    let b = Point2::new(1.0, 3.0);
    assert_eq!(unit_direction(&a, &b), Some(Vector2::new(0.0, 1.0)));
    assert_eq!(unit_direction(&a, &a), None);
    assert!(is_coincident(&a, &Point2::new(1.0, 1.0)));
    assert!(!is_coincident(&a, &b));
}

#[test]
fn nested_boxes() {
    let inner = ParameterBox::try_rectangle((0.1, 0.9), (0.0, 1.0)).unwrap();
    let wide = ParameterBox::try_rectangle((0.0, 1.0), (0.0, 2.0)).unwrap();
    assert!(inner.is_within(&ParameterBox::unit()));
    assert!(inner.is_within(&wide));
    assert!(!wide.is_within(&ParameterBox::unit()));
}

#[test]
fn finiteness_of_parameter_vectors() {
    assert!(is_finite_vector(&nalgebra::Vector3::new(0.0, 1.0, -2.0)));
    assert!(!is_finite_vector(&nalgebra::Vector4::new(0.0, f64::NAN, 1.0, 1.0)));
    assert!(!is_finite_vector(&Vector1::new(f64::INFINITY)));
}
