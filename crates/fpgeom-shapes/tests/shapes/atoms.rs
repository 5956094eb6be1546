use fpgeom_core::{Vector2D, TOL_MM};
use fpgeom_shapes::{Arc, Atom, Circle, GeomShape, Line, ShapeKind};

fn assert_near(actual: Vector2D, expected: Vector2D) {
    assert!(
        actual.is_equal(expected, 1e-9),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn test_arc_from_three_points_counter_clockwise() {
    let arc = Arc::from_three_points((1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)).unwrap();

    assert_near(arc.center(), Vector2D::zero());
    assert!((arc.angle() - 180.0).abs() < 1e-9);
    assert_near(arc.mid(), Vector2D::new(0.0, 1.0));
    assert_near(arc.end(), Vector2D::new(-1.0, 0.0));
}

#[test]
fn test_arc_from_three_points_clockwise() {
    let arc = Arc::from_three_points((-1.0, 0.0), (0.0, 1.0), (1.0, 0.0)).unwrap();

    assert!((arc.angle() + 180.0).abs() < 1e-9);
    assert_eq!(arc.direction(), -1);
    assert_near(arc.mid(), Vector2D::new(0.0, 1.0));
}

#[test]
fn test_arc_from_collinear_points_is_degenerate() {
    let err = Arc::from_three_points((0.0, 0.0), (1.0, 1.0), (2.0, 2.0)).unwrap_err();
    assert!(err.is_degenerate());

    let err = Arc::from_three_points((0.0, 1.0), (1.0, 1.0), (2.0, 1.0)).unwrap_err();
    assert!(err.is_degenerate());
}

#[test]
fn test_arc_from_center_start_end() {
    let short = Arc::from_center_start_end((0.0, 0.0), (1.0, 0.0), (0.0, 1.0), false).unwrap();
    let long = Arc::from_center_start_end((0.0, 0.0), (1.0, 0.0), (0.0, 1.0), true).unwrap();

    assert!((short.angle() - 90.0).abs() < 1e-9);
    assert!((long.angle() + 270.0).abs() < 1e-9);
    assert_near(long.end(), Vector2D::new(0.0, 1.0));

    let err = Arc::from_center_start_end((0.0, 0.0), (1.0, 0.0), (0.0, 2.0), false).unwrap_err();
    assert!(err.is_invalid_geometry());
}

#[test]
fn test_arc_sweep_is_normalized() {
    assert_eq!(Arc::new((0.0, 0.0), (1.0, 0.0), 810.0).angle(), 90.0);
    assert_eq!(Arc::new((0.0, 0.0), (1.0, 0.0), 360.0).angle(), 360.0);
    assert_eq!(Arc::new((0.0, 0.0), (1.0, 0.0), -90.0).angle(), -90.0);
    assert_eq!(Arc::new((0.0, 0.0), (1.0, 0.0), -360.0).angle(), 360.0);
    assert_eq!(Arc::new((0.0, 0.0), (1.0, 0.0), -720.0).angle(), 360.0);
}

#[test]
fn test_arc_sweep_keeps_its_sense() {
    assert_eq!(Arc::new((0.0, 0.0), (1.0, 0.0), 400.0).angle(), 40.0);
    assert_eq!(Arc::new((0.0, 0.0), (1.0, 0.0), -400.0).angle(), -40.0);
    assert_eq!(Arc::new((0.0, 0.0), (1.0, 0.0), -450.0).angle(), -90.0);
}

#[test]
fn test_arc_bbox_includes_extreme_points() {
    let quarter = Arc::new((0.0, 0.0), (1.0, 0.0), 90.0);
    let bbox = quarter.bbox();
    assert_near(bbox.min.unwrap(), Vector2D::new(0.0, 0.0));
    assert_near(bbox.max.unwrap(), Vector2D::new(1.0, 1.0));

    let half = Arc::new((0.0, 0.0), (0.0, -1.0), 180.0);
    let bbox = half.bbox();
    assert_near(bbox.min.unwrap(), Vector2D::new(0.0, -1.0));
    assert_near(bbox.max.unwrap(), Vector2D::new(1.0, 1.0));
}

#[test]
fn test_arc_point_on_self() {
    let arc = Arc::new((0.0, 0.0), (1.0, 0.0), 90.0);

    assert!(arc.is_point_on_self(Vector2D::new(1.0, 0.0), false, TOL_MM));
    assert!(!arc.is_point_on_self(Vector2D::new(1.0, 0.0), true, TOL_MM));
    assert!(arc.is_point_on_self(arc.mid(), true, TOL_MM));
    assert!(!arc.is_point_on_self(Vector2D::new(-1.0, 0.0), false, TOL_MM));
    assert!(!arc.is_point_on_self(Vector2D::new(0.5, 0.5), false, TOL_MM));
}

#[test]
fn test_arc_reverse_keeps_geometry() {
    let mut arc = Arc::new((0.0, 0.0), (1.0, 0.0), 90.0);
    arc.reverse();

    assert_near(arc.start(), Vector2D::new(0.0, 1.0));
    assert_near(arc.end(), Vector2D::new(1.0, 0.0));
    assert_eq!(arc.angle(), -90.0);
}

#[test]
fn test_arc_move_end_keeps_sense() {
    let mut arc = Arc::new((0.0, 0.0), (1.0, 0.0), -90.0);
    arc.move_end(Vector2D::new(-1.0, 0.0));

    assert!((arc.angle() + 180.0).abs() < 1e-9);
    assert_near(arc.start(), Vector2D::new(1.0, 0.0));

    let mut arc = Arc::new((0.0, 0.0), (1.0, 0.0), 90.0);
    arc.move_start(Vector2D::new(0.0, -1.0));
    assert!((arc.angle() - 180.0).abs() < 1e-9);
    assert_near(arc.end(), Vector2D::new(0.0, 1.0));
}

#[test]
fn test_arc_sorts_points_along_sweep() {
    let arc = Arc::new((0.0, 0.0), (1.0, 0.0), -180.0);
    let late = Vector2D::new(0.0, -1.0);
    let early = Vector2D::from_polar(1.0, -45.0, Vector2D::zero());

    let sorted = arc.sort_points_relative_to_start(&[late, early], TOL_MM);
    assert_near(sorted[0].2, early);
    assert_near(sorted[1].2, late);
}

#[test]
fn test_line_basics() {
    let mut line = Line::new((0.0, 0.0), (3.0, 4.0));

    assert_eq!(line.length(), 5.0);
    assert_eq!(line.mid(), Vector2D::new(1.5, 2.0));
    assert!(line.is_point_on_self(Vector2D::new(1.5, 2.0), true, TOL_MM));
    assert!(!line.is_point_on_self(Vector2D::new(0.0, 0.0), true, TOL_MM));
    assert!(!line.is_point_on_self(Vector2D::new(6.0, 8.0), false, TOL_MM));

    line.reverse();
    assert_eq!(line.start, Vector2D::new(3.0, 4.0));
}

#[test]
fn test_line_sorts_points_from_start() {
    let line = Line::new((10.0, 0.0), (0.0, 0.0));
    let sorted = line.sort_points_relative_to_start(&[
        Vector2D::new(2.0, 0.0),
        Vector2D::new(9.0, 0.0),
        Vector2D::new(5.0, 0.0),
    ]);

    assert_eq!(
        sorted,
        vec![
            Vector2D::new(9.0, 0.0),
            Vector2D::new(5.0, 0.0),
            Vector2D::new(2.0, 0.0)
        ]
    );
}

#[test]
fn test_line_zero_length_direction_fails() {
    let line = Line::new((1.0, 1.0), (1.0, 1.0));
    assert!(line.unit_direction(TOL_MM).unwrap_err().is_degenerate());
}

#[test]
fn test_circle_inflate() {
    let mut circle = Circle::new((0.0, 0.0), 2.0);
    circle.inflate(-1.0, TOL_MM).unwrap();
    assert_eq!(circle.radius(), 1.0);

    let err = circle.inflate(-1.0, TOL_MM).unwrap_err();
    assert!(err.is_invalid_geometry());
    assert_eq!(circle.radius(), 1.0);
}

#[test]
fn test_circle_containment() {
    let circle = Circle::new((1.0, 1.0), 1.0);

    assert!(circle.is_point_inside_self(Vector2D::new(1.5, 1.0), true, TOL_MM));
    assert!(circle.is_point_inside_self(Vector2D::new(2.0, 1.0), false, TOL_MM));
    assert!(!circle.is_point_inside_self(Vector2D::new(2.0, 1.0), true, TOL_MM));
    assert!(!circle.is_point_inside_self(Vector2D::new(3.0, 1.0), false, TOL_MM));
}

#[test]
fn test_atom_ends() {
    let circle = Atom::from(Circle::new((0.0, 0.0), 1.0));
    assert_eq!(circle.start(), None);
    assert!(circle.is_closed());
    assert!((circle.length() - 2.0 * std::f64::consts::PI).abs() < 1e-12);

    let line = Atom::from(Line::new((0.0, 0.0), (1.0, 0.0)));
    assert_eq!(line.end(), Some(Vector2D::new(1.0, 0.0)));
    assert_eq!(line.kind(), ShapeKind::Line);
}

#[test]
fn test_transformations_have_copying_variants() {
    let line = Line::new((0.0, 0.0), (1.0, 0.0));
    let moved = GeomShape::translated(&line, Vector2D::new(0.0, 2.0));
    let turned = GeomShape::rotated(&line, 90.0, Vector2D::zero());

    assert_eq!(line.start, Vector2D::zero());
    assert_eq!(moved.start, Vector2D::new(0.0, 2.0));
    assert_near(turned.end, Vector2D::new(0.0, 1.0));
}

#[test]
fn test_open_atoms_do_not_inflate() {
    let mut line = Line::new((0.0, 0.0), (1.0, 0.0));
    assert!(GeomShape::inflate(&mut line, 1.0, TOL_MM)
        .unwrap_err()
        .is_unsupported());

    let arc = Arc::new((0.0, 0.0), (1.0, 0.0), 90.0);
    assert!(!arc.is_point_inside_self(Vector2D::new(0.1, 0.1), false, TOL_MM));
}
