use fpgeom_core::{GeomSettings, Vector2D, MIN_SEGMENT_LENGTH, TOL_MM};
use fpgeom_shapes::{
    cut, intersect, Atom, Circle, Containment, GeomShape, IntersectOptions, Line, Polygon,
    Rectangle, Shape, ShapeKind,
};
use proptest::prelude::*;

fn square() -> Shape {
    Shape::from(Rectangle::new((0.0, 0.0), (2.0, 2.0), 0.0))
}

fn vertical_line() -> Shape {
    Shape::from(Line::new((0.0, -2.0), (0.0, 2.0)))
}

fn contains(points: &[Vector2D], expected: Vector2D) -> bool {
    points.iter().any(|p| p.is_equal(expected, 1e-9))
}

fn total_length(shapes: &[Shape]) -> f64 {
    shapes
        .iter()
        .flat_map(|s| s.atoms())
        .map(|a| a.length())
        .sum()
}

#[test]
fn test_line_crossing_square() {
    let points = vertical_line().intersect(&square(), true, MIN_SEGMENT_LENGTH, TOL_MM);

    assert_eq!(points.len(), 2);
    assert!(contains(&points, Vector2D::new(0.0, -1.0)));
    assert!(contains(&points, Vector2D::new(0.0, 1.0)));
}

#[test]
fn test_intersect_classifies_cut_segments() {
    let line = vertical_line();
    let square = square();
    let handle = intersect(&line, &square, &IntersectOptions::default());

    assert_eq!(handle.atoms(0).len(), 3);
    assert_eq!(
        handle.containment(0),
        &[Containment::Outside, Containment::Inside, Containment::Outside]
    );
    assert_eq!(handle.cuts_performed(0), 2);

    // Classification against an open shape always reports outside.
    assert_eq!(handle.atoms(1).len(), 6);
    assert!(handle
        .containment(1)
        .iter()
        .all(|c| *c == Containment::Outside));
    assert_eq!(handle.shape(1).kind(), ShapeKind::Rectangle);
}

#[test]
fn test_segment_ends_mark_intersections() {
    let line = vertical_line();
    let square = square();
    let handle = intersect(&line, &square, &IntersectOptions::default());
    let ends = handle.segment_ends(0);

    assert_eq!(ends[0][0], None);
    assert!(ends[0][1].is_some());
    assert!(ends[1][0].is_some() && ends[1][1].is_some());
    assert_eq!(ends[2][1], None);
    assert!(handle.is_point_an_intersection(Vector2D::new(0.0, 1.0)));
}

#[test]
fn test_cut_square_with_line() {
    let pieces = cut(&vertical_line(), &square(), MIN_SEGMENT_LENGTH, TOL_MM);

    assert_eq!(pieces.len(), 6);
    assert!(pieces.iter().all(|p| p.kind() == ShapeKind::Line));
    assert!((total_length(&pieces) - 8.0).abs() < 1e-9);
}

#[test]
fn test_cut_without_crossing_returns_shape() {
    let far_line = Shape::from(Line::new((5.0, -2.0), (5.0, 2.0)));
    let pieces = far_line.cut(&square(), MIN_SEGMENT_LENGTH, TOL_MM);

    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].kind(), ShapeKind::Rectangle);
}

#[test]
fn test_cut_circle_into_arcs() {
    let line = Shape::from(Line::new((-2.0, 0.0), (2.0, 0.0)));
    let circle = Shape::from(Circle::new((0.0, 0.0), 1.0));
    let pieces = line.cut(&circle, MIN_SEGMENT_LENGTH, TOL_MM);

    assert_eq!(pieces.len(), 2);
    for piece in &pieces {
        match piece {
            Shape::Arc(arc) => assert!((arc.angle().abs() - 180.0).abs() < 1e-9),
            other => panic!("expected an arc, got {:?}", other),
        }
    }
    assert!((total_length(&pieces) - 2.0 * std::f64::consts::PI).abs() < 1e-9);
}

#[test]
fn test_tangent_line_is_not_a_strict_intersection() {
    let circle = Shape::from(Circle::new((0.0, 0.0), 1.0));
    let tangent = Shape::from(Line::new((-2.0, 1.0), (2.0, 1.0)));

    assert!(tangent
        .intersect(&circle, true, MIN_SEGMENT_LENGTH, TOL_MM)
        .is_empty());

    let touching = tangent.intersect(&circle, false, MIN_SEGMENT_LENGTH, TOL_MM);
    assert_eq!(touching.len(), 1);
    assert!(contains(&touching, Vector2D::new(0.0, 1.0)));
}

#[test]
fn test_polyline_touching_at_vertex() {
    let polyline = Shape::from(Polygon::open([(-1.0, -3.0), (0.0, -1.0), (1.0, -3.0)]));

    assert!(polyline
        .intersect(&square(), true, MIN_SEGMENT_LENGTH, TOL_MM)
        .is_empty());
    assert_eq!(
        polyline
            .intersect(&square(), false, MIN_SEGMENT_LENGTH, TOL_MM)
            .len(),
        1
    );
}

#[test]
fn test_adjacent_squares_only_touch() {
    let left = square();
    let right = Shape::from(Rectangle::new((2.0, 0.0), (2.0, 2.0), 0.0));

    assert!(left
        .intersect(&right, true, MIN_SEGMENT_LENGTH, TOL_MM)
        .is_empty());

    let touching = left.intersect(&right, false, MIN_SEGMENT_LENGTH, TOL_MM);
    assert_eq!(touching.len(), 2);
    assert!(contains(&touching, Vector2D::new(1.0, -1.0)));
    assert!(contains(&touching, Vector2D::new(1.0, 1.0)));
}

#[test]
fn test_overlapping_circles() {
    let c1 = Shape::from(Circle::new((-0.9, 0.0), 1.0));
    let c2 = Shape::from(Circle::new((0.9, 0.0), 1.0));
    let handle = intersect(&c1, &c2, &IntersectOptions::default());

    assert_eq!(handle.intersections().len(), 2);
    assert_eq!(handle.atoms(0).len(), 2);
    let inside: Vec<_> = handle
        .atoms(0)
        .iter()
        .zip(handle.containment(0))
        .filter(|(_, c)| **c == Containment::Inside)
        .map(|(a, _)| *a)
        .collect();
    assert_eq!(inside.len(), 1);
    assert!(inside[0].mid().x > 0.0);
}

#[test]
fn test_nested_squares_do_not_intersect() {
    let outer = Shape::from(Rectangle::new((0.0, 0.0), (10.0, 10.0), 0.0));
    let inner = square();
    let handle = intersect(&inner, &outer, &IntersectOptions::default());

    assert!(handle.intersections().is_empty());
    assert_eq!(handle.cuts_performed(0), 0);
    assert!(handle
        .containment(0)
        .iter()
        .all(|c| *c == Containment::Inside));
}

#[test]
fn test_strict_merge_restores_touching_segments() {
    // Crosses the left and right edges and touches the top edge at (0, -1).
    let notched = Shape::from(Polygon::new([
        (-2.0, -3.0),
        (0.0, -1.0),
        (2.0, -3.0),
        (2.0, 0.0),
        (-2.0, 0.0),
    ]));
    let square = square();
    let handle = intersect(&square, &notched, &IntersectOptions::default());

    assert_eq!(handle.intersections().len(), 2);
    assert!(contains(handle.intersections(), Vector2D::new(1.0, 0.0)));
    assert!(contains(handle.intersections(), Vector2D::new(-1.0, 0.0)));
    assert!(!handle.is_point_an_intersection(Vector2D::new(0.0, -1.0)));

    assert_eq!(handle.atoms(0).len(), 6);
    assert_eq!(handle.cuts_performed(0), 2);
    assert_eq!(
        handle.atoms(0)[0],
        Atom::Line(Line::new((-1.0, -1.0), (1.0, -1.0)))
    );
    assert_eq!(handle.containment(0)[0], Containment::Inside);
}

fn assert_is_unit_circle(atom: &Atom) {
    match atom {
        Atom::Circle(circle) => {
            assert!(circle.center.is_equal(Vector2D::new(0.0, 0.0), 1e-9));
            assert!((circle.radius() - 1.0).abs() < 1e-9);
        }
        other => panic!("expected a circle, got {:?}", other),
    }
}

#[test]
fn test_arcs_merge_back_into_circle() {
    // Notches on both sides touch the circle at (1, 0) and (-1, 0).
    let notched = Shape::from(Polygon::new([
        (1.0, 0.0),
        (2.0, -2.0),
        (-2.0, -2.0),
        (-1.0, 0.0),
        (-2.0, 2.0),
        (2.0, 2.0),
    ]));
    let circle = Shape::from(Circle::new((0.0, 0.0), 1.0));
    let handle = intersect(&circle, &notched, &IntersectOptions::default());

    assert_eq!(handle.atoms(0).len(), 1);
    assert_is_unit_circle(&handle.atoms(0)[0]);
    assert_eq!(handle.segment_ends(0), &[[None, None]]);
    assert_eq!(handle.containment(0), &[Containment::Inside]);
    assert!(handle.intersections().is_empty());
    assert_eq!(handle.cuts_performed(0), 0);
}

#[test]
fn test_circle_touched_once_stays_a_circle() {
    let corner = Shape::from(Polygon::new([(1.0, 0.0), (3.0, 0.0), (3.0, 2.0), (1.0, 2.0)]));
    let circle = Shape::from(Circle::new((0.0, 0.0), 1.0));
    let handle = intersect(&circle, &corner, &IntersectOptions::default());

    assert_eq!(handle.atoms(0).len(), 1);
    assert_is_unit_circle(&handle.atoms(0)[0]);
    assert_eq!(handle.containment(0), &[Containment::Outside]);
    assert!(handle.intersections().is_empty());
    assert_eq!(handle.cuts_performed(0), 0);

    let kept = corner.subtract(&circle, MIN_SEGMENT_LENGTH, TOL_MM).unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].kind(), ShapeKind::Circle);
}

#[test]
fn test_options_from_settings() {
    let settings = GeomSettings {
        strict_intersection: false,
        ..GeomSettings::default()
    };
    let options = IntersectOptions::from(&settings);
    assert!(!options.strict_intersection);
    assert!(options.cut_also_shape_2);

    let tangent = Shape::from(Line::new((-2.0, 1.0), (2.0, 1.0)));
    let circle = Shape::from(Circle::new((0.0, 0.0), 1.0));
    let handle = intersect(&tangent, &circle, &options);
    assert_eq!(handle.intersections().len(), 1);
}

proptest! {
    #[test]
    fn test_intersection_points_do_not_depend_on_order(
        x1 in -4.0f64..4.0,
        y1 in -4.0f64..4.0,
        x2 in -4.0f64..4.0,
        y2 in -4.0f64..4.0,
    ) {
        let line = Shape::from(Line::new((x1, y1), (x2, y2)));
        let circle = Shape::from(Circle::new((0.3, 0.1), 2.0));
        prop_assume!(line.atoms()[0].length() > 0.01);

        let forward = line.intersect(&circle, false, MIN_SEGMENT_LENGTH, TOL_MM);
        let backward = circle.intersect(&line, false, MIN_SEGMENT_LENGTH, TOL_MM);
        prop_assert_eq!(forward.len(), backward.len());
        for p in &forward {
            prop_assert!(contains(&backward, *p));
        }
    }
}
