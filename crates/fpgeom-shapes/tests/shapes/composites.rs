use fpgeom_core::{BoundingBox, Vector2D, TOL_MM};
use fpgeom_shapes::{
    Arc, Atom, Circle, CompoundElement, CompoundPolygon, Cross, Cruciform, GeomShape, Line,
    Polygon, Rectangle, RoundRectangle, ShapeKind, Stadium, Trapezoid,
};

fn assert_near(actual: Vector2D, expected: Vector2D) {
    assert!(
        actual.is_equal(expected, 1e-9),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

fn assert_contiguous(atoms: &[Atom]) {
    for i in 0..atoms.len() {
        let end = atoms[i].end().unwrap();
        let next_start = atoms[(i + 1) % atoms.len()].start().unwrap();
        assert!(
            end.is_equal(next_start, 1e-9),
            "atom {} ends at {:?}, next starts at {:?}",
            i,
            end,
            next_start
        );
    }
}

fn assert_bbox(bbox: BoundingBox, min: (f64, f64), max: (f64, f64)) {
    assert_near(bbox.min.unwrap(), min.into());
    assert_near(bbox.max.unwrap(), max.into());
}

fn clockwise_square() -> Polygon {
    Polygon::new([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
}

#[test]
fn test_rectangle_atoms_and_bbox() {
    let rect = Rectangle::new((1.0, 1.0), (4.0, 2.0), 0.0);
    let atoms = rect.atoms();

    assert_eq!(atoms.len(), 4);
    assert_contiguous(&atoms);
    assert_bbox(rect.bbox(), (-1.0, 0.0), (3.0, 2.0));
}

#[test]
fn test_rectangle_quarter_turn_swaps_size() {
    let mut rect = Rectangle::new((0.0, 0.0), (4.0, 2.0), 0.0);
    rect.rotate(90.0, Vector2D::zero());

    assert_eq!(rect.angle, 0.0);
    assert_eq!(rect.size, Vector2D::new(2.0, 4.0));

    rect.rotate(30.0, Vector2D::zero());
    assert!((rect.angle - 30.0).abs() < 1e-9);
}

#[test]
fn test_rectangle_containment() {
    let rect = Rectangle::new((0.0, 0.0), (4.0, 2.0), 45.0);

    assert!(rect.is_point_inside_self(Vector2D::zero(), true, TOL_MM));
    assert!(!rect.is_point_inside_self(Vector2D::new(1.9, -0.9), false, TOL_MM));
    let corner = rect.corners()[0];
    assert!(rect.is_point_inside_self(corner, false, TOL_MM));
    assert!(!rect.is_point_inside_self(corner, true, TOL_MM));
}

#[test]
fn test_rectangle_deflate_limit() {
    let mut rect = Rectangle::new((0.0, 0.0), (4.0, 2.0), 0.0);
    rect.inflate(-0.5, TOL_MM).unwrap();
    assert_eq!(rect.size, Vector2D::new(3.0, 1.0));

    let err = rect.inflate(-0.5, TOL_MM).unwrap_err();
    assert!(err.is_invalid_geometry());
}

#[test]
fn test_round_rectangle_validation() {
    assert!(RoundRectangle::new((0.0, 0.0), (10.0, 6.0), -1.0, 0.0)
        .unwrap_err()
        .is_invalid_geometry());
    assert!(RoundRectangle::new((0.0, 0.0), (10.0, 6.0), 3.5, 0.0).is_err());
    assert!(RoundRectangle::new((0.0, 0.0), (10.0, 6.0), 3.0, 0.0).is_ok());
}

#[test]
fn test_round_rectangle_outline() {
    let rr = RoundRectangle::new((0.0, 0.0), (10.0, 6.0), 2.0, 0.0).unwrap();
    let atoms = rr.atoms();

    assert_eq!(atoms.len(), 8);
    assert_contiguous(&atoms);
    assert!(matches!(atoms[0], Atom::Line(_)));
    assert!(matches!(atoms[1], Atom::Arc(_)));
    assert_bbox(rr.bbox(), (-5.0, -3.0), (5.0, 3.0));

    let rotated = rr.rotated(30.0, Vector2D::zero());
    assert_eq!(rotated.angle, 30.0);
    assert_contiguous(&rotated.atoms());
}

#[test]
fn test_round_rectangle_without_radius_is_a_rectangle() {
    let rr = RoundRectangle::new((1.0, 0.0), (4.0, 2.0), 0.0, 0.0).unwrap();
    let rect = Rectangle::new((1.0, 0.0), (4.0, 2.0), 0.0);

    assert_eq!(rr.atoms(), rect.atoms());
}

#[test]
fn test_round_rectangle_containment() {
    let rr = RoundRectangle::new((0.0, 0.0), (10.0, 6.0), 2.0, 0.0).unwrap();

    assert!(rr.is_point_inside_self(Vector2D::zero(), true, TOL_MM));
    assert!(rr.is_point_inside_self(Vector2D::new(4.5, 1.5), true, TOL_MM));
    assert!(!rr.is_point_inside_self(Vector2D::new(4.9, 2.9), false, TOL_MM));
    assert!(rr.is_point_inside_self(Vector2D::new(0.0, 3.0), false, TOL_MM));
    assert!(!rr.is_point_inside_self(Vector2D::new(0.0, 3.0), true, TOL_MM));
}

#[test]
fn test_round_rectangle_inflate() {
    let mut rr = RoundRectangle::new((0.0, 0.0), (10.0, 6.0), 2.0, 0.0).unwrap();
    rr.inflate(1.0, TOL_MM).unwrap();
    assert_eq!(rr.size, Vector2D::new(12.0, 8.0));
    assert_eq!(rr.corner_radius, 3.0);

    rr.inflate(-3.5, TOL_MM).unwrap();
    assert_eq!(rr.corner_radius, 0.0);
    assert!(rr.inflate(-0.5, TOL_MM).unwrap_err().is_invalid_geometry());
}

#[test]
fn test_stadium_outline() {
    let stadium = Stadium::new((-3.0, 0.0), (3.0, 0.0), 2.0);
    let atoms = stadium.atoms();

    assert_eq!(atoms.len(), 4);
    assert_contiguous(&atoms);
    assert_bbox(stadium.bbox(), (-5.0, -2.0), (5.0, 2.0));
    assert!(atoms[0].is_point_on_self(Vector2D::new(-5.0, 0.0), true, TOL_MM));
}

#[test]
fn test_stadium_from_rectangle() {
    let stadium = Stadium::from_rectangle(&Rectangle::new((1.0, 1.0), (10.0, 4.0), 0.0));
    assert_near(stadium.centers[0], Vector2D::new(-2.0, 1.0));
    assert_near(stadium.centers[1], Vector2D::new(4.0, 1.0));
    assert_eq!(stadium.radius, 2.0);

    let tilted = Stadium::from_rectangle(&Rectangle::new((0.0, 0.0), (10.0, 4.0), 45.0));
    assert!((tilted.centers[0].distance_to(tilted.centers[1]) - 6.0).abs() < 1e-9);
    assert!((tilted.centers[1].arg() - 45.0).abs() < 1e-9);
}

#[test]
fn test_stadium_with_one_center_is_a_circle() {
    let stadium = Stadium::new((1.0, 1.0), (1.0, 1.0), 2.0);
    assert_eq!(stadium.atoms(), vec![Atom::Circle(Circle::new((1.0, 1.0), 2.0))]);
}

#[test]
fn test_stadium_containment_and_inflate() {
    let mut stadium = Stadium::new((-3.0, 0.0), (3.0, 0.0), 2.0);

    assert!(stadium.is_point_inside_self(Vector2D::new(0.0, 1.5), true, TOL_MM));
    assert!(stadium.is_point_inside_self(Vector2D::new(-4.5, 0.5), true, TOL_MM));
    assert!(!stadium.is_point_inside_self(Vector2D::new(0.0, 2.5), false, TOL_MM));
    assert!(!stadium.is_point_inside_self(Vector2D::new(4.9, 1.9), false, TOL_MM));

    stadium.inflate(-1.0, TOL_MM).unwrap();
    assert_eq!(stadium.radius, 1.0);
    assert!(stadium.inflate(-1.0, TOL_MM).is_err());
}

#[test]
fn test_cruciform_validation() {
    assert!(Cruciform::new((4.0, 10.0), (6.0, 2.0), (0.0, 0.0), 0.0)
        .unwrap_err()
        .is_invalid_geometry());
    assert!(Cruciform::new((10.0, 4.0), (2.0, 6.0), (0.0, 0.0), 0.0).is_err());
}

#[test]
fn test_cruciform_outline() {
    let cruciform = Cruciform::new((10.0, 10.0), (4.0, 4.0), (0.0, 0.0), 0.0).unwrap();
    let polygon = cruciform.to_polygon();

    assert_eq!(polygon.points.len(), 12);
    assert!(polygon.is_clockwise());
    assert_eq!(cruciform.atoms().len(), 12);
    assert_bbox(cruciform.bbox(), (-5.0, -5.0), (5.0, 5.0));

    let bar = Cruciform::new((10.0, 4.0), (2.0, 4.0), (0.0, 0.0), 0.0).unwrap();
    assert_eq!(bar.atoms().len(), 4);
}

#[test]
fn test_cruciform_containment() {
    let cruciform = Cruciform::new((10.0, 10.0), (4.0, 4.0), (0.0, 0.0), 0.0).unwrap();

    assert!(cruciform.is_point_inside_self(Vector2D::new(4.0, 0.0), true, TOL_MM));
    assert!(cruciform.is_point_inside_self(Vector2D::new(0.0, -4.0), true, TOL_MM));
    assert!(!cruciform.is_point_inside_self(Vector2D::new(4.0, 4.0), false, TOL_MM));
}

#[test]
fn test_cruciform_rotate_and_inflate() {
    let mut cruciform = Cruciform::new((10.0, 10.0), (4.0, 4.0), (1.0, 0.0), 0.0).unwrap();
    cruciform.rotate(90.0, Vector2D::zero());
    assert_near(cruciform.center, Vector2D::new(0.0, 1.0));
    assert_eq!(cruciform.angle, 90.0);

    cruciform.inflate(1.0, TOL_MM).unwrap();
    assert_eq!((cruciform.tail_w, cruciform.overall_w), (6.0, 12.0));
    assert!(cruciform.inflate(-3.0, TOL_MM).is_err());
}

#[test]
fn test_trapezoid_validation() {
    assert!(Trapezoid::new((0.0, 0.0), (10.0, 4.0), 0.0, 90.0, 0.0).is_err());
    assert!(Trapezoid::new((0.0, 0.0), (10.0, 4.0), -1.0, 10.0, 0.0).is_err());
    assert!(Trapezoid::new((0.0, 0.0), (2.0, 10.0), 0.0, 45.0, 0.0)
        .unwrap_err()
        .is_invalid_geometry());
}

#[test]
fn test_trapezoid_outline() {
    let sharp = Trapezoid::new((0.0, 0.0), (10.0, 4.0), 0.0, -20.0, 0.0).unwrap();
    let atoms = sharp.atoms();
    assert_eq!(atoms.len(), 4);
    assert_contiguous(&atoms);
    assert_bbox(sharp.bbox(), (-5.0, -2.0), (5.0, 2.0));

    let rounded = Trapezoid::new((0.0, 0.0), (10.0, 4.0), 0.5, 20.0, 15.0).unwrap();
    let atoms = rounded.atoms();
    assert_eq!(atoms.len(), 8);
    assert_contiguous(&atoms);

    let plain = Trapezoid::new((0.0, 0.0), (10.0, 4.0), 0.0, 0.0, 0.0).unwrap();
    assert_eq!(plain.atoms(), Rectangle::new((0.0, 0.0), (10.0, 4.0), 0.0).atoms());
}

#[test]
fn test_trapezoid_containment() {
    // Narrow top edge.
    let trapezoid = Trapezoid::new((0.0, 0.0), (10.0, 4.0), 0.0, -20.0, 0.0).unwrap();

    assert!(trapezoid.is_point_inside_self(Vector2D::zero(), true, TOL_MM));
    assert!(trapezoid.is_point_inside_self(Vector2D::new(-4.9, 1.9), true, TOL_MM));
    assert!(!trapezoid.is_point_inside_self(Vector2D::new(-4.9, -1.9), false, TOL_MM));
}

#[test]
fn test_trapezoid_inflate() {
    let mut trapezoid = Trapezoid::new((0.0, 0.0), (10.0, 4.0), 0.0, 0.0, 0.0).unwrap();
    trapezoid.inflate(1.0, TOL_MM).unwrap();
    assert_near(trapezoid.size, Vector2D::new(12.0, 6.0));
    assert_eq!(trapezoid.corner_radius, 1.0);

    assert!(trapezoid.inflate(-4.0, TOL_MM).is_err());
}

#[test]
fn test_cross_is_open() {
    let cross = Cross::new((1.0, 1.0), (4.0, 2.0), 0.0);
    let lines = cross.lines();

    assert_eq!(lines[0], Line::new((-1.0, 1.0), (3.0, 1.0)));
    assert_eq!(lines[1], Line::new((1.0, 0.0), (1.0, 2.0)));
    assert!(!cross.is_closed());
    assert!(!cross.is_point_inside_self(Vector2D::new(1.0, 1.0), false, TOL_MM));
    assert!(cross.inflated(1.0, TOL_MM).unwrap_err().is_unsupported());
}

#[test]
fn test_cross_rotation_keeps_center() {
    let cross = Cross::new((1.0, 1.0), (4.0, 2.0), 0.0).rotated(90.0, Vector2D::new(1.0, 1.0));
    let lines = cross.lines();

    assert_eq!(cross.center, Vector2D::new(1.0, 1.0));
    assert_near(lines[0].start, Vector2D::new(1.0, -1.0));
}

#[test]
fn test_polygon_drops_duplicate_points() {
    let polygon = Polygon::new([(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
    assert_eq!(polygon.points.len(), 3);

    let open = Polygon::open([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    assert_eq!(open.segments().len(), 2);
    assert!(!open.is_closed());
    assert_eq!(polygon.kind(), ShapeKind::Polygon);
}

#[test]
fn test_polygon_orientation() {
    let mut polygon = clockwise_square();
    assert!(polygon.is_clockwise());

    polygon.points.reverse();
    assert!(!polygon.is_clockwise());
    polygon.make_clockwise();
    assert!(polygon.is_clockwise());
}

#[test]
fn test_polygon_containment() {
    let polygon = Polygon::new([(0.0, 0.0), (10.0, 0.0), (5.0, 5.0), (10.0, 10.0), (0.0, 10.0)]);

    assert!(polygon.is_point_inside_self(Vector2D::new(2.0, 5.0), true, TOL_MM));
    assert!(!polygon.is_point_inside_self(Vector2D::new(8.0, 5.0), false, TOL_MM));
    assert!(polygon.is_point_inside_self(Vector2D::new(5.0, 5.0), false, TOL_MM));
    assert!(!polygon.is_point_inside_self(Vector2D::new(5.0, 5.0), true, TOL_MM));
    // The ray touches the notch vertex at (5, 5) without crossing.
    assert!(polygon.is_point_inside_self(Vector2D::new(5.0, 2.0), true, TOL_MM));
    assert!(polygon.is_point_inside_self(Vector2D::new(2.0, 2.0), true, TOL_MM));
}

#[test]
fn test_polygon_inflate_and_deflate() {
    let inflated = clockwise_square().inflated(1.0, TOL_MM).unwrap();
    assert_eq!(inflated.points.len(), 4);
    assert_bbox(inflated.bbox(), (-1.0, -1.0), (11.0, 11.0));

    let deflated = clockwise_square().inflated(-1.0, TOL_MM).unwrap();
    assert_bbox(deflated.bbox(), (1.0, 1.0), (9.0, 9.0));
}

#[test]
fn test_polygon_deflate_needs_clockwise_points() {
    let mut polygon = clockwise_square();
    polygon.points.reverse();

    assert!(polygon.inflate(-1.0, TOL_MM).unwrap_err().is_invalid_geometry());
}

#[test]
fn test_polygon_mirror() {
    let mut polygon = clockwise_square();
    polygon.mirror_x(0.0).mirror_y(5.0);

    assert_bbox(polygon.bbox(), (-10.0, 0.0), (0.0, 10.0));
    assert_eq!(polygon.points[0], Vector2D::new(0.0, 10.0));
}

#[test]
fn test_polygon_round_to_grid_outwards() {
    let mut polygon = Polygon::new([(0.2, 0.2), (9.8, 0.2), (9.8, 9.8), (0.2, 9.8)]);
    polygon.round_to_grid(1.0, true);

    assert_eq!(
        polygon.points,
        vec![
            Vector2D::new(0.0, 0.0),
            Vector2D::new(10.0, 0.0),
            Vector2D::new(10.0, 10.0),
            Vector2D::new(0.0, 10.0),
        ]
    );
}

#[test]
fn test_polygon_from_empty_bbox_fails() {
    assert!(Polygon::from_bbox(&BoundingBox::new())
        .unwrap_err()
        .is_empty_bbox());
}

#[test]
fn test_polygon_simplify_merges_collinear_segments() {
    let mut polygon = Polygon::new([
        (0.0, 0.0),
        (5.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
    ]);
    polygon.simplify(1e-6, TOL_MM).unwrap();

    assert_eq!(polygon.points.len(), 4);
}

#[test]
fn test_compound_polygon_from_elements() {
    let compound = CompoundPolygon::from_elements(
        [
            CompoundElement::from(Line::new((0.0, 0.0), (10.0, 0.0))),
            CompoundElement::from(Arc::new((10.0, 5.0), (10.0, 0.0), 180.0)),
            // Given backwards; reversed to continue the outline.
            CompoundElement::from(Line::new((0.0, 10.0), (10.0, 10.0))),
        ],
        true,
    )
    .unwrap();
    let segments = compound.segments();

    assert_eq!(segments.len(), 4);
    assert_contiguous(segments);
    assert!(compound.has_arcs());
    assert!(compound.is_clockwise());
    assert_eq!(segments[2], Atom::Line(Line::new((10.0, 10.0), (0.0, 10.0))));
}

#[test]
fn test_compound_polygon_rejects_gaps() {
    let err = CompoundPolygon::from_elements(
        [
            CompoundElement::from(Line::new((0.0, 0.0), (10.0, 0.0))),
            CompoundElement::from(Line::new((20.0, 0.0), (30.0, 0.0))),
        ],
        false,
    )
    .unwrap_err();
    assert!(err.is_invalid_geometry());

    assert!(CompoundPolygon::from_points([(1.0, 1.0)], true).is_err());
}

#[test]
fn test_compound_polygon_from_points_and_polygon() {
    let from_points =
        CompoundPolygon::from_points([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], true).unwrap();
    assert_eq!(from_points.segments().len(), 3);

    let from_polygon = CompoundPolygon::from_elements(
        [
            CompoundElement::from(clockwise_square()),
            CompoundElement::from(Vector2D::new(-5.0, 0.0)),
        ],
        false,
    )
    .unwrap();
    assert_eq!(from_polygon.segments().len(), 5);
}

#[test]
fn test_compound_polygon_from_circle() {
    let compound = CompoundPolygon::from_shape(&Circle::new((0.0, 0.0), 2.0));
    let segments = compound.segments();

    assert_eq!(segments.len(), 1);
    match segments[0] {
        Atom::Arc(arc) => assert_eq!(arc.angle(), 360.0),
        other => panic!("expected a full arc, got {:?}", other),
    }
    assert!(compound.is_closed());
}

#[test]
fn test_compound_polygon_inflate_rounds_corners() {
    let mut compound =
        CompoundPolygon::from_points([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], true)
            .unwrap();
    compound.inflate(1.0, TOL_MM).unwrap();

    let segments = compound.segments();
    assert_eq!(segments.len(), 8);
    assert_contiguous(segments);
    assert_bbox(compound.bbox(), (-1.0, -1.0), (11.0, 11.0));
    assert!(compound.is_point_inside_self(Vector2D::new(-0.5, 5.0), true, TOL_MM));
}

#[test]
fn test_compound_polygon_deflate() {
    let mut compound =
        CompoundPolygon::from_points([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], true)
            .unwrap();
    compound.inflate(-1.0, TOL_MM).unwrap();

    assert_eq!(compound.segments().len(), 4);
    assert_bbox(compound.bbox(), (1.0, 1.0), (9.0, 9.0));
}
