//! Cutting two shapes at their intersection points
//!
//! Every atom of one shape is intersected with every atom of the other. The
//! atoms are then split at the points found, and each piece is classified as
//! inside or outside the other shape. With strict intersection, neighbouring
//! pieces on the same side are merged again and the point between them is
//! discarded, so only real crossings survive.

use fpgeom_core::Vector2D;
use tracing::{debug, trace};

use super::intersect_atomic::{intersect_atoms, AtomIntersectOptions};
use super::operation_handle::{Containment, GeomOperationHandle, IntersectOptions, SegmentEnds};
use crate::model::{Arc, Atom, Circle, GeomShape, Line, Shape};

/// Intersects `shape1` with `shape2` and cuts their atoms at the
/// intersection points.
pub fn intersect<'a>(
    shape1: &'a Shape,
    shape2: &'a Shape,
    options: &IntersectOptions,
) -> GeomOperationHandle<'a> {
    let mut handle = GeomOperationHandle::new(shape1, shape2, *options);
    let atom_options = AtomIntersectOptions {
        exclude_tangents: handle.exclude_tangents,
        exclude_segment_ends_1: handle.exclude_segment_ends[0],
        exclude_segment_ends_2: handle.exclude_segment_ends[1],
        infinite_line: false,
        tol: options.tol,
    };

    let atoms1 = handle.sessions[0].atoms.clone();
    let atoms2 = handle.sessions[1].atoms.clone();
    for (i, atom1) in atoms1.iter().enumerate() {
        for (j, atom2) in atoms2.iter().enumerate() {
            let points = intersect_atoms(atom1, atom2, &atom_options);
            if !points.is_empty() {
                handle.add_intersections(&points, i, j);
            }
        }
    }
    debug!(
        "Intersected {} with {} atoms: {} raw intersections",
        atoms1.len(),
        atoms2.len(),
        handle.intersections.len()
    );

    let shape_count = if options.cut_also_shape_2 { 2 } else { 1 };
    for index in 0..shape_count {
        replace_segments_with_cuts(&mut handle, index);
        classify_segments(&mut handle, index);
        if options.strict_intersection {
            keep_only_strict_intersections(&mut handle, index);
        }
    }
    debug!(
        "{} intersections remain after cutting",
        handle.intersections.len()
    );
    handle
}

/// Splits every atom of shape `index` that has intersection points.
fn replace_segments_with_cuts(handle: &mut GeomOperationHandle<'_>, index: usize) {
    let min_len = handle.options.min_segment_length;
    let tol = handle.options.tol;
    let session = &mut handle.sessions[index];

    let mut atoms = Vec::with_capacity(session.atoms.len());
    let mut segment_ends = Vec::with_capacity(session.atoms.len());
    for (atom, points) in session.atoms.iter().zip(&session.atom_intersections) {
        if points.is_empty() {
            atoms.push(*atom);
            segment_ends.push([None, None]);
            continue;
        }
        let (pieces, ends) = match atom {
            Atom::Line(line) => split_line(line, points, min_len, tol),
            Atom::Arc(arc) => split_arc(arc, points, min_len, tol),
            Atom::Circle(circle) => {
                session.cuts_performed += 1;
                split_circle(circle, points, min_len, tol)
            }
        };
        session.cuts_performed += pieces.len() as i64 - 1;
        atoms.extend(pieces);
        segment_ends.extend(ends);
    }

    session.containment = vec![Containment::Unknown; atoms.len()];
    session.atoms = atoms;
    session.segment_ends = segment_ends;
}

fn split_line(
    line: &Line,
    points: &[Vector2D],
    min_segment_length: f64,
    tol: f64,
) -> (Vec<Atom>, Vec<SegmentEnds>) {
    let mut stops: Vec<(Vector2D, Option<Vector2D>)> = line
        .sort_points_relative_to_start(points)
        .into_iter()
        .map(|p| (p, Some(p)))
        .collect();
    if stops
        .first()
        .is_some_and(|(p, _)| !line.start.is_equal_accelerated(*p, tol))
    {
        stops.insert(0, (line.start, None));
    }
    if stops
        .last()
        .is_some_and(|(p, _)| !line.end.is_equal_accelerated(*p, tol))
    {
        stops.push((line.end, None));
    }

    let mut pieces = Vec::new();
    let mut ends = Vec::new();
    for pair in stops.windows(2) {
        let piece = Line::new(pair[0].0, pair[1].0);
        if piece.length() >= min_segment_length {
            pieces.push(Atom::Line(piece));
            ends.push([pair[0].1, pair[1].1]);
        }
    }
    (pieces, ends)
}

fn split_arc(
    arc: &Arc,
    points: &[Vector2D],
    min_segment_length: f64,
    tol: f64,
) -> (Vec<Atom>, Vec<SegmentEnds>) {
    let mut stops: Vec<(f64, Option<Vector2D>)> = arc
        .sort_points_relative_to_start(points, tol)
        .into_iter()
        .map(|(_, phi, p)| (phi, Some(p)))
        .collect();
    let is_stop_at = |stop: Option<&(f64, Option<Vector2D>)>, point: Vector2D| {
        stop.and_then(|(_, p)| *p)
            .is_some_and(|p| p.is_equal_accelerated(point, tol))
    };
    if !is_stop_at(stops.first(), arc.start()) {
        stops.insert(0, (0.0, None));
    }
    if !is_stop_at(stops.last(), arc.end()) {
        stops.push((arc.angle(), None));
    }

    let radius = arc.radius();
    let mut pieces = Vec::new();
    let mut ends = Vec::new();
    for pair in stops.windows(2) {
        let angle = pair[1].0 - pair[0].0;
        if radius * angle.to_radians().abs() >= min_segment_length {
            let start = arc.start().rotated(pair[0].0, arc.center());
            pieces.push(Atom::Arc(Arc::new(arc.center(), start, angle)));
            ends.push([pair[0].1, pair[1].1]);
        }
    }
    (pieces, ends)
}

/// Opens the circle at the first point and splits the resulting full arc at
/// the others. The first point bounds both the first and the last piece.
fn split_circle(
    circle: &Circle,
    points: &[Vector2D],
    min_segment_length: f64,
    tol: f64,
) -> (Vec<Atom>, Vec<SegmentEnds>) {
    let Some((&first, rest)) = points.split_first() else {
        return (vec![Atom::Circle(*circle)], vec![[None, None]]);
    };
    let arc = Arc::new(circle.center, first, 360.0);
    if rest.is_empty() {
        return (vec![Atom::Arc(arc)], vec![[Some(first), Some(first)]]);
    }
    let (pieces, mut ends) = split_arc(&arc, rest, min_segment_length, tol);
    if let Some(head) = ends.first_mut() {
        head[0] = Some(first);
    }
    if let Some(tail) = ends.last_mut() {
        tail[1] = Some(first);
    }
    (pieces, ends)
}

/// Classifies every segment of shape `index` by testing its midpoint
/// against the other shape.
///
/// Along a polygonal outline the classification can only change where an
/// intersection point separates two segments, so only those are re-tested.
fn classify_segments(handle: &mut GeomOperationHandle<'_>, index: usize) {
    let other = handle.shapes[1 - index];
    let tol = handle.options.tol;
    let session = &mut handle.sessions[index];

    if !other.is_closed() {
        session.containment = vec![Containment::Outside; session.atoms.len()];
        return;
    }
    if session.atoms.is_empty() {
        return;
    }

    let classify = |atom: &Atom| {
        if other.is_point_inside_self(atom.mid(), true, tol) {
            Containment::Inside
        } else {
            Containment::Outside
        }
    };
    let polygonal = other.kind().is_polygonal();
    let mut containment = classify(&session.atoms[0]);
    session.containment[0] = containment;
    for i in 1..session.atoms.len() {
        let at_intersection =
            session.segment_ends[i][0].is_some() || session.segment_ends[i - 1][1].is_some();
        if !polygonal || at_intersection {
            containment = classify(&session.atoms[i]);
        }
        session.containment[i] = containment;
    }
}

/// Merges neighbouring segments that lie on the same side of the other
/// shape and drops the intersection point between them.
fn keep_only_strict_intersections(handle: &mut GeomOperationHandle<'_>, index: usize) {
    if !handle.shapes[1 - index].is_closed() || handle.intersections.is_empty() {
        return;
    }

    let mut merges = 0usize;
    let mut i = 0usize;
    loop {
        let len = handle.sessions[index].atoms.len();
        if len < 2 || i >= len {
            break;
        }
        let i2 = (i + 1) % len;
        let containment = &handle.sessions[index].containment;
        if containment[i] == containment[i2] {
            let removed = merge_segments(handle, index, i, i2);
            if removed > 0 {
                merges += 1;
                handle.sessions[index].cuts_performed -= removed;
                if i2 < i {
                    i -= 1;
                }
                continue;
            }
        }
        i += 1;
    }
    trace!("Merged {} segment pairs of shape {}", merges, index);

    // A circle touched at a single point is still one full turn.
    let tol = handle.options.tol;
    let session = &mut handle.sessions[index];
    if let &[Atom::Arc(arc)] = session.atoms.as_slice() {
        if (arc.angle().abs() - 360.0).abs() <= tol {
            session.atoms[0] = Atom::Circle(Circle::from_arc(&arc));
            session.segment_ends[0] = [None, None];
            session.cuts_performed -= 1;
            handle.remove_intersection(arc.start());
        }
    }

    let containment = &handle.sessions[index].containment;
    let all_inside = containment.iter().all(|c| *c == Containment::Inside);
    let none_inside = !containment.contains(&Containment::Inside);
    if all_inside || none_inside {
        debug!("Shape {} only touches the other shape, dropping intersections", index);
        handle.intersections.clear();
    }
}

/// Merges segment `i2` into `i1`. Returns the number of intersection
/// points that disappeared (0 if the segments cannot be merged).
fn merge_segments(handle: &mut GeomOperationHandle<'_>, index: usize, i1: usize, i2: usize) -> i64 {
    let tol = handle.options.tol;
    let session = &handle.sessions[index];
    let (ends1, ends2) = (session.segment_ends[i1], session.segment_ends[i2]);

    match (session.atoms[i1], session.atoms[i2]) {
        (Atom::Arc(arc1), Atom::Arc(arc2)) => {
            if !arc1.center().is_equal_accelerated(arc2.center(), tol)
                || (arc1.radius() - arc2.radius()).abs() > tol
            {
                return 0;
            }
            let mut merged = arc1;
            let (separator, ends) = if arc1.start().is_equal_accelerated(arc2.end(), tol) {
                merged.set_start(arc2.start());
                (arc2.end(), [ends2[0], ends1[1]])
            } else if arc1.end().is_equal_accelerated(arc2.start(), tol) {
                (arc2.start(), [ends1[0], ends2[1]])
            } else {
                return 0;
            };
            merged.set_angle(arc1.angle() + arc2.angle());

            let session = &mut handle.sessions[index];
            session.remove_segment(i2);
            let i1 = if i2 < i1 { i1 - 1 } else { i1 };
            handle.remove_intersection(separator);

            let session = &mut handle.sessions[index];
            if (merged.angle().abs() - 360.0).abs() <= tol {
                session.atoms[i1] = Atom::Circle(Circle::from_arc(&merged));
                session.segment_ends[i1] = [None, None];
                handle.remove_intersection(merged.start());
                2
            } else {
                session.atoms[i1] = Atom::Arc(merged);
                session.segment_ends[i1] = ends;
                1
            }
        }
        (Atom::Line(line1), Atom::Line(line2)) => {
            let same_direction = match (line1.unit_direction(tol), line2.unit_direction(tol)) {
                (Ok(d1), Ok(d2)) => d1.is_equal_accelerated(d2, tol),
                _ => false,
            };
            if !line1.end.is_equal_accelerated(line2.start, tol) || !same_direction {
                return 0;
            }
            let session = &mut handle.sessions[index];
            session.remove_segment(i2);
            let i1 = if i2 < i1 { i1 - 1 } else { i1 };
            session.atoms[i1] = Atom::Line(Line::new(line1.start, line2.end));
            session.segment_ends[i1] = [ends1[0], ends2[1]];
            handle.remove_intersection(line2.start);
            1
        }
        _ => 0,
    }
}
