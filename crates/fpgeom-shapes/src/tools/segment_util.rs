//! Helpers for outlines built from line and arc segments.

use fpgeom_core::{tol_deg, Vector2D};
use tracing::trace;

use super::intersect_atomic::{
    intersect_atoms, intersect_upwards_ray_with_arc, intersect_upwards_ray_with_line,
    AtomIntersectOptions,
};
use crate::model::{Arc, Atom, Line};

/// Direction of a segment before it was modified, used to detect flips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentDirection {
    Line(Vector2D),
    Arc(i32),
}

impl SegmentDirection {
    pub fn of(segment: &Atom) -> Self {
        match segment {
            Atom::Line(line) => SegmentDirection::Line(line.direction()),
            Atom::Arc(arc) => SegmentDirection::Arc(arc.direction()),
            Atom::Circle(_) => SegmentDirection::Arc(1),
        }
    }
}

pub fn are_lines_parallel(line1: &Line, line2: &Line, tol: f64) -> bool {
    let (l1_x, l1_y) = (line1.start.y - line1.end.y, line1.end.x - line1.start.x);
    let (l2_x, l2_y) = (line2.start.y - line2.end.y, line2.end.x - line2.start.x);
    (l1_x * l2_y - l1_y * l2_x).abs() <= tol * line1.length() * line2.length()
}

pub fn are_arcs_on_same_circle(arc1: &Arc, arc2: &Arc, tol: f64) -> bool {
    arc1.center().is_equal_accelerated(arc2.center(), tol)
        && (arc1.radius() - arc2.radius()).abs() <= tol
}

pub fn remove_zero_length_segments(segments: &mut Vec<Atom>, min_segment_length: f64) {
    segments.retain(|segment| segment.length() >= min_segment_length);
}

/// Moves the start of a segment, keeping its end in place.
pub fn move_segment_start(segment: &mut Atom, point: Vector2D) {
    match segment {
        Atom::Line(line) => line.start = point,
        Atom::Arc(arc) => arc.move_start(point),
        Atom::Circle(_) => {}
    }
}

/// Moves the end of a segment, keeping its start in place.
pub fn move_segment_end(segment: &mut Atom, point: Vector2D) {
    match segment {
        Atom::Line(line) => line.end = point,
        Atom::Arc(arc) => arc.move_end(point),
        Atom::Circle(_) => {}
    }
}

/// Removes self-intersection loops from a cyclic outline.
///
/// The segment with the left-most extent is assumed to be on the outer
/// outline. Returns `false` if the outline collapses.
pub fn keep_only_outer_outline(segments: &mut Vec<Atom>, tol: f64) -> bool {
    if segments.len() < 2 {
        return false;
    }

    let mut left_most_idx = 0usize;
    let mut left_most = f64::INFINITY;
    for (i, segment) in segments.iter().enumerate() {
        if let Some(min) = segment.bbox().min {
            if min.x < left_most {
                left_most = min.x;
                left_most_idx = i;
            }
        }
    }

    let mut i = 1usize;
    while i < segments.len() {
        let mut j = 0usize;
        while j < i {
            let adjacent = i - j == 1 || (i == segments.len() - 1 && j == 0);
            let options = AtomIntersectOptions {
                exclude_segment_ends_1: adjacent,
                exclude_segment_ends_2: adjacent,
                tol,
                ..AtomIntersectOptions::default()
            };
            let pts = intersect_atoms(&segments[i], &segments[j], &options);
            let Some(point) = pts.first().copied() else {
                j += 1;
                continue;
            };

            trace!("Trimming outline loop between segments {} and {}", j, i);
            if j < left_most_idx && left_most_idx < i {
                move_segment_start(&mut segments[j], point);
                move_segment_end(&mut segments[i], point);
                if !adjacent {
                    segments.truncate(i + 1);
                    segments.drain(0..j);
                    left_most_idx -= j;
                }
                i -= j;
                j = 1;
            } else {
                move_segment_end(&mut segments[j], point);
                move_segment_start(&mut segments[i], point);
                if !adjacent && j + 1 < i {
                    segments.drain(j + 1..i);
                }
                i = j + 1;
                j += 1;
            }
            if segments.len() <= 1 {
                return false;
            }
        }
        i += 1;
    }
    true
}

/// Merges cyclically adjacent parallel lines and co-circular arcs.
///
/// Returns `false` if two or fewer segments remain.
pub fn merge_segments(segments: &mut Vec<Atom>, tol: f64) -> bool {
    let mut i = 0usize;
    while i < segments.len() {
        let prev = (i + segments.len() - 1) % segments.len();
        let merged = match (segments[prev], segments[i]) {
            (Atom::Line(l1), Atom::Line(l2)) if are_lines_parallel(&l1, &l2, tol) => {
                if let Atom::Line(line) = &mut segments[prev] {
                    line.end = l2.end;
                }
                true
            }
            (Atom::Arc(a1), Atom::Arc(a2)) if are_arcs_on_same_circle(&a1, &a2, tol) => {
                if let Atom::Arc(arc) = &mut segments[prev] {
                    arc.set_angle(a1.angle() + a2.angle());
                }
                true
            }
            _ => false,
        };
        if merged {
            segments.remove(i);
            if segments.len() <= 2 {
                return false;
            }
        } else {
            i += 1;
        }
    }
    true
}

/// Checks whether a modified segment reversed its direction or collapsed.
pub fn is_segment_flipped_or_zero(segment: &Atom, direction: SegmentDirection, tol: f64) -> bool {
    match (segment, direction) {
        (Atom::Line(line), SegmentDirection::Line(dir)) => {
            let new_dir = line.direction();
            if new_dir.x.abs() > new_dir.y.abs() {
                new_dir.x * dir.x <= 0.0 || new_dir.x.abs() <= tol
            } else {
                new_dir.y * dir.y <= 0.0 || new_dir.y.abs() <= tol
            }
        }
        (Atom::Arc(arc), SegmentDirection::Arc(dir)) => {
            if arc.angle() * f64::from(dir) <= 0.0 {
                return true;
            }
            match tol_deg(tol, arc.radius()) {
                Some(tol_d) => arc.angle().abs() <= tol_d,
                None => true,
            }
        }
        _ => false,
    }
}

/// Even-odd test with an upward ray for a closed outline of lines and arcs.
///
/// Points on the outline are inside unless `strictly_inside` is set.
pub fn is_point_inside_outline(
    segments: &[Atom],
    point: Vector2D,
    strictly_inside: bool,
    tol: f64,
) -> bool {
    if segments
        .iter()
        .any(|segment| segment.is_point_on_self(point, false, tol))
    {
        return !strictly_inside;
    }

    let n = segments.len();
    let mut crossings = 0usize;
    for (i, segment) in segments.iter().enumerate() {
        let (ips, comes_from_left) = match segment {
            Atom::Line(line) => (
                intersect_upwards_ray_with_line(point, line, tol),
                line.start.x < point.x - tol,
            ),
            Atom::Arc(arc) => (
                intersect_upwards_ray_with_arc(point, arc, false, tol),
                arc.bbox().min.is_some_and(|min| min.x < point.x - tol),
            ),
            Atom::Circle(_) => continue,
        };
        let Some(end) = segment.end() else {
            continue;
        };
        for ip in ips {
            if ip.is_equal(end, tol) {
                crossings += continues_to_other_side(
                    segments,
                    (i + 1) % n,
                    i,
                    point,
                    comes_from_left,
                    tol,
                );
            } else {
                crossings += 1;
            }
        }
    }
    crossings % 2 == 1
}

/// After a ray hit a segment end, follows the outline through vertical
/// stretches and counts a crossing if it leaves on the opposite side.
fn continues_to_other_side(
    segments: &[Atom],
    mut i: usize,
    i_start: usize,
    point: Vector2D,
    comes_from_left: bool,
    tol: f64,
) -> usize {
    let n = segments.len();
    loop {
        match &segments[i] {
            Atom::Line(line) => {
                let x = line.end.x;
                if comes_from_left {
                    if x > point.x + tol {
                        return 1;
                    } else if x < point.x - tol {
                        return 0;
                    }
                } else if x < point.x - tol {
                    return 1;
                } else if x > point.x + tol {
                    return 0;
                }
                i = (i + 1) % n;
                if i == i_start {
                    return 0;
                }
            }
            other => {
                let bbox = other.bbox();
                let on_other_side = if comes_from_left {
                    bbox.max.is_some_and(|max| max.x > point.x + tol)
                } else {
                    bbox.min.is_some_and(|min| min.x < point.x - tol)
                };
                return usize::from(on_other_side);
            }
        }
    }
}
