//! Union of two closed shapes
//!
//! Both outlines are cut at their intersection points without strict
//! merging. The union outline is then traced over the segments that are not
//! inside the other shape, switching shapes at intersection points.

use fpgeom_core::{GeomError, Result, Vector2D};
use tracing::{debug, trace};

use super::intersect::intersect;
use super::operation_handle::{Containment, GeomOperationHandle, IntersectOptions};
use super::segment_util;
use crate::model::{Atom, CompoundElement, CompoundPolygon, GeomShape, Line, Polygon, Shape};

/// Unites two closed shapes.
///
/// Overlapping shapes give one clockwise outline: a [`Polygon`], or a
/// [`CompoundPolygon`] if arcs remain. Disjoint shapes are both returned
/// unchanged. If one shape contains the other, only the outer one is
/// returned.
pub fn unite(
    shape1: &Shape,
    shape2: &Shape,
    min_segment_length: f64,
    tol: f64,
) -> Result<Vec<Shape>> {
    if !shape1.is_closed() || !shape2.is_closed() {
        return Err(GeomError::unsupported(
            "unite",
            format!("{} with {}", shape1.kind(), shape2.kind()),
        )
        .into());
    }

    let outline1 = clockwise(shape1);
    let outline2 = clockwise(shape2);
    let options = IntersectOptions {
        strict_intersection: false,
        cut_also_shape_2: true,
        min_segment_length,
        tol,
    };
    let handle = intersect(&outline1, &outline2, &options);

    if handle.intersections().len() <= 1 {
        return Ok(if starts_inside(&handle, 0) {
            vec![shape2.clone()]
        } else if starts_inside(&handle, 1) {
            vec![shape1.clone()]
        } else {
            vec![shape1.clone(), shape2.clone()]
        });
    }
    if is_inside(&handle, 0) {
        return Ok(vec![shape2.clone()]);
    }
    if is_inside(&handle, 1) {
        return Ok(vec![shape1.clone()]);
    }

    let mut walk = Walk::new(&handle);
    if walk.is_superposition() {
        debug!("Unite: {} lies on top of {}", shape1.kind(), shape2.kind());
        return Ok(vec![shape1.clone()]);
    }

    while let Some(start) = walk.next_start() {
        let Some(mut segments) = walk.trace(start) else {
            trace!("Unite: outline from {:?} does not close", start);
            continue;
        };
        segment_util::remove_zero_length_segments(&mut segments, min_segment_length);
        if !segment_util::merge_segments(&mut segments, tol) {
            return Err(GeomError::invalid("the united outline collapses").into());
        }
        let (united, is_clockwise) = outline_from_segments(segments)?;
        if is_clockwise {
            debug!(
                "Unite: {} and {} joined into a {}",
                shape1.kind(),
                shape2.kind(),
                united.kind()
            );
            return Ok(vec![united]);
        }
        // Enclosed gap between the shapes; its segments are used up now.
        trace!("Unite: skipping counter-clockwise outline from {:?}", start);
    }
    Err(GeomError::invalid("the outlines of the shapes could not be joined").into())
}

/// Polygon outlines may run either way; every other shape is clockwise.
fn clockwise(shape: &Shape) -> Shape {
    let mut shape = shape.clone();
    match &mut shape {
        Shape::Polygon(polygon) => polygon.make_clockwise(),
        Shape::CompoundPolygon(polygon) => polygon.make_clockwise(),
        _ => {}
    }
    shape
}

fn starts_inside(handle: &GeomOperationHandle<'_>, index: usize) -> bool {
    handle.containment(index).first() == Some(&Containment::Inside)
}

fn is_inside(handle: &GeomOperationHandle<'_>, index: usize) -> bool {
    handle
        .containment(index)
        .iter()
        .all(|c| *c == Containment::Inside)
}

fn outline_from_segments(segments: Vec<Atom>) -> Result<(Shape, bool)> {
    if segments.iter().any(|s| matches!(s, Atom::Arc(_))) {
        let elements = segments.into_iter().filter_map(|segment| match segment {
            Atom::Line(line) => Some(CompoundElement::from(line)),
            Atom::Arc(arc) => Some(CompoundElement::from(arc)),
            Atom::Circle(_) => None,
        });
        let polygon = CompoundPolygon::from_elements(elements, true)?;
        let is_clockwise = polygon.is_clockwise();
        Ok((Shape::from(polygon), is_clockwise))
    } else {
        let lines: Vec<Line> = segments
            .iter()
            .filter_map(|segment| match segment {
                Atom::Line(line) => Some(*line),
                _ => None,
            })
            .collect();
        let polygon = Polygon::from_lines(&lines, true);
        let is_clockwise = polygon.is_clockwise();
        Ok((Shape::from(polygon), is_clockwise))
    }
}

/// Segment picked by shape index and atom index.
type Cursor = (usize, usize);

/// Tracks which segments of both shapes are still free to join. Segments
/// inside the other shape are never free.
struct Walk<'h, 'a> {
    handle: &'h GeomOperationHandle<'a>,
    used: [Vec<bool>; 2],
}

impl<'h, 'a> Walk<'h, 'a> {
    fn new(handle: &'h GeomOperationHandle<'a>) -> Self {
        let used = [0usize, 1].map(|index| {
            handle
                .containment(index)
                .iter()
                .map(|c| *c == Containment::Inside)
                .collect()
        });
        Self { handle, used }
    }

    fn free_cursors(&self) -> impl Iterator<Item = Cursor> + '_ {
        (0..2usize)
            .flat_map(move |index| (0..self.used[index].len()).map(move |i| (index, i)))
            .filter(move |(index, i)| !self.used[*index][*i])
    }

    fn starts_at_intersection(&self, (index, i): Cursor) -> bool {
        self.handle.atoms(index)[i]
            .start()
            .is_some_and(|p| self.handle.is_point_an_intersection(p))
    }

    fn leaves_other_shape(&self, (index, i): Cursor) -> bool {
        let count = self.used[index].len();
        self.handle.containment(index)[(i + count - 1) % count] == Containment::Inside
    }

    /// Both outlines fully outside each other yet meeting at every vertex.
    fn is_superposition(&self) -> bool {
        self.used.iter().flatten().all(|used| !used)
            && (0..self.used[0].len()).all(|i| self.starts_at_intersection((0, i)))
    }

    /// Picks where to start tracing: preferably where a shape leaves the
    /// other one, then at a point that is not shared with the other shape.
    fn next_start(&self) -> Option<Cursor> {
        self.free_cursors()
            .find(|cursor| self.leaves_other_shape(*cursor))
            .or_else(|| {
                self.free_cursors()
                    .find(|cursor| !self.starts_at_intersection(*cursor))
            })
            .or_else(|| self.free_cursors().next())
    }

    /// Free segment of shape `index` starting at `point`.
    fn free_from(&self, index: usize, point: Vector2D) -> Option<Cursor> {
        let tol = self.handle.tol();
        self.handle
            .atoms(index)
            .iter()
            .enumerate()
            .find(|(i, atom)| {
                !self.used[index][*i]
                    && atom
                        .start()
                        .is_some_and(|p| p.is_equal_accelerated(point, tol))
            })
            .map(|(i, _)| (index, i))
    }

    /// Joins free segments from `start` until the outline closes. At an
    /// intersection point the other shape takes over if it can.
    fn trace(&mut self, start: Cursor) -> Option<Vec<Atom>> {
        let tol = self.handle.tol();
        let (mut index, mut i) = start;
        let origin = self.handle.atoms(index)[i].start()?;
        let mut segments = Vec::new();
        loop {
            self.used[index][i] = true;
            let atom = self.handle.atoms(index)[i];
            let end = atom.end()?;
            segments.push(atom);
            if end.is_equal_accelerated(origin, tol) {
                return Some(segments);
            }
            let order = if self.handle.is_point_an_intersection(end) {
                [1 - index, index]
            } else {
                [index, 1 - index]
            };
            (index, i) = order
                .into_iter()
                .find_map(|shape| self.free_from(shape, end))?;
        }
    }
}
