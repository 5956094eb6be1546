use fpgeom_core::{GeomError, Result, Vector2D, TOL_MM};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Arc, Atom, GeomShape, Line, Polygon, ShapeKind};
use crate::tools::intersect_atomic::{intersect_atoms, AtomIntersectOptions};
use crate::tools::segment_util::{self, SegmentDirection};

/// Building block for [`CompoundPolygon::from_elements`].
#[derive(Debug, Clone, PartialEq)]
pub enum CompoundElement {
    /// Adds a line from the previous end to this point
    Point(Vector2D),
    Line(Line),
    Arc(Arc),
    Polygon(Polygon),
}

impl From<Vector2D> for CompoundElement {
    fn from(point: Vector2D) -> Self {
        CompoundElement::Point(point)
    }
}

impl From<Line> for CompoundElement {
    fn from(line: Line) -> Self {
        CompoundElement::Line(line)
    }
}

impl From<Arc> for CompoundElement {
    fn from(arc: Arc) -> Self {
        CompoundElement::Arc(arc)
    }
}

impl From<Polygon> for CompoundElement {
    fn from(polygon: Polygon) -> Self {
        CompoundElement::Polygon(polygon)
    }
}

/// An outline made of contiguous lines and arcs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundPolygon {
    segments: Vec<Atom>,
    pub close: bool,
}

/// Accumulates segments while enforcing continuity.
struct Builder {
    segments: Vec<Atom>,
    end: Option<Vector2D>,
}

impl Builder {
    fn is_last_end(&self, point: Vector2D) -> bool {
        self.end.is_some_and(|end| end.is_equal(point, TOL_MM))
    }

    fn push_point(&mut self, point: Vector2D) {
        if self.is_last_end(point) {
            return;
        }
        if let Some(end) = self.end {
            self.segments.push(Atom::Line(Line::new(end, point)));
        }
        self.end = Some(point);
    }

    fn push_segment(&mut self, mut segment: Atom) -> Result<()> {
        let (Some(start), Some(end)) = (segment.start(), segment.end()) else {
            return Err(GeomError::invalid("circles cannot be part of an outline").into());
        };
        if self.segments.is_empty() || self.is_last_end(start) {
            self.segments.push(segment);
        } else if self.is_last_end(end) {
            segment.reverse();
            self.segments.push(segment);
        } else {
            return Err(GeomError::invalid("geometries are not continuous").into());
        }
        self.end = segment.end();
        Ok(())
    }

    fn push_polygon(&mut self, polygon: &Polygon) -> Result<()> {
        let points = &polygon.points;
        match points.len() {
            0 => Err(GeomError::invalid("cannot build an outline from an empty polygon").into()),
            1 => {
                self.push_point(points[0]);
                Ok(())
            }
            _ => {
                if !self.segments.is_empty() && !self.is_last_end(points[0]) {
                    return Err(GeomError::invalid("geometries are not continuous").into());
                }
                for pair in points.windows(2) {
                    self.segments.push(Atom::Line(Line::new(pair[0], pair[1])));
                }
                if polygon.close {
                    self.segments
                        .push(Atom::Line(Line::new(points[points.len() - 1], points[0])));
                    self.end = Some(points[0]);
                } else {
                    self.end = Some(points[points.len() - 1]);
                }
                Ok(())
            }
        }
    }
}

impl CompoundPolygon {
    /// Chains the elements into one outline.
    ///
    /// Lines and arcs whose end (rather than start) touches the previous
    /// element are reversed. With `close`, a line back to the first point is
    /// added if needed.
    pub fn from_elements<I>(elements: I, close: bool) -> Result<Self>
    where
        I: IntoIterator<Item = CompoundElement>,
    {
        let mut builder = Builder {
            segments: Vec::new(),
            end: None,
        };
        for element in elements {
            match element {
                CompoundElement::Point(point) => builder.push_point(point),
                CompoundElement::Line(line) => builder.push_segment(Atom::Line(line))?,
                CompoundElement::Arc(arc) => builder.push_segment(Atom::Arc(arc))?,
                CompoundElement::Polygon(polygon) => builder.push_polygon(&polygon)?,
            }
        }

        let Some(first_start) = builder.segments.first().and_then(Atom::start) else {
            return Err(GeomError::invalid("an outline needs at least one segment").into());
        };
        if close && !builder.is_last_end(first_start) {
            builder.push_point(first_start);
        }
        Ok(Self {
            segments: builder.segments,
            close,
        })
    }

    pub fn from_points<I, P>(points: I, close: bool) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Vector2D>,
    {
        Self::from_elements(
            points
                .into_iter()
                .map(|p| CompoundElement::Point(p.into())),
            close,
        )
    }

    /// Outline made of another shape's atoms. Circles become full arcs.
    pub fn from_shape<S: GeomShape + ?Sized>(shape: &S) -> Self {
        let segments = shape
            .atoms()
            .into_iter()
            .map(|atom| match atom {
                Atom::Circle(circle) => Atom::Arc(Arc::new(
                    circle.center,
                    circle.center + Vector2D::new(circle.radius(), 0.0),
                    360.0,
                )),
                other => other,
            })
            .collect();
        Self {
            segments,
            close: shape.is_closed(),
        }
    }

    pub fn segments(&self) -> &[Atom] {
        &self.segments
    }

    pub fn has_arcs(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Atom::Arc(_)))
    }

    /// Clockwise in the y-down coordinate system.
    pub fn is_clockwise(&self) -> bool {
        is_outline_clockwise(&self.segments)
    }

    /// Reverses the outline if it runs counter-clockwise.
    pub fn make_clockwise(&mut self) {
        if !self.is_clockwise() {
            self.segments.reverse();
            for segment in &mut self.segments {
                segment.reverse();
            }
        }
    }

    pub fn simplify(&mut self, min_segment_length: f64, tol: f64) -> Result<()> {
        segment_util::remove_zero_length_segments(&mut self.segments, min_segment_length);
        if !segment_util::keep_only_outer_outline(&mut self.segments, tol)
            || !segment_util::merge_segments(&mut self.segments, tol)
        {
            return Err(GeomError::invalid("simplifying the outline collapses it").into());
        }
        Ok(())
    }
}

fn is_outline_clockwise(segments: &[Atom]) -> bool {
    let mut points = Vec::with_capacity(segments.len() * 2);
    for segment in segments {
        match segment {
            Atom::Line(line) => points.push(line.start),
            Atom::Arc(arc) => {
                points.push(arc.start());
                points.push(arc.mid());
            }
            Atom::Circle(_) => {}
        }
    }
    super::polygon::is_clockwise(&points)
}

/// Unit directions and outward normals at the start and end of a segment.
fn directions_and_normals(segment: &Atom, tol: f64) -> Result<([Vector2D; 2], [Vector2D; 2])> {
    match segment {
        Atom::Line(line) => {
            let direction = line.unit_direction(tol)?;
            let normal = -direction.orthogonal();
            Ok(([direction; 2], [normal; 2]))
        }
        Atom::Arc(arc) => {
            let n_start = (arc.start() - arc.center()).normalize(tol)?;
            let n_end = (arc.end() - arc.center()).normalize(tol)?;
            Ok((
                [n_start.orthogonal(), n_end.orthogonal()],
                [n_start, n_end],
            ))
        }
        Atom::Circle(_) => Err(GeomError::invalid("circles cannot be part of an outline").into()),
    }
}

fn wrap(i: isize, len: usize) -> usize {
    i.rem_euclid(len as isize) as usize
}

impl GeomShape for CompoundPolygon {
    fn kind(&self) -> ShapeKind {
        ShapeKind::CompoundPolygon
    }

    fn atoms(&self) -> Vec<Atom> {
        self.segments.clone()
    }

    fn translate(&mut self, vector: Vector2D) {
        for segment in &mut self.segments {
            segment.translate(vector);
        }
    }

    fn rotate(&mut self, angle: f64, origin: Vector2D) {
        for segment in &mut self.segments {
            segment.rotate(angle, origin);
        }
    }

    fn is_closed(&self) -> bool {
        self.close
    }

    fn is_point_inside_self(&self, point: Vector2D, strictly_inside: bool, tol: f64) -> bool {
        segment_util::is_point_inside_outline(&self.segments, point, strictly_inside, tol)
    }

    /// Offsets lines and arcs by `amount`. Gaps opened at convex corners are
    /// bridged with arcs, other neighbours are extended or trimmed to meet.
    fn inflate(&mut self, amount: f64, tol: f64) -> Result<()> {
        if amount == 0.0 {
            return Ok(());
        }
        let invalid =
            || GeomError::invalid(format!("inflating the outline by {} collapses it", amount));

        let mut segments = self.segments.clone();
        let mut points: Vec<Option<Vector2D>> = segments.iter().map(Atom::start).collect();
        let mut directions = Vec::with_capacity(segments.len());
        let mut normals = Vec::with_capacity(segments.len());

        let mut k = 0;
        while k < segments.len() {
            let (dirs, norms) = directions_and_normals(&segments[k], tol)?;
            match &mut segments[k] {
                Atom::Line(line) => {
                    line.translate(norms[0] * amount);
                }
                Atom::Arc(arc) => {
                    let radius = if arc.angle() > 0.0 {
                        arc.radius() + amount
                    } else {
                        arc.radius() - amount
                    };
                    if radius < 0.0 && arc.angle() > 0.0 {
                        segments.remove(k);
                        points.remove(k);
                        continue;
                    }
                    arc.set_radius(radius);
                }
                Atom::Circle(_) => {}
            }
            directions.push(dirs);
            normals.push(norms);
            k += 1;
        }

        let mut i: isize = if self.close { 0 } else { 1 };
        while (i as usize) < segments.len() {
            let len = segments.len();
            let (i1, i2) = (wrap(i - 1, len), wrap(i, len));
            let (s1, s2) = (segments[i1], segments[i2]);

            let (mut n1, mut d1) = (normals[i1][1], directions[i1][1]);
            if let Atom::Arc(arc) = &s1 {
                if arc.angle() < 0.0 {
                    (n1, d1) = (-n1, -d1);
                }
            }
            let mut n2 = normals[i2][0];
            if let Atom::Arc(arc) = &s2 {
                if arc.angle() < 0.0 {
                    n2 = -n2;
                }
            }

            if amount > 0.0 {
                let forward = match (n1 + n2).resize(amount, tol) {
                    Ok(forward) => forward,
                    Err(_) => {
                        if let (Atom::Line(_), Atom::Line(l2)) = (&s1, &s2) {
                            segment_util::move_segment_end(&mut segments[i1], l2.start);
                            i += 1;
                            continue;
                        }
                        d1.resize(amount, tol)?
                    }
                };
                let (Some(s1_end), Some(s2_start)) = (s1.end(), s2.start()) else {
                    return Err(invalid().into());
                };
                if s1_end.is_equal(s2_start, TOL_MM) {
                    i += 1;
                    continue;
                }
                if let Some(corner) = points[i2] {
                    if let Ok(arc) = Arc::from_three_points(s1_end, corner + forward, s2_start) {
                        if arc.angle() > 0.0 {
                            let (dirs, norms) = directions_and_normals(&Atom::Arc(arc), tol)?;
                            segments.insert(i2, Atom::Arc(arc));
                            directions.insert(i2, dirs);
                            normals.insert(i2, norms);
                            points.insert(i2, None);
                            i += 2;
                            continue;
                        }
                    }
                }
            }

            let ips = intersect_atoms(&s1, &s2, &AtomIntersectOptions::infinite(tol));
            let ip = match ips.as_slice() {
                [] => return Err(invalid().into()),
                [ip] => *ip,
                [ip1, ip2, ..] => {
                    let Some(s1_end) = s1.end() else {
                        return Err(invalid().into());
                    };
                    let mid_end = (s1.mid() + s1_end) / 2.0;
                    if mid_end.distance_to(*ip1) > mid_end.distance_to(*ip2) {
                        *ip2
                    } else {
                        *ip1
                    }
                }
            };

            let dir1 = SegmentDirection::of(&s1);
            let dir2 = SegmentDirection::of(&s2);
            segment_util::move_segment_end(&mut segments[i1], ip);
            segment_util::move_segment_start(&mut segments[i2], ip);

            let mut removed: isize = 0;
            let remove = |index: isize,
                          segments: &mut Vec<Atom>,
                          directions: &mut Vec<[Vector2D; 2]>,
                          normals: &mut Vec<[Vector2D; 2]>,
                          points: &mut Vec<Option<Vector2D>>| {
                let idx = wrap(index, segments.len());
                segments.remove(idx);
                directions.remove(idx);
                normals.remove(idx);
                points.remove(idx);
            };
            if segment_util::is_segment_flipped_or_zero(&segments[i2], dir2, tol) {
                remove(i, &mut segments, &mut directions, &mut normals, &mut points);
                removed += 1;
            }
            let i1 = wrap(i - 1, segments.len());
            if segment_util::is_segment_flipped_or_zero(&segments[i1], dir1, tol) {
                remove(i - 1, &mut segments, &mut directions, &mut normals, &mut points);
                removed += 1;
            }
            if segments.len() <= 1 {
                return Err(invalid().into());
            }
            if removed == 2 && points[wrap(i - 2, points.len())].is_none() {
                trace!("Dropping corner arc between two collapsed segments");
                remove(i - 2, &mut segments, &mut directions, &mut normals, &mut points);
                removed += 1;
            }
            i = (i + 1 - removed).max(0);
        }

        if amount < 0.0 && !is_outline_clockwise(&segments) {
            return Err(invalid().into());
        }
        if segments.len() <= 1 {
            return Err(invalid().into());
        }
        self.segments = segments;
        Ok(())
    }
}
