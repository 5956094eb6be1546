use fpgeom_core::{
    round_to_grid_down, round_to_grid_nearest, round_to_grid_up, BoundingBox, GeomError, Result,
    Vector2D, MIN_SEGMENT_LENGTH, TOL_MM,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Atom, GeomShape, Line, Rectangle, ShapeKind};
use crate::tools::intersect_atomic::{intersect_lines, AtomIntersectOptions};
use crate::tools::segment_util;

/// A polygon made of straight segments between consecutive points.
///
/// Closed polygons connect the last point back to the first. Shapes that
/// inflate are expected to be ordered clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Vector2D>,
    pub close: bool,
}

impl Polygon {
    /// Closed polygon through the given points.
    pub fn new<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Vector2D>,
    {
        Self::with_closure(points, true)
    }

    /// Open polyline through the given points.
    pub fn open<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Vector2D>,
    {
        Self::with_closure(points, false)
    }

    pub fn with_closure<I, P>(points: I, close: bool) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Vector2D>,
    {
        let mut polygon = Self {
            points: points.into_iter().map(Into::into).collect(),
            close,
        };
        polygon.remove_duplicate_points(TOL_MM);
        polygon
    }

    /// Polygon through the start points of the lines (and the last end
    /// point for open polygons).
    pub fn from_lines(lines: &[Line], close: bool) -> Self {
        let mut points: Vec<Vector2D> = lines.iter().map(|line| line.start).collect();
        if !close {
            if let Some(last) = lines.last() {
                points.push(last.end);
            }
        }
        Self::with_closure(points, close)
    }

    pub fn from_rectangle(rect: &Rectangle) -> Self {
        Self::new(rect.corners())
    }

    pub fn from_bbox(bbox: &BoundingBox) -> Result<Self> {
        Ok(Self::new([
            bbox.top_left()?,
            bbox.top_right()?,
            bbox.bottom_right()?,
            bbox.bottom_left()?,
        ]))
    }

    /// Mirrors all points at the vertical line `x = x_mirror`.
    pub fn mirror_x(&mut self, x_mirror: f64) -> &mut Self {
        for point in &mut self.points {
            point.x = 2.0 * x_mirror - point.x;
        }
        self
    }

    /// Mirrors all points at the horizontal line `y = y_mirror`.
    pub fn mirror_y(&mut self, y_mirror: f64) -> &mut Self {
        for point in &mut self.points {
            point.y = 2.0 * y_mirror - point.y;
        }
        self
    }

    pub fn segments(&self) -> Vec<Line> {
        let num = self.points.len();
        let num_lines = if self.close {
            num
        } else {
            num.saturating_sub(1)
        };
        (0..num_lines)
            .map(|i| Line::new(self.points[i], self.points[(i + 1) % num]))
            .collect()
    }

    /// Clockwise in the y-down coordinate system.
    pub fn is_clockwise(&self) -> bool {
        is_clockwise(&self.points)
    }

    pub fn make_clockwise(&mut self) {
        if !self.is_clockwise() {
            self.points.reverse();
        }
    }

    /// Removes loops from a self-intersecting outline and merges collinear
    /// segments.
    pub fn simplify(&mut self, min_segment_length: f64, tol: f64) -> Result<()> {
        let mut segments: Vec<Atom> = self.segments().into_iter().map(Atom::Line).collect();
        segment_util::remove_zero_length_segments(&mut segments, min_segment_length);
        if !segment_util::keep_only_outer_outline(&mut segments, tol)
            || !segment_util::merge_segments(&mut segments, tol)
        {
            return Err(GeomError::invalid("simplifying the polygon collapses it").into());
        }
        self.set_points_from_segments(&segments);
        Ok(())
    }

    /// Snaps points to the grid. With `outwards`, every edge moves away from
    /// the inside of the polygon.
    pub fn round_to_grid(&mut self, grid: f64, outwards: bool) -> &mut Self {
        if !outwards {
            for point in &mut self.points {
                point.x = round_to_grid_nearest(point.x, grid);
                point.y = round_to_grid_nearest(point.y, grid);
            }
            return self;
        }

        let clockwise = self.is_clockwise();
        let eps = grid / 100.0;
        let round_up = |v: f64| {
            if clockwise {
                round_to_grid_up(v, grid, eps)
            } else {
                round_to_grid_down(v, grid, eps)
            }
        };
        let round_down = |v: f64| {
            if clockwise {
                round_to_grid_down(v, grid, eps)
            } else {
                round_to_grid_up(v, grid, eps)
            }
        };

        let num = self.points.len();
        for i in 0..num {
            let j = (i + 1) % num;
            let (p1, p2) = (self.points[i], self.points[j]);
            if p1.x < p2.x {
                self.points[i].y = round_down(p1.y);
                self.points[j].y = round_down(p2.y);
            } else if p1.x > p2.x {
                self.points[i].y = round_up(p1.y);
                self.points[j].y = round_up(p2.y);
            }
            let (p1, p2) = (self.points[i], self.points[j]);
            if p1.y > p2.y {
                self.points[i].x = round_down(p1.x);
                self.points[j].x = round_down(p2.x);
            } else if p1.y < p2.y {
                self.points[i].x = round_up(p1.x);
                self.points[j].x = round_up(p2.x);
            }
        }
        self
    }

    fn set_points_from_segments(&mut self, segments: &[Atom]) {
        self.points = segments.iter().filter_map(Atom::start).collect();
        if !self.close {
            if let Some(end) = segments.last().and_then(Atom::end) {
                self.points.push(end);
            }
        }
    }

    fn remove_duplicate_points(&mut self, tol: f64) {
        let mut i = if self.close { 0 } else { 1 };
        while i < self.points.len() && self.points.len() > 1 {
            let prev = (i + self.points.len() - 1) % self.points.len();
            if self.points[i].is_equal(self.points[prev], tol) {
                self.points.remove(prev);
            } else {
                i += 1;
            }
        }
    }
}

pub(crate) fn is_clockwise(points: &[Vector2D]) -> bool {
    let num = points.len();
    let sum: f64 = (0..num)
        .map(|i| {
            let p1 = points[i];
            let p2 = points[(i + 1) % num];
            (p2.x - p1.x) * (p2.y + p1.y)
        })
        .sum();
    sum < 0.0
}

impl GeomShape for Polygon {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn atoms(&self) -> Vec<Atom> {
        self.segments().into_iter().map(Atom::Line).collect()
    }

    fn translate(&mut self, vector: Vector2D) {
        for point in &mut self.points {
            *point += vector;
        }
    }

    fn rotate(&mut self, angle: f64, origin: Vector2D) {
        if angle == 0.0 {
            return;
        }
        for point in &mut self.points {
            point.rotate(angle, origin);
        }
    }

    fn bbox(&self) -> BoundingBox {
        BoundingBox::from_points(self.points.iter().copied())
    }

    fn is_closed(&self) -> bool {
        self.close
    }

    fn is_point_inside_self(&self, point: Vector2D, strictly_inside: bool, tol: f64) -> bool {
        segment_util::is_point_inside_outline(&self.atoms(), point, strictly_inside, tol)
    }

    /// Offsets every edge by `amount` and re-intersects neighbouring edges.
    ///
    /// Corners sharper than 90 degrees get a bevel edge when growing. Only
    /// clockwise polygons can be shrunk; the result is not checked for
    /// self-intersections beyond that.
    fn inflate(&mut self, amount: f64, tol: f64) -> Result<()> {
        let invalid =
            || GeomError::invalid(format!("inflating the polygon by {} collapses it", amount));

        let mut segments = self.segments();
        let mut points = self.points.clone();
        let mut directions = Vec::with_capacity(segments.len());
        let mut orthogonals = Vec::with_capacity(segments.len());
        for segment in &mut segments {
            let direction = segment.unit_direction(tol)?;
            let orthogonal = -direction.orthogonal();
            segment.translate(orthogonal * amount);
            directions.push(direction);
            orthogonals.push(orthogonal);
        }

        let mut needs_simplification = false;
        let mut i = if self.close { 0 } else { 1 };
        while i < segments.len() {
            let prev = (i + segments.len() - 1) % segments.len();
            if directions[i].dot(directions[prev]) <= -tol {
                needs_simplification = true;
                if amount > 0.0 {
                    let forward = (orthogonals[i] + orthogonals[prev])
                        .normalize(tol)
                        .map_err(|_| invalid())?;
                    let forward_orthogonal = forward.orthogonal();
                    let start = points[i] + forward.resize(amount, tol)?;
                    segments.insert(i, Line::new(start, start + forward_orthogonal));
                    directions.insert(i, forward_orthogonal);
                    orthogonals.insert(i, forward);
                    points.insert(i, points[0]);
                }
            }

            let prev = (i + segments.len() - 1) % segments.len();
            let pts = intersect_lines(
                &segments[prev],
                &segments[i],
                &AtomIntersectOptions::infinite(tol),
            );
            match pts.first() {
                None => {
                    segments[prev].end = segments[i].end;
                    segments.remove(i);
                    directions.remove(i);
                    orthogonals.remove(i);
                    points.remove(i);
                }
                Some(pt) => {
                    segments[prev].end = *pt;
                    segments[i].start = *pt;
                    if segments[prev]
                        .start
                        .is_equal_accelerated(segments[prev].end, tol)
                    {
                        segments.remove(prev);
                        directions.remove(prev);
                        orthogonals.remove(prev);
                        points.remove(prev);
                    } else {
                        i += 1;
                    }
                }
            }
        }

        let mut atoms: Vec<Atom> = segments.into_iter().map(Atom::Line).collect();
        if amount < 0.0 {
            if !self.is_clockwise() {
                return Err(invalid().into());
            }
            segment_util::remove_zero_length_segments(&mut atoms, MIN_SEGMENT_LENGTH);
        }
        if atoms.len() <= 2 {
            return Err(invalid().into());
        }

        self.set_points_from_segments(&atoms);
        if needs_simplification {
            debug!("Simplifying polygon with {} points after inflate", self.points.len());
            self.simplify(MIN_SEGMENT_LENGTH, tol)?;
        }
        Ok(())
    }
}
