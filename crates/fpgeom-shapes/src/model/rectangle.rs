use fpgeom_core::{
    round_to_grid_down, round_to_grid_nearest, round_to_grid_up, tol_deg, BoundingBox, GeomError,
    Result, Vector2D, TOL_MM,
};
use serde::{Deserialize, Serialize};

use super::{Atom, GeomShape, Line, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub center: Vector2D,
    pub size: Vector2D,
    /// Rotation angle in degrees, kept in `[-180, 180)`
    pub angle: f64,
}

impl Rectangle {
    pub fn new(center: impl Into<Vector2D>, size: impl Into<Vector2D>, angle: f64) -> Self {
        let mut rect = Self {
            center: center.into(),
            size: size.into().positive(),
            angle: 0.0,
        };
        rect.set_angle(angle);
        rect
    }

    /// Rectangle spanning two opposite corners, rotated around their midpoint.
    pub fn from_corners(start: impl Into<Vector2D>, end: impl Into<Vector2D>, angle: f64) -> Self {
        let start = start.into();
        let end = end.into();
        Self::new((start + end) / 2.0, end - start, angle)
    }

    /// Rectangle with its (unrotated) top left corner at `start`.
    pub fn from_start_size(
        start: impl Into<Vector2D>,
        size: impl Into<Vector2D>,
        angle: f64,
    ) -> Self {
        let start = start.into();
        let size = size.into();
        Self::new(start + size / 2.0, size, angle)
    }

    pub fn from_bbox(bbox: &BoundingBox) -> Result<Self> {
        Ok(Self::new(bbox.center()?, bbox.size()?, 0.0))
    }

    /// Stores the angle in `[-180, 180)`. Multiples of 90 degrees are folded
    /// into the size so axis-aligned rectangles always have angle 0.
    pub fn set_angle(&mut self, angle: f64) {
        let angle = (angle + 180.0).rem_euclid(360.0) - 180.0;
        let half_diagonal = self.size.norm() / 2.0;
        let tol_d = tol_deg(TOL_MM, half_diagonal).unwrap_or(0.0);
        let quarter_turns = (angle / 90.0).round();
        if (angle - quarter_turns * 90.0).abs() <= tol_d {
            if (quarter_turns as i64).rem_euclid(2) == 1 {
                self.size = Vector2D::new(self.size.y, self.size.x);
            }
            self.angle = 0.0;
        } else {
            self.angle = angle;
        }
    }

    pub fn min_dimension(&self) -> f64 {
        self.size.x.min(self.size.y)
    }

    pub fn max_dimension(&self) -> f64 {
        self.size.x.max(self.size.y)
    }

    pub fn left(&self) -> f64 {
        self.center.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f64 {
        self.center.x + self.size.x / 2.0
    }

    pub fn top(&self) -> f64 {
        self.center.y - self.size.y / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.center.y + self.size.y / 2.0
    }

    /// Corners in winding order, starting at the (unrotated) top left.
    pub fn corners(&self) -> [Vector2D; 4] {
        let mut v1 = -self.size / 2.0;
        let mut v2 = Vector2D::new(-v1.x, v1.y);
        if self.angle != 0.0 {
            v1.rotate(self.angle, Vector2D::zero());
            v2.rotate(self.angle, Vector2D::zero());
        }
        [
            self.center + v1,
            self.center + v2,
            self.center - v1,
            self.center - v2,
        ]
    }

    pub fn lines(&self) -> [Line; 4] {
        let [a, b, c, d] = self.corners();
        [Line::new(a, b), Line::new(b, c), Line::new(c, d), Line::new(d, a)]
    }

    /// Snaps the edges onto the grid, outwards or to the nearest grid line.
    pub fn round_to_grid(&mut self, grid: f64, outwards: bool) -> &mut Self {
        let (left, top, right, bottom) = if outwards {
            let eps = grid / 100.0;
            (
                round_to_grid_down(self.left(), grid, eps),
                round_to_grid_down(self.top(), grid, eps),
                round_to_grid_up(self.right(), grid, eps),
                round_to_grid_up(self.bottom(), grid, eps),
            )
        } else {
            (
                round_to_grid_nearest(self.left(), grid),
                round_to_grid_nearest(self.top(), grid),
                round_to_grid_nearest(self.right(), grid),
                round_to_grid_nearest(self.bottom(), grid),
            )
        };
        self.center = Vector2D::new((left + right) / 2.0, (top + bottom) / 2.0);
        self.size = Vector2D::new(right - left, bottom - top);
        self
    }
}

impl GeomShape for Rectangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn atoms(&self) -> Vec<Atom> {
        self.lines().into_iter().map(Atom::Line).collect()
    }

    fn translate(&mut self, vector: Vector2D) {
        self.center += vector;
    }

    fn rotate(&mut self, angle: f64, origin: Vector2D) {
        if angle == 0.0 {
            return;
        }
        self.center.rotate(angle, origin);
        self.set_angle(self.angle + angle);
    }

    fn bbox(&self) -> BoundingBox {
        BoundingBox::from_points(self.corners())
    }

    fn is_point_inside_self(&self, point: Vector2D, strictly_inside: bool, tol: f64) -> bool {
        if self.angle == 0.0 {
            return if strictly_inside {
                self.left() + tol < point.x
                    && point.x < self.right() - tol
                    && self.top() + tol < point.y
                    && point.y < self.bottom() - tol
            } else {
                self.left() - tol <= point.x
                    && point.x <= self.right() + tol
                    && self.top() - tol <= point.y
                    && point.y <= self.bottom() + tol
            };
        }

        let lines = self.lines();
        if lines.iter().any(|l| l.is_point_on_self(point, false, tol)) {
            return !strictly_inside;
        }
        lines
            .iter()
            .all(|l| l.direction().cross_product(point - l.start).z >= 0.0)
    }

    fn inflate(&mut self, amount: f64, tol: f64) -> Result<()> {
        if amount < 0.0 && -amount > self.min_dimension() / 2.0 - tol {
            return Err(GeomError::invalid(format!(
                "deflating a {} x {} rectangle by {} would invert it",
                self.size.x, self.size.y, -amount
            ))
            .into());
        }
        self.size += Vector2D::new(2.0 * amount, 2.0 * amount);
        Ok(())
    }
}
