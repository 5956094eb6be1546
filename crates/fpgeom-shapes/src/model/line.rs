use fpgeom_core::{BoundingBox, Result, Vector2D, Vector3D};
use serde::{Deserialize, Serialize};

/// A straight line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Vector2D,
    pub end: Vector2D,
}

impl Line {
    pub fn new(start: impl Into<Vector2D>, end: impl Into<Vector2D>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    pub fn mid(&self) -> Vector2D {
        (self.start + self.end) / 2.0
    }

    pub fn direction(&self) -> Vector2D {
        self.end - self.start
    }

    /// Fails for zero-length lines.
    pub fn unit_direction(&self, tol: f64) -> Result<Vector2D> {
        self.direction().normalize(tol)
    }

    /// Angle of the line in degrees.
    pub fn angle(&self) -> f64 {
        self.direction().arg()
    }

    pub fn reverse(&mut self) -> &mut Self {
        std::mem::swap(&mut self.start, &mut self.end);
        self
    }

    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::from_corners(self.start, self.end)
    }

    pub fn translate(&mut self, vector: Vector2D) -> &mut Self {
        self.start += vector;
        self.end += vector;
        self
    }

    pub fn rotate(&mut self, angle: f64, origin: Vector2D) -> &mut Self {
        self.start.rotate(angle, origin);
        self.end.rotate(angle, origin);
        self
    }

    pub fn is_equal(&self, other: &Line, tol: f64) -> bool {
        self.start.is_equal(other.start, tol) && self.end.is_equal(other.end, tol)
    }

    /// Homogeneous representation `(a, b, c)` of the infinite line `ax + by + c = 0`.
    pub fn to_homogeneous(&self) -> Vector3D {
        Vector3D::new(
            self.start.y - self.end.y,
            self.end.x - self.start.x,
            self.start.x * self.end.y - self.start.y * self.end.x,
        )
    }

    /// Checks whether `point` lies on the segment (not the infinite line).
    pub fn is_point_on_self(&self, point: Vector2D, exclude_segment_ends: bool, tol: f64) -> bool {
        let (s, e) = (self.start, self.end);

        if (e.x - s.x).abs() <= tol {
            if (s.x - point.x).abs() > tol {
                return false;
            }
            return in_range(point.y, s.y, e.y, exclude_segment_ends, tol);
        }
        if (e.y - s.y).abs() <= tol {
            if (s.y - point.y).abs() > tol {
                return false;
            }
            return in_range(point.x, s.x, e.x, exclude_segment_ends, tol);
        }

        let se = e - s;
        let ps = point - s;
        let len = se.norm();
        if (se.x * ps.y - ps.x * se.y).abs() > tol * len {
            return false;
        }
        if len + 2.0 * tol < ps.norm() + point.distance_to(e) {
            return false;
        }
        if exclude_segment_ends {
            return !(point.is_equal(s, tol) || point.is_equal(e, tol));
        }
        true
    }

    /// Bounding box test only; callers must already know the point is on the
    /// infinite line.
    pub fn is_point_on_self_accelerated(
        &self,
        point: Vector2D,
        exclude_segment_ends: bool,
        tol: f64,
    ) -> bool {
        let min = self.start.min(self.end);
        let max = self.start.max(self.end);
        if point.x < min.x - tol
            || point.x > max.x + tol
            || point.y < min.y - tol
            || point.y > max.y + tol
        {
            return false;
        }
        if exclude_segment_ends
            && (point.is_equal(self.start, tol) || point.is_equal(self.end, tol))
        {
            return false;
        }
        true
    }

    /// Points sorted by their distance from the start of the line.
    pub fn sort_points_relative_to_start(&self, points: &[Vector2D]) -> Vec<Vector2D> {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| {
            self.start
                .distance_to(*a)
                .total_cmp(&self.start.distance_to(*b))
        });
        sorted
    }
}

fn in_range(value: f64, bound1: f64, bound2: f64, exclusive: bool, tol: f64) -> bool {
    let (lo, hi) = if bound1 <= bound2 {
        (bound1, bound2)
    } else {
        (bound2, bound1)
    };
    if exclusive {
        lo + tol < value && value < hi - tol
    } else {
        lo - tol <= value && value <= hi + tol
    }
}
