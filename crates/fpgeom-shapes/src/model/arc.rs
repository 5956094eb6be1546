use std::f64::consts::TAU;

use fpgeom_core::{tol_deg, BoundingBox, GeomError, Result, Vector2D, TOL_MM};
use serde::{Deserialize, Serialize};

/// A circular arc.
///
/// The end point is derived by rotating `start` around `center` by `angle`
/// degrees. The angle is kept in `(-360, 360]`; its sign is the sweep sense.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    center: Vector2D,
    start: Vector2D,
    angle: f64,
}

/// Reduces any angle into `(-360, 360]` keeping its sweep sense. Whole
/// turns in either direction become `360`.
pub(crate) fn normalize_sweep(angle: f64) -> f64 {
    let reduced = angle % 360.0;
    if reduced == 0.0 && angle != 0.0 {
        360.0
    } else {
        reduced
    }
}

impl Arc {
    pub fn new(center: impl Into<Vector2D>, start: impl Into<Vector2D>, angle: f64) -> Self {
        Self {
            center: center.into(),
            start: start.into(),
            angle: normalize_sweep(angle),
        }
    }

    /// Arc of `angle` degrees whose midpoint is `mid`.
    pub fn from_center_mid(
        center: impl Into<Vector2D>,
        mid: impl Into<Vector2D>,
        angle: f64,
    ) -> Self {
        let center = center.into();
        let angle = normalize_sweep(angle);
        let (radius, mid_angle) = mid.into().to_polar(center);
        Self {
            center,
            start: Vector2D::from_polar(radius, mid_angle - angle / 2.0, center),
            angle,
        }
    }

    /// Arc of `angle` degrees ending at `end`.
    pub fn from_center_end(
        center: impl Into<Vector2D>,
        end: impl Into<Vector2D>,
        angle: f64,
    ) -> Self {
        let center = center.into();
        let angle = normalize_sweep(angle);
        let (radius, end_angle) = end.into().to_polar(center);
        Self {
            center,
            start: Vector2D::from_polar(radius, end_angle - angle, center),
            angle,
        }
    }

    /// Arc from `start` to `end` around `center`, the short way unless `long_way`.
    pub fn from_center_start_end(
        center: impl Into<Vector2D>,
        start: impl Into<Vector2D>,
        end: impl Into<Vector2D>,
        long_way: bool,
    ) -> Result<Self> {
        let center = center.into();
        let start = start.into();
        let (start_radius, start_angle) = start.to_polar(center);
        let (end_radius, end_angle) = end.into().to_polar(center);
        if (start_radius - end_radius).abs() > TOL_MM {
            return Err(GeomError::invalid(
                "start and end points must be at equal distance from the center",
            )
            .into());
        }

        let mut angle = normalize_sweep(end_angle - start_angle);
        if long_way {
            if angle.abs() < 180.0 {
                angle = -(360.0 - angle.abs()).copysign(angle);
            }
            if angle == -180.0 {
                angle = 180.0;
            }
        } else {
            if angle.abs() > 180.0 {
                angle = -(angle.abs() - 360.0).copysign(angle);
            }
            if angle == 180.0 {
                angle = -180.0;
            }
        }
        Ok(Self {
            center,
            start,
            angle,
        })
    }

    /// Arc through three points, sweeping from `start` via `mid` to `end`.
    pub fn from_three_points(
        start: impl Into<Vector2D>,
        mid: impl Into<Vector2D>,
        end: impl Into<Vector2D>,
    ) -> Result<Self> {
        let start = start.into();
        let mid = mid.into();
        let end = end.into();

        let (mut p1, mut p2, mut p3) = (start, mid, end);
        if (p2.x - p1.x).abs() < TOL_MM {
            (p1, p2, p3) = (p2, p3, p1);
        } else if (p3.x - p2.x).abs() < TOL_MM {
            (p1, p2, p3) = (p3, p1, p2);
        }
        if ((p2.x - p1.x).abs() < TOL_MM && (p3.x - p2.x).abs() < TOL_MM)
            || ((p2.y - p1.y).abs() < TOL_MM && (p3.y - p2.y).abs() < TOL_MM)
        {
            return Err(GeomError::degenerate("three points do not form an arc").into());
        }

        let ma = (p2.y - p1.y) / (p2.x - p1.x);
        let mb = (p3.y - p2.y) / (p3.x - p2.x);
        if (mb - ma).abs() < TOL_MM || !ma.is_finite() || !mb.is_finite() {
            return Err(GeomError::degenerate("three points do not form an arc").into());
        }

        let center_x =
            (ma * mb * (p1.y - p3.y) + mb * (p1.x + p2.x) - ma * (p2.x + p3.x)) / (2.0 * (mb - ma));
        let center_y = if ma.abs() < TOL_MM {
            (-1.0 / mb) * (center_x - (p2.x + p3.x) / 2.0) + (p2.y + p3.y) / 2.0
        } else {
            (-1.0 / ma) * (center_x - (p1.x + p2.x) / 2.0) + (p1.y + p2.y) / 2.0
        };
        let center = Vector2D::new(center_x, center_y);

        let start_angle = (start.y - center.y).atan2(start.x - center.x);
        let mut end_angle = (end.y - center.y).atan2(end.x - center.x);
        let clockwise = (mid - start).cross_product(end - mid).z < 0.0;
        if clockwise {
            if end_angle > start_angle {
                end_angle -= TAU;
            }
        } else if end_angle < start_angle {
            end_angle += TAU;
        }

        Ok(Self {
            center,
            start,
            angle: normalize_sweep((end_angle - start_angle).to_degrees()),
        })
    }

    pub fn center(&self) -> Vector2D {
        self.center
    }

    pub fn start(&self) -> Vector2D {
        self.start
    }

    pub fn end(&self) -> Vector2D {
        self.start.rotated(self.angle, self.center)
    }

    pub fn mid(&self) -> Vector2D {
        self.start.rotated(self.angle / 2.0, self.center)
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Sets the sweep without normalization; merges may reach a full turn.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    pub fn radius(&self) -> f64 {
        self.start.distance_to(self.center)
    }

    /// Moves the start point radially so the arc gets the new radius.
    pub fn set_radius(&mut self, radius: f64) {
        let (_, start_angle) = self.start.to_polar(self.center);
        self.start = Vector2D::from_polar(radius, start_angle, self.center);
    }

    pub fn length(&self) -> f64 {
        self.angle.to_radians().abs() * self.radius()
    }

    /// Sign of the sweep: 1, -1 or 0.
    pub fn direction(&self) -> i32 {
        if self.angle > 0.0 {
            1
        } else if self.angle < 0.0 {
            -1
        } else {
            0
        }
    }

    /// Replaces the start point and keeps the sweep angle.
    pub fn set_start(&mut self, start: Vector2D) {
        self.start = start;
    }

    /// Replaces the start point and keeps the end point where it is.
    pub fn move_start(&mut self, start: Vector2D) {
        let end_angle = (self.end() - self.center).arg();
        let new_start_angle = (start - self.center).arg();
        self.angle = self.sweep_with_same_sense(end_angle - new_start_angle);
        self.start = start;
    }

    /// Replaces the end point and keeps the start point where it is.
    pub fn move_end(&mut self, end: Vector2D) {
        let end_angle = (end - self.center).arg();
        let start_angle = (self.start - self.center).arg();
        self.angle = self.sweep_with_same_sense(end_angle - start_angle);
    }

    fn sweep_with_same_sense(&self, angle: f64) -> f64 {
        if self.angle * angle >= 0.0 {
            normalize_sweep(angle)
        } else {
            normalize_sweep(360.0f64.copysign(self.angle) + angle)
        }
    }

    pub fn reverse(&mut self) -> &mut Self {
        self.start = self.end();
        self.angle = -self.angle;
        self
    }

    pub fn translate(&mut self, vector: Vector2D) -> &mut Self {
        self.center += vector;
        self.start += vector;
        self
    }

    pub fn rotate(&mut self, angle: f64, origin: Vector2D) -> &mut Self {
        self.center.rotate(angle, origin);
        self.start.rotate(angle, origin);
        self
    }

    pub fn bbox(&self) -> BoundingBox {
        let start = self.start;
        let end = self.end();
        let r = self.radius();
        let top = self.center - Vector2D::new(0.0, r);
        let left = self.center - Vector2D::new(r, 0.0);
        let bottom = self.center + Vector2D::new(0.0, r);
        let right = self.center + Vector2D::new(r, 0.0);

        let min_x = if self.is_point_on_self(left, false, TOL_MM) {
            left.x
        } else {
            start.x.min(end.x)
        };
        let min_y = if self.is_point_on_self(top, false, TOL_MM) {
            top.y
        } else {
            start.y.min(end.y)
        };
        let max_x = if self.is_point_on_self(right, false, TOL_MM) {
            right.x
        } else {
            start.x.max(end.x)
        };
        let max_y = if self.is_point_on_self(bottom, false, TOL_MM) {
            bottom.y
        } else {
            start.y.max(end.y)
        };
        BoundingBox::from_corners(Vector2D::new(min_x, min_y), Vector2D::new(max_x, max_y))
    }

    pub fn is_equal(&self, other: &Arc, tol: f64) -> bool {
        self.start.is_equal(other.start, tol)
            && (self.angle - other.angle).abs() <= tol
            && self.center.is_equal(other.center, tol)
    }

    /// Angle of `point` around the center, measured from the start and
    /// unwrapped towards the end of the arc.
    pub fn point_to_angle_relative_to_self(&self, point: Vector2D) -> f64 {
        let start_angle = (self.start - self.center).arg();
        let point_angle = (point - self.center).arg();
        let mut angle = point_angle - start_angle;
        let end_angle = start_angle + self.angle;
        if end_angle - angle <= -180.0 {
            angle -= 360.0;
        } else if end_angle - angle > 180.0 {
            angle += 360.0;
        }
        angle
    }

    /// `(radius, angle)` of `point` relative to center and start, with the
    /// angle signed like the sweep.
    pub fn point_to_local_polar_form(&self, point: Vector2D, tol: f64) -> (f64, f64) {
        let radius = point.distance_to(self.center);
        let mut angle = self.point_to_angle_relative_to_self(point);
        let outside_tolerance = match tol_deg(tol, radius) {
            Some(tol_d) => angle.abs() >= tol_d,
            None => true,
        };
        if outside_tolerance {
            angle = angle.rem_euclid(360.0);
            if self.angle < 0.0 && angle > 0.0 {
                angle -= 360.0;
            }
        }
        (radius, angle)
    }

    pub fn is_point_on_self(&self, point: Vector2D, exclude_segment_ends: bool, tol: f64) -> bool {
        let radius = self.radius();
        if (radius - point.distance_to(self.center)).abs() > tol {
            return false;
        }
        if radius <= tol {
            return true;
        }

        let tol_d = (tol / radius).to_degrees();
        let mut angle = self.point_to_angle_relative_to_self(point);
        if angle.abs() >= tol_d {
            angle = angle.rem_euclid(360.0);
            if self.angle < 0.0 && angle > 0.0 {
                angle -= 360.0;
            }
        }

        if exclude_segment_ends {
            if angle.abs() < tol_d {
                return false;
            }
            if self.angle < 0.0 {
                angle >= self.angle + tol_d
            } else {
                angle <= self.angle - tol_d
            }
        } else if self.angle < 0.0 {
            angle >= self.angle - tol_d
        } else {
            angle <= self.angle + tol_d
        }
    }

    /// Angular range test only; callers must already know the point is on
    /// the underlying circle.
    pub fn is_point_on_self_accelerated(
        &self,
        point: Vector2D,
        exclude_segment_ends: bool,
        tol: f64,
    ) -> bool {
        let radius = self.radius();
        if radius <= tol {
            return !exclude_segment_ends;
        }
        let tol_rad = tol / radius;

        let point_center = point - self.center;
        let start_center = self.start - self.center;
        let angle_point = point_center.y.atan2(point_center.x);
        let angle_start = start_center.y.atan2(start_center.x);
        let angle_end = self.angle.to_radians();

        let mut angle_point_start = (angle_point - angle_start).rem_euclid(TAU);
        if angle_point_start <= tol_rad || (angle_point_start - TAU).abs() <= tol_rad {
            return !exclude_segment_ends;
        }
        if angle_end < 0.0 && angle_point_start > 0.0 {
            angle_point_start -= TAU;
        }
        let angle_point_end = (angle_point_start - angle_end).rem_euclid(TAU);
        if angle_point_end <= tol_rad || (angle_point_end - TAU).abs() <= tol_rad {
            return !exclude_segment_ends;
        }

        if self.angle < 0.0 {
            angle_point_start >= angle_end
        } else {
            angle_point_start <= angle_end
        }
    }

    /// Points with their local polar form, ordered along the sweep.
    pub fn sort_points_relative_to_start(
        &self,
        points: &[Vector2D],
        tol: f64,
    ) -> Vec<(f64, f64, Vector2D)> {
        let mut local: Vec<(f64, f64, Vector2D)> = points
            .iter()
            .map(|p| {
                let (r, phi) = self.point_to_local_polar_form(*p, tol);
                (r, phi, *p)
            })
            .collect();
        local.sort_by(|a, b| a.1.total_cmp(&b.1));
        if self.angle < 0.0 {
            local.reverse();
        }
        local
    }
}
