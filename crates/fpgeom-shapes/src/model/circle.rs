use fpgeom_core::{BoundingBox, GeomError, Result, Vector2D};
use serde::{Deserialize, Serialize};

use super::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vector2D,
    radius: f64,
}

impl Circle {
    pub fn new(center: impl Into<Vector2D>, radius: f64) -> Self {
        Self {
            center: center.into(),
            radius: radius.abs(),
        }
    }

    /// The full circle an arc lies on.
    pub fn from_arc(arc: &Arc) -> Self {
        Self::new(arc.center(), arc.radius())
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius.abs();
    }

    /// Rightmost point, used as the representative point of the outline.
    pub fn mid(&self) -> Vector2D {
        self.center + Vector2D::new(self.radius, 0.0)
    }

    pub fn length(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }

    pub fn bbox(&self) -> BoundingBox {
        let r = Vector2D::new(self.radius, self.radius);
        BoundingBox::from_corners(self.center - r, self.center + r)
    }

    pub fn translate(&mut self, vector: Vector2D) -> &mut Self {
        self.center += vector;
        self
    }

    pub fn rotate(&mut self, angle: f64, origin: Vector2D) -> &mut Self {
        self.center.rotate(angle, origin);
        self
    }

    pub fn inflate(&mut self, amount: f64, tol: f64) -> Result<&mut Self> {
        if amount < 0.0 && -amount > self.radius - tol {
            return Err(GeomError::invalid(format!(
                "deflating a circle of radius {} by {} would invert it",
                self.radius, -amount
            ))
            .into());
        }
        self.radius += amount;
        Ok(self)
    }

    pub fn is_equal(&self, other: &Circle, tol: f64) -> bool {
        self.center.is_equal(other.center, tol) && (self.radius - other.radius).abs() <= tol
    }

    pub fn is_point_on_self(&self, point: Vector2D, tol: f64) -> bool {
        (self.radius - point.distance_to(self.center)).abs() <= tol
    }

    pub fn is_point_inside_self(&self, point: Vector2D, strictly_inside: bool, tol: f64) -> bool {
        let distance = point.distance_to(self.center);
        if strictly_inside {
            distance < self.radius - tol
        } else {
            distance <= self.radius + tol
        }
    }
}
