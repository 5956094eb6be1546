use fpgeom_core::{GeomError, Result, Vector2D, TOL_MM};
use serde::{Deserialize, Serialize};

use super::{Arc, Atom, GeomShape, Line, Rectangle, ShapeKind};

/// A rectangle with quarter-circle corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundRectangle {
    pub center: Vector2D,
    pub size: Vector2D,
    pub corner_radius: f64,
    /// Rotation around the center in degrees
    pub angle: f64,
}

impl RoundRectangle {
    pub fn new(
        center: impl Into<Vector2D>,
        size: impl Into<Vector2D>,
        corner_radius: f64,
        angle: f64,
    ) -> Result<Self> {
        let size = size.into().positive();
        if corner_radius < 0.0 {
            return Err(GeomError::invalid(format!(
                "corner radius must be >= 0, got {}",
                corner_radius
            ))
            .into());
        }
        if corner_radius > size.x.min(size.y) / 2.0 + TOL_MM {
            return Err(GeomError::invalid(format!(
                "corner radius {} does not fit into a {} x {} rectangle",
                corner_radius, size.x, size.y
            ))
            .into());
        }
        Ok(Self {
            center: center.into(),
            size,
            corner_radius,
            angle,
        })
    }

    /// Round rectangle with its (unrotated) top left corner at `start`.
    pub fn from_start(
        start: impl Into<Vector2D>,
        size: impl Into<Vector2D>,
        corner_radius: f64,
        angle: f64,
    ) -> Result<Self> {
        let size = size.into();
        Self::new(start.into() + size / 2.0, size, corner_radius, angle)
    }

    fn rectangle(&self, size: Vector2D) -> Rectangle {
        Rectangle::new(self.center, size, self.angle)
    }

    /// Centers of the corner arcs, top left first, in winding order.
    fn corner_centers(&self) -> [Vector2D; 4] {
        let half = self.size / 2.0 - Vector2D::new(self.corner_radius, self.corner_radius);
        [
            Vector2D::new(-half.x, -half.y),
            Vector2D::new(half.x, -half.y),
            Vector2D::new(half.x, half.y),
            Vector2D::new(-half.x, half.y),
        ]
        .map(|offset| offset.rotated(self.angle, Vector2D::zero()) + self.center)
    }
}

impl GeomShape for RoundRectangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::RoundRectangle
    }

    /// Top edge first, then clockwise: line, corner arc, line, ...
    fn atoms(&self) -> Vec<Atom> {
        if self.corner_radius == 0.0 {
            return self.rectangle(self.size).atoms();
        }
        let cr = self.corner_radius;
        let at = self.center - self.size / 2.0;
        let (w, h) = (self.size.x, self.size.y);
        let mut atoms = vec![
            Atom::Line(Line::new((at.x + cr, at.y), (at.x + w - cr, at.y))),
            Atom::Arc(Arc::new((at.x + w - cr, at.y + cr), (at.x + w - cr, at.y), 90.0)),
            Atom::Line(Line::new((at.x + w, at.y + cr), (at.x + w, at.y + h - cr))),
            Atom::Arc(Arc::new((at.x + w - cr, at.y + h - cr), (at.x + w, at.y + h - cr), 90.0)),
            Atom::Line(Line::new((at.x + w - cr, at.y + h), (at.x + cr, at.y + h))),
            Atom::Arc(Arc::new((at.x + cr, at.y + h - cr), (at.x + cr, at.y + h), 90.0)),
            Atom::Line(Line::new((at.x, at.y + h - cr), (at.x, at.y + cr))),
            Atom::Arc(Arc::new((at.x + cr, at.y + cr), (at.x, at.y + cr), 90.0)),
        ];
        if self.angle != 0.0 {
            for atom in &mut atoms {
                atom.rotate(self.angle, self.center);
            }
        }
        atoms
    }

    fn translate(&mut self, vector: Vector2D) {
        self.center += vector;
    }

    fn rotate(&mut self, angle: f64, origin: Vector2D) {
        if angle == 0.0 {
            return;
        }
        self.center.rotate(angle, origin);
        self.angle += angle;
    }

    fn is_point_inside_self(&self, point: Vector2D, strictly_inside: bool, tol: f64) -> bool {
        if self.is_point_on_self(point, false, tol) {
            return !strictly_inside;
        }
        if self.corner_radius == 0.0 {
            return self
                .rectangle(self.size)
                .is_point_inside_self(point, strictly_inside, tol);
        }
        let cr = self.corner_radius;
        self.corner_centers()
            .iter()
            .any(|c| point.distance_to(*c) <= cr + tol)
            || self
                .rectangle(Vector2D::new(self.size.x, self.size.y - 2.0 * cr))
                .is_point_inside_self(point, strictly_inside, tol)
            || self
                .rectangle(Vector2D::new(self.size.x - 2.0 * cr, self.size.y))
                .is_point_inside_self(point, strictly_inside, tol)
    }

    /// Grows size and corner radius together; the radius stops at 0.
    fn inflate(&mut self, amount: f64, tol: f64) -> Result<()> {
        let min_dimension = self.size.x.min(self.size.y);
        if amount < 0.0 && -amount > min_dimension / 2.0 - tol {
            return Err(GeomError::invalid(format!(
                "cannot deflate a round rectangle of size {} x {} by {}",
                self.size.x, self.size.y, -amount
            ))
            .into());
        }
        self.size += Vector2D::new(2.0 * amount, 2.0 * amount);
        self.corner_radius = (self.corner_radius + amount).max(0.0);
        Ok(())
    }
}
