use fpgeom_core::{BoundingBox, GeomError, Result, Vector2D, TOL_MM};
use serde::{Deserialize, Serialize};

use super::{Arc, Atom, Circle, GeomShape, Line, Rectangle, ShapeKind};

/// Two half circles joined by straight sides (an oblong pad).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stadium {
    pub centers: [Vector2D; 2],
    pub radius: f64,
}

impl Stadium {
    pub fn new(center_1: impl Into<Vector2D>, center_2: impl Into<Vector2D>, radius: f64) -> Self {
        Self {
            centers: [center_1.into(), center_2.into()],
            radius: radius.abs(),
        }
    }

    /// The stadium inscribed in a rectangle, with the arcs on its short sides.
    pub fn from_rectangle(rect: &Rectangle) -> Self {
        let (radius, offset) = if rect.size.x > rect.size.y {
            let radius = rect.size.y / 2.0;
            (radius, Vector2D::new(rect.size.x / 2.0 - radius, 0.0))
        } else {
            let radius = rect.size.x / 2.0;
            (radius, Vector2D::new(0.0, rect.size.y / 2.0 - radius))
        };
        let offset = offset.rotated(rect.angle, Vector2D::zero());
        Self::new(rect.center - offset, rect.center + offset, radius)
    }

    /// Offset from the center line to the straight sides, `None` if the
    /// centers coincide.
    fn side_offset(&self) -> Option<Vector2D> {
        (self.centers[1] - self.centers[0])
            .orthogonal()
            .resize(self.radius, TOL_MM)
            .ok()
    }
}

impl GeomShape for Stadium {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Stadium
    }

    fn atoms(&self) -> Vec<Atom> {
        let [c1, c2] = self.centers;
        let Some(perp) = self.side_offset() else {
            return vec![Atom::Circle(Circle::new(c1, self.radius))];
        };
        vec![
            Atom::Arc(Arc::new(c1, c1 + perp, 180.0)),
            Atom::Line(Line::new(c1 - perp, c2 - perp)),
            Atom::Arc(Arc::new(c2, c2 - perp, 180.0)),
            Atom::Line(Line::new(c2 + perp, c1 + perp)),
        ]
    }

    fn translate(&mut self, vector: Vector2D) {
        for center in &mut self.centers {
            *center += vector;
        }
    }

    fn rotate(&mut self, angle: f64, origin: Vector2D) {
        if angle == 0.0 {
            return;
        }
        for center in &mut self.centers {
            center.rotate(angle, origin);
        }
    }

    fn bbox(&self) -> BoundingBox {
        let r = Vector2D::new(self.radius, self.radius);
        let mut bbox = BoundingBox::new();
        for center in self.centers {
            bbox.include_point(center - r);
            bbox.include_point(center + r);
        }
        bbox
    }

    fn is_point_inside_self(&self, point: Vector2D, strictly_inside: bool, tol: f64) -> bool {
        if self.is_point_on_self(point, false, tol) {
            return !strictly_inside;
        }
        if self
            .centers
            .iter()
            .any(|c| point.distance_to(*c) <= self.radius + tol)
        {
            return true;
        }
        let Some(perp) = self.side_offset() else {
            return false;
        };
        let [c1, c2] = self.centers;
        let corners = [c1 - perp, c2 - perp, c2 + perp, c1 + perp];
        (0..4).all(|i| {
            let line = Line::new(corners[i], corners[(i + 1) % 4]);
            line.direction().cross_product(point - line.start).z >= 0.0
        })
    }

    fn inflate(&mut self, amount: f64, tol: f64) -> Result<()> {
        if amount < 0.0 && -amount > self.radius - tol {
            return Err(GeomError::invalid(format!(
                "cannot deflate a stadium of radius {} by {}",
                self.radius, -amount
            ))
            .into());
        }
        self.radius += amount;
        Ok(())
    }
}
