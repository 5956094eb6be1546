use fpgeom_core::{GeomError, Result, Vector2D, TOL_MM};
use serde::{Deserialize, Serialize};

use super::{Atom, GeomShape, Polygon, Rectangle, ShapeKind};

/// A plus-shaped pad: a wide bar of `overall_w` x `tail_h` crossed by a tall
/// bar of `tail_w` x `overall_h`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cruciform {
    pub overall_w: f64,
    pub overall_h: f64,
    pub tail_w: f64,
    pub tail_h: f64,
    pub center: Vector2D,
    pub angle: f64,
}

impl Cruciform {
    pub fn new(
        overall: impl Into<Vector2D>,
        tail: impl Into<Vector2D>,
        center: impl Into<Vector2D>,
        angle: f64,
    ) -> Result<Self> {
        let overall = overall.into();
        let tail = tail.into();
        if overall.x < tail.x {
            return Err(GeomError::invalid(format!(
                "overall width {} is smaller than tail width {}",
                overall.x, tail.x
            ))
            .into());
        }
        if overall.y < tail.y {
            return Err(GeomError::invalid(format!(
                "overall height {} is smaller than tail height {}",
                overall.y, tail.y
            ))
            .into());
        }
        Ok(Self {
            overall_w: overall.x,
            overall_h: overall.y,
            tail_w: tail.x,
            tail_h: tail.y,
            center: center.into(),
            angle,
        })
    }

    /// A plain rectangle when one of the bars covers the other.
    fn is_rectangular(&self) -> bool {
        (self.overall_w - self.tail_w).abs() <= TOL_MM
            || (self.overall_h - self.tail_h).abs() <= TOL_MM
    }

    fn bar(&self, size: Vector2D) -> Rectangle {
        Rectangle::new(self.center, size, self.angle)
    }

    /// The outline as a twelve corner polygon, clockwise from the top left
    /// of the wide bar.
    pub fn to_polygon(&self) -> Polygon {
        let r1 = Vector2D::new(self.overall_w, self.tail_h) / 2.0;
        let r2 = Vector2D::new(self.tail_w, self.overall_h) / 2.0;
        let offsets = [
            (-r1.x, -r1.y),
            (-r2.x, -r1.y),
            (-r2.x, -r2.y),
            (r2.x, -r2.y),
            (r2.x, -r1.y),
            (r1.x, -r1.y),
            (r1.x, r1.y),
            (r2.x, r1.y),
            (r2.x, r2.y),
            (-r2.x, r2.y),
            (-r2.x, r1.y),
            (-r1.x, r1.y),
        ];
        let mut polygon = Polygon::new(
            offsets
                .iter()
                .map(|&(x, y)| self.center + Vector2D::new(x, y)),
        );
        polygon.rotate(self.angle, self.center);
        polygon
    }
}

impl GeomShape for Cruciform {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cruciform
    }

    fn atoms(&self) -> Vec<Atom> {
        if self.is_rectangular() {
            self.bar(Vector2D::new(self.overall_w, self.overall_h)).atoms()
        } else {
            self.to_polygon().atoms()
        }
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
        self.bar(Vector2D::new(self.tail_w, self.overall_h))
            .is_point_inside_self(point, strictly_inside, tol)
            || self
                .bar(Vector2D::new(self.overall_w, self.tail_h))
                .is_point_inside_self(point, strictly_inside, tol)
    }

    fn inflate(&mut self, amount: f64, tol: f64) -> Result<()> {
        if amount < 0.0 && -2.0 * amount > self.tail_h.min(self.tail_w) - tol {
            return Err(GeomError::invalid(format!(
                "cannot deflate a cruciform with tails {} x {} by {}",
                self.tail_w, self.tail_h, -amount
            ))
            .into());
        }
        self.tail_w += 2.0 * amount;
        self.tail_h += 2.0 * amount;
        self.overall_w += 2.0 * amount;
        self.overall_h += 2.0 * amount;
        Ok(())
    }
}
