use fpgeom_core::Vector2D;
use serde::{Deserialize, Serialize};

use super::{Atom, GeomShape, Line, ShapeKind};

/// Two perpendicular lines through a common center, e.g. a fiducial mark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cross {
    pub center: Vector2D,
    pub size: Vector2D,
    pub angle: f64,
}

impl Cross {
    pub fn new(center: impl Into<Vector2D>, size: impl Into<Vector2D>, angle: f64) -> Self {
        Self {
            center: center.into(),
            size: size.into(),
            angle,
        }
    }

    pub fn lines(&self) -> [Line; 2] {
        let half = self.size / 2.0;
        let [a, b, c, d] = [
            Vector2D::new(-half.x, 0.0),
            Vector2D::new(half.x, 0.0),
            Vector2D::new(0.0, -half.y),
            Vector2D::new(0.0, half.y),
        ]
        .map(|p| p.rotated(self.angle, Vector2D::zero()) + self.center);
        [Line::new(a, b), Line::new(c, d)]
    }
}

impl GeomShape for Cross {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cross
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
        self.angle += angle;
    }
}
