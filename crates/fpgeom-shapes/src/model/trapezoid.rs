use fpgeom_core::{GeomError, Result, Vector2D};
use serde::{Deserialize, Serialize};

use super::{Arc, Atom, GeomShape, Line, Polygon, Rectangle, RoundRectangle, ShapeKind};

/// An isosceles trapezoid with optionally rounded corners.
///
/// A negative `side_angle` narrows the top edge, a positive one the bottom
/// edge (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trapezoid {
    pub size: Vector2D,
    pub center: Vector2D,
    pub corner_radius: f64,
    /// Inclination of the slanted sides from the vertical, in degrees
    pub side_angle: f64,
    pub rotation_angle: f64,
}

impl Trapezoid {
    pub fn new(
        center: impl Into<Vector2D>,
        size: impl Into<Vector2D>,
        corner_radius: f64,
        side_angle: f64,
        rotation_angle: f64,
    ) -> Result<Self> {
        let size = size.into().positive();
        if corner_radius < 0.0 {
            return Err(GeomError::invalid(format!(
                "corner radius must be >= 0, got {}",
                corner_radius
            ))
            .into());
        }
        if side_angle.abs() >= 90.0 {
            return Err(GeomError::invalid(format!(
                "side angle {} is not within (-90, 90)",
                side_angle
            ))
            .into());
        }
        let trapezoid = Self {
            size,
            center: center.into(),
            corner_radius,
            side_angle,
            rotation_angle,
        };
        if 2.0 * trapezoid.side_offset() >= size.x {
            return Err(GeomError::invalid(format!(
                "side angle {} collapses a trapezoid of size {} x {}",
                side_angle, size.x, size.y
            ))
            .into());
        }
        Ok(trapezoid)
    }

    /// Trapezoid whose (unrotated) bounding box starts at `start`.
    pub fn from_start(
        start: impl Into<Vector2D>,
        size: impl Into<Vector2D>,
        corner_radius: f64,
        side_angle: f64,
        rotation_angle: f64,
    ) -> Result<Self> {
        let size = size.into();
        Self::new(
            start.into() + size / 2.0,
            size,
            corner_radius,
            side_angle,
            rotation_angle,
        )
    }

    /// Horizontal inset of the narrow edge's corners.
    fn side_offset(&self) -> f64 {
        self.size.y * self.side_angle.abs().to_radians().tan()
    }

    /// Atoms before the rotation is applied.
    fn unrotated_atoms(&self) -> Vec<Atom> {
        let at = self.center - self.size / 2.0;
        let size = self.size;
        let aa = self.side_angle.abs();
        let dx = self.side_offset();
        let cr = self.corner_radius;

        if cr == 0.0 {
            if self.side_angle == 0.0 {
                return Rectangle::new(self.center, self.size, 0.0).atoms();
            }
            let corners = if self.side_angle < 0.0 {
                [
                    (at.x + dx, at.y),
                    (at.x + size.x - dx, at.y),
                    (at.x + size.x, at.y + size.y),
                    (at.x, at.y + size.y),
                ]
            } else {
                [
                    (at.x, at.y),
                    (at.x + size.x, at.y),
                    (at.x + size.x - dx, at.y + size.y),
                    (at.x + dx, at.y + size.y),
                ]
            };
            return Polygon::new(corners).atoms();
        }

        if self.side_angle == 0.0 {
            return RoundRectangle {
                center: self.center,
                size,
                corner_radius: cr,
                angle: 0.0,
            }
            .atoms();
        }

        let half_acute = ((90.0 - aa) / 2.0).to_radians();
        let dx2 = cr * half_acute.tan();
        let dx3 = cr / half_acute.tan();
        let ds2 = cr * aa.to_radians().sin();
        let dc2 = cr * aa.to_radians().cos();
        let (right, bottom) = (at.x + size.x, at.y + size.y);

        if self.side_angle < 0.0 {
            let ctl = Vector2D::new(at.x + dx + dx2, at.y + cr);
            let ctr = Vector2D::new(right - dx - dx2, at.y + cr);
            let cbr = Vector2D::new(right - dx3, bottom - cr);
            let cbl = Vector2D::new(at.x + dx3, bottom - cr);
            vec![
                Atom::Arc(Arc::new(ctl, (ctl.x - dc2, ctl.y - ds2), 90.0 - aa)),
                Atom::Line(Line::new((ctl.x, at.y), (ctr.x, at.y))),
                Atom::Arc(Arc::new(ctr, (ctr.x, at.y), 90.0 - aa)),
                Atom::Line(Line::new((ctr.x + dc2, ctr.y - ds2), (cbr.x + dc2, cbr.y - ds2))),
                Atom::Arc(Arc::new(cbr, (cbr.x + dc2, cbr.y - ds2), 90.0 + aa)),
                Atom::Line(Line::new((cbr.x, bottom), (cbl.x, bottom))),
                Atom::Arc(Arc::new(cbl, (cbl.x, bottom), 90.0 + aa)),
                Atom::Line(Line::new((cbl.x - dc2, cbl.y - ds2), (ctl.x - dc2, ctl.y - ds2))),
            ]
        } else {
            let ctl = Vector2D::new(at.x + dx3, at.y + cr);
            let ctr = Vector2D::new(right - dx3, at.y + cr);
            let cbr = Vector2D::new(right - dx - dx2, bottom - cr);
            let cbl = Vector2D::new(at.x + dx + dx2, bottom - cr);
            vec![
                Atom::Arc(Arc::new(ctl, (ctl.x - dc2, ctl.y + ds2), 90.0 + aa)),
                Atom::Line(Line::new((ctl.x, at.y), (ctr.x, at.y))),
                Atom::Arc(Arc::new(ctr, (ctr.x, at.y), 90.0 + aa)),
                Atom::Line(Line::new((ctr.x + dc2, ctr.y + ds2), (cbr.x + dc2, cbr.y + ds2))),
                Atom::Arc(Arc::new(cbr, (cbr.x + dc2, cbr.y + ds2), 90.0 - aa)),
                Atom::Line(Line::new((cbr.x, bottom), (cbl.x, bottom))),
                Atom::Arc(Arc::new(cbl, (cbl.x, bottom), 90.0 - aa)),
                Atom::Line(Line::new((cbl.x - dc2, cbl.y + ds2), (ctl.x - dc2, ctl.y + ds2))),
            ]
        }
    }
}

impl GeomShape for Trapezoid {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Trapezoid
    }

    fn atoms(&self) -> Vec<Atom> {
        let mut atoms = self.unrotated_atoms();
        if self.rotation_angle != 0.0 {
            for atom in &mut atoms {
                atom.rotate(self.rotation_angle, self.center);
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
        self.rotation_angle += angle;
    }

    fn is_point_inside_self(&self, point: Vector2D, strictly_inside: bool, tol: f64) -> bool {
        let atoms = self.atoms();
        if atoms.iter().any(|a| a.is_point_on_self(point, false, tol)) {
            return !strictly_inside;
        }
        let cr = self.corner_radius;
        let in_corner = atoms.iter().any(|atom| match atom {
            Atom::Arc(arc) => point.distance_to(arc.center()) <= cr + tol,
            _ => false,
        });
        if in_corner {
            return true;
        }
        let outline = Polygon::new(atoms.iter().filter_map(Atom::start));
        outline.is_point_inside_self(point, false, tol)
    }

    /// Offsets all sides by `amount`; corner radii grow with it.
    fn inflate(&mut self, amount: f64, tol: f64) -> Result<()> {
        if amount < 0.0 {
            let min_line = self
                .atoms()
                .iter()
                .filter_map(|atom| match atom {
                    Atom::Line(line) => Some(line.length()),
                    _ => None,
                })
                .fold(f64::INFINITY, f64::min);
            if -amount > min_line / 2.0 - tol {
                return Err(GeomError::invalid(format!(
                    "cannot deflate a trapezoid with a {} long side by {}",
                    min_line, -amount
                ))
                .into());
            }
        }
        let angle = self.side_angle.to_radians();
        self.size.y += 2.0 * amount;
        self.size.x += 2.0 * (angle.tan().abs() + 1.0 / angle.cos().abs()) * amount;
        self.corner_radius = (self.corner_radius + amount).max(0.0);
        Ok(())
    }
}
