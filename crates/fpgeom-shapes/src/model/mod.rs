use std::fmt;

use fpgeom_core::{BoundingBox, GeomError, Result, Vector2D};
use serde::{Deserialize, Serialize};

mod arc;
mod circle;
mod compound_polygon;
mod cross;
mod cruciform;
mod line;
mod polygon;
mod rectangle;
mod round_rectangle;
mod stadium;
mod trapezoid;

pub use arc::Arc;
pub use circle::Circle;
pub use compound_polygon::{CompoundElement, CompoundPolygon};
pub use cross::Cross;
pub use cruciform::Cruciform;
pub use line::Line;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use round_rectangle::RoundRectangle;
pub use stadium::Stadium;
pub use trapezoid::Trapezoid;

/// Operations shared by every shape.
///
/// Transformations mutate in place; the `*ed` variants return a modified copy.
pub trait GeomShape {
    fn kind(&self) -> ShapeKind;

    /// Ordered, contiguous decomposition into lines, arcs and circles.
    fn atoms(&self) -> Vec<Atom>;

    fn translate(&mut self, vector: Vector2D);

    /// Rotates by `angle` degrees around `origin`.
    fn rotate(&mut self, angle: f64, origin: Vector2D);

    fn bbox(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new();
        for atom in self.atoms() {
            bbox.include_bbox(&atom.bbox());
        }
        bbox
    }

    fn is_point_on_self(&self, point: Vector2D, exclude_segment_ends: bool, tol: f64) -> bool {
        self.atoms()
            .iter()
            .any(|atom| atom.is_point_on_self(point, exclude_segment_ends, tol))
    }

    /// Open shapes never contain a point.
    fn is_point_inside_self(&self, _point: Vector2D, _strictly_inside: bool, _tol: f64) -> bool {
        false
    }

    /// Grows (or shrinks, for negative amounts) a closed shape.
    fn inflate(&mut self, _amount: f64, _tol: f64) -> Result<()> {
        Err(GeomError::unsupported("inflate", self.kind().to_string()).into())
    }

    fn is_closed(&self) -> bool {
        self.kind().is_closed()
    }

    fn translated(&self, vector: Vector2D) -> Self
    where
        Self: Clone + Sized,
    {
        let mut shape = self.clone();
        shape.translate(vector);
        shape
    }

    fn rotated(&self, angle: f64, origin: Vector2D) -> Self
    where
        Self: Clone + Sized,
    {
        let mut shape = self.clone();
        shape.rotate(angle, origin);
        shape
    }

    fn inflated(&self, amount: f64, tol: f64) -> Result<Self>
    where
        Self: Clone + Sized,
    {
        let mut shape = self.clone();
        shape.inflate(amount, tol)?;
        Ok(shape)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Arc,
    Circle,
    Polygon,
    CompoundPolygon,
    Rectangle,
    RoundRectangle,
    Stadium,
    Cruciform,
    Trapezoid,
    Cross,
}

impl ShapeKind {
    /// Closed kinds describe a region and can contain points.
    ///
    /// Polygons and compound polygons report their own closure flag through
    /// [`GeomShape::is_closed`].
    pub fn is_closed(&self) -> bool {
        !matches!(self, ShapeKind::Line | ShapeKind::Arc | ShapeKind::Cross)
    }

    /// Kinds whose atoms are straight or arc segments of a single outline.
    pub fn is_polygonal(&self) -> bool {
        matches!(self, ShapeKind::Polygon | ShapeKind::CompoundPolygon)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Line => "Line",
            ShapeKind::Arc => "Arc",
            ShapeKind::Circle => "Circle",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::CompoundPolygon => "CompoundPolygon",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::RoundRectangle => "RoundRectangle",
            ShapeKind::Stadium => "Stadium",
            ShapeKind::Cruciform => "Cruciform",
            ShapeKind::Trapezoid => "Trapezoid",
            ShapeKind::Cross => "Cross",
        };
        write!(f, "{}", name)
    }
}

/// An indivisible primitive every shape decomposes into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Atom {
    Line(Line),
    Arc(Arc),
    Circle(Circle),
}

impl Atom {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Atom::Line(_) => ShapeKind::Line,
            Atom::Arc(_) => ShapeKind::Arc,
            Atom::Circle(_) => ShapeKind::Circle,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Atom::Circle(_))
    }

    pub fn bbox(&self) -> BoundingBox {
        match self {
            Atom::Line(line) => line.bbox(),
            Atom::Arc(arc) => arc.bbox(),
            Atom::Circle(circle) => circle.bbox(),
        }
    }

    pub fn mid(&self) -> Vector2D {
        match self {
            Atom::Line(line) => line.mid(),
            Atom::Arc(arc) => arc.mid(),
            Atom::Circle(circle) => circle.mid(),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Atom::Line(line) => line.length(),
            Atom::Arc(arc) => arc.length(),
            Atom::Circle(circle) => circle.length(),
        }
    }

    /// Start point; `None` for circles.
    pub fn start(&self) -> Option<Vector2D> {
        match self {
            Atom::Line(line) => Some(line.start),
            Atom::Arc(arc) => Some(arc.start()),
            Atom::Circle(_) => None,
        }
    }

    /// End point; `None` for circles.
    pub fn end(&self) -> Option<Vector2D> {
        match self {
            Atom::Line(line) => Some(line.end),
            Atom::Arc(arc) => Some(arc.end()),
            Atom::Circle(_) => None,
        }
    }

    pub fn translate(&mut self, vector: Vector2D) {
        match self {
            Atom::Line(line) => {
                line.translate(vector);
            }
            Atom::Arc(arc) => {
                arc.translate(vector);
            }
            Atom::Circle(circle) => {
                circle.translate(vector);
            }
        }
    }

    pub fn rotate(&mut self, angle: f64, origin: Vector2D) {
        match self {
            Atom::Line(line) => {
                line.rotate(angle, origin);
            }
            Atom::Arc(arc) => {
                arc.rotate(angle, origin);
            }
            Atom::Circle(circle) => {
                circle.rotate(angle, origin);
            }
        }
    }

    pub fn is_point_on_self(&self, point: Vector2D, exclude_segment_ends: bool, tol: f64) -> bool {
        match self {
            Atom::Line(line) => line.is_point_on_self(point, exclude_segment_ends, tol),
            Atom::Arc(arc) => arc.is_point_on_self(point, exclude_segment_ends, tol),
            Atom::Circle(circle) => circle.is_point_on_self(point, tol),
        }
    }

    /// Range-only membership for points already known to lie on the
    /// underlying infinite line or full circle.
    pub fn is_point_on_self_accelerated(
        &self,
        point: Vector2D,
        exclude_segment_ends: bool,
        tol: f64,
    ) -> bool {
        match self {
            Atom::Line(line) => line.is_point_on_self_accelerated(point, exclude_segment_ends, tol),
            Atom::Arc(arc) => arc.is_point_on_self_accelerated(point, exclude_segment_ends, tol),
            Atom::Circle(_) => true,
        }
    }

    pub fn reverse(&mut self) {
        match self {
            Atom::Line(line) => {
                line.reverse();
            }
            Atom::Arc(arc) => {
                arc.reverse();
            }
            Atom::Circle(_) => {}
        }
    }
}

impl From<Line> for Atom {
    fn from(line: Line) -> Self {
        Atom::Line(line)
    }
}

impl From<Arc> for Atom {
    fn from(arc: Arc) -> Self {
        Atom::Arc(arc)
    }
}

impl From<Circle> for Atom {
    fn from(circle: Circle) -> Self {
        Atom::Circle(circle)
    }
}

impl GeomShape for Line {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn atoms(&self) -> Vec<Atom> {
        vec![Atom::Line(*self)]
    }

    fn translate(&mut self, vector: Vector2D) {
        Line::translate(self, vector);
    }

    fn rotate(&mut self, angle: f64, origin: Vector2D) {
        Line::rotate(self, angle, origin);
    }

    fn bbox(&self) -> BoundingBox {
        Line::bbox(self)
    }
}

impl GeomShape for Arc {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Arc
    }

    fn atoms(&self) -> Vec<Atom> {
        vec![Atom::Arc(*self)]
    }

    fn translate(&mut self, vector: Vector2D) {
        Arc::translate(self, vector);
    }

    fn rotate(&mut self, angle: f64, origin: Vector2D) {
        Arc::rotate(self, angle, origin);
    }

    fn bbox(&self) -> BoundingBox {
        Arc::bbox(self)
    }
}

impl GeomShape for Circle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn atoms(&self) -> Vec<Atom> {
        vec![Atom::Circle(*self)]
    }

    fn translate(&mut self, vector: Vector2D) {
        Circle::translate(self, vector);
    }

    fn rotate(&mut self, angle: f64, origin: Vector2D) {
        Circle::rotate(self, angle, origin);
    }

    fn bbox(&self) -> BoundingBox {
        Circle::bbox(self)
    }

    fn is_point_on_self(&self, point: Vector2D, _exclude_segment_ends: bool, tol: f64) -> bool {
        Circle::is_point_on_self(self, point, tol)
    }

    fn is_point_inside_self(&self, point: Vector2D, strictly_inside: bool, tol: f64) -> bool {
        Circle::is_point_inside_self(self, point, strictly_inside, tol)
    }

    fn inflate(&mut self, amount: f64, tol: f64) -> Result<()> {
        Circle::inflate(self, amount, tol)?;
        Ok(())
    }
}

/// Any shape the kernel operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Arc(Arc),
    Circle(Circle),
    Polygon(Polygon),
    CompoundPolygon(CompoundPolygon),
    Rectangle(Rectangle),
    RoundRectangle(RoundRectangle),
    Stadium(Stadium),
    Cruciform(Cruciform),
    Trapezoid(Trapezoid),
    Cross(Cross),
}

impl GeomShape for Shape {
    fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(s) => s.kind(),
            Shape::Arc(s) => s.kind(),
            Shape::Circle(s) => s.kind(),
            Shape::Polygon(s) => s.kind(),
            Shape::CompoundPolygon(s) => s.kind(),
            Shape::Rectangle(s) => s.kind(),
            Shape::RoundRectangle(s) => s.kind(),
            Shape::Stadium(s) => s.kind(),
            Shape::Cruciform(s) => s.kind(),
            Shape::Trapezoid(s) => s.kind(),
            Shape::Cross(s) => s.kind(),
        }
    }

    fn atoms(&self) -> Vec<Atom> {
        match self {
            Shape::Line(s) => s.atoms(),
            Shape::Arc(s) => s.atoms(),
            Shape::Circle(s) => s.atoms(),
            Shape::Polygon(s) => s.atoms(),
            Shape::CompoundPolygon(s) => s.atoms(),
            Shape::Rectangle(s) => s.atoms(),
            Shape::RoundRectangle(s) => s.atoms(),
            Shape::Stadium(s) => s.atoms(),
            Shape::Cruciform(s) => s.atoms(),
            Shape::Trapezoid(s) => s.atoms(),
            Shape::Cross(s) => s.atoms(),
        }
    }

    fn translate(&mut self, vector: Vector2D) {
        match self {
            Shape::Line(s) => GeomShape::translate(s, vector),
            Shape::Arc(s) => GeomShape::translate(s, vector),
            Shape::Circle(s) => GeomShape::translate(s, vector),
            Shape::Polygon(s) => s.translate(vector),
            Shape::CompoundPolygon(s) => s.translate(vector),
            Shape::Rectangle(s) => s.translate(vector),
            Shape::RoundRectangle(s) => s.translate(vector),
            Shape::Stadium(s) => s.translate(vector),
            Shape::Cruciform(s) => s.translate(vector),
            Shape::Trapezoid(s) => s.translate(vector),
            Shape::Cross(s) => s.translate(vector),
        }
    }

    fn rotate(&mut self, angle: f64, origin: Vector2D) {
        match self {
            Shape::Line(s) => GeomShape::rotate(s, angle, origin),
            Shape::Arc(s) => GeomShape::rotate(s, angle, origin),
            Shape::Circle(s) => GeomShape::rotate(s, angle, origin),
            Shape::Polygon(s) => s.rotate(angle, origin),
            Shape::CompoundPolygon(s) => s.rotate(angle, origin),
            Shape::Rectangle(s) => s.rotate(angle, origin),
            Shape::RoundRectangle(s) => s.rotate(angle, origin),
            Shape::Stadium(s) => s.rotate(angle, origin),
            Shape::Cruciform(s) => s.rotate(angle, origin),
            Shape::Trapezoid(s) => s.rotate(angle, origin),
            Shape::Cross(s) => s.rotate(angle, origin),
        }
    }

    fn bbox(&self) -> BoundingBox {
        match self {
            Shape::Line(s) => GeomShape::bbox(s),
            Shape::Arc(s) => GeomShape::bbox(s),
            Shape::Circle(s) => GeomShape::bbox(s),
            Shape::Polygon(s) => s.bbox(),
            Shape::CompoundPolygon(s) => s.bbox(),
            Shape::Rectangle(s) => s.bbox(),
            Shape::RoundRectangle(s) => s.bbox(),
            Shape::Stadium(s) => s.bbox(),
            Shape::Cruciform(s) => s.bbox(),
            Shape::Trapezoid(s) => s.bbox(),
            Shape::Cross(s) => s.bbox(),
        }
    }

    fn is_point_on_self(&self, point: Vector2D, exclude_segment_ends: bool, tol: f64) -> bool {
        match self {
            Shape::Line(s) => GeomShape::is_point_on_self(s, point, exclude_segment_ends, tol),
            Shape::Arc(s) => GeomShape::is_point_on_self(s, point, exclude_segment_ends, tol),
            Shape::Circle(s) => GeomShape::is_point_on_self(s, point, exclude_segment_ends, tol),
            Shape::Polygon(s) => s.is_point_on_self(point, exclude_segment_ends, tol),
            Shape::CompoundPolygon(s) => s.is_point_on_self(point, exclude_segment_ends, tol),
            Shape::Rectangle(s) => s.is_point_on_self(point, exclude_segment_ends, tol),
            Shape::RoundRectangle(s) => s.is_point_on_self(point, exclude_segment_ends, tol),
            Shape::Stadium(s) => s.is_point_on_self(point, exclude_segment_ends, tol),
            Shape::Cruciform(s) => s.is_point_on_self(point, exclude_segment_ends, tol),
            Shape::Trapezoid(s) => s.is_point_on_self(point, exclude_segment_ends, tol),
            Shape::Cross(s) => s.is_point_on_self(point, exclude_segment_ends, tol),
        }
    }

    fn is_point_inside_self(&self, point: Vector2D, strictly_inside: bool, tol: f64) -> bool {
        match self {
            Shape::Line(s) => s.is_point_inside_self(point, strictly_inside, tol),
            Shape::Arc(s) => s.is_point_inside_self(point, strictly_inside, tol),
            Shape::Circle(s) => GeomShape::is_point_inside_self(s, point, strictly_inside, tol),
            Shape::Polygon(s) => s.is_point_inside_self(point, strictly_inside, tol),
            Shape::CompoundPolygon(s) => s.is_point_inside_self(point, strictly_inside, tol),
            Shape::Rectangle(s) => s.is_point_inside_self(point, strictly_inside, tol),
            Shape::RoundRectangle(s) => s.is_point_inside_self(point, strictly_inside, tol),
            Shape::Stadium(s) => s.is_point_inside_self(point, strictly_inside, tol),
            Shape::Cruciform(s) => s.is_point_inside_self(point, strictly_inside, tol),
            Shape::Trapezoid(s) => s.is_point_inside_self(point, strictly_inside, tol),
            Shape::Cross(s) => s.is_point_inside_self(point, strictly_inside, tol),
        }
    }

    fn inflate(&mut self, amount: f64, tol: f64) -> Result<()> {
        match self {
            Shape::Line(s) => s.inflate(amount, tol),
            Shape::Arc(s) => s.inflate(amount, tol),
            Shape::Circle(s) => GeomShape::inflate(s, amount, tol),
            Shape::Polygon(s) => s.inflate(amount, tol),
            Shape::CompoundPolygon(s) => s.inflate(amount, tol),
            Shape::Rectangle(s) => s.inflate(amount, tol),
            Shape::RoundRectangle(s) => s.inflate(amount, tol),
            Shape::Stadium(s) => s.inflate(amount, tol),
            Shape::Cruciform(s) => s.inflate(amount, tol),
            Shape::Trapezoid(s) => s.inflate(amount, tol),
            Shape::Cross(s) => s.inflate(amount, tol),
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            Shape::Polygon(s) => s.is_closed(),
            Shape::CompoundPolygon(s) => s.is_closed(),
            _ => self.kind().is_closed(),
        }
    }
}

impl From<Atom> for Shape {
    fn from(atom: Atom) -> Self {
        match atom {
            Atom::Line(line) => Shape::Line(line),
            Atom::Arc(arc) => Shape::Arc(arc),
            Atom::Circle(circle) => Shape::Circle(circle),
        }
    }
}

macro_rules! impl_from_for_shape {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_from_for_shape!(
    Line,
    Arc,
    Circle,
    Polygon,
    CompoundPolygon,
    Rectangle,
    RoundRectangle,
    Stadium,
    Cruciform,
    Trapezoid,
    Cross,
);
