//! # fpgeom shapes
//!
//! Atomic shapes (lines, arcs, circles), the composite shapes used for
//! footprint pads and outlines, and the intersect, cut, keepout and unite
//! operations between them.

pub mod model;
pub mod tools;

pub use model::{
    Arc, Atom, Circle, CompoundElement, CompoundPolygon, Cross, Cruciform, GeomShape, Line,
    Polygon, Rectangle, RoundRectangle, Shape, ShapeKind, Stadium, Trapezoid,
};

pub use tools::{
    apply_keepouts, cut, intersect, intersect_atoms, keepout, unite, AtomIntersectOptions,
    Containment, GeomOperationHandle, IntersectOptions,
};
