//! Boolean-style operations between shapes

pub mod cut;
pub mod intersect;
pub mod intersect_atomic;
pub mod keepout;
pub mod operation_handle;
pub mod segment_util;
pub mod unite;

pub use cut::cut;
pub use intersect::intersect;
pub use intersect_atomic::{intersect_atoms, AtomIntersectOptions, Points};
pub use keepout::{apply_keepouts, keepout};
pub use operation_handle::{
    Containment, GeomOperationHandle, IntersectOptions, SegmentEnds, ShapeSession,
};
pub use unite::unite;

use fpgeom_core::{Result, Vector2D};

use crate::model::Shape;

impl Shape {
    /// Intersection points with `other`. Both shapes are cut, so strict
    /// mode drops points where the shapes only touch.
    pub fn intersect(
        &self,
        other: &Shape,
        strict_intersection: bool,
        min_segment_length: f64,
        tol: f64,
    ) -> Vec<Vector2D> {
        let options = IntersectOptions {
            strict_intersection,
            cut_also_shape_2: true,
            min_segment_length,
            tol,
        };
        intersect(self, other, &options).intersections().to_vec()
    }

    /// Cuts `shape_to_cut` where it crosses this shape.
    pub fn cut(&self, shape_to_cut: &Shape, min_segment_length: f64, tol: f64) -> Vec<Shape> {
        cut(self, shape_to_cut, min_segment_length, tol)
    }

    /// Removes the parts of `shape_to_keep_out` inside this closed shape.
    pub fn subtract(
        &self,
        shape_to_keep_out: &Shape,
        min_segment_length: f64,
        tol: f64,
    ) -> Result<Vec<Shape>> {
        keepout(self, shape_to_keep_out, min_segment_length, tol)
    }

    /// Union with `other`; both shapes must be closed.
    pub fn unite(&self, other: &Shape, min_segment_length: f64, tol: f64) -> Result<Vec<Shape>> {
        unite(self, other, min_segment_length, tol)
    }
}
