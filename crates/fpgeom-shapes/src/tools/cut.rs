use super::intersect::intersect;
use super::operation_handle::IntersectOptions;
use crate::model::Shape;

/// Cuts `shape_to_cut` at its strict intersections with `cutting_shape`.
///
/// Returns the pieces as atoms, or the uncut shape if the two shapes do not
/// cross.
pub fn cut(
    cutting_shape: &Shape,
    shape_to_cut: &Shape,
    min_segment_length: f64,
    tol: f64,
) -> Vec<Shape> {
    let options = IntersectOptions {
        strict_intersection: true,
        cut_also_shape_2: false,
        min_segment_length,
        tol,
    };
    let handle = intersect(shape_to_cut, cutting_shape, &options);
    if handle.intersections().is_empty() {
        vec![shape_to_cut.clone()]
    } else {
        handle.atoms(0).iter().copied().map(Shape::from).collect()
    }
}
