//! Removing the parts of shapes that lie inside keepout areas

use fpgeom_core::{GeomError, GeomSettings, Result};
use tracing::debug;

use super::intersect::intersect;
use super::operation_handle::{Containment, IntersectOptions};
use crate::model::{GeomShape, Shape};

/// Returns what is left of `shape` outside of the closed `keepout` shape.
///
/// A shape entirely outside is returned unchanged, a shape entirely inside
/// yields nothing. Otherwise the outside pieces are returned as atoms.
pub fn keepout(
    keepout: &Shape,
    shape: &Shape,
    min_segment_length: f64,
    tol: f64,
) -> Result<Vec<Shape>> {
    if !keepout.is_closed() {
        return Err(GeomError::unsupported(
            "keepout",
            format!("{} keepout on {}", keepout.kind(), shape.kind()),
        )
        .into());
    }
    if is_outside_rectangle(keepout, shape, tol) {
        debug!("Keepout bypass: {} is clear of the rectangle", shape.kind());
        return Ok(vec![shape.clone()]);
    }

    let options = IntersectOptions {
        strict_intersection: true,
        cut_also_shape_2: false,
        min_segment_length,
        tol,
    };
    let handle = intersect(shape, keepout, &options);

    if handle.cuts_performed(0) == 0 && handle.intersections().is_empty() {
        return Ok(match handle.containment(0).first() {
            Some(Containment::Outside) => vec![shape.clone()],
            _ => Vec::new(),
        });
    }

    let kept: Vec<Shape> = handle
        .atoms(0)
        .iter()
        .zip(handle.containment(0))
        .filter(|(_, containment)| **containment != Containment::Inside)
        .map(|(atom, _)| Shape::from(*atom))
        .collect();
    debug!(
        "Keepout kept {} of {} segments",
        kept.len(),
        handle.atoms(0).len()
    );
    Ok(kept)
}

/// Applies every keepout in turn to the pieces left by the previous one.
pub fn apply_keepouts(
    shapes: &[Shape],
    keepouts: &[Shape],
    settings: &GeomSettings,
) -> Result<Vec<Shape>> {
    let mut current = shapes.to_vec();
    for keepout_shape in keepouts {
        let mut next = Vec::with_capacity(current.len());
        for shape in &current {
            next.extend(keepout(
                keepout_shape,
                shape,
                settings.min_segment_length,
                settings.tolerance,
            )?);
        }
        current = next;
    }
    Ok(current)
}

/// Bounding box check for rectangular keepouts: true if `shape` lies
/// entirely beyond one of the rectangle's sides.
fn is_outside_rectangle(keepout: &Shape, shape: &Shape, tol: f64) -> bool {
    let Shape::Rectangle(rect) = keepout else {
        return false;
    };
    let rect_bbox = rect.bbox();
    let shape_bbox = shape.bbox();
    let (Some(rmin), Some(rmax), Some(smin), Some(smax)) =
        (rect_bbox.min, rect_bbox.max, shape_bbox.min, shape_bbox.max)
    else {
        return false;
    };
    rmin.x + tol >= smax.x
        || rmax.x - tol <= smin.x
        || rmin.y + tol >= smax.y
        || rmax.y - tol <= smin.y
}
