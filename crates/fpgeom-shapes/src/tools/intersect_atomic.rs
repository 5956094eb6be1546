//! Pairwise intersection of atomic shapes
//!
//! Every pair of {line, arc, circle} is handled. Arcs reuse the circle math
//! and filter the results by their angular range.

use fpgeom_core::{Vector2D, TOL_MM};
use smallvec::{smallvec, SmallVec};

use crate::model::{Arc, Atom, Circle, Line};

/// Intersection points of two atoms; never more than two.
pub type Points = SmallVec<[Vector2D; 2]>;

/// Options for [`intersect_atoms`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomIntersectOptions {
    /// Drop single (touching) intersection points
    pub exclude_tangents: bool,
    /// Drop points on the first atom's own start or end
    pub exclude_segment_ends_1: bool,
    /// Drop points on the second atom's own start or end
    pub exclude_segment_ends_2: bool,
    /// Treat lines as infinite and skip the segment range filters
    pub infinite_line: bool,
    pub tol: f64,
}

impl Default for AtomIntersectOptions {
    fn default() -> Self {
        Self {
            exclude_tangents: false,
            exclude_segment_ends_1: false,
            exclude_segment_ends_2: false,
            infinite_line: false,
            tol: TOL_MM,
        }
    }
}

impl AtomIntersectOptions {
    /// Options with infinite lines and no exclusions.
    pub fn infinite(tol: f64) -> Self {
        Self {
            infinite_line: true,
            tol,
            ..Self::default()
        }
    }

    fn swapped(&self) -> Self {
        Self {
            exclude_segment_ends_1: self.exclude_segment_ends_2,
            exclude_segment_ends_2: self.exclude_segment_ends_1,
            ..*self
        }
    }
}

/// Intersects two atoms.
pub fn intersect_atoms(first: &Atom, second: &Atom, options: &AtomIntersectOptions) -> Points {
    let swapped = options.swapped();
    match (first, second) {
        (Atom::Line(l1), Atom::Line(l2)) => intersect_lines(l1, l2, options),
        (Atom::Line(line), Atom::Arc(arc)) => intersect_arc_with_line(arc, line, &swapped),
        (Atom::Line(line), Atom::Circle(circle)) => intersect_circle_with_line(
            circle,
            line,
            options.exclude_segment_ends_1,
            options,
        ),
        (Atom::Arc(arc), Atom::Line(line)) => intersect_arc_with_line(arc, line, options),
        (Atom::Arc(a1), Atom::Arc(a2)) => intersect_arcs(a1, a2, options),
        (Atom::Arc(arc), Atom::Circle(circle)) => intersect_arc_with_circle(
            arc,
            circle,
            options.exclude_segment_ends_1,
            options,
        ),
        (Atom::Circle(circle), Atom::Line(line)) => intersect_circle_with_line(
            circle,
            line,
            options.exclude_segment_ends_2,
            options,
        ),
        (Atom::Circle(circle), Atom::Arc(arc)) => intersect_arc_with_circle(
            arc,
            circle,
            options.exclude_segment_ends_2,
            options,
        ),
        (Atom::Circle(c1), Atom::Circle(c2)) => {
            intersect_circles(c1, c2, options.exclude_tangents, options.tol)
        }
    }
}

/// Intersects two lines through their homogeneous cross product.
pub fn intersect_lines(line1: &Line, line2: &Line, options: &AtomIntersectOptions) -> Points {
    let tol = options.tol;
    let ip = line1.to_homogeneous().cross_product(line2.to_homogeneous());
    // `ip.z` is the cross product of both directions, so compare the sine.
    if ip.z.abs() <= tol * line1.length() * line2.length() {
        return Points::new();
    }
    let pt = Vector2D::from_homogeneous(ip);
    if options.infinite_line
        || (line1.is_point_on_self_accelerated(pt, options.exclude_segment_ends_1, tol)
            && line2.is_point_on_self_accelerated(pt, options.exclude_segment_ends_2, tol))
    {
        smallvec![pt]
    } else {
        Points::new()
    }
}

/// Intersects a circle with a line; `exclude_segment_ends` applies to the line.
pub fn intersect_circle_with_line(
    circle: &Circle,
    line: &Line,
    exclude_segment_ends: bool,
    options: &AtomIntersectOptions,
) -> Points {
    let tol = options.tol;
    let start = line.start - circle.center;
    let end = line.end - circle.center;
    let d = end - start;
    let dr = d.norm();
    if dr < tol {
        let mid = (start + end) / 2.0 + circle.center;
        return if circle.is_point_on_self(mid, tol) {
            smallvec![line.start]
        } else {
            Points::new()
        };
    }

    let det = start.x * end.y - end.x * start.y;
    let mut discriminant = circle.radius().powi(2) * dr * dr - det * det;
    if discriminant < 0.0 {
        if discriminant.abs() < tol {
            discriminant = 0.0;
        } else {
            return Points::new();
        }
    }

    let dr2 = dr * dr;
    let sqrt_disc = discriminant.sqrt() / dr2;
    let point = |sign: f64| {
        Vector2D::new(
            det * d.y / dr2 + sign * 1.0f64.copysign(d.y) * d.x * sqrt_disc,
            -det * d.x / dr2 + sign * d.y.abs() * sqrt_disc,
        ) + circle.center
    };
    let pt1 = point(1.0);
    let pt2 = point(-1.0);
    let pt_mid = (pt1 + pt2) / 2.0;

    let mut pts: Points = if circle.is_point_on_self(pt_mid, tol) {
        smallvec![pt_mid]
    } else {
        smallvec![pt1, pt2]
    };
    if options.exclude_tangents && pts.len() == 1 {
        return Points::new();
    }
    if !options.infinite_line {
        pts.retain(|pt| line.is_point_on_self_accelerated(*pt, exclude_segment_ends, tol));
    }
    pts
}

/// Intersects two circles. Identical circles have no discrete intersection.
pub fn intersect_circles(
    circle1: &Circle,
    circle2: &Circle,
    exclude_tangents: bool,
    tol: f64,
) -> Points {
    let r1 = circle1.radius();
    let r2 = circle2.radius();
    let (d, phi) = circle2.center.to_polar(circle1.center);
    if r1 + r2 + tol < d || d + tol < (r1 - r2).abs() {
        return Points::new();
    }

    let (x, y) = if d.abs() < tol {
        if r1.abs() < tol && r2.abs() < tol {
            (0.0, 0.0)
        } else {
            return Points::new();
        }
    } else {
        let x = (d * d - r2 * r2 + r1 * r1) / (2.0 * d);
        let y = if (x.abs() - r1).abs() < tol {
            0.0
        } else {
            let numerator = 4.0 * d * d * r1 * r1 - (d * d - r2 * r2 + r1 * r1).powi(2);
            numerator.max(0.0).sqrt() / d
        };
        (x, y)
    };

    let signs: &[f64] = if y < tol { &[0.0] } else { &[0.5, -0.5] };
    if signs.len() == 1 && exclude_tangents {
        return Points::new();
    }
    signs
        .iter()
        .map(|s| Vector2D::new(x, s * y).rotated(phi, Vector2D::zero()) + circle1.center)
        .collect()
}

/// Intersects an arc with a circle; `exclude_segment_ends` applies to the arc.
pub fn intersect_arc_with_circle(
    arc: &Arc,
    circle: &Circle,
    exclude_segment_ends: bool,
    options: &AtomIntersectOptions,
) -> Points {
    let mut pts = intersect_circles(
        circle,
        &Circle::from_arc(arc),
        options.exclude_tangents,
        options.tol,
    );
    if !options.infinite_line {
        pts.retain(|pt| arc.is_point_on_self_accelerated(*pt, exclude_segment_ends, options.tol));
    }
    pts
}

/// Intersects an arc (first) with a line (second).
pub fn intersect_arc_with_line(arc: &Arc, line: &Line, options: &AtomIntersectOptions) -> Points {
    let mut pts = intersect_circle_with_line(
        &Circle::from_arc(arc),
        line,
        options.exclude_segment_ends_2,
        options,
    );
    pts.retain(|pt| {
        arc.is_point_on_self_accelerated(*pt, options.exclude_segment_ends_1, options.tol)
    });
    pts
}

pub fn intersect_arcs(arc1: &Arc, arc2: &Arc, options: &AtomIntersectOptions) -> Points {
    let mut pts = intersect_arc_with_circle(
        arc2,
        &Circle::from_arc(arc1),
        options.exclude_segment_ends_2,
        options,
    );
    if !options.infinite_line {
        pts.retain(|pt| {
            arc1.is_point_on_self_accelerated(*pt, options.exclude_segment_ends_1, options.tol)
        });
    }
    pts
}

/// Intersects a ray from `ray_start` towards +y with a line.
///
/// A hit on the line's start is dropped so that a ray through a shared
/// vertex counts only once for the two adjoining segments.
pub fn intersect_upwards_ray_with_line(ray_start: Vector2D, line: &Line, tol: f64) -> Points {
    let d = line.direction();
    let pt = if d.x.abs() <= tol {
        return Points::new();
    } else if d.y.abs() <= tol {
        Vector2D::new(ray_start.x, line.start.y)
    } else {
        let h = line.to_homogeneous();
        Vector2D::new(ray_start.x, -(ray_start.x * h.x + h.z) / h.y)
    };

    if ray_start.y <= pt.y + tol
        && line.is_point_on_self_accelerated(pt, false, tol)
        && !pt.is_equal_accelerated(line.start, tol)
    {
        smallvec![pt]
    } else {
        Points::new()
    }
}

pub fn intersect_upwards_ray_with_circle(
    ray_start: Vector2D,
    circle: &Circle,
    exclude_tangents: bool,
    tol: f64,
) -> Points {
    let x = ray_start.x;
    let (cx, cy) = (circle.center.x, circle.center.y);
    let r = circle.radius();
    let dx = (x - cx).abs();

    if dx >= r + tol {
        return Points::new();
    }
    if dx >= r - tol {
        if exclude_tangents || ray_start.y > cy {
            return Points::new();
        }
        return smallvec![Vector2D::new(x, cy)];
    }

    let mut ips = Points::new();
    let y_offset = (r * r - dx * dx).sqrt();
    let y = cy + y_offset;
    if ray_start.y <= y {
        ips.push(Vector2D::new(x, y));
        let y = cy - y_offset;
        if ray_start.y <= y {
            ips.push(Vector2D::new(x, y));
        }
    }
    ips
}

/// Same start-point convention as [`intersect_upwards_ray_with_line`].
pub fn intersect_upwards_ray_with_arc(
    ray_start: Vector2D,
    arc: &Arc,
    exclude_tangents: bool,
    tol: f64,
) -> Points {
    let mut ips =
        intersect_upwards_ray_with_circle(ray_start, &Circle::from_arc(arc), exclude_tangents, tol);
    ips.retain(|pt| {
        arc.is_point_on_self_accelerated(*pt, false, tol)
            && !pt.is_equal_accelerated(arc.start(), tol)
    });
    ips
}
