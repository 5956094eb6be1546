//! Working state of a single intersect/cut/keepout call

use fpgeom_core::{GeomSettings, Vector2D, MIN_SEGMENT_LENGTH, TOL_MM};

use crate::model::{Atom, GeomShape, Shape};

/// Where a segment lies relative to the other shape of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Containment {
    /// Not classified yet
    #[default]
    Unknown,
    Inside,
    Outside,
}

/// Intersection points at the start and end of a segment, if any.
pub type SegmentEnds = [Option<Vector2D>; 2];

/// Options for [`intersect`](super::intersect::intersect).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectOptions {
    /// Ignore tangent points and segment ends that only touch the other shape
    pub strict_intersection: bool,
    /// Also cut the second shape at the intersection points
    pub cut_also_shape_2: bool,
    /// Sub-segments shorter than this are dropped after cutting
    pub min_segment_length: f64,
    pub tol: f64,
}

impl Default for IntersectOptions {
    fn default() -> Self {
        Self {
            strict_intersection: true,
            cut_also_shape_2: true,
            min_segment_length: MIN_SEGMENT_LENGTH,
            tol: TOL_MM,
        }
    }
}

impl From<&GeomSettings> for IntersectOptions {
    fn from(settings: &GeomSettings) -> Self {
        Self {
            strict_intersection: settings.strict_intersection,
            min_segment_length: settings.min_segment_length,
            tol: settings.tolerance,
            ..Self::default()
        }
    }
}

/// Per-shape bookkeeping. `segment_ends` and `containment` run parallel to
/// `atoms` once the shape has been cut.
#[derive(Debug, Clone, Default)]
pub struct ShapeSession {
    pub atoms: Vec<Atom>,
    /// Intersection points found on each of the original atoms
    pub atom_intersections: Vec<Vec<Vector2D>>,
    pub segment_ends: Vec<SegmentEnds>,
    pub containment: Vec<Containment>,
    pub cuts_performed: i64,
}

impl ShapeSession {
    fn new(shape: &Shape) -> Self {
        let atoms = shape.atoms();
        let n = atoms.len();
        Self {
            atoms,
            atom_intersections: vec![Vec::new(); n],
            segment_ends: vec![[None, None]; n],
            containment: vec![Containment::Unknown; n],
            cuts_performed: 0,
        }
    }

    /// Removes segment `index` from all parallel lists.
    pub(crate) fn remove_segment(&mut self, index: usize) {
        self.atoms.remove(index);
        self.segment_ends.remove(index);
        self.containment.remove(index);
    }
}

/// Result of intersecting two shapes: the (re-cut) atoms of each shape and
/// the intersection points between them.
#[derive(Debug, Clone)]
pub struct GeomOperationHandle<'a> {
    pub(crate) shapes: [&'a Shape; 2],
    pub(crate) sessions: [ShapeSession; 2],
    pub(crate) intersections: Vec<Vector2D>,
    pub(crate) options: IntersectOptions,
    pub(crate) exclude_tangents: bool,
    pub(crate) exclude_segment_ends: [bool; 2],
}

impl<'a> GeomOperationHandle<'a> {
    pub fn new(shape1: &'a Shape, shape2: &'a Shape, options: IntersectOptions) -> Self {
        let strict = options.strict_intersection;
        Self {
            shapes: [shape1, shape2],
            sessions: [ShapeSession::new(shape1), ShapeSession::new(shape2)],
            intersections: Vec::new(),
            options,
            exclude_tangents: strict,
            exclude_segment_ends: [strict && !shape1.is_closed(), strict && !shape2.is_closed()],
        }
    }

    pub fn shape(&self, index: usize) -> &'a Shape {
        self.shapes[index]
    }

    pub fn atoms(&self, index: usize) -> &[Atom] {
        &self.sessions[index].atoms
    }

    pub fn containment(&self, index: usize) -> &[Containment] {
        &self.sessions[index].containment
    }

    pub fn segment_ends(&self, index: usize) -> &[SegmentEnds] {
        &self.sessions[index].segment_ends
    }

    pub fn cuts_performed(&self, index: usize) -> i64 {
        self.sessions[index].cuts_performed
    }

    pub fn intersections(&self) -> &[Vector2D] {
        &self.intersections
    }

    pub fn tol(&self) -> f64 {
        self.options.tol
    }

    /// Records points found between atom `idx1` of the first shape and atom
    /// `idx2` of the second.
    pub fn add_intersections(&mut self, points: &[Vector2D], idx1: usize, idx2: usize) {
        let tol = self.options.tol;
        for point in points {
            add_unique(&mut self.sessions[0].atom_intersections[idx1], *point, tol);
            add_unique(&mut self.sessions[1].atom_intersections[idx2], *point, tol);
            add_unique(&mut self.intersections, *point, tol);
        }
    }

    /// Drops the first recorded intersection at `point`.
    pub fn remove_intersection(&mut self, point: Vector2D) {
        let tol = self.options.tol;
        if let Some(pos) = self
            .intersections
            .iter()
            .position(|ip| ip.is_equal_accelerated(point, tol))
        {
            self.intersections.remove(pos);
        }
    }

    pub fn is_point_an_intersection(&self, point: Vector2D) -> bool {
        self.intersections
            .iter()
            .any(|ip| point.is_equal_accelerated(*ip, self.options.tol))
    }
}

/// Adds `point`, or moves a coincident entry to the midpoint of both.
fn add_unique(points: &mut Vec<Vector2D>, point: Vector2D, tol: f64) {
    match points.iter_mut().find(|p| p.is_equal_accelerated(point, tol)) {
        Some(existing) => *existing = (*existing + point) / 2.0,
        None => points.push(point),
    }
}
