//! # fpgeom
//!
//! A 2D geometry kernel for generating PCB footprints.
//!
//! ## Architecture
//!
//! fpgeom is organized as a workspace with two crates:
//!
//! 1. **fpgeom-core** - Vectors, bounding boxes, tolerances, grid rounding,
//!    settings and error types
//! 2. **fpgeom-shapes** - Lines, arcs, circles, composite pad shapes and the
//!    intersect, cut, keepout and unite operations between them
//!
//! ## Example
//!
//! ```no_run
//! use fpgeom::{Line, Rectangle, Shape, MIN_SEGMENT_LENGTH, TOL_MM};
//!
//! let keepout = Shape::from(Rectangle::new((0.0, 0.0), (100.0, 100.0), 0.0));
//! let silk = Shape::from(Line::new((0.0, 0.0), (100.0, 0.0)));
//! let kept = keepout.subtract(&silk, MIN_SEGMENT_LENGTH, TOL_MM).unwrap();
//! assert_eq!(kept.len(), 1);
//! ```

pub use fpgeom_core::{
    bounding_box, error, rounding, settings, tolerances, vector, BoundingBox, Error, GeomError,
    GeomSettings, Result, Vector2D, Vector3D, MIN_SEGMENT_LENGTH, TOL_MM,
};

pub use fpgeom_shapes::{
    apply_keepouts, cut, intersect, keepout, model, tools, unite, Arc, Atom, Circle,
    CompoundElement, CompoundPolygon, Containment, Cross, Cruciform, GeomOperationHandle,
    GeomShape, IntersectOptions, Line, Polygon, Rectangle, RoundRectangle, Shape, ShapeKind,
    Stadium, Trapezoid,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, INFO by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Initialize logging with one JSON object per event, for batch runs whose
/// output is collected by other tools.
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
