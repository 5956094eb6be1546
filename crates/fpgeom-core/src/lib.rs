//! # fpgeom Core
//!
//! Value types shared by the fpgeom shape kernel: vectors, bounding boxes,
//! tolerance constants, grid rounding, settings and the error types.

pub mod bounding_box;
pub mod error;
pub mod rounding;
pub mod settings;
pub mod tolerances;
pub mod vector;

pub use bounding_box::BoundingBox;
pub use error::{Error, GeomError, Result};
pub use rounding::{round_to_grid_down, round_to_grid_nearest, round_to_grid_up};
pub use settings::GeomSettings;
pub use tolerances::{tol_deg, MIN_SEGMENT_LENGTH, TOL_MM};
pub use vector::{Vector2D, Vector3D};
