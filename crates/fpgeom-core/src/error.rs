//! Error handling for fpgeom
//!
//! Geometry failures are programmer or input errors, never transient:
//! - Degenerate geometry (collinear arc points, null vectors)
//! - Invalid geometry (deflating a shape past its own extent)
//! - Empty bounding boxes queried for derived properties
//! - Shape combinations without a defined algorithm
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised immediately by constructors and operations whose geometric
/// preconditions do not hold.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    /// Input cannot describe the requested primitive
    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry {
        /// What made the input degenerate.
        reason: String,
    },

    /// Operation would produce an inverted or collapsed shape
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry {
        /// What made the result invalid.
        reason: String,
    },

    /// Derived property requested on a bounding box without points
    #[error("Bounding box is empty, cannot compute {property}")]
    EmptyBoundingBox {
        /// The requested property.
        property: String,
    },

    /// No algorithm exists for this operation and shape kinds
    #[error("Unsupported combination for {operation}: {shapes}")]
    UnsupportedCombination {
        /// The requested operation.
        operation: String,
        /// The shape kinds involved.
        shapes: String,
    },
}

impl GeomError {
    /// Create a degenerate geometry error
    pub fn degenerate(reason: impl Into<String>) -> Self {
        GeomError::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    /// Create an invalid geometry error
    pub fn invalid(reason: impl Into<String>) -> Self {
        GeomError::InvalidGeometry {
            reason: reason.into(),
        }
    }

    /// Create an empty bounding box error
    pub fn empty_bbox(property: impl Into<String>) -> Self {
        GeomError::EmptyBoundingBox {
            property: property.into(),
        }
    }

    /// Create an unsupported combination error
    pub fn unsupported(operation: impl Into<String>, shapes: impl Into<String>) -> Self {
        GeomError::UnsupportedCombination {
            operation: operation.into(),
            shapes: shapes.into(),
        }
    }
}

/// Main error type for fpgeom
///
/// A unified error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geom(#[from] GeomError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a degenerate geometry error
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Error::Geom(GeomError::DegenerateGeometry { .. }))
    }

    /// Check if this is an invalid geometry error
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self, Error::Geom(GeomError::InvalidGeometry { .. }))
    }

    /// Check if this is an empty bounding box error
    pub fn is_empty_bbox(&self) -> bool {
        matches!(self, Error::Geom(GeomError::EmptyBoundingBox { .. }))
    }

    /// Check if this is an unsupported combination error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Geom(GeomError::UnsupportedCombination { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
