//! Kernel settings
//!
//! Tolerances and defaults used by the boolean operations. Supports JSON and
//! TOML files so footprint generators can share one configuration.

use crate::error::{Error, Result};
use crate::tolerances::{MIN_SEGMENT_LENGTH, TOL_MM};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry kernel settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeomSettings {
    /// Positional tolerance in millimeters
    pub tolerance: f64,
    /// Cut segments shorter than this are dropped
    pub min_segment_length: f64,
    /// Merge back segments that only touch the other shape
    pub strict_intersection: bool,
}

impl Default for GeomSettings {
    fn default() -> Self {
        Self {
            tolerance: TOL_MM,
            min_segment_length: MIN_SEGMENT_LENGTH,
            strict_intersection: true,
        }
    }
}

impl GeomSettings {
    /// Create new settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::other(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid JSON settings: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid TOML settings: {}", e)))?
        } else {
            return Err(Error::other("Settings file must be .json or .toml"));
        };

        settings.validate()?;
        tracing::debug!("Loaded geometry settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize settings: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize settings: {}", e)))?
        } else {
            return Err(Error::other("Settings file must be .json or .toml"));
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(Error::other("Tolerance must be > 0"));
        }

        if !(self.min_segment_length.is_finite() && self.min_segment_length >= 0.0) {
            return Err(Error::other("Minimum segment length must be >= 0"));
        }

        Ok(())
    }
}
