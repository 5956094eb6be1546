//! Axis-aligned bounding box accumulator.
//!
//! The y axis points down, so `top` is the smallest y value.

use crate::error::{GeomError, Result};
use crate::vector::Vector2D;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Option<Vector2D>,
    pub max: Option<Vector2D>,
}

impl BoundingBox {
    /// Creates an empty bounding box.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bounding box spanning two opposite corners.
    pub fn from_corners(corner1: Vector2D, corner2: Vector2D) -> Self {
        Self {
            min: Some(corner1.min(corner2)),
            max: Some(corner1.max(corner2)),
        }
    }

    /// Creates the smallest bounding box containing all points.
    pub fn from_points<I: IntoIterator<Item = Vector2D>>(points: I) -> Self {
        let mut bbox = Self::new();
        for point in points {
            bbox.include_point(point);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() || self.max.is_none()
    }

    pub fn include_point(&mut self, point: Vector2D) -> &mut Self {
        match (self.min, self.max) {
            (Some(min), Some(max)) => {
                self.min = Some(min.min(point));
                self.max = Some(max.max(point));
            }
            _ => {
                self.min = Some(point);
                self.max = Some(point);
            }
        }
        self
    }

    pub fn include_bbox(&mut self, other: &BoundingBox) -> &mut Self {
        if let (Some(min), Some(max)) = (other.min, other.max) {
            self.include_point(min);
            self.include_point(max);
        }
        self
    }

    pub fn translate(&mut self, vector: Vector2D) -> &mut Self {
        if let Some(min) = self.min.as_mut() {
            *min += vector;
        }
        if let Some(max) = self.max.as_mut() {
            *max += vector;
        }
        self
    }

    /// Grows the box by `amount` on every side.
    pub fn inflate(&mut self, amount: f64) -> Result<&mut Self> {
        let (min, max) = self.corners("inflate")?;
        let offset = Vector2D::new(amount, amount);
        self.min = Some(min - offset);
        self.max = Some(max + offset);
        Ok(self)
    }

    pub fn contains_point(&self, point: Vector2D) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => {
                min.x <= point.x && point.x <= max.x && min.y <= point.y && point.y <= max.y
            }
            _ => false,
        }
    }

    /// An empty `other` is contained in every box.
    pub fn contains_bbox(&self, other: &BoundingBox) -> bool {
        match (other.min, other.max) {
            (Some(min), Some(max)) => self.contains_point(min) && self.contains_point(max),
            _ => true,
        }
    }

    fn corners(&self, property: &str) -> Result<(Vector2D, Vector2D)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(GeomError::empty_bbox(property).into()),
        }
    }

    pub fn top(&self) -> Result<f64> {
        Ok(self.corners("top")?.0.y)
    }

    pub fn bottom(&self) -> Result<f64> {
        Ok(self.corners("bottom")?.1.y)
    }

    pub fn left(&self) -> Result<f64> {
        Ok(self.corners("left")?.0.x)
    }

    pub fn right(&self) -> Result<f64> {
        Ok(self.corners("right")?.1.x)
    }

    pub fn top_left(&self) -> Result<Vector2D> {
        Ok(self.corners("top_left")?.0)
    }

    pub fn top_right(&self) -> Result<Vector2D> {
        let (min, max) = self.corners("top_right")?;
        Ok(Vector2D::new(max.x, min.y))
    }

    pub fn bottom_left(&self) -> Result<Vector2D> {
        let (min, max) = self.corners("bottom_left")?;
        Ok(Vector2D::new(min.x, max.y))
    }

    pub fn bottom_right(&self) -> Result<Vector2D> {
        Ok(self.corners("bottom_right")?.1)
    }

    pub fn top_mid(&self) -> Result<Vector2D> {
        let (min, max) = self.corners("top_mid")?;
        Ok(Vector2D::new((min.x + max.x) / 2.0, min.y))
    }

    pub fn bottom_mid(&self) -> Result<Vector2D> {
        let (min, max) = self.corners("bottom_mid")?;
        Ok(Vector2D::new((min.x + max.x) / 2.0, max.y))
    }

    pub fn left_mid(&self) -> Result<Vector2D> {
        let (min, max) = self.corners("left_mid")?;
        Ok(Vector2D::new(min.x, (min.y + max.y) / 2.0))
    }

    pub fn right_mid(&self) -> Result<Vector2D> {
        let (min, max) = self.corners("right_mid")?;
        Ok(Vector2D::new(max.x, (min.y + max.y) / 2.0))
    }

    pub fn size(&self) -> Result<Vector2D> {
        let (min, max) = self.corners("size")?;
        Ok(max - min)
    }

    pub fn center(&self) -> Result<Vector2D> {
        let (min, max) = self.corners("center")?;
        Ok((min + max) / 2.0)
    }
}
