//! 2D and 3D vectors used as points and directions.

use crate::error::{GeomError, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A 2D point or vector in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    /// Creates a new vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The null vector.
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Builds a vector from polar coordinates around `origin`.
    pub fn from_polar(radius: f64, angle: f64, origin: Vector2D) -> Self {
        Self::from_polar_radians(radius, angle.to_radians(), origin)
    }

    pub fn from_polar_radians(radius: f64, angle: f64, origin: Vector2D) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin()) + origin
    }

    /// Returns `(radius, angle_deg)` of this point relative to `origin`.
    pub fn to_polar(&self, origin: Vector2D) -> (f64, f64) {
        let op = *self - origin;
        (op.norm(), op.arg())
    }

    /// Angle of the vector in degrees, measured from the x axis.
    pub fn arg(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: Vector2D) -> f64 {
        (*self - other).norm()
    }

    /// Rotates the point by `angle` degrees around `origin`.
    pub fn rotate(&mut self, angle: f64, origin: Vector2D) -> &mut Self {
        self.rotate_radians(angle.to_radians(), origin)
    }

    pub fn rotate_radians(&mut self, angle: f64, origin: Vector2D) -> &mut Self {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        self.x = origin.x + cos * dx - sin * dy;
        self.y = origin.y + sin * dx + cos * dy;
        self
    }

    /// Copy of the point rotated by `angle` degrees around `origin`.
    pub fn rotated(&self, angle: f64, origin: Vector2D) -> Self {
        let mut out = *self;
        out.rotate(angle, origin);
        out
    }

    /// Euclidean equality within `tol`.
    pub fn is_equal(&self, other: Vector2D, tol: f64) -> bool {
        self.distance_to(other) <= tol
    }

    /// Per-axis equality within `tol`; cheaper than [`Vector2D::is_equal`].
    pub fn is_equal_accelerated(&self, other: Vector2D, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol && (self.y - other.y).abs() <= tol
    }

    pub fn is_nullvec(&self, tol: f64) -> bool {
        self.norm() <= tol
    }

    pub fn is_nullvec_accelerated(&self, tol: f64) -> bool {
        self.x.abs() <= tol && self.y.abs() <= tol
    }

    /// Componentwise absolute value.
    pub fn positive(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    pub fn min(&self, other: Vector2D) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max(&self, other: Vector2D) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Rounds both coordinates to the nearest multiple of `base`.
    pub fn round_to(&self, base: f64) -> Self {
        if base == 0.0 {
            return *self;
        }
        Self::new(
            (self.x / base).round() * base,
            (self.y / base).round() * base,
        )
    }

    pub fn dot(&self, other: Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Cross product of the two vectors embedded in the xy plane.
    pub fn cross_product(&self, other: Vector2D) -> Vector3D {
        Vector3D::new(0.0, 0.0, self.x * other.y - self.y * other.x)
    }

    /// The vector rotated by +90 degrees.
    pub fn orthogonal(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Unit vector with the same direction.
    pub fn normalize(&self, tol: f64) -> Result<Self> {
        let norm = self.norm();
        if norm <= tol {
            return Err(GeomError::degenerate("cannot normalize a null vector").into());
        }
        Ok(*self / norm)
    }

    /// Vector with the same direction and length `new_len`.
    pub fn resize(&self, new_len: f64, tol: f64) -> Result<Self> {
        let norm = self.norm();
        if norm < tol {
            return Err(GeomError::degenerate("cannot resize a null vector").into());
        }
        Ok(*self * (new_len / norm))
    }

    pub fn to_homogeneous(&self) -> Vector3D {
        Vector3D::new(self.x, self.y, 1.0)
    }

    /// Cartesian point of a homogeneous coordinate. The caller checks `z != 0`.
    pub fn from_homogeneous(source: Vector3D) -> Self {
        Self::new(source.x / source.z, source.y / source.z)
    }
}

impl From<(f64, f64)> for Vector2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Vector2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector2D {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2D {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// A 3D vector, used for homogeneous 2D coordinates and cross products.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: Vector3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross_product(&self, other: Vector3D) -> Vector3D {
        Vector3D::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn norm(&self) -> f64 {
        self.dot(*self).sqrt()
    }
}
