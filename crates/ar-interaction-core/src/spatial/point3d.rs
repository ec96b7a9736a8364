//! Positions in world space

use std::ops::{Add, Sub};

use super::Vector3D;

/// A point in world space (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3D {
    /// Origin point (0, 0, 0)
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point3D) -> f32 {
        (*self - *other).magnitude()
    }

    /// Vector from the origin to this point
    pub fn to_vector(&self) -> Vector3D {
        Vector3D::new(self.x, self.y, self.z)
    }

    /// Arithmetic mean of a set of points, `None` when empty
    pub fn average<'a>(points: impl IntoIterator<Item = &'a Point3D>) -> Option<Point3D> {
        let mut sum = Vector3D::ZERO;
        let mut count = 0usize;
        for point in points {
            sum = sum + point.to_vector();
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some((sum * (1.0 / count as f32)).to_point())
    }
}

impl Add<Vector3D> for Point3D {
    type Output = Point3D;

    fn add(self, rhs: Vector3D) -> Self::Output {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3D {
    type Output = Vector3D;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
